//! Bootstrap-weighted construction of decision-tree pools.
use rand::prelude::*;

use crate::sample::Sample;
use crate::weak_learner::{
    DecisionTreeBuilder,
    DecisionTreeClassifier,
    WeakLearner,
};

/// Train `pool_size` depth-bounded trees, each on the resampling
/// weights of one seeded bootstrap draw.
/// Instances left out of a draw get zero weight,
/// so every tree sees a different subset of `sample`.
pub(crate) fn bootstrap_pool(
    sample: &Sample,
    pool_size: usize,
    max_depth: usize,
    seed: u64,
) -> Vec<DecisionTreeClassifier>
{
    let n_sample = sample.shape().0;
    let tree = DecisionTreeBuilder::new(sample)
        .max_depth(max_depth)
        .build();

    let mut rng = StdRng::seed_from_u64(seed);
    (0..pool_size)
        .map(|_| {
            let dist = bootstrap_weights(n_sample, &mut rng);
            tree.produce(sample, &dist)
        })
        .collect()
}

/// One bootstrap draw of `n_sample` indices with replacement,
/// returned as weights `count / n_sample` summing to one.
fn bootstrap_weights<R: Rng>(n_sample: usize, rng: &mut R) -> Vec<f64> {
    let mut counts = vec![0_usize; n_sample];
    for _ in 0..n_sample {
        counts[rng.gen_range(0..n_sample)] += 1;
    }

    counts.into_iter()
        .map(|count| count as f64 / n_sample as f64)
        .collect()
}
