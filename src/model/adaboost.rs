//! The boosting ensemble by Freund & Schapire, 1995.
use rayon::prelude::*;

use crate::constants::{DEFAULT_ENSEMBLE_SIZE, DEFAULT_TREE_DEPTH};
use crate::error::Result;
use crate::hypothesis::{Classifier, WeightedMajority};
use crate::sample::Sample;
use crate::weak_learner::{
    DecisionTreeBuilder,
    DecisionTreeClassifier,
    SplitBy,
    WeakLearner,
};
use super::core::{fitted, Model};

/// Boosted depth-bounded trees with a fixed round budget.
///
/// Each round trains one tree on the current distribution over the
/// training instances, then reweights the instances
/// by the exponential update.
/// The normalization runs in log space to avoid overflow.
///
/// ```no_run
/// use spinboost::prelude::*;
///
/// # fn main() -> spinboost::Result<()> {
/// let sample = SampleReader::new()
///     .file("data/wdbc.csv")
///     .has_header(true)
///     .target_feature("class")
///     .read()?
///     .binarize_target(|y| y == 1.0);
///
/// let mut model = AdaBoost::new()
///     .n_rounds(10)
///     .max_depth(2);
/// model.fit(&sample)?;
///
/// let predictions = model.predict_all(&sample);
/// # Ok(())
/// # }
/// ```
pub struct AdaBoost {
    n_rounds: usize,
    max_depth: usize,
    ensemble: Option<WeightedMajority<DecisionTreeClassifier>>,
}

impl AdaBoost {
    /// Construct a booster with the default round and depth budgets.
    pub fn new() -> Self {
        Self {
            n_rounds: DEFAULT_ENSEMBLE_SIZE,
            max_depth: DEFAULT_TREE_DEPTH,
            ensemble: None,
        }
    }


    /// Set the number of boosting rounds.
    /// Default value is `35.`
    pub fn n_rounds(mut self, n_rounds: usize) -> Self {
        self.n_rounds = n_rounds;
        self
    }


    /// Set the depth bound of the weak hypotheses.
    /// Default value is `3.`
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for AdaBoost {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for AdaBoost {
    fn name(&self) -> &str {
        "AdaBoost"
    }

    fn info(&self) -> Option<Vec<(&str, String)>> {
        Some(vec![
            ("# of rounds", format!("{}", self.n_rounds)),
            ("Max depth", format!("{}", self.max_depth)),
        ])
    }

    fn fit(&mut self, train: &Sample) -> Result<()> {
        train.is_valid_binary_instance();
        let n_sample = train.shape().0;

        // Boosting rounds maximize the weighted edge directly.
        let tree = DecisionTreeBuilder::new(train)
            .max_depth(self.max_depth)
            .split_by(SplitBy::Edge)
            .build();

        let uni = 1.0 / n_sample as f64;
        let mut dist = vec![uni; n_sample];
        let mut weights = Vec::new();
        let mut hypotheses = Vec::new();

        for _ in 1..=self.n_rounds {
            let h = tree.produce(train, &dist);

            let margins = margins(train, &h);
            let edge = inner_product(&margins, &dist);

            // A hypothesis that predicts every instance correctly
            // is the combined classifier on its own.
            if edge.abs() >= 1.0 {
                weights = vec![edge.signum()];
                hypotheses = vec![h];
                break;
            }

            weights.push(update_params(&mut dist, margins, edge));
            hypotheses.push(h);
        }

        self.ensemble = Some(
            WeightedMajority::from_slices(&weights[..], &hypotheses[..])
        );
        Ok(())
    }

    fn predict_all(&self, sample: &Sample) -> Vec<i64> {
        fitted(&self.ensemble, self.name()).predict_all(sample)
    }

    fn weights(&self) -> Option<&[f64]> {
        self.ensemble.as_ref().map(|f| &f.weights[..])
    }
}

/// The margin `y[i] * h(x[i])` of a single hypothesis per instance.
fn margins<H: Classifier>(sample: &Sample, h: &H) -> Vec<f64> {
    sample.target()
        .iter()
        .enumerate()
        .map(|(i, y)| y * h.confidence(sample, i))
        .collect::<Vec<_>>()
}

fn inner_product(margins: &[f64], dist: &[f64]) -> f64 {
    margins.iter()
        .zip(dist)
        .map(|(yh, d)| yh * d)
        .sum::<f64>()
}

/// Returns the weight on the new hypothesis and updates `dist`
/// by the exponential rule, normalizing in log space.
fn update_params(dist: &mut [f64], margins: Vec<f64>, edge: f64) -> f64 {
    let n_sample = dist.len();

    let weight = ((1.0 + edge) / (1.0 - edge)).ln() / 2.0;

    // To prevent overflow, take the logarithm.
    dist.par_iter_mut()
        .zip(margins)
        .for_each(|(d, yh)| { *d = d.ln() - weight * yh; });

    // Sort indices by ascending order
    let mut indices = (0..n_sample).collect::<Vec<_>>();
    indices.sort_unstable_by(|&i, &j| {
        dist[i].partial_cmp(&dist[j]).unwrap()
    });

    let mut normalizer = dist[indices[0]];
    for i in indices.into_iter().skip(1) {
        let mut a = normalizer;
        let mut b = dist[i];
        if a < b {
            std::mem::swap(&mut a, &mut b);
        }

        normalizer = a + (1.0 + (b - a).exp()).ln();
    }

    dist.par_iter_mut()
        .for_each(|d| { *d = (*d - normalizer).exp(); });

    weight
}
