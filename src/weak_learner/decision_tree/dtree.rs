use std::collections::HashMap;

use crate::{Sample, WeakLearner};

use super::bin::Bins;
use super::node::Node;
use super::split_rule::{LR, Splitter};
use super::split_by::SplitBy;
use super::classifier::DecisionTreeClassifier;

/// The Decision Tree weak learner.
/// Given training examples and a distribution over them,
/// [`DecisionTree`] grows a tree of depth at most `max_depth`
/// and returns it as a [`DecisionTreeClassifier`].
///
/// Construct it via [`DecisionTreeBuilder`](super::DecisionTreeBuilder).
///
/// # Example
/// ```no_run
/// use spinboost::prelude::*;
///
/// # fn main() -> spinboost::Result<()> {
/// let sample = SampleReader::new()
///     .file("/path/to/train.csv")
///     .has_header(true)
///     .target_feature("class")
///     .read()?;
///
/// // Grow trees of depth at most 2 under the entropy criterion.
/// let tree = DecisionTreeBuilder::new(&sample)
///     .max_depth(2)
///     .split_by(SplitBy::Entropy)
///     .build();
///
/// let m = sample.shape().0;
/// let dist = vec![1f64 / m as f64; m];
/// let hypothesis = tree.produce(&sample, &dist);
/// let predictions = hypothesis.predict_all(&sample);
/// # Ok(())
/// # }
/// ```
pub struct DecisionTree<'a> {
    bins:      HashMap<&'a str, Bins>,
    split_by:  SplitBy,
    max_depth: usize,
}

impl<'a> DecisionTree<'a> {
    /// Called by `DecisionTreeBuilder::build`.
    #[inline]
    pub(super) fn new(
        bins:      HashMap<&'a str, Bins>,
        split_by:  SplitBy,
        max_depth: usize,
    ) -> Self
    {
        Self { bins, split_by, max_depth, }
    }

    /// Recursively grow a subtree over the rows in `indices`.
    #[inline]
    fn grow(
        &self,
        sample:  &Sample,
        dist:    &[f64],
        indices: Vec<usize>,
        depth:   usize,
    ) -> Box<Node>
    {
        let (conf, loss) = confidence_and_loss(sample, dist, &indices[..]);

        // Nothing left to gain from splitting.
        if loss == 0f64 || depth < 1 {
            return Box::new(Node::leaf(conf));
        }

        let (feature, threshold) = self.split_by.best_split(
            &self.bins, sample, dist, &indices[..]
        );
        let rule = Splitter::new(feature, threshold);

        let (lix, rix): (Vec<usize>, Vec<usize>) = indices.into_iter()
            .partition(|&i| matches!(rule.split(sample, i), LR::Left));

        // A one-sided cut carries no information. Stop here.
        if lix.is_empty() || rix.is_empty() {
            return Box::new(Node::leaf(conf));
        }

        let left  = self.grow(sample, dist, lix, depth - 1);
        let right = self.grow(sample, dist, rix, depth - 1);

        Box::new(Node::branch(rule, left, right))
    }
}

impl WeakLearner for DecisionTree<'_> {
    type Hypothesis = DecisionTreeClassifier;

    fn name(&self) -> &str {
        "Decision Tree"
    }

    fn info(&self) -> Option<Vec<(&str, String)>> {
        let widest = self.bins.values()
            .map(Bins::len)
            .max()
            .unwrap_or(0);
        Some(vec![
            ("# of bins (max)", widest.to_string()),
            ("Max depth", self.max_depth.to_string()),
            ("Split criterion", self.split_by.to_string()),
        ])
    }

    #[inline]
    fn produce(&self, sample: &Sample, dist: &[f64])
        -> Self::Hypothesis
    {
        let n_sample = sample.shape().0;
        let indices = (0..n_sample)
            .filter(|&i| dist[i] > 0f64)
            .collect::<Vec<usize>>();
        assert!(
            !indices.is_empty(),
            "every instance has zero mass under dist: {dist:?}"
        );

        let root = self.grow(sample, dist, indices, self.max_depth);

        DecisionTreeClassifier::new(root)
    }
}

/// Returns the pair `(c, l)` for the node covering `indices`, where
/// `c` is the confidence of the majority label in `[-1, +1]` and
/// `l` is the weighted training loss of predicting that label.
/// Assumes labels in `{+1, -1}`.
#[inline]
fn confidence_and_loss(sample: &Sample, dist: &[f64], indices: &[usize])
    -> (f64, f64)
{
    assert!(!indices.is_empty());
    let target = sample.target();

    let (pos, neg) = indices.iter()
        .fold((0f64, 0f64), |(p, n), &i| {
            if target[i] > 0f64 { (p + dist[i], n) } else { (p, n + dist[i]) }
        });

    let total = pos + neg;
    let (label, mass) = if pos >= neg { (1f64, pos) } else { (-1f64, neg) };

    // Boosting updates may assign zero mass to every index here.
    if total <= 0f64 {
        return (label, 0f64);
    }

    let ratio = mass / total;
    let loss = total * (1f64 - ratio);
    let confidence = (label * (2f64 * ratio - 1f64)).clamp(-1f64, 1f64);

    (confidence, loss)
}
