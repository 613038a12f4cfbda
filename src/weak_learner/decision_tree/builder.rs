//! Defines a builder for the decision tree weak learner.
use std::collections::HashMap;

use crate::Sample;
use crate::constants::DEFAULT_TREE_DEPTH;

use super::bin::Bins;
use super::split_by::SplitBy;
use super::dtree::DecisionTree;

/// Upper bound on the number of bins per feature.
pub const MAX_BINS_PER_FEATURE: usize = 255;

/// Builder for [`DecisionTree`].
/// Collects the tree parameters before construction.
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
/// let tree = DecisionTreeBuilder::new(&sample)
///     .max_depth(2)
///     .split_by(SplitBy::Edge)
///     .build();
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DecisionTreeBuilder<'a> {
    sample: &'a Sample,
    max_depth: usize,
    split_by: SplitBy,
}

impl<'a> DecisionTreeBuilder<'a> {
    /// Start from the default parameters for `sample`.
    pub fn new(sample: &'a Sample) -> Self {
        Self {
            sample,
            max_depth: DEFAULT_TREE_DEPTH,
            split_by: SplitBy::Gini,
        }
    }

    /// Cap the depth of the produced trees.
    /// Default value is `3.`
    pub fn max_depth(mut self, depth: usize) -> Self {
        assert!(depth > 0, "A depth bound of zero leaves no room to split");
        self.max_depth = depth;

        self
    }

    /// Choose the node splitting criterion.
    /// Default value is `SplitBy::Gini.`
    #[inline]
    pub fn split_by(mut self, split_by: SplitBy) -> Self {
        self.split_by = split_by;
        self
    }

    /// Consume `self` and construct the [`DecisionTree`].
    /// Each feature gets one bin per distinct value,
    /// capped at [`MAX_BINS_PER_FEATURE`].
    pub fn build(self) -> DecisionTree<'a> {
        let bins = self.sample.features()
            .iter()
            .map(|feature| {
                let n_bin = feature.distinct_value_count()
                    .min(MAX_BINS_PER_FEATURE);
                (feature.name(), Bins::cut(feature, n_bin))
            })
            .collect::<HashMap<_, _>>();

        DecisionTree::new(bins, self.split_by, self.max_depth)
    }
}
