//! Defines the classifier produced by the decision tree algorithm.
use serde::{Serialize, Deserialize};

use crate::{Classifier, Sample};
use super::node::Node;

/// A thin wrapper around the root [`Node`] of a grown tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTreeClassifier {
    root: Box<Node>,
}

impl DecisionTreeClassifier {
    #[inline]
    pub(super) fn new(root: Box<Node>) -> Self {
        Self { root }
    }

    /// Returns the number of leaves of this tree.
    pub fn leaves(&self) -> usize {
        self.root.leaves()
    }
}

impl Classifier for DecisionTreeClassifier {
    fn confidence(&self, sample: &Sample, row: usize) -> f64 {
        self.root.confidence(sample, row)
    }
}
