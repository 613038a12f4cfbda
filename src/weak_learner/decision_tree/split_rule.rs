//! The threshold rule stored in every branch node.
use serde::{Serialize, Deserialize};

use crate::Sample;

/// The output of the function `split` of `Splitter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LR {
    Left,
    Right,
}

/// A named threshold rule on one feature column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Splitter {
    feature: String,
    threshold: f64,
}

impl Splitter {
    #[inline]
    pub(crate) fn new(name: &str, threshold: f64) -> Self {
        Self { feature: name.to_string(), threshold, }
    }

    /// Route the instance at `row` to one side.
    /// Instances whose value is strictly below the threshold go left.
    #[inline]
    pub fn split(&self, sample: &Sample, row: usize) -> LR {
        if sample[&self.feature][row] < self.threshold {
            LR::Left
        } else {
            LR::Right
        }
    }
}
