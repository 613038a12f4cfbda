//! The recursive node representation of a grown tree.
use serde::{Serialize, Deserialize};

use crate::{Classifier, Sample};
use super::split_rule::{LR, Splitter};

/// A single node of a grown tree.
/// Branch nodes route an instance to one of their children,
/// leaf nodes answer with a fixed confidence value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) enum Node {
    Branch {
        splitter: Splitter,
        left:     Box<Node>,
        right:    Box<Node>,
    },
    Leaf {
        confidence: f64,
    },
}

impl Node {
    pub(crate) fn branch(
        splitter: Splitter,
        left:     Box<Node>,
        right:    Box<Node>,
    ) -> Self
    {
        Self::Branch { splitter, left, right, }
    }

    pub(crate) fn leaf(confidence: f64) -> Self {
        Self::Leaf { confidence, }
    }

    /// Counts the leaves of the sub-tree rooted at this node.
    pub(crate) fn leaves(&self) -> usize {
        match self {
            Self::Branch { left, right, .. } => left.leaves() + right.leaves(),
            Self::Leaf { .. } => 1,
        }
    }
}

impl Classifier for Node {
    fn confidence(&self, sample: &Sample, row: usize) -> f64 {
        match self {
            Self::Branch { splitter, left, right, } => {
                let child = match splitter.split(sample, row) {
                    LR::Left  => left,
                    LR::Right => right,
                };
                child.confidence(sample, row)
            },
            Self::Leaf { confidence } => *confidence,
        }
    }
}
