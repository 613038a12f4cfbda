//! The `WeakLearner` trait and the decision tree weak learner.

/// The `WeakLearner` trait.
pub mod core;

/// The decision tree weak learner and its classifier.
pub mod decision_tree;

pub use self::core::WeakLearner;

pub use self::decision_tree::{
    DecisionTree,
    DecisionTreeBuilder,
    DecisionTreeClassifier,
    SplitBy,
};
