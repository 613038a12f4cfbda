/// The decision tree weak learner.
pub mod dtree;
/// A builder for `DecisionTree`.
pub mod builder;
/// The classifier that `DecisionTree` produces.
pub mod classifier;
/// Node splitting criteria.
pub mod split_by;

mod bin;
mod node;
mod split_rule;

pub use self::builder::DecisionTreeBuilder;
pub use self::classifier::DecisionTreeClassifier;
pub use self::dtree::DecisionTree;
pub use self::split_by::SplitBy;
