//! Classifier traits and the weighted-majority combiner.

pub(crate) mod hypothesis_traits;
pub(crate) mod weighted_majority;

pub use self::hypothesis_traits::Classifier;
pub use self::weighted_majority::WeightedMajority;
