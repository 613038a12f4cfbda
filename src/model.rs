//! The four ensemble strategies compared by the experiment driver.
//! All of them train and predict through the [`Model`] trait,
//! so the driver never needs to know which strategy it is running.

/// Provides the [`Model`](crate::Model) trait.
pub mod core;
/// The boosting ensemble.
pub mod adaboost;
/// The bagged tree ensemble.
pub mod weak_classifiers;
/// The sampler-selected tree ensemble.
pub mod qboost;
/// The sampler-selected meta ensemble.
pub mod qboost_plus;

mod pool;
mod qubo;

pub use self::core::Model;
pub use adaboost::AdaBoost;
pub use weak_classifiers::WeakClassifiers;
pub use qboost::QBoost;
pub use qboost_plus::QBoostPlus;
