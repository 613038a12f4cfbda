//! An experiment harness comparing four ensemble strategies
//! for binary classification:
//!
//! - [`AdaBoost`]: boosted depth-bounded trees,
//! - [`WeakClassifiers`]: bootstrap-weighted trees with a uniform vote,
//! - [`QBoost`]: a tree pool whose members are selected by minimizing
//!   a quadratic objective through the [`Sampler`] boundary,
//! - [`QBoostPlus`]: the same selection re-applied over the fitted
//!   base models.
//!
//! A run loads a named dataset, splits it two thirds / one third,
//! standardizes and row-normalizes both sides, fits the four models,
//! and renders one train/test accuracy table.
//!
//! ```no_run
//! use rand::prelude::*;
//! use spinboost::prelude::*;
//!
//! # fn main() -> spinboost::Result<()> {
//! let mut rng = StdRng::from_entropy();
//! let sample = DatasetId::Synthetic.load(&mut rng)?;
//!
//! let sampler = SteepestDescent::new();
//! let report = Experiment::new().run(&sample, &sampler)?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

pub mod constants;
pub mod error;
pub mod sample;
pub mod scaler;
pub mod dataset;
pub mod hypothesis;
pub mod weak_learner;
pub mod sampler;
pub mod model;
pub mod evaluation;
pub mod prelude;

pub use error::{
    Error,
    Result,
};

pub use sample::{
    Feature,
    Sample,
    SampleReader,
};

pub use scaler::Scaler;

pub use dataset::{
    partition,
    DatasetId,
};

pub use hypothesis::{
    Classifier,
    WeightedMajority,
};

pub use weak_learner::{
    DecisionTree,
    DecisionTreeBuilder,
    DecisionTreeClassifier,
    SplitBy,
    WeakLearner,
};

pub use sampler::{
    Assignment,
    Exhaustive,
    QuadraticProblem,
    Sampler,
    SamplerConfig,
    SteepestDescent,
};

pub use model::{
    AdaBoost,
    Model,
    QBoost,
    QBoostPlus,
    WeakClassifiers,
};

pub use evaluation::{
    accuracy,
    Experiment,
    MetricsRow,
    Outcome,
    Report,
};
