//! Exports the experiment pipeline in one line.
//!
//! ```
//! use spinboost::prelude::*;
//! ```
pub use crate::error::{
    Error,
    Result,
};

pub use crate::sample::{
    Feature,
    Sample,
    SampleReader,
};

pub use crate::scaler::Scaler;

pub use crate::dataset::{
    partition,
    DatasetId,
};

pub use crate::hypothesis::{
    Classifier,
    WeightedMajority,
};

pub use crate::weak_learner::{
    DecisionTree,
    DecisionTreeBuilder,
    DecisionTreeClassifier,
    SplitBy,
    WeakLearner,
};

pub use crate::sampler::{
    Assignment,
    Exhaustive,
    QuadraticProblem,
    Sampler,
    SamplerConfig,
    SteepestDescent,
};

pub use crate::model::{
    AdaBoost,
    Model,
    QBoost,
    QBoostPlus,
    WeakClassifiers,
};

pub use crate::evaluation::{
    accuracy,
    Experiment,
    MetricsRow,
    Outcome,
    Report,
};
