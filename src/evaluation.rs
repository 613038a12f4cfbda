//! Runs the model comparison and accumulates the report.

/// Provides [`Experiment`](crate::Experiment).
pub mod experiment;
/// Metric rows and the rendered report.
pub mod report;

pub use experiment::Experiment;
pub use report::{
    accuracy,
    MetricsRow,
    Outcome,
    Report,
};
