//! Error types for the experiment pipeline.

use thiserror::Error;

/// Top-level error type.
///
/// Dataset loading, preprocessing, and splitting errors are fatal for
/// a run; [`Error::SamplerUnavailable`] raised while fitting a single
/// model is caught by the evaluation driver so the remaining models
/// still report their scores.
#[derive(Debug, Error)]
pub enum Error {
    /// The dataset identifier is not a supported one.
    #[error("unknown dataset `{0}`")]
    UnknownDataset(String),

    /// The feature matrix is empty or not rectangular.
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// One side of a train/test partition came out empty.
    #[error("the {0} split is empty")]
    EmptySplit(&'static str),

    /// The sampling backend could not produce an assignment.
    #[error("sampler unavailable: {0}")]
    SamplerUnavailable(String),

    /// File system failure while loading a dataset.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV/dataframe failure while loading a dataset.
    #[error("dataframe error: {0}")]
    Dataframe(#[from] polars::prelude::PolarsError),
}

/// Alias with the error type fixed to [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
