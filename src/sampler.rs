//! Defines the binary quadratic problems handed to samplers
//! and the backends that minimize them.
//! The ensembles that need a sampler take it
//! as a `&dyn Sampler` argument,
//! so backends can be swapped without touching the ensembles.

/// Provides the [`Sampler`](crate::Sampler) trait and its data types.
pub mod core;
/// Defines [`QuadraticProblem`](crate::QuadraticProblem).
pub mod problem;
/// A steepest-descent backend with random restarts.
pub mod steepest_descent;
/// An exact backend for small problems.
pub mod exhaustive;

pub use self::core::{
    Assignment,
    Sampler,
    SamplerConfig,
};
pub use problem::QuadraticProblem;
pub use steepest_descent::SteepestDescent;
pub use exhaustive::Exhaustive;
