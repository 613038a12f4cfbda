//! Defines the sampler boundary: the solve configuration,
//! the returned assignment, and the `Sampler` trait itself.
use fixedbitset::FixedBitSet;

use crate::Result;
use crate::constants::{DEFAULT_NUM_READS, DEFAULT_SPIN_REVERSALS};
use super::problem::QuadraticProblem;

/// Tuning knobs forwarded to a [`Sampler`] backend.
/// Backends use the knobs that apply to them and ignore the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerConfig {
    /// The number of independent solve attempts.
    pub num_reads: usize,
    /// Let the backend rescale the problem coefficients to its
    /// working range before solving.
    pub auto_scale: bool,
    /// The number of gauge transforms a hardware backend applies
    /// to average out its biases.
    pub num_spin_reversal_transforms: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            num_reads: DEFAULT_NUM_READS,
            auto_scale: true,
            num_spin_reversal_transforms: DEFAULT_SPIN_REVERSALS,
        }
    }
}

impl SamplerConfig {
    /// Construct a configuration with the default knobs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of independent solve attempts.
    /// Default value is `3000.`
    #[inline]
    pub fn num_reads(mut self, num_reads: usize) -> Self {
        self.num_reads = num_reads;
        self
    }

    /// Enable or disable coefficient rescaling.
    /// Default value is `true.`
    #[inline]
    pub fn auto_scale(mut self, auto_scale: bool) -> Self {
        self.auto_scale = auto_scale;
        self
    }

    /// Set the number of spin reversal transforms.
    /// Default value is `10.`
    #[inline]
    pub fn num_spin_reversal_transforms(mut self, n: usize) -> Self {
        self.num_spin_reversal_transforms = n;
        self
    }
}

/// The lowest-energy variable assignment a backend found.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// One bit per problem variable.
    pub bits: FixedBitSet,
    /// The objective value of `bits` on the solved problem.
    pub energy: f64,
}

/// A backend that minimizes a [`QuadraticProblem`].
///
/// The harness never talks to a concrete solver directly. Every
/// consumer takes `&dyn Sampler`, so tests inject scripted backends
/// and the binary injects [`SteepestDescent`](super::SteepestDescent).
pub trait Sampler {
    /// The backend name, used in diagnostics.
    fn name(&self) -> &str;

    /// Minimize `problem` under `config`.
    ///
    /// Backends that cannot serve the request return
    /// [`Error::SamplerUnavailable`](crate::Error::SamplerUnavailable).
    fn solve(
        &self,
        problem: &QuadraticProblem,
        config: &SamplerConfig,
    ) -> Result<Assignment>;
}
