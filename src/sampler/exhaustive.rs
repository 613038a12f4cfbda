//! An exact enumeration backend for small problems.
use fixedbitset::FixedBitSet;

use crate::constants::EXHAUSTIVE_VARIABLE_LIMIT;
use crate::error::{Error, Result};
use super::core::{Assignment, Sampler, SamplerConfig};
use super::problem::QuadraticProblem;

/// Enumerates every assignment and returns the exact minimizer.
///
/// Only meant for problems with a handful of variables.
/// Larger instances are refused with
/// [`Error::SamplerUnavailable`](crate::Error::SamplerUnavailable).
pub struct Exhaustive;

impl Sampler for Exhaustive {
    fn name(&self) -> &str {
        "Exhaustive"
    }

    fn solve(
        &self,
        problem: &QuadraticProblem,
        _config: &SamplerConfig,
    ) -> Result<Assignment>
    {
        let n_vars = problem.n_vars();
        if n_vars == 0 {
            return Err(Error::SamplerUnavailable(
                "the problem has no variables".into()
            ));
        }
        if n_vars > EXHAUSTIVE_VARIABLE_LIMIT {
            return Err(Error::SamplerUnavailable(format!(
                "{n_vars} variables exceed the exhaustive limit \
                of {EXHAUSTIVE_VARIABLE_LIMIT}"
            )));
        }

        // The all-zero assignment seeds the search.
        let mut best_bits = FixedBitSet::with_capacity(n_vars);
        let mut best_energy = problem.energy(&best_bits);

        for mask in 1u64..1u64 << n_vars {
            let mut bits = FixedBitSet::with_capacity(n_vars);
            for i in 0..n_vars {
                if mask >> i & 1 == 1 {
                    bits.insert(i);
                }
            }
            let energy = problem.energy(&bits);
            if energy < best_energy {
                best_energy = energy;
                best_bits = bits;
            }
        }

        Ok(Assignment { bits: best_bits, energy: best_energy, })
    }
}
