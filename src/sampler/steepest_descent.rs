//! A local steepest-descent backend for the sampler boundary.
use rand::prelude::*;
use rayon::prelude::*;
use fixedbitset::FixedBitSet;

use crate::error::{Error, Result};
use super::core::{Assignment, Sampler, SamplerConfig};
use super::problem::QuadraticProblem;

/// A greedy single-bit-flip descent with random restarts.
///
/// Each read starts from a uniformly random assignment and repeatedly
/// applies the bit flip that lowers the energy the most,
/// stopping at a local minimum.
/// Reads run in parallel and the best local minimum wins.
///
/// ```no_run
/// use spinboost::prelude::*;
///
/// # fn main() -> spinboost::Result<()> {
/// let problem = QuadraticProblem::new(
///     vec![0.5, -1.0, 0.25],
///     &[(0, 1, 1.0), (1, 2, -0.5)],
/// )?;
/// let config = SamplerConfig::new().num_reads(100);
///
/// let sampler = SteepestDescent::new().seed(42);
/// let assignment = sampler.solve(&problem, &config)?;
/// println!("energy: {}", assignment.energy);
/// # Ok(())
/// # }
/// ```
pub struct SteepestDescent {
    seed: Option<u64>,
}

impl SteepestDescent {
    /// Construct a descent sampler with entropy-based seeding.
    pub fn new() -> Self {
        Self { seed: None, }
    }


    /// Fix the seed that generates the restart points.
    /// Two runs with the same seed on the same problem
    /// return the same assignment.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for SteepestDescent {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler for SteepestDescent {
    fn name(&self) -> &str {
        "Steepest Descent"
    }

    fn solve(
        &self,
        problem: &QuadraticProblem,
        config: &SamplerConfig,
    ) -> Result<Assignment>
    {
        if problem.n_vars() == 0 {
            return Err(Error::SamplerUnavailable(
                "the problem has no variables".into()
            ));
        }
        if config.num_spin_reversal_transforms > 0 {
            // Gauge transforms leave an exactly evaluated landscape
            // unchanged, so a local backend has nothing to average out.
            log::debug!(
                "ignoring {n} spin reversal transforms on a local backend",
                n = config.num_spin_reversal_transforms,
            );
        }

        let rescaled;
        let landscape = if config.auto_scale {
            rescaled = problem.rescaled();
            &rescaled
        } else {
            problem
        };

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let restarts = (0..config.num_reads)
            .map(|_| rng.gen::<u64>())
            .collect::<Vec<_>>();

        restarts.into_par_iter()
            .map(|restart| {
                let bits = descend(landscape, restart);
                let energy = landscape.energy(&bits);
                (energy, bits)
            })
            .min_by(|(e1, _), (e2, _)| {
                e1.partial_cmp(e2)
                    .expect("energies should never be NaN")
            })
            .map(|(_, bits)| {
                // Report the energy of the problem as given,
                // not of the rescaled copy.
                let energy = problem.energy(&bits);
                Assignment { bits, energy, }
            })
            .ok_or_else(|| Error::SamplerUnavailable(
                "`num_reads` is zero".into()
            ))
    }
}

/// Descend to a local minimum from a seeded random assignment.
fn descend(problem: &QuadraticProblem, seed: u64) -> FixedBitSet {
    let mut rng = StdRng::seed_from_u64(seed);
    let n_vars = problem.n_vars();

    let mut bits = FixedBitSet::with_capacity(n_vars);
    for i in 0..n_vars {
        if rng.gen::<bool>() {
            bits.insert(i);
        }
    }

    loop {
        let mut best_flip = None;
        let mut best_delta = 0f64;
        for k in 0..n_vars {
            let delta = problem.flip_delta(&bits, k);
            if delta < best_delta {
                best_delta = delta;
                best_flip = Some(k);
            }
        }

        match best_flip {
            Some(k) => { bits.toggle(k); },
            None => { break; },
        }
    }

    bits
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::exhaustive::Exhaustive;

    const TEST_TOLERANCE: f64 = 1e-9;

    fn test_problem(seed: u64, n_vars: usize) -> QuadraticProblem {
        let mut rng = StdRng::seed_from_u64(seed);
        let linear = (0..n_vars)
            .map(|_| rng.gen_range(-2.0..2.0))
            .collect::<Vec<_>>();
        let mut couplings = Vec::new();
        for i in 0..n_vars {
            for j in i+1..n_vars {
                couplings.push((i, j, rng.gen_range(-1.0..1.0)));
            }
        }
        QuadraticProblem::new(linear, &couplings).unwrap()
    }

    #[test]
    fn test_solve_matches_exhaustive_01() {
        let config = SamplerConfig::new().num_reads(200);
        for seed in 0..5 {
            let problem = test_problem(seed, 8);
            let exact = Exhaustive.solve(&problem, &config).unwrap();
            let found = SteepestDescent::new()
                .seed(seed)
                .solve(&problem, &config)
                .unwrap();
            assert!(
                (found.energy - exact.energy).abs() < TEST_TOLERANCE,
                "expected {e}, got {f}.",
                e = exact.energy,
                f = found.energy,
            );
        }
    }

    #[test]
    fn test_solve_deterministic_01() {
        let problem = test_problem(7, 12);
        let config = SamplerConfig::new().num_reads(20);

        let first = SteepestDescent::new()
            .seed(1234)
            .solve(&problem, &config)
            .unwrap();
        let second = SteepestDescent::new()
            .seed(1234)
            .solve(&problem, &config)
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_solve_rejects_zero_reads_01() {
        let problem = test_problem(0, 4);
        let config = SamplerConfig::new().num_reads(0);

        let result = SteepestDescent::new().solve(&problem, &config);
        assert!(
            matches!(result, Err(Error::SamplerUnavailable(_))),
            "expected SamplerUnavailable, got {result:?}",
        );
    }

    #[test]
    fn test_solve_respects_auto_scale_energy_01() {
        // The reported energy always refers to the original problem.
        let problem = QuadraticProblem::new(
            vec![100.0, -200.0],
            &[(0, 1, 50.0)],
        ).unwrap();
        let config = SamplerConfig::new().num_reads(10);

        let assignment = SteepestDescent::new()
            .seed(0)
            .solve(&problem, &config)
            .unwrap();

        assert!(!assignment.bits.contains(0));
        assert!(assignment.bits.contains(1));
        assert!(
            (assignment.energy + 200.0).abs() < TEST_TOLERANCE,
            "expected -200.0, got {energy}",
            energy = assignment.energy,
        );
    }
}
