//! Defines the quadratic unconstrained binary optimization problem
//! handed to a sampler backend.
use fixedbitset::FixedBitSet;

use crate::error::{Error, Result};

/// A quadratic objective over binary variables,
///
/// ```text
/// E(x) = sum_i linear[i] x_i + sum_{i<j} quadratic[i][j] x_i x_j
/// ```
///
/// to be minimized over `x` in `{0, 1}^n`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticProblem {
    n_vars: usize,
    linear: Vec<f64>,
    // Square matrix. Couplings live in the upper triangle,
    // everything else stays zero.
    quadratic: Vec<Vec<f64>>,
}

impl QuadraticProblem {
    /// Build a problem from its linear terms and pairwise couplings.
    /// Each coupling is a `(i, j, weight)` triple with `i < j`.
    pub fn new(
        linear: Vec<f64>,
        couplings: &[(usize, usize, f64)],
    ) -> Result<Self>
    {
        let n_vars = linear.len();
        let mut quadratic = vec![vec![0f64; n_vars]; n_vars];
        for &(i, j, weight) in couplings {
            if i >= j || j >= n_vars {
                return Err(Error::InvalidShape(format!(
                    "coupling ({i}, {j}) is out of range \
                    for {n_vars} variables"
                )));
            }
            quadratic[i][j] += weight;
        }

        Ok(Self { n_vars, linear, quadratic, })
    }

    /// The number of binary variables.
    pub fn n_vars(&self) -> usize {
        self.n_vars
    }

    /// The linear coefficients, one per variable.
    pub fn linear(&self) -> &[f64] {
        &self.linear[..]
    }

    /// Evaluate the objective at the given assignment.
    pub fn energy(&self, bits: &FixedBitSet) -> f64 {
        let mut energy = 0f64;
        for i in bits.ones() {
            energy += self.linear[i];
            for j in bits.ones() {
                if i < j {
                    energy += self.quadratic[i][j];
                }
            }
        }
        energy
    }

    /// The change in objective value caused by flipping bit `k`.
    pub fn flip_delta(&self, bits: &FixedBitSet, k: usize) -> f64 {
        let mut delta = self.linear[k];
        for i in bits.ones() {
            if i == k { continue; }
            let (a, b) = if i < k { (i, k) } else { (k, i) };
            delta += self.quadratic[a][b];
        }

        if bits.contains(k) { -delta } else { delta }
    }

    /// A copy of this problem with every coefficient divided by the
    /// largest absolute coefficient. The minimizer is unchanged.
    pub fn rescaled(&self) -> Self {
        let scale = self.linear.iter()
            .chain(self.quadratic.iter().flatten())
            .fold(0f64, |acc, c| acc.max(c.abs()));
        if scale <= 0f64 {
            return self.clone();
        }

        let linear = self.linear.iter()
            .map(|c| c / scale)
            .collect::<Vec<_>>();
        let quadratic = self.quadratic.iter()
            .map(|row| row.iter().map(|c| c / scale).collect())
            .collect::<Vec<_>>();
        Self { n_vars: self.n_vars, linear, quadratic, }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_TOLERANCE: f64 = 1e-9;

    fn bits_of(n: usize, ones: &[usize]) -> FixedBitSet {
        let mut bits = FixedBitSet::with_capacity(n);
        for &i in ones {
            bits.insert(i);
        }
        bits
    }

    #[test]
    fn test_energy_01() {
        let problem = QuadraticProblem::new(
            vec![1.0, -2.0, 0.5],
            &[(0, 1, 3.0), (1, 2, -1.0)],
        ).unwrap();

        let bits = bits_of(3, &[0, 1]);
        let result = problem.energy(&bits);
        let expect = 1.0 - 2.0 + 3.0;
        assert!(
            (expect - result).abs() < TEST_TOLERANCE,
            "expected {expect}, got {result}",
        );
    }

    #[test]
    fn test_energy_02() {
        let problem = QuadraticProblem::new(
            vec![1.0, -2.0, 0.5],
            &[(0, 1, 3.0), (1, 2, -1.0)],
        ).unwrap();

        let bits = bits_of(3, &[]);
        let result = problem.energy(&bits);
        assert_eq!(0.0, result, "expected 0.0, got {result}");
    }

    #[test]
    fn test_flip_delta_01() {
        let problem = QuadraticProblem::new(
            vec![1.0, -2.0, 0.5],
            &[(0, 1, 3.0), (1, 2, -1.0)],
        ).unwrap();

        // Flipping each bit changes the energy by exactly the
        // reported delta.
        for ones in [vec![], vec![0], vec![1, 2], vec![0, 1, 2]] {
            let bits = bits_of(3, &ones[..]);
            let before = problem.energy(&bits);
            for k in 0..3 {
                let delta = problem.flip_delta(&bits, k);
                let mut flipped = bits.clone();
                flipped.toggle(k);
                let after = problem.energy(&flipped);
                assert!(
                    (before + delta - after).abs() < TEST_TOLERANCE,
                    "expected {after}, got {got}",
                    got = before + delta,
                );
            }
        }
    }

    #[test]
    fn test_rescaled_01() {
        let problem = QuadraticProblem::new(
            vec![4.0, -8.0],
            &[(0, 1, 2.0)],
        ).unwrap();

        let rescaled = problem.rescaled();
        let expect = QuadraticProblem::new(
            vec![0.5, -1.0],
            &[(0, 1, 0.25)],
        ).unwrap();
        assert_eq!(expect, rescaled);
    }

    #[test]
    fn test_new_rejects_bad_coupling_01() {
        let result = QuadraticProblem::new(
            vec![1.0, 2.0],
            &[(1, 1, 3.0)],
        );
        assert!(result.is_err(), "expected an error, got {result:?}");
    }

    #[test]
    fn test_new_rejects_bad_coupling_02() {
        let result = QuadraticProblem::new(
            vec![1.0, 2.0],
            &[(0, 2, 3.0)],
        );
        assert!(result.is_err(), "expected an error, got {result:?}");
    }
}
