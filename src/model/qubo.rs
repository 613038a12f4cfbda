//! Encodes ensemble-subset selection as a binary quadratic problem.
use crate::error::{Error, Result};
use crate::sampler::{QuadraticProblem, Sampler, SamplerConfig};

/// Encode the choice of an ensemble subset as a QUBO.
///
/// With `T` candidate classifiers and `M` training instances,
/// the objective for inclusion bits `w` is the squared ensemble error
/// plus a cardinality penalty:
///
/// ```txt
/// E(w) = sum_s ( (1/T) sum_i w[i] h[i](x[s]) - y[s] )^2
///      + lambda * sum_i w[i]
/// ```
///
/// Predictions and labels both live in `{+1, -1}`,
/// so expanding and dropping the constant term gives
///
/// ```txt
/// linear[i]  = M/T^2 - (2/T) sum_s h[i](x[s]) y[s] + lambda
/// quad[i][j] = (2/T^2) sum_s h[i](x[s]) h[j](x[s])      (i < j)
/// ```
pub(crate) fn selection_problem(
    predictions: &[Vec<i64>],
    target: &[f64],
    lambda: f64,
) -> Result<QuadraticProblem>
{
    let n_classifiers = predictions.len();
    if n_classifiers == 0 {
        return Err(Error::InvalidShape(
            "cannot select a subset of zero classifiers".into()
        ));
    }
    let n_sample = target.len();
    for (i, prediction) in predictions.iter().enumerate() {
        if prediction.len() != n_sample {
            return Err(Error::InvalidShape(format!(
                "classifier {i} yields {found} predictions, \
                 expected {n_sample}",
                found = prediction.len(),
            )));
        }
    }

    let t = n_classifiers as f64;
    let m = n_sample as f64;

    let linear = predictions.iter()
        .map(|prediction| {
            let correlation = prediction.iter()
                .zip(target)
                .map(|(&h, &y)| h as f64 * y)
                .sum::<f64>();
            m / t.powi(2) - 2f64 * correlation / t + lambda
        })
        .collect::<Vec<_>>();

    let mut couplings = Vec::new();
    for i in 0..n_classifiers {
        for j in i+1..n_classifiers {
            let agreement = predictions[i].iter()
                .zip(&predictions[j])
                .map(|(&hi, &hj)| (hi * hj) as f64)
                .sum::<f64>();
            couplings.push((i, j, 2f64 * agreement / t.powi(2)));
        }
    }

    QuadraticProblem::new(linear, &couplings)
}

/// Solve `problem` and return the selected variable indices.
///
/// An empty assignment falls back to the single variable with the
/// lowest linear coefficient, so the caller never receives an empty
/// subset.
pub(crate) fn select(
    name: &str,
    sampler: &dyn Sampler,
    config: &SamplerConfig,
    problem: &QuadraticProblem,
) -> Result<Vec<usize>>
{
    let assignment = sampler.solve(problem, config)?;
    log::debug!(
        "{name}: sampler `{sampler}` reached energy {energy:.4}",
        sampler = sampler.name(),
        energy = assignment.energy,
    );

    let selected = assignment.bits.ones().collect::<Vec<_>>();
    if selected.is_empty() {
        log::warn!(
            "{name}: the sampler selected no classifiers, \
             keeping the single best one"
        );
        return Ok(vec![best_single(problem)]);
    }
    Ok(selected)
}

/// The index of the lowest linear coefficient.
fn best_single(problem: &QuadraticProblem) -> usize {
    problem.linear()
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
        .map(|(i, _)| i)
        .expect("a selection problem has at least one variable")
}
