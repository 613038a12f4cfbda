//! Metric accumulation and rendering.
use std::fmt;

use crate::constants::{
    TABLE_ACCURACY_WIDTH,
    TABLE_NAME_WIDTH,
    TABLE_RULE_WIDTH,
};
use crate::error::{Error, Result};

/// The fraction of predictions that agree with the labels.
/// The order of the pairs does not matter.
pub fn accuracy(predictions: &[i64], target: &[f64]) -> Result<f64> {
    if predictions.len() != target.len() {
        return Err(Error::InvalidShape(format!(
            "{found} predictions for {expect} labels",
            found = predictions.len(),
            expect = target.len(),
        )));
    }
    if predictions.is_empty() {
        return Err(Error::EmptySplit("scored"));
    }

    let agreements = predictions.iter()
        .zip(target)
        .filter(|&(&prediction, &label)| prediction == label as i64)
        .count();
    Ok(agreements as f64 / predictions.len() as f64)
}

/// What happened to one model during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The model fitted and scored on both splits.
    Scored {
        /// Accuracy on the training set.
        train: f64,
        /// Accuracy on the test set.
        test: f64,
        /// The model's diagnostic weights, kept in verbose runs.
        weights: Option<Vec<f64>>,
    },
    /// The model's `fit` failed; the reason lands in the report.
    Failed {
        /// Display form of the error.
        reason: String,
    },
}

/// One model's line in the final comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsRow {
    /// The model name, as reported by [`Model::name`](crate::Model::name).
    pub name: String,
    /// Scores or the failure reason.
    pub outcome: Outcome,
}

/// An ordered accumulator of per-model outcomes,
/// rendered in one step by its `Display` implementation.
/// Nothing is printed while the experiment runs.
#[derive(Debug, Clone)]
pub struct Report {
    train_size: usize,
    test_size: usize,
    ensemble_size: usize,
    tree_depth: usize,
    verbose: bool,
    rows: Vec<MetricsRow>,
}

impl Report {
    /// An empty accumulator carrying the run parameters.
    pub fn new(
        train_size: usize,
        test_size: usize,
        ensemble_size: usize,
        tree_depth: usize,
        verbose: bool,
    ) -> Self
    {
        Self {
            train_size,
            test_size,
            ensemble_size,
            tree_depth,
            verbose,
            rows: Vec::new(),
        }
    }


    /// Append one model's row. Rows render in insertion order.
    pub fn push(&mut self, row: MetricsRow) {
        self.rows.push(row);
    }


    /// The accumulated rows, in insertion order.
    pub fn rows(&self) -> &[MetricsRow] {
        &self.rows[..]
    }


    /// How many models scored. The binary exits non-zero
    /// when this is `0`.
    pub fn n_scored(&self) -> usize {
        self.rows.iter()
            .filter(|row| matches!(row.outcome, Outcome::Scored { .. }))
            .count()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Size of training set: {n}", n = self.train_size)?;
        writeln!(f, "Size of test set:     {n}", n = self.test_size)?;
        writeln!(
            f,
            "Number of weak classifiers: {n}",
            n = self.ensemble_size,
        )?;
        writeln!(f, "Tree depth: {depth}", depth = self.tree_depth)?;

        for row in &self.rows {
            writeln!(f)?;
            writeln!(f, "{name}:", name = row.name)?;
            match &row.outcome {
                Outcome::Scored { train, test, weights } => {
                    if self.verbose {
                        if let Some(weights) = weights {
                            writeln!(f, "weights: {weights:?}")?;
                        }
                    }
                    writeln!(f, "Accuracy on training set: {train:5.2}")?;
                    writeln!(f, "Accuracy on test set:     {test:5.2}")?;
                },
                Outcome::Failed { reason } => {
                    writeln!(f, "warning: {reason}")?;
                },
            }
        }

        writeln!(f)?;
        writeln!(f, "{}", "=".repeat(TABLE_RULE_WIDTH))?;
        writeln!(
            f,
            "{:<name$}{:<acc$}{:<acc$}",
            "Method", "Train", "Test",
            name = TABLE_NAME_WIDTH,
            acc = TABLE_ACCURACY_WIDTH,
        )?;
        writeln!(f, "{}", "-".repeat(TABLE_RULE_WIDTH))?;
        for row in &self.rows {
            match &row.outcome {
                Outcome::Scored { train, test, .. } => {
                    writeln!(
                        f,
                        "{:<name$}{:<acc$.2}{:<acc$.2}",
                        row.name, train, test,
                        name = TABLE_NAME_WIDTH,
                        acc = TABLE_ACCURACY_WIDTH,
                    )?;
                },
                Outcome::Failed { .. } => {
                    writeln!(
                        f,
                        "{:<name$}{:<acc$}{:<acc$}",
                        row.name, "-", "-",
                        name = TABLE_NAME_WIDTH,
                        acc = TABLE_ACCURACY_WIDTH,
                    )?;
                },
            }
        }
        write!(f, "{}", "=".repeat(TABLE_RULE_WIDTH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_accuracy_01() {
        let predictions = vec![1, -1, 1, -1];
        let target = vec![1.0, -1.0, 1.0, -1.0];
        let result = accuracy(&predictions, &target).unwrap();
        assert!(
            (result - 1.0).abs() < TEST_TOLERANCE,
            "expected 1.0, got {result}",
        );
    }

    #[test]
    fn test_accuracy_02() {
        let predictions = vec![1, 1, 1, -1];
        let target = vec![1.0, -1.0, -1.0, -1.0];
        let result = accuracy(&predictions, &target).unwrap();
        assert!(
            (result - 0.5).abs() < TEST_TOLERANCE,
            "expected 0.5, got {result}",
        );
    }

    #[test]
    fn test_accuracy_permutation_invariant_01() {
        let predictions = vec![1, 1, -1, -1, 1];
        let target = vec![1.0, -1.0, -1.0, 1.0, 1.0];
        let forward = accuracy(&predictions, &target).unwrap();

        let rev_predictions = predictions.iter()
            .rev()
            .copied()
            .collect::<Vec<_>>();
        let rev_target = target.iter()
            .rev()
            .copied()
            .collect::<Vec<_>>();
        let backward = accuracy(&rev_predictions, &rev_target).unwrap();

        assert!(
            (forward - backward).abs() < TEST_TOLERANCE,
            "expected {forward}, got {backward}.",
        );
    }

    #[test]
    fn test_accuracy_empty_01() {
        let result = accuracy(&[], &[]);
        assert!(
            matches!(result, Err(Error::EmptySplit(_))),
            "expected `Error::EmptySplit`, got {result:?}",
        );
    }

    #[test]
    fn test_accuracy_length_mismatch_01() {
        let result = accuracy(&[1, -1], &[1.0]);
        assert!(
            matches!(result, Err(Error::InvalidShape(_))),
            "expected `Error::InvalidShape`, got {result:?}",
        );
    }

    fn test_report() -> Report {
        let mut report = Report::new(20, 10, 35, 3, false);
        report.push(MetricsRow {
            name: "AdaBoost".to_string(),
            outcome: Outcome::Scored {
                train: 1.0,
                test: 0.9,
                weights: None,
            },
        });
        report.push(MetricsRow {
            name: "QBoost".to_string(),
            outcome: Outcome::Failed {
                reason: "sampler unavailable: offline".to_string(),
            },
        });
        report
    }

    #[test]
    fn test_n_scored_01() {
        let report = test_report();
        assert_eq!(report.n_scored(), 1);
        assert_eq!(report.rows().len(), 2);
    }

    #[test]
    fn test_render_preamble_01() {
        let rendered = test_report().to_string();
        assert!(rendered.contains("Size of training set: 20"));
        assert!(rendered.contains("Size of test set:     10"));
        assert!(rendered.contains("Number of weak classifiers: 35"));
        assert!(rendered.contains("Tree depth: 3"));
    }

    #[test]
    fn test_render_sections_01() {
        let rendered = test_report().to_string();
        assert!(rendered.contains("AdaBoost:"));
        assert!(rendered.contains("Accuracy on training set:  1.00"));
        assert!(rendered.contains("Accuracy on test set:      0.90"));
        assert!(rendered.contains("QBoost:"));
        assert!(rendered.contains("warning: sampler unavailable: offline"));
    }

    #[test]
    fn test_render_table_01() {
        let rendered = test_report().to_string();
        let rule = "=".repeat(28);
        assert_eq!(rendered.matches(&rule).count(), 2);
        assert!(rendered.contains(&"-".repeat(28)));
        assert!(rendered.contains("Method        Train  Test"));
        assert!(rendered.contains("AdaBoost      1.00   0.90"));
        assert!(rendered.contains("QBoost        -      -"));
    }

    #[test]
    fn test_render_verbose_weights_01() {
        let mut report = Report::new(4, 2, 2, 1, true);
        report.push(MetricsRow {
            name: "AdaBoost".to_string(),
            outcome: Outcome::Scored {
                train: 1.0,
                test: 1.0,
                weights: Some(vec![0.5, 0.5]),
            },
        });

        let rendered = report.to_string();
        assert!(rendered.contains("weights: [0.5, 0.5]"));
    }
}
