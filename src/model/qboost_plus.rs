//! Re-applies subset selection over already fitted base models.
use crate::constants::DEFAULT_LAMBDA;
use crate::error::Result;
use crate::sample::Sample;
use crate::sampler::{Sampler, SamplerConfig};
use super::core::{fitted, Model};
use super::qubo;

/// A meta ensemble over fitted base models.
///
/// The same quadratic selection objective used by
/// [`QBoost`](super::QBoost) is applied to the base models'
/// training-set predictions, and the selected bases vote by majority.
/// Every base handed in must already be fitted,
/// since their predictions are collected during [`Model::fit`].
pub struct QBoostPlus<'a> {
    bases: Vec<&'a dyn Model>,
    sampler: &'a dyn Sampler,
    config: SamplerConfig,
    lambda: f64,
    selection: Option<Vec<f64>>,
}

impl<'a> QBoostPlus<'a> {
    /// Construct a meta ensemble over `bases`.
    pub fn new(bases: Vec<&'a dyn Model>, sampler: &'a dyn Sampler)
        -> Self
    {
        Self {
            bases,
            sampler,
            config: SamplerConfig::default(),
            lambda: DEFAULT_LAMBDA,
            selection: None,
        }
    }


    /// Set the sampler configuration passed to every solve call.
    pub fn config(mut self, config: SamplerConfig) -> Self {
        self.config = config;
        self
    }


    /// Set the cardinality penalty of the selection objective.
    /// Default value is `1.0.`
    pub fn lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    /// The indices of the selected base models.
    fn selected(&self) -> Vec<usize> {
        fitted(&self.selection, self.name())
            .iter()
            .enumerate()
            .filter_map(|(i, &w)| (w > 0f64).then_some(i))
            .collect::<Vec<_>>()
    }
}

impl Model for QBoostPlus<'_> {
    fn name(&self) -> &str {
        "QBoostPlus"
    }

    fn info(&self) -> Option<Vec<(&str, String)>> {
        let bases = self.bases.iter()
            .map(|base| base.name())
            .collect::<Vec<_>>()
            .join(", ");
        Some(vec![
            ("Sampler", self.sampler.name().to_string()),
            ("Lambda", format!("{}", self.lambda)),
            ("Bases", bases),
        ])
    }

    fn fit(&mut self, train: &Sample) -> Result<()> {
        train.is_valid_binary_instance();

        let predictions = self.bases.iter()
            .map(|base| base.predict_all(train))
            .collect::<Vec<_>>();

        let problem = qubo::selection_problem(
            &predictions, train.target(), self.lambda,
        )?;
        let selected = qubo::select(
            self.name(), self.sampler, &self.config, &problem,
        )?;

        let mut selection = vec![0f64; self.bases.len()];
        for &i in &selected {
            selection[i] = 1f64;
        }
        self.selection = Some(selection);
        Ok(())
    }

    fn predict_all(&self, sample: &Sample) -> Vec<i64> {
        let votes = self.selected()
            .into_iter()
            .map(|i| self.bases[i].predict_all(sample))
            .collect::<Vec<_>>();

        let n_sample = sample.shape().0;
        (0..n_sample)
            .map(|row| {
                let tally = votes.iter()
                    .map(|vote| vote[row])
                    .sum::<i64>();
                if tally >= 0 { 1 } else { -1 }
            })
            .collect::<Vec<_>>()
    }

    /// The inclusion bit of each base model, in construction order.
    fn weights(&self) -> Option<&[f64]> {
        self.selection.as_deref()
    }
}
