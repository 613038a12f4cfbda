//! Subset selection over a tree pool through the sampler boundary.
use crate::constants::{
    DEFAULT_ENSEMBLE_SIZE,
    DEFAULT_LAMBDA,
    DEFAULT_TREE_DEPTH,
};
use crate::error::Result;
use crate::hypothesis::{Classifier, WeightedMajority};
use crate::sample::Sample;
use crate::sampler::{Sampler, SamplerConfig};
use crate::weak_learner::DecisionTreeClassifier;
use super::core::{fitted, Model};
use super::pool::bootstrap_pool;
use super::qubo;

/// A tree pool whose members are switched on or off by minimizing
/// a quadratic objective.
///
/// The pool is built exactly like [`WeakClassifiers`](super::WeakClassifiers),
/// then the inclusion bits are chosen by the injected [`Sampler`]
/// and the selected trees vote with uniform weights.
///
/// ```no_run
/// use spinboost::prelude::*;
///
/// # fn main() -> spinboost::Result<()> {
/// let sample = SampleReader::new()
///     .file("data/wdbc.csv")
///     .has_header(true)
///     .target_feature("class")
///     .read()?
///     .binarize_target(|y| y == 1.0);
///
/// let sampler = SteepestDescent::new().seed(0);
/// let mut model = QBoost::new(&sampler)
///     .pool_size(20)
///     .lambda(1.0);
/// model.fit(&sample)?;
/// # Ok(())
/// # }
/// ```
pub struct QBoost<'a> {
    sampler: &'a dyn Sampler,
    config: SamplerConfig,
    lambda: f64,
    pool_size: usize,
    max_depth: usize,
    seed: u64,
    selection: Option<Vec<f64>>,
    ensemble: Option<WeightedMajority<DecisionTreeClassifier>>,
}

impl<'a> QBoost<'a> {
    /// Construct a selector around the given sampler backend.
    pub fn new(sampler: &'a dyn Sampler) -> Self {
        Self {
            sampler,
            config: SamplerConfig::default(),
            lambda: DEFAULT_LAMBDA,
            pool_size: DEFAULT_ENSEMBLE_SIZE,
            max_depth: DEFAULT_TREE_DEPTH,
            seed: 0,
            selection: None,
            ensemble: None,
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


    /// Set the number of candidate trees.
    /// Default value is `35.`
    pub fn pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }


    /// Set the depth bound of each candidate tree.
    /// Default value is `3.`
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }


    /// Set the seed of the bootstrap draws.
    /// Default value is `0.`
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Model for QBoost<'_> {
    fn name(&self) -> &str {
        "QBoost"
    }

    fn info(&self) -> Option<Vec<(&str, String)>> {
        Some(vec![
            ("Sampler", self.sampler.name().to_string()),
            ("Lambda", format!("{}", self.lambda)),
            ("Pool size", format!("{}", self.pool_size)),
            ("Max depth", format!("{}", self.max_depth)),
            ("Seed", format!("{}", self.seed)),
        ])
    }

    fn fit(&mut self, train: &Sample) -> Result<()> {
        train.is_valid_binary_instance();

        let pool = bootstrap_pool(
            train, self.pool_size, self.max_depth, self.seed,
        );
        let predictions = pool.iter()
            .map(|tree| tree.predict_all(train))
            .collect::<Vec<_>>();

        let problem = qubo::selection_problem(
            &predictions, train.target(), self.lambda,
        )?;
        let selected = qubo::select(
            self.name(), self.sampler, &self.config, &problem,
        )?;

        let mut selection = vec![0f64; pool.len()];
        for &i in &selected {
            selection[i] = 1f64;
        }
        let chosen = selected.into_iter()
            .map(|i| pool[i].clone())
            .collect::<Vec<_>>();
        let uniform = vec![1f64; chosen.len()];

        self.selection = Some(selection);
        self.ensemble = Some(
            WeightedMajority::from_slices(&uniform[..], &chosen[..])
        );
        Ok(())
    }

    fn predict_all(&self, sample: &Sample) -> Vec<i64> {
        fitted(&self.ensemble, self.name()).predict_all(sample)
    }

    /// The inclusion bit of each pool member, in pool order.
    fn weights(&self) -> Option<&[f64]> {
        self.selection.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;
    use crate::error::Error;
    use crate::sampler::{
        Assignment,
        Exhaustive,
        QuadraticProblem,
        SteepestDescent,
    };

    fn separable_sample() -> Sample {
        let bytes: &[u8] = b"\
            feat,class\n\
            0.1,-1.0\n\
            0.2,-1.0\n\
            0.3,-1.0\n\
            0.4,-1.0\n\
            0.6,1.0\n\
            0.7,1.0\n\
            0.8,1.0\n\
            0.9,1.0";
        let reader = BufReader::new(bytes);
        Sample::from_reader(reader, true)
            .unwrap()
            .set_target("class")
    }

    #[test]
    fn test_fit_with_exhaustive_01() {
        let sample = separable_sample();
        let sampler = Exhaustive;
        let mut model = QBoost::new(&sampler)
            .pool_size(5)
            .max_depth(2)
            .seed(3)
            .config(SamplerConfig::default());
        model.fit(&sample).unwrap();

        let predictions = model.predict_all(&sample);
        let expect = sample.target()
            .iter()
            .map(|&y| y as i64)
            .collect::<Vec<_>>();
        assert_eq!(predictions, expect);

        let selection = model.weights().unwrap();
        assert_eq!(selection.len(), 5);
        assert!(selection.iter().any(|&w| w == 1.0));
        assert!(selection.iter().all(|&w| w == 0.0 || w == 1.0));
    }

    #[test]
    fn test_fit_with_steepest_descent_01() {
        let sample = separable_sample();
        let sampler = SteepestDescent::new().seed(11);
        let mut model = QBoost::new(&sampler)
            .pool_size(6)
            .config(SamplerConfig::new().num_reads(50))
            .seed(5);
        model.fit(&sample).unwrap();

        let predictions = model.predict_all(&sample);
        for p in predictions {
            assert!(p == 1 || p == -1, "expected a spin label, got {p}");
        }
    }

    struct FailingSampler;

    impl Sampler for FailingSampler {
        fn name(&self) -> &str {
            "Failing"
        }

        fn solve(
            &self,
            _problem: &QuadraticProblem,
            _config: &SamplerConfig,
        ) -> Result<Assignment>
        {
            Err(Error::SamplerUnavailable("scripted failure".into()))
        }
    }

    #[test]
    fn test_fit_propagates_sampler_failure_01() {
        let sample = separable_sample();
        let sampler = FailingSampler;
        let mut model = QBoost::new(&sampler).pool_size(3);

        let result = model.fit(&sample);
        assert!(
            matches!(result, Err(Error::SamplerUnavailable(_))),
            "expected `Error::SamplerUnavailable`, got {result:?}",
        );
    }

    #[test]
    #[should_panic]
    fn test_predict_before_fit_01() {
        let sample = separable_sample();
        let sampler = Exhaustive;
        let model = QBoost::new(&sampler);
        model.predict_all(&sample);
    }
}
