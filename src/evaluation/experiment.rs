//! Drives the four models over one preprocessed split.
use rand::prelude::*;

use crate::constants::{
    DEFAULT_ENSEMBLE_SIZE,
    DEFAULT_LAMBDA,
    DEFAULT_TREE_DEPTH,
    TRAIN_FRACTION,
};
use crate::dataset::partition;
use crate::error::Result;
use crate::model::{
    AdaBoost,
    Model,
    QBoost,
    QBoostPlus,
    WeakClassifiers,
};
use crate::sample::Sample;
use crate::sampler::{Sampler, SamplerConfig};
use crate::scaler::Scaler;
use super::report::{accuracy, MetricsRow, Outcome, Report};

/// One full comparison run over a dataset.
///
/// The experiment partitions the data, preprocesses both sides,
/// then fits and scores the four models in a fixed order.
/// A model whose `fit` fails is logged and reported as a failed row;
/// the remaining models still score.
///
/// ```no_run
/// use rand::prelude::*;
/// use spinboost::prelude::*;
///
/// # fn main() -> spinboost::Result<()> {
/// let mut rng = StdRng::seed_from_u64(0);
/// let sample = DatasetId::Synthetic.load(&mut rng)?;
///
/// let sampler = SteepestDescent::new().seed(0);
/// let report = Experiment::new()
///     .seed(0)
///     .run(&sample, &sampler)?;
/// println!("{report}");
/// # Ok(())
/// # }
/// ```
pub struct Experiment {
    ensemble_size: usize,
    tree_depth: usize,
    lambda: f64,
    sampler_config: SamplerConfig,
    seed: Option<u64>,
    verbose: bool,
}

impl Experiment {
    /// An experiment with the default parameters.
    pub fn new() -> Self {
        Self {
            ensemble_size: DEFAULT_ENSEMBLE_SIZE,
            tree_depth: DEFAULT_TREE_DEPTH,
            lambda: DEFAULT_LAMBDA,
            sampler_config: SamplerConfig::default(),
            seed: None,
            verbose: false,
        }
    }


    /// Set the pool size shared by every ensemble.
    /// Default value is `35.`
    pub fn ensemble_size(mut self, ensemble_size: usize) -> Self {
        self.ensemble_size = ensemble_size;
        self
    }


    /// Set the depth bound shared by every tree.
    /// Default value is `3.`
    pub fn tree_depth(mut self, tree_depth: usize) -> Self {
        self.tree_depth = tree_depth;
        self
    }


    /// Set the cardinality penalty of the selection objective.
    /// Default value is `1.0.`
    pub fn lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }


    /// Set the configuration handed to the sampler backend.
    pub fn sampler_config(mut self, sampler_config: SamplerConfig) -> Self {
        self.sampler_config = sampler_config;
        self
    }


    /// Fix the seed of the split, the bootstrap draws,
    /// and everything else the run randomizes.
    /// Unseeded experiments draw from entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }


    /// Keep each model's diagnostic weights in the report.
    /// Default value is `false.`
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }


    /// Partition, preprocess, then fit and score the four models.
    ///
    /// Fails only on data errors; per-model failures are folded
    /// into the report.
    pub fn run(&self, sample: &Sample, sampler: &dyn Sampler)
        -> Result<Report>
    {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let (train, test) = partition(sample, TRAIN_FRACTION, &mut rng)?;

        // Each split gets its own fitted scaler, as the original
        // experiment did. Fitting on the test split leaks its
        // statistics into the test inputs.
        log::warn!(
            "the test split is preprocessed with its own scaler; \
             fit the training scaler once to avoid the leak"
        );
        let (_, train) = Scaler::fit_transform(&train)?;
        let (_, test) = Scaler::fit_transform(&test)?;

        let mut report = Report::new(
            train.shape().0,
            test.shape().0,
            self.ensemble_size,
            self.tree_depth,
            self.verbose,
        );

        let mut adaboost = AdaBoost::new()
            .n_rounds(self.ensemble_size)
            .max_depth(self.tree_depth);
        let mut weak_classifiers = WeakClassifiers::new()
            .pool_size(self.ensemble_size)
            .max_depth(self.tree_depth)
            .seed(rng.gen());
        let mut qboost = QBoost::new(sampler)
            .config(self.sampler_config.clone())
            .lambda(self.lambda)
            .pool_size(self.ensemble_size)
            .max_depth(self.tree_depth)
            .seed(rng.gen());

        let row_1 = evaluate(&mut adaboost, &train, &test, self.verbose);
        let row_2 = evaluate(&mut weak_classifiers, &train, &test, self.verbose);
        let row_3 = evaluate(&mut qboost, &train, &test, self.verbose);

        // The meta ensemble combines whichever bases fitted.
        let mut bases: Vec<&dyn Model> = Vec::new();
        if matches!(row_1.outcome, Outcome::Scored { .. }) {
            bases.push(&adaboost);
        }
        if matches!(row_2.outcome, Outcome::Scored { .. }) {
            bases.push(&weak_classifiers);
        }
        if matches!(row_3.outcome, Outcome::Scored { .. }) {
            bases.push(&qboost);
        }
        let mut qboost_plus = QBoostPlus::new(bases, sampler)
            .config(self.sampler_config.clone())
            .lambda(self.lambda);
        let row_4 = evaluate(&mut qboost_plus, &train, &test, self.verbose);

        report.push(row_1);
        report.push(row_2);
        report.push(row_3);
        report.push(row_4);
        Ok(report)
    }
}

impl Default for Experiment {
    fn default() -> Self {
        Self::new()
    }
}

/// Fit and score one model, folding any error into the row.
fn evaluate(
    model: &mut dyn Model,
    train: &Sample,
    test: &Sample,
    verbose: bool,
) -> MetricsRow
{
    let name = model.name().to_string();
    log::info!("fitting {name}");

    let outcome = score(model, train, test, verbose)
        .unwrap_or_else(|e| {
            log::warn!("{name} failed: {e}");
            Outcome::Failed { reason: e.to_string() }
        });
    MetricsRow { name, outcome, }
}

fn score(
    model: &mut dyn Model,
    train: &Sample,
    test: &Sample,
    verbose: bool,
) -> Result<Outcome>
{
    model.fit(train)?;

    let train_accuracy = accuracy(&model.predict_all(train), train.target())?;
    let test_accuracy = accuracy(&model.predict_all(test), test.target())?;
    let weights = if verbose {
        model.weights().map(|weights| weights.to_vec())
    } else {
        None
    };

    Ok(Outcome::Scored {
        train: train_accuracy,
        test: test_accuracy,
        weights,
    })
}
