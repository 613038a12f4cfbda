//! A plain ensemble of independently trained shallow trees.
use crate::constants::{DEFAULT_ENSEMBLE_SIZE, DEFAULT_TREE_DEPTH};
use crate::error::Result;
use crate::hypothesis::{Classifier, WeightedMajority};
use crate::sample::Sample;
use crate::weak_learner::DecisionTreeClassifier;
use super::core::{fitted, Model};
use super::pool::bootstrap_pool;

/// A pool of bootstrap-weighted depth-bounded trees
/// combined by a uniform vote.
pub struct WeakClassifiers {
    pool_size: usize,
    max_depth: usize,
    seed: u64,
    ensemble: Option<WeightedMajority<DecisionTreeClassifier>>,
}

impl WeakClassifiers {
    /// Construct an ensemble with the default pool and depth budgets.
    pub fn new() -> Self {
        Self {
            pool_size: DEFAULT_ENSEMBLE_SIZE,
            max_depth: DEFAULT_TREE_DEPTH,
            seed: 0,
            ensemble: None,
        }
    }


    /// Set the number of trees in the pool.
    /// Default value is `35.`
    pub fn pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }


    /// Set the depth bound of each tree.
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

impl Default for WeakClassifiers {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for WeakClassifiers {
    fn name(&self) -> &str {
        "Decision Tree"
    }

    fn info(&self) -> Option<Vec<(&str, String)>> {
        Some(vec![
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
        let uniform = vec![1.0; pool.len()];

        self.ensemble = Some(
            WeightedMajority::from_slices(&uniform[..], &pool[..])
        );
        Ok(())
    }

    fn predict_all(&self, sample: &Sample) -> Vec<i64> {
        fitted(&self.ensemble, self.name()).predict_all(sample)
    }

    fn weights(&self) -> Option<&[f64]> {
        self.ensemble.as_ref().map(|f| &f.weights[..])
    }
}
