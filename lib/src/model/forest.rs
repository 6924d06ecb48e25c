//! Bagged ensemble of regression trees (random forest).
//!
//! Each tree is fitted on a bootstrap sample (n draws with replacement) of the
//! training rows, considering every feature at every split. The forest
//! prediction is the mean of the tree predictions. All randomness comes from
//! a single `ChaCha8Rng` seeded from [`ForestConfig::seed`], so fitting the
//! same data twice yields identical forests.
//!
//! - [`RandomForestRegressor<Unfitted>`]: configuration and `fit`.
//! - [`RandomForestRegressor<Fitted>`]: prediction and feature importances.
//!
//! # Example
//! ```ignore
//! use autoprice::model::{RandomForestRegressor, InferenceModel};
//!
//! let forest = RandomForestRegressor::new()
//!     .with_n_estimators(100)
//!     .with_seed(42)
//!     .fit(&x_train, &y_train)?;
//! let predictions = forest.predict_batch(&x_eval)?;
//! ```

use crate::config::DEFAULT_SEED;
use crate::error::PipelineError;
use crate::model::tree::{normalize, RegressionTree, TreeConfig};
use crate::model::{FeatureImportances, Fitted, InferenceModel, Unfitted};
use ndarray::{Array1, Array2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use tracing::debug;

/// Hyperparameters of the forest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    pub n_estimators: usize,
    pub tree: TreeConfig,
    /// Draw a bootstrap sample per tree; otherwise every tree sees all rows.
    pub bootstrap: bool,
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            tree: TreeConfig::default(),
            bootstrap: true,
            seed: DEFAULT_SEED,
        }
    }
}

impl ForestConfig {
    fn validate(&self) -> Result<(), PipelineError> {
        if self.n_estimators == 0 {
            return Err(PipelineError::InvalidParameter(
                "n_estimators must be at least 1".to_string(),
            ));
        }
        if self.tree.min_samples_split < 2 {
            return Err(PipelineError::InvalidParameter(format!(
                "min_samples_split must be at least 2, got {}",
                self.tree.min_samples_split
            )));
        }
        Ok(())
    }
}

/// Random forest regressor with its training state in the type.
#[derive(Clone, Debug)]
pub struct RandomForestRegressor<S> {
    config: ForestConfig,
    trees: Vec<RegressionTree>,
    n_features: usize,
    _state: PhantomData<S>,
}

impl Default for RandomForestRegressor<Unfitted> {
    fn default() -> Self {
        Self::from_config(ForestConfig::default())
    }
}

impl RandomForestRegressor<Unfitted> {
    /// Unfitted forest with default hyperparameters (100 trees, seed 42).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: ForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
            n_features: 0,
            _state: PhantomData,
        }
    }

    pub fn with_n_estimators(mut self, n_estimators: usize) -> Self {
        self.config.n_estimators = n_estimators;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.config.tree.max_depth = max_depth;
        self
    }

    pub fn with_min_samples_split(mut self, min_samples_split: usize) -> Self {
        self.config.tree.min_samples_split = min_samples_split;
        self
    }

    pub fn with_bootstrap(mut self, bootstrap: bool) -> Self {
        self.config.bootstrap = bootstrap;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    /// Fit the forest, consuming the unfitted model.
    ///
    /// # Errors
    /// - [`PipelineError::InvalidParameter`] for an invalid configuration.
    /// - [`PipelineError::EmptyData`] when `x` has no rows.
    /// - [`PipelineError::Training`] when `x` and `y` disagree on the row count.
    pub fn fit(
        self,
        x: &Array2<f64>,
        y: &Array1<f64>,
    ) -> Result<RandomForestRegressor<Fitted>, PipelineError> {
        self.config.validate()?;

        let n = x.nrows();
        if n == 0 {
            return Err(PipelineError::EmptyData(
                "Cannot fit RandomForestRegressor on empty data".to_string(),
            ));
        }
        if y.len() != n {
            return Err(PipelineError::training(format!(
                "feature matrix has {} rows but target has {} values",
                n,
                y.len()
            )));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let all_rows: Vec<usize> = (0..n).collect();

        let trees = (0..self.config.n_estimators)
            .map(|_| {
                let samples: Vec<usize> = if self.config.bootstrap {
                    (0..n).map(|_| rng.gen_range(0..n)).collect()
                } else {
                    all_rows.clone()
                };
                RegressionTree::fit(x, y, &samples, &self.config.tree)
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            trees = trees.len(),
            rows = n,
            features = x.ncols(),
            max_depth = trees.iter().map(RegressionTree::depth).max().unwrap_or(0),
            "fitted random forest"
        );

        Ok(RandomForestRegressor {
            config: self.config,
            trees,
            n_features: x.ncols(),
            _state: PhantomData,
        })
    }
}

impl RandomForestRegressor<Fitted> {
    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    fn check_features(&self, got: usize) -> Result<(), PipelineError> {
        if got != self.n_features {
            return Err(PipelineError::FeatureMismatch {
                expected_features: self.n_features,
                got_features: got,
            });
        }
        Ok(())
    }
}

impl InferenceModel for RandomForestRegressor<Fitted> {
    type InputSingle = Array1<f64>;
    type OutputSingle = Result<f64, PipelineError>;
    type InputBatch = Array2<f64>;
    type OutputBatch = Result<Array1<f64>, PipelineError>;

    fn predict(&self, input: &Array1<f64>) -> Result<f64, PipelineError> {
        self.check_features(input.len())?;
        let total: f64 = self
            .trees
            .iter()
            .map(|tree| tree.predict_row(input.view()))
            .sum();
        Ok(total / self.trees.len() as f64)
    }

    fn predict_batch(&self, input: &Array2<f64>) -> Result<Array1<f64>, PipelineError> {
        self.check_features(input.ncols())?;
        let n_trees = self.trees.len() as f64;
        Ok(input
            .rows()
            .into_iter()
            .map(|row| {
                self.trees
                    .iter()
                    .map(|tree| tree.predict_row(row))
                    .sum::<f64>()
                    / n_trees
            })
            .collect())
    }
}

impl FeatureImportances for RandomForestRegressor<Fitted> {
    /// Mean of the per-tree normalized importances, renormalized to sum to 1.
    fn feature_importances(&self) -> Option<Vec<f64>> {
        let mut summed = vec![0.0; self.n_features];
        for tree in &self.trees {
            for (acc, value) in summed.iter_mut().zip(tree.feature_importances()) {
                *acc += value;
            }
        }
        let n_trees = self.trees.len() as f64;
        let averaged: Vec<f64> = summed.iter().map(|s| s / n_trees).collect();
        Some(normalize(&averaged))
    }
}
