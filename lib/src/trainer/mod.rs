//! Model training and evaluation.
//!
//! A [`Trainer`] splits the prepared data deterministically, standardizes
//! features with statistics from the training rows only, fits a
//! [`RandomForestRegressor`] and evaluates it on the held-out rows.

pub mod split;

pub use split::TrainEvalSplit;

use crate::config::{PipelineConfig, DEFAULT_SEED};
use crate::error::PipelineError;
use crate::metrics::{Metrics, RegressionMetrics};
use crate::model::{
    FeatureImportances, ForestConfig, Fitted, InferenceModel, RandomForestRegressor, TreeConfig,
};
use crate::preprocessing::{FittedStandardScaler, FittedTransformer, StandardScaler, Transformer};
use ndarray::{Array1, Array2, Axis};
use tracing::debug;

/// Everything produced by one training run.
#[derive(Clone, Debug)]
pub struct TrainedRun {
    pub model: RandomForestRegressor<Fitted>,
    /// Scaler fitted on the training rows.
    pub scaler: FittedStandardScaler,
    pub split: TrainEvalSplit,
    /// Actual prices of the evaluation rows, in `split.eval` order.
    pub eval_actual: Array1<f64>,
    pub eval_predicted: Array1<f64>,
    pub metrics: RegressionMetrics,
}

impl TrainedRun {
    /// Importance scores of the fitted model, aligned with its input columns.
    pub fn feature_importances(&self) -> Option<Vec<f64>> {
        self.model.feature_importances()
    }
}

/// Fits and evaluates a price model.
///
/// Once built via [`TrainerBuilder`], it is immutable and can be reused for
/// any number of runs.
#[derive(Clone, Debug)]
pub struct Trainer {
    pub(crate) test_fraction: f64,
    pub(crate) seed: u64,
    pub(crate) forest: ForestConfig,
}

/// Fluent builder for constructing a [`Trainer`].
///
/// Defaults:
/// - `test_fraction`: 0.2
/// - `seed`: 42 (split shuffle and bootstrap sampling)
/// - `n_estimators`: 100
/// - `max_depth`: unlimited
/// - `min_samples_split`: 2
#[derive(Clone, Debug)]
pub struct TrainerBuilder {
    test_fraction: f64,
    seed: u64,
    n_estimators: usize,
    max_depth: Option<usize>,
    min_samples_split: usize,
}

impl Default for TrainerBuilder {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: DEFAULT_SEED,
            n_estimators: 100,
            max_depth: None,
            min_samples_split: 2,
        }
    }
}

impl TrainerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn test_fraction(mut self, fraction: f64) -> Self {
        self.test_fraction = fraction;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn n_estimators(mut self, n: usize) -> Self {
        self.n_estimators = n;
        self
    }

    pub fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn min_samples_split(mut self, n: usize) -> Self {
        self.min_samples_split = n;
        self
    }

    pub fn build(self) -> Trainer {
        Trainer {
            test_fraction: self.test_fraction,
            seed: self.seed,
            forest: ForestConfig {
                n_estimators: self.n_estimators,
                tree: TreeConfig {
                    max_depth: self.max_depth,
                    min_samples_split: self.min_samples_split,
                },
                bootstrap: true,
                seed: self.seed,
            },
        }
    }
}

impl Default for Trainer {
    fn default() -> Self {
        TrainerBuilder::default().build()
    }
}

impl Trainer {
    /// Convenience constructor that starts the builder pattern.
    pub fn builder() -> TrainerBuilder {
        TrainerBuilder::new()
    }

    /// Trainer matching the model settings of a pipeline configuration.
    pub fn from_config(config: &PipelineConfig) -> Self {
        TrainerBuilder::new()
            .test_fraction(config.test_fraction)
            .seed(config.seed)
            .n_estimators(config.n_estimators)
            .max_depth(config.max_depth)
            .min_samples_split(config.min_samples_split)
            .build()
    }

    /// Train on `features`/`target` and evaluate on the held-out rows.
    ///
    /// # Errors
    /// - [`PipelineError::Training`] if the target has zero variance, the
    ///   split leaves fewer than 2 training rows or no evaluation row, or the
    ///   inputs disagree on the row count.
    /// - [`PipelineError::InvalidParameter`] for invalid hyperparameters.
    pub fn fit(
        &self,
        features: &Array2<f64>,
        target: &Array1<f64>,
    ) -> Result<TrainedRun, PipelineError> {
        if features.nrows() != target.len() {
            return Err(PipelineError::training(format!(
                "feature matrix has {} rows but target has {} values",
                features.nrows(),
                target.len()
            )));
        }

        let zero_variance = match target.first() {
            Some(&first) => target.iter().all(|&v| v == first),
            None => true,
        };
        if zero_variance {
            return Err(PipelineError::training(
                "target has zero variance; metrics are undefined",
            ));
        }

        let split = TrainEvalSplit::new(target.len(), self.test_fraction, self.seed)?;

        let x_train = features.select(Axis(0), &split.train);
        let x_eval = features.select(Axis(0), &split.eval);
        let y_train = target.select(Axis(0), &split.train);
        let eval_actual = target.select(Axis(0), &split.eval);

        let scaler = StandardScaler::new().fit(&x_train)?;
        let x_train = scaler.transform(&x_train)?;
        let x_eval = scaler.transform(&x_eval)?;

        debug!(
            train = split.train_size(),
            eval = split.eval_size(),
            features = features.ncols(),
            "split and standardized features"
        );

        let model =
            RandomForestRegressor::from_config(self.forest.clone()).fit(&x_train, &y_train)?;
        let eval_predicted = model.predict_batch(&x_eval)?;

        let metrics = Metrics::calculate_all(&eval_actual.to_vec(), &eval_predicted.to_vec());

        Ok(TrainedRun {
            model,
            scaler,
            split,
            eval_actual,
            eval_predicted,
            metrics,
        })
    }
}
