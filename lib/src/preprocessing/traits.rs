//! Core traits for preprocessing transformers.
//!
//! This module defines the two central traits:
//! - [`Transformer`]: Used during fitting; has hyperparameters and can learn from data.
//! - [`FittedTransformer`]: After fitting; applies the learned parameters to any data.
//!
//! Fitted state is never shared between analysis runs: every run fits its own
//! transformers and drops them when the report is assembled.

use crate::error::PipelineError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Trait for unfitted transformers with hyperparameters.
///
/// A transformer learns parameters from training data and can then transform
/// new data using those learned parameters. This trait represents the
/// configurable, unfitted state.
///
/// # Example
/// ```ignore
/// use autoprice::preprocessing::{Transformer, FittedTransformer, StandardScaler};
///
/// let fitted = StandardScaler::new().fit(&x_train)?;
/// let x_train_scaled = fitted.transform(&x_train)?;
/// let x_eval_scaled = fitted.transform(&x_eval)?;
/// ```
pub trait Transformer: Clone {
    /// Input data type for transformation.
    type Input: ?Sized;
    /// Output data type after transformation.
    type Output;
    /// Plain-data representation of learned parameters.
    type Params: Serialize + DeserializeOwned;
    /// The fitted transformer type.
    type Fitted: FittedTransformer<Params = Self::Params, Input = Self::Input, Output = Self::Output>;

    /// Fit the transformer to the training data.
    ///
    /// # Errors
    /// Returns [`PipelineError`] if the data is empty or a statistic is undefined.
    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PipelineError>;

    /// Fit the transformer and transform the same data in one step.
    fn fit_transform(&self, data: &Self::Input) -> Result<Self::Output, PipelineError> {
        let fitted = self.fit(data)?;
        fitted.transform(data)
    }
}

/// Trait for fitted transformers.
///
/// # Guarantees
/// - `extract_params()` + `from_params()` is a round-trip.
pub trait FittedTransformer: Clone {
    /// Input data type for transformation.
    type Input: ?Sized;
    /// Output data type after transformation.
    type Output;
    /// Plain-data representation of learned parameters.
    type Params: Serialize + DeserializeOwned;

    /// Transform data using learned parameters.
    ///
    /// # Errors
    /// Returns [`PipelineError`] if the input shape doesn't match the fitted
    /// shape or contains values the transformer cannot handle.
    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PipelineError>;

    /// Extract learned parameters as plain data.
    fn extract_params(&self) -> Self::Params;

    /// Reconstruct a fitted transformer from parameters.
    fn from_params(params: Self::Params) -> Result<Self, PipelineError>
    where
        Self: Sized;

    /// Returns the number of features seen during fit.
    fn n_features_in(&self) -> usize;
}
