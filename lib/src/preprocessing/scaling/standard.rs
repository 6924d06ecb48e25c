//! Z-score standardization of the feature matrix.
//!
//! `z = (x - mean) / std`, with per-column statistics learned from the
//! training rows only. `std` is the population standard deviation; a column
//! that is constant over the training rows keeps `std = 1`, so it maps to
//! zero instead of NaN.
//!
//! # Example
//! ```ignore
//! use autoprice::preprocessing::{Transformer, FittedTransformer, StandardScaler};
//!
//! let fitted = StandardScaler::new().fit(&x_train)?;
//! let train_scaled = fitted.transform(&x_train)?;
//! let eval_scaled = fitted.transform(&x_eval)?;
//! ```

use crate::error::PipelineError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

/// Learned column statistics of a [`FittedStandardScaler`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandardScalerParams {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

/// Unfitted z-score scaler.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardScaler;

impl StandardScaler {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for StandardScaler {
    type Input = Array2<f64>;
    type Output = Array2<f64>;
    type Params = StandardScalerParams;
    type Fitted = FittedStandardScaler;

    fn fit(&self, data: &Array2<f64>) -> Result<FittedStandardScaler, PipelineError> {
        let Some(mean) = data.mean_axis(Axis(0)) else {
            return Err(PipelineError::EmptyData(
                "cannot standardize a matrix without rows".to_string(),
            ));
        };
        let std = data
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s > 0.0 { s } else { 1.0 });

        Ok(FittedStandardScaler { mean, std })
    }
}

/// Scaler holding training-row statistics.
#[derive(Clone, Debug)]
pub struct FittedStandardScaler {
    mean: Array1<f64>,
    std: Array1<f64>,
}

impl FittedStandardScaler {
    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    pub fn std(&self) -> &Array1<f64> {
        &self.std
    }
}

impl FittedTransformer for FittedStandardScaler {
    type Input = Array2<f64>;
    type Output = Array2<f64>;
    type Params = StandardScalerParams;

    fn transform(&self, data: &Array2<f64>) -> Result<Array2<f64>, PipelineError> {
        if data.ncols() != self.mean.len() {
            return Err(PipelineError::FeatureMismatch {
                expected_features: self.mean.len(),
                got_features: data.ncols(),
            });
        }
        Ok((data - &self.mean) / &self.std)
    }

    fn extract_params(&self) -> StandardScalerParams {
        StandardScalerParams {
            mean: self.mean.to_vec(),
            std: self.std.to_vec(),
        }
    }

    fn from_params(params: StandardScalerParams) -> Result<Self, PipelineError> {
        if params.mean.len() != params.std.len() {
            return Err(PipelineError::InvalidParameter(format!(
                "scaler has {} means but {} deviations",
                params.mean.len(),
                params.std.len()
            )));
        }
        if params.std.iter().any(|&s| !(s > 0.0)) {
            return Err(PipelineError::InvalidParameter(
                "scaler deviations must be positive".to_string(),
            ));
        }
        Ok(Self {
            mean: Array1::from(params.mean),
            std: Array1::from(params.std),
        })
    }

    fn n_features_in(&self) -> usize {
        self.mean.len()
    }
}
