//! Median imputation.
//!
//! NaN marks a missing cell. Each column's median is computed over its
//! present values only, and `transform` replaces every NaN in that column
//! with it.
//!
//! # Example
//! ```ignore
//! use autoprice::preprocessing::{Transformer, FittedTransformer, SimpleImputer};
//!
//! let fitted = SimpleImputer::new().fit(&data)?;
//! let imputed = fitted.transform(&data)?;
//! ```

use crate::error::PipelineError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

/// Fill values learned by a [`FittedSimpleImputer`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimpleImputerParams {
    /// Median of every column, in column order.
    pub medians: Vec<f64>,
}

/// Unfitted median imputer.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleImputer;

impl SimpleImputer {
    pub fn new() -> Self {
        Self
    }
}

/// Median of a slice of finite values; `None` when empty.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    Some(if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    })
}

impl Transformer for SimpleImputer {
    type Input = Array2<f64>;
    type Output = Array2<f64>;
    type Params = SimpleImputerParams;
    type Fitted = FittedSimpleImputer;

    fn fit(&self, data: &Array2<f64>) -> Result<FittedSimpleImputer, PipelineError> {
        if data.nrows() == 0 {
            return Err(PipelineError::EmptyData(
                "cannot impute a matrix without rows".to_string(),
            ));
        }

        let medians = data
            .axis_iter(Axis(1))
            .enumerate()
            .map(|(col, column)| {
                let present: Vec<f64> = column.iter().copied().filter(|v| !v.is_nan()).collect();
                median(&present).ok_or_else(|| {
                    PipelineError::data(format!(
                        "column {} has no non-missing values; cannot impute",
                        col
                    ))
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        Ok(FittedSimpleImputer { medians })
    }
}

/// Imputer holding per-column medians.
#[derive(Clone, Debug)]
pub struct FittedSimpleImputer {
    medians: Vec<f64>,
}

impl FittedSimpleImputer {
    pub fn medians(&self) -> &[f64] {
        &self.medians
    }
}

impl FittedTransformer for FittedSimpleImputer {
    type Input = Array2<f64>;
    type Output = Array2<f64>;
    type Params = SimpleImputerParams;

    fn transform(&self, data: &Array2<f64>) -> Result<Array2<f64>, PipelineError> {
        if data.ncols() != self.medians.len() {
            return Err(PipelineError::FeatureMismatch {
                expected_features: self.medians.len(),
                got_features: data.ncols(),
            });
        }

        let mut result = data.clone();
        for (mut column, &fill) in result.axis_iter_mut(Axis(1)).zip(&self.medians) {
            column.mapv_inplace(|v| if v.is_nan() { fill } else { v });
        }
        Ok(result)
    }

    fn extract_params(&self) -> SimpleImputerParams {
        SimpleImputerParams {
            medians: self.medians.clone(),
        }
    }

    fn from_params(params: SimpleImputerParams) -> Result<Self, PipelineError> {
        if params.medians.iter().any(|m| !m.is_finite()) {
            return Err(PipelineError::InvalidParameter(
                "imputer medians must be finite".to_string(),
            ));
        }
        Ok(Self {
            medians: params.medians,
        })
    }

    fn n_features_in(&self) -> usize {
        self.medians.len()
    }
}
