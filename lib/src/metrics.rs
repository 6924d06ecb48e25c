//! Regression metrics for the evaluation subset.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Metrics for evaluating regression models.
pub struct Metrics;

impl Metrics {
    /// Calculate Mean Squared Error (MSE).
    ///
    /// MSE = mean((y_true - y_pred)^2)
    pub fn mse(y_true: &[f64], y_pred: &[f64]) -> f64 {
        debug_assert_eq!(y_true.len(), y_pred.len(), "Arrays must have the same length");

        if y_true.is_empty() {
            return 0.0;
        }

        let sum_sq: f64 = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).powi(2))
            .sum();

        sum_sq / y_true.len() as f64
    }

    /// Calculate Root Mean Squared Error (RMSE), in the units of the target.
    pub fn rmse(y_true: &[f64], y_pred: &[f64]) -> f64 {
        Self::mse(y_true, y_pred).sqrt()
    }

    /// Calculate Mean Absolute Error (MAE).
    ///
    /// MAE = mean(|y_true - y_pred|)
    pub fn mae(y_true: &[f64], y_pred: &[f64]) -> f64 {
        debug_assert_eq!(y_true.len(), y_pred.len(), "Arrays must have the same length");

        if y_true.is_empty() {
            return 0.0;
        }

        let sum_abs: f64 = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).abs())
            .sum();

        sum_abs / y_true.len() as f64
    }

    /// Calculate R² (coefficient of determination).
    ///
    /// R² = 1 - (SS_res / SS_tot)
    ///
    /// where:
    /// - SS_res = sum((y_true - y_pred)^2)  (residual sum of squares)
    /// - SS_tot = sum((y_true - mean(y_true))^2)  (total sum of squares)
    ///
    /// At most 1; negative when the model is worse than predicting the mean.
    pub fn r_squared(y_true: &[f64], y_pred: &[f64]) -> f64 {
        debug_assert_eq!(y_true.len(), y_pred.len(), "Arrays must have the same length");

        if y_true.is_empty() {
            return 0.0;
        }

        let mean_true: f64 = y_true.iter().sum::<f64>() / y_true.len() as f64;

        let ss_res: f64 = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).powi(2))
            .sum();

        let ss_tot: f64 = y_true.iter().map(|&t| (t - mean_true).powi(2)).sum();

        if ss_tot == 0.0 {
            // All actual values are equal: perfect only if the predictions match exactly
            return if ss_res == 0.0 { 1.0 } else { 0.0 };
        }

        1.0 - (ss_res / ss_tot)
    }

    /// Calculate Mean Absolute Percentage Error (MAPE), in percent.
    ///
    /// MAPE = mean(|y_true - y_pred| / |y_true|) * 100
    ///
    /// Rows whose actual value is zero are skipped. Returns `None` when no
    /// row is left.
    pub fn mape(y_true: &[f64], y_pred: &[f64]) -> Option<f64> {
        debug_assert_eq!(y_true.len(), y_pred.len(), "Arrays must have the same length");

        let ratios: Vec<f64> = y_true
            .iter()
            .zip(y_pred.iter())
            .filter(|&(&t, _)| t != 0.0)
            .map(|(&t, &p)| ((t - p) / t).abs())
            .collect();

        let skipped = y_true.len() - ratios.len();
        if skipped > 0 {
            warn!(skipped, "zero actual prices excluded from MAPE");
        }

        if ratios.is_empty() {
            return None;
        }

        Some(ratios.iter().sum::<f64>() / ratios.len() as f64 * 100.0)
    }

    /// Calculate all metrics at once.
    pub fn calculate_all(y_true: &[f64], y_pred: &[f64]) -> RegressionMetrics {
        RegressionMetrics {
            r2_score: Self::r_squared(y_true, y_pred),
            rmse: Self::rmse(y_true, y_pred),
            mae: Self::mae(y_true, y_pred),
            mape: Self::mape(y_true, y_pred),
        }
    }
}

/// Evaluation metrics of one trained run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionMetrics {
    pub r2_score: f64,
    pub rmse: f64,
    pub mae: f64,
    /// `None` when every evaluation actual is zero.
    pub mape: Option<f64>,
}

impl RegressionMetrics {
    /// `100 - MAPE`; not clamped, so it can be negative.
    pub fn accuracy(&self) -> Option<f64> {
        self.mape.map(|mape| 100.0 - mape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mse_perfect() {
        let y_true = vec![1.0, 2.0, 3.0, 4.0];
        let y_pred = vec![1.0, 2.0, 3.0, 4.0];
        assert!((Metrics::mse(&y_true, &y_pred) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_rmse_error() {
        let y_true = vec![1.0, 2.0, 3.0, 4.0];
        let y_pred = vec![3.0, 4.0, 5.0, 6.0];
        // Errors: [-2, -2, -2, -2], squared mean 4.0
        assert!((Metrics::rmse(&y_true, &y_pred) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_mae() {
        let y_true = vec![1.0, 2.0, 3.0, 4.0];
        let y_pred = vec![2.0, 1.0, 4.0, 3.0];
        assert!((Metrics::mae(&y_true, &y_pred) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_r_squared_perfect() {
        let y_true = vec![1.0, 2.0, 3.0, 4.0];
        assert!((Metrics::r_squared(&y_true, &y_true) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_r_squared_can_be_negative() {
        let y_true = vec![1.0, 2.0, 3.0];
        let y_pred = vec![3.0, 2.0, 1.0];
        // SS_res = 8, SS_tot = 2
        assert!((Metrics::r_squared(&y_true, &y_pred) + 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_r_squared_constant_actuals() {
        assert_eq!(Metrics::r_squared(&[2.0, 2.0], &[2.0, 2.0]), 1.0);
        assert_eq!(Metrics::r_squared(&[2.0, 2.0], &[2.0, 3.0]), 0.0);
    }

    #[test]
    fn test_mape() {
        let y_true = vec![100.0, 200.0];
        let y_pred = vec![110.0, 150.0];
        // (10% + 25%) / 2
        let mape = Metrics::mape(&y_true, &y_pred).unwrap();
        assert!((mape - 17.5).abs() < 1e-12);
    }

    #[test]
    fn test_mape_skips_zero_actuals() {
        let y_true = vec![0.0, 10.0];
        let y_pred = vec![5.0, 12.0];
        let mape = Metrics::mape(&y_true, &y_pred).unwrap();
        assert!((mape - 20.0).abs() < 1e-12);

        assert_eq!(Metrics::mape(&[0.0, 0.0], &[1.0, 2.0]), None);
    }

    #[test]
    fn test_calculate_all_and_accuracy() {
        let y_true = vec![10.0, 20.0];
        let y_pred = vec![11.0, 18.0];
        let metrics = Metrics::calculate_all(&y_true, &y_pred);

        assert!((metrics.mae - 1.5).abs() < 1e-12);
        let mape = metrics.mape.unwrap();
        assert!((mape - 10.0).abs() < 1e-12);
        assert!((metrics.accuracy().unwrap() - 90.0).abs() < 1e-12);
        assert!(metrics.r2_score <= 1.0);
    }

    #[test]
    fn test_accuracy_not_clamped() {
        let metrics = RegressionMetrics {
            r2_score: 0.0,
            rmse: 0.0,
            mae: 0.0,
            mape: Some(150.0),
        };
        assert_eq!(metrics.accuracy(), Some(-50.0));
    }
}
