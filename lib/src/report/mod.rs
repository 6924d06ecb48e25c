//! Analysis report assembly.
//!
//! Combines the prepared data, the trained run and the ranked importances
//! into the [`AnalysisReport`] returned to clients. Chart images are
//! delegated to a [`ChartRenderer`].

pub mod charts;

pub use charts::SvgChartRenderer;

use crate::error::PipelineError;
use crate::importance::FeatureImportance;
use crate::metrics::RegressionMetrics;
use crate::preprocessing::PreparedData;
use crate::trainer::TrainedRun;
use serde::{Deserialize, Serialize};

/// Maximum number of sample predictions by default.
pub const DEFAULT_SAMPLE_LIMIT: usize = 15;

/// Headline statistics of an analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_records: usize,
    pub mean_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    /// `100 - MAPE`, may be negative; `None` when MAPE is undefined.
    pub accuracy: Option<f64>,
    pub train_size: usize,
    pub test_size: usize,
}

/// Prediction for one evaluation row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SamplePrediction {
    pub name: String,
    pub actual: f64,
    pub predicted: f64,
    /// `|actual - predicted|`
    pub error: f64,
    /// `error / |actual| * 100`; `None` when the actual price is zero.
    pub error_percentage: Option<f64>,
}

/// Encoded chart images (data URIs).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Charts {
    pub feature_importance: Option<String>,
    pub price_distribution: Option<String>,
    pub actual_vs_predicted: Option<String>,
}

/// Renders report charts into opaque encoded strings.
pub trait ChartRenderer {
    /// # Arguments
    /// * `importances`: ranked (feature, importance) pairs
    /// * `prices`: raw target vector
    /// * `predictions`: (actual, predicted) pairs of the evaluation subset
    fn render(
        &self,
        importances: &[FeatureImportance],
        prices: &[f64],
        predictions: &[(f64, f64)],
    ) -> Result<Charts, PipelineError>;
}

/// The full result of one analysis run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: Summary,
    pub metrics: RegressionMetrics,
    /// Feature columns the model was trained on, in matrix order.
    pub features: Vec<String>,
    pub dropped_features: Vec<String>,
    pub feature_importance: Vec<FeatureImportance>,
    pub sample_predictions: Vec<SamplePrediction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charts: Option<Charts>,
}

/// Builds an [`AnalysisReport`] from the outputs of the earlier stages.
#[derive(Clone, Debug)]
pub struct ReportAssembler {
    sample_limit: usize,
}

impl Default for ReportAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_LIMIT)
    }
}

impl ReportAssembler {
    pub fn new(sample_limit: usize) -> Self {
        Self { sample_limit }
    }

    /// Assemble the report; charts are rendered only when a renderer is given.
    pub fn assemble(
        &self,
        prepared: &PreparedData,
        run: &TrainedRun,
        importances: Vec<FeatureImportance>,
        renderer: Option<&dyn ChartRenderer>,
    ) -> Result<AnalysisReport, PipelineError> {
        let summary = summarize(prepared, run)?;
        let sample_predictions = sample_predictions(&prepared.names, run, self.sample_limit);

        let charts = match renderer {
            Some(renderer) => {
                let pairs: Vec<(f64, f64)> = run
                    .eval_actual
                    .iter()
                    .copied()
                    .zip(run.eval_predicted.iter().copied())
                    .collect();
                Some(renderer.render(&importances, &prepared.target.to_vec(), &pairs)?)
            }
            None => None,
        };

        Ok(AnalysisReport {
            summary,
            metrics: run.metrics,
            features: prepared.feature_names.clone(),
            dropped_features: prepared.dropped_features.clone(),
            feature_importance: importances,
            sample_predictions,
            charts,
        })
    }
}

/// Count, mean, min and max of the target plus split sizes and accuracy.
pub fn summarize(prepared: &PreparedData, run: &TrainedRun) -> Result<Summary, PipelineError> {
    let target = &prepared.target;
    let mean_price = target
        .mean()
        .ok_or_else(|| PipelineError::data("cannot summarize an empty target"))?;
    let min_price = target.iter().copied().fold(f64::INFINITY, f64::min);
    let max_price = target.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Ok(Summary {
        total_records: target.len(),
        mean_price,
        min_price,
        max_price,
        accuracy: run.metrics.accuracy(),
        train_size: run.split.train_size(),
        test_size: run.split.eval_size(),
    })
}

/// Up to `limit` evaluation rows, in evaluation-split order.
pub fn sample_predictions(
    names: &[String],
    run: &TrainedRun,
    limit: usize,
) -> Vec<SamplePrediction> {
    run.split
        .eval
        .iter()
        .zip(run.eval_actual.iter().zip(run.eval_predicted.iter()))
        .take(limit)
        .map(|(&row, (&actual, &predicted))| {
            let error = (actual - predicted).abs();
            SamplePrediction {
                name: names.get(row).cloned().unwrap_or_default(),
                actual,
                predicted,
                error,
                error_percentage: (actual != 0.0).then(|| error / actual.abs() * 100.0),
            }
        })
        .collect()
}
