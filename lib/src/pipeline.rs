//! End-to-end analysis of one batch of vehicle records.
//!
//! ```text
//! records ─▶ VehiclePreprocessor ─▶ Trainer ─▶ rank_importances ─▶ ReportAssembler ─▶ AnalysisReport
//! ```
//!
//! Every transformer, encoder and model is created inside [`analyze`] and
//! dropped when it returns; runs share no state.

use crate::config::PipelineConfig;
use crate::dataset::Record;
use crate::error::PipelineError;
use crate::importance::rank_importances;
use crate::preprocessing::{current_year, VehiclePreprocessor};
use crate::report::{AnalysisReport, ChartRenderer, ReportAssembler};
use crate::trainer::Trainer;
use tracing::{debug, info};

/// Run the full analysis on `records`.
///
/// Charts are rendered only when `config.render_charts` is set and a
/// `renderer` is supplied.
///
/// # Errors
/// - [`PipelineError::InvalidParameter`] for an invalid `config`.
/// - [`PipelineError::Data`] for unusable input records.
/// - [`PipelineError::Training`] when the data cannot support a model (too
///   few rows, constant prices).
pub fn analyze(
    records: &[Record],
    config: &PipelineConfig,
    renderer: Option<&dyn ChartRenderer>,
) -> Result<AnalysisReport, PipelineError> {
    config.validate()?;

    let reference_year = config.reference_year.unwrap_or_else(current_year);
    let prepared = VehiclePreprocessor::new(reference_year).prepare(records)?;

    let run = Trainer::from_config(config).fit(&prepared.features, &prepared.target)?;
    debug!(
        r2 = run.metrics.r2_score,
        rmse = run.metrics.rmse,
        "model evaluated"
    );

    let importances = rank_importances(&run.model, &prepared.feature_names)?;

    let renderer = renderer.filter(|_| config.render_charts);
    let report = ReportAssembler::new(config.sample_limit).assemble(
        &prepared,
        &run,
        importances,
        renderer,
    )?;

    info!(
        records = report.summary.total_records,
        features = report.features.len(),
        r2 = report.metrics.r2_score,
        mae = report.metrics.mae,
        mape = ?report.metrics.mape,
        "analysis complete"
    );

    Ok(report)
}
