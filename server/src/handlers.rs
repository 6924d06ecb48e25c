//! Route handlers.

use crate::error::ApiError;
use crate::AppState;
use autoprice::dataset::{read_records, SyntheticGenerator};
use autoprice::preprocessing::current_year;
use autoprice::{analyze, AnalysisReport, Record, SvgChartRenderer};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Default number of synthetic records.
pub const DEFAULT_SAMPLE_COUNT: usize = 100;
/// Upper bound on synthetic records per request.
pub const MAX_SAMPLE_COUNT: usize = 5000;

/// Records sent to or returned from the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordsPayload {
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SampleQuery {
    pub count: Option<usize>,
    pub seed: Option<u64>,
}

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// `POST /api/analyze`
pub async fn analyze_records(
    State(state): State<AppState>,
    payload: Result<Json<RecordsPayload>, JsonRejection>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let Json(payload) = payload?;
    info!(records = payload.records.len(), "analysis requested");
    run_analysis(state, payload.records).await.map(Json)
}

/// `POST /api/analyze/csv`
pub async fn analyze_csv(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<AnalysisReport>, ApiError> {
    let records = read_records(body.as_bytes())?;
    info!(records = records.len(), "csv analysis requested");
    run_analysis(state, records).await.map(Json)
}

/// `GET /api/sample-data`
pub async fn sample_data(Query(query): Query<SampleQuery>) -> Json<RecordsPayload> {
    let count = query
        .count
        .unwrap_or(DEFAULT_SAMPLE_COUNT)
        .min(MAX_SAMPLE_COUNT);
    let seed = query.seed.unwrap_or(autoprice::config::DEFAULT_SEED);

    let records = SyntheticGenerator::new(seed, current_year()).generate(count);
    Json(RecordsPayload { records })
}

/// Runs the CPU-bound pipeline off the async worker threads.
async fn run_analysis(state: AppState, records: Vec<Record>) -> Result<AnalysisReport, ApiError> {
    let report = tokio::task::spawn_blocking(move || {
        let renderer = SvgChartRenderer::new();
        analyze(&records, &state.pipeline, Some(&renderer))
    })
    .await??;
    Ok(report)
}
