//! HTTP surface of the autoprice analysis pipeline.
//!
//! ```text
//! POST /api/analyze        {"records": [...]}  -> AnalysisReport
//! POST /api/analyze/csv    CSV text            -> AnalysisReport
//! GET  /api/sample-data    ?count=N&seed=S     -> {"records": [...]}
//! GET  /health                                 -> {"status": "ok"}
//! ```

pub mod config;
pub mod error;
pub mod handlers;

use autoprice::PipelineConfig;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use error::ApiError;

/// Shared, read-only request context.
#[derive(Clone, Debug)]
pub struct AppState {
    pub pipeline: Arc<PipelineConfig>,
}

impl AppState {
    pub fn new(pipeline: PipelineConfig) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/analyze", post(handlers::analyze_records))
        .route("/analyze/csv", post(handlers::analyze_csv))
        .route("/sample-data", get(handlers::sample_data));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
