//! Request-boundary error mapping.

use autoprice::PipelineError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use std::fmt;
use tracing::error;

/// Any failure while serving a request.
///
/// Every failure is reported as a server error carrying the message; no
/// partial results are returned.
#[derive(Debug)]
pub enum ApiError {
    Pipeline(PipelineError),
    /// The request body could not be read as the expected JSON.
    Body(String),
    /// The blocking analysis task panicked or was cancelled.
    Task(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Pipeline(err) => write!(f, "{}", err),
            ApiError::Body(msg) => write!(f, "invalid request body: {}", msg),
            ApiError::Task(msg) => write!(f, "analysis task failed: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        ApiError::Pipeline(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Body(rejection.body_text())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Task(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let message = self.to_string();
        error!(%message, "request failed");

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}
