use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use crate::app_state::AppState;
use crate::services::backend::BackendError;

pub mod health;
pub mod jobs;
pub mod metrics;
pub mod payments;

/// Health and `/api/v1` routes. The Prometheus endpoint is mounted
/// separately by the binary since it carries its own state.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/v1/jobs", get(jobs::list_jobs))
        .route("/api/v1/jobs/facets", get(jobs::job_facets))
        .route("/api/v1/jobs/refresh", post(jobs::refresh_jobs))
        .route("/api/v1/jobs/{job_id}", get(jobs::get_job))
        .route("/api/v1/payments/summary", get(payments::payment_summary))
        .with_state(state)
}

/// Errors surfaced to API clients as `{ "error": "..." }`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Upstream(#[from] BackendError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
