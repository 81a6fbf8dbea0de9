use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::app_state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub snapshot: SnapshotHealth,
}

#[derive(Serialize)]
pub struct SnapshotHealth {
    pub jobs: usize,
    pub refreshed_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

/// GET /health — liveness plus job snapshot status.
///
/// 503 until a first snapshot has loaded; "degraded" when the latest
/// refresh failed but an older snapshot is still being served.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let snapshot = state.store.snapshot().await;
    let last_error = state.store.last_error().await;

    let (status_code, status) = match (snapshot.refreshed_at, &last_error) {
        (None, _) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
        (Some(_), Some(_)) => (StatusCode::OK, "degraded"),
        (Some(_), None) => (StatusCode::OK, "ok"),
    };

    let response = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        snapshot: SnapshotHealth {
            jobs: snapshot.jobs.len(),
            refreshed_at: snapshot.refreshed_at,
            last_error,
        },
    };

    (status_code, Json(response))
}
