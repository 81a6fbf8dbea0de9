use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::time::sleep;

use crate::app_state::AppState;
use crate::services::backend::BackendError;

/// Outcome of one refresh.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshReport {
    pub loaded: usize,
    pub skipped: usize,
    pub duration_ms: u64,
}

/// Fetch the job list from the backend and swap it into the store.
///
/// On failure the previous snapshot stays in place and the error is
/// recorded for the health check. Concurrent callers (the background loop
/// and the refresh endpoint) run one at a time.
pub async fn refresh_once(state: &AppState) -> Result<RefreshReport, BackendError> {
    let _refresh = state.store.begin_refresh().await;
    let start = Instant::now();
    metrics::counter!("job_refresh_total").increment(1);

    let normalized = match state.backend.fetch_jobs().await {
        Ok(n) => n,
        Err(e) => {
            metrics::counter!("job_refresh_failures_total").increment(1);
            tracing::error!(error = %e, "Job refresh failed, keeping previous snapshot");
            state.store.record_failure(e.to_string()).await;
            return Err(e);
        }
    };

    let skipped = normalized.skipped.len();
    let loaded = state.store.replace(normalized.jobs).await;
    metrics::gauge!("jobs_cached").set(loaded as f64);

    let report = RefreshReport {
        loaded,
        skipped,
        duration_ms: start.elapsed().as_millis() as u64,
    };

    tracing::info!(
        loaded = report.loaded,
        skipped = report.skipped,
        duration_ms = report.duration_ms,
        "Job snapshot refreshed"
    );

    Ok(report)
}

/// Refresh forever on a fixed interval. Failures are logged and retried on
/// the next tick.
pub async fn run_refresh_loop(state: AppState, interval: Duration) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        "Starting background job refresh"
    );

    loop {
        sleep(interval).await;
        if let Err(e) = refresh_once(&state).await {
            tracing::warn!(error = %e, "Background refresh failed, will retry");
        }
    }
}
