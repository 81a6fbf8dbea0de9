use std::str::FromStr;
use std::time::Instant;

use axum::extract::{Path, Query, State};
use axum::Json;
use garde::Validate;
use serde::Serialize;

use crate::app_state::AppState;
use crate::models::job::{Job, JobStatus};
use crate::models::query::{JobFilters, JobListParams, PageRequest, QueryResult};
use crate::routes::ApiError;
use crate::services::facets::{self, FacetCounts};
use crate::services::query_engine;
use crate::services::refresh::{self, RefreshReport};

#[derive(Serialize)]
pub struct FacetsResponse {
    pub facets: FacetCounts,
    pub services: Vec<String>,
}

/// GET /api/v1/jobs — filtered, ranked, paginated job list.
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobListParams>,
) -> Result<Json<QueryResult>, ApiError> {
    params
        .validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let (filters, page) = resolve_params(params, state.page_size, state.max_page_size)?;

    let snapshot = state.store.snapshot().await;
    let start = Instant::now();
    let result = query_engine::query(&snapshot.jobs, &filters, page);

    metrics::counter!("job_queries_total").increment(1);
    metrics::histogram!("job_query_seconds").record(start.elapsed().as_secs_f64());

    tracing::debug!(
        search = %filters.search_term,
        service = ?filters.service,
        status = ?filters.status,
        page = result.current_page,
        total_count = result.total_count,
        "Job query served"
    );

    Ok(Json(result))
}

/// Map raw query parameters onto engine inputs. Empty strings mean
/// "no filter", as the dashboard's dropdowns send them.
pub fn resolve_params(
    params: JobListParams,
    default_page_size: usize,
    max_page_size: usize,
) -> Result<(JobFilters, PageRequest), ApiError> {
    let status = match params.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) => Some(
            JobStatus::from_str(s)
                .map_err(|_| ApiError::BadRequest(format!("Unknown job status: {s}")))?,
        ),
    };

    let filters = JobFilters {
        service: params.service.filter(|s| !s.is_empty()),
        status,
        search_term: params.search.unwrap_or_default(),
    };

    let page_size = params
        .page_size
        .unwrap_or(default_page_size)
        .clamp(1, max_page_size.max(1));
    let page = PageRequest::new(params.page.unwrap_or(1), page_size);

    Ok((filters, page))
}

/// GET /api/v1/jobs/facets — status and service counts for filter controls.
pub async fn job_facets(State(state): State<AppState>) -> Json<FacetsResponse> {
    let snapshot = state.store.snapshot().await;
    Json(FacetsResponse {
        facets: facets::facet_counts(&snapshot.jobs),
        services: facets::distinct_services(&snapshot.jobs),
    })
}

/// GET /api/v1/jobs/{job_id} — a single job, e.g. the dashboard's selection.
pub async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<Job>, ApiError> {
    let snapshot = state.store.snapshot().await;
    snapshot
        .find(&job_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Job not found: {job_id}")))
}

/// POST /api/v1/jobs/refresh — reload the job list from the backend.
pub async fn refresh_jobs(State(state): State<AppState>) -> Result<Json<RefreshReport>, ApiError> {
    let report = refresh::refresh_once(&state).await?;
    Ok(Json(report))
}
