use std::sync::Arc;

use axum::routing::get;
use metrics_exporter_prometheus::PrometheusBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use jobdesk::app_state::AppState;
use jobdesk::config::AppConfig;
use jobdesk::routes;
use jobdesk::services::{backend::BackendClient, job_store::JobStore, refresh};

#[tokio::main]
async fn main() {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    // Load configuration from environment
    let config = AppConfig::from_env().expect("Failed to load configuration from environment");

    tracing::info!("Initializing jobdesk server");

    // Initialize Prometheus metrics recorder
    let prometheus_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    let prometheus_handle = Arc::new(prometheus_handle);

    metrics::describe_counter!("job_queries_total", "Total job list queries served");
    metrics::describe_histogram!(
        "job_query_seconds",
        "Time to filter, rank and paginate the job list"
    );
    metrics::describe_counter!("job_refresh_total", "Job snapshot refresh attempts");
    metrics::describe_counter!(
        "job_refresh_failures_total",
        "Job snapshot refreshes that failed"
    );
    metrics::describe_gauge!("jobs_cached", "Jobs in the current snapshot");

    tracing::info!(backend_url = %config.backend_url, "Initializing job backend client");
    let backend = BackendClient::new(
        &config.backend_url,
        config.backend_token.clone(),
        config.request_timeout(),
    )
    .expect("Failed to initialize job backend client");

    let state = AppState::new(
        JobStore::new(),
        backend,
        config.page_size,
        config.max_page_size,
    );

    // The server still starts if the backend is down; /health reports it.
    if let Err(e) = refresh::refresh_once(&state).await {
        tracing::warn!(error = %e, "Initial job load failed, serving empty snapshot");
    }

    if let Some(interval) = config.refresh_interval() {
        tokio::spawn(refresh::run_refresh_loop(state.clone(), interval));
    }

    let app = routes::api_router(state)
        .route(
            "/metrics",
            get(routes::metrics::prometheus_metrics).with_state(prometheus_handle),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(64 * 1024));

    tracing::info!("Starting jobdesk on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.expect("Server error");
}
