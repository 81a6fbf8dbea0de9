//! Test helpers for driving the API router in-process.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use jobdesk::app_state::AppState;
use jobdesk::models::job::Job;
use jobdesk::routes;
use jobdesk::services::{backend::BackendClient, job_store::JobStore};

/// Port 9 (discard) is never served in the test environment.
pub const UNREACHABLE_BACKEND: &str = "http://127.0.0.1:9";

pub fn state_with(store: JobStore, backend_url: &str) -> AppState {
    let backend = BackendClient::new(backend_url, None, Duration::from_secs(2))
        .expect("Failed to build backend client");
    AppState::new(store, backend, 10, 100)
}

pub fn app_with_jobs(jobs: Vec<Job>) -> Router {
    routes::api_router(state_with(JobStore::with_jobs(jobs), UNREACHABLE_BACKEND))
}

/// Send a request through the router and decode the JSON body.
pub async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Router failed");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri).await
}

/// Ids of the `items` array in a job list response.
pub fn item_ids(body: &Value) -> Vec<String> {
    body["items"]
        .as_array()
        .expect("items array")
        .iter()
        .map(|j| j["id"].as_str().expect("job id").to_string())
        .collect()
}

/// Serve `payload` at `/jobs` with `status` on an ephemeral port and
/// return the base URL.
pub async fn spawn_backend(status: StatusCode, payload: Value) -> String {
    let app = Router::new().route(
        "/jobs",
        get(move || {
            let payload = payload.clone();
            async move { (status, Json(payload)) }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake backend");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Fake backend failed");
    });

    format!("http://{addr}")
}

/// Like [`spawn_backend`], but each request takes `delay` to answer and the
/// returned counter records the most requests ever in flight at once.
pub async fn spawn_slow_backend(payload: Value, delay: Duration) -> (String, Arc<AtomicUsize>) {
    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let app = {
        let peak = peak.clone();
        Router::new().route(
            "/jobs",
            get(move || {
                let payload = payload.clone();
                let in_flight = in_flight.clone();
                let peak = peak.clone();
                async move {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(delay).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    Json(payload)
                }
            }),
        )
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake backend");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Fake backend failed");
    });

    (format!("http://{addr}"), peak)
}
