use std::sync::Arc;

use crate::services::{backend::BackendClient, job_store::JobStore};

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<JobStore>,
    pub backend: Arc<BackendClient>,
    pub page_size: usize,
    pub max_page_size: usize,
}

impl AppState {
    pub fn new(
        store: JobStore,
        backend: BackendClient,
        page_size: usize,
        max_page_size: usize,
    ) -> Self {
        Self {
            store: Arc::new(store),
            backend: Arc::new(backend),
            page_size: page_size.max(1),
            max_page_size: max_page_size.max(1),
        }
    }
}
