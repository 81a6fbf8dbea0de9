use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, MutexGuard, RwLock};

use crate::models::job::Job;

/// Point-in-time copy of the job list.
#[derive(Debug, Clone)]
pub struct JobSnapshot {
    pub jobs: Arc<[Job]>,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl Default for JobSnapshot {
    fn default() -> Self {
        Self {
            jobs: Arc::from(Vec::new()),
            refreshed_at: None,
        }
    }
}

impl JobSnapshot {
    pub fn find(&self, job_id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == job_id)
    }
}

/// In-memory job list, replaced wholesale on every refresh.
///
/// Readers clone the `Arc` under a short read lock and query their copy,
/// so a concurrent refresh never exposes a half-built list. Refreshes
/// themselves take turns through [`JobStore::begin_refresh`].
#[derive(Debug, Default)]
pub struct JobStore {
    snapshot: RwLock<JobSnapshot>,
    last_error: RwLock<Option<String>>,
    refresh_lock: Mutex<()>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jobs(jobs: Vec<Job>) -> Self {
        Self {
            snapshot: RwLock::new(JobSnapshot {
                jobs: jobs.into(),
                refreshed_at: Some(Utc::now()),
            }),
            last_error: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Exclusive refresh slot. Hold the guard from fetch through
    /// `replace`/`record_failure` so refresh outcomes land in start order.
    pub async fn begin_refresh(&self) -> MutexGuard<'_, ()> {
        self.refresh_lock.lock().await
    }

    pub async fn snapshot(&self) -> JobSnapshot {
        self.snapshot.read().await.clone()
    }

    /// Swap in a new job list and clear any recorded refresh failure.
    pub async fn replace(&self, jobs: Vec<Job>) -> usize {
        let count = jobs.len();
        let fresh = JobSnapshot {
            jobs: jobs.into(),
            refreshed_at: Some(Utc::now()),
        };
        *self.snapshot.write().await = fresh;
        *self.last_error.write().await = None;
        count
    }

    /// Remember a failed refresh. The previous snapshot stays in place.
    pub async fn record_failure(&self, error: impl Into<String>) {
        *self.last_error.write().await = Some(error.into());
    }

    pub async fn last_error(&self) -> Option<String> {
        self.last_error.read().await.clone()
    }
}
