//! Upstream job backend client.
//!
//! Fetches the raw job list over REST and normalizes it into [`Job`]
//! records. Every wire field is optional; records that cannot be
//! identified (no id, unknown status) are skipped and counted.

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::job::{Job, JobStatus, Payment};

/// Raw job object as the backend returns it.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawJob {
    #[serde(alias = "_id")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub job_no: Option<String>,
    pub customer_name: Option<String>,
    pub area: Option<String>,
    pub branch: Option<String>,
    pub created_at: Option<String>,
    pub status: Option<String>,
    pub service: Option<String>,
    pub cancellation_reason: Option<String>,
    #[serde(default)]
    pub payments: Vec<RawPayment>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawPayment {
    pub amount: Option<f64>,
    pub date: Option<String>,
}

/// The backend answers with either a bare array or `{ "jobs": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum JobsEnvelope {
    Bare(Vec<RawJob>),
    Wrapped { jobs: Vec<RawJob> },
}

impl JobsEnvelope {
    fn into_jobs(self) -> Vec<RawJob> {
        match self {
            JobsEnvelope::Bare(jobs) => jobs,
            JobsEnvelope::Wrapped { jobs } => jobs,
        }
    }
}

/// Why a raw record was dropped during normalization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("record has no id")]
    MissingId,

    #[error("record {id} has no status")]
    MissingStatus { id: String },

    #[error("record {id} has unknown status {status:?}")]
    UnknownStatus { id: String, status: String },
}

/// Result of normalizing a batch of raw records.
#[derive(Debug, Default)]
pub struct Normalized {
    pub jobs: Vec<Job>,
    pub skipped: Vec<SkipReason>,
}

/// Normalize a batch, keeping input order.
pub fn normalize_jobs(raw: Vec<RawJob>) -> Normalized {
    let mut out = Normalized::default();
    for record in raw {
        match normalize_job(record) {
            Ok(job) => out.jobs.push(job),
            Err(reason) => {
                warn!(reason = %reason, "Skipping malformed job record");
                out.skipped.push(reason);
            }
        }
    }
    out
}

/// Turn one raw record into a [`Job`]. Missing strings become empty, a
/// missing or unparseable timestamp becomes the Unix epoch.
pub fn normalize_job(raw: RawJob) -> Result<Job, SkipReason> {
    let id = raw
        .id
        .filter(|id| !id.is_empty())
        .ok_or(SkipReason::MissingId)?;

    let status = match raw.status.as_deref() {
        None | Some("") => return Err(SkipReason::MissingStatus { id }),
        Some(s) => JobStatus::from_str(s.trim()).map_err(|_| SkipReason::UnknownStatus {
            id: id.clone(),
            status: s.to_string(),
        })?,
    };

    let created_at =
        parse_timestamp(raw.created_at.as_deref()).unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

    let payments = raw
        .payments
        .into_iter()
        .map(|p| Payment {
            amount: p.amount.unwrap_or(0.0),
            date: parse_timestamp(p.date.as_deref()).unwrap_or(created_at),
        })
        .collect();

    Ok(Job {
        id,
        title: raw.title.unwrap_or_default(),
        job_no: raw.job_no.unwrap_or_default(),
        customer_name: raw.customer_name.unwrap_or_default(),
        area: raw.area.unwrap_or_default(),
        branch: raw.branch.unwrap_or_default(),
        created_at,
        status,
        service: raw.service.unwrap_or_default(),
        cancellation_reason: raw.cancellation_reason.filter(|r| !r.is_empty()),
        payments,
    })
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value?;
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

/// REST client for the job backend.
pub struct BackendClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl BackendClient {
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("jobdesk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Fetch and normalize the full job list.
    pub async fn fetch_jobs(&self) -> Result<Normalized, BackendError> {
        let url = format!("{}/jobs", self.base_url);
        debug!(url = %url, "Fetching jobs from backend");

        let mut request = self.http.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let envelope: JobsEnvelope = serde_json::from_slice(&body)?;
        Ok(normalize_jobs(envelope.into_jobs()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("HTTP request to job backend failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Job backend returned status {0}")]
    Status(u16),

    #[error("Failed to decode job backend response: {0}")]
    Decode(#[from] serde_json::Error),
}
