use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Lifecycle status of a field-service job.
///
/// Parsing is case-insensitive and accepts the display form ("In Process"),
/// the variant name ("InProcess") and snake case ("in_process").
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, EnumString, Display, EnumIter, PartialEq, Eq, Hash,
)]
#[strum(ascii_case_insensitive)]
pub enum JobStatus {
    Pending,
    Todo,
    #[strum(to_string = "In Process", serialize = "InProcess", serialize = "in_process")]
    InProcess,
    Ended,
    Completed,
    Cancelled,
}

/// A single payment recorded against a job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub amount: f64,
    pub date: DateTime<Utc>,
}

/// A job as the dashboard sees it, normalized from the backend response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub job_no: String,
    pub customer_name: String,
    pub area: String,
    pub branch: String,
    pub created_at: DateTime<Utc>,
    pub status: JobStatus,
    pub service: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cancellation_reason: Option<String>,
    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl Job {
    /// Sum of all payment amounts.
    pub fn total_paid(&self) -> f64 {
        self.payments.iter().map(|p| p.amount).sum()
    }
}
