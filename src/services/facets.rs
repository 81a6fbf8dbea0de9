use std::collections::BTreeMap;

use serde::Serialize;
use strum::IntoEnumIterator;

use crate::models::job::{Job, JobStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCount {
    pub status: JobStatus,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceCount {
    pub service: String,
    pub count: usize,
}

/// Counts used to label the status and service filter controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetCounts {
    pub total: usize,
    /// Every status, zero counts included, in lifecycle order.
    pub statuses: Vec<StatusCount>,
    /// Services sorted by name.
    pub services: Vec<ServiceCount>,
}

pub fn facet_counts(jobs: &[Job]) -> FacetCounts {
    let statuses = JobStatus::iter()
        .map(|status| StatusCount {
            status,
            count: jobs.iter().filter(|j| j.status == status).count(),
        })
        .collect();

    let mut by_service: BTreeMap<&str, usize> = BTreeMap::new();
    for job in jobs.iter().filter(|j| !j.service.is_empty()) {
        *by_service.entry(job.service.as_str()).or_default() += 1;
    }

    FacetCounts {
        total: jobs.len(),
        statuses,
        services: by_service
            .into_iter()
            .map(|(service, count)| ServiceCount {
                service: service.to_string(),
                count,
            })
            .collect(),
    }
}

/// Sorted unique service names, for the service dropdown.
pub fn distinct_services(jobs: &[Job]) -> Vec<String> {
    let mut services: Vec<String> = jobs
        .iter()
        .filter(|j| !j.service.is_empty())
        .map(|j| j.service.clone())
        .collect();
    services.sort();
    services.dedup();
    services
}
