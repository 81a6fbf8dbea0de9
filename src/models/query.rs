use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::models::job::{Job, JobStatus};
use crate::services::query_engine;

/// Rows per page when the caller does not say otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Active service/status/search constraints on the job list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobFilters {
    pub service: Option<String>,
    pub status: Option<JobStatus>,
    pub search_term: String,
}

impl JobFilters {
    pub fn is_empty(&self) -> bool {
        self.service.is_none() && self.status.is_none() && self.search_term.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// 1-based page number plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub current_page: usize,
    pub page_size: usize,
}

impl PageRequest {
    pub fn new(current_page: usize, page_size: usize) -> Self {
        Self {
            current_page,
            page_size,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// One page of the filtered, ordered job list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub items: Vec<Job>,
    pub total_pages: usize,
    pub total_count: usize,
    pub current_page: usize,
    pub page_size: usize,
    /// Page numbers to render as buttons (at most four).
    pub page_window: Vec<usize>,
}

/// Explicit dashboard state: filters, page and the selected job.
///
/// Filter edits send the user back to page 1. Clearing filters keeps the
/// current selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub filters: JobFilters,
    pub page: PageRequest,
    pub selected_job_id: Option<String>,
}

impl ViewState {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page: PageRequest::new(1, page_size),
            ..Self::default()
        }
    }

    pub fn set_service(&mut self, service: Option<String>) {
        self.filters.service = service;
        self.page.current_page = 1;
    }

    pub fn set_status(&mut self, status: Option<JobStatus>) {
        self.filters.status = status;
        self.page.current_page = 1;
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filters.search_term = term.into();
        self.page.current_page = 1;
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page.current_page = page.max(1);
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.page.current_page = 1;
    }

    pub fn select_job(&mut self, job_id: impl Into<String>) {
        self.selected_job_id = Some(job_id.into());
    }

    pub fn clear_selection(&mut self) {
        self.selected_job_id = None;
    }

    /// Resolve the selection against the current job list.
    pub fn selected_job<'a>(&self, jobs: &'a [Job]) -> Option<&'a Job> {
        let id = self.selected_job_id.as_deref()?;
        jobs.iter().find(|j| j.id == id)
    }

    pub fn query(&self, jobs: &[Job]) -> QueryResult {
        query_engine::query(jobs, &self.filters, self.page)
    }
}

/// Query string accepted by `GET /api/v1/jobs`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct JobListParams {
    #[garde(skip)]
    pub service: Option<String>,

    #[garde(skip)]
    pub status: Option<String>,

    #[garde(length(chars, max = 200))]
    pub search: Option<String>,

    #[garde(range(min = 1))]
    pub page: Option<usize>,

    #[garde(range(min = 1, max = 100))]
    pub page_size: Option<usize>,
}
