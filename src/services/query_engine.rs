//! Client-side job search: filter, rank, paginate.
//!
//! Everything here is a pure function of the job list and the caller's
//! filter/page state. No I/O, no shared state.

use std::cmp::Reverse;

use crate::models::job::Job;
use crate::models::query::{JobFilters, PageRequest, QueryResult};

/// Maximum number of page buttons shown at once.
const PAGE_WINDOW: usize = 4;

const SCORE_TITLE_EXACT: u32 = 100;
const SCORE_CUSTOMER_EXACT: u32 = 90;
const SCORE_TITLE_PREFIX: u32 = 80;
const SCORE_CUSTOMER_PREFIX: u32 = 70;
const SCORE_TITLE_CONTAINS: u32 = 60;
const SCORE_CUSTOMER_CONTAINS: u32 = 50;
const SCORE_AREA_CONTAINS: u32 = 40;
const SCORE_BRANCH_CONTAINS: u32 = 30;

/// Run a full query: filter, order, then cut out the requested page.
pub fn query(jobs: &[Job], filters: &JobFilters, page: PageRequest) -> QueryResult {
    let ordered = filter_and_order(jobs, filters);
    paginate(&ordered, page)
}

/// All jobs passing `filters`, ranked by relevance when a search term is
/// present and newest-first otherwise.
pub fn filter_and_order<'a>(jobs: &'a [Job], filters: &JobFilters) -> Vec<&'a Job> {
    let needle = filters.search_term.to_lowercase();

    let mut filtered: Vec<&Job> = jobs
        .iter()
        .filter(|job| matches_filters(job, filters, &needle))
        .collect();

    if needle.is_empty() {
        filtered.sort_by_key(|job| Reverse(job.created_at));
    } else {
        // Stable: equal scores keep their input order.
        filtered.sort_by_cached_key(|job| Reverse(relevance_score(job, &needle)));
    }

    filtered
}

/// Service, status and search predicates combined. `needle` must already
/// be lowercased.
fn matches_filters(job: &Job, filters: &JobFilters, needle: &str) -> bool {
    if let Some(service) = &filters.service {
        if &job.service != service {
            return false;
        }
    }
    if let Some(status) = filters.status {
        if job.status != status {
            return false;
        }
    }
    needle.is_empty() || matches_search(job, needle)
}

/// Case-insensitive substring match over title, customer, area, branch and
/// job number. `needle` must already be lowercased.
pub fn matches_search(job: &Job, needle: &str) -> bool {
    [
        &job.title,
        &job.customer_name,
        &job.area,
        &job.branch,
        &job.job_no,
    ]
    .into_iter()
    .any(|field| field.to_lowercase().contains(needle))
}

/// Additive relevance score. Overlapping conditions all count, so an exact
/// title match also collects the prefix and contains points.
/// `needle` must already be lowercased.
pub fn relevance_score(job: &Job, needle: &str) -> u32 {
    if needle.is_empty() {
        return 0;
    }

    let title = job.title.to_lowercase();
    let customer = job.customer_name.to_lowercase();

    let rules = [
        (title == needle, SCORE_TITLE_EXACT),
        (customer == needle, SCORE_CUSTOMER_EXACT),
        (title.starts_with(needle), SCORE_TITLE_PREFIX),
        (customer.starts_with(needle), SCORE_CUSTOMER_PREFIX),
        (title.contains(needle), SCORE_TITLE_CONTAINS),
        (customer.contains(needle), SCORE_CUSTOMER_CONTAINS),
        (job.area.to_lowercase().contains(needle), SCORE_AREA_CONTAINS),
        (job.branch.to_lowercase().contains(needle), SCORE_BRANCH_CONTAINS),
    ];

    rules
        .into_iter()
        .filter(|(hit, _)| *hit)
        .map(|(_, points)| points)
        .sum()
}

/// Cut page `page.current_page` (1-based) out of an ordered list.
pub fn paginate(ordered: &[&Job], page: PageRequest) -> QueryResult {
    let page_size = page.page_size.max(1);
    let current_page = page.current_page.max(1);
    let total_count = ordered.len();
    let total_pages = total_count.div_ceil(page_size);

    let start = (current_page - 1).saturating_mul(page_size).min(total_count);
    let end = start.saturating_add(page_size).min(total_count);

    QueryResult {
        items: ordered[start..end].iter().map(|job| (*job).clone()).collect(),
        total_pages,
        total_count,
        current_page,
        page_size,
        page_window: page_window(current_page, total_pages),
    }
}

/// Up to four page numbers around `current_page`, clamped to
/// `1..=total_pages`.
pub fn page_window(current_page: usize, total_pages: usize) -> Vec<usize> {
    if total_pages == 0 {
        return Vec::new();
    }
    let current = current_page.clamp(1, total_pages);
    let start = current.saturating_sub(2).max(1);
    let end = (start + PAGE_WINDOW - 1).min(total_pages);
    let start = end.saturating_sub(PAGE_WINDOW - 1).max(1);
    (start..=end).collect()
}
