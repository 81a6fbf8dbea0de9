use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::job::Job;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentGroup {
    pub key: String,
    pub total: f64,
    pub count: usize,
}

/// Payment totals for the dashboard revenue widgets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentSummary {
    pub total: f64,
    pub payment_count: usize,
    /// Keyed `YYYY-MM` by payment date, ascending.
    pub by_month: Vec<PaymentGroup>,
    /// Keyed by the owning job's service, ascending. Jobs without a
    /// service count toward `total` and `by_month` only, matching the
    /// service facets.
    pub by_service: Vec<PaymentGroup>,
}

/// Group every recorded payment by month and by service.
pub fn summarize_payments(jobs: &[Job]) -> PaymentSummary {
    let mut by_month: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    let mut by_service: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    let mut total = 0.0;
    let mut payment_count = 0;

    for job in jobs {
        for payment in &job.payments {
            total += payment.amount;
            payment_count += 1;

            let month = by_month
                .entry(payment.date.format("%Y-%m").to_string())
                .or_default();
            month.0 += payment.amount;
            month.1 += 1;

            if !job.service.is_empty() {
                let service = by_service.entry(job.service.clone()).or_default();
                service.0 += payment.amount;
                service.1 += 1;
            }
        }
    }

    PaymentSummary {
        total,
        payment_count,
        by_month: into_groups(by_month),
        by_service: into_groups(by_service),
    }
}

fn into_groups(map: BTreeMap<String, (f64, usize)>) -> Vec<PaymentGroup> {
    map.into_iter()
        .map(|(key, (total, count))| PaymentGroup { key, total, count })
        .collect()
}
