//! Sample job records shared by the integration tests.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use jobdesk::models::job::{Job, JobStatus, Payment};

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
}

pub fn job(id: &str, title: &str, customer: &str, minutes: i64) -> Job {
    Job {
        id: id.to_string(),
        title: title.to_string(),
        job_no: format!("JN-{id}"),
        customer_name: customer.to_string(),
        area: String::new(),
        branch: String::new(),
        created_at: base_time() + Duration::minutes(minutes),
        status: JobStatus::Pending,
        service: "General".to_string(),
        cancellation_reason: None,
        payments: Vec::new(),
    }
}

/// A small, varied desk: mixed services, statuses, locations and payments.
pub fn desk_jobs() -> Vec<Job> {
    let mut ac = job("j1", "AC Repair", "Alice Brown", 0);
    ac.service = "AC".to_string();
    ac.status = JobStatus::Completed;
    ac.area = "Downtown".to_string();
    ac.branch = "Central".to_string();
    ac.payments = vec![Payment {
        amount: 120.0,
        date: Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap(),
    }];

    let mut fan = job("j2", "Fan Fix", "Bob Stone", 10);
    fan.service = "Electrical".to_string();
    fan.status = JobStatus::Todo;
    fan.area = "Riverside".to_string();
    fan.branch = "East".to_string();

    let mut install = job("j3", "AC Install", "Carol Acres", 20);
    install.service = "AC".to_string();
    install.status = JobStatus::InProcess;
    install.area = "Hilltop".to_string();
    install.branch = "North".to_string();
    install.payments = vec![
        Payment {
            amount: 300.0,
            date: Utc.with_ymd_and_hms(2024, 6, 20, 9, 0, 0).unwrap(),
        },
        Payment {
            amount: 200.0,
            date: Utc.with_ymd_and_hms(2024, 7, 2, 9, 0, 0).unwrap(),
        },
    ];

    let mut leak = job("j4", "Leak Check", "Dan Price", 30);
    leak.service = "Plumbing".to_string();
    leak.status = JobStatus::Cancelled;
    leak.cancellation_reason = Some("Customer unavailable".to_string());
    leak.area = "Downtown".to_string();
    leak.branch = "Central".to_string();

    let mut wiring = job("j5", "Rewiring", "Erin Vale", 40);
    wiring.service = "Electrical".to_string();
    wiring.status = JobStatus::Completed;
    wiring.area = "Riverside".to_string();
    wiring.branch = "East".to_string();
    wiring.payments = vec![Payment {
        amount: 80.5,
        date: Utc.with_ymd_and_hms(2024, 7, 15, 9, 0, 0).unwrap(),
    }];

    vec![ac, fan, install, leak, wiring]
}

/// `count` jobs where job `i` is newer than job `i + 1`.
pub fn numbered_jobs(count: usize) -> Vec<Job> {
    (0..count)
        .map(|i| {
            job(
                &format!("n{i}"),
                &format!("Job {i}"),
                "Customer",
                (count - i) as i64,
            )
        })
        .collect()
}

/// Backend wire payload matching `desk_jobs` plus one malformed record.
pub fn backend_payload() -> serde_json::Value {
    serde_json::json!({
        "jobs": [
            {
                "_id": "b1",
                "title": "Boiler Service",
                "jobNo": "JN-900",
                "customerName": "Frank Hale",
                "area": "Uptown",
                "branch": "West",
                "createdAt": "2024-08-01T10:00:00Z",
                "status": "Pending",
                "service": "Heating",
                "payments": [{ "amount": 60.0, "date": "2024-08-02T10:00:00Z" }]
            },
            {
                "_id": "b2",
                "title": "Duct Cleaning",
                "jobNo": "JN-901",
                "customerName": "Gina Moss",
                "createdAt": "2024-08-03T10:00:00Z",
                "status": "in_process",
                "service": "AC"
            },
            {
                "_id": "b3",
                "title": "Mystery",
                "status": "archived"
            }
        ]
    })
}
