//! Field-service job desk
//!
//! This library provides the job query engine behind the dispatch
//! dashboard (service/status/search filtering, relevance ranking and
//! pagination) along with the service that keeps an in-memory snapshot
//! of jobs fetched from the upstream backend and exposes it over HTTP.

pub mod app_state;
pub mod config;
pub mod models;
pub mod routes;
pub mod services;
