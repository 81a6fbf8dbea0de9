pub mod backend;
pub mod facets;
pub mod job_store;
pub mod payments;
pub mod query_engine;
pub mod refresh;
