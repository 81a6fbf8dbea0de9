use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Server bind address (e.g., "0.0.0.0:3000").
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Base URL of the job backend REST API
    pub backend_url: String,

    /// Bearer token for the job backend, if it requires one
    #[serde(default)]
    pub backend_token: Option<String>,

    /// Rows per page when a request does not ask for a size
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Upper bound on the page size a request may ask for
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,

    /// Seconds between background refreshes; 0 disables them
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Timeout for backend requests
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_page_size() -> usize {
    10
}

fn default_max_page_size() -> usize {
    100
}

fn default_refresh_interval_secs() -> u64 {
    300
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl AppConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_secs > 0).then(|| Duration::from_secs(self.refresh_interval_secs))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
