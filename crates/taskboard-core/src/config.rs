//! Client Configuration
//!
//! The browser has no process environment, so overrides are baked in at
//! compile time.

/// Backend base URL used when `TASKBOARD_API_URL` is not set at build time
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Connection settings for [`crate::ApiClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// Build from `TASKBOARD_API_URL` captured at compile time
    pub fn from_env() -> Self {
        Self::new(option_env!("TASKBOARD_API_URL").unwrap_or(DEFAULT_API_URL))
    }

    /// Join an endpoint path (`/tasks/`, `tasks/3/`) onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
