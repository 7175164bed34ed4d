use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    pub endpoint: String,
    pub timeout: Duration,
    /// Maximum number of search hits requested per lookup.
    ///
    /// Hierarchy lookups only see these hits, so a location whose name is
    /// shared by many other entities can be missed when this is too small.
    pub search_page_size: u32,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/graph/query".to_string(),
            timeout: Duration::from_secs(30),
            search_page_size: 10,
        }
    }
}

impl InventoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_search_page_size(mut self, search_page_size: u32) -> Self {
        self.search_page_size = search_page_size;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.is_empty() {
            return Err("Endpoint cannot be empty".to_string());
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err("Endpoint must start with http:// or https://".to_string());
        }

        if self.timeout.is_zero() {
            return Err("Timeout must be greater than 0".to_string());
        }

        if self.search_page_size == 0 {
            return Err("Search page size must be greater than 0".to_string());
        }

        Ok(())
    }
}
