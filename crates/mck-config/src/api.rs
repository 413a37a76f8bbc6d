//! MindCare API endpoint configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default API root (the hosted MindCare backend).
fn default_base_url() -> String {
    "https://mindcare-backend-1diu.onrender.com/api".to_string()
}

/// Default per-request timeout.
const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// API root URL. Request paths begin with `/`, so no trailing slash here.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds. Applies to every call; there are no retries.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// The base URL with any trailing slashes removed.
    #[must_use]
    pub fn normalized_base_url(&self) -> String {
        self.base_url.trim_end_matches('/').to_string()
    }

    /// Validate field values after extraction.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the base URL is empty or the
    /// timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
