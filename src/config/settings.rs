//! Application settings configuration.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// Connection settings for the refunds API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL the `/refunds` path is appended to.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Keyring account the API token is stored under.
    pub token_account: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            timeout_secs: 30,
            token_account: "default".to_string(),
        }
    }
}

impl ApiSettings {
    /// Validate these settings.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` describing the first problem.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "api.base_url cannot be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("https://") && !self.base_url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "api.base_url '{}' must start with http:// or https://",
                self.base_url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.token_account.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "api.token_account cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Terminal UI settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UiSettings {
    /// How long toast notifications stay on screen, in seconds.
    pub notification_secs: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            notification_secs: 4,
        }
    }
}
