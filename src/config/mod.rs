//! Configuration management for refund-form.
//!
//! Settings live in a TOML file in the platform config directory. A missing
//! file means defaults; `REFUND_FORM_BASE_URL` overrides the API base URL.

mod settings;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use settings::{ApiSettings, UiSettings};

/// Environment variable overriding `api.base_url`.
pub const BASE_URL_ENV: &str = "REFUND_FORM_BASE_URL";

/// Errors raised while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the configuration directory")]
    NoConfigDir,

    #[error("failed to create configuration directory: {0}")]
    CreateDirError(std::io::Error),

    #[error("failed to read configuration file: {0}")]
    ReadError(std::io::Error),

    #[error("failed to write configuration file: {0}")]
    WriteError(std::io::Error),

    #[error("failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("failed to serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The complete configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub api: ApiSettings,
    pub ui: UiSettings,
}

impl Config {
    /// Default location of the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("refund-form").join("config.toml"))
    }

    /// Load configuration from the default location, then apply environment
    /// overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&contents)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::CreateDirError)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(ConfigError::WriteError)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                debug!("Base URL overridden by {}", BASE_URL_ENV);
                self.api.base_url = url.trim().to_string();
            }
        }
    }

    /// Validate the whole configuration.
    pub fn validate(&self) -> Result<()> {
        self.api.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.api.base_url = "https://bookings.example.com/api".to_string();
        config.ui.notification_secs = 7;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui]\nnotification_secs = 10\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.ui.notification_secs, 10);
        assert_eq!(config.api, ApiSettings::default());
    }

    #[test]
    #[serial]
    fn test_env_overrides_base_url() {
        std::env::set_var(BASE_URL_ENV, "https://staging.example.com");
        let mut config = Config::default();
        config.apply_env();
        std::env::remove_var(BASE_URL_ENV);

        assert_eq!(config.api.base_url, "https://staging.example.com");
    }

    #[test]
    #[serial]
    fn test_blank_env_is_ignored() {
        std::env::set_var(BASE_URL_ENV, "  ");
        let mut config = Config::default();
        config.apply_env();
        std::env::remove_var(BASE_URL_ENV);

        assert_eq!(config.api.base_url, ApiSettings::default().base_url);
    }
}
