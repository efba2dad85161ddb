use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::{Config, EntityConfig};

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "OBSDESK_API_URL";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },

    #[error("Entity '{name}' not found in config")]
    UnknownEntity { name: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/obsdesk/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("obsdesk").join("config.toml")
    }

    /// Loads configuration from the default config file, then applies the
    /// environment override.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_api_url_override(std::env::var(API_URL_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parses the TOML file at `path`; a missing file means defaults.
    ///
    /// Does not validate; call [`Config::validate`] after applying overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }

    /// Replaces `api.base_url` when `value` is set and non-blank.
    pub fn apply_api_url_override(&mut self, value: Option<String>) {
        if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
            tracing::debug!(base_url = %url, "API base URL overridden");
            self.api.base_url = url.trim().to_string();
        }
    }

    /// Looks up an entity by name.
    pub fn entity(&self, name: &str) -> Result<&EntityConfig, ConfigError> {
        self.entities
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| ConfigError::UnknownEntity {
                name: name.to_string(),
            })
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The base URL is an http(s) URL
    /// - Page size and file size ceiling are positive
    /// - At least one entity is configured, names are unique and base
    ///   paths are absolute
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.api.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::ValidationError {
                message: format!("api.base_url '{}' must start with http:// or https://", base),
            });
        }

        if self.paging.default_page_size == 0 {
            return Err(ConfigError::ValidationError {
                message: "paging.default_page_size must be greater than zero".to_string(),
            });
        }

        if self.attachments.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError {
                message: "attachments.max_file_size_mb must be greater than zero".to_string(),
            });
        }

        if self.entities.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "At least one entity must be configured".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for entity in &self.entities {
            if !seen.insert(entity.name.as_str()) {
                return Err(ConfigError::ValidationError {
                    message: format!("Duplicate entity name '{}'", entity.name),
                });
            }
            if !entity.base_path.starts_with('/') {
                return Err(ConfigError::ValidationError {
                    message: format!(
                        "Entity '{}' base_path must start with '/'",
                        entity.name
                    ),
                });
            }
        }

        Ok(())
    }
}
