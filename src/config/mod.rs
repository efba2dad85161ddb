//! Configuration loading and validation.
//!
//! A single TOML file plus one environment override for the API origin.

mod loader;
mod types;

pub use loader::{ConfigError, API_URL_ENV};
pub use types::{ApiConfig, AttachmentConfig, Config, EntityConfig, PagingConfig};
