use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub paging: PagingConfig,
    #[serde(default)]
    pub attachments: AttachmentConfig,
    #[serde(default = "default_entities")]
    pub entities: Vec<EntityConfig>,
}

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API origin, e.g. "https://legal.example.org/api".
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// List paging defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagingConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

/// Client-side attachment policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentConfig {
    /// Per-file ceiling in megabytes (default: 10).
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,
    /// Allowed MIME type -> file extension.
    #[serde(default = "default_allowed_types")]
    pub allowed_types: BTreeMap<String, String>,
}

/// One workflow entity and the base path of its endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityConfig {
    /// Identifier used on the command line (e.g., "observation").
    pub name: String,
    /// Endpoint prefix (e.g., "/Observation").
    pub base_path: String,
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_page_size() -> u32 {
    10
}

fn default_max_file_size_mb() -> u64 {
    10
}

fn default_allowed_types() -> BTreeMap<String, String> {
    [
        ("application/pdf", "pdf"),
        ("application/msword", "doc"),
        (
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            "docx",
        ),
        ("application/vnd.ms-excel", "xls"),
        (
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            "xlsx",
        ),
        ("image/png", "png"),
        ("image/jpeg", "jpg"),
    ]
    .into_iter()
    .map(|(mime, ext)| (mime.to_string(), ext.to_string()))
    .collect()
}

fn default_entities() -> Vec<EntityConfig> {
    // Both entities are served by the same controller on the backend.
    vec![
        EntityConfig {
            name: "observation".to_string(),
            base_path: "/Observation".to_string(),
        },
        EntityConfig {
            name: "article".to_string(),
            base_path: "/Observation".to_string(),
        },
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            paging: PagingConfig::default(),
            attachments: AttachmentConfig::default(),
            entities: default_entities(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
        }
    }
}

impl Default for AttachmentConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: default_max_file_size_mb(),
            allowed_types: default_allowed_types(),
        }
    }
}
