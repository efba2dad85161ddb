mod common;

use common::temp_config;
use obsdesk::config::{Config, ConfigError};

/// Test that Config::default() produces the expected values.
#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.api.base_url, "http://localhost:5000/api");
    assert_eq!(config.api.timeout_seconds, 30);
    assert_eq!(config.api.connect_timeout_seconds, 5);
    assert_eq!(config.paging.default_page_size, 10);
    assert_eq!(config.attachments.max_file_size_mb, 10);
    assert_eq!(
        config.attachments.allowed_types.get("application/pdf").map(String::as_str),
        Some("pdf")
    );

    let names: Vec<&str> = config.entities.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["observation", "article"]);
    assert!(config.entities.iter().all(|e| e.base_path == "/Observation"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("obsdesk/config.toml"));
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let (_dir, path) = temp_config(
        r#"
[api]
base_url = "https://legal.example.org/api"

[attachments]
max_file_size_mb = 25
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.api.base_url, "https://legal.example.org/api");
    assert_eq!(config.api.timeout_seconds, 30);
    assert_eq!(config.attachments.max_file_size_mb, 25);
    assert_eq!(config.attachments.allowed_types.len(), 7);
    assert_eq!(config.entities.len(), 2);
}

#[test]
fn test_custom_entities() {
    let (_dir, path) = temp_config(
        r#"
[[entities]]
name = "article"
base_path = "/Article"
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.entity("article").unwrap().base_path, "/Article");
    assert!(matches!(
        config.entity("observation"),
        Err(ConfigError::UnknownEntity { .. })
    ));
}

#[test]
fn test_parse_error_names_file() {
    let (_dir, path) = temp_config("[api\nbase_url = 1");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn test_env_override_replaces_base_url() {
    let mut config = Config::default();
    config.apply_api_url_override(Some(" https://staging.example.org/api ".to_string()));
    assert_eq!(config.api.base_url, "https://staging.example.org/api");

    config.apply_api_url_override(Some("   ".to_string()));
    assert_eq!(config.api.base_url, "https://staging.example.org/api");

    config.apply_api_url_override(None);
    assert_eq!(config.api.base_url, "https://staging.example.org/api");
}

#[test]
fn test_validation_rejects_bad_values() {
    let mut config = Config::default();
    config.api.base_url = "ftp://files".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.paging.default_page_size = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.entities[1].name = "observation".to_string();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("Duplicate entity name"));

    let mut config = Config::default();
    config.entities[0].base_path = "Observation".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.entities.clear();
    assert!(config.validate().is_err());
}
