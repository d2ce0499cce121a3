//! Integration tests for configuration loading and validation

use chatrelay_core::config::{load_from_yaml, ConfigError, RelayConfig, DEFAULT_MODEL};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a test config file
fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_yaml_with_interpolated_key() {
    std::env::set_var("CHATRELAY_TEST_YAML_KEY", "gsk_from_env");

    let yaml = r#"
upstream:
  url: https://api.groq.com/openai/v1/chat/completions
  api_key: ${CHATRELAY_TEST_YAML_KEY}
  timeout_secs: 15
generation:
  max_tokens: 256
server:
  port: 9000
audit:
  path: logs/api.log
"#;

    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "chatrelay.yaml", yaml);

    let config = load_from_yaml(path).unwrap();
    assert_eq!(config.upstream.api_key.expose_secret(), "gsk_from_env");
    assert_eq!(config.upstream.timeout_secs, 15);
    assert_eq!(config.generation.model, DEFAULT_MODEL);
    assert_eq!(config.generation.max_tokens, 256);
    assert_eq!(config.server.bind_address(), "0.0.0.0:9000");
    assert_eq!(config.audit.path, Some(PathBuf::from("logs/api.log")));
}

#[test]
fn test_unresolved_placeholder_is_reported() {
    let yaml = r#"
upstream:
  url: https://api.groq.com/openai/v1/chat/completions
  api_key: ${CHATRELAY_TEST_DEFINITELY_UNSET}
"#;

    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "chatrelay.yaml", yaml);

    match load_from_yaml(path) {
        Err(ConfigError::EnvVarNotFound { var }) => {
            assert_eq!(var, "CHATRELAY_TEST_DEFINITELY_UNSET")
        }
        other => panic!("expected EnvVarNotFound, got {:?}", other),
    }
}

#[test]
fn test_unknown_field_is_parse_error() {
    let yaml = r#"
upstream:
  url: https://api.groq.com/openai/v1/chat/completions
  api_key: gsk_literal
  retries: 3
"#;

    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "chatrelay.yaml", yaml);

    assert!(matches!(
        load_from_yaml(path),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn test_invalid_url_fails_validation() {
    let yaml = r#"
upstream:
  url: not a url
  api_key: gsk_literal
"#;

    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "chatrelay.yaml", yaml);

    assert!(matches!(
        load_from_yaml(path),
        Err(ConfigError::Validation(_))
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = load_from_yaml(dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(ConfigError::IoError { .. })));
}

#[test]
fn test_environment_requires_url_and_key() {
    let vars: HashMap<&str, &str> =
        HashMap::from([("GROQ_API_URL", "https://api.groq.com/openai/v1/chat/completions")]);

    match RelayConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())) {
        Err(ConfigError::Missing { var }) => assert_eq!(var, "GROQ_API_KEY"),
        other => panic!("expected Missing, got {:?}", other),
    }
}

#[test]
fn test_environment_overrides() {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("GROQ_API_URL", "https://api.groq.com/openai/v1/chat/completions"),
        ("GROQ_API_KEY", "gsk_env"),
        ("CHATRELAY_MODEL", "llama3-70b-8192"),
        ("CHATRELAY_PORT", "8080"),
        ("CHATRELAY_AUDIT_LOG", ""),
    ]);

    let config = RelayConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();
    assert_eq!(config.generation.model, "llama3-70b-8192");
    assert_eq!(config.server.port, 8080);
    assert!(config.audit.path.is_none());
}
