//! Configuration loading.

use std::collections::HashMap;
use std::io::Write;

use atelier_core::config::StorefrontConfig;
use atelier_core::errors::StorefrontError;

#[test]
fn empty_toml_gives_defaults() {
    let config = StorefrontConfig::from_toml("").unwrap();
    assert_eq!(config.server.bind_address(), "127.0.0.1:8080");
    assert_eq!(config.storage.db_path, "atelier.db");
    assert_eq!(config.admin.session_hours, 24);
    assert_eq!(config.admin.password, None);
    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config = StorefrontConfig::from_toml(
        r#"
        [server]
        port = 9000

        [admin]
        password = "letmein"
        "#,
    )
    .unwrap();
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.admin.signing_secret(), Some("letmein"));
}

#[test]
fn env_overrides_admin_section() {
    let mut config = StorefrontConfig::from_toml("[admin]\npassword = \"file\"").unwrap();
    let env: HashMap<&str, &str> = [
        ("ADMIN_PASSWORD", "env-pass"),
        ("ADMIN_SESSION_SECRET", "env-secret"),
    ]
    .into_iter()
    .collect();
    config
        .admin
        .apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));
    assert_eq!(config.admin.password.as_deref(), Some("env-pass"));
    assert_eq!(config.admin.signing_secret(), Some("env-secret"));
}

#[test]
fn missing_file_is_defaults_malformed_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorefrontConfig::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.server.port, 8080);

    let path = dir.path().join("bad.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "[server\nport = ").unwrap();
    assert!(matches!(
        StorefrontConfig::load(&path),
        Err(StorefrontError::Config(_))
    ));
}

#[test]
fn in_memory_database_path() {
    let config = StorefrontConfig::from_toml("[storage]\ndb_path = \":memory:\"").unwrap();
    assert!(config.storage.is_in_memory());
}
