//! Integration tests for configuration file discovery and graceful degradation
//!
//! Tests that manipulate CHARTLIST_CONFIG are marked with #[serial] so they
//! never run in parallel with each other.

use chartlist_common::config::{
    config_file_path, load_toml_config, read_toml_config, ConfigSource, ServerConfig,
    ServerOverrides, CONFIG_ENV_VAR,
};
use chartlist_common::Error;
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
#[serial]
fn test_explicit_path_wins_over_env_var() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/from-env.toml");

    let explicit = PathBuf::from("/tmp/explicit.toml");
    let path = config_file_path(Some(&explicit));
    assert_eq!(path, Some(explicit));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_env_var_wins_over_platform_default() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/from-env.toml");

    let path = config_file_path(None);
    assert_eq!(path, Some(PathBuf::from("/tmp/from-env.toml")));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    let (toml, source) = load_toml_config(Some(&missing));
    assert!(matches!(source, ConfigSource::Missing(ref p) if *p == missing));
    let config = ServerConfig::resolve(ServerOverrides::default(), &toml);

    assert_eq!(config.port, 8000);
    assert_eq!(config.log_level, "info");
}

#[test]
#[serial]
fn test_malformed_file_is_ignored() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is [not toml").unwrap();

    assert!(read_toml_config(&path).is_err());

    let (toml, source) = load_toml_config(Some(&path));
    assert!(toml.server.port.is_none());
    assert!(toml.log_level.is_none());

    // The parse error is handed back so it can be logged after tracing init
    match source {
        ConfigSource::Ignored(ignored, Error::Config(msg)) => {
            assert_eq!(ignored, path);
            assert!(msg.contains("config.toml"));
        }
        other => panic!("expected an ignored config file, got {other:?}"),
    }
}

#[test]
#[serial]
fn test_unreadable_file_is_ignored() {
    let dir = TempDir::new().unwrap();

    // A directory exists but cannot be read as a file
    let (toml, source) = load_toml_config(Some(dir.path()));
    assert!(toml.server.host.is_none());
    assert!(matches!(source, ConfigSource::Ignored(_, Error::Io(_))));
}

#[test]
#[serial]
fn test_file_from_env_var_is_loaded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
        [server]
        host = "0.0.0.0"
        port = 8123

        [crawler]
        timeout_secs = 5
        "#,
    )
    .unwrap();
    env::set_var(CONFIG_ENV_VAR, &path);

    let (toml, source) = load_toml_config(None);
    assert!(matches!(source, ConfigSource::Loaded(ref p) if *p == path));
    assert_eq!(toml.server.host.as_deref(), Some("0.0.0.0"));
    assert_eq!(toml.server.port, Some(8123));
    assert_eq!(toml.crawler.timeout_secs, Some(5));

    env::remove_var(CONFIG_ENV_VAR);
}
