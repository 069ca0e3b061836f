//! Config loading and path resolution

use std::fs;
use std::path::PathBuf;

use serial_test::serial;
use tempfile::TempDir;

use store_review_monitor::config::{ConfigError, MonitorConfig};
use store_review_monitor::core::services::RetentionPolicy;
use store_review_monitor::paths;

/// Helper to create an empty temp directory and cd into it
fn setup_workdir() -> TempDir {
    let temp = TempDir::new().unwrap();
    std::env::set_current_dir(temp.path()).unwrap();
    temp
}

#[test]
fn test_load_reports_missing_file() {
    let temp = TempDir::new().unwrap();
    let err = MonitorConfig::load(&temp.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_load_reports_parse_error_with_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.toml");
    fs::write(&path, "[app_store\napp_id = 1").unwrap();

    let err = MonitorConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("bad.toml"));
}

#[test]
fn test_load_explicit_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("monitor.toml");
    fs::write(
        &path,
        "retention = \"drop\"\n\n[notifications]\noutbox = \"out.jsonl\"\n\n[outputs]\npath = \"env.json\"\n",
    )
    .unwrap();

    let config = MonitorConfig::load_or_default(Some(&path)).unwrap();
    assert_eq!(config.retention, RetentionPolicy::Drop);
    assert_eq!(config.notifications.outbox, Some(PathBuf::from("out.jsonl")));
    assert_eq!(config.outputs.path, Some(PathBuf::from("env.json")));
}

#[test]
#[serial(cwd)]
fn test_defaults_without_config_file() {
    let _temp = setup_workdir();

    let config = MonitorConfig::load_or_default(None).unwrap();
    assert_eq!(config, MonitorConfig::default());
    assert!(config.notifications.outbox.is_none());
}

#[test]
#[serial(cwd)]
fn test_config_file_in_working_directory_is_picked_up() {
    let temp = setup_workdir();
    fs::write(
        temp.path().join(paths::CONFIG_FILE),
        "[google_play]\npackage_name = \"com.example.app\"\n",
    )
    .unwrap();

    let config = MonitorConfig::load_or_default(None).unwrap();
    assert_eq!(config.google_play.package_name.as_deref(), Some("com.example.app"));
}

#[test]
fn test_default_cache_path_uses_cache_filename() {
    let config = MonitorConfig::default();
    let path = config.cache_path();
    assert_eq!(path.file_name().unwrap(), paths::CACHE_FILE);
    assert_eq!(path, paths::default_cache_path());
}

#[test]
fn test_explicit_cache_path_wins() {
    let config = MonitorConfig::parse("cache_path = \"/data/versions.json\"").unwrap();
    assert_eq!(config.cache_path(), PathBuf::from("/data/versions.json"));
}
