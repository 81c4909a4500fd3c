//! Integration tests for layered configuration.
//!
//! These tests verify defaults, TOML file parsing, environment variable
//! overrides and CLI flag overrides.

use clap::Parser;
use stringsweep::cli::Cli;
use stringsweep::config::Settings;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::tempdir;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Clear all STRINGSWEEP_* environment variables to avoid interference.
fn clear_env() {
    for (key, _) in std::env::vars() {
        if key.starts_with("STRINGSWEEP_") {
            std::env::remove_var(key);
        }
    }
}

#[test]
fn test_missing_file_gives_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();

    let settings = Settings::load(Some(dir.path().join("absent.toml").as_path())).unwrap();

    assert_eq!(settings, Settings::default());
}

#[test]
fn test_toml_file_overrides_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
api_key = "file-key"
extensions = ["php", "js", "ts"]
backup_suffix = ".orig"
request_timeout_secs = 30
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(path.as_path())).unwrap();

    assert_eq!(settings.api_key.as_deref(), Some("file-key"));
    assert_eq!(settings.extensions, vec!["php", "js", "ts"]);
    assert_eq!(settings.backup_suffix, ".orig");
    assert_eq!(settings.request_timeout_secs, Some(30));
    assert_eq!(settings.log_file, PathBuf::from("translation_script.log"));
}

#[test]
fn test_env_overrides_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "backup_suffix = \".orig\"\nlog_file = \"file.log\"\n").unwrap();
    std::env::set_var("STRINGSWEEP_BACKUP_SUFFIX", ".before");

    let settings = Settings::load(Some(path.as_path()));
    clear_env();
    let settings = settings.unwrap();

    assert_eq!(settings.backup_suffix, ".before");
    assert_eq!(settings.log_file, PathBuf::from("file.log"));
}

#[test]
fn test_cli_overrides_everything() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "api_key = \"file-key\"\nlog_file = \"file.log\"\n").unwrap();

    let cli = Cli::try_parse_from([
        "stringsweep",
        "site",
        "da",
        "--api-key",
        "cli-key",
        "--log-file",
        "cli.log",
    ])
    .unwrap();
    let mut settings = Settings::load(Some(path.as_path())).unwrap();
    settings.apply_cli(&cli);

    assert_eq!(settings.api_key.as_deref(), Some("cli-key"));
    assert_eq!(settings.log_file, PathBuf::from("cli.log"));
}

#[test]
fn test_wrong_type_is_an_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "extensions = 5\n").unwrap();

    assert!(Settings::load(Some(path.as_path())).is_err());
}

#[test]
fn test_malformed_toml_is_an_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "api_key = \n[[[").unwrap();

    assert!(Settings::load(Some(path.as_path())).is_err());
}
