//! Tests for the YAML config store.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::PathBuf;

use plinth_cli::application::ports::ConfigStore;
use plinth_cli::domain::PlinthConfig;
use plinth_cli::infra::config::{CONFIG_PATH_ENV, YamlConfigStore};
use serial_test::serial;
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> (YamlConfigStore, PathBuf) {
    let path = dir.path().join("nested").join("config.yaml");
    (YamlConfigStore::at(&path), path)
}

// ── load ─────────────────────────────────────────────────────────────────────

#[test]
fn test_load_missing_file_returns_defaults() {
    let dir = TempDir::new().unwrap();
    let (store, path) = store_in(&dir);
    assert_eq!(store.load().unwrap(), PlinthConfig::default());
    assert!(!path.exists());
}

#[test]
fn test_load_blank_file_returns_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "\n  \n").unwrap();
    assert_eq!(YamlConfigStore::at(&path).load().unwrap(), PlinthConfig::default());
}

#[test]
fn test_load_invalid_yaml_names_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "bootstrap: [not, a, map").unwrap();
    let err = YamlConfigStore::at(&path).load().unwrap_err();
    assert!(err.to_string().contains("config.yaml"), "got: {err}");
}

#[test]
fn test_load_directory_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = YamlConfigStore::at(dir.path()).load().unwrap_err();
    assert!(err.to_string().contains("cannot read"), "got: {err}");
}

// ── save ─────────────────────────────────────────────────────────────────────

#[test]
fn test_save_creates_parent_dirs_and_round_trips() {
    let dir = TempDir::new().unwrap();
    let (store, path) = store_in(&dir);
    let mut cfg = PlinthConfig::default();
    cfg.set("aws.profile", "ops").unwrap();
    store.save(&cfg).unwrap();
    assert!(path.exists());
    assert_eq!(store.load().unwrap(), cfg);
}

#[test]
fn test_save_replaces_existing_file_without_leftovers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "stale: true\n").unwrap();
    let store = YamlConfigStore::at(&path);

    let mut cfg = PlinthConfig::default();
    cfg.set("bootstrap.stack-name", "Toolkit").unwrap();
    store.save(&cfg).unwrap();

    assert_eq!(store.load().unwrap(), cfg);
    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1, "staging file left behind");
}

#[cfg(unix)]
#[test]
fn test_save_restricts_permissions() {
    use std::os::unix::fs::PermissionsExt;
    let dir = TempDir::new().unwrap();
    let (store, path) = store_in(&dir);
    store.save(&PlinthConfig::default()).unwrap();
    let mode = std::fs::metadata(path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

// ── location ─────────────────────────────────────────────────────────────────

#[test]
fn test_pinned_path_is_reported() {
    let dir = TempDir::new().unwrap();
    let (store, path) = store_in(&dir);
    assert_eq!(store.path().unwrap(), path);
}

#[test]
#[serial]
#[allow(unsafe_code)]
fn test_default_store_honours_env_override() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("from-env.yaml");
    // SAFETY: the only test touching this variable, and it runs serially.
    unsafe { std::env::set_var(CONFIG_PATH_ENV, &path) };
    let resolved = YamlConfigStore::new().path();
    unsafe { std::env::remove_var(CONFIG_PATH_ENV) };
    assert_eq!(resolved.unwrap(), path);
}
