//! Integration tests for `plinth config`.
//!
//! Every test points `PLINTH_CONFIG` at a temp path so nothing touches
//! `~/.plinth/config.yaml`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn plinth() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("plinth"));
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Returns a `TempDir` and the path string for a config file inside it.
fn temp_config_path() -> (TempDir, String) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir
        .path()
        .join("config.yaml")
        .to_string_lossy()
        .into_owned();
    (dir, path)
}

// ---------------------------------------------------------------------------
// `plinth config show`
// ---------------------------------------------------------------------------

#[test]
fn test_config_help_shows_show_and_set_subcommands() {
    plinth()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("set"));
}

#[test]
fn test_config_show_without_file_uses_defaults() {
    let (_dir, path) = temp_config_path();
    plinth()
        .args(["config", "show"])
        .env("PLINTH_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("CDKToolkit"))
        .stdout(predicate::str::contains("false"));
}

#[test]
fn test_config_show_does_not_create_file() {
    let (_dir, path) = temp_config_path();
    plinth()
        .args(["config", "show"])
        .env("PLINTH_CONFIG", &path)
        .assert()
        .success();
    assert!(!std::path::Path::new(&path).exists());
}

#[test]
fn test_config_show_json_includes_path_and_config() {
    let (_dir, path) = temp_config_path();
    let output = plinth()
        .args(["--json", "config", "show"])
        .env("PLINTH_CONFIG", &path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["path"], path.as_str());
    assert_eq!(value["config"]["bootstrap"]["stack-name"], "CDKToolkit");
    assert_eq!(value["config"]["bootstrap"]["termination-protection"], false);
}

#[test]
fn test_config_show_rejects_corrupt_file() {
    let (_dir, path) = temp_config_path();
    std::fs::write(&path, "bootstrap: [unterminated").unwrap();
    plinth()
        .args(["config", "show"])
        .env("PLINTH_CONFIG", &path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot parse"));
}

// ---------------------------------------------------------------------------
// `plinth config set`
// ---------------------------------------------------------------------------

#[test]
fn test_config_set_stack_name_persists() {
    let (_dir, path) = temp_config_path();
    plinth()
        .args(["config", "set", "bootstrap.stack-name", "OrgToolkit"])
        .env("PLINTH_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Set bootstrap.stack-name = OrgToolkit"));

    plinth()
        .args(["config", "show"])
        .env("PLINTH_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("OrgToolkit"));
}

#[test]
fn test_config_set_termination_protection_persists() {
    let (_dir, path) = temp_config_path();
    plinth()
        .args(["config", "set", "bootstrap.termination-protection", "true"])
        .env("PLINTH_CONFIG", &path)
        .assert()
        .success();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("termination-protection: true"), "got: {content}");
}

#[test]
fn test_config_set_unknown_key_fails() {
    let (_dir, path) = temp_config_path();
    plinth()
        .args(["config", "set", "bootstrap.region", "eu-west-1"])
        .env("PLINTH_CONFIG", &path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown setting"));
    assert!(!std::path::Path::new(&path).exists());
}

#[test]
fn test_config_set_invalid_value_fails() {
    let (_dir, path) = temp_config_path();
    plinth()
        .args(["config", "set", "bootstrap.termination-protection", "maybe"])
        .env("PLINTH_CONFIG", &path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid value"));
}

#[test]
fn test_config_set_invalid_stack_name_fails() {
    let (_dir, path) = temp_config_path();
    plinth()
        .args(["config", "set", "bootstrap.stack-name", "1-starts-with-digit"])
        .env("PLINTH_CONFIG", &path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid value"));
}

#[cfg(unix)]
#[test]
fn test_config_set_writes_owner_only_file() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, path) = temp_config_path();
    plinth()
        .args(["config", "set", "aws.profile", "ops"])
        .env("PLINTH_CONFIG", &path)
        .assert()
        .success();
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
