//! Integration tests for `plinth bootstrap` failure paths that stop before
//! any AWS call.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `plinth` command with its config isolated in `dir`.
fn plinth(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("plinth"));
    cmd.env("NO_COLOR", "1")
        .env("PLINTH_CONFIG", dir.path().join("config.yaml"))
        .env_remove("PLINTH_PROFILE");
    cmd
}

#[test]
fn test_bootstrap_missing_template_fails_with_path() {
    let dir = TempDir::new().unwrap();
    plinth(&dir)
        .args(["bootstrap", "--template", "/nonexistent/bootstrap.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error: "))
        .stderr(predicate::str::contains("/nonexistent/bootstrap.json"));
}

#[test]
fn test_bootstrap_missing_template_json_error() {
    let dir = TempDir::new().unwrap();
    let output = plinth(&dir)
        .args(["--json", "bootstrap", "--template", "/nonexistent/bootstrap.json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["error"], true);
    assert_eq!(value["code"], "ERROR");
    assert!(
        value["message"]
            .as_str()
            .unwrap()
            .contains("cannot read template")
    );
}

#[test]
fn test_bootstrap_rejects_invalid_stack_name() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("t.json");
    std::fs::write(&template, r#"{"Resources": {}}"#).unwrap();
    plinth(&dir)
        .args(["bootstrap", "--template"])
        .arg(&template)
        .args(["--stack-name", "not_valid!"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid stack name"));
}

#[test]
fn test_bootstrap_rejects_unparseable_template() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("t.json");
    std::fs::write(&template, "{ not: [valid").unwrap();
    plinth(&dir)
        .args(["bootstrap", "--template"])
        .arg(&template)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot load template"));
}
