//! Integration tests for `plinth template-version`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn plinth() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("plinth"));
    cmd.env("NO_COLOR", "1");
    cmd
}

fn write_template(dir: &TempDir, name: &str, body: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, body).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_template_version_reads_output_marker() {
    let dir = TempDir::new().unwrap();
    let path = write_template(
        &dir,
        "bootstrap.json",
        r#"{"Outputs": {"BootstrapVersion": {"Value": "21"}}}"#,
    );
    plinth()
        .args(["template-version", &path])
        .assert()
        .success()
        .stdout("21\n");
}

#[test]
fn test_template_version_reads_resource_marker_from_yaml() {
    let dir = TempDir::new().unwrap();
    let path = write_template(
        &dir,
        "bootstrap.yaml",
        "Resources:\n  CdkBootstrapVersion:\n    Type: AWS::SSM::Parameter\n    Properties:\n      Type: String\n      Value: 14\n",
    );
    plinth()
        .args(["template-version", &path])
        .assert()
        .success()
        .stdout("14\n");
}

#[test]
fn test_template_version_without_markers_is_zero() {
    let dir = TempDir::new().unwrap();
    let path = write_template(&dir, "plain.json", r#"{"Resources": {}}"#);
    plinth()
        .args(["template-version", &path])
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn test_template_version_json_output() {
    let dir = TempDir::new().unwrap();
    let path = write_template(
        &dir,
        "bootstrap.json",
        r#"{"Outputs": {"BootstrapVersion": {"Value": 6}}}"#,
    );
    let output = plinth()
        .args(["--json", "template-version", &path])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["version"], 6);
    assert_eq!(value["template"], path.as_str());
}

#[test]
fn test_template_version_missing_file_fails() {
    plinth()
        .args(["template-version", "/nonexistent/bootstrap.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot read template"));
}

#[test]
fn test_template_version_rejects_non_mapping() {
    let dir = TempDir::new().unwrap();
    let path = write_template(&dir, "list.json", "[1, 2, 3]");
    plinth()
        .args(["template-version", &path])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("mapping"));
}
