use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

use super::common::setup_project;

/// Contract tests for `uvt env`

#[test]
fn test_env_lists_variables() {
    let temp_dir = setup_project();
    fs::write(temp_dir.path().join(".env.local"), "PKG_NAME=override\nEXTRA=1\n").unwrap();

    let mut cmd = Command::cargo_bin("uvt").unwrap();
    cmd.current_dir(&temp_dir)
        .arg("env")
        .assert()
        .success()
        .stdout(predicate::str::contains("PKG_NAME=override"))
        .stdout(predicate::str::contains("EXTRA=1"))
        .stdout(predicate::str::contains(".env.local"));
}

#[test]
fn test_env_redacts_secrets() {
    let temp_dir = setup_project();
    fs::write(temp_dir.path().join(".env.secret"), "PYPI_TOKEN=pypi-abc123\n").unwrap();

    let mut cmd = Command::cargo_bin("uvt").unwrap();
    cmd.current_dir(&temp_dir)
        .arg("env")
        .assert()
        .success()
        .stdout(predicate::str::contains("PYPI_TOKEN=<redacted>"))
        .stdout(predicate::str::contains("pypi-abc123").not());

    let mut cmd = Command::cargo_bin("uvt").unwrap();
    cmd.current_dir(&temp_dir)
        .args(["env", "--show-values"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PYPI_TOKEN=pypi-abc123"));
}

#[test]
fn test_env_json() {
    let temp_dir = setup_project();

    let output = Command::cargo_bin("uvt")
        .unwrap()
        .current_dir(&temp_dir)
        .args(["env", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["variables"]["PKG_NAME"], "demo");
}

#[test]
fn test_env_without_files() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("uvt").unwrap();
    cmd.current_dir(&temp_dir)
        .arg("env")
        .assert()
        .success()
        .stdout(predicate::str::contains("No files matching '.env*'"));
}
