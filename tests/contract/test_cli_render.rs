use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

use super::common::setup_project;

/// Contract tests for `uvt render`

#[test]
fn test_render_to_stdout_writes_nothing() {
    let temp_dir = setup_project();

    let mut cmd = Command::cargo_bin("uvt").unwrap();
    cmd.current_dir(&temp_dir)
        .args(["render", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("name = \"demo\""));

    assert!(!temp_dir.path().join("pyproject.toml").exists());
}

#[test]
fn test_render_writes_output_file() {
    let temp_dir = setup_project();

    let mut cmd = Command::cargo_bin("uvt").unwrap();
    cmd.current_dir(&temp_dir)
        .arg("render")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let content = fs::read_to_string(temp_dir.path().join("pyproject.toml")).unwrap();
    assert!(content.contains("name = \"demo\""));
}

#[test]
fn test_render_reports_unresolved() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("pyproject_template.toml"),
        "x = \"{env:UVT_SURELY_UNSET_VARIABLE}\"\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("uvt").unwrap();
    cmd.current_dir(&temp_dir)
        .env_remove("UVT_SURELY_UNSET_VARIABLE")
        .arg("render")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unresolved placeholders: UVT_SURELY_UNSET_VARIABLE"));

    let content = fs::read_to_string(temp_dir.path().join("pyproject.toml")).unwrap();
    assert_eq!(content, "x = \"{env:UVT_SURELY_UNSET_VARIABLE}\"\n");
}

#[test]
fn test_render_json_report() {
    let temp_dir = setup_project();

    let output = Command::cargo_bin("uvt")
        .unwrap()
        .current_dir(&temp_dir)
        .args(["render", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["resolved"][0]["name"], "PKG_NAME");
    assert_eq!(report["resolved"][0]["source"], "env_file");
    assert_eq!(report["unresolved"].as_array().unwrap().len(), 0);
    assert_eq!(report["env_files"].as_array().unwrap().len(), 1);
}

#[test]
fn test_render_custom_names() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("tpl.toml"), "v = \"{env.V}\"\n").unwrap();
    fs::write(temp_dir.path().join(".env"), "V=1\n").unwrap();

    let mut cmd = Command::cargo_bin("uvt").unwrap();
    cmd.current_dir(&temp_dir)
        .args(["--template", "tpl.toml", "--output", "out.toml", "render"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp_dir.path().join("out.toml")).unwrap(),
        "v = \"1\"\n"
    );
}

#[test]
fn test_render_missing_template() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("uvt").unwrap();
    cmd.current_dir(&temp_dir)
        .arg("render")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Template file not found"));
}
