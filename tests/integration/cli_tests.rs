//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn cmd() -> Command {
    Command::cargo_bin("sketchsmell").expect("binary builds")
}

#[test]
fn test_compact_output_contains_rule_codes() {
    cmd()
        .arg(fixtures_path().join("sketches/smelly"))
        .args(["--quiet", "--format", "compact"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PS001"))
        .stdout(predicate::str::contains("PS002"))
        .stdout(predicate::str::contains("PS005"));
}

#[test]
fn test_json_output_is_valid() {
    let output = cmd()
        .arg(fixtures_path().join("sketches/smelly"))
        .args(["--quiet", "--format", "json"])
        .output()
        .expect("command runs");
    assert!(output.status.success());

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is valid JSON");
    let smells = parsed["smells"].as_array().expect("smells array");
    assert!(!smells.is_empty());
    assert!(smells.iter().any(|s| s["code"] == "PS001"));
}

#[test]
fn test_clean_sketch_reports_nothing() {
    cmd()
        .arg(fixtures_path().join("sketches/bouncing"))
        .args(["--quiet", "--format", "compact"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_empty_directory_handled() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .arg(dir.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("No Processing or Java files found"));
}

#[test]
fn test_detect_filter_limits_rules() {
    cmd()
        .arg(fixtures_path().join("sketches/smelly"))
        .args(["--quiet", "--format", "compact", "--detect", "PS006"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PS006"))
        .stdout(predicate::str::contains("PS001").not());
}

#[test]
fn test_min_severity_filter() {
    // PS004 and PS006 are info-level; filtering at warning drops them
    cmd()
        .arg(fixtures_path().join("sketches/smelly"))
        .args(["--quiet", "--format", "compact", "--min-severity", "warning"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PS004").not())
        .stdout(predicate::str::contains("PS001"));
}

#[test]
fn test_completions_generated() {
    cmd()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sketchsmell"));
}
