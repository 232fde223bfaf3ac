//! Integration tests for the CLI interface
//!
//! Tests the fnkit binary end to end: demo output, path updates, and exit
//! codes for invalid input

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

/// A command with demo delays zeroed so tests stay fast
fn fnkit() -> Command {
    let mut cmd = Command::cargo_bin("fnkit").unwrap();
    cmd.env("FNKIT_DEBOUNCE_MS", "0")
        .env("FNKIT_FETCH_LATENCY_MS", "0")
        .env_remove("FNKIT_LOG_LEVEL");
    cmd
}

fn json_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}

#[test]
fn test_cli_help_flag() {
    fnkit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_invalid_command() {
    fnkit()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_demo_prints_every_section() {
    fnkit()
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. ARRAY METHODS"))
        .stdout(predicate::str::contains("composed(5): 20"))
        .stdout(predicate::str::contains("piped(5): 20"))
        .stdout(predicate::str::contains("new city: Boston (was New York)"))
        .stdout(predicate::str::contains(r#"users by city: {"New York":["John"]}"#))
        .stdout(predicate::str::contains("5. COMPONENTS"))
        .stdout(predicate::str::contains("item: iPhone $999 In Stock"))
        .stdout(predicate::str::contains(
            r#"form submitted: {"name":"John","email":"john@example.com"}"#,
        ))
        .stdout(predicate::str::contains("Debounced: test debounce"));
}

#[test]
fn test_default_command_is_demo() {
    fnkit()
        .assert()
        .success()
        .stdout(predicate::str::contains("6. PRACTICE"));
}

#[test]
fn test_demo_json_output() {
    let output = fnkit().args(["demo", "--json"]).output().unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["functions"]["composed"], 20);
    assert_eq!(report["practice"]["users_by_city"]["New York"][0], "John");
    assert_eq!(report["array_methods"]["total_price"], 3121.0);
    assert_eq!(report["components"]["searched"]["query"]["order"], "desc");
    assert_eq!(report["practice"]["submitted_form"]["email"], "john@example.com");
}

#[test]
fn test_update_from_file() {
    let input = json_file(r#"{"name": "John Doe", "address": {"city": "New York", "zip": "10001"}}"#);

    let output = fnkit()
        .args(["update", "--path", "address.city", "--value", r#""Boston""#, "--input"])
        .arg(input.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let updated: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        updated,
        serde_json::json!({"name": "John Doe", "address": {"city": "Boston", "zip": "10001"}})
    );
}

#[test]
fn test_update_from_stdin() {
    fnkit()
        .args(["update", "--path", "items.0", "--value", "42"])
        .write_stdin(r#"{"items": [1, 2, 3]}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("42"));
}

#[test]
fn test_update_leading_zero_key_is_a_field() {
    let output = fnkit()
        .args(["update", "--path", "codes.007", "--value", r#""james""#])
        .write_stdin(r#"{"codes": {"007": "bond"}}"#)
        .output()
        .unwrap();
    assert!(output.status.success());

    let updated: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(updated, serde_json::json!({"codes": {"007": "james"}}));
}

#[test]
fn test_update_invalid_path_exit_code() {
    fnkit()
        .args(["update", "--path", "a.b", "--value", "2"])
        .write_stdin(r#"{"a": 1}"#)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("[E2001]"))
        .stderr(predicate::str::contains("Invalid path 'a.b'"));
}

#[test]
fn test_update_rejects_malformed_value() {
    fnkit()
        .args(["update", "--path", "a", "--value", "not json"])
        .write_stdin(r#"{"a": 1}"#)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("[E9001]"));
}

#[test]
fn test_invalid_config_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("fnkit.yml");
    std::fs::write(&config, "log_level: loud\n").unwrap();

    fnkit()
        .arg("--config")
        .arg(&config)
        .arg("demo")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid log level 'loud'"));
}

#[test]
fn test_negative_debounce_env_rejected() {
    fnkit()
        .env("FNKIT_DEBOUNCE_MS", "-1")
        .arg("demo")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("[E1005]"));
}
