//! Basic CLI E2E tests.
//!
//! Tests invoke the CLI via cargo run with an isolated data directory
//! and verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command against `dir` and return (stdout, stderr, code).
fn run_cli(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "tickdeck-cli", "--quiet", "--"])
        .args(args)
        .env("TICKDECK_DATA_DIR", dir)
        .env("TICKDECK_CONFIG_DIR", dir)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_timer_add_and_list() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        dir.path(),
        &["timer", "add", "Study", "--duration", "300", "--category", "Work"],
    );
    assert_eq!(code, 0, "timer add failed");
    assert!(stdout.contains("Created 'Study'"));

    let (stdout, _, code) = run_cli(dir.path(), &["timer", "list"]);
    assert_eq!(code, 0, "timer list failed");
    assert!(stdout.contains("Work"));
    assert!(stdout.contains("Study"));
    assert!(stdout.contains("paused"));
}

#[test]
fn test_timer_list_json_matches_persisted_shape() {
    let dir = tempfile::tempdir().unwrap();
    let _ = run_cli(
        dir.path(),
        &["timer", "add", "Study", "--duration", "60", "--category", "Work"],
    );
    let (stdout, _, code) = run_cli(dir.path(), &["timer", "list", "--json"]);
    assert_eq!(code, 0, "timer list --json failed");

    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let timer = &value["Work"][0];
    assert_eq!(timer["name"], "Study");
    assert_eq!(timer["duration"], 60);
    assert_eq!(timer["status"], "paused");
    assert_eq!(timer["remaining"], 60);
}

#[test]
fn test_timer_start_persists_across_invocations() {
    let dir = tempfile::tempdir().unwrap();
    let _ = run_cli(
        dir.path(),
        &["timer", "add", "Study", "--duration", "60", "--category", "Work"],
    );
    let (stdout, _, _) = run_cli(dir.path(), &["timer", "list", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let id = value["Work"][0]["id"].as_str().unwrap().to_string();

    let (_, _, code) = run_cli(
        dir.path(),
        &["timer", "start", "--category", "Work", "--id", &id],
    );
    assert_eq!(code, 0, "timer start failed");

    let (stdout, _, _) = run_cli(dir.path(), &["timer", "list", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["Work"][0]["status"], "running");
}

#[test]
fn test_timer_add_defaults_category() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["timer", "add", "Loose", "--duration", "30"]);
    assert_eq!(code, 0, "timer add without category failed");

    let (stdout, _, _) = run_cli(dir.path(), &["timer", "list", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(value.get("Uncategorized").is_some());
}

#[test]
fn test_timer_add_rejects_zero_duration() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["timer", "add", "Bad", "--duration", "0"]);
    assert_ne!(code, 0, "zero duration should be rejected");
    assert!(stderr.contains("duration"));
}

#[test]
fn test_start_unknown_id_is_a_quiet_noop() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(
        dir.path(),
        &[
            "timer",
            "start",
            "--category",
            "Nope",
            "--id",
            "7f1bd0a8-16ae-4a3f-9b2a-444444444444",
        ],
    );
    assert_eq!(code, 0, "unknown references are no-ops, not errors");
}

#[test]
fn test_history_export_writes_pretty_json() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("exported.json");
    let (stdout, _, code) = run_cli(
        dir.path(),
        &["history", "export", "--out", out.to_str().unwrap()],
    );
    assert_eq!(code, 0, "history export failed");
    assert!(stdout.contains("exported"));

    let raw = std::fs::read_to_string(&out).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(value.is_array());
}

#[test]
fn test_history_list_when_empty() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["history", "list"]);
    assert_eq!(code, 0, "history list failed");
    assert!(stdout.contains("No completed timers"));
}
