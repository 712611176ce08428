//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against a throwaway data
//! directory and verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command against the given data directory.
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "dailyq-cli", "--quiet", "--"])
        .args(args)
        .env("DAILYQ_DATA_DIR", data_dir)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_ok(data_dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "CLI command failed ({args:?}): {stderr}");
    stdout
}

#[test]
fn answer_write_show_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_ok(
        dir.path(),
        &["answer", "write", "a quiet day", "--date", "2024-06-10"],
    );
    assert!(out.contains("2024-06-10"));

    let out = run_ok(dir.path(), &["answer", "show", "--date", "2024-06-10"]);
    assert_eq!(out.trim(), "a quiet day");
}

#[test]
fn answer_list_is_valid_json() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_ok(dir.path(), &["answer", "list", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert!(parsed.as_array().unwrap().is_empty());
}

#[test]
fn todo_add_done_list() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(
        dir.path(),
        &["todo", "add", "water the plants", "--date", "2024-06-10"],
    );
    run_ok(dir.path(), &["todo", "done", "1", "--date", "2024-06-10"]);

    let out = run_ok(dir.path(), &["todo", "list", "--date", "2024-06-10"]);
    assert!(out.contains("[x] water the plants"));
}

#[test]
fn todo_done_out_of_range_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["todo", "done", "3", "--date", "2024-06-10"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("no todo #3"));
}

#[test]
fn stats_emits_snapshot_json() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_ok(dir.path(), &["stats"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["total_answers"], 0);
    assert_eq!(parsed["monthly"].as_array().unwrap().len(), 3);
}

#[test]
fn settings_roundtrip_and_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_ok(dir.path(), &["settings", "show"]);
    assert!(out.contains("notification_time = 20:00"));

    run_ok(dir.path(), &["settings", "time", "7", "30"]);
    run_ok(dir.path(), &["settings", "dark", "true"]);
    let out = run_ok(dir.path(), &["settings", "show"]);
    assert!(out.contains("notification_time = 07:30"));
    assert!(out.contains("dark_mode = true"));
}

#[test]
fn settings_reject_invalid_time() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["settings", "time", "24", "0"]);
    assert_ne!(code, 0);
}

#[test]
fn config_get_and_set() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_ok(dir.path(), &["config", "get", "stats.streak_scan_days"]);
    assert_eq!(out.trim(), "365");

    run_ok(dir.path(), &["config", "set", "time.utc_offset_hours", "0"]);
    let out = run_ok(dir.path(), &["config", "get", "time.utc_offset_hours"]);
    assert_eq!(out.trim(), "0");
}

#[test]
fn reset_requires_confirmation() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(
        dir.path(),
        &["answer", "write", "soon gone", "--date", "2024-06-10"],
    );

    let (_, _, code) = run_cli(dir.path(), &["reset"]);
    assert_ne!(code, 0);

    run_ok(dir.path(), &["reset", "--yes"]);
    let out = run_ok(dir.path(), &["answer", "show", "--date", "2024-06-10"]);
    assert!(out.contains("no answer stored"));
}

#[test]
fn question_show_without_data() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_ok(dir.path(), &["question", "show", "--date", "2024-06-10"]);
    assert!(out.contains("no question stored for 2024-06-10"));
}

#[test]
fn notify_next_reflects_enabled_flag() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_ok(dir.path(), &["notify", "next"]);
    assert!(out.contains("disabled"));

    run_ok(dir.path(), &["settings", "push", "true"]);
    let out = run_ok(dir.path(), &["notify", "next"]);
    assert!(out.contains(":"));
}
