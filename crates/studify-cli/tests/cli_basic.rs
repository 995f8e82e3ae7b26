//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command with `STUDIFY_DATA_DIR` pointed at `dir`.
/// Returns (stdout, stderr, exit code).
fn run_cli(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_studify-cli"))
        .args(args)
        .env("STUDIFY_DATA_DIR", dir)
        .env_remove("STUDIFY_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_cli_success(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(dir, args);
    assert_eq!(code, 0, "CLI command failed {:?}: {}", args, stderr);
    stdout
}

fn run_cli_json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let stdout = run_cli_success(dir, args);
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_plan_generate_json() {
    let dir = tempfile::tempdir().unwrap();
    let plan = run_cli_json(
        dir.path(),
        &["plan", "generate", "--hours", "2", "--at", "2026-10-16T09:00", "--json"],
    );

    let blocks = plan["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 5);
    assert_eq!(blocks[0]["start_time"], "2026-10-16T09:15:00");
    assert_eq!(blocks[0]["kind"], "exam");
    assert_eq!(blocks[1]["kind"], "break");
    assert_eq!(blocks[2]["kind"], "task");
    assert_eq!(blocks[2]["topic"], "Assignment");
    assert_eq!(blocks[4]["duration_minutes"], 10);
}

#[test]
fn test_plan_generate_text_panic() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli_success(
        dir.path(),
        &["plan", "generate", "--hours", "1", "--intensity", "panic", "--at", "2026-10-16T09:00"],
    );
    assert!(out.contains("High Intensity"), "{out}");
    assert!(out.contains("10:10"), "{out}");
    assert!(!out.contains("TASK"), "{out}");
}

#[test]
fn test_plan_rejects_hours_off_slider() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["plan", "generate", "--hours", "9"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("hours"), "{stderr}");

    let (_, _, code) = run_cli(dir.path(), &["plan", "generate", "--hours", "1.25"]);
    assert_ne!(code, 0);
}

#[test]
fn test_plan_uses_configured_subjects() {
    let dir = tempfile::tempdir().unwrap();
    run_cli_success(dir.path(), &["exam", "set", "--subject", "Anatomy 101"]);
    run_cli_success(
        dir.path(),
        &["task", "set", "--subject", "Math", "--title", "Problem Set 3"],
    );

    let plan = run_cli_json(
        dir.path(),
        &["plan", "generate", "--at", "2026-10-16T13:40", "--json"],
    );
    let blocks = plan["blocks"].as_array().unwrap();
    assert_eq!(blocks[0]["start_time"], "2026-10-16T13:45:00");
    assert_eq!(blocks[0]["subject"], "Anatomy 101");
    assert_eq!(blocks[2]["subject"], "Math");
    assert_eq!(blocks[2]["topic"], "Problem Set 3");
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(
        run_cli_success(dir.path(), &["config", "get", "task.title"]).trim(),
        "Assignment"
    );
    run_cli_success(dir.path(), &["config", "set", "planner.intensity", "panic"]);
    assert_eq!(
        run_cli_success(dir.path(), &["config", "get", "planner.intensity"]).trim(),
        "panic"
    );
}

#[test]
fn test_config_rejects_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "ui.nope", "1"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("ui.nope"), "{stderr}");

    let (_, stderr, code) = run_cli(dir.path(), &["config", "get", "ui.nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Unknown configuration key: ui.nope"), "{stderr}");
}

#[test]
fn test_config_set_null_clears_exam_subject() {
    let dir = tempfile::tempdir().unwrap();
    run_cli_success(dir.path(), &["config", "set", "exam.subject", "Physics"]);
    run_cli_success(dir.path(), &["config", "set", "exam.subject", "null"]);
    let status = run_cli_json(dir.path(), &["exam", "show", "--json"]);
    assert_eq!(status["subject"], "Exam");
}

#[test]
fn test_config_reset() {
    let dir = tempfile::tempdir().unwrap();
    run_cli_success(dir.path(), &["config", "set", "profile.name", "Ada"]);
    run_cli_success(dir.path(), &["config", "reset"]);
    assert_eq!(
        run_cli_success(dir.path(), &["config", "get", "profile.name"]).trim(),
        "Student"
    );
}

#[test]
fn test_attendance_show_and_set() {
    let dir = tempfile::tempdir().unwrap();
    let report = run_cli_json(dir.path(), &["attendance", "show", "--json"]);
    assert_eq!(report["percentage"], 90);
    assert_eq!(report["verdict"]["skips_left"], 5);

    let out = run_cli_success(dir.path(), &["attendance", "set", "--attended", "10", "--required", "75"]);
    assert!(out.contains("DANGER"), "{out}");

    let (_, _, code) = run_cli(dir.path(), &["attendance", "set", "--total", "0"]);
    assert_ne!(code, 0);
}

#[test]
fn test_attendance_caps_hand_edited_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[attendance]\ntotal = 20\nattended = 30\nrequired = 70\n",
    )
    .unwrap();
    let report = run_cli_json(dir.path(), &["attendance", "show", "--json"]);
    assert_eq!(report["attended"], 20);
    assert_eq!(report["percentage"], 100);
}

#[test]
fn test_exam_set_show_reset() {
    let dir = tempfile::tempdir().unwrap();
    run_cli_success(
        dir.path(),
        &["exam", "set", "--subject", "Chemistry", "--prep", "20", "--date", "2030-01-15"],
    );
    let status = run_cli_json(dir.path(), &["exam", "show", "--json"]);
    assert_eq!(status["subject"], "Chemistry");
    assert_eq!(status["zone"], "panic");
    assert_eq!(status["suggested_intensity"], "panic");
    assert!(status["days_left"].as_i64().unwrap() > 0);

    let (_, _, code) = run_cli(dir.path(), &["exam", "set", "--prep", "101"]);
    assert_ne!(code, 0);

    run_cli_success(dir.path(), &["exam", "reset"]);
    let status = run_cli_json(dir.path(), &["exam", "show", "--json"]);
    assert_eq!(status["subject"], "Exam");
    assert_eq!(status["prep"], 50);
    assert!(status["days_left"].is_null());
}

#[test]
fn test_status_json() {
    let dir = tempfile::tempdir().unwrap();
    let dash = run_cli_json(dir.path(), &["status", "--json"]);
    for field in ["name", "major", "active_task", "exam", "attendance"] {
        assert!(dash.get(field).is_some(), "missing {field}: {dash}");
    }
}

#[test]
fn test_status_past_exam_counts_days_ago() {
    let dir = tempfile::tempdir().unwrap();
    run_cli_success(dir.path(), &["exam", "set", "--date", "2020-01-01"]);

    let out = run_cli_success(dir.path(), &["status"]);
    assert!(out.contains("days ago"), "{out}");
    let has_negative = out
        .as_bytes()
        .windows(2)
        .any(|w| w[0] == b'-' && w[1].is_ascii_digit());
    assert!(!has_negative, "{out}");

    let out = run_cli_success(dir.path(), &["exam", "show"]);
    assert!(out.contains("days ago"), "{out}");
}

#[test]
fn test_completions() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli_success(dir.path(), &["completions", "bash"]);
    assert!(out.contains("studify-cli"));
}
