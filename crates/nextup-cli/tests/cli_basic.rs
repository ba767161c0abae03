//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "nextup-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_time_parse() {
    let (stdout, _, code) = run_cli(&["time", "parse", "1:30"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "90");
}

#[test]
fn test_time_parse_lenient_garbage() {
    let (stdout, _, code) = run_cli(&["time", "parse", "abc"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "0");
}

#[test]
fn test_time_parse_strict_rejects_garbage() {
    let (_, stderr, code) = run_cli(&["time", "parse", "--strict", "abc"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Invalid duration format"));
}

#[test]
fn test_time_parse_huge_hours_saturates() {
    let (stdout, _, code) = run_cli(&["time", "parse", "6000000000000000:0:0"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), u64::MAX.to_string());
}

#[test]
fn test_time_parse_strict_rejects_huge_hours() {
    let (_, stderr, code) = run_cli(&["time", "parse", "--strict", "6000000000000000:0:0"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Invalid duration format"));
}

#[test]
fn test_completions_bash() {
    let (stdout, _, code) = run_cli(&["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("nextup-cli"));
}

#[test]
fn test_time_format() {
    let (stdout, _, code) = run_cli(&["time", "format", "3661"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "1:01:01");
}

#[test]
fn test_agenda_check_filters_placeholders() {
    let (stdout, _, code) = run_cli(&[
        "agenda", "check", "--title", "Weekly", "Topic=1:00", "Standup=5:00",
    ]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Standup"));
    assert!(stdout.contains("1 item(s)"));
}

#[test]
fn test_agenda_check_json() {
    let (stdout, _, code) = run_cli(&["agenda", "check", "--json", "Standup=5:00"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON agenda");
    assert_eq!(parsed["title"], "Agenda");
    assert_eq!(parsed["items"][0]["topic"], "Standup");
    assert_eq!(parsed["items"][0]["remaining_secs"], 300);
}

#[test]
fn test_agenda_check_rejects_bad_entry_shape() {
    let (_, stderr, code) = run_cli(&["agenda", "check", "just-a-topic"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("TOPIC=TIME"));
}

#[test]
fn test_run_completes_with_fast_timings() {
    let (stdout, _, code) = run_cli(&[
        "run", "--tick-ms", "10", "--fade-ms", "5", "--json", "Standup=2",
    ]);
    assert_eq!(code, 0);
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).expect("valid JSON event"))
        .collect();
    assert_eq!(lines.first().unwrap()["type"], "CountdownStarted");
    assert_eq!(lines.last().unwrap()["type"], "MeetingEnded");
    assert!(lines.iter().any(|l| l["type"] == "ItemRemoved"));
}

#[test]
fn test_run_rejects_all_placeholder_entries() {
    let (_, stderr, code) = run_cli(&["run", "Topic=Time"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("no valid agenda entries"));
}
