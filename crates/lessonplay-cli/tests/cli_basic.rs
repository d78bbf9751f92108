//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs.

use std::process::Command;

/// Run a CLI command and return output.
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "lessonplay-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_questions_sample_json() {
    let (stdout, _, code) = run_cli(&["questions", "sample"]);
    assert_eq!(code, 0, "questions sample failed");

    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("sample output is not JSON");
    let checkpoints = parsed["checkpoints"].as_array().unwrap();
    assert_eq!(checkpoints.len(), 3);
    assert_eq!(checkpoints[0]["id"], "q1");
}

#[test]
fn test_questions_sample_toml() {
    let (stdout, _, code) = run_cli(&["questions", "sample", "--toml"]);
    assert_eq!(code, 0, "questions sample --toml failed");
    assert!(stdout.contains("[[checkpoints]]"));
    assert!(stdout.contains("trigger_time"));
}

#[test]
fn test_questions_list() {
    let (stdout, _, code) = run_cli(&["questions", "list"]);
    assert_eq!(code, 0, "questions list failed");
    assert!(stdout.contains("q1"));
    assert!(stdout.contains("q3"));
}

#[test]
fn test_questions_validate_sample_is_clean() {
    let (stdout, _, code) = run_cli(&["questions", "validate"]);
    assert_eq!(code, 0, "questions validate failed");
    assert!(stdout.contains("ok"));
}

#[test]
fn test_play_auto_resolves_every_checkpoint() {
    let (stdout, _, code) = run_cli(&["play", "--auto", "--json"]);
    assert_eq!(code, 0, "play --auto failed");

    let resolved = stdout
        .lines()
        .filter(|line| line.contains("\"CheckpointResolved\""))
        .count();
    assert_eq!(resolved, 3);
    assert!(stdout.contains("\"PlaybackEnded\""));

    // Final snapshot reports every checkpoint answered.
    let snapshot: serde_json::Value = stdout
        .lines()
        .rev()
        .find_map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).ok()?;
            (value["type"] == "StateSnapshot").then_some(value)
        })
        .expect("no snapshot in output");
    assert_eq!(snapshot["answered"].as_array().unwrap().len(), 3);
}

#[test]
fn test_play_auto_text_mode() {
    let (stdout, _, code) = run_cli(&["play", "--auto"]);
    assert_eq!(code, 0, "play --auto text failed");
    assert!(stdout.contains("Correct!"));
    assert!(stdout.contains("answered 3/3 checkpoints"));
}

#[test]
fn test_config_list() {
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "config list failed");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("config is not JSON");
    assert!(parsed["playback"]["tick_interval_ms"].is_number());
    assert!(parsed["zoom"]["start"].is_number());
}
