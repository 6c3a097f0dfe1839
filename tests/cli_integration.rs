//! Integration tests for the mirrordna binary
//!
//! Each test runs the compiled binary against a throwaway config that points
//! at a temporary standard and profiles directory.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const STANDARD: &str = "# Test Standard\n\nStay grounded.\n";

fn mirrordna_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_mirrordna"))
}

/// Helper to lay out a standard, profiles and a config file
fn setup() -> TempDir {
    let temp = TempDir::new().unwrap();
    let profiles = temp.path().join("profiles");
    fs::create_dir_all(&profiles).unwrap();

    fs::write(temp.path().join("standard.md"), STANDARD).unwrap();
    fs::write(
        profiles.join("paul.yaml"),
        "profile_version: 16\nuser_id: paul\nuser_name: Paul\ntimezone: UTC\ncognitive_mode: deep\ncore_projects: [A, B]\n",
    )
    .unwrap();
    fs::write(
        profiles.join("ana.yaml"),
        "user_name: Ana\ntimezone: Europe/Lisbon\ncognitive_mode: light\n",
    )
    .unwrap();

    let config = format!(
        "paths:\n  standard: {}\n  profiles: {}\ndefault_profile: paul.yaml\n",
        temp.path().join("standard.md").display(),
        profiles.display()
    );
    fs::write(temp.path().join("mirrordna.yaml"), config).unwrap();

    temp
}

fn command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(mirrordna_binary());
    cmd.arg("--config")
        .arg(dir.join("mirrordna.yaml"))
        .args(args)
        .env("HOME", dir)
        .env("XDG_DATA_HOME", dir.join("data"))
        .env_remove("MIRRORDNA_CONFIG")
        .env_remove("MIRRORDNA_DIR")
        .env_remove("RUST_LOG");
    cmd
}

fn run_mirrordna(dir: &Path, args: &[&str]) -> Output {
    command(dir, args).output().expect("Failed to execute mirrordna")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_prompt_default_profile() {
    let temp = setup();
    let output = run_mirrordna(temp.path(), &["prompt", "--task", "Plan the week."]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let out = stdout(&output);
    assert!(out.starts_with(STANDARD));
    assert!(out.contains("User: Paul"));
    assert!(out.trim_end().ends_with("Plan the week."));
}

#[test]
fn test_prompt_named_profile_without_extension() {
    let temp = setup();
    let output = run_mirrordna(temp.path(), &["prompt", "--profile", "ana"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("User: Ana"));
    assert!(!out.contains("# Task Instructions"));
}

#[test]
fn test_prompt_task_from_stdin() {
    let temp = setup();
    let mut child = command(temp.path(), &["prompt", "--task-file", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"Instructions from a pipe")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert!(stdout(&output).contains("# Task Instructions\nInstructions from a pipe"));
}

#[test]
fn test_prompt_missing_profile_fails_without_output() {
    let temp = setup();
    let output = run_mirrordna(temp.path(), &["prompt", "--profile", "ghost.yaml"]);

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Profile not found"));
}

#[test]
fn test_summary_json() {
    let temp = setup();
    let output = run_mirrordna(temp.path(), &["summary", "-o", "json"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["user_name"], "Paul");
    assert_eq!(value["core_projects"], serde_json::json!(["A", "B"]));
}

#[test]
fn test_summary_text() {
    let temp = setup();
    let output = run_mirrordna(temp.path(), &["summary", "-p", "ana.yaml", "-o", "text"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("User: Ana"));
    assert!(out.contains("Timezone: Europe/Lisbon"));
}

#[test]
fn test_profile_list_json() {
    let temp = setup();
    let output = run_mirrordna(temp.path(), &["profile", "list", "-o", "json"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let names: Vec<&str> = value.as_array().unwrap().iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["ana.yaml", "paul.yaml"]);
    assert_eq!(value[1]["default"], true);
}

#[test]
fn test_profile_validate_reports_broken_profile() {
    let temp = setup();
    assert!(run_mirrordna(temp.path(), &["profile", "validate"]).status.success());

    fs::write(temp.path().join("profiles/broken.yaml"), "timezone: UTC\n").unwrap();
    let output = run_mirrordna(temp.path(), &["profile", "validate", "all"]);

    assert!(!output.status.success());
    assert!(stdout(&output).contains("broken.yaml"));
}

#[test]
fn test_config_get() {
    let temp = setup();
    let output = run_mirrordna(temp.path(), &["config", "get", "default_profile"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "paul.yaml");
}
