//! Smoke tests for the viewfind CLI
//!
//! These tests run the real binary against fixtures on disk.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Get a command for the viewfind binary
fn viewfind() -> Command {
    let mut cmd = Command::cargo_bin("viewfind").expect("viewfind binary should exist");
    cmd.env_remove("RUST_LOG");
    cmd
}

const TOOLBAR_JSON: &str = r#"{
    "target-package": "com.example",
    "resources": { "com.example": { "open": 2 } },
    "root": {
        "class": "android.widget.LinearLayout",
        "children": [
            { "class": "android.widget.Button", "id": 1, "text": "Save" },
            { "class": "android.widget.Button", "id": 2, "text": "Open", "content-desc": "open file" },
            { "class": "android.widget.Button", "id": 3, "text": "Save" },
            { "class": "android.widget.Button", "id": 4, "text": "Save" }
        ]
    }
}"#;

const HIDDEN_YAML: &str = "
root:
  class: android.widget.FrameLayout
  children:
    - class: android.widget.TextView
      text: Title
    - class: android.widget.TextView
      text: Title
      displayed: false
";

fn fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    viewfind()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag() {
    viewfind()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("find"))
        .stdout(predicate::str::contains("find-all"));
}

#[test]
fn test_no_args_fails() {
    viewfind().assert().failure();
}

// ============================================================================
// Lookup Tests
// ============================================================================

#[test]
fn test_find_all_text() {
    let dir = TempDir::new().unwrap();
    let tree = fixture(&dir, "toolbar.json", TOOLBAR_JSON);

    viewfind()
        .args(["--color", "never", "find-all", "text", "Save", "--tree"])
        .arg(&tree)
        .assert()
        .success()
        .stdout(predicate::str::contains("FOUND 3 matches"))
        .stdout(predicate::str::contains("id=1"))
        .stdout(predicate::str::contains("id=3"))
        .stdout(predicate::str::contains("id=4"));
}

#[test]
fn test_find_returns_first_match() {
    let dir = TempDir::new().unwrap();
    let tree = fixture(&dir, "toolbar.json", TOOLBAR_JSON);

    viewfind()
        .args(["--color", "never", "find", "text", "Save", "--tree"])
        .arg(&tree)
        .assert()
        .success()
        .stdout(predicate::str::contains("FOUND 1 match for"))
        .stdout(predicate::str::contains("id=1"))
        .stdout(predicate::str::contains("id=3").not());
}

#[test]
fn test_find_by_id_and_accessibility_id() {
    let dir = TempDir::new().unwrap();
    let tree = fixture(&dir, "toolbar.json", TOOLBAR_JSON);

    viewfind()
        .args(["--color", "never", "find", "id", "open", "--tree"])
        .arg(&tree)
        .assert()
        .success()
        .stdout(predicate::str::contains("text=\"Open\""));

    viewfind()
        .args(["--color", "never", "find", "accessibility id", "open file", "--tree"])
        .arg(&tree)
        .assert()
        .success()
        .stdout(predicate::str::contains("id=2"));
}

#[test]
fn test_xpath_positional_selector() {
    let dir = TempDir::new().unwrap();
    let tree = fixture(&dir, "toolbar.json", TOOLBAR_JSON);

    viewfind()
        .args(["--color", "never", "find-all", "xpath", "//Button[3]", "--tree"])
        .arg(&tree)
        .assert()
        .success()
        .stdout(predicate::str::contains("FOUND 1 match"))
        .stdout(predicate::str::contains("id=3"));
}

#[test]
fn test_no_match_exits_zero() {
    let dir = TempDir::new().unwrap();
    let tree = fixture(&dir, "toolbar.json", TOOLBAR_JSON);

    viewfind()
        .args(["--color", "never", "find-all", "text", "Missing", "--tree"])
        .arg(&tree)
        .assert()
        .success()
        .stdout(predicate::str::contains("No views matched"));
}

#[test]
fn test_json_output() {
    let dir = TempDir::new().unwrap();
    let tree = fixture(&dir, "toolbar.json", TOOLBAR_JSON);

    let output = viewfind()
        .args(["find-all", "class name", "Button", "--format", "json", "--tree"])
        .arg(&tree)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["strategy"], "class name");
    assert_eq!(value["all"], true);
    assert_eq!(value["matches"].as_array().unwrap().len(), 4);
}

#[test]
fn test_quiet_prints_matches_only() {
    let dir = TempDir::new().unwrap();
    let tree = fixture(&dir, "toolbar.json", TOOLBAR_JSON);

    viewfind()
        .args(["-q", "--color", "never", "find-all", "text", "Save", "--tree"])
        .arg(&tree)
        .assert()
        .success()
        .stdout(predicate::str::contains("FOUND").not())
        .stdout(predicate::str::starts_with("[0]"));
}

// ============================================================================
// Visibility Tests
// ============================================================================

#[test]
fn test_hidden_match_fails_by_default() {
    let dir = TempDir::new().unwrap();
    let tree = fixture(&dir, "hidden.yaml", HIDDEN_YAML);

    viewfind()
        .args(["find-all", "text", "Title", "--tree"])
        .arg(&tree)
        .assert()
        .failure()
        .stderr(predicate::str::contains("is displayed on the screen"));
}

#[test]
fn test_no_displayed_includes_hidden() {
    let dir = TempDir::new().unwrap();
    let tree = fixture(&dir, "hidden.yaml", HIDDEN_YAML);

    viewfind()
        .args(["--color", "never", "find-all", "text", "Title", "--no-displayed", "--tree"])
        .arg(&tree)
        .assert()
        .success()
        .stdout(predicate::str::contains("FOUND 2 matches"))
        .stdout(predicate::str::contains("(hidden)"));
}

// ============================================================================
// Error Tests
// ============================================================================

#[test]
fn test_unknown_strategy_fails() {
    let dir = TempDir::new().unwrap();
    let tree = fixture(&dir, "toolbar.json", TOOLBAR_JSON);

    viewfind()
        .args(["find-all", "css selector", "button", "--tree"])
        .arg(&tree)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Strategy is not implemented: css selector"));
}

#[test]
fn test_malformed_xpath_fails() {
    let dir = TempDir::new().unwrap();
    let tree = fixture(&dir, "toolbar.json", TOOLBAR_JSON);

    viewfind()
        .args(["find", "xpath", "//Button[", "--tree"])
        .arg(&tree)
        .assert()
        .failure()
        .stderr(predicate::str::contains("//Button["));
}

#[test]
fn test_missing_fixture_fails() {
    viewfind()
        .args(["find", "text", "Save", "--tree", "/nonexistent/viewfind/ui.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}

#[test]
fn test_unsupported_fixture_extension_fails() {
    let dir = TempDir::new().unwrap();
    let tree = fixture(&dir, "toolbar.txt", TOOLBAR_JSON);

    viewfind()
        .args(["find", "text", "Save", "--tree"])
        .arg(&tree)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Fixture error"));
}
