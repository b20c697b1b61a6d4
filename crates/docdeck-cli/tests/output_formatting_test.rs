//! Integration tests for output formatting
//!
//! These tests run the binary against the in-memory backend and verify
//! JSON output and exit codes.

use std::path::PathBuf;
use std::process::Command;

fn docdeck_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    path.pop(); // Remove 'deps' directory
    path.push("docdeck");
    path
}

#[test]
fn test_collections_list_json_is_valid() {
    let output = Command::new(docdeck_bin())
        .args(["collections", "list", "--backend", "memory", "--json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("Output should be valid JSON");
    assert_eq!(parsed.get("status").and_then(|s| s.as_str()), Some("success"));
    // Fresh in-memory backend has no collections.
    assert_eq!(parsed.get("data").and_then(|d| d.as_array()).map(|a| a.len()), Some(0));
}

#[test]
fn test_create_collection_json_reports_success() {
    let output = Command::new(docdeck_bin())
        .args(["collections", "create", "tax-notes", "--backend", "memory", "--json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("Output should be valid JSON");
    assert_eq!(parsed.get("status").and_then(|s| s.as_str()), Some("success"));
}

#[test]
fn test_invalid_collection_name_fails() {
    let output = Command::new(docdeck_bin())
        .args(["collections", "create", "bad name!", "--backend", "memory"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Invalid name should exit non-zero");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid collection name"));
}

#[test]
fn test_config_shows_sources() {
    let output = Command::new(docdeck_bin())
        .args(["config", "--json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("Output should be valid JSON");
    let rows = parsed.get("data").and_then(|d| d.as_array()).expect("data array");
    let endpoint = rows
        .iter()
        .find(|r| r.get("key").and_then(|k| k.as_str()) == Some("endpoint"))
        .expect("endpoint row");
    assert_eq!(endpoint.get("source").and_then(|s| s.as_str()), Some("default"));
}

#[test]
fn test_endpoint_flag_overrides_default() {
    let output = Command::new(docdeck_bin())
        .args(["config", "--json", "--endpoint", "http://staging:8200"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let rows = parsed.get("data").and_then(|d| d.as_array()).unwrap();
    let endpoint = rows
        .iter()
        .find(|r| r.get("key").and_then(|k| k.as_str()) == Some("endpoint"))
        .unwrap();
    assert_eq!(endpoint.get("value").and_then(|v| v.as_str()), Some("http://staging:8200"));
    assert_eq!(endpoint.get("source").and_then(|s| s.as_str()), Some("cli"));
}
