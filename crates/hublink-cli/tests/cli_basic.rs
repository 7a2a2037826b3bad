//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Nothing
//! here touches the network; connect flows are covered in hublink-core.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "hublink-cli", "--quiet", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_help() {
    let (stdout, _, code) = run_cli(&["--help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("hubspot"));
    assert!(stdout.contains("config"));
}

#[test]
fn test_status_missing_params_file() {
    let dir = tempfile::tempdir().unwrap();
    let params = dir.path().join("params.json");

    let (stdout, _, code) = run_cli(&["hubspot", "status", "--params", params.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(stdout.contains("not connected"));
}

#[test]
fn test_status_with_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let params = dir.path().join("params.json");
    std::fs::write(
        &params,
        r#"{"credentials": {"access_token": "tok"}, "type": "HubSpot"}"#,
    )
    .unwrap();

    let (stdout, _, code) = run_cli(&["hubspot", "status", "--params", params.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(stdout.trim().starts_with("connected"));

    let (stdout, _, code) = run_cli(&[
        "hubspot",
        "status",
        "--params",
        params.to_str().unwrap(),
        "--json",
    ]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["connected"], serde_json::json!(true));
    assert_eq!(parsed["connecting"], serde_json::json!(false));
}

#[test]
fn test_disconnect_strips_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let params = dir.path().join("params.json");
    std::fs::write(
        &params,
        r#"{"credentials": "tok", "type": "HubSpot", "workspace": "acme"}"#,
    )
    .unwrap();

    let (stdout, _, code) = run_cli(&[
        "hubspot",
        "disconnect",
        "--params",
        params.to_str().unwrap(),
    ]);
    assert_eq!(code, 0);
    assert!(stdout.contains("disconnected"));

    let content = std::fs::read_to_string(&params).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert!(parsed.get("credentials").is_none());
    assert!(parsed.get("type").is_none());
    assert_eq!(parsed["workspace"], serde_json::json!("acme"));
}
