//! Integration tests for the machine-config binary.

use super::test_utils::{path_str, write_default_manifest, write_document};
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(test_dir: &TempDir, extra_env: &[(&str, &str)], args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_machine-config");
    let home = test_dir.path().join("home");
    std::fs::create_dir_all(&home).unwrap();

    let mut command = Command::new(bin);
    command
        .env_clear()
        .env("HOME", &home)
        .arg("--workspace")
        .arg(test_dir.path())
        .args(args);
    for (key, value) in extra_env {
        command.env(key, value);
    }
    command.output().unwrap()
}

#[test]
fn test_machines_json_output() {
    let temp_dir = TempDir::new().unwrap();
    write_document(
        &temp_dir,
        r#"{ "boxes": { "client": { "memory": 2048, "url": "https://boxes.example/c.box" } } }"#,
    );
    write_default_manifest(&temp_dir);

    let output = run(&temp_dir, &[], &["machines", "--format", "json"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["name"], "client");
    assert_eq!(value[0]["memory"], 2048);
    assert_eq!(value[0]["box"], "sssd-fedora");
    assert_eq!(value[0]["url"], "https://boxes.example/c.box");
    assert_eq!(value[1]["box"], "sssd-windows");
}

#[test]
fn test_folders_env_override() {
    let temp_dir = TempDir::new().unwrap();
    write_document(
        &temp_dir,
        r#"{ "folders": { "nfs": [{ "host": "/x", "guest": "/file" }] } }"#,
    );

    let output = run(
        &temp_dir,
        &[("SSSD_TEST_SUITE_NFS", "/x:/env /p:/q")],
        &["folders", "nfs", "--format", "json"],
    );
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value, serde_json::json!({ "/x": "/env", "/p": "/q" }));
}

#[test]
fn test_invalid_document_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_document(&temp_dir, "not json");

    let output = run(&temp_dir, &[], &["--document", &path_str(&path), "settings"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Malformed configuration file"), "stderr: {}", stderr);
}

#[test]
fn test_plan_with_malformed_override_fails() {
    let temp_dir = TempDir::new().unwrap();
    write_default_manifest(&temp_dir);

    let output = run(
        &temp_dir,
        &[("SSSD_TEST_SUITE_SSHFS", "/only-host")],
        &["plan"],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("/only-host"), "stderr: {}", stderr);
}

#[test]
fn test_settings_command_reports_env_override() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(
        &temp_dir,
        &[("MACHINE_CONFIG_BOXES__LINUX", "centos-stream")],
        &["--quiet", "settings"],
    );
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["boxes"]["linux"], "centos-stream");
    assert_eq!(value["document"], "config.json");
}
