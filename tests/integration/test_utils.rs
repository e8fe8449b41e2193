//! Shared test utilities for integration tests
//!
//! Fixtures are written into a temp directory and every test builds its own environment
//! snapshot, so nothing here touches the process environment.

use machine_config::Environment;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment whose HOME points inside the temp dir, so no real settings file is read.
pub fn isolated_env(test_dir: &TempDir) -> Environment {
    let home = test_dir.path().join("home");
    std::fs::create_dir_all(&home).unwrap();
    Environment::from_pairs([("HOME", home.to_string_lossy().to_string())])
}

/// Write `contents` to `name` inside the temp dir and return its path.
pub fn write_file(test_dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = test_dir.path().join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents).unwrap();
    path
}

pub fn write_document(test_dir: &TempDir, json: &str) -> PathBuf {
    write_file(test_dir, "config.json", json)
}

/// Manifest with a Linux client and a Windows AD controller.
pub fn write_default_manifest(test_dir: &TempDir) -> PathBuf {
    write_file(
        test_dir,
        "machines.toml",
        r#"
[[machine]]
name = "client"
kind = "linux"
hostname = "client.test"
ip = "192.168.100.20"

[[machine]]
name = "ad"
kind = "windows"
hostname = "root.ad.test"
ip = "192.168.100.110"
memory = 4096
"#,
    )
}

pub fn path_str(path: &Path) -> String {
    path.to_string_lossy().to_string()
}
