//! Integration tests for layered settings

use super::test_utils::{isolated_env, write_file};
use machine_config::settings::SettingsLoader;
use machine_config::FallbackBoxes;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_workspace_file_overrides_global_file() {
    let temp_dir = TempDir::new().unwrap();
    let env = isolated_env(&temp_dir);
    write_file(
        &temp_dir,
        "home/.config/machine-config/config.toml",
        r#"
document = "global.json"

[boxes]
linux = "global-linux"
windows = "global-windows"
"#,
    );
    write_file(
        &temp_dir,
        "ws/machine-config.toml",
        r#"
[boxes]
linux = "workspace-linux"
"#,
    );

    let settings = SettingsLoader::load(&temp_dir.path().join("ws"), &env).unwrap();
    assert_eq!(settings.document, PathBuf::from("global.json"));
    assert_eq!(
        settings.boxes,
        FallbackBoxes::new("workspace-linux", "global-windows")
    );
}

#[test]
fn test_environment_overrides_files() {
    let temp_dir = TempDir::new().unwrap();
    write_file(
        &temp_dir,
        "machine-config.toml",
        r#"
document = "file.json"

[boxes]
linux = "file-linux"
windows = "file-windows"

[logging]
level = "info"
"#,
    );
    let env = isolated_env(&temp_dir)
        .with_var("MACHINE_CONFIG_DOCUMENT", "env.json")
        .with_var("MACHINE_CONFIG_BOXES__WINDOWS", "env-windows");

    let settings = SettingsLoader::load(temp_dir.path(), &env).unwrap();
    assert_eq!(settings.document, PathBuf::from("env.json"));
    assert_eq!(settings.boxes, FallbackBoxes::new("file-linux", "env-windows"));
    assert_eq!(settings.logging.level, "info");
}

#[test]
fn test_explicit_settings_file_skips_workspace_file() {
    let temp_dir = TempDir::new().unwrap();
    write_file(
        &temp_dir,
        "machine-config.toml",
        "[boxes]\nlinux = \"workspace-linux\"\n",
    );
    let explicit = write_file(&temp_dir, "custom.toml", "[boxes]\nwindows = \"custom-windows\"\n");

    let settings = SettingsLoader::load_from_file(&explicit, &isolated_env(&temp_dir)).unwrap();
    assert_eq!(settings.boxes, FallbackBoxes::new("sssd-fedora", "custom-windows"));
}

#[test]
fn test_malformed_settings_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    write_file(&temp_dir, "machine-config.toml", "[boxes\nlinux = ");
    assert!(SettingsLoader::load(temp_dir.path(), &isolated_env(&temp_dir)).is_err());
}
