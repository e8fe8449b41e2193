//! Workspace settings file source: <workspace>/machine-config.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};

pub const WORKSPACE_SETTINGS_FILE: &str = "machine-config.toml";

pub fn workspace_settings_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(WORKSPACE_SETTINGS_FILE)
}

/// Add the workspace settings file to builder when present. Overrides the global file.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = workspace_settings_path(workspace_root);
    if !path.exists() {
        return Ok(builder);
    }
    Ok(builder.add_source(File::from(path.as_path()).required(true)))
}
