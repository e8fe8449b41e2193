//! Global settings file source: $XDG_CONFIG_HOME/machine-config/config.toml or
//! ~/.config/machine-config/config.toml

use crate::env::Environment;
use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use directories::BaseDirs;
use std::path::PathBuf;
use tracing::debug;

const APP_DIR: &str = "machine-config";

/// Path to the global settings file.
///
/// Taken from the snapshot's XDG_CONFIG_HOME, then HOME; the platform config directory is
/// used only when the snapshot carries neither.
pub fn global_settings_path(env: &Environment) -> Option<PathBuf> {
    let config_dir = env
        .get("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| env.get("HOME").map(|home| PathBuf::from(home).join(".config")))
        .or_else(|| BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf()))?;

    Some(config_dir.join(APP_DIR).join("config.toml"))
}

/// Add global settings file source to builder if it exists.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
    env: &Environment,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if let Some(path) = global_settings_path(env) {
        if path.exists() {
            debug!(settings_path = %path.display(), "Using global settings file");
            builder = builder.add_source(File::from(path.as_path()).required(true));
        } else {
            debug!(settings_path = %path.display(), "No global settings file");
        }
    }
    Ok(builder)
}
