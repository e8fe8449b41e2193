//! Resolver Settings
//!
//! The resolver's own configuration: where the machine configuration document lives, the
//! fallback box for each machine kind, and logging. Layered with the `config` crate:
//! defaults, then the global settings file, then the workspace settings file, then
//! `MACHINE_CONFIG_*` environment variables.

use crate::config::FallbackBoxes;
use crate::env::Environment;
use crate::error::ResolveError;
use crate::logging::LoggingConfig;
use config::File;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

mod merge;
mod sources;

pub use merge::merge_policy::{DEFAULT_DOCUMENT, DEFAULT_LINUX_BOX, DEFAULT_WINDOWS_BOX};
pub use sources::global_file::global_settings_path;
pub use sources::workspace_file::{workspace_settings_path, WORKSPACE_SETTINGS_FILE};

/// Effective resolver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Path of the JSON configuration document
    pub document: PathBuf,

    /// Fallback box per machine kind
    pub boxes: FallbackBoxes,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            document: PathBuf::from(DEFAULT_DOCUMENT),
            boxes: FallbackBoxes::new(DEFAULT_LINUX_BOX, DEFAULT_WINDOWS_BOX),
            logging: LoggingConfig::default(),
        }
    }
}

impl Settings {
    /// Document path, resolved against `workspace_root` when relative.
    pub fn document_path(&self, workspace_root: &Path) -> PathBuf {
        if self.document.is_absolute() {
            self.document.clone()
        } else {
            workspace_root.join(&self.document)
        }
    }
}

/// Loads settings from their layered sources
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings for a workspace: defaults < global file < workspace file < environment.
    pub fn load(workspace_root: &Path, env: &Environment) -> Result<Settings, ResolveError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder, env)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = sources::environment::add_to_builder(builder, env)?;

        let settings: Settings = builder.build()?.try_deserialize()?;
        debug!(document = %settings.document.display(), "Settings loaded");
        Ok(settings)
    }

    /// Load settings from one explicit file instead of the global and workspace files.
    ///
    /// The file must exist. Environment variables still override it.
    pub fn load_from_file(path: &Path, env: &Environment) -> Result<Settings, ResolveError> {
        if !path.exists() {
            return Err(ResolveError::Settings(format!(
                "Settings file not found: {}",
                path.display()
            )));
        }

        let builder = merge::merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true));
        let builder = sources::environment::add_to_builder(builder, env)?;

        Ok(builder.build()?.try_deserialize()?)
    }
}
