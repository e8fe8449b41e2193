//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::cli::command_name;
use crate::cli::parse::{Commands, OutputFormat};
use crate::cli::presentation::{
    format_folders_json, format_folders_text, format_machines_json, format_machines_text,
    format_plan_json,
};
use crate::config::{default_env_var, ConfigStore};
use crate::env::Environment;
use crate::error::ResolveError;
use crate::guest;
use crate::machine::MachineManifest;
use crate::settings::{Settings, SettingsLoader};
use std::path::{Path, PathBuf};
use tracing::info;

/// Runtime context for CLI execution: workspace, effective settings and the loaded store.
pub struct RunContext {
    workspace_root: PathBuf,
    settings: Settings,
    store: ConfigStore,
}

impl RunContext {
    /// Load settings, then the configuration document they (or `document`) point at.
    pub fn new(
        workspace_root: PathBuf,
        settings_path: Option<PathBuf>,
        document: Option<PathBuf>,
        env: Environment,
    ) -> Result<Self, ResolveError> {
        let mut settings = match settings_path {
            Some(ref path) => SettingsLoader::load_from_file(path, &env)?,
            None => SettingsLoader::load(&workspace_root, &env)?,
        };
        if let Some(document) = document {
            settings.document = document;
        }

        let document_path = settings.document_path(&workspace_root);
        let store = ConfigStore::load(&document_path, settings.boxes.clone(), env)?;
        info!(document = %document_path.display(), "Configuration store ready");

        Ok(Self {
            workspace_root,
            settings,
            store,
        })
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ResolveError> {
        info!(command = command_name(command), "Executing command");
        match command {
            Commands::Machines { manifest, format } => {
                let manifest = MachineManifest::load(&self.resolve_path(manifest))?;
                let machines = manifest.resolve(&self.store);
                match format {
                    OutputFormat::Json => format_machines_json(&machines),
                    OutputFormat::Text => Ok(format_machines_text(&machines)),
                }
            }
            Commands::Folders {
                category,
                env_var,
                format,
            } => {
                let env_var = env_var.clone().unwrap_or_else(|| default_env_var(category));
                let folders = self.store.folders(category, &env_var)?;
                match format {
                    OutputFormat::Json => format_folders_json(&folders),
                    OutputFormat::Text => Ok(format_folders_text(category, &folders)),
                }
            }
            Commands::Plan { manifest } => {
                let manifest = MachineManifest::load(&self.resolve_path(manifest))?;
                let machines = manifest.resolve(&self.store);
                let plan = guest::plan_all(&machines, &self.store)?;
                format_plan_json(&plan)
            }
            Commands::Settings => crate::cli::presentation::to_pretty_json(&self.settings),
        }
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_root.join(path)
        }
    }
}
