//! Configuration Store
//!
//! Holds the optional JSON configuration document together with the fallback boxes and the
//! environment snapshot of the run, and answers every per-machine lookup. Lookups never
//! fail on missing data: each one has a documented fallback. Only loading the document and
//! parsing environment folder overrides can fail.

use crate::env::{Environment, DISABLE_FOLDERS_VAR};
use crate::error::DocumentError;
use crate::machine::BoxKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

mod document;
mod folders;

pub use document::ConfigDocument;
pub use folders::{
    default_env_var, parse_mount_overrides, split_mount, FolderKind, FolderMapping,
};

/// Box used for a machine whose document entry names none, per kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackBoxes {
    pub linux: String,
    pub windows: String,
}

impl FallbackBoxes {
    pub fn new(linux: impl Into<String>, windows: impl Into<String>) -> Self {
        Self {
            linux: linux.into(),
            windows: windows.into(),
        }
    }

    pub fn for_kind(&self, kind: BoxKind) -> &str {
        match kind {
            BoxKind::Linux => &self.linux,
            BoxKind::Windows => &self.windows,
        }
    }
}

/// Read-only view over the configuration document of one run
#[derive(Debug, Clone)]
pub struct ConfigStore {
    document: ConfigDocument,
    fallback: FallbackBoxes,
    env: Environment,
}

impl ConfigStore {
    pub fn new(document: ConfigDocument, fallback: FallbackBoxes, env: Environment) -> Self {
        Self {
            document,
            fallback,
            env,
        }
    }

    /// Load the document at `path`. A missing file behaves like `{}`.
    pub fn load(
        path: impl AsRef<Path>,
        fallback: FallbackBoxes,
        env: Environment,
    ) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let document = ConfigDocument::load(path)?;
        debug!(path = %path.display(), "Configuration document loaded");
        Ok(Self::new(document, fallback, env))
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Memory in MB from `boxes.<name>.memory`, or 0.
    ///
    /// Integral floats such as `2048.0` are accepted as written.
    pub fn memory(&self, name: &str) -> u64 {
        match self.document.dig(&["boxes", name, "memory"]) {
            None => 0,
            Some(value) => whole_megabytes(value).unwrap_or_else(|| {
                warn!(machine = name, %value, "Ignoring memory that is not a non-negative integer");
                0
            }),
        }
    }

    /// Box from `boxes.<name>.name`, or the fallback box for `kind`.
    pub fn box_name(&self, kind: BoxKind, name: &str) -> String {
        match self.document.dig_str(&["boxes", name, "name"]) {
            Some(configured) => configured.to_string(),
            None => {
                let fallback = self.fallback.for_kind(kind);
                debug!(machine = name, %kind, box_name = fallback, "Using fallback box");
                fallback.to_string()
            }
        }
    }

    /// Box source URL from `boxes.<name>.url`, if configured and non-empty.
    pub fn box_url(&self, name: &str) -> Option<String> {
        self.document
            .dig_str(&["boxes", name, "url"])
            .map(str::to_string)
    }

    /// Shared folders for `category`.
    ///
    /// Document entries under `folders.<category>` are applied first and the `host:guest`
    /// tokens of `env_var` last, so the environment wins on conflicting host paths. When
    /// `SSSD_TEST_SUITE_BOX=yes` the result is empty regardless of either source.
    pub fn folders(&self, category: &str, env_var: &str) -> Result<FolderMapping, DocumentError> {
        if self.env.is(DISABLE_FOLDERS_VAR, "yes") {
            debug!(category, "Shared folders disabled by {}", DISABLE_FOLDERS_VAR);
            return Ok(FolderMapping::new());
        }

        let mut mapping = FolderMapping::new();
        folders::merge_document_entries(
            category,
            self.document.dig(&["folders", category]),
            &mut mapping,
        );

        if let Some(overrides) = self.env.get(env_var) {
            for (host, guest) in parse_mount_overrides(env_var, overrides)? {
                mapping.insert(host, guest);
            }
        }

        debug!(category, env_var, folders = mapping.len(), "Resolved shared folders");
        Ok(mapping)
    }

    /// Shared folders for a known mount kind, using its default override variable.
    pub fn folders_for(&self, kind: FolderKind) -> Result<FolderMapping, DocumentError> {
        self.folders(kind.category(), kind.env_var())
    }
}

fn whole_megabytes(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|mb| mb.fract() == 0.0 && *mb >= 0.0 && *mb <= u64::MAX as f64)
            .map(|mb| mb as u64)
    })
}
