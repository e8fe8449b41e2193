//! Machines: kinds, caller-supplied specs, resolved descriptors and the run manifest.

use crate::config::ConfigStore;
use crate::error::ResolveError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Guest operating system family, selects the fallback box and guest setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum BoxKind {
    Linux,
    Windows,
}

impl BoxKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BoxKind::Linux => "linux",
            BoxKind::Windows => "windows",
        }
    }
}

impl fmt::Display for BoxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoxKind {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linux" => Ok(BoxKind::Linux),
            "windows" => Ok(BoxKind::Windows),
            _ => Err(ResolveError::Manifest(format!(
                "Unknown machine kind '{}' (must be 'linux' or 'windows')",
                s
            ))),
        }
    }
}

impl TryFrom<String> for BoxKind {
    type Error = ResolveError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// What the caller knows about a machine before resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineSpec {
    pub name: String,
    pub kind: BoxKind,
    pub hostname: String,
    pub ip: String,

    /// Memory in MB; `None` defers to the configuration document
    #[serde(default)]
    pub memory: Option<u64>,

    /// Box image; `None` or empty defers to the document, then to the fallback box
    #[serde(default, rename = "box")]
    pub box_name: Option<String>,

    /// Box source URL; `None` or empty defers to the document
    #[serde(default)]
    pub url: Option<String>,
}

impl MachineSpec {
    pub fn new(
        name: impl Into<String>,
        kind: BoxKind,
        hostname: impl Into<String>,
        ip: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            hostname: hostname.into(),
            ip: ip.into(),
            memory: None,
            box_name: None,
            url: None,
        }
    }

    pub fn with_memory(mut self, memory: u64) -> Self {
        self.memory = Some(memory);
        self
    }

    pub fn with_box(mut self, box_name: impl Into<String>) -> Self {
        self.box_name = Some(box_name.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// One machine's final settings, fixed at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MachineDescriptor {
    name: String,
    kind: BoxKind,
    hostname: String,
    ip: String,
    memory: u64,
    #[serde(rename = "box")]
    box_name: String,
    url: Option<String>,
}

impl MachineDescriptor {
    /// Resolve `spec` against `store`. Each field is resolved independently.
    pub fn resolve(spec: MachineSpec, store: &ConfigStore) -> Self {
        let MachineSpec {
            name,
            kind,
            hostname,
            ip,
            memory,
            box_name,
            url,
        } = spec;

        let memory = memory.unwrap_or_else(|| store.memory(&name));
        let box_name = box_name
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| store.box_name(kind, &name));
        let url = url.filter(|u| !u.is_empty()).or_else(|| store.box_url(&name));

        debug!(machine = %name, %kind, memory, box_name = %box_name, "Machine resolved");

        Self {
            name,
            kind,
            hostname,
            ip,
            memory,
            box_name,
            url,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> BoxKind {
        self.kind
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn ip(&self) -> &str {
        &self.ip
    }

    pub fn memory(&self) -> u64 {
        self.memory
    }

    pub fn box_name(&self) -> &str {
        &self.box_name
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

/// Machines of one run, read from a TOML manifest with `[[machine]]` tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineManifest {
    #[serde(default, rename = "machine")]
    pub machines: Vec<MachineSpec>,
}

impl MachineManifest {
    pub fn load(path: &Path) -> Result<Self, ResolveError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ResolveError::Manifest(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let manifest: MachineManifest = toml::from_str(&text)
            .map_err(|e| ResolveError::Manifest(format!("{}: {}", path.display(), e)))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Parse and validate manifest text.
    pub fn parse(text: &str) -> Result<Self, ResolveError> {
        let manifest: MachineManifest =
            toml::from_str(text).map_err(|e| ResolveError::Manifest(e.to_string()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Names must be non-empty and unique within the run.
    pub fn validate(&self) -> Result<(), ResolveError> {
        let mut seen = HashSet::new();
        for spec in &self.machines {
            if spec.name.is_empty() {
                return Err(ResolveError::Manifest(
                    "Machine name cannot be empty".to_string(),
                ));
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(ResolveError::Manifest(format!(
                    "Duplicate machine name '{}'",
                    spec.name
                )));
            }
        }
        Ok(())
    }

    /// Resolve every machine against `store`, keeping manifest order.
    pub fn resolve(&self, store: &ConfigStore) -> Vec<MachineDescriptor> {
        self.machines
            .iter()
            .cloned()
            .map(|spec| MachineDescriptor::resolve(spec, store))
            .collect()
    }
}
