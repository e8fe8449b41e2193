//! Shared-folder mappings: document entries, environment overrides, and the kinds of mount.

use crate::env::{NFS_FOLDERS_VAR, RSYNC_FOLDERS_VAR, SSHFS_FOLDERS_VAR};
use crate::error::DocumentError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

/// Host path to guest path, keyed by host path
///
/// Inserting an existing host path replaces its guest path. Iteration is sorted by host path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderMapping {
    entries: BTreeMap<String, String>,
}

impl FolderMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the guest path for `host`.
    pub fn insert(&mut self, host: impl Into<String>, guest: impl Into<String>) {
        self.entries.insert(host.into(), guest.into());
    }

    pub fn get(&self, host: &str) -> Option<&str> {
        self.entries.get(host).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(h, g)| (h.as_str(), g.as_str()))
    }
}

impl IntoIterator for FolderMapping {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<H: Into<String>, G: Into<String>> FromIterator<(H, G)> for FolderMapping {
    fn from_iter<T: IntoIterator<Item = (H, G)>>(iter: T) -> Self {
        let mut mapping = FolderMapping::new();
        for (host, guest) in iter {
            mapping.insert(host, guest);
        }
        mapping
    }
}

/// Folder sharing mechanism
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderKind {
    Sshfs,
    Nfs,
    Rsync,
}

impl FolderKind {
    /// Mount order used when planning a guest.
    pub const ALL: [FolderKind; 3] = [FolderKind::Sshfs, FolderKind::Nfs, FolderKind::Rsync];

    /// Key under `folders` in the configuration document.
    pub fn category(self) -> &'static str {
        match self {
            FolderKind::Sshfs => "sshfs",
            FolderKind::Nfs => "nfs",
            FolderKind::Rsync => "rsync",
        }
    }

    /// Environment variable carrying `host:guest` overrides for this kind.
    pub fn env_var(self) -> &'static str {
        match self {
            FolderKind::Sshfs => SSHFS_FOLDERS_VAR,
            FolderKind::Nfs => NFS_FOLDERS_VAR,
            FolderKind::Rsync => RSYNC_FOLDERS_VAR,
        }
    }

    pub fn from_category(category: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.category() == category)
    }
}

impl fmt::Display for FolderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.category())
    }
}

/// Default override variable for a category: the known one, or `SSSD_TEST_SUITE_<CATEGORY>`.
pub fn default_env_var(category: &str) -> String {
    match FolderKind::from_category(category) {
        Some(kind) => kind.env_var().to_string(),
        None => format!("SSSD_TEST_SUITE_{}", category.to_ascii_uppercase()),
    }
}

/// Insert the `{host, guest}` entries of a document category into `mapping`, in order.
///
/// Entries that are not mappings, or whose host or guest is missing, empty, or not a
/// string, are skipped. A category value that is not a sequence contributes nothing.
pub(crate) fn merge_document_entries(category: &str, value: Option<&Value>, mapping: &mut FolderMapping) {
    let Some(value) = value else {
        return;
    };
    let Some(entries) = value.as_array() else {
        warn!(category, "Folder category is not a list, ignoring it");
        return;
    };

    for entry in entries {
        let host = entry.get("host").and_then(Value::as_str).unwrap_or_default();
        let guest = entry.get("guest").and_then(Value::as_str).unwrap_or_default();
        if host.is_empty() || guest.is_empty() {
            continue;
        }
        mapping.insert(host, guest);
    }
}

/// Split a `host:guest` token on its first colon.
///
/// Returns `None` when there is no colon or either side is empty.
pub fn split_mount(token: &str) -> Option<(&str, &str)> {
    let (host, guest) = token.split_once(':')?;
    if host.is_empty() || guest.is_empty() {
        return None;
    }
    Some((host, guest))
}

/// Parse a whitespace-separated list of `host:guest` tokens taken from variable `var`.
pub fn parse_mount_overrides(var: &str, value: &str) -> Result<Vec<(String, String)>, DocumentError> {
    value
        .split_whitespace()
        .map(|token| {
            split_mount(token)
                .map(|(host, guest)| (host.to_string(), guest.to_string()))
                .ok_or_else(|| DocumentError::MalformedFolderToken {
                    var: var.to_string(),
                    token: token.to_string(),
                })
        })
        .collect()
}
