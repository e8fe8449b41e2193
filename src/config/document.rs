//! Configuration document: the parsed JSON tree and safe path descent through it.

use crate::error::DocumentError;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Parsed configuration document
///
/// Any JSON value is accepted as the root. Lookups walk mappings only, so a document whose
/// root is not a mapping behaves exactly like an empty one.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    root: Value,
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self::empty()
    }
}

impl ConfigDocument {
    /// Document with no keys (equivalent to `{}`).
    pub fn empty() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }

    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Parse JSON text.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text).map(Self::from_value)
    }

    /// Load a document from disk.
    ///
    /// A missing file yields an empty document. Every other read failure and any parse
    /// failure is an error naming the path.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Configuration file not found, using empty document");
                return Ok(Self::empty());
            }
            Err(source) => {
                return Err(DocumentError::Unreadable {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::parse(&text).map_err(|source| DocumentError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Descend through nested mappings by key.
    ///
    /// Returns `None` as soon as a segment is missing or the current node is not a mapping.
    /// An explicit JSON `null` leaf counts as missing.
    pub fn dig(&self, path: &[&str]) -> Option<&Value> {
        path.iter()
            .try_fold(&self.root, |node, key| node.as_object()?.get(*key))
            .filter(|value| !value.is_null())
    }

    /// String leaf at `path`, ignoring empty strings and non-string values.
    pub fn dig_str(&self, path: &[&str]) -> Option<&str> {
        self.dig(path)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}
