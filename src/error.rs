//! Error types for machine configuration resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the configuration document or resolving folders from it
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to read configuration file {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed configuration file {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed folder mount '{token}' in ${var}: expected <host>:<guest>")]
    MalformedFolderToken { var: String, token: String },
}

/// Top-level errors surfaced to the driver
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Configuration document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Machine manifest error: {0}")]
    Manifest(String),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ResolveError {
    fn from(err: config::ConfigError) -> Self {
        ResolveError::Settings(err.to_string())
    }
}
