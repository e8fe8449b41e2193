//! machine-config: per-machine settings for test VM fleets
//!
//! Resolves box image, memory and shared folders for each machine of a run by merging an
//! optional JSON configuration document, explicit per-machine values, fallback boxes and
//! environment overrides. Nothing here provisions machines; the orchestration tool reads
//! the resolved descriptors and guest definitions.

pub mod cli;
pub mod config;
pub mod env;
pub mod error;
pub mod guest;
pub mod logging;
pub mod machine;
pub mod settings;

pub use crate::config::{ConfigDocument, ConfigStore, FallbackBoxes, FolderKind, FolderMapping};
pub use env::Environment;
pub use error::{DocumentError, ResolveError};
pub use guest::GuestDefinition;
pub use machine::{BoxKind, MachineDescriptor, MachineManifest, MachineSpec};
