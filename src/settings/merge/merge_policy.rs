//! Merge rules: defaults, override order, conflict handling.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

pub const DEFAULT_DOCUMENT: &str = "config.json";
pub const DEFAULT_LINUX_BOX: &str = "sssd-fedora";
pub const DEFAULT_WINDOWS_BOX: &str = "sssd-windows";

/// Create a Config builder with merge policy defaults applied.
///
/// Sources added afterwards override these in the order they are added.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("document", DEFAULT_DOCUMENT)?
        .set_default("boxes.linux", DEFAULT_LINUX_BOX)?
        .set_default("boxes.windows", DEFAULT_WINDOWS_BOX)
}
