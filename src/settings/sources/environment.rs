//! Environment source: MACHINE_CONFIG_* variables from the run's snapshot.
//!
//! `__` separates nesting levels, so `MACHINE_CONFIG_BOXES__LINUX` sets `boxes.linux`.

use crate::env::Environment;
use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;

pub const ENV_PREFIX: &str = "MACHINE_CONFIG";

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    env: &Environment,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let prefix = format!("{}_", ENV_PREFIX);
    let vars: config::Map<String, String> = env
        .with_prefix(&prefix)
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    Ok(builder.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .source(Some(vars)),
    ))
}
