//! Logging System
//!
//! Structured logging implementation using the `tracing` crate. Logs go to stderr by default
//! so that resolved output on stdout stays machine-readable.

use crate::env::Environment;
use crate::error::ResolveError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Full filter directive, e.g. `machine_config=debug`.
pub const LOG_FILTER_VAR: &str = "MACHINE_CONFIG_LOG";
pub const LOG_FORMAT_VAR: &str = "MACHINE_CONFIG_LOG_FORMAT";
pub const LOG_OUTPUT_VAR: &str = "MACHINE_CONFIG_LOG_OUTPUT";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Turn logging off entirely
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stderr, stdout, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path, required when output is "file"
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format only, stdout/stderr only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputDestination {
    Stdout,
    Stderr,
    File,
}

/// Fold the `MACHINE_CONFIG_LOG*` variables of the snapshot into `config`.
///
/// Priority order (highest to lowest):
/// 1. CLI arguments (applied by the binary after this call)
/// 2. Environment variables (MACHINE_CONFIG_LOG, MACHINE_CONFIG_LOG_FORMAT, ...)
/// 3. Settings file
/// 4. Defaults
///
/// `MACHINE_CONFIG_LOG` is a full filter directive and replaces the per-module levels.
pub fn apply_env_overrides(config: &mut LoggingConfig, env: &Environment) -> Result<(), ResolveError> {
    if let Some(directives) = env.get(LOG_FILTER_VAR) {
        EnvFilter::try_new(directives)
            .map_err(|e| ResolveError::Logging(format!("Invalid {}: {}", LOG_FILTER_VAR, e)))?;
        config.level = directives.to_string();
        config.modules.clear();
    }
    if let Some(format) = env.get(LOG_FORMAT_VAR) {
        validate_format(format)
            .map_err(|e| ResolveError::Logging(format!("{} in {}", e, LOG_FORMAT_VAR)))?;
        config.format = format.to_string();
    }
    if let Some(output) = env.get(LOG_OUTPUT_VAR) {
        parse_output_destination(output)?;
        config.output = output.to_string();
    }
    Ok(())
}

/// Initialize the logging system from an already merged configuration
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), ResolveError> {
    if config.map(|c| !c.enabled).unwrap_or(false) {
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let format = config.map(|c| c.format.as_str()).unwrap_or("text");
    validate_format(format).map_err(ResolveError::Logging)?;
    let output = parse_output_destination(config.map(|c| c.output.as_str()).unwrap_or("stderr"))?;
    let use_color = config.map(|c| c.color).unwrap_or(true) && output != OutputDestination::File;

    let writer = match output {
        OutputDestination::Stdout => BoxMakeWriter::new(std::io::stdout),
        OutputDestination::Stderr => BoxMakeWriter::new(std::io::stderr),
        OutputDestination::File => BoxMakeWriter::new(Mutex::new(open_log_file(config)?)),
    };

    let base_subscriber = Registry::default().with(filter);
    let result = if format == "json" {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init()
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(use_color)
                    .with_writer(writer),
            )
            .try_init()
    };

    result.map_err(|e| ResolveError::Logging(format!("Failed to install subscriber: {}", e)))
}

fn open_log_file(config: Option<&LoggingConfig>) -> Result<std::fs::File, ResolveError> {
    let log_file = config
        .and_then(|c| c.file.clone())
        .ok_or_else(|| ResolveError::Logging("Log output is 'file' but no log file is set".to_string()))?;

    if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            ResolveError::Logging(format!("Failed to create log directory: {}", e))
        })?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .map_err(|e| ResolveError::Logging(format!("Failed to open log file {:?}: {}", log_file, e)))
}

/// Build environment filter from config
fn build_env_filter(config: Option<&LoggingConfig>) -> Result<EnvFilter, ResolveError> {
    let level = config.map(|c| c.level.as_str()).unwrap_or("warn");
    if level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::try_new(level)
        .map_err(|e| ResolveError::Logging(format!("Invalid log level '{}': {}", level, e)))?;

    if let Some(config) = config {
        for (module, module_level) in &config.modules {
            let directive = format!("{}={}", module, module_level);
            filter = filter.add_directive(
                directive
                    .parse()
                    .map_err(|e| ResolveError::Logging(format!("Invalid log directive: {}", e)))?,
            );
        }
    }

    Ok(filter)
}

fn validate_format(format: &str) -> Result<(), String> {
    if format == "json" || format == "text" {
        Ok(())
    } else {
        Err(format!("Invalid log format: {} (must be 'json' or 'text')", format))
    }
}

fn parse_output_destination(output: &str) -> Result<OutputDestination, ResolveError> {
    match output {
        "stdout" => Ok(OutputDestination::Stdout),
        "stderr" => Ok(OutputDestination::Stderr),
        "file" => Ok(OutputDestination::File),
        _ => Err(ResolveError::Logging(format!(
            "Invalid log output: {} (must be 'stdout', 'stderr' or 'file')",
            output
        ))),
    }
}
