//! CLI parse: clap types for machine-config. No behavior; definitions only.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// machine-config - resolve box, memory and shared-folder settings for test machines
#[derive(Parser, Debug)]
#[command(name = "machine-config")]
#[command(about = "Resolve per-machine box, memory and shared-folder settings for test VM fleets")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Settings file path (replaces global and workspace settings files)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Configuration document path (overrides settings)
    #[arg(long)]
    pub document: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub verbose: bool,

    /// Disable logging
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Output format for resolved machines and folders
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve every machine of a manifest
    Machines {
        /// Machine manifest (TOML with [[machine]] tables)
        #[arg(long, default_value = "machines.toml")]
        manifest: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Resolve the shared folders of one category
    Folders {
        /// Folder category (sshfs, nfs, rsync, ...)
        category: String,
        /// Override variable (default: SSSD_TEST_SUITE_<CATEGORY>)
        #[arg(long)]
        env_var: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print provider-ready guest definitions as JSON
    Plan {
        /// Machine manifest (TOML with [[machine]] tables)
        #[arg(long, default_value = "machines.toml")]
        manifest: PathBuf,
    },
    /// Print the effective settings as JSON
    Settings,
}
