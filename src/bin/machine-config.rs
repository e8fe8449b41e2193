//! machine-config CLI Binary
//!
//! Resolves the machines of a run and prints them for the orchestration tool.

use clap::Parser;
use machine_config::cli::{Cli, RunContext};
use machine_config::env::Environment;
use machine_config::error::ResolveError;
use machine_config::logging::{apply_env_overrides, init_logging, LoggingConfig};
use machine_config::settings::SettingsLoader;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();
    let env = Environment::capture();

    // Build logging config from CLI args, environment and settings
    let initialized = build_logging_config(&cli, &env).and_then(|config| init_logging(Some(&config)));
    if let Err(e) = initialized {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("machine-config starting");

    let context = match RunContext::new(
        cli.workspace.clone(),
        cli.settings.clone(),
        cli.document.clone(),
        env,
    ) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", machine_config::cli::map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", machine_config::cli::map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args, environment and settings.
/// Precedence: CLI flags override MACHINE_CONFIG_LOG* variables override settings override defaults.
fn build_logging_config(cli: &Cli, env: &Environment) -> Result<LoggingConfig, ResolveError> {
    let settings = match cli.settings {
        Some(ref path) => SettingsLoader::load_from_file(path, env),
        None => SettingsLoader::load(&cli.workspace, env),
    };
    let mut config = settings.map(|s| s.logging).unwrap_or_default();
    apply_env_overrides(&mut config, env)?;

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    Ok(config)
}
