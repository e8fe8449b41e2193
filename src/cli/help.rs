//! CLI command-name contract for logging.

use crate::cli::parse::Commands;

/// Command name string for log records (e.g. "machines", "folders").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Machines { .. } => "machines",
        Commands::Folders { .. } => "folders",
        Commands::Plan { .. } => "plan",
        Commands::Settings => "settings",
    }
}
