//! CLI domain: parse, route, help, output, and presentation only.
//! No resolution logic; the single route table dispatches to the library.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands, OutputFormat};
pub use presentation::{
    format_folders_json, format_folders_text, format_machines_json, format_machines_text,
    format_plan_json,
};
pub use route::RunContext;
