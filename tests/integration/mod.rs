//! Integration tests for machine configuration resolution

mod cli_commands;
mod guest_plan;
mod machine_resolution;
mod settings_loader;
mod test_utils;
