//! Machine and plan formatters.

use super::to_pretty_json;
use crate::error::ResolveError;
use crate::guest::GuestDefinition;
use crate::machine::MachineDescriptor;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;

/// Format resolved machines as a table (comfy-table).
pub fn format_machines_text(machines: &[MachineDescriptor]) -> String {
    if machines.is_empty() {
        return "No machines in manifest.\n".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Name", "Kind", "Hostname", "IP", "Memory", "Box", "URL"]);
    for machine in machines {
        let memory = match machine.memory() {
            0 => "default".to_string(),
            mb => format!("{} MB", mb),
        };
        table.add_row(vec![
            machine.name().to_string(),
            machine.kind().to_string(),
            machine.hostname().to_string(),
            machine.ip().to_string(),
            memory,
            machine.box_name().to_string(),
            machine.url().unwrap_or("-").to_string(),
        ]);
    }
    format!("{}\n", table)
}

pub fn format_machines_json(machines: &[MachineDescriptor]) -> Result<String, ResolveError> {
    to_pretty_json(machines)
}

pub fn format_plan_json(plan: &[GuestDefinition]) -> Result<String, ResolveError> {
    to_pretty_json(plan)
}
