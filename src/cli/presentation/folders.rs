//! Folder mapping formatters.

use super::to_pretty_json;
use crate::config::FolderMapping;
use crate::error::ResolveError;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;

pub fn format_folders_text(category: &str, folders: &FolderMapping) -> String {
    if folders.is_empty() {
        return format!("No {} folders.\n", category);
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Host", "Guest"]);
    for (host, guest) in folders.iter() {
        table.add_row(vec![host, guest]);
    }
    format!("{}\n", table)
}

/// Mapping as a JSON object keyed by host path.
pub fn format_folders_json(folders: &FolderMapping) -> Result<String, ResolveError> {
    to_pretty_json(folders)
}
