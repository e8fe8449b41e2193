//! CLI presentation: text and json formatters per command family.

mod folders;
mod machines;

pub use folders::{format_folders_json, format_folders_text};
pub use machines::{format_machines_json, format_machines_text, format_plan_json};

use crate::error::ResolveError;
use serde::Serialize;

pub(crate) fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ResolveError> {
    Ok(serde_json::to_string_pretty(value)?)
}
