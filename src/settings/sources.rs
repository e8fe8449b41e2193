//! Settings sources, one module per layer.

pub mod environment;
pub mod global_file;
pub mod workspace_file;
