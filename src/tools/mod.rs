//! gdb-breakpoints MCP tools module
//!
//! Wraps the command file generator in an RMCP 0.3.2 tool handler.

pub mod gdb_tools;
pub mod types;

pub use gdb_tools::*;
pub use types::*;
