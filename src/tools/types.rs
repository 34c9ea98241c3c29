//! Type definitions for gdb-breakpoints MCP tools

use serde::{Deserialize, Serialize};
use schemars::JsonSchema;

use crate::generator::{BreakpointDirective, ScanSummary};

// ============================================================================
// generate_gdb_commands
// ============================================================================

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct GenerateArgs {
    /// Source tree to scan (defaults to the server's --root)
    #[serde(default)]
    pub root: Option<String>,
    /// Output command file, relative paths resolve under the root (default: "gdbcommands.txt")
    #[serde(default)]
    pub output: Option<String>,
    /// Marker substring (default: "//BREAK")
    #[serde(default)]
    pub marker: Option<String>,
    /// File suffixes to scan (default: [".c", ".S", ".h"])
    #[serde(default)]
    pub extensions: Option<Vec<String>>,
    /// Remote target for `target remote` (default: "10.0.2.2:1234")
    #[serde(default)]
    pub remote: Option<String>,
}

// ============================================================================
// list_breakpoints
// ============================================================================

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListBreakpointsArgs {
    /// Source tree to scan (defaults to the server's --root)
    #[serde(default)]
    pub root: Option<String>,
    /// Marker substring (default: "//BREAK")
    #[serde(default)]
    pub marker: Option<String>,
    /// File suffixes to scan (default: [".c", ".S", ".h"])
    #[serde(default)]
    pub extensions: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct ListBreakpointsResult {
    pub breakpoints: Vec<BreakpointDirective>,
    pub summary: ScanSummary,
    /// Command file text as it would be written
    pub document: String,
}
