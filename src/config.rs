//! Configuration for the gdb-breakpoints generator and MCP server

use std::path::PathBuf;
use clap::Parser;

use crate::generator::{
    GeneratorConfig, DEFAULT_EXTENSIONS, DEFAULT_MARKER, DEFAULT_OUTPUT, DEFAULT_REMOTE,
};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "gdb-breakpoints")]
#[command(about = "Generate a GDB command file from //BREAK markers in a source tree")]
#[command(version)]
pub struct Args {
    /// Source tree to scan
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Output command file (relative paths resolve under the source root)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Marker substring that flags a breakpoint line
    #[arg(long, default_value = DEFAULT_MARKER)]
    pub marker: String,

    /// Comma-separated file suffixes to scan
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_EXTENSIONS.map(String::from))]
    pub extensions: Vec<String>,

    /// Remote target for the `target remote` directive
    #[arg(long, default_value = DEFAULT_REMOTE)]
    pub remote: String,

    /// Keep raw filesystem order instead of sorting directory entries
    #[arg(long, default_value = "false")]
    pub unsorted: bool,

    /// Print the command file to stdout instead of writing it
    #[arg(long, default_value = "false")]
    pub dry_run: bool,

    /// Run as an MCP server over stdio instead of generating once
    #[arg(long, default_value = "false")]
    pub serve: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log file path (defaults to stderr)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Runtime configuration derived from CLI args
#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub output: PathBuf,
    pub marker: String,
    pub extensions: Vec<String>,
    pub remote: String,
    pub sorted: bool,
}

impl Config {
    pub fn from_args(args: &Args) -> Self {
        Self {
            root: args.root.clone(),
            output: args.output.clone(),
            marker: args.marker.clone(),
            extensions: normalize_extensions(&args.extensions),
            remote: args.remote.clone(),
            sorted: !args.unsorted,
        }
    }

    /// Per-run generator settings with the output path resolved against the root
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            root: self.root.clone(),
            output: self.root.join(&self.output),
            marker: self.marker.clone(),
            extensions: self.extensions.clone(),
            remote: self.remote.clone(),
            sorted: self.sorted,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output: PathBuf::from(DEFAULT_OUTPUT),
            marker: DEFAULT_MARKER.to_string(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            remote: DEFAULT_REMOTE.to_string(),
            sorted: true,
        }
    }
}

/// Trim suffixes, drop empties, and prepend a dot where one is missing
pub fn normalize_extensions(extensions: &[String]) -> Vec<String> {
    extensions
        .iter()
        .map(|e| e.trim())
        .filter(|e| !e.is_empty())
        .map(|e| if e.starts_with('.') { e.to_string() } else { format!(".{}", e) })
        .collect()
}
