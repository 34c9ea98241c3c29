//! Error types for the gdb-breakpoints generator

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for breakpoint file generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Source root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Source root is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("Failed to create output file {}: {source}", path.display())]
    OutputCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output file {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read source file {}: {source}", path.display())]
    ReadSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory traversal failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, GeneratorError>;
