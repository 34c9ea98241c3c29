//! GDB Breakpoints
//!
//! Generates a GDB command file from `//BREAK` marker comments in a kernel
//! source tree: connect to the QEMU GDB stub, set a breakpoint on every tagged
//! line, then continue. Runs once from the command line or as a Model Context
//! Protocol server exposing the same generator as tools.

pub mod config;
pub mod error;
pub mod generator;
pub mod tools;

pub use config::{Args, Config};
pub use error::{GeneratorError, Result};
pub use generator::{BreakpointDirective, CommandFile, GeneratorConfig, ScanSummary};
pub use tools::GdbBreakpointsToolHandler;
