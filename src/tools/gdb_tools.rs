//! RMCP 0.3.2 implementation for gdb-breakpoints MCP tools
//!
//! Exposes the command file generator as 2 tools: one that writes the file
//! and one that previews the breakpoints without touching disk.

use rmcp::{
    tool, tool_router, tool_handler, ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::*,
    ErrorData as McpError,
    service::RequestContext,
    RoleServer,
};
use tracing::{debug, info};
use std::future::Future;
use std::path::PathBuf;

use super::types::*;
use crate::config::{normalize_extensions, Config};
use crate::error::GeneratorError;
use crate::generator::{self, GeneratorConfig};

/// GDB breakpoint tool handler
#[derive(Clone)]
pub struct GdbBreakpointsToolHandler {
    #[allow(dead_code)]
    tool_router: ToolRouter<GdbBreakpointsToolHandler>,
    config: Config,
}

impl GdbBreakpointsToolHandler {
    pub fn new(config: Config) -> Self {
        Self {
            tool_router: Self::tool_router(),
            config,
        }
    }

    /// Apply per-call overrides on top of the server configuration
    fn generator_config(
        &self,
        root: Option<String>,
        output: Option<String>,
        marker: Option<String>,
        extensions: Option<Vec<String>>,
        remote: Option<String>,
    ) -> GeneratorConfig {
        let mut config = self.config.clone();
        if let Some(root) = root {
            config.root = PathBuf::from(root);
        }
        if let Some(output) = output {
            config.output = PathBuf::from(output);
        }
        if let Some(marker) = marker {
            config.marker = marker;
        }
        if let Some(extensions) = extensions {
            config.extensions = normalize_extensions(&extensions);
        }
        if let Some(remote) = remote {
            config.remote = remote;
        }
        config.generator_config()
    }
}

impl Default for GdbBreakpointsToolHandler {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

fn to_mcp_error(err: GeneratorError) -> McpError {
    match err {
        GeneratorError::RootNotFound(_)
        | GeneratorError::RootNotDirectory(_)
        | GeneratorError::InvalidConfig(_) => McpError::invalid_params(err.to_string(), None),
        _ => McpError::internal_error(err.to_string(), None),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("Serialization error: {}", e), None)
    })
}

#[tool_router]
impl GdbBreakpointsToolHandler {
    #[tool(description = "Scan a source tree for //BREAK markers and write a GDB command file (target remote, one break per marker, continue). Returns a JSON summary.")]
    async fn generate_gdb_commands(&self, Parameters(args): Parameters<GenerateArgs>) -> Result<CallToolResult, McpError> {
        let config = self.generator_config(args.root, args.output, args.marker, args.extensions, args.remote);
        debug!("Generating GDB commands for {}", config.root.display());

        let summary = generator::generate(&config).map_err(to_mcp_error)?;
        let json = to_json(&summary)?;

        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "List the breakpoints that would be generated for a source tree without writing the command file")]
    async fn list_breakpoints(&self, Parameters(args): Parameters<ListBreakpointsArgs>) -> Result<CallToolResult, McpError> {
        let config = self.generator_config(args.root, None, args.marker, args.extensions, None);
        debug!("Listing breakpoints under {}", config.root.display());

        let (document, summary) = generator::collect(&config).map_err(to_mcp_error)?;
        info!("Found {} breakpoints in {} source files", summary.breakpoints, summary.source_files);

        let result = ListBreakpointsResult {
            document: document.render(),
            breakpoints: document.breakpoints,
            summary,
        };
        let json = to_json(&result)?;

        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for GdbBreakpointsToolHandler {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "GDB Breakpoints MCP Server - Generate GDB command files from //BREAK markers. \
                 2 tools available: generate_gdb_commands, list_breakpoints.".to_string()
            ),
        }
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<InitializeResult, McpError> {
        info!("GDB Breakpoints MCP server initialized with 2 tools");
        Ok(self.get_info())
    }
}
