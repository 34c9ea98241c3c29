//! GDB Breakpoints Main Entry Point

use clap::Parser;
use std::io::Write;
use tracing::{info, error, debug};
use tracing_subscriber::{EnvFilter, fmt};
use rmcp::{ServiceExt, transport::stdio};

use gdb_breakpoints::{generator, Args, Config, GdbBreakpointsToolHandler};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = Config::from_args(&args);

    if args.serve {
        return serve(config).await;
    }

    let gen_config = config.generator_config();
    if args.dry_run {
        let (document, summary) = generator::collect(&gen_config).inspect_err(|e| {
            error!("Scan failed: {}", e);
        })?;
        std::io::stdout().write_all(document.render().as_bytes())?;
        info!("Found {} breakpoints in {} source files", summary.breakpoints, summary.source_files);
    } else {
        generator::generate(&gen_config).inspect_err(|e| {
            error!("Generation failed: {}", e);
        })?;
    }

    Ok(())
}

async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting GDB Breakpoints MCP Server v{}", env!("CARGO_PKG_VERSION"));

    let service = GdbBreakpointsToolHandler::new(config)
        .serve(stdio()).await.inspect_err(|e| {
            error!("Serving error: {:?}", e);
        })?;

    service.waiting().await?;
    Ok(())
}

fn init_logging(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(false)
        .with_line_number(false);

    if let Some(log_file) = &args.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)?;
        subscriber.with_writer(file).init();
    } else {
        subscriber.with_writer(std::io::stderr).init();
    }

    debug!("Logging initialized with level: {}", args.log_level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use gdb_breakpoints::config::{Args, Config};
    use std::path::PathBuf;

    #[test]
    fn test_args_parsing_defaults() {
        let args = Args::parse_from(["gdb-breakpoints"]);
        assert_eq!(args.root, PathBuf::from("."));
        assert_eq!(args.output, PathBuf::from("gdbcommands.txt"));
        assert_eq!(args.marker, "//BREAK");
        assert_eq!(args.extensions, vec![".c", ".S", ".h"]);
        assert_eq!(args.remote, "10.0.2.2:1234");
        assert!(!args.unsorted);
        assert!(!args.dry_run);
        assert!(!args.serve);
        assert_eq!(args.log_level, "info");
        assert!(args.log_file.is_none());
    }

    #[test]
    fn test_args_parsing_with_options() {
        let args = Args::parse_from([
            "gdb-breakpoints",
            "--root", "/workdir/mp3/student-distrib",
            "-o", "/tmp/gdbcommands.txt",
            "--marker", "//BP",
            "--extensions", "c,S",
            "--remote", "localhost:1234",
            "--unsorted",
            "--dry-run",
            "--log-level", "debug",
        ]);
        assert_eq!(args.root.to_str().unwrap(), "/workdir/mp3/student-distrib");
        assert_eq!(args.output.to_str().unwrap(), "/tmp/gdbcommands.txt");
        assert_eq!(args.marker, "//BP");
        assert_eq!(args.extensions, vec!["c", "S"]);
        assert_eq!(args.remote, "localhost:1234");
        assert!(args.unsorted);
        assert!(args.dry_run);
        assert_eq!(args.log_level, "debug");
    }

    #[test]
    fn test_config_from_args() {
        let args = Args::parse_from([
            "gdb-breakpoints",
            "--root", "/src",
            "--extensions", "c,.h",
            "--unsorted",
        ]);
        let config = Config::from_args(&args);
        assert_eq!(config.root.to_str().unwrap(), "/src");
        assert_eq!(config.extensions, vec![".c", ".h"]);
        assert!(!config.sorted);
        assert_eq!(
            config.generator_config().output.to_str().unwrap(),
            "/src/gdbcommands.txt"
        );
    }

    #[test]
    fn test_serve_flag() {
        let args = Args::parse_from(["gdb-breakpoints", "--serve"]);
        assert!(args.serve);
    }
}
