//! Breakpoint command file generator
//!
//! Walks a source tree, finds lines tagged with a marker comment (`//BREAK` by
//! default) and writes a GDB command file that connects to a remote target,
//! sets one breakpoint per tagged line and resumes execution:
//!
//! ```text
//! target remote 10.0.2.2:1234
//! break signal.c:53
//! continue
//! ```
//!
//! Breakpoint indices are 0-based: the recorded value is the number of lines
//! read before the tagged line.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::error::{GeneratorError, Result};

pub const DEFAULT_MARKER: &str = "//BREAK";
pub const DEFAULT_REMOTE: &str = "10.0.2.2:1234";
pub const DEFAULT_OUTPUT: &str = "gdbcommands.txt";
pub const DEFAULT_EXTENSIONS: [&str; 3] = [".c", ".S", ".h"];
pub const CONTINUE_DIRECTIVE: &str = "continue";

/// Settings for a single generation run
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Source tree to scan
    pub root: PathBuf,
    /// Command file to write
    pub output: PathBuf,
    /// Substring that flags a breakpoint line
    pub marker: String,
    /// File name suffixes to scan (case-sensitive)
    pub extensions: Vec<String>,
    /// `host:port` of the remote GDB stub
    pub remote: String,
    /// Sort directory entries for reproducible output
    pub sorted: bool,
}

impl GeneratorConfig {
    /// Defaults for `root`, writing `gdbcommands.txt` inside it
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            output: root.join(DEFAULT_OUTPUT),
            root,
            marker: DEFAULT_MARKER.to_string(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            remote: DEFAULT_REMOTE.to_string(),
            sorted: true,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.marker.is_empty() {
            return Err(GeneratorError::InvalidConfig(
                "marker must not be empty".to_string(),
            ));
        }
        if self.remote.trim().is_empty() {
            return Err(GeneratorError::InvalidConfig(
                "remote target must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn matches_extension(&self, file_name: &str) -> bool {
        self.extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
    }

    pub fn connect_directive(&self) -> String {
        format!("target remote {}", self.remote)
    }
}

/// One `break <file>:<line>` line of the command file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakpointDirective {
    /// Bare file name, without directories
    pub file: String,
    /// Number of lines preceding the tagged line
    pub line: usize,
}

impl fmt::Display for BreakpointDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "break {}:{}", self.file, self.line)
    }
}

/// The complete command file held in memory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandFile {
    pub remote: String,
    pub breakpoints: Vec<BreakpointDirective>,
}

impl CommandFile {
    pub fn render(&self) -> String {
        let mut text = format!("target remote {}\n", self.remote);
        for directive in &self.breakpoints {
            text.push_str(&directive.to_string());
            text.push('\n');
        }
        text.push_str(CONTINUE_DIRECTIVE);
        text.push('\n');
        text
    }
}

/// Counters reported after a scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Files whose suffix matched and were read
    pub source_files: usize,
    /// Files containing at least one marker
    pub files_with_markers: usize,
    /// Breakpoint directives emitted
    pub breakpoints: usize,
    /// Command file written, absent for previews
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl ScanSummary {
    fn record(&mut self, directives: &[BreakpointDirective]) {
        self.source_files += 1;
        if !directives.is_empty() {
            self.files_with_markers += 1;
        }
        self.breakpoints += directives.len();
    }
}

/// Scan one source for marker lines.
///
/// Lines are split on `\n` and compared as bytes, so sources that are not
/// valid UTF-8 are still scanned.
pub fn scan_reader<R: BufRead>(
    file_name: &str,
    reader: R,
    marker: &str,
) -> io::Result<Vec<BreakpointDirective>> {
    let marker = marker.as_bytes();
    let mut found = Vec::new();

    for (index, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        if contains(&line, marker) {
            found.push(BreakpointDirective {
                file: file_name.to_string(),
                line: index,
            });
        }
    }

    Ok(found)
}

/// Open `path` and scan it, naming directives after its file name
pub fn scan_file(path: &Path, marker: &str) -> Result<Vec<BreakpointDirective>> {
    let read_error = |source| GeneratorError::ReadSource {
        path: path.to_path_buf(),
        source,
    };

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file = File::open(path).map_err(read_error)?;

    scan_reader(&file_name, BufReader::new(file), marker).map_err(read_error)
}

/// List the files under the root that would be scanned, in visit order.
///
/// The command file itself is skipped when it lives inside the tree.
pub fn source_files(config: &GeneratorConfig) -> Result<Vec<PathBuf>> {
    check_root(&config.root)?;

    let output = fs::canonicalize(&config.output).ok();
    let mut files = Vec::new();

    for entry in walker(config) {
        let entry = entry?;
        if is_dir(&entry) {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !config.matches_extension(&name) {
            continue;
        }

        if output.is_some() && fs::canonicalize(entry.path()).ok() == output {
            debug!("Skipping command file {}", entry.path().display());
            continue;
        }

        files.push(entry.into_path());
    }

    Ok(files)
}

/// Scan the whole tree into memory without writing anything
pub fn collect(config: &GeneratorConfig) -> Result<(CommandFile, ScanSummary)> {
    config.validate()?;

    let mut breakpoints = Vec::new();
    let summary = scan_tree(config, |directives| {
        breakpoints.extend_from_slice(directives);
        Ok(())
    })?;

    let document = CommandFile {
        remote: config.remote.clone(),
        breakpoints,
    };
    Ok((document, summary))
}

/// Write the command file for the configured tree.
///
/// The output is opened (and truncated) before scanning starts and directives
/// are streamed as each source file is read. A read failure part way through
/// leaves the file partially written.
pub fn generate(config: &GeneratorConfig) -> Result<ScanSummary> {
    config.validate()?;
    check_root(&config.root)?;

    let file = File::create(&config.output).map_err(|source| GeneratorError::OutputCreate {
        path: config.output.clone(),
        source,
    })?;
    let mut out = BufWriter::new(file);
    let write_error = |source| GeneratorError::OutputWrite {
        path: config.output.clone(),
        source,
    };

    writeln!(out, "{}", config.connect_directive()).map_err(write_error)?;
    let mut summary = scan_tree(config, |directives| {
        for directive in directives {
            writeln!(out, "{}", directive).map_err(write_error)?;
        }
        Ok(())
    })?;
    writeln!(out, "{}", CONTINUE_DIRECTIVE).map_err(write_error)?;
    out.flush().map_err(write_error)?;

    summary.output = Some(config.output.display().to_string());
    info!(
        "Wrote {} breakpoints from {} of {} source files to {}",
        summary.breakpoints,
        summary.files_with_markers,
        summary.source_files,
        config.output.display()
    );
    Ok(summary)
}

fn scan_tree<F>(config: &GeneratorConfig, mut sink: F) -> Result<ScanSummary>
where
    F: FnMut(&[BreakpointDirective]) -> Result<()>,
{
    let mut summary = ScanSummary::default();

    for path in source_files(config)? {
        let directives = scan_file(&path, &config.marker)?;
        if !directives.is_empty() {
            debug!("{}: {} breakpoints", path.display(), directives.len());
        }
        summary.record(&directives);
        sink(&directives)?;
    }

    Ok(summary)
}

fn check_root(root: &Path) -> Result<()> {
    if !root.exists() {
        return Err(GeneratorError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(GeneratorError::RootNotDirectory(root.to_path_buf()));
    }
    Ok(())
}

fn walker(config: &GeneratorConfig) -> walkdir::IntoIter {
    let walk = WalkDir::new(&config.root).min_depth(1);
    if config.sorted {
        // Files before subdirectories, each group by name
        walk.sort_by(files_first).into_iter()
    } else {
        walk.into_iter()
    }
}

fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    is_dir(a)
        .cmp(&is_dir(b))
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// Directories, including symlinks to directories (which are never descended)
fn is_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir())
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|w| w == needle)
}
