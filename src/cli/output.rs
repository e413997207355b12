//! Output system for dircnt
//!
//! stdout carries exactly one thing, the summary. Everything else (failure
//! reports, verbose notes) goes to stderr, styled with console. Styling is
//! dropped automatically when the stream is not a terminal.

use crate::config::OutputFormat;
use crate::error::WalkError;
use crate::walker::{Report, WalkSummary};
use anyhow::Result;
use console::style;
use std::io::Write;
use std::path::Path;

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    format: OutputFormat,
}

impl Output {
    /// Create a new output handler
    pub fn new(verbose: bool, format: OutputFormat) -> Self {
        Self { verbose, format }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✖").red(), message);
    }

    /// Print a critical error with enhanced styling
    pub fn critical(&self, message: &str) {
        eprintln!("{} {}", style("✖").red().bold(), style(message).red().bold());
    }

    /// Print a verbose message (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("{} {}", style("ℹ").dim(), style(message).dim());
        }
    }

    /// Print the walk summary; nothing at all when nothing was counted
    pub fn summary(&self, summary: &WalkSummary) -> Result<()> {
        if let Some(mut line) = render_summary(summary, self.format)? {
            line.push(b'\n');
            std::io::stdout().lock().write_all(&line)?;
        }
        Ok(())
    }
}

impl Report for Output {
    fn report(&self, error: &WalkError) {
        self.error(&error.to_string());
    }
}

/// The stdout line for `summary`, or `None` when both counts are zero
///
/// The text form carries the root exactly as given, undecodable bytes
/// included. JSON has to be UTF-8 and substitutes them.
pub fn render_summary(summary: &WalkSummary, format: OutputFormat) -> Result<Option<Vec<u8>>> {
    if summary.is_empty() {
        return Ok(None);
    }

    let line = match format {
        OutputFormat::Text => {
            let mut line = path_bytes(&summary.root);
            write!(
                line,
                " contains {} files and {} directories",
                summary.files, summary.directories
            )?;
            line
        }
        OutputFormat::Json => serde_json::to_vec(summary)?,
    };
    Ok(Some(line))
}

#[cfg(unix)]
fn path_bytes(path: &Path) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().to_vec()
}

#[cfg(not(unix))]
fn path_bytes(path: &Path) -> Vec<u8> {
    path.to_string_lossy().into_owned().into_bytes()
}
