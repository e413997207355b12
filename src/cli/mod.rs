//! Command-line interface for dircnt
//!
//! A single command: count what lives below one directory. Flags map onto
//! [`DircntConfig`] and win over the config file and environment.

use crate::config::{DircntConfig, OutputFormat};
use crate::walker::{self, Counters, WalkOptions};
use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;

mod output;

pub use output::{Output, render_summary};

/// Count the files and directories in a directory tree
#[derive(Parser, Debug)]
#[command(
    name = "dircnt",
    version,
    about = "Count files and directories in a directory tree",
    long_about = "Walks a directory tree depth-first and reports how many files and \
                  subdirectories it holds. Symbolic links are counted as files and never \
                  followed.",
    after_help = "EXAMPLES:\n    \
        dircnt /var/lib\n    \
        dircnt --force-metadata /mnt/nfs/share\n    \
        DIRCNT_FORMAT=json dircnt ."
)]
pub struct Cli {
    /// Directory to count
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Use custom configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// lstat every entry instead of trusting directory-listing type hints
    #[arg(long)]
    pub force_metadata: bool,

    /// Longest path to build before abandoning a directory
    #[arg(long, value_name = "NUM")]
    pub max_path_len: Option<usize>,

    /// Summary format
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl Cli {
    /// Execute the count
    ///
    /// Walk failures are reported on stderr and still exit 0. Only a counter
    /// overflow changes the exit status.
    pub fn run(self) -> Result<ExitCode> {
        setup_logging(self.verbose);

        let mut config = DircntConfig::load(self.config.as_deref())?;
        config.apply_overrides(self.force_metadata, self.max_path_len, self.format)?;
        debug!(?config, "configuration loaded");

        let output = Output::new(self.verbose > 0, config.format);
        count_and_report(&self.path, &config.walk_options(), Counters::new(), &output)
    }
}

/// Walk `path` on top of `counters` and turn the outcome into an exit status
///
/// The summary is printed only for a completed walk.
fn count_and_report(
    path: &Path,
    options: &WalkOptions,
    counters: Counters,
    output: &Output,
) -> Result<ExitCode> {
    match walker::count_from(path, options, counters, output) {
        Ok(summary) => {
            output.summary(&summary)?;
            output.verbose(&format!(
                "classified by {:?}, {} failure(s) reported",
                summary.mode, summary.errors
            ));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            output.critical(&e.to_string());
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}

fn setup_logging(verbose: u8) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("dircnt=info,warn"),
            2 => tracing_subscriber::EnvFilter::new("dircnt=debug,warn"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // stdout is reserved for the summary
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OVERFLOW_EXIT_CODE;
    use clap::CommandFactory;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_path_defaults_to_current_directory() {
        let cli = Cli::try_parse_from(["dircnt"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("."));
        assert_eq!(cli.verbose, 0);
        assert!(!cli.force_metadata);
        assert_eq!(cli.format, None);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "dircnt",
            "-vv",
            "--force-metadata",
            "--max-path-len",
            "1024",
            "--format",
            "json",
            "/tmp",
        ])
        .unwrap();
        assert_eq!(cli.path, PathBuf::from("/tmp"));
        assert_eq!(cli.verbose, 2);
        assert!(cli.force_metadata);
        assert_eq!(cli.max_path_len, Some(1024));
        assert_eq!(cli.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_only_one_path() {
        assert!(Cli::try_parse_from(["dircnt", "a", "b"]).is_err());
    }

    #[test]
    fn test_counter_limit_exits_with_overflow_status() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("only")).unwrap();
        let output = Output::new(false, OutputFormat::Text);

        for force_metadata in [false, true] {
            let options = WalkOptions {
                force_metadata,
                ..WalkOptions::default()
            };
            let start = Counters::starting_at(Counters::LIMIT - 1, 0);
            let code = count_and_report(temp.path(), &options, start, &output).unwrap();
            assert_eq!(code, ExitCode::from(OVERFLOW_EXIT_CODE));
        }
    }

    #[test]
    fn test_completed_walk_exits_zero() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("only")).unwrap();
        let output = Output::new(false, OutputFormat::Text);

        let start = Counters::starting_at(Counters::LIMIT - 2, 0);
        let code = count_and_report(temp.path(), &WalkOptions::default(), start, &output).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        // unopenable root is reported, not fatal
        let missing = temp.path().join("missing");
        let code =
            count_and_report(&missing, &WalkOptions::default(), Counters::new(), &output).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }
}
