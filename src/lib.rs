//! # dircnt - Count files and directories, fast
//!
//! dircnt walks a directory tree depth-first and tallies the files and
//! subdirectories it holds, using as few system calls as the platform allows.
//!
//! ## Classification
//!
//! Each listing entry is classified as directory or not:
//!
//! - **Type hint first**: the file type readdir hands back with the name is
//!   free, so it is used whenever present
//! - **lstat fallback**: when the hint is missing, or hints are switched off
//!   with `force_metadata`, the entry is lstat'ed
//!
//! Symlinks are judged by the link itself, so they count as files and are
//! never followed.
//!
//! ## Quick Start
//!
//! ```bash
//! dircnt /srv/data
//! # /srv/data contains 81234 files and 5120 directories
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use dircnt::walker::{Silent, WalkOptions, count};
//!
//! let summary = count("/srv/data", &WalkOptions::default(), &Silent)?;
//! println!("{} files, {} directories", summary.files, summary.directories);
//! # Ok::<(), dircnt::WalkError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod walker;

pub use cli::{Cli, Output};
pub use config::DircntConfig;
pub use error::{OVERFLOW_EXIT_CODE, WalkError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
