//! Error types for dircnt
//!
//! Every failure the walker can meet is a [`WalkError`]. All of them are
//! reported on the error stream; only [`WalkError::CounterOverflow`] stops
//! the program.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit status used when a counter would overflow
pub const OVERFLOW_EXIT_CODE: u8 = 3;

/// Which counter ran out of room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterKind {
    Directories,
    Files,
}

impl std::fmt::Display for CounterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CounterKind::Directories => f.write_str("directory"),
            CounterKind::Files => f.write_str("file"),
        }
    }
}

/// Failures met while walking a tree
#[derive(Error, Debug)]
pub enum WalkError {
    /// Directory could not be opened (missing, not a directory, permission)
    #[error("{}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Listing broke off while reading the next entry
    #[error("{}: {source}", .path.display())]
    ReadEntry {
        path: PathBuf,
        source: std::io::Error,
    },

    /// lstat of an entry failed during fallback classification
    #[error("{}: {source}", .path.display())]
    Metadata {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Joined path would exceed the platform limit
    #[error("path too long ({len}) {}{separator}{name}", .parent.display())]
    PathTooLong {
        parent: PathBuf,
        separator: char,
        name: String,
        len: usize,
    },

    /// Incrementing a counter would reach its limit
    #[error("{counter} counter limit reached ({directories} directories, {files} files)")]
    CounterOverflow {
        counter: CounterKind,
        directories: u64,
        files: u64,
    },
}

impl WalkError {
    /// True when the whole program has to stop
    pub fn is_fatal(&self) -> bool {
        matches!(self, WalkError::CounterOverflow { .. })
    }

    /// Exit status the binary reports for this error
    pub fn exit_code(&self) -> u8 {
        if self.is_fatal() { OVERFLOW_EXIT_CODE } else { 0 }
    }
}

/// Result type alias for walker operations
pub type Result<T> = std::result::Result<T, WalkError>;
