use crate::error::{CounterKind, Result, WalkError};
use serde::{Serialize, Serializer};
use std::ffi::OsString;
use std::fs::FileType;
use std::path::{Path, PathBuf};

/// Running totals for one traversal
///
/// Exactly one instance exists per walk; every level of the tree mutates it
/// through `&mut`. Both fields only grow and stay below [`Counters::LIMIT`]:
/// an increment that would reach it is an error rather than a wrap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub directories: u64,
    pub files: u64,
}

impl Counters {
    /// Value neither counter may reach
    pub const LIMIT: u64 = u64::MAX;

    /// Create zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create counters preloaded with existing totals
    pub fn starting_at(directories: u64, files: u64) -> Self {
        Self { directories, files }
    }

    /// Count one real subdirectory
    pub fn record_directory(&mut self) -> Result<()> {
        let next = bump(self.directories).ok_or_else(|| self.overflow(CounterKind::Directories))?;
        self.directories = next;
        Ok(())
    }

    /// Count one non-directory entry
    pub fn record_file(&mut self) -> Result<()> {
        let next = bump(self.files).ok_or_else(|| self.overflow(CounterKind::Files))?;
        self.files = next;
        Ok(())
    }

    /// True while nothing has been counted
    pub fn is_empty(&self) -> bool {
        self.directories == 0 && self.files == 0
    }

    fn overflow(&self, counter: CounterKind) -> WalkError {
        WalkError::CounterOverflow {
            counter,
            directories: self.directories,
            files: self.files,
        }
    }
}

fn bump(value: u64) -> Option<u64> {
    value.checked_add(1).filter(|&next| next < Counters::LIMIT)
}

/// What a directory entry is, judged without following symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    Symlink,
    Other,
}

impl EntryKind {
    pub fn is_dir(self) -> bool {
        self == EntryKind::Directory
    }
}

impl From<FileType> for EntryKind {
    fn from(ft: FileType) -> Self {
        // is_symlink first: a FileType from lstat never reports a link as a dir
        if ft.is_symlink() {
            EntryKind::Symlink
        } else if ft.is_dir() {
            EntryKind::Directory
        } else if ft.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}

/// One listing item: a name plus whatever type hint the listing carried
#[derive(Debug, Clone)]
pub struct RawEntry {
    pub name: OsString,
    /// `None` when the listing had no usable hint
    pub hint: Option<EntryKind>,
}

impl RawEntry {
    pub fn new(name: impl Into<OsString>, hint: Option<EntryKind>) -> Self {
        Self {
            name: name.into(),
            hint,
        }
    }

    /// `.` and `..` are never real content
    pub fn is_pseudo(&self) -> bool {
        self.name == "." || self.name == ".."
    }
}

/// How entries get classified during a walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassifyMode {
    /// Trust the listing's type hint, lstat only when it is missing
    TypeHint,
    /// lstat every entry
    Metadata,
}

/// Knobs for a single walk
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Ignore readdir type hints and lstat every entry
    pub force_metadata: bool,
    /// Longest joined path the walker will build
    pub max_path_len: usize,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            force_metadata: cfg!(feature = "force-metadata"),
            max_path_len: DEFAULT_MAX_PATH_LEN,
        }
    }
}

/// PATH_MAX on Unix
#[cfg(not(windows))]
pub const DEFAULT_MAX_PATH_LEN: usize = 4096;

/// MAX_PATH on Windows
#[cfg(windows)]
pub const DEFAULT_MAX_PATH_LEN: usize = 260;

/// Outcome of a completed walk
#[derive(Debug, Clone, Serialize)]
pub struct WalkSummary {
    #[serde(rename = "path", serialize_with = "lossy_path")]
    pub root: PathBuf,
    pub directories: u64,
    pub files: u64,
    /// Non-fatal failures reported along the way
    pub errors: u64,
    pub mode: ClassifyMode,
}

impl WalkSummary {
    /// Nothing counted, typically because the root failed to open
    pub fn is_empty(&self) -> bool {
        self.directories == 0 && self.files == 0
    }
}

/// JSON strings are UTF-8, so undecodable bytes become U+FFFD
fn lossy_path<S: Serializer>(path: &Path, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}
