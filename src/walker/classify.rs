//! Directory-or-not decision for a single listing entry
//!
//! The listing's own type hint is used whenever it is present and trusted,
//! because it costs nothing. Otherwise the entry is lstat'ed. An lstat never
//! follows symlinks, so a link to a directory still classifies as a link.

use super::types::{ClassifyMode, EntryKind, RawEntry};
use crate::error::{Result, WalkError};
use std::fs::DirEntry;
use std::path::Path;
use tracing::debug;

/// Whether directory listings on this platform carry a file type
///
/// On Unix the type comes from `d_type` and on Windows from the find data,
/// both handed over with the name. Elsewhere we assume nothing.
pub const fn type_hints_available() -> bool {
    cfg!(any(unix, windows))
}

/// Classifies entries according to a mode fixed at construction
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    mode: ClassifyMode,
}

impl Classifier {
    pub fn new(force_metadata: bool) -> Self {
        let mode = if force_metadata || !type_hints_available() {
            ClassifyMode::Metadata
        } else {
            ClassifyMode::TypeHint
        };
        Self { mode }
    }

    pub fn mode(&self) -> ClassifyMode {
        self.mode
    }

    /// Turn a std listing item into a [`RawEntry`]
    ///
    /// In metadata mode the hint is not even read.
    pub fn raw_entry(&self, entry: &DirEntry) -> RawEntry {
        let hint = match self.mode {
            ClassifyMode::TypeHint => entry.file_type().ok().map(EntryKind::from),
            ClassifyMode::Metadata => None,
        };
        RawEntry::new(entry.file_name(), hint)
    }

    /// Decide what `entry`, living at `full_path`, is
    pub fn classify(&self, entry: &RawEntry, full_path: &Path) -> Result<EntryKind> {
        if self.mode == ClassifyMode::TypeHint {
            if let Some(kind) = entry.hint {
                debug!(path = %full_path.display(), source = "hint", ?kind, "classified");
                return Ok(kind);
            }
        }

        let metadata =
            std::fs::symlink_metadata(full_path).map_err(|source| WalkError::Metadata {
                path: full_path.to_path_buf(),
                source,
            })?;
        let kind = EntryKind::from(metadata.file_type());
        debug!(path = %full_path.display(), source = "metadata", ?kind, "classified");
        Ok(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_mode_selection() {
        assert_eq!(Classifier::new(true).mode(), ClassifyMode::Metadata);
        if type_hints_available() {
            assert_eq!(Classifier::new(false).mode(), ClassifyMode::TypeHint);
        }
    }

    #[test]
    fn test_hint_is_taken_without_touching_disk() {
        let classifier = Classifier::new(false);
        if classifier.mode() != ClassifyMode::TypeHint {
            return;
        }
        // Path does not exist, so any lstat would fail
        let entry = RawEntry::new("ghost", Some(EntryKind::Directory));
        let kind = classifier
            .classify(&entry, Path::new("/definitely/not/here/ghost"))
            .unwrap();
        assert_eq!(kind, EntryKind::Directory);
    }

    #[test]
    fn test_missing_hint_falls_back_to_metadata() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();

        let classifier = Classifier::new(false);
        let dir = classifier
            .classify(&RawEntry::new("sub", None), &temp.path().join("sub"))
            .unwrap();
        let file = classifier
            .classify(&RawEntry::new("a.txt", None), &temp.path().join("a.txt"))
            .unwrap();

        assert_eq!(dir, EntryKind::Directory);
        assert_eq!(file, EntryKind::File);
    }

    #[test]
    fn test_forced_metadata_ignores_a_wrong_hint() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();

        let classifier = Classifier::new(true);
        let entry = RawEntry::new("sub", Some(EntryKind::File));
        let kind = classifier.classify(&entry, &temp.path().join("sub")).unwrap();
        assert_eq!(kind, EntryKind::Directory);
    }

    #[test]
    fn test_metadata_failure_is_reported_with_path() {
        let temp = TempDir::new().unwrap();
        let gone = temp.path().join("gone");

        let err = Classifier::new(true)
            .classify(&RawEntry::new("gone", None), &gone)
            .unwrap_err();
        match err {
            WalkError::Metadata { path, .. } => assert_eq!(path, gone),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_to_directory_is_not_a_directory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("real")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("real"), temp.path().join("link")).unwrap();

        for force in [false, true] {
            let classifier = Classifier::new(force);
            let listed = fs::read_dir(temp.path())
                .unwrap()
                .map(|e| e.unwrap())
                .find(|e| e.file_name() == "link")
                .unwrap();
            let raw = classifier.raw_entry(&listed);
            let kind = classifier.classify(&raw, &listed.path()).unwrap();
            assert_eq!(kind, EntryKind::Symlink, "force_metadata = {force}");
        }
    }
}
