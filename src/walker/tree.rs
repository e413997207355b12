//! Depth-first tree walker
//!
//! The walk keeps its own stack of open directories instead of recursing, so
//! tree depth is limited by heap rather than by the call stack. Each frame
//! owns one `ReadDir` handle; popping a frame drops the handle and closes the
//! directory, which covers every exit path.
//!
//! Failure policy:
//! - a directory that cannot be opened is reported and its subtree skipped
//! - a failed lstat or an overlong path is reported and the directory being
//!   listed is abandoned; its parent carries on with the next sibling
//! - a counter overflow ends the walk and is returned to the caller

use super::classify::Classifier;
use super::types::{ClassifyMode, Counters, RawEntry, WalkOptions, WalkSummary};
use crate::error::{Result, WalkError};
use std::cell::Cell;
use std::fs::ReadDir;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use tracing::{debug, trace};

/// Receives every non-fatal failure met during a walk
pub trait Report {
    fn report(&self, error: &WalkError);
}

/// Report sink that drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Report for Silent {
    fn report(&self, _error: &WalkError) {}
}

/// An open directory whose listing is partly consumed
struct Frame {
    path: PathBuf,
    entries: ReadDir,
}

/// What to do after looking at one entry
#[derive(Debug, PartialEq, Eq)]
enum Step {
    Counted,
    Skipped,
    Descend(PathBuf),
}

/// Counts files and directories below a root
#[derive(Debug, Clone)]
pub struct TreeWalker {
    classifier: Classifier,
    max_path_len: usize,
}

impl TreeWalker {
    pub fn new(options: &WalkOptions) -> Self {
        Self {
            classifier: Classifier::new(options.force_metadata),
            max_path_len: options.max_path_len,
        }
    }

    pub fn mode(&self) -> ClassifyMode {
        self.classifier.mode()
    }

    /// Walk `root`, adding to `counters`
    ///
    /// Returns how many failures were handed to `report`. The only error
    /// returned is [`WalkError::CounterOverflow`].
    pub fn walk(&self, root: &Path, counters: &mut Counters, report: &dyn Report) -> Result<u64> {
        let reported = Cell::new(0u64);
        let emit = |error: WalkError| {
            debug_assert!(!error.is_fatal());
            reported.set(reported.get() + 1);
            report.report(&error);
        };

        let mut stack: Vec<Frame> = Vec::new();
        match open(root) {
            Ok(frame) => stack.push(frame),
            Err(e) => {
                emit(e);
                return Ok(reported.get());
            }
        }

        debug!(root = %root.display(), mode = ?self.mode(), "walk started");

        while let Some(frame) = stack.last_mut() {
            let entry = match frame.entries.next() {
                Some(Ok(entry)) => entry,
                Some(Err(source)) => {
                    let path = frame.path.clone();
                    stack.pop();
                    emit(WalkError::ReadEntry { path, source });
                    continue;
                }
                None => {
                    trace!(path = %frame.path.display(), "closing directory");
                    stack.pop();
                    continue;
                }
            };

            let raw = self.classifier.raw_entry(&entry);
            match self.step(&frame.path, &raw, counters) {
                Ok(Step::Descend(path)) => match open(&path) {
                    Ok(child) => stack.push(child),
                    Err(e) => emit(e),
                },
                Ok(Step::Counted | Step::Skipped) => {}
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    debug!(path = %frame.path.display(), "abandoning directory");
                    stack.pop();
                    emit(e);
                }
            }
        }

        debug!(
            directories = counters.directories,
            files = counters.files,
            "walk finished"
        );
        Ok(reported.get())
    }

    /// Classify one entry of `parent` and update the counters
    fn step(&self, parent: &Path, entry: &RawEntry, counters: &mut Counters) -> Result<Step> {
        let len = parent.as_os_str().len() + 1 + entry.name.len();
        if len > self.max_path_len {
            return Err(WalkError::PathTooLong {
                parent: parent.to_path_buf(),
                separator: MAIN_SEPARATOR,
                name: entry.name.to_string_lossy().into_owned(),
                len,
            });
        }

        let full_path = parent.join(&entry.name);
        let kind = self.classifier.classify(entry, &full_path)?;

        if !kind.is_dir() {
            counters.record_file()?;
            return Ok(Step::Counted);
        }
        if entry.is_pseudo() {
            trace!(path = %full_path.display(), "skipping pseudo entry");
            return Ok(Step::Skipped);
        }
        counters.record_directory()?;
        Ok(Step::Descend(full_path))
    }
}

fn open(path: &Path) -> Result<Frame> {
    trace!(path = %path.display(), "opening directory");
    let entries = std::fs::read_dir(path).map_err(|source| WalkError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Frame {
        path: path.to_path_buf(),
        entries,
    })
}

/// Walk `root` with fresh counters and collect the result
pub fn count(root: impl AsRef<Path>, options: &WalkOptions, report: &dyn Report) -> Result<WalkSummary> {
    count_from(root, options, Counters::new(), report)
}

/// Walk `root` on top of existing totals
pub fn count_from(
    root: impl AsRef<Path>,
    options: &WalkOptions,
    mut counters: Counters,
    report: &dyn Report,
) -> Result<WalkSummary> {
    let root = root.as_ref();
    let walker = TreeWalker::new(options);
    let errors = walker.walk(root, &mut counters, report)?;

    Ok(WalkSummary {
        root: root.to_path_buf(),
        directories: counters.directories,
        files: counters.files,
        errors,
        mode: walker.mode(),
    })
}
