pub mod classify;
pub mod tree;
pub mod types;

// Re-export main types for easier access
pub use classify::{Classifier, type_hints_available};
pub use tree::{Report, Silent, TreeWalker, count, count_from};
pub use types::{ClassifyMode, Counters, DEFAULT_MAX_PATH_LEN, EntryKind, RawEntry, WalkOptions, WalkSummary};
