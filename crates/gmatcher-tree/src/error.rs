//! Error types for pattern trees

use gmatcher_glob::GlobError;
use thiserror::Error;

/// Errors from adding patterns to a tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The pattern, or one with the same canonical form, is already stored.
    ///
    /// Batch loads usually treat this as "already present" and carry on.
    #[error("pattern {pattern:?} already exists with index {index}")]
    PatternExists { pattern: String, index: usize },

    /// The index is already used by another pattern
    #[error("index {index} already used by pattern {pattern:?}")]
    DuplicateIndex { index: usize, pattern: String },

    #[error(transparent)]
    Glob(#[from] GlobError),
}

/// Result type for tree operations
pub type Result<T> = std::result::Result<T, TreeError>;
