//! Error types for the gmatcher library
//!
//! Wraps the errors of the sub-crates so callers can use one `Result` type
//! across glob compilation and tree construction.

use thiserror::Error;

/// Main error type for gmatcher operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatcherError {
    /// Pattern failed to compile
    #[error(transparent)]
    Glob(#[from] GlobError),

    /// Pattern could not be added to a tree
    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl MatcherError {
    /// Whether this is the soft "pattern already present" signal of a tree load
    pub fn is_pattern_exists(&self) -> bool {
        matches!(self, MatcherError::Tree(TreeError::PatternExists { .. }))
    }
}

/// Result type alias for gmatcher operations
pub type Result<T> = std::result::Result<T, MatcherError>;

pub use gmatcher_glob::{Construct, GlobError};
pub use gmatcher_tree::TreeError;
