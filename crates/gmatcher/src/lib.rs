//! Gmatcher - fast glob matching
//!
//! Gmatcher matches strings against glob patterns (`*`, `?`, `[a-z]`,
//! `{foo,bar}`) at three scales:
//!
//! - [`Glob`]: one compiled pattern, matched with a greedy-star engine that
//!   searches forward for the next literal after each `*`
//! - [`GlobTree`]: many patterns in one shared tree, matched in a single walk
//! - [`PathTree`]: many dotted patterns (`DB.*.cpu`), matched segment by
//!   segment and grouped by segment count
//!
//! Compiled patterns and trees are immutable while matching and can be shared
//! between threads. Result buffers are owned by the caller and can be reused
//! across calls.
//!
//! # Quick Start
//!
//! ```
//! use gmatcher::{Glob, GlobTree, PathTree};
//!
//! let glob = Glob::parse("*.{jpg,png}")?;
//! assert!(glob.is_match("photo.png"));
//!
//! let tree = GlobTree::from_patterns(["*.log", "app-*", "app-*.log"])?;
//! let mut indices = Vec::new();
//! assert_eq!(tree.match_into("app-1.log", None, Some(&mut indices), None), 3);
//!
//! let paths = PathTree::from_patterns(["DB.*.cpu", "DB.host?.*"])?;
//! assert_eq!(paths.match_into("DB.host1.cpu", None, None, None), 2);
//! # Ok::<(), gmatcher::MatcherError>(())
//! ```

pub mod error;

pub use error::{MatcherError, Result};

pub use gmatcher_glob::{
    has_wildcard, index_last_wildcard, index_wildcard, wildcard_count, AllStore, Construct,
    Glob, GlobError, GlobStore, IndexStore, Item, MinStore, Store,
};
pub use gmatcher_path::{path_level, split_path, GGlob, PathTree};
pub use gmatcher_tree::{GlobTree, TreeError};

/// Compile a single glob
pub fn parse(pattern: &str) -> Result<Glob> {
    Ok(Glob::parse(pattern)?)
}

/// Compile a dotted pattern
pub fn parse_path(pattern: &str) -> Result<GGlob> {
    Ok(GGlob::parse(pattern)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wraps_errors() {
        let err = parse("a{b").unwrap_err();
        assert!(matches!(err, MatcherError::Glob(GlobError::UnclosedBracket { .. })));
        assert_eq!(err.to_string(), "Unclosed bracket: {b");

        let err = parse_path("a..b").unwrap_err();
        assert!(matches!(err, MatcherError::Glob(GlobError::EmptySegment { .. })));
    }

    #[test]
    fn test_tree_errors_convert() {
        let mut tree = GlobTree::new();
        tree.add("a*", 0).unwrap();
        let err: MatcherError = tree.add("a*", 1).unwrap_err().into();
        assert!(err.is_pattern_exists());
        assert_eq!(err.to_string(), "pattern \"a*\" already exists with index 0");

        let err: MatcherError = tree.add("b", 0).unwrap_err().into();
        assert!(!err.is_pattern_exists());
    }
}
