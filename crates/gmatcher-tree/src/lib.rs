//! Multi-pattern glob matching
//!
//! [`GlobTree`] stores many globs in one shared tree so a candidate string is
//! matched against all of them in a single walk. Each pattern carries a
//! caller-chosen index; matching reports the canonical text and index of
//! every pattern that matches.

pub mod error;
pub mod tree;

pub use error::{Result, TreeError};
pub use tree::GlobTree;
