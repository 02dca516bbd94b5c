//! Glob matching for dot-delimited paths
//!
//! Paths such as `DB.host1.cpu.load` are matched segment by segment: a
//! [`GGlob`] holds one glob per segment, and a [`PathTree`] groups many of
//! them by segment count so each path is only compared with patterns of the
//! same depth. Inside a segment `.` is never matched by a wildcard.

pub mod gglob;
pub mod path;
pub mod tree;

pub use gglob::GGlob;
pub use path::{path_level, split_path};
pub use tree::PathTree;
