//! Glob compilation and matching
//!
//! This crate compiles glob patterns into a literal prefix, a literal suffix
//! and a short sequence of [`Item`]s, then matches them with a greedy-star
//! engine that searches forward for the next anchor after each `*`.
//!
//! # Syntax
//!
//! - `*` matches any run of code points, including none
//! - `?` matches exactly one code point
//! - `[a-z0-9]` matches one code point from a class
//! - `{foo,bar}` matches one of the alternatives; an empty alternative
//!   (`{,foo}`) makes the whole list optional, and alternatives may contain
//!   wildcards (`{a*,b?c}`)
//!
//! Every other byte matches itself. Patterns are compiled once into a
//! [`Glob`], whose canonical text ([`Glob::node`]) is the same for patterns
//! that compile to the same matcher (`a**c` and `a*c`, `{b,a}` and `{a,b}`).
//!
//! # Example
//!
//! ```
//! use gmatcher_glob::Glob;
//!
//! let glob = Glob::parse("img-{small,large}-*.png").unwrap();
//! assert!(glob.is_match("img-large-0042.png"));
//! assert!(!glob.is_match("img-medium-0042.png"));
//! ```

pub mod ascii_set;
pub mod error;
pub mod glob;
pub mod group;
pub mod item;
pub mod list;
pub mod matcher;
mod parse;
pub mod runes;
pub mod store;
pub mod utils;

pub use ascii_set::AsciiSet;
pub use error::{Construct, GlobError};
pub use glob::Glob;
pub use group::{Chain, Group};
pub use item::{Find, Item};
pub use list::StringList;
pub use matcher::Flow;
pub use runes::{RuneRange, RuneRanges};
pub use store::{AllStore, GlobStore, IndexStore, MinStore, Sinks, Store};
pub use utils::{has_wildcard, index_last_wildcard, index_wildcard, wildcard_count};
