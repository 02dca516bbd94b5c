//! Error types for glob compilation

use std::fmt;

/// Which bracketed construct a malformed pattern was inside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    /// Character class, `[...]`
    Class,
    /// Alternation list, `{...}`
    List,
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Construct::Class => f.write_str("character class"),
            Construct::List => f.write_str("alternation list"),
        }
    }
}

/// Error type for glob and dotted-path compilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobError {
    /// A `[` or `{` with no matching closer; carries the unterminated tail
    UnclosedBracket {
        /// Pattern text from the opening bracket to the end
        segment: String,
    },

    /// A stray closer or a construct that cannot be compiled
    MalformedClassOrList {
        /// Construct the error was found in
        kind: Construct,
        /// Offending pattern text
        text: String,
    },

    /// A dotted path with an empty segment (`a..b`, `.a`, or an empty path)
    EmptySegment {
        /// The whole dotted pattern
        path: String,
    },
}

impl fmt::Display for GlobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlobError::UnclosedBracket { segment } => {
                write!(f, "Unclosed bracket: {}", segment)
            }
            GlobError::MalformedClassOrList { kind, text } => {
                write!(f, "Malformed {}: {}", kind, text)
            }
            GlobError::EmptySegment { path } => write!(f, "Empty path segment: {:?}", path),
        }
    }
}

impl std::error::Error for GlobError {}
