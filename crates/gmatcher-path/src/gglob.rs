//! Per-segment glob for dot-delimited paths

use crate::path::path_level;
use gmatcher_glob::{Glob, GlobError};
use std::fmt;

/// A dotted pattern compiled into one [`Glob`] per segment
///
/// A path matches when it has exactly as many segments as the pattern and
/// every segment matches its glob. Dots never match inside a segment glob.
///
/// # Example
///
/// ```
/// use gmatcher_path::GGlob;
///
/// let gglob = GGlob::parse("DB.*.{A,B}.*.X").unwrap();
/// assert!(gglob.match_path("DB.host1.A.cpu.X"));
/// assert!(!gglob.match_path("DB.host1.A.X"));
/// assert!(!gglob.match_path("DB.host1.C.cpu.X"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GGlob {
    raw: String,
    node: String,
    parts: Vec<Glob>,
    min_len: usize,
    max_len: Option<usize>,
}

impl GGlob {
    /// Compile a dotted pattern. One trailing `.` is ignored.
    ///
    /// # Errors
    ///
    /// [`GlobError::EmptySegment`] for an empty pattern or an empty segment,
    /// and any error from compiling a segment.
    pub fn parse(pattern: &str) -> Result<Self, GlobError> {
        let (trimmed, level) = path_level(pattern);
        if level == 0 {
            return Err(GlobError::EmptySegment {
                path: pattern.to_string(),
            });
        }

        let mut parts = Vec::with_capacity(level);
        for segment in trimmed.split('.') {
            if segment.is_empty() {
                return Err(GlobError::EmptySegment {
                    path: pattern.to_string(),
                });
            }
            parts.push(Glob::parse(segment)?);
        }

        let dots = parts.len() - 1;
        let min_len = parts.iter().map(Glob::min_len).sum::<usize>() + dots;
        let max_len = parts
            .iter()
            .try_fold(dots, |acc, part| part.max_len().map(|max| acc + max));
        let node = parts.iter().map(Glob::node).collect::<Vec<_>>().join(".");

        Ok(Self {
            raw: pattern.to_string(),
            node,
            parts,
            min_len,
            max_len,
        })
    }

    /// Match a dotted path, cutting segments as it goes
    pub fn match_path(&self, path: &str) -> bool {
        let (mut rest, level) = path_level(path);
        if level != self.parts.len() || !self.len_in_bounds(rest.len()) {
            return false;
        }
        for part in &self.parts {
            let (segment, tail) = rest.split_once('.').unwrap_or((rest, ""));
            if segment.is_empty() || !part.is_match(segment) {
                return false;
            }
            rest = tail;
        }
        true
    }

    /// Match a path already split into segments
    pub fn match_parts(&self, parts: &[&str]) -> bool {
        if parts.is_empty() || parts.len() != self.parts.len() {
            return false;
        }
        let len = parts.iter().map(|p| p.len()).sum::<usize>() + parts.len() - 1;
        if !self.len_in_bounds(len) {
            return false;
        }
        self.parts
            .iter()
            .zip(parts)
            .all(|(glob, segment)| !segment.is_empty() && glob.is_match(segment))
    }

    fn len_in_bounds(&self, len: usize) -> bool {
        len >= self.min_len && self.max_len.map_or(true, |max| len <= max)
    }

    /// Pattern text as written
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Canonical text: canonical segment globs joined by `.`
    pub fn node(&self) -> &str {
        &self.node
    }

    /// Segment globs in order
    pub fn parts(&self) -> &[Glob] {
        &self.parts
    }

    /// Number of segments
    pub fn level(&self) -> usize {
        self.parts.len()
    }

    /// Minimum matching path length in bytes, dots included
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// Maximum matching path length in bytes, `None` when unbounded
    pub fn max_len(&self) -> Option<usize> {
        self.max_len
    }
}

impl fmt::Display for GGlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let gglob = GGlob::parse("a.b*.{y,x}.").unwrap();
        assert_eq!(gglob.level(), 3);
        assert_eq!(gglob.node(), "a.b*.{x,y}");
        assert_eq!(gglob.raw(), "a.b*.{y,x}.");
        assert_eq!(gglob.min_len(), 5);
        assert_eq!(gglob.max_len(), None);

        let gglob = GGlob::parse("ab.c?").unwrap();
        assert_eq!(gglob.min_len(), 5);
        assert_eq!(gglob.max_len(), Some(8));
    }

    #[test]
    fn test_parse_errors() {
        for pattern in ["", ".", "a..b", ".a", "a.."] {
            assert_eq!(
                GGlob::parse(pattern),
                Err(GlobError::EmptySegment {
                    path: pattern.to_string()
                }),
                "pattern {:?}",
                pattern
            );
        }
        assert!(matches!(
            GGlob::parse("a.[b"),
            Err(GlobError::UnclosedBracket { .. })
        ));
    }

    #[test]
    fn test_match_path() {
        let gglob = GGlob::parse("DB.*.{A,B}.*.X").unwrap();
        assert!(gglob.match_path("DB.h.B.m.X"));
        assert!(gglob.match_path("DB.h.B.m.X."));
        assert!(!gglob.match_path("DB.h.B.m.X.Y"));
        assert!(!gglob.match_path("DB..B.m.X"));
        assert!(!gglob.match_path(""));

        let gglob = GGlob::parse("a.*").unwrap();
        assert!(gglob.match_path("a.b"));
        assert!(!gglob.match_path("a.b.c"));
    }

    #[test]
    fn test_match_parts_agrees_with_match_path() {
        let gglob = GGlob::parse("DB.*.{A,B}.*.X").unwrap();
        for path in ["DB.h.A.m.X", "DB.h.C.m.X", "DB.h.A.X", "DB..A.m.X", "DB.h.A.m.X."] {
            let mut parts = Vec::new();
            crate::path::split_path(path, &mut parts);
            assert_eq!(gglob.match_parts(&parts), gglob.match_path(path), "path {:?}", path);
        }
        assert!(!gglob.match_parts(&[]));
    }
}
