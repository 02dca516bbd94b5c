//! Alternation lists of plain strings, `{foo,bar,baz}`

use crate::ascii_set::AsciiSet;
use memchr::memmem;
use std::fmt;

/// Compiled alternation of literal members
///
/// Members are sorted, deduplicated and non-empty; an empty alternative makes
/// the whole list optional instead of being stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringList {
    vals: Vec<String>,
    optional: bool,
    /// First bytes of all members, valid when `ascii_started` is set
    first: AsciiSet,
    ascii_started: bool,
    min_size: usize,
    max_size: usize,
}

impl StringList {
    /// Build a list from sorted, deduplicated, non-empty members
    pub(crate) fn new(vals: Vec<String>, optional: bool) -> Self {
        let mut first = AsciiSet::new();
        let mut ascii_started = true;
        for v in &vals {
            match v.as_bytes().first() {
                Some(&b) if first.insert(b) => {}
                _ => ascii_started = false,
            }
        }
        let min_size = if optional {
            0
        } else {
            vals.iter().map(String::len).min().unwrap_or(0)
        };
        let max_size = vals.iter().map(String::len).max().unwrap_or(0);

        Self {
            vals,
            optional,
            first,
            ascii_started,
            min_size,
            max_size,
        }
    }

    /// Members in sorted order
    pub fn values(&self) -> &[String] {
        &self.vals
    }

    /// Whether the empty string is one of the alternatives
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn len(&self) -> usize {
        self.vals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vals.is_empty()
    }

    pub fn min_len(&self) -> usize {
        self.min_size
    }

    pub fn max_len(&self) -> usize {
        self.max_size
    }

    /// Cheap pre-check: can any member start at the beginning of `s`?
    #[inline]
    pub fn may_start(&self, s: &str) -> bool {
        if !self.ascii_started {
            return true;
        }
        s.as_bytes()
            .first()
            .is_some_and(|&b| self.first.contains(b))
    }

    /// Earliest offset in `s` where some member could start
    pub fn find_candidate(&self, s: &str) -> Option<usize> {
        if self.ascii_started {
            return self.first.position(s.as_bytes());
        }
        self.vals
            .iter()
            .filter_map(|v| memmem::find(s.as_bytes(), v.as_bytes()))
            .min()
    }

    /// Byte lengths of every member that is a prefix of `s`
    pub fn prefix_matches<'a>(&'a self, s: &'a str) -> impl Iterator<Item = usize> + 'a {
        let allowed = self.may_start(s);
        self.vals
            .iter()
            .filter(move |v| allowed && s.starts_with(v.as_str()))
            .map(String::len)
    }
}

impl fmt::Display for StringList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, v) in self.vals.iter().enumerate() {
            if i > 0 || self.optional {
                f.write_str(",")?;
            }
            f.write_str(v)?;
        }
        f.write_str("}")
    }
}
