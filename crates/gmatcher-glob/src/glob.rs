//! Compiled single glob

use crate::error::GlobError;
use crate::item::{sequence_bounds, Item};
use crate::matcher::match_items;
use crate::parse::parse_items;
use crate::utils::{index_wildcard, wildcard_count, write_literal};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Alternations with more members than this get a hash-set fast path
const LIST_SET_THRESHOLD: usize = 2;

/// A compiled glob pattern
///
/// The pattern is split into a literal prefix, a merged item sequence and a
/// literal suffix. When the item sequence is empty the glob is a plain
/// literal and the whole text is held in the prefix.
///
/// # Example
///
/// ```
/// use gmatcher_glob::Glob;
///
/// let glob = Glob::parse("a{b,c}d").unwrap();
/// assert_eq!(glob.prefix(), "a");
/// assert_eq!(glob.suffix(), "d");
/// assert!(glob.is_match("abd"));
/// assert!(!glob.is_match("ad"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glob {
    raw: String,
    node: String,
    prefix: String,
    suffix: String,
    items: Vec<Item>,
    min_len: usize,
    max_len: Option<usize>,
    vals: Option<HashSet<String>>,
}

impl Glob {
    /// Compile `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`GlobError::UnclosedBracket`] for a `[` or `{` without its
    /// closer, and [`GlobError::MalformedClassOrList`] for a stray `]` or `}`.
    pub fn parse(pattern: &str) -> Result<Self, GlobError> {
        let Some(first) = index_wildcard(pattern) else {
            return Ok(Self::literal(pattern, pattern.to_string()));
        };

        let mut prefix = pattern[..first].to_string();
        let mut items = Vec::with_capacity(wildcard_count(&pattern[first..]) + 1);
        parse_items(&pattern[first..], &mut items)?;

        // Adjacent literals are already merged, so at most one sits at each end
        let mut suffix = String::new();
        if items.last().is_some_and(Item::is_literal) {
            if let Some(last) = items.pop() {
                last.push_literal(&mut suffix);
            }
        }
        if items.first().is_some_and(Item::is_literal) {
            items.remove(0).push_literal(&mut prefix);
        }
        if items.is_empty() {
            prefix.push_str(&suffix);
            return Ok(Self::literal(pattern, prefix));
        }

        let mut node = String::with_capacity(pattern.len());
        write_literal(&mut node, &prefix);
        for item in &items {
            node.push_str(&item.to_string());
        }
        write_literal(&mut node, &suffix);

        let (min, max) = sequence_bounds(&items);
        let fixed = prefix.len() + suffix.len();

        let vals = match items.as_slice() {
            [Item::List(list)] if list.len() > LIST_SET_THRESHOLD => {
                let mut set: HashSet<String> = list.values().iter().cloned().collect();
                if list.is_optional() {
                    set.insert(String::new());
                }
                Some(set)
            }
            _ => None,
        };

        Ok(Self {
            raw: pattern.to_string(),
            node,
            prefix,
            suffix,
            items,
            min_len: min + fixed,
            max_len: max.map(|m| m + fixed),
            vals,
        })
    }

    fn literal(raw: &str, text: String) -> Self {
        let mut node = String::with_capacity(text.len());
        write_literal(&mut node, &text);
        Self {
            raw: raw.to_string(),
            node,
            min_len: text.len(),
            max_len: Some(text.len()),
            prefix: text,
            suffix: String::new(),
            items: Vec::new(),
            vals: None,
        }
    }

    /// Whether the glob matches all of `s`
    pub fn is_match(&self, s: &str) -> bool {
        if self.is_match_all() {
            return true;
        }
        if s.len() < self.min_len || self.max_len.is_some_and(|max| s.len() > max) {
            return false;
        }
        if self.items.is_empty() {
            return s == self.prefix;
        }
        let Some(s) = s.strip_prefix(self.prefix.as_str()) else {
            return false;
        };
        let Some(s) = s.strip_suffix(self.suffix.as_str()) else {
            return false;
        };
        if let Some(vals) = &self.vals {
            return vals.contains(s);
        }
        match_items(s, &self.items)
    }

    /// Pattern text as written
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Canonical pattern text; equal for patterns that compile to the same matcher
    pub fn node(&self) -> &str {
        &self.node
    }

    /// Literal text before the first wildcard, or the whole literal
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Minimum matching input length in bytes
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// Maximum matching input length in bytes, `None` when unbounded
    pub fn max_len(&self) -> Option<usize> {
        self.max_len
    }

    /// Whether the glob matches exactly one string (its prefix)
    pub fn is_literal(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the glob is a bare `*`
    pub fn is_match_all(&self) -> bool {
        self.prefix.is_empty()
            && self.suffix.is_empty()
            && matches!(self.items.as_slice(), [Item::Star(0)])
    }
}

impl FromStr for Glob {
    type Err = GlobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Glob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.node)
    }
}
