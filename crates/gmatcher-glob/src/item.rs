//! Compiled pattern items
//!
//! A glob compiles to a flat sequence of [`Item`]s between a literal prefix
//! and suffix. Adjacent items are merged as they are pushed (see
//! [`push_merged`]) so a sequence never holds two neighbouring literals or
//! two neighbouring `?`/`*` runs.

use crate::group::Group;
use crate::list::StringList;
use crate::runes::RuneRanges;
use crate::utils::{skip_runes, write_literal};
use memchr::{memchr, memmem};
use std::fmt;

/// One compiled element of a glob
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// A single ASCII byte
    Byte(u8),
    /// A single non-ASCII code point
    Rune(char),
    /// Literal text. Empty only for the tree node of an empty pattern.
    String(String),
    /// Character class, `[a-z]`
    RuneRanges(RuneRanges),
    /// Alternation of literal strings, `{foo,bar}`
    List(StringList),
    /// Exactly N code points, `?` repeated N times
    Any(usize),
    /// At least N code points: `*` followed or preceded by N `?`
    Star(usize),
    /// Alternation where some member contains wildcards, `{a*,b?c}`
    Group(Group),
}

/// Result of [`Item::find`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Find {
    /// Leftmost occurrence at `offset`, spanning `len` bytes
    Found { offset: usize, len: usize },
    /// No occurrence anywhere in the input
    NotFound,
    /// The item has no single anchor to search for
    Unsupported,
}

impl Item {
    /// Literal item for `text`: a byte or rune when it is one code point
    pub fn literal(text: &str) -> Self {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => Item::String(text.to_string()),
        }
    }

    fn literal_owned(text: String) -> Self {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => Item::String(text),
        }
    }

    pub fn from_char(c: char) -> Self {
        if c.is_ascii() {
            Item::Byte(c as u8)
        } else {
            Item::Rune(c)
        }
    }

    /// Whether this item matches exactly one fixed string
    pub fn is_literal(&self) -> bool {
        matches!(self, Item::Byte(_) | Item::Rune(_) | Item::String(_))
    }

    /// Append the literal text of a literal item; other kinds append nothing
    pub fn push_literal(&self, out: &mut String) {
        match self {
            Item::Byte(b) => out.push(*b as char),
            Item::Rune(c) => out.push(*c),
            Item::String(s) => out.push_str(s),
            _ => {}
        }
    }

    /// Minimum number of bytes this item consumes
    pub fn min_len(&self) -> usize {
        match self {
            Item::Byte(_) => 1,
            Item::Rune(c) => c.len_utf8(),
            Item::String(s) => s.len(),
            Item::RuneRanges(r) => r.min_len(),
            Item::List(l) => l.min_len(),
            Item::Any(n) | Item::Star(n) => *n,
            Item::Group(g) => g.min_len(),
        }
    }

    /// Maximum number of bytes this item consumes, `None` when unbounded
    pub fn max_len(&self) -> Option<usize> {
        match self {
            Item::Byte(_) => Some(1),
            Item::Rune(c) => Some(c.len_utf8()),
            Item::String(s) => Some(s.len()),
            Item::RuneRanges(r) => Some(r.max_len()),
            Item::List(l) => Some(l.max_len()),
            Item::Any(n) => Some(4 * n),
            Item::Star(_) => None,
            Item::Group(g) => g.max_len(),
        }
    }

    /// Bytes consumed when the item matches at the start of `s`.
    ///
    /// Covers the single-width kinds; for `Star(n)` this is only the `n`
    /// mandatory code points. Lists and groups can end in several places and
    /// are expanded by the matcher instead, so they return `None` here.
    #[inline]
    pub fn match_fixed(&self, s: &str) -> Option<usize> {
        match self {
            Item::Byte(b) => (s.as_bytes().first() == Some(b)).then_some(1),
            Item::Rune(c) => s.starts_with(*c).then(|| c.len_utf8()),
            Item::String(lit) => s.starts_with(lit.as_str()).then_some(lit.len()),
            Item::RuneRanges(r) => r.match_prefix(s),
            Item::Any(n) | Item::Star(n) => skip_runes(s, *n),
            Item::List(_) | Item::Group(_) => None,
        }
    }

    /// End offset of `s` once a literal item is stripped from its tail
    #[inline]
    pub fn match_suffix(&self, s: &str) -> Option<usize> {
        match self {
            Item::Byte(b) => (s.as_bytes().last() == Some(b)).then(|| s.len() - 1),
            Item::Rune(c) => s.ends_with(*c).then(|| s.len() - c.len_utf8()),
            Item::String(lit) => s.ends_with(lit.as_str()).then(|| s.len() - lit.len()),
            _ => None,
        }
    }

    /// Locate the leftmost occurrence of the item in `s`
    pub fn find(&self, s: &str) -> Find {
        let found = match self {
            Item::Byte(b) => memchr(*b, s.as_bytes()).map(|at| (at, 1)),
            Item::Rune(c) => s.find(*c).map(|at| (at, c.len_utf8())),
            Item::String(lit) => memmem::find(s.as_bytes(), lit.as_bytes()).map(|at| (at, lit.len())),
            Item::RuneRanges(r) => r.find(s),
            _ => return Find::Unsupported,
        };
        match found {
            Some((offset, len)) => Find::Found { offset, len },
            None => Find::NotFound,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Byte(_) | Item::Rune(_) | Item::String(_) => {
                let mut text = String::new();
                self.push_literal(&mut text);
                let mut out = String::with_capacity(text.len());
                write_literal(&mut out, &text);
                f.write_str(&out)
            }
            Item::RuneRanges(r) => write!(f, "{}", r),
            Item::List(l) => write!(f, "{}", l),
            Item::Any(n) => f.write_str(&"?".repeat(*n)),
            Item::Star(n) => {
                f.write_str("*")?;
                f.write_str(&"?".repeat(*n))
            }
            Item::Group(g) => write!(f, "{}", g),
        }
    }
}

/// Push `item` onto `items`, merging it into the last item when possible:
///
/// - literal + literal becomes one literal
/// - `?` runs add up, `*` absorbs neighbouring `?` and `*`
pub fn push_merged(items: &mut Vec<Item>, item: Item) {
    let rest = match items.last_mut() {
        Some(last) => merge_into(last, item),
        None => Some(item),
    };
    if let Some(item) = rest {
        items.push(item);
    }
}

/// Returns the item back when it cannot be merged into `last`
fn merge_into(last: &mut Item, item: Item) -> Option<Item> {
    let merged = match (&*last, &item) {
        (Item::Any(n), Item::Any(m)) => Some(Item::Any(n + m)),
        (Item::Any(n), Item::Star(m))
        | (Item::Star(n), Item::Any(m))
        | (Item::Star(n), Item::Star(m)) => Some(Item::Star(n + m)),
        (prev, next) if prev.is_literal() && next.is_literal() => {
            let mut text = String::new();
            prev.push_literal(&mut text);
            next.push_literal(&mut text);
            Some(Item::literal_owned(text))
        }
        _ => None,
    };
    match merged {
        Some(merged) => {
            *last = merged;
            None
        }
        None => Some(item),
    }
}

/// Byte-length bounds of an item sequence, `None` max when unbounded
pub fn sequence_bounds(items: &[Item]) -> (usize, Option<usize>) {
    items.iter().fold((0, Some(0)), |(min, max), item| {
        let max = match (max, item.max_len()) {
            (Some(a), Some(b)) => Some(a + b),
            _ => None,
        };
        (min + item.min_len(), max)
    })
}
