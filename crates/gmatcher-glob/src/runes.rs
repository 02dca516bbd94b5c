//! Character classes
//!
//! A [`RuneRanges`] is the compiled form of `[...]` and of alternations whose
//! members are all single code points (`{a,b,c}`). ASCII members live in an
//! [`AsciiSet`]; everything else is kept as sorted, merged inclusive ranges
//! searched by binary search.
//!
//! # Class syntax
//!
//! - `x` adds one code point
//! - `a-z` adds an inclusive range
//! - a `-` with nothing before it or nothing after it is dropped:
//!   `[-q]` is `q`, `[a-]` is `a`, `[-]` is empty
//! - after a completed range a new one may start: `[a-c-e]` is `a`..`c` plus `e`
//! - reversed ranges (`[z-a]`) contribute nothing

use crate::ascii_set::AsciiSet;
use std::cmp::Ordering;
use std::fmt;

/// Inclusive range of code points
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuneRange {
    pub first: char,
    pub last: char,
}

impl RuneRange {
    pub fn new(first: char, last: char) -> Self {
        Self { first, last }
    }
}

/// Compiled character class
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuneRanges {
    ascii: AsciiSet,
    /// Non-ASCII ranges, sorted and merged
    unicode: Vec<RuneRange>,
    min_size: usize,
    max_size: usize,
    /// Written as an alternation (`{a,b}`) rather than a class
    braced: bool,
}

impl RuneRanges {
    /// Compile the body of a `[...]` class (brackets excluded).
    ///
    /// # Returns
    ///
    /// The class and whether any reversed range was dropped while parsing.
    pub fn from_class(body: &str) -> (Self, bool) {
        let mut ranges = Vec::new();
        let mut start: Option<char> = None;
        let mut is_range = false;
        let mut reversed = false;

        for c in body.chars() {
            if c == '-' {
                is_range = true;
                continue;
            }
            if is_range {
                match start.take() {
                    Some(first) if first <= c => ranges.push(RuneRange::new(first, c)),
                    Some(_) => reversed = true,
                    None => start = Some(c),
                }
                is_range = false;
            } else if let Some(prev) = start.replace(c) {
                ranges.push(RuneRange::new(prev, prev));
            }
        }
        if let Some(prev) = start {
            ranges.push(RuneRange::new(prev, prev));
        }

        (Self::build(ranges, false), reversed)
    }

    /// Build a class from single code points written as `{a,b,...}`
    pub fn from_alternatives<I: IntoIterator<Item = char>>(chars: I) -> Self {
        let ranges = chars.into_iter().map(|c| RuneRange::new(c, c)).collect();
        Self::build(ranges, true)
    }

    fn build(ranges: Vec<RuneRange>, braced: bool) -> Self {
        let mut ascii = AsciiSet::new();
        let mut unicode: Vec<RuneRange> = Vec::new();

        for range in ranges {
            if range.first.is_ascii() {
                ascii.insert_range(range.first as u8, (range.last as u32).min(0x7f) as u8);
            }
            if !range.last.is_ascii() {
                let first = if range.first.is_ascii() {
                    '\u{80}'
                } else {
                    range.first
                };
                unicode.push(RuneRange::new(first, range.last));
            }
        }

        unicode.sort_unstable();
        let mut merged: Vec<RuneRange> = Vec::with_capacity(unicode.len());
        for range in unicode {
            match merged.last_mut() {
                Some(prev) if range.first as u32 <= prev.last as u32 + 1 => {
                    if range.last > prev.last {
                        prev.last = range.last;
                    }
                }
                _ => merged.push(range),
            }
        }

        let min_size = if !ascii.is_empty() {
            1
        } else {
            merged.first().map_or(1, |r| r.first.len_utf8())
        };
        let max_size = merged.last().map_or(1, |r| r.last.len_utf8());

        Self {
            ascii,
            unicode: merged,
            min_size,
            max_size,
            braced,
        }
    }

    /// True when the class has no members and therefore never matches
    pub fn is_empty(&self) -> bool {
        self.ascii.is_empty() && self.unicode.is_empty()
    }

    /// The only member, when the class holds exactly one code point
    pub fn single(&self) -> Option<char> {
        match (self.ascii.len(), self.unicode.as_slice()) {
            (1, []) => self.ascii.first().map(char::from),
            (0, [only]) if only.first == only.last => Some(only.first),
            _ => None,
        }
    }

    /// Whether `c` is a member
    #[inline]
    pub fn contains(&self, c: char) -> bool {
        if c.is_ascii() {
            return self.ascii.contains(c as u8);
        }
        self.unicode
            .binary_search_by(|r| {
                if r.last < c {
                    Ordering::Less
                } else if r.first > c {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            })
            .is_ok()
    }

    /// Minimum encoded size of a member in bytes
    pub fn min_len(&self) -> usize {
        self.min_size
    }

    /// Maximum encoded size of a member in bytes
    pub fn max_len(&self) -> usize {
        self.max_size
    }

    /// Byte length of the leading code point if it is a member
    #[inline]
    pub fn match_prefix(&self, s: &str) -> Option<usize> {
        let c = s.chars().next()?;
        self.contains(c).then(|| c.len_utf8())
    }

    /// Locate the first member in `s` as `(offset, byte_len)`
    pub fn find(&self, s: &str) -> Option<(usize, usize)> {
        if self.unicode.is_empty() {
            return self.ascii.position(s.as_bytes()).map(|at| (at, 1));
        }
        s.char_indices()
            .find(|&(_, c)| self.contains(c))
            .map(|(at, c)| (at, c.len_utf8()))
    }

    fn members(&self) -> impl Iterator<Item = char> + '_ {
        let unicode = self
            .unicode
            .iter()
            .flat_map(|r| r.first..=r.last);
        self.ascii.iter().map(char::from).chain(unicode)
    }
}

impl fmt::Display for RuneRanges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.braced {
            f.write_str("{")?;
            for (i, c) in self.members().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{}", c)?;
            }
            return f.write_str("}");
        }

        f.write_str("[")?;
        for (first, last) in self.ascii.runs() {
            if first == last {
                write!(f, "{}", first as char)?;
            } else {
                write!(f, "{}-{}", first as char, last as char)?;
            }
        }
        for range in &self.unicode {
            if range.first == range.last {
                write!(f, "{}", range.first)?;
            } else {
                write!(f, "{}-{}", range.first, range.last)?;
            }
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(body: &str) -> RuneRanges {
        RuneRanges::from_class(body).0
    }

    #[test]
    fn test_class_canonical_form() {
        assert_eq!(class("a-cj-mzqA-C").to_string(), "[A-Ca-cj-mqz]");
        assert_eq!(class("Э-ЯW-Z界").to_string(), "[W-ZЭ-Я界]");
        assert_eq!(class("1-32-45-76-78-95789").to_string(), "[1-9]");
    }

    #[test]
    fn test_dash_policy() {
        assert_eq!(class("-q").single(), Some('q'));
        assert!(class("-").is_empty());
        assert_eq!(class("a-").single(), Some('a'));
        assert_eq!(class("-a-c").to_string(), "[a-c]");

        let set = class("a-c-e");
        for c in ['a', 'b', 'c', 'e'] {
            assert!(set.contains(c), "{} should be a member", c);
        }
        assert!(!set.contains('d'));
        assert!(!set.contains('-'));
    }

    #[test]
    fn test_reversed_range() {
        let (set, reversed) = RuneRanges::from_class("z-a");
        assert!(reversed);
        assert!(set.is_empty());

        let (set, reversed) = RuneRanges::from_class("z-ax");
        assert!(reversed);
        assert_eq!(set.single(), Some('x'));
    }

    #[test]
    fn test_membership_and_sizes() {
        let set = class("a-cЭ-Я");
        assert!(set.contains('b'));
        assert!(set.contains('Ю'));
        assert!(!set.contains('я'));
        assert_eq!(set.min_len(), 1);
        assert_eq!(set.max_len(), 2);

        let set = class("界");
        assert_eq!(set.min_len(), 3);
        assert_eq!(set.max_len(), 3);
    }

    #[test]
    fn test_match_and_find() {
        let set = class("0-9");
        assert_eq!(set.match_prefix("7x"), Some(1));
        assert_eq!(set.match_prefix("x7"), None);
        assert_eq!(set.find("abc4d"), Some((3, 1)));
        assert_eq!(set.find("abc"), None);

        let set = class("Я");
        assert_eq!(set.find("abЯ"), Some((2, 2)));
        assert_eq!(set.match_prefix("Яa"), Some(2));
    }

    #[test]
    fn test_braced_display() {
        let set = RuneRanges::from_alternatives(['c', 'a', 'b', 'a']);
        assert_eq!(set.to_string(), "{a,b,c}");
        assert!(set.contains('b'));
    }
}
