//! Bitset over ASCII bytes, used for class membership and first-byte filters

/// Set of ASCII bytes packed into a single `u128`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AsciiSet(u128);

impl AsciiSet {
    /// Create an empty set
    pub const fn new() -> Self {
        Self(0)
    }

    /// Add a byte. Returns `false` (and leaves the set untouched) for non-ASCII bytes.
    pub fn insert(&mut self, b: u8) -> bool {
        if b >= 0x80 {
            return false;
        }
        self.0 |= 1u128 << b;
        true
    }

    /// Add the inclusive range `first..=last`, clamped to ASCII
    pub fn insert_range(&mut self, first: u8, last: u8) {
        let last = last.min(0x7f);
        if first > last {
            return;
        }
        for b in first..=last {
            self.0 |= 1u128 << b;
        }
    }

    #[inline]
    pub fn contains(&self, b: u8) -> bool {
        b < 0x80 && self.0 & (1u128 << b) != 0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Smallest member, if any
    pub fn first(&self) -> Option<u8> {
        if self.is_empty() {
            None
        } else {
            Some(self.0.trailing_zeros() as u8)
        }
    }

    /// Offset of the first byte in `haystack` that is a member
    #[inline]
    pub fn position(&self, haystack: &[u8]) -> Option<usize> {
        haystack.iter().position(|&b| self.contains(b))
    }

    /// Members in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0u8..0x80).filter(move |&b| self.contains(b))
    }

    /// Maximal runs of consecutive members as inclusive `(first, last)` pairs
    pub fn runs(&self) -> Vec<(u8, u8)> {
        let mut runs: Vec<(u8, u8)> = Vec::new();
        for b in self.iter() {
            match runs.last_mut() {
                Some((_, last)) if *last + 1 == b => *last = b,
                _ => runs.push((b, b)),
            }
        }
        runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_contains() {
        let mut set = AsciiSet::new();
        assert!(set.is_empty());
        assert!(set.insert(b'a'));
        assert!(set.insert(0x7f));
        assert!(!set.insert(0x80));
        assert!(set.contains(b'a'));
        assert!(set.contains(0x7f));
        assert!(!set.contains(b'b'));
        assert!(!set.contains(0xff));
        assert_eq!(set.len(), 2);
        assert_eq!(set.first(), Some(b'a'));
    }

    #[test]
    fn test_ranges_and_runs() {
        let mut set = AsciiSet::new();
        set.insert_range(b'a', b'c');
        set.insert_range(b'x', b'z');
        set.insert(b'q');
        set.insert_range(b'z', b'a'); // reversed, ignored
        assert_eq!(
            set.runs(),
            vec![(b'a', b'c'), (b'q', b'q'), (b'x', b'z')]
        );
        assert_eq!(set.position(b"--q--"), Some(2));
        assert_eq!(set.position(b"---"), None);
    }
}
