//! Alternations whose members contain wildcards, `{a*,b?c}`

use crate::item::{sequence_bounds, Item};
use std::fmt;

/// One member of a [`Group`]: a merged item sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    items: Vec<Item>,
    min_size: usize,
    max_size: Option<usize>,
}

impl Chain {
    pub(crate) fn new(items: Vec<Item>) -> Self {
        let (min_size, max_size) = sequence_bounds(&items);
        Self {
            items,
            min_size,
            max_size,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    pub fn min_len(&self) -> usize {
        self.min_size
    }

    pub fn max_len(&self) -> Option<usize> {
        self.max_size
    }

    /// Whether the chain is a lone `*`, which swallows the whole group
    pub fn is_star(&self) -> bool {
        matches!(self.items.as_slice(), [Item::Star(0)])
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}

/// Alternation of chains, optionally including the empty alternative
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    members: Vec<Chain>,
    optional: bool,
    min_size: usize,
    max_size: Option<usize>,
}

impl Group {
    /// Build a group from members sorted by canonical text
    pub(crate) fn new(members: Vec<Chain>, optional: bool) -> Self {
        let min_size = if optional {
            0
        } else {
            members.iter().map(Chain::min_len).min().unwrap_or(0)
        };
        let max_size = members
            .iter()
            .try_fold(0usize, |acc, m| m.max_len().map(|n| acc.max(n)));
        Self {
            members,
            optional,
            min_size,
            max_size,
        }
    }

    pub fn members(&self) -> &[Chain] {
        &self.members
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn min_len(&self) -> usize {
        self.min_size
    }

    pub fn max_len(&self) -> Option<usize> {
        self.max_size
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, m) in self.members.iter().enumerate() {
            if i > 0 || self.optional {
                f.write_str(",")?;
            }
            write!(f, "{}", m)?;
        }
        f.write_str("}")
    }
}
