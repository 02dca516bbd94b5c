//! Shared-prefix tree over many globs
//!
//! Each compiled glob becomes a path of nodes from the root: its literal
//! suffix (matched against the tail of the candidate first), then its literal
//! prefix, then its items. Paths with equal nodes are shared, so one walk of a
//! candidate evaluates every stored pattern.
//!
//! # Matching
//!
//! Every branch that can match is explored; a candidate may match many
//! patterns. A node that is reached more than once (for example through
//! different `*` expansions) reports its patterns only once per call.
//!
//! A subtree that cannot match the remainder it was given, nor any shorter
//! one, answers [`Flow::Abort`], so the forward search of an enclosing `*`
//! stops there instead of retrying every later split point.

use crate::error::{Result, TreeError};
use gmatcher_glob::matcher::{each_end, Flow};
use gmatcher_glob::{Glob, Item, MinStore, Sinks, Store};
use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use std::slice;

const ROOT: u32 = 0;

// Terminal nodes already reported during the current match call
thread_local! {
    static HIT_BUFFER: RefCell<HitSet> = const { RefCell::new(HitSet::new()) };
}

/// Set of node ids with constant-time insert; clearing costs one word per
/// inserted id
#[derive(Debug, Default)]
struct HitSet {
    bits: Vec<u64>,
    ids: Vec<u32>,
}

impl HitSet {
    const fn new() -> Self {
        Self {
            bits: Vec::new(),
            ids: Vec::new(),
        }
    }

    /// Empty the set and make room for ids below `nodes`
    fn reset(&mut self, nodes: usize) {
        for &id in &self.ids {
            self.bits[id as usize / 64] = 0;
        }
        self.ids.clear();
        let words = (nodes + 63) / 64;
        if self.bits.len() < words {
            self.bits.resize(words, 0);
        }
    }

    /// Returns false if `id` was already present
    fn insert(&mut self, id: u32) -> bool {
        let (word, bit) = (id as usize / 64, 1u64 << (id % 64));
        if self.bits[word] & bit != 0 {
            return false;
        }
        self.bits[word] |= bit;
        self.ids.push(id);
        true
    }
}

#[derive(Debug, Clone)]
struct TreeItem {
    item: Item,
    /// Matched against the tail of the input
    reverse: bool,
    terminated: Vec<String>,
    term_index: Vec<usize>,
    children: Vec<u32>,
}

impl TreeItem {
    fn new(item: Item, reverse: bool) -> Self {
        Self {
            item,
            reverse,
            terminated: Vec::new(),
            term_index: Vec::new(),
            children: Vec::new(),
        }
    }
}

/// Tree of globs matched together against one string
///
/// Build with [`add`](GlobTree::add), then share freely between readers:
/// matching takes `&self` and never mutates the tree.
///
/// # Example
///
/// ```
/// use gmatcher_tree::GlobTree;
///
/// let mut tree = GlobTree::new();
/// tree.add("a*c", 1).unwrap();
/// tree.add("a*b?c", 2).unwrap();
///
/// let mut indices = Vec::new();
/// let n = tree.match_into("acbec", None, Some(&mut indices), None);
/// indices.sort();
/// assert_eq!(n, 2);
/// assert_eq!(indices, vec![1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct GlobTree {
    nodes: Vec<TreeItem>,
    /// Raw and canonical spellings of every stored pattern
    globs: HashMap<String, usize>,
    /// Canonical pattern per index
    patterns: HashMap<usize, String>,
}

impl Default for GlobTree {
    fn default() -> Self {
        Self::new()
    }
}

impl GlobTree {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a tree sized for about `patterns` patterns
    pub fn with_capacity(patterns: usize) -> Self {
        let mut nodes = Vec::with_capacity(patterns + 1);
        nodes.push(TreeItem::new(Item::literal(""), false));
        Self {
            nodes,
            globs: HashMap::with_capacity(patterns * 2),
            patterns: HashMap::with_capacity(patterns),
        }
    }

    /// Build a tree from a pattern list, using each pattern's position as its
    /// index. Duplicate patterns are skipped.
    ///
    /// # Errors
    ///
    /// The first pattern that fails to compile aborts the load.
    pub fn from_patterns<I, P>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let patterns = patterns.into_iter();
        let mut tree = Self::with_capacity(patterns.size_hint().0);
        for (index, pattern) in patterns.enumerate() {
            match tree.add(pattern.as_ref(), index) {
                Ok(_) | Err(TreeError::PatternExists { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(tree)
    }

    /// Compile `pattern` and add it under `index`.
    ///
    /// # Returns
    ///
    /// The canonical pattern text and the stored index.
    ///
    /// # Errors
    ///
    /// - [`TreeError::PatternExists`] if the pattern, or one with the same
    ///   canonical text, is already stored
    /// - [`TreeError::DuplicateIndex`] if `index` belongs to another pattern
    /// - [`TreeError::Glob`] if the pattern does not compile
    ///
    /// A failed call leaves the tree unchanged.
    pub fn add(&mut self, pattern: &str, index: usize) -> Result<(String, usize)> {
        if let Some(&existing) = self.globs.get(pattern) {
            debug!("glob tree: {:?} already stored with index {}", pattern, existing);
            return Err(TreeError::PatternExists {
                pattern: pattern.to_string(),
                index: existing,
            });
        }
        let glob = Glob::parse(pattern)?;
        self.add_glob(&glob, index)
    }

    /// Add an already compiled glob under `index`; errors as for [`add`](GlobTree::add)
    pub fn add_glob(&mut self, glob: &Glob, index: usize) -> Result<(String, usize)> {
        for spelling in [glob.raw(), glob.node()] {
            if let Some(&existing) = self.globs.get(spelling) {
                debug!("glob tree: {:?} already stored with index {}", spelling, existing);
                return Err(TreeError::PatternExists {
                    pattern: spelling.to_string(),
                    index: existing,
                });
            }
        }
        if let Some(pattern) = self.patterns.get(&index) {
            return Err(TreeError::DuplicateIndex {
                index,
                pattern: pattern.clone(),
            });
        }

        let id = self.insert_path(glob);
        let node = &mut self.nodes[id as usize];
        node.terminated.push(glob.node().to_string());
        node.term_index.push(index);

        self.globs.insert(glob.raw().to_string(), index);
        self.globs.insert(glob.node().to_string(), index);
        self.patterns.insert(index, glob.node().to_string());
        debug!(
            "glob tree: added {:?} as {:?} with index {} ({} nodes)",
            glob.raw(),
            glob.node(),
            index,
            self.nodes.len()
        );

        Ok((glob.node().to_string(), index))
    }

    fn insert_path(&mut self, glob: &Glob) -> u32 {
        if glob.is_literal() {
            return self.child(ROOT, Item::literal(glob.prefix()), false);
        }
        let mut id = ROOT;
        if !glob.suffix().is_empty() {
            id = self.child(id, Item::literal(glob.suffix()), true);
        }
        if !glob.prefix().is_empty() {
            id = self.child(id, Item::literal(glob.prefix()), false);
        }
        for item in glob.items() {
            id = self.child(id, item.clone(), false);
        }
        id
    }

    /// Find or create the child of `parent` holding `item`
    fn child(&mut self, parent: u32, item: Item, reverse: bool) -> u32 {
        debug_assert!((parent as usize) < self.nodes.len());
        let existing = self.nodes[parent as usize].children.iter().copied().find(|&c| {
            let node = &self.nodes[c as usize];
            node.reverse == reverse && node.item == item
        });
        if let Some(id) = existing {
            return id;
        }
        let id = self.nodes.len() as u32;
        self.nodes.push(TreeItem::new(item, reverse));
        self.nodes[parent as usize].children.push(id);
        id
    }

    /// Number of stored patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Canonical text of the pattern stored under `index`
    pub fn pattern(&self, index: usize) -> Option<&str> {
        self.patterns.get(&index).map(String::as_str)
    }

    /// Index of a stored pattern, by raw or canonical text
    pub fn index_of(&self, pattern: &str) -> Option<usize> {
        self.globs.get(pattern).copied()
    }

    /// Match `s` against every stored pattern.
    ///
    /// # Arguments
    ///
    /// * `s` - Candidate string
    /// * `globs` - If given, receives the canonical text of each matching pattern
    /// * `indices` - If given, receives the index of each matching pattern
    /// * `first` - If given, keeps the smallest matching index
    ///
    /// Outputs are appended to; clear them between calls to reuse them.
    ///
    /// # Returns
    ///
    /// The number of matching patterns.
    pub fn match_into<'t>(
        &'t self,
        s: &str,
        globs: Option<&mut Vec<&'t str>>,
        indices: Option<&mut Vec<usize>>,
        first: Option<&mut MinStore>,
    ) -> usize {
        let mut sinks = Sinks::new(globs, indices, first);
        self.match_store(s, &mut sinks)
    }

    /// Match `s` against every stored pattern, reporting each to `store`
    pub fn match_store<'t, S: Store<'t> + ?Sized>(&'t self, s: &str, store: &mut S) -> usize {
        let mut hits = HIT_BUFFER.with(|buf| std::mem::take(&mut *buf.borrow_mut()));
        hits.reset(self.nodes.len());

        let mut walker = Walker::new(self, store, hits);
        walker.descend(ROOT, s, false);
        let matched = walker.matched;

        let mut hits = walker.hits;
        hits.reset(0);
        HIT_BUFFER.with(|buf| *buf.borrow_mut() = hits);
        matched
    }
}

struct Walker<'t, 's, S: ?Sized> {
    tree: &'t GlobTree,
    store: &'s mut S,
    hits: HitSet,
    matched: usize,
    #[cfg(test)]
    visits: usize,
}

impl<'t, 's, S: Store<'t> + ?Sized> Walker<'t, 's, S> {
    fn new(tree: &'t GlobTree, store: &'s mut S, hits: HitSet) -> Self {
        Self {
            tree,
            store,
            hits,
            matched: 0,
            #[cfg(test)]
            visits: 0,
        }
    }

    /// `s` is what remains after node `id` matched.
    ///
    /// Returns `Abort` when neither `s` nor any shorter tail of it can reach
    /// a terminal below `id`.
    fn descend(&mut self, id: u32, s: &str, floating: bool) -> Flow {
        #[cfg(test)]
        {
            self.visits += 1;
        }
        let tree = self.tree;
        let node = &tree.nodes[id as usize];
        let mut flow = Flow::Abort;
        if !node.terminated.is_empty() {
            if floating || s.is_empty() {
                self.terminate(node, id);
            }
            flow = Flow::Continue;
        }
        for &child in &node.children {
            if self.visit(child, s, floating) != Flow::Abort {
                flow = Flow::Continue;
            }
        }
        flow
    }

    fn visit(&mut self, id: u32, s: &str, floating: bool) -> Flow {
        let tree = self.tree;
        let node = &tree.nodes[id as usize];
        if node.reverse {
            return match node.item.match_suffix(s) {
                Some(end) => self.descend(id, &s[..end], false),
                None => Flow::Continue,
            };
        }
        each_end(
            s,
            slice::from_ref(&node.item),
            floating,
            &mut |rest: &str, fl: bool| self.descend(id, rest, fl),
        )
    }

    fn terminate(&mut self, node: &'t TreeItem, id: u32) {
        if !self.hits.insert(id) {
            return;
        }
        for (glob, &index) in node.terminated.iter().zip(&node.term_index) {
            self.store.store(glob, index);
        }
        self.matched += node.terminated.len();
    }
}
