//! Batch matcher for dot-delimited paths
//!
//! Patterns are grouped by segment count at the root, so a path is only ever
//! compared with patterns of the same depth. Below the root each node fans out
//! through a hash map for literal segments and a list of segment globs tried
//! in insertion order.

use crate::gglob::GGlob;
use crate::path::path_level;
use gmatcher_glob::{Glob, MinStore, Sinks, Store};
use gmatcher_tree::{Result, TreeError};
use log::debug;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
struct PathNode {
    exact: HashMap<String, u32>,
    wild: Vec<(Glob, u32)>,
    terminated: Vec<String>,
    term_index: Vec<usize>,
}

/// Tree of dotted patterns matched together against one path
///
/// # Example
///
/// ```
/// use gmatcher_path::PathTree;
///
/// let mut tree = PathTree::new();
/// tree.add("DB.*.cpu", 0).unwrap();
/// tree.add("DB.{a,b}*.*", 1).unwrap();
/// tree.add("DB.*", 2).unwrap();
///
/// let mut indices = Vec::new();
/// tree.match_into("DB.bx.cpu", None, Some(&mut indices), None);
/// indices.sort();
/// assert_eq!(indices, vec![0, 1]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathTree {
    /// Root node per segment count
    roots: HashMap<usize, u32>,
    nodes: Vec<PathNode>,
    globs: HashMap<String, usize>,
    patterns: HashMap<usize, String>,
}

impl PathTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from a pattern list, using each pattern's position as its
    /// index. Duplicate patterns are skipped.
    pub fn from_patterns<I, P>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let mut tree = Self::new();
        for (index, pattern) in patterns.into_iter().enumerate() {
            match tree.add(pattern.as_ref(), index) {
                Ok(_) | Err(TreeError::PatternExists { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(tree)
    }

    /// Compile a dotted pattern and add it under `index`.
    ///
    /// Errors are the same as for `GlobTree::add`, plus
    /// `GlobError::EmptySegment` for patterns with an empty segment. A failed
    /// call leaves the tree unchanged.
    pub fn add(&mut self, pattern: &str, index: usize) -> Result<(String, usize)> {
        if let Some(&existing) = self.globs.get(pattern) {
            debug!("path tree: {:?} already stored with index {}", pattern, existing);
            return Err(TreeError::PatternExists {
                pattern: pattern.to_string(),
                index: existing,
            });
        }
        let gglob = GGlob::parse(pattern)?;
        self.add_gglob(&gglob, index)
    }

    /// Add an already compiled dotted pattern under `index`
    pub fn add_gglob(&mut self, gglob: &GGlob, index: usize) -> Result<(String, usize)> {
        for spelling in [gglob.raw(), gglob.node()] {
            if let Some(&existing) = self.globs.get(spelling) {
                debug!("path tree: {:?} already stored with index {}", spelling, existing);
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

        let mut id = self.root(gglob.level());
        for part in gglob.parts() {
            id = self.child(id, part);
        }
        let node = &mut self.nodes[id as usize];
        node.terminated.push(gglob.node().to_string());
        node.term_index.push(index);

        self.globs.insert(gglob.raw().to_string(), index);
        self.globs.insert(gglob.node().to_string(), index);
        self.patterns.insert(index, gglob.node().to_string());
        debug!(
            "path tree: added {:?} as {:?} with index {} at level {}",
            gglob.raw(),
            gglob.node(),
            index,
            gglob.level()
        );

        Ok((gglob.node().to_string(), index))
    }

    fn root(&mut self, level: usize) -> u32 {
        if let Some(&id) = self.roots.get(&level) {
            return id;
        }
        let id = self.push_node();
        self.roots.insert(level, id);
        id
    }

    fn child(&mut self, parent: u32, part: &Glob) -> u32 {
        debug_assert!((parent as usize) < self.nodes.len());
        let node = &self.nodes[parent as usize];
        let existing = if part.is_literal() {
            node.exact.get(part.prefix()).copied()
        } else {
            node.wild
                .iter()
                .find(|(glob, _)| glob.node() == part.node())
                .map(|&(_, id)| id)
        };
        if let Some(id) = existing {
            return id;
        }

        let id = self.push_node();
        let node = &mut self.nodes[parent as usize];
        if part.is_literal() {
            node.exact.insert(part.prefix().to_string(), id);
        } else {
            node.wild.push((part.clone(), id));
        }
        id
    }

    fn push_node(&mut self) -> u32 {
        let id = self.nodes.len() as u32;
        self.nodes.push(PathNode::default());
        id
    }

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

    /// Match a dotted path against every stored pattern.
    ///
    /// Outputs behave as in `GlobTree::match_into`. Returns the number of
    /// matching patterns.
    pub fn match_into<'t>(
        &'t self,
        path: &str,
        globs: Option<&mut Vec<&'t str>>,
        indices: Option<&mut Vec<usize>>,
        first: Option<&mut MinStore>,
    ) -> usize {
        let mut sinks = Sinks::new(globs, indices, first);
        self.match_store(path, &mut sinks)
    }

    /// Match a dotted path, reporting each matching pattern to `store`
    pub fn match_store<'t, S: Store<'t> + ?Sized>(&'t self, path: &str, store: &mut S) -> usize {
        let (path, level) = path_level(path);
        match self.roots.get(&level) {
            Some(&root) if level > 0 => self.walk_path(root, path, store),
            _ => 0,
        }
    }

    /// Same as [`match_into`](PathTree::match_into) for a pre-split path
    pub fn match_parts_into<'t>(
        &'t self,
        parts: &[&str],
        globs: Option<&mut Vec<&'t str>>,
        indices: Option<&mut Vec<usize>>,
        first: Option<&mut MinStore>,
    ) -> usize {
        let mut sinks = Sinks::new(globs, indices, first);
        self.match_parts_store(parts, &mut sinks)
    }

    /// Same as [`match_store`](PathTree::match_store) for a pre-split path
    pub fn match_parts_store<'t, S: Store<'t> + ?Sized>(
        &'t self,
        parts: &[&str],
        store: &mut S,
    ) -> usize {
        match self.roots.get(&parts.len()) {
            Some(&root) if !parts.is_empty() => self.walk_parts(root, parts, store),
            _ => 0,
        }
    }

    fn walk_path<'t, S: Store<'t> + ?Sized>(&'t self, id: u32, path: &str, store: &mut S) -> usize {
        let (segment, rest, last) = match path.split_once('.') {
            Some((segment, rest)) => (segment, rest, false),
            None => (path, "", true),
        };
        self.step(id, segment, store, |child, store| {
            if last {
                self.terminate(child, store)
            } else {
                self.walk_path(child, rest, store)
            }
        })
    }

    fn walk_parts<'t, S: Store<'t> + ?Sized>(&'t self, id: u32, parts: &[&str], store: &mut S) -> usize {
        let Some((segment, rest)) = parts.split_first() else {
            return 0;
        };
        self.step(id, segment, store, |child, store| {
            if rest.is_empty() {
                self.terminate(child, store)
            } else {
                self.walk_parts(child, rest, store)
            }
        })
    }

    /// Follow every edge of node `id` that accepts `segment`
    fn step<'t, S, F>(&'t self, id: u32, segment: &str, store: &mut S, mut next: F) -> usize
    where
        S: Store<'t> + ?Sized,
        F: FnMut(u32, &mut S) -> usize,
    {
        if segment.is_empty() {
            return 0;
        }
        let node = &self.nodes[id as usize];
        let mut matched = 0;
        if let Some(&child) = node.exact.get(segment) {
            matched += next(child, store);
        }
        for (glob, child) in &node.wild {
            if glob.is_match(segment) {
                matched += next(*child, store);
            }
        }
        matched
    }

    fn terminate<'t, S: Store<'t> + ?Sized>(&'t self, id: u32, store: &mut S) -> usize {
        let node = &self.nodes[id as usize];
        for (glob, &index) in node.terminated.iter().zip(&node.term_index) {
            store.store(glob, index);
        }
        node.terminated.len()
    }
}
