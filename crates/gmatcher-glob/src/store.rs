//! Result sinks for multi-pattern matching
//!
//! Trees report each matching pattern as a `(canonical text, index)` pair to a
//! [`Store`]. The stores here cover the common cases; callers that need
//! something else implement the trait themselves.
//!
//! Stores accumulate across calls. Call `init` before reusing one.

/// Receiver of matched patterns
pub trait Store<'t> {
    fn store(&mut self, glob: &'t str, index: usize);
}

impl<'t, S: Store<'t> + ?Sized> Store<'t> for &mut S {
    fn store(&mut self, glob: &'t str, index: usize) {
        (**self).store(glob, index)
    }
}

/// Keeps the smallest matched index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinStore {
    min: Option<usize>,
}

impl MinStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget any recorded index
    pub fn init(&mut self) {
        self.min = None;
    }

    /// Smallest index stored since the last `init`
    pub fn get(&self) -> Option<usize> {
        self.min
    }
}

impl<'t> Store<'t> for MinStore {
    fn store(&mut self, _glob: &'t str, index: usize) {
        if self.min.map_or(true, |min| index < min) {
            self.min = Some(index);
        }
    }
}

/// Collects matched indices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStore {
    indices: Vec<usize>,
}

impl IndexStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self) {
        self.indices.clear();
    }

    /// Reserve room for `additional` more results
    pub fn grow(&mut self, additional: usize) {
        self.indices.reserve(additional);
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl<'t> Store<'t> for IndexStore {
    fn store(&mut self, _glob: &'t str, index: usize) {
        self.indices.push(index);
    }
}

/// Collects canonical text of matched patterns, borrowed from the tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobStore<'t> {
    globs: Vec<&'t str>,
}

impl<'t> GlobStore<'t> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self) {
        self.globs.clear();
    }

    pub fn grow(&mut self, additional: usize) {
        self.globs.reserve(additional);
    }

    pub fn globs(&self) -> &[&'t str] {
        &self.globs
    }

    pub fn len(&self) -> usize {
        self.globs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.globs.is_empty()
    }
}

impl<'t> Store<'t> for GlobStore<'t> {
    fn store(&mut self, glob: &'t str, _index: usize) {
        self.globs.push(glob);
    }
}

/// Records patterns, indices and the smallest index at once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllStore<'t> {
    pub first: MinStore,
    pub indices: IndexStore,
    pub globs: GlobStore<'t>,
}

impl<'t> AllStore<'t> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self) {
        self.first.init();
        self.indices.init();
        self.globs.init();
    }

    pub fn grow(&mut self, additional: usize) {
        self.indices.grow(additional);
        self.globs.grow(additional);
    }
}

impl<'t> Store<'t> for AllStore<'t> {
    fn store(&mut self, glob: &'t str, index: usize) {
        self.first.store(glob, index);
        self.indices.store(glob, index);
        self.globs.store(glob, index);
    }
}

/// Adapter over optional caller-owned outputs; absent outputs are skipped
#[derive(Debug, Default)]
pub struct Sinks<'t, 'o> {
    globs: Option<&'o mut Vec<&'t str>>,
    indices: Option<&'o mut Vec<usize>>,
    first: Option<&'o mut MinStore>,
}

impl<'t, 'o> Sinks<'t, 'o> {
    pub fn new(
        globs: Option<&'o mut Vec<&'t str>>,
        indices: Option<&'o mut Vec<usize>>,
        first: Option<&'o mut MinStore>,
    ) -> Self {
        Self {
            globs,
            indices,
            first,
        }
    }
}

impl<'t> Store<'t> for Sinks<'t, '_> {
    fn store(&mut self, glob: &'t str, index: usize) {
        if let Some(globs) = self.globs.as_deref_mut() {
            globs.push(glob);
        }
        if let Some(indices) = self.indices.as_deref_mut() {
            indices.push(index);
        }
        if let Some(first) = self.first.as_deref_mut() {
            first.store(glob, index);
        }
    }
}
