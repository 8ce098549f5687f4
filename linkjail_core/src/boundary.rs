//! # Boundary Sets
//!
//! A [`BoundarySet`] holds the registered boundary directories of one sandbox session
//! (symlink targets and virtual roots) and answers a single question: which boundary
//! governs a given path?
//!
//! The answer is the *most specific* registered boundary that equals the path or is a
//! segment-wise ancestor of it. When nothing matches, the path is its own boundary.
//!
//! Lookups walk a trie keyed by [`Segment`], so a query costs `O(path depth)` regardless
//! of how many boundaries are registered. The set is immutable after construction and
//! can be shared across threads without locking.

use crate::error::{JailError, Result};
use crate::path::{JailPath, Segment};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<Segment, TrieNode>,
    /// Index into `BoundarySet::boundaries` when a boundary ends at this node.
    boundary: Option<usize>,
}

/// Immutable, duplicate-free collection of boundary paths.
#[derive(Debug)]
pub struct BoundarySet {
    boundaries: Vec<JailPath>,
    root: TrieNode,
}

impl BoundarySet {
    /// Build a set from already-parsed paths.
    ///
    /// # Errors
    ///
    /// Returns [`JailError::DuplicateBoundary`] if two entries have identical segments.
    pub fn new<I>(boundaries: I) -> Result<Self>
    where
        I: IntoIterator<Item = JailPath>,
    {
        let mut set = BoundarySet {
            boundaries: Vec::new(),
            root: TrieNode::default(),
        };
        for boundary in boundaries {
            set.insert(boundary)?;
        }
        debug!(count = set.boundaries.len(), "Boundary set constructed");
        Ok(set)
    }

    /// Parse each entry with [`JailPath::parse`] and build a set.
    pub fn from_strs<I, S>(boundaries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = boundaries
            .into_iter()
            .map(|text| JailPath::parse(text.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(parsed)
    }

    fn insert(&mut self, boundary: JailPath) -> Result<()> {
        let mut node = &mut self.root;
        for segment in boundary.segments() {
            node = node.children.entry(segment.clone()).or_default();
        }
        if node.boundary.is_some() {
            return Err(JailError::DuplicateBoundary {
                path: boundary.to_string(),
            });
        }
        node.boundary = Some(self.boundaries.len());
        self.boundaries.push(boundary);
        Ok(())
    }

    /// The most specific registered boundary containing `path`, or `path` itself.
    pub fn boundary_of<'a>(&'a self, path: &'a JailPath) -> &'a JailPath {
        self.registered_boundary_of(path).unwrap_or(path)
    }

    /// Like [`boundary_of`](Self::boundary_of) but without the self-fallback.
    pub fn registered_boundary_of(&self, path: &JailPath) -> Option<&JailPath> {
        let mut node = &self.root;
        let mut deepest = node.boundary;
        for segment in path.segments() {
            match node.children.get(segment) {
                Some(child) => {
                    node = child;
                    if node.boundary.is_some() {
                        deepest = node.boundary;
                    }
                }
                None => break,
            }
        }
        deepest.map(|index| &self.boundaries[index])
    }

    /// True if `path` is registered exactly.
    pub fn contains(&self, path: &JailPath) -> bool {
        self.registered_boundary_of(path)
            .is_some_and(|boundary| boundary == path)
    }

    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Registered boundaries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &JailPath> {
        self.boundaries.iter()
    }
}

impl<'a> IntoIterator for &'a BoundarySet {
    type Item = &'a JailPath;
    type IntoIter = std::slice::Iter<'a, JailPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.boundaries.iter()
    }
}
