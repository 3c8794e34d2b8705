//! The node registry: key → owned node entry.
//!
//! The registry is the single source of truth for what currently exists. It
//! is an explicit object threaded through the engine, never ambient state,
//! and it is the exclusive owner of node entries: nothing else retains one
//! beyond the duration of a call.

use std::collections::HashMap;

use crate::key::NodeKey;

use super::node::NodeEntry;

/// Owning map from [`NodeKey`] to live [`NodeEntry`].
#[derive(Debug, Default)]
pub struct NodeRegistry {
    nodes: HashMap<NodeKey, NodeEntry>,
}

impl NodeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, returning the displaced entry if `key` was live.
    ///
    /// The caller decides what a displacement means; the registry itself
    /// treats overwrite as ordinary insertion.
    pub(crate) fn insert(&mut self, key: NodeKey, entry: NodeEntry) -> Option<NodeEntry> {
        self.nodes.insert(key, entry)
    }

    /// Removes and returns the entry under `key`.
    pub(crate) fn remove(&mut self, key: &NodeKey) -> Option<NodeEntry> {
        self.nodes.remove(key)
    }

    /// Looks up the entry under `key`.
    pub fn get(&self, key: &NodeKey) -> Option<&NodeEntry> {
        self.nodes.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: &NodeKey) -> Option<&mut NodeEntry> {
        self.nodes.get_mut(key)
    }

    /// True when `key` names a live node.
    pub fn contains(&self, key: &NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when no nodes are registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates live `(key, entry)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeKey, &NodeEntry)> {
        self.nodes.iter()
    }
}
