//! Directed edges between registered nodes.

use serde::{Deserialize, Serialize};

use crate::key::NodeKey;

/// A directed connection from one node into another.
///
/// When `param` is set, the edge feeds that control parameter on the
/// destination (modulation-style routing) instead of its default input.
/// Edges are additive: any number may coexist between the same pair, with
/// the same or different targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Source node.
    pub from: NodeKey,
    /// Destination node.
    pub to: NodeKey,
    /// Target control parameter on the destination, if not its default input.
    pub param: Option<String>,
}

impl Edge {
    /// True when this edge is exactly the `(from, to, param)` triple.
    pub(crate) fn matches(&self, from: &NodeKey, to: &NodeKey, param: Option<&str>) -> bool {
        self.from == *from && self.to == *to && self.param.as_deref() == param
    }

    /// True when `key` is either endpoint.
    pub(crate) fn touches(&self, key: &NodeKey) -> bool {
        self.from == *key || self.to == *key
    }
}
