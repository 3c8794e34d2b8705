//! Caller-assigned node identifiers.
//!
//! Keys come from the producer of the patch stream (the diffing layer), not
//! from the engine. The engine treats them as opaque: it never parses them,
//! never derives meaning from them, and never mints new ones.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier for a node within a registry.
///
/// A key is unique among live nodes at any point in time. It may be reused
/// after the node it named has been deleted; reusing a *live* key overwrites
/// the previous entry (see [`PatchEngine::create_node`](crate::PatchEngine::create_node)).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeKey(String);

impl NodeKey {
    /// Creates a key from anything string-like.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for NodeKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl AsRef<str> for NodeKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
