//! Typed failures surfaced by patch application.

use thiserror::Error;

use crate::key::NodeKey;

/// A failure applying a single patch.
///
/// Unsupported node kinds are deliberately absent here: the factory recovers
/// from them locally (gain substitution plus a warning) instead of failing
/// the patch. Everything else surfaces as one of these variants and aborts
/// the failing patch in place; earlier patches in the batch stay applied.
#[derive(Debug, Error)]
pub enum PatchError {
    /// A patch referenced a key with no live entry in the registry.
    #[error("node '{key}' not found in the registry")]
    NodeNotFound {
        /// The missing key.
        key: NodeKey,
    },

    /// A patch named a member that cannot serve as its target: a connection
    /// routed into something that is not a control parameter, or a control
    /// parameter assigned a non-numeric value.
    #[error("invalid target '{name}' on node '{key}': {reason}")]
    InvalidTarget {
        /// Node the member was looked up on.
        key: NodeKey,
        /// Member name from the patch.
        name: String,
        /// Why the member cannot be targeted this way.
        reason: String,
    },
}

impl PatchError {
    pub(crate) fn not_found(key: &NodeKey) -> Self {
        Self::NodeNotFound { key: key.clone() }
    }

    pub(crate) fn invalid_target(key: &NodeKey, name: &str, reason: &str) -> Self {
        Self::InvalidTarget {
            key: key.clone(),
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// A failure applying a batch, with the index of the offending patch.
///
/// Patches `0..index` were applied and remain in effect; patches after
/// `index` were not attempted. The caller decides whether to retry or to
/// resynchronize from a fresh snapshot.
#[derive(Debug, Error)]
#[error("patch {index} failed: {source}")]
pub struct BatchError {
    /// Zero-based position of the failing patch in the batch.
    pub index: usize,
    /// The underlying failure.
    #[source]
    pub source: PatchError,
}
