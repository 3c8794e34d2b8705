//! The patch wire model.
//!
//! A patch is one structural change instruction: create or delete a node,
//! assign or reset a parameter, connect or disconnect an edge. Patches are
//! ephemeral; the engine consumes them and retains nothing.
//!
//! Each variant carries an explicit `op` tag. Inferring the variant from
//! which optional fields happen to be present is exactly the fragility this
//! representation exists to rule out: two variants sharing a field shape can
//! never be confused when the discriminant is first-class.

use serde::{Deserialize, Serialize};

use crate::key::NodeKey;
use crate::value::AttrValue;

/// One structural change instruction for the audio graph.
///
/// Producers are responsible for ordering: a node must be created by an
/// earlier patch than any patch referencing its key, and `DeleteParam` /
/// `Disconnect` must precede the `DeleteNode` they relate to. The engine
/// applies patches strictly in the order given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Patch {
    /// Create a node of `kind` under `key`, then apply `params` in order.
    CreateNode {
        /// Registry key for the new node.
        key: NodeKey,
        /// Wire-format kind name (e.g. `"OscillatorNode"`). Unsupported
        /// names degrade to a gain node rather than failing.
        kind: String,
        /// Initial parameter assignments, applied before the create returns.
        #[serde(default)]
        params: Vec<ParamSpec>,
    },
    /// Assign `value` to the member `name` on the node at `key`.
    CreateParam {
        /// Target node.
        key: NodeKey,
        /// Member name.
        name: String,
        /// Value to assign.
        value: AttrValue,
    },
    /// Add a directed edge from `from` into `to`.
    Connect {
        /// Source node.
        from: NodeKey,
        /// Destination node.
        to: NodeKey,
        /// When present, the edge feeds this control parameter on the
        /// destination instead of its default input.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        param: Option<String>,
    },
    /// Reset the member `name` on the node at `key` to its default.
    DeleteParam {
        /// Target node.
        key: NodeKey,
        /// Member name. Plain attributes are left as-is.
        name: String,
    },
    /// Remove the edge(s) from `from` into `to`.
    Disconnect {
        /// Source node.
        from: NodeKey,
        /// Destination node.
        to: NodeKey,
        /// Must match the `param` the edge was created with.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        param: Option<String>,
    },
    /// Tear down the node at `key` and every edge it participates in.
    DeleteNode {
        /// Target node.
        key: NodeKey,
    },
}

/// An initial parameter assignment inside a [`Patch::CreateNode`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Member name.
    pub name: String,
    /// Value to assign.
    pub value: AttrValue,
}

impl ParamSpec {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
