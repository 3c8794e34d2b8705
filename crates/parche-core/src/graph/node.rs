//! Per-node bookkeeping held by the registry.

use std::collections::HashMap;

use crate::backend::BackendNodeId;
use crate::kind::NodeKind;
use crate::param::ControlParam;
use crate::value::AttrValue;

/// A live node: the backend handle plus everything the engine tracks for it.
///
/// The control-parameter table is copied from the kind profile at creation,
/// which is the whole trick behind classification without live probing: a
/// member either has an entry here (control parameter) or it does not (plain
/// attribute).
#[derive(Debug, Clone)]
pub struct NodeEntry {
    pub(crate) handle: BackendNodeId,
    pub(crate) kind: NodeKind,
    /// Originally requested wire name, kept only when the factory degraded
    /// an unsupported kind to a gain node.
    pub(crate) requested_kind: Option<String>,
    pub(crate) controls: HashMap<String, ControlParam>,
    pub(crate) attributes: HashMap<String, AttrValue>,
}

impl NodeEntry {
    pub(crate) fn new(handle: BackendNodeId, kind: NodeKind, requested_kind: Option<String>) -> Self {
        let controls = kind
            .profile()
            .controls
            .iter()
            .map(|spec| (spec.name.to_string(), ControlParam::new(spec.default)))
            .collect();
        Self {
            handle,
            kind,
            requested_kind,
            controls,
            attributes: HashMap::new(),
        }
    }

    /// The backend's handle for this node.
    pub fn handle(&self) -> BackendNodeId {
        self.handle
    }

    /// The kind actually constructed (the substitute, when degraded).
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// True when this node stands in for an unsupported requested kind.
    pub fn is_degraded(&self) -> bool {
        self.requested_kind.is_some()
    }

    /// The unsupported wire name originally requested, when degraded.
    pub fn requested_kind(&self) -> Option<&str> {
        self.requested_kind.as_deref()
    }

    /// Looks up a declared control parameter.
    pub fn control(&self, name: &str) -> Option<&ControlParam> {
        self.controls.get(name)
    }

    /// Looks up a plain attribute.
    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    /// Iterates declared control parameters.
    pub fn controls(&self) -> impl Iterator<Item = (&str, &ControlParam)> {
        self.controls.iter().map(|(name, param)| (name.as_str(), param))
    }

    /// Iterates plain attributes set so far.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.attributes.iter().map(|(name, value)| (name.as_str(), value))
    }
}
