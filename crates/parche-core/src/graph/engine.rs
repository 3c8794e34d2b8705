//! Patch application against a live graph.
//!
//! [`PatchEngine`] owns the [`NodeRegistry`], the edge list and the backend,
//! and exposes the patch operations: node creation and teardown, parameter
//! assignment and reset, connection and disconnection, plus the dispatcher
//! that routes a tagged [`Patch`] to exactly one of those handlers.
//!
//! Application is synchronous and sequential. One patch either completes or
//! fails with a typed error; a failing patch leaves everything applied before
//! it in place and nothing after it attempted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::backend::{AudioBackend, BackendNodeId};
use crate::error::{BatchError, PatchError};
use crate::key::NodeKey;
use crate::kind::NodeKind;
use crate::patch::{ParamSpec, Patch};
use crate::value::AttrValue;

use super::edge::Edge;
use super::node::NodeEntry;
use super::registry::NodeRegistry;

/// What the factory actually built for a `create-node` patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The requested kind was supported and constructed as asked.
    Created(NodeKind),
    /// The requested kind was unknown; a passthrough gain node stands in so
    /// the rest of the graph stays structurally valid.
    Degraded {
        /// The unsupported wire name from the patch.
        requested: String,
    },
}

/// Applies patches to a live audio graph over an [`AudioBackend`].
///
/// The engine is single-threaded by design: it assumes it runs on the same
/// logical thread as the producer of the patch stream, and every backend
/// call is fire-and-forget.
pub struct PatchEngine<B> {
    backend: B,
    registry: NodeRegistry,
    /// Every live edge, in insertion order. Multi-edges are kept as separate
    /// entries.
    edges: Vec<Edge>,
}

impl<B: AudioBackend> PatchEngine<B> {
    /// Creates an engine with an empty graph.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            registry: NodeRegistry::new(),
            edges: Vec::new(),
        }
    }

    // --- Patch dispatch ---

    /// Applies one patch, routing it to the matching handler.
    ///
    /// The tag on [`Patch`] is the sole discriminant; no field-shape
    /// guessing happens here, and every variant has exactly one handler.
    pub fn apply(&mut self, patch: Patch) -> Result<(), PatchError> {
        match patch {
            Patch::CreateNode { key, kind, params } => {
                self.create_node(key, &kind, &params).map(|_| ())
            }
            Patch::CreateParam { key, name, value } => self.set_param(&key, &name, value),
            Patch::Connect { from, to, param } => self.connect(&from, &to, param.as_deref()),
            Patch::DeleteParam { key, name } => self.reset_param(&key, &name),
            Patch::Disconnect { from, to, param } => self.disconnect(&from, &to, param.as_deref()),
            Patch::DeleteNode { key } => self.delete_node(&key),
        }
    }

    /// Applies patches in order until one fails.
    ///
    /// Returns how many were applied. On failure, patches before the failing
    /// index stay applied and later ones are not attempted; batches carry
    /// no atomicity guarantee.
    pub fn apply_batch<I>(&mut self, patches: I) -> Result<usize, BatchError>
    where
        I: IntoIterator<Item = Patch>,
    {
        let mut applied = 0;
        for (index, patch) in patches.into_iter().enumerate() {
            self.apply(patch).map_err(|source| BatchError { index, source })?;
            applied += 1;
        }
        Ok(applied)
    }

    // --- Node factory ---

    /// Constructs a node and registers it under `key`.
    ///
    /// Unsupported kind names are recovered locally: the factory logs a
    /// warning, builds a gain node instead, and tags the outcome
    /// [`CreateOutcome::Degraded`]. Self-starting kinds are started before
    /// the initial parameters are applied, and every entry of `params` goes
    /// through [`set_param`](Self::set_param) under the node's own key.
    ///
    /// Creating over a live key overwrites the entry without tearing the
    /// previous node down (the runtimes this engine mimics leak the old node
    /// the same way); the engine warns and drops its own edge records for
    /// the key, since they describe the leaked node.
    pub fn create_node(
        &mut self,
        key: NodeKey,
        requested: &str,
        params: &[ParamSpec],
    ) -> Result<CreateOutcome, PatchError> {
        let (kind, outcome) = match NodeKind::from_type_name(requested) {
            Some(kind) => (kind, CreateOutcome::Created(kind)),
            None => {
                tracing::warn!(
                    kind = requested,
                    "unsupported node kind; creating a passthrough gain node instead"
                );
                (
                    NodeKind::Gain,
                    CreateOutcome::Degraded {
                        requested: requested.to_string(),
                    },
                )
            }
        };

        let handle = self.backend.create_node(kind);
        tracing::debug!("patch_create: {key} ({})", kind.type_name());

        let requested_kind = match &outcome {
            CreateOutcome::Degraded { requested } => Some(requested.clone()),
            CreateOutcome::Created(_) => None,
        };
        let entry = NodeEntry::new(handle, kind, requested_kind);

        if self.registry.insert(key.clone(), entry).is_some() {
            tracing::warn!(
                key = %key,
                "create-node over a live key; previous node is leaked, not torn down"
            );
            self.edges.retain(|edge| !edge.touches(&key));
        }

        if kind.profile().self_starting {
            self.backend.start(handle);
        }

        for spec in params {
            self.set_param(&key, &spec.name, spec.value.clone())?;
        }

        Ok(outcome)
    }

    /// Tears down the node under `key`.
    ///
    /// Stops it if stoppable, severs every edge it participates in (no
    /// `disconnect` patch is assumed to arrive for those), then removes the
    /// registry entry and releases the backend handle.
    pub fn delete_node(&mut self, key: &NodeKey) -> Result<(), PatchError> {
        let entry = self.registry.get(key).ok_or_else(|| PatchError::not_found(key))?;
        let handle = entry.handle;
        let stoppable = entry.kind.profile().stoppable;

        if stoppable {
            self.backend.stop(handle);
        }

        let (incident, kept): (Vec<Edge>, Vec<Edge>) =
            std::mem::take(&mut self.edges).into_iter().partition(|edge| edge.touches(key));
        self.edges = kept;

        for edge in &incident {
            let (Some(from), Some(to)) = (self.handle_of(&edge.from), self.handle_of(&edge.to))
            else {
                continue;
            };
            match edge.param.as_deref() {
                Some(control) => self.backend.disconnect_from_control(from, to, control),
                None => self.backend.disconnect(from, to),
            }
        }

        self.registry.remove(key);
        self.backend.release_node(handle);
        tracing::debug!("patch_delete: {key}");
        Ok(())
    }

    // --- Parameter setter ---

    /// Applies a named value onto the node under `key`.
    ///
    /// Members declared as control parameters by the kind profile take the
    /// numeric value into their live slot, default untouched. Every other
    /// name is a plain attribute assignment, created on first use.
    pub fn set_param(
        &mut self,
        key: &NodeKey,
        name: &str,
        value: AttrValue,
    ) -> Result<(), PatchError> {
        let entry = self
            .registry
            .get_mut(key)
            .ok_or_else(|| PatchError::not_found(key))?;
        let handle = entry.handle;

        if let Some(control) = entry.controls.get_mut(name) {
            let Some(v) = value.as_float() else {
                return Err(PatchError::invalid_target(
                    key,
                    name,
                    "control parameters take numeric values",
                ));
            };
            control.set(v);
            self.backend.set_control(handle, name, v);
        } else {
            entry.attributes.insert(name.to_string(), value.clone());
            self.backend.set_attribute(handle, name, &value);
        }
        Ok(())
    }

    /// Resets the named member on the node under `key`.
    ///
    /// Control parameters snap back to their declared default. Plain
    /// attributes, and names that match nothing, are a deliberate no-op:
    /// the observed runtimes define no attribute-deletion semantics, and
    /// none are invented here.
    pub fn reset_param(&mut self, key: &NodeKey, name: &str) -> Result<(), PatchError> {
        let entry = self
            .registry
            .get_mut(key)
            .ok_or_else(|| PatchError::not_found(key))?;
        let handle = entry.handle;

        if let Some(control) = entry.controls.get_mut(name) {
            control.reset();
            let v = control.current();
            self.backend.set_control(handle, name, v);
        }
        Ok(())
    }

    // --- Connection manager ---

    /// Adds a directed edge from `from` into `to`.
    ///
    /// With a `param`, the edge feeds that control parameter on the
    /// destination; the name must resolve to a declared control parameter or
    /// the patch fails with [`PatchError::InvalidTarget`]. Edges are
    /// additive; connecting never replaces a prior edge.
    pub fn connect(
        &mut self,
        from: &NodeKey,
        to: &NodeKey,
        param: Option<&str>,
    ) -> Result<(), PatchError> {
        let from_handle = self.handle_of(from).ok_or_else(|| PatchError::not_found(from))?;
        let to_entry = self.registry.get(to).ok_or_else(|| PatchError::not_found(to))?;
        let to_handle = to_entry.handle;

        match param {
            Some(control) => {
                if to_entry.control(control).is_none() {
                    return Err(PatchError::invalid_target(
                        to,
                        control,
                        "connection target must be a control parameter",
                    ));
                }
                self.backend.connect_to_control(from_handle, to_handle, control);
            }
            None => self.backend.connect(from_handle, to_handle),
        }

        self.edges.push(Edge {
            from: from.clone(),
            to: to.clone(),
            param: param.map(String::from),
        });
        tracing::debug!("patch_connect: {from} → {to}");
        Ok(())
    }

    /// Removes the edge(s) matching the exact `(from, to, param)` triple.
    ///
    /// Both keys must be live. Removing an edge that does not exist is a
    /// no-op, not an error, since the underlying runtimes do not distinguish
    /// "never connected" from "already disconnected".
    pub fn disconnect(
        &mut self,
        from: &NodeKey,
        to: &NodeKey,
        param: Option<&str>,
    ) -> Result<(), PatchError> {
        let from_handle = self.handle_of(from).ok_or_else(|| PatchError::not_found(from))?;
        let to_handle = self.handle_of(to).ok_or_else(|| PatchError::not_found(to))?;

        let before = self.edges.len();
        self.edges.retain(|edge| !edge.matches(from, to, param));
        if self.edges.len() == before {
            return Ok(());
        }

        match param {
            Some(control) => self.backend.disconnect_from_control(from_handle, to_handle, control),
            None => self.backend.disconnect(from_handle, to_handle),
        }
        tracing::debug!("patch_disconnect: {from} → {to}");
        Ok(())
    }

    // --- Transport ---

    /// Resumes rendering on the backend.
    pub fn resume(&mut self) {
        self.backend.resume();
    }

    /// Suspends rendering on the backend.
    pub fn suspend(&mut self) {
        self.backend.suspend();
    }

    // --- Introspection ---

    /// Read access to the registry.
    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    /// Every live edge, in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of live edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True when `key` names a live node.
    pub fn contains(&self, key: &NodeKey) -> bool {
        self.registry.contains(key)
    }

    /// The kind constructed under `key`, if live.
    pub fn node_kind(&self, key: &NodeKey) -> Option<NodeKind> {
        self.registry.get(key).map(|entry| entry.kind())
    }

    /// Live value of a control parameter.
    pub fn control_value(&self, key: &NodeKey, name: &str) -> Option<f32> {
        self.registry
            .get(key)
            .and_then(|entry| entry.control(name))
            .map(|param| param.current())
    }

    /// Declared default of a control parameter.
    pub fn control_default(&self, key: &NodeKey, name: &str) -> Option<f32> {
        self.registry
            .get(key)
            .and_then(|entry| entry.control(name))
            .map(|param| param.default_value())
    }

    /// A plain attribute value, if it has been set.
    pub fn attribute(&self, key: &NodeKey, name: &str) -> Option<&AttrValue> {
        self.registry.get(key).and_then(|entry| entry.attribute(name))
    }

    /// True when an edge with exactly this `(from, to, param)` triple exists.
    pub fn has_edge(&self, from: &NodeKey, to: &NodeKey, param: Option<&str>) -> bool {
        self.edges.iter().any(|edge| edge.matches(from, to, param))
    }

    /// Read access to the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Captures the current graph state for inspection or serialization.
    ///
    /// Nodes are sorted by key and member maps are ordered, so the output is
    /// deterministic.
    pub fn snapshot(&self) -> GraphSnapshot {
        let mut nodes: Vec<NodeState> = self
            .registry
            .iter()
            .map(|(key, entry)| NodeState {
                key: key.clone(),
                kind: entry.kind(),
                requested_kind: entry.requested_kind().map(String::from),
                controls: entry
                    .controls()
                    .map(|(name, param)| {
                        (
                            name.to_string(),
                            ControlState {
                                value: param.current(),
                                default: param.default_value(),
                            },
                        )
                    })
                    .collect(),
                attributes: entry
                    .attributes()
                    .map(|(name, value)| (name.to_string(), value.clone()))
                    .collect(),
            })
            .collect();
        nodes.sort_by(|a, b| a.key.cmp(&b.key));

        GraphSnapshot {
            nodes,
            edges: self.edges.clone(),
        }
    }

    // --- Internal helpers ---

    fn handle_of(&self, key: &NodeKey) -> Option<BackendNodeId> {
        self.registry.get(key).map(|entry| entry.handle)
    }
}

/// Serializable view of the whole graph at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Live nodes, sorted by key.
    pub nodes: Vec<NodeState>,
    /// Live edges, in insertion order.
    pub edges: Vec<Edge>,
}

/// Serializable view of one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeState {
    /// Registry key.
    pub key: NodeKey,
    /// Kind actually constructed.
    pub kind: NodeKind,
    /// Originally requested wire name, present only for degraded nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_kind: Option<String>,
    /// Control parameters with live and default values.
    pub controls: BTreeMap<String, ControlState>,
    /// Plain attributes set so far.
    pub attributes: BTreeMap<String, AttrValue>,
}

/// Live and default value of one control parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlState {
    /// Live value.
    pub value: f32,
    /// Declared default.
    pub default: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Recording backend: every call is appended to an op log.
    #[derive(Default)]
    struct Recorder {
        next_id: u64,
        ops: Vec<Op>,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Create(NodeKind, BackendNodeId),
        Release(BackendNodeId),
        Start(BackendNodeId),
        Stop(BackendNodeId),
        SetControl(BackendNodeId, String, f32),
        SetAttribute(BackendNodeId, String, AttrValue),
        Connect(BackendNodeId, BackendNodeId),
        ConnectToControl(BackendNodeId, BackendNodeId, String),
        Disconnect(BackendNodeId, BackendNodeId),
        DisconnectFromControl(BackendNodeId, BackendNodeId, String),
        Resume,
        Suspend,
    }

    impl AudioBackend for Recorder {
        fn create_node(&mut self, kind: NodeKind) -> BackendNodeId {
            let id = BackendNodeId::new(self.next_id);
            self.next_id += 1;
            self.ops.push(Op::Create(kind, id));
            id
        }
        fn release_node(&mut self, node: BackendNodeId) {
            self.ops.push(Op::Release(node));
        }
        fn start(&mut self, node: BackendNodeId) {
            self.ops.push(Op::Start(node));
        }
        fn stop(&mut self, node: BackendNodeId) {
            self.ops.push(Op::Stop(node));
        }
        fn set_control(&mut self, node: BackendNodeId, control: &str, value: f32) {
            self.ops.push(Op::SetControl(node, control.to_string(), value));
        }
        fn set_attribute(&mut self, node: BackendNodeId, name: &str, value: &AttrValue) {
            self.ops.push(Op::SetAttribute(node, name.to_string(), value.clone()));
        }
        fn connect(&mut self, from: BackendNodeId, to: BackendNodeId) {
            self.ops.push(Op::Connect(from, to));
        }
        fn connect_to_control(&mut self, from: BackendNodeId, to: BackendNodeId, control: &str) {
            self.ops.push(Op::ConnectToControl(from, to, control.to_string()));
        }
        fn disconnect(&mut self, from: BackendNodeId, to: BackendNodeId) {
            self.ops.push(Op::Disconnect(from, to));
        }
        fn disconnect_from_control(&mut self, from: BackendNodeId, to: BackendNodeId, control: &str) {
            self.ops.push(Op::DisconnectFromControl(from, to, control.to_string()));
        }
        fn resume(&mut self) {
            self.ops.push(Op::Resume);
        }
        fn suspend(&mut self) {
            self.ops.push(Op::Suspend);
        }
    }

    fn engine() -> PatchEngine<Recorder> {
        PatchEngine::new(Recorder::default())
    }

    fn key(k: &str) -> NodeKey {
        NodeKey::from(k)
    }

    #[test]
    fn create_registers_each_supported_kind() {
        let mut engine = engine();
        for kind in NodeKind::ALL {
            let k = key(kind.type_name());
            let outcome = engine.create_node(k.clone(), kind.type_name(), &[]).unwrap();
            assert_eq!(outcome, CreateOutcome::Created(kind));
            assert_eq!(engine.node_kind(&k), Some(kind));
        }
        assert_eq!(engine.node_count(), 5);
    }

    #[test]
    fn unknown_kind_degrades_to_gain() {
        let mut engine = engine();
        let outcome = engine
            .create_node(key("x"), "ConvolverNode", &[])
            .unwrap();
        assert_eq!(
            outcome,
            CreateOutcome::Degraded { requested: "ConvolverNode".to_string() }
        );
        assert_eq!(engine.node_kind(&key("x")), Some(NodeKind::Gain));

        // Exactly one (gain) construction reached the backend.
        let creates: Vec<_> = engine
            .backend()
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Create(..)))
            .collect();
        assert_eq!(creates.len(), 1);
        assert!(matches!(creates[0], Op::Create(NodeKind::Gain, _)));
    }

    #[test]
    fn oscillator_is_started_on_create() {
        let mut engine = engine();
        engine.create_node(key("osc"), "OscillatorNode", &[]).unwrap();
        let handle = engine.registry().get(&key("osc")).unwrap().handle();
        assert!(engine.backend().ops.contains(&Op::Start(handle)));
    }

    #[test]
    fn gain_is_not_started_on_create() {
        let mut engine = engine();
        engine.create_node(key("g"), "GainNode", &[]).unwrap();
        assert!(!engine.backend().ops.iter().any(|op| matches!(op, Op::Start(_))));
    }

    #[test]
    fn initial_params_are_applied_before_create_returns() {
        let mut engine = engine();
        engine
            .create_node(
                key("osc"),
                "OscillatorNode",
                &[
                    ParamSpec::new("frequency", 220.0),
                    ParamSpec::new("type", "sawtooth"),
                ],
            )
            .unwrap();
        assert_eq!(engine.control_value(&key("osc"), "frequency"), Some(220.0));
        assert_eq!(engine.control_default(&key("osc"), "frequency"), Some(440.0));
        assert_eq!(
            engine.attribute(&key("osc"), "type"),
            Some(&AttrValue::from("sawtooth"))
        );
    }

    #[test]
    fn create_over_live_key_purges_stale_edges() {
        let mut engine = engine();
        engine.create_node(key("a"), "GainNode", &[]).unwrap();
        engine.create_node(key("b"), "GainNode", &[]).unwrap();
        engine.connect(&key("a"), &key("b"), None).unwrap();

        engine.create_node(key("a"), "GainNode", &[]).unwrap();
        assert_eq!(engine.edge_count(), 0);
        assert_eq!(engine.node_count(), 2);
        // The old backend node was neither released nor disconnected.
        assert!(!engine.backend().ops.iter().any(|op| matches!(op, Op::Release(_))));
        assert!(!engine.backend().ops.iter().any(|op| matches!(op, Op::Disconnect(..))));
    }

    #[test]
    fn set_control_param_keeps_default() {
        let mut engine = engine();
        engine.create_node(key("g"), "GainNode", &[]).unwrap();
        engine.set_param(&key("g"), "gain", AttrValue::Float(0.5)).unwrap();
        assert_eq!(engine.control_value(&key("g"), "gain"), Some(0.5));
        assert_eq!(engine.control_default(&key("g"), "gain"), Some(1.0));
    }

    #[test]
    fn set_unknown_member_becomes_attribute() {
        let mut engine = engine();
        engine.create_node(key("f"), "BiquadFilterNode", &[]).unwrap();
        engine
            .set_param(&key("f"), "type", AttrValue::from("highpass"))
            .unwrap();
        assert_eq!(
            engine.attribute(&key("f"), "type"),
            Some(&AttrValue::from("highpass"))
        );

        let handle = engine.registry().get(&key("f")).unwrap().handle();
        assert!(engine.backend().ops.contains(&Op::SetAttribute(
            handle,
            "type".to_string(),
            AttrValue::from("highpass"),
        )));
    }

    #[test]
    fn set_control_with_text_value_is_invalid_target() {
        let mut engine = engine();
        engine.create_node(key("g"), "GainNode", &[]).unwrap();
        let err = engine
            .set_param(&key("g"), "gain", AttrValue::from("loud"))
            .unwrap_err();
        assert!(matches!(err, PatchError::InvalidTarget { .. }));
        // The live value is untouched.
        assert_eq!(engine.control_value(&key("g"), "gain"), Some(1.0));
    }

    #[test]
    fn set_on_missing_key_is_not_found() {
        let mut engine = engine();
        let err = engine
            .set_param(&key("nope"), "gain", AttrValue::Float(0.0))
            .unwrap_err();
        assert!(matches!(err, PatchError::NodeNotFound { .. }));
    }

    #[test]
    fn reset_restores_default_regardless_of_set_count() {
        let mut engine = engine();
        engine.create_node(key("osc"), "OscillatorNode", &[]).unwrap();
        for v in [100.0, 220.0, 880.0] {
            engine.set_param(&key("osc"), "frequency", AttrValue::Float(v)).unwrap();
        }
        engine.reset_param(&key("osc"), "frequency").unwrap();
        assert_eq!(engine.control_value(&key("osc"), "frequency"), Some(440.0));

        // The reset was forwarded with the default value.
        let handle = engine.registry().get(&key("osc")).unwrap().handle();
        assert_eq!(
            engine.backend().ops.last(),
            Some(&Op::SetControl(handle, "frequency".to_string(), 440.0))
        );
    }

    #[test]
    fn reset_of_attribute_is_noop() {
        let mut engine = engine();
        engine.create_node(key("f"), "BiquadFilterNode", &[]).unwrap();
        engine.set_param(&key("f"), "type", AttrValue::from("notch")).unwrap();

        let ops_before = engine.backend().ops.len();
        engine.reset_param(&key("f"), "type").unwrap();
        engine.reset_param(&key("f"), "no-such-member").unwrap();
        assert_eq!(engine.backend().ops.len(), ops_before);
        assert_eq!(
            engine.attribute(&key("f"), "type"),
            Some(&AttrValue::from("notch"))
        );
    }

    #[test]
    fn connect_then_disconnect_leaves_no_edge() {
        let mut engine = engine();
        engine.create_node(key("a"), "GainNode", &[]).unwrap();
        engine.create_node(key("b"), "GainNode", &[]).unwrap();

        engine.connect(&key("a"), &key("b"), None).unwrap();
        assert!(engine.has_edge(&key("a"), &key("b"), None));

        engine.disconnect(&key("a"), &key("b"), None).unwrap();
        assert!(!engine.has_edge(&key("a"), &key("b"), None));

        // Disconnecting again is a no-op, not an error.
        let ops_before = engine.backend().ops.len();
        engine.disconnect(&key("a"), &key("b"), None).unwrap();
        assert_eq!(engine.backend().ops.len(), ops_before);
    }

    #[test]
    fn connect_into_control_param_targets_the_param() {
        let mut engine = engine();
        engine.create_node(key("lfo"), "OscillatorNode", &[]).unwrap();
        engine.create_node(key("osc"), "OscillatorNode", &[]).unwrap();

        engine.connect(&key("lfo"), &key("osc"), Some("frequency")).unwrap();

        let lfo = engine.registry().get(&key("lfo")).unwrap().handle();
        let osc = engine.registry().get(&key("osc")).unwrap().handle();
        assert!(engine.backend().ops.contains(&Op::ConnectToControl(
            lfo,
            osc,
            "frequency".to_string(),
        )));
        // The destination's default input was not touched.
        assert!(!engine.backend().ops.contains(&Op::Connect(lfo, osc)));
        assert!(engine.has_edge(&key("lfo"), &key("osc"), Some("frequency")));
        assert!(!engine.has_edge(&key("lfo"), &key("osc"), None));
    }

    #[test]
    fn connect_into_attribute_is_invalid_target() {
        let mut engine = engine();
        engine.create_node(key("a"), "GainNode", &[]).unwrap();
        engine.create_node(key("b"), "BiquadFilterNode", &[]).unwrap();

        let err = engine
            .connect(&key("a"), &key("b"), Some("type"))
            .unwrap_err();
        assert!(matches!(err, PatchError::InvalidTarget { .. }));
        assert_eq!(engine.edge_count(), 0);
    }

    #[test]
    fn duplicate_edges_are_additive() {
        let mut engine = engine();
        engine.create_node(key("a"), "GainNode", &[]).unwrap();
        engine.create_node(key("b"), "GainNode", &[]).unwrap();

        engine.connect(&key("a"), &key("b"), None).unwrap();
        engine.connect(&key("a"), &key("b"), None).unwrap();
        engine.connect(&key("a"), &key("b"), Some("gain")).unwrap();
        assert_eq!(engine.edge_count(), 3);

        // A plain disconnect removes both plain edges, not the routed one.
        engine.disconnect(&key("a"), &key("b"), None).unwrap();
        assert_eq!(engine.edge_count(), 1);
        assert!(engine.has_edge(&key("a"), &key("b"), Some("gain")));
    }

    #[test]
    fn connect_missing_endpoint_is_not_found() {
        let mut engine = engine();
        engine.create_node(key("a"), "GainNode", &[]).unwrap();

        assert!(matches!(
            engine.connect(&key("a"), &key("ghost"), None),
            Err(PatchError::NodeNotFound { .. })
        ));
        assert!(matches!(
            engine.connect(&key("ghost"), &key("a"), None),
            Err(PatchError::NodeNotFound { .. })
        ));
        assert!(matches!(
            engine.disconnect(&key("ghost"), &key("a"), None),
            Err(PatchError::NodeNotFound { .. })
        ));
    }

    #[test]
    fn delete_node_severs_all_incident_edges() {
        let mut engine = engine();
        engine.create_node(key("a"), "OscillatorNode", &[]).unwrap();
        engine.create_node(key("b"), "GainNode", &[]).unwrap();
        engine.create_node(key("c"), "GainNode", &[]).unwrap();
        engine.connect(&key("a"), &key("b"), None).unwrap();
        engine.connect(&key("b"), &key("c"), None).unwrap();
        engine.connect(&key("c"), &key("b"), Some("gain")).unwrap();

        engine.delete_node(&key("b")).unwrap();

        assert_eq!(engine.edge_count(), 0);
        assert!(!engine.contains(&key("b")));

        // A stopped oscillator would be wrong here; only b was deleted.
        assert!(!engine.backend().ops.iter().any(|op| matches!(op, Op::Stop(_))));

        // Subsequent references to the key fail.
        assert!(matches!(
            engine.set_param(&key("b"), "gain", AttrValue::Float(0.0)),
            Err(PatchError::NodeNotFound { .. })
        ));
        assert!(matches!(
            engine.connect(&key("a"), &key("b"), None),
            Err(PatchError::NodeNotFound { .. })
        ));
    }

    #[test]
    fn delete_oscillator_stops_then_releases() {
        let mut engine = engine();
        engine.create_node(key("osc"), "OscillatorNode", &[]).unwrap();
        let handle = engine.registry().get(&key("osc")).unwrap().handle();

        engine.delete_node(&key("osc")).unwrap();

        let ops = &engine.backend().ops;
        let stop_at = ops.iter().position(|op| *op == Op::Stop(handle)).unwrap();
        let release_at = ops.iter().position(|op| *op == Op::Release(handle)).unwrap();
        assert!(stop_at < release_at);
    }

    #[test]
    fn delete_missing_key_is_not_found() {
        let mut engine = engine();
        assert!(matches!(
            engine.delete_node(&key("ghost")),
            Err(PatchError::NodeNotFound { .. })
        ));
    }

    #[test]
    fn apply_routes_every_variant() {
        let mut engine = engine();
        engine
            .apply(Patch::CreateNode {
                key: key("osc"),
                kind: "OscillatorNode".to_string(),
                params: vec![ParamSpec::new("frequency", 330.0)],
            })
            .unwrap();
        engine
            .apply(Patch::CreateNode {
                key: key("g"),
                kind: "GainNode".to_string(),
                params: vec![],
            })
            .unwrap();
        engine
            .apply(Patch::CreateParam {
                key: key("g"),
                name: "gain".to_string(),
                value: AttrValue::Float(0.2),
            })
            .unwrap();
        engine
            .apply(Patch::Connect { from: key("osc"), to: key("g"), param: None })
            .unwrap();
        engine
            .apply(Patch::DeleteParam { key: key("g"), name: "gain".to_string() })
            .unwrap();
        engine
            .apply(Patch::Disconnect { from: key("osc"), to: key("g"), param: None })
            .unwrap();
        engine.apply(Patch::DeleteNode { key: key("osc") }).unwrap();

        assert_eq!(engine.node_count(), 1);
        assert_eq!(engine.edge_count(), 0);
        assert_eq!(engine.control_value(&key("g"), "gain"), Some(1.0));
    }

    #[test]
    fn apply_batch_aborts_in_place() {
        let mut engine = engine();
        let err = engine
            .apply_batch(vec![
                Patch::CreateNode {
                    key: key("a"),
                    kind: "GainNode".to_string(),
                    params: vec![],
                },
                Patch::Connect { from: key("a"), to: key("ghost"), param: None },
                Patch::CreateNode {
                    key: key("c"),
                    kind: "GainNode".to_string(),
                    params: vec![],
                },
            ])
            .unwrap_err();

        assert_eq!(err.index, 1);
        assert!(matches!(err.source, PatchError::NodeNotFound { .. }));
        // Patch 0 stays applied, patch 2 was never attempted.
        assert!(engine.contains(&key("a")));
        assert!(!engine.contains(&key("c")));
    }

    #[test]
    fn transport_is_forwarded() {
        let mut engine = engine();
        engine.resume();
        engine.suspend();
        assert_eq!(engine.backend().ops, vec![Op::Resume, Op::Suspend]);
    }

    #[test]
    fn snapshot_is_deterministic_and_serializable() {
        let mut engine = engine();
        engine
            .create_node(key("osc"), "OscillatorNode", &[ParamSpec::new("frequency", 220.0)])
            .unwrap();
        engine.create_node(key("dest"), "AudioDestinationNode", &[]).unwrap();
        engine.connect(&key("osc"), &key("dest"), None).unwrap();

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.nodes.len(), 2);
        assert_eq!(snapshot.nodes[0].key, key("dest"));
        assert_eq!(snapshot.nodes[1].key, key("osc"));
        assert_eq!(snapshot.edges.len(), 1);

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GraphSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
