//! Shared test backend: records every call the engine hands to the runtime.

#![allow(dead_code)]

use parche_core::{AttrValue, AudioBackend, BackendNodeId, NodeKind};

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
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

/// Recording backend with sequential handle assignment.
#[derive(Debug, Default)]
pub struct Recorder {
    next_id: u64,
    pub ops: Vec<Op>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes constructed so far (releases not subtracted).
    pub fn created(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, Op::Create(..))).count()
    }

    /// Number of nodes released so far.
    pub fn released(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, Op::Release(_))).count()
    }
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
