//! Headless backend that narrates every runtime call via `tracing`.
//!
//! Useful for dry-running a patch stream: the graph is fully wired in the
//! engine's bookkeeping while the "runtime" just logs what it was told.

use parche_core::{AttrValue, AudioBackend, BackendNodeId, NodeKind};

/// Logging, non-rendering audio backend.
#[derive(Debug, Default)]
pub struct TraceBackend {
    next_id: u64,
    calls: u64,
}

impl TraceBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of runtime calls the engine issued.
    pub fn calls(&self) -> u64 {
        self.calls
    }
}

impl AudioBackend for TraceBackend {
    fn create_node(&mut self, kind: NodeKind) -> BackendNodeId {
        let id = BackendNodeId::new(self.next_id);
        self.next_id += 1;
        self.calls += 1;
        tracing::debug!(kind = kind.type_name(), id = id.index(), "runtime: create");
        id
    }

    fn release_node(&mut self, node: BackendNodeId) {
        self.calls += 1;
        tracing::debug!(id = node.index(), "runtime: release");
    }

    fn start(&mut self, node: BackendNodeId) {
        self.calls += 1;
        tracing::debug!(id = node.index(), "runtime: start");
    }

    fn stop(&mut self, node: BackendNodeId) {
        self.calls += 1;
        tracing::debug!(id = node.index(), "runtime: stop");
    }

    fn set_control(&mut self, node: BackendNodeId, control: &str, value: f32) {
        self.calls += 1;
        tracing::debug!(id = node.index(), control, value, "runtime: set control");
    }

    fn set_attribute(&mut self, node: BackendNodeId, name: &str, value: &AttrValue) {
        self.calls += 1;
        tracing::debug!(id = node.index(), name, ?value, "runtime: set attribute");
    }

    fn connect(&mut self, from: BackendNodeId, to: BackendNodeId) {
        self.calls += 1;
        tracing::debug!(from = from.index(), to = to.index(), "runtime: connect");
    }

    fn connect_to_control(&mut self, from: BackendNodeId, to: BackendNodeId, control: &str) {
        self.calls += 1;
        tracing::debug!(from = from.index(), to = to.index(), control, "runtime: connect to control");
    }

    fn disconnect(&mut self, from: BackendNodeId, to: BackendNodeId) {
        self.calls += 1;
        tracing::debug!(from = from.index(), to = to.index(), "runtime: disconnect");
    }

    fn disconnect_from_control(&mut self, from: BackendNodeId, to: BackendNodeId, control: &str) {
        self.calls += 1;
        tracing::debug!(from = from.index(), to = to.index(), control, "runtime: disconnect from control");
    }

    fn resume(&mut self) {
        self.calls += 1;
        tracing::debug!("runtime: resume");
    }

    fn suspend(&mut self) {
        self.calls += 1;
        tracing::debug!("runtime: suspend");
    }
}
