//! The boundary to the underlying audio runtime.
//!
//! The engine wires and configures nodes; it never processes signal. All of
//! that lives behind [`AudioBackend`], which the hosting application
//! implements over whatever runtime actually renders audio. Every call is
//! fire-and-forget: the hand-off into a real-time rendering context is the
//! runtime's business, and the engine does not wait for audible effect.
//!
//! The trait is object-safe, so `PatchEngine<Box<dyn AudioBackend>>` works
//! where runtime selection happens late.

use crate::kind::NodeKind;
use crate::value::AttrValue;

/// Opaque handle the backend assigns to each node it constructs.
///
/// The engine stores these in its registry entries and passes them back for
/// every subsequent operation; it never interprets the inner value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BackendNodeId(u64);

impl BackendNodeId {
    /// Wraps a backend-chosen identifier.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[inline]
    pub fn index(self) -> u64 {
        self.0
    }
}

/// Operations the engine requires from an audio runtime.
///
/// Implementations are expected to tolerate redundant calls (stopping a node
/// that never ran, disconnecting an absent edge) the way real runtimes do;
/// the engine filters out what it can, but makes no promise beyond its own
/// bookkeeping.
pub trait AudioBackend {
    /// Constructs a node of the given kind and returns its handle.
    ///
    /// For [`NodeKind::Delay`] the runtime should allocate
    /// [`MAX_DELAY_SECS`](crate::kind::MAX_DELAY_SECS) of line.
    fn create_node(&mut self, kind: NodeKind) -> BackendNodeId;

    /// Drops the runtime's side of a node after the engine removed it.
    fn release_node(&mut self, node: BackendNodeId);

    /// Starts a self-starting node (signal generators).
    fn start(&mut self, node: BackendNodeId);

    /// Stops a stoppable node ahead of teardown.
    fn stop(&mut self, node: BackendNodeId);

    /// Sets the live value of a control parameter.
    fn set_control(&mut self, node: BackendNodeId, control: &str, value: f32);

    /// Assigns a plain attribute on the node's configuration surface.
    fn set_attribute(&mut self, node: BackendNodeId, name: &str, value: &AttrValue);

    /// Routes `from` into `to`'s default input.
    fn connect(&mut self, from: BackendNodeId, to: BackendNodeId);

    /// Routes `from` into the named control parameter on `to`.
    fn connect_to_control(&mut self, from: BackendNodeId, to: BackendNodeId, control: &str);

    /// Removes the `from` → `to` default-input routing.
    fn disconnect(&mut self, from: BackendNodeId, to: BackendNodeId);

    /// Removes the `from` → `to[control]` routing.
    fn disconnect_from_control(&mut self, from: BackendNodeId, to: BackendNodeId, control: &str);

    /// Resumes rendering. Default no-op for runtimes without a transport.
    fn resume(&mut self) {}

    /// Suspends rendering. Default no-op for runtimes without a transport.
    fn suspend(&mut self) {}
}
