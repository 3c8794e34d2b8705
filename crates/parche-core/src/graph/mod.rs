//! Live-graph state and the patch-application engine.
//!
//! The module splits along the ownership seams:
//!
//! - [`NodeRegistry`]: key → owned entry, the single source of truth for
//!   what currently exists.
//! - [`NodeEntry`]: backend handle plus the control-parameter table and
//!   attribute map tracked per node.
//! - [`Edge`]: one directed connection, optionally routed into a control
//!   parameter on the destination.
//! - [`PatchEngine`]: the factory, parameter setter, connection manager and
//!   patch dispatcher over all of the above.
//!
//! Everything here is synchronous, single-threaded and lock-free by
//! construction; the only shared mutable resource is the registry, and the
//! engine is its sole mutator.

pub mod edge;
pub mod engine;
pub mod node;
pub mod registry;

pub use edge::Edge;
pub use engine::{ControlState, CreateOutcome, GraphSnapshot, NodeState, PatchEngine};
pub use node::NodeEntry;
pub use registry::NodeRegistry;
