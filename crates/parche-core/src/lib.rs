//! Parche Core - patch application for live audio graphs
//!
//! This crate applies a stream of structural change records ("patches") to a
//! live, mutable audio graph, keeping a node registry consistent with the
//! intended topology. It is the wiring layer between a producer that diffs
//! graph descriptions and a runtime that renders audio; it neither diffs nor
//! renders anything itself.
//!
//! # Core Abstractions
//!
//! ## Patch Model
//!
//! - [`Patch`] - Tagged union of the six change instructions
//! - [`ParamSpec`] - Initial parameter assignment inside a create
//! - [`AttrValue`] - Values a patch can assign (numeric, text, boolean)
//!
//! ## Graph State
//!
//! - [`NodeRegistry`] - Key → owned node entry, the source of truth
//! - [`NodeEntry`] - Backend handle plus per-node parameter bookkeeping
//! - [`ControlParam`] - Live value with an immutable default
//! - [`Edge`] - Directed connection, optionally into a control parameter
//!
//! ## Engine
//!
//! - [`PatchEngine`] - Factory, parameter setter, connection manager and
//!   dispatcher in one synchronous object
//! - [`CreateOutcome`] - Whether a create was exact or degraded to a gain
//!   stand-in
//! - [`GraphSnapshot`] - Serializable view of the whole graph
//!
//! ## Runtime Boundary
//!
//! - [`AudioBackend`] - Object-safe trait the hosting application implements
//!   over the actual audio runtime; every call is fire-and-forget
//! - [`NodeKind`] / [`KindProfile`] - The closed kind set and the static
//!   declaration of each kind's control parameters and capabilities
//!
//! # Example
//!
//! ```rust,ignore
//! use parche_core::{NodeKey, Patch, ParamSpec, PatchEngine};
//!
//! let mut engine = PatchEngine::new(backend);
//! engine.apply_batch(vec![
//!     Patch::CreateNode {
//!         key: NodeKey::from("osc"),
//!         kind: "OscillatorNode".into(),
//!         params: vec![ParamSpec::new("frequency", 440.0)],
//!     },
//!     Patch::CreateNode {
//!         key: NodeKey::from("out"),
//!         kind: "AudioDestinationNode".into(),
//!         params: vec![],
//!     },
//!     Patch::Connect { from: "osc".into(), to: "out".into(), param: None },
//! ])?;
//! ```
//!
//! # Design Principles
//!
//! - **Explicit tags**: a patch's variant is a first-class discriminant,
//!   never inferred from which fields happen to be present
//! - **Declared classification**: each kind declares its control parameters
//!   up front; distinguishing them from plain attributes never probes a
//!   live node
//! - **Explicit ownership**: the registry is an injected object, not ambient
//!   state, and it exclusively owns every node entry
//! - **Typed failures**: errors surface as [`PatchError`]; the only silent
//!   paths are the defined no-ops (disconnecting an absent edge, resetting
//!   a plain attribute)

pub mod backend;
pub mod error;
pub mod graph;
pub mod key;
pub mod kind;
pub mod param;
pub mod patch;
pub mod value;

// Re-export main types at crate root
pub use backend::{AudioBackend, BackendNodeId};
pub use error::{BatchError, PatchError};
pub use graph::{
    ControlState, CreateOutcome, Edge, GraphSnapshot, NodeEntry, NodeRegistry, NodeState,
    PatchEngine,
};
pub use key::NodeKey;
pub use kind::{ControlSpec, KindProfile, MAX_DELAY_SECS, NodeKind};
pub use param::ControlParam;
pub use patch::{ParamSpec, Patch};
pub use value::AttrValue;
