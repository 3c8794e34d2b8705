//! Values carried by parameter patches.
//!
//! Control parameters only ever take numeric values, but plain attributes are
//! free-form: a filter's `type` is a string, a flag may be a boolean. The
//! wire representation is untagged: `440`, `"lowpass"` and `true` all parse
//! directly.

use serde::{Deserialize, Serialize};

/// A value assigned to a node member by a patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Numeric value. The only arm accepted by control parameters.
    Float(f32),
    /// Free-form string attribute (e.g. an oscillator waveform name).
    Text(String),
    /// Boolean attribute.
    Bool(bool),
}

impl AttrValue {
    /// Returns the numeric value, if this is the [`Float`](Self::Float) arm.
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<f32> for AttrValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}
