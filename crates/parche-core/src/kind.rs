//! Supported node kinds and their static profiles.
//!
//! A [`KindProfile`] declares, once per kind, which named members are control
//! parameters (with their default values) and whether the kind is
//! self-starting or stoppable. The engine copies this declaration into each
//! node entry at creation time, so classifying a member never requires
//! probing a live node.
//!
//! Wire names and defaults follow the Web Audio runtimes this engine is built
//! to drive: an oscillator idles at 440 Hz, a biquad filter at 350 Hz with a
//! Q of 1, a gain stage at unity.

use serde::{Deserialize, Serialize};

/// The closed set of processing node kinds the factory can construct.
///
/// Anything outside this set goes down the degraded path: the factory
/// substitutes a passthrough [`Gain`](Self::Gain) node and logs a warning.
/// "Unsupported" is never a first-class kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Periodic waveform generator. Self-starting.
    #[serde(rename = "OscillatorNode")]
    Oscillator,
    /// Delay line with a fixed maximum of [`MAX_DELAY_SECS`] seconds.
    #[serde(rename = "DelayNode")]
    Delay,
    /// Biquad filter.
    #[serde(rename = "BiquadFilterNode")]
    Filter,
    /// Gain stage; also the stand-in for unsupported kinds.
    #[serde(rename = "GainNode")]
    Gain,
    /// Terminal sink. One per graph by convention, though the engine does
    /// not enforce that; topology is the producer's responsibility.
    #[serde(rename = "AudioDestinationNode")]
    Destination,
}

/// Maximum delay, in seconds, a [`NodeKind::Delay`] node is constructed with.
pub const MAX_DELAY_SECS: f32 = 1.0;

/// A control parameter declared by a kind profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSpec {
    /// Member name, as addressed by patches (e.g. `"frequency"`).
    pub name: &'static str,
    /// Immutable default value the parameter starts at and resets to.
    pub default: f32,
}

/// Static declaration of a kind's control parameters and capabilities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindProfile {
    /// Control parameters, with defaults. Members not listed here are plain
    /// attributes.
    pub controls: &'static [ControlSpec],
    /// Whether the factory starts the node immediately upon creation.
    pub self_starting: bool,
    /// Whether the factory stops the node before tearing it down.
    pub stoppable: bool,
}

const OSCILLATOR_PROFILE: KindProfile = KindProfile {
    controls: &[
        ControlSpec { name: "frequency", default: 440.0 },
        ControlSpec { name: "detune", default: 0.0 },
    ],
    self_starting: true,
    stoppable: true,
};

const DELAY_PROFILE: KindProfile = KindProfile {
    controls: &[ControlSpec { name: "delayTime", default: 0.0 }],
    self_starting: false,
    stoppable: false,
};

const FILTER_PROFILE: KindProfile = KindProfile {
    controls: &[
        ControlSpec { name: "frequency", default: 350.0 },
        ControlSpec { name: "detune", default: 0.0 },
        ControlSpec { name: "Q", default: 1.0 },
        ControlSpec { name: "gain", default: 0.0 },
    ],
    self_starting: false,
    stoppable: false,
};

const GAIN_PROFILE: KindProfile = KindProfile {
    controls: &[ControlSpec { name: "gain", default: 1.0 }],
    self_starting: false,
    stoppable: false,
};

const DESTINATION_PROFILE: KindProfile = KindProfile {
    controls: &[],
    self_starting: false,
    stoppable: false,
};

impl NodeKind {
    /// Every supported kind, in a stable listing order.
    pub const ALL: [NodeKind; 5] = [
        NodeKind::Oscillator,
        NodeKind::Delay,
        NodeKind::Filter,
        NodeKind::Gain,
        NodeKind::Destination,
    ];

    /// Resolves a wire-format type name to a kind.
    ///
    /// Returns `None` for anything outside the supported set; the factory
    /// turns that into the degraded gain-substitution path rather than an
    /// error.
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "OscillatorNode" => Some(Self::Oscillator),
            "DelayNode" => Some(Self::Delay),
            "BiquadFilterNode" => Some(Self::Filter),
            "GainNode" => Some(Self::Gain),
            "AudioDestinationNode" => Some(Self::Destination),
            _ => None,
        }
    }

    /// The wire-format type name for this kind.
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Oscillator => "OscillatorNode",
            Self::Delay => "DelayNode",
            Self::Filter => "BiquadFilterNode",
            Self::Gain => "GainNode",
            Self::Destination => "AudioDestinationNode",
        }
    }

    /// The static profile for this kind.
    pub const fn profile(self) -> &'static KindProfile {
        match self {
            Self::Oscillator => &OSCILLATOR_PROFILE,
            Self::Delay => &DELAY_PROFILE,
            Self::Filter => &FILTER_PROFILE,
            Self::Gain => &GAIN_PROFILE,
            Self::Destination => &DESTINATION_PROFILE,
        }
    }
}
