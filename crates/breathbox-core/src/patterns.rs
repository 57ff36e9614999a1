//! Builtin breathing-pattern registry.
//!
//! Named phase-timing presets a driver can offer instead of hand-typed
//! durations. The default session profile is `box` (4-4-4-4).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::SessionConfig;

/// Phase timings in seconds. Holds may be zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseTimings {
    pub inhale: f32,
    pub hold_in: f32,
    pub exhale: f32,
    pub hold_out: f32,
}

impl PhaseTimings {
    /// Total cycle duration in seconds
    pub fn total_seconds(&self) -> f32 {
        self.inhale + self.hold_in + self.exhale + self.hold_out
    }

    /// Build a session configuration with this pattern's timings.
    pub fn to_session_config(&self, total_session_sec: f32) -> SessionConfig {
        SessionConfig {
            inhale_sec: self.inhale,
            hold_in_sec: self.hold_in,
            exhale_sec: self.exhale,
            hold_out_sec: self.hold_out,
            total_session_sec,
        }
    }
}

/// Breathing pattern definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreathPattern {
    /// Unique pattern identifier
    pub id: String,
    /// Display label
    pub label: String,
    /// Category tag
    pub tag: String,
    /// Description of the pattern
    pub description: String,
    /// Phase timings in seconds
    pub timings: PhaseTimings,
    /// Recommended number of cycles
    pub recommended_cycles: u32,
}

impl BreathPattern {
    /// Breaths per minute at this pattern's cycle length.
    pub fn breaths_per_minute(&self) -> f32 {
        60.0 / self.timings.total_seconds()
    }

    /// Session length covering the recommended number of cycles.
    pub fn recommended_session_sec(&self) -> f32 {
        self.timings.total_seconds() * self.recommended_cycles as f32
    }
}

/// Get all built-in breathing patterns
pub fn builtin_patterns() -> HashMap<String, BreathPattern> {
    let mut patterns = HashMap::new();

    patterns.insert(
        "box".to_string(),
        BreathPattern {
            id: "box".to_string(),
            label: "Focus".to_string(),
            tag: "Concentration".to_string(),
            description: "Equal four-count sides. The classic box.".to_string(),
            timings: PhaseTimings {
                inhale: 4.0,
                hold_in: 4.0,
                exhale: 4.0,
                hold_out: 4.0,
            },
            recommended_cycles: 18,
        },
    );

    patterns.insert(
        "4-7-8".to_string(),
        BreathPattern {
            id: "4-7-8".to_string(),
            label: "Tranquility".to_string(),
            tag: "Sleep & Anxiety".to_string(),
            description: "A natural tranquilizer for the nervous system.".to_string(),
            timings: PhaseTimings {
                inhale: 4.0,
                hold_in: 7.0,
                exhale: 8.0,
                hold_out: 0.0,
            },
            recommended_cycles: 4,
        },
    );

    patterns.insert(
        "coherence".to_string(),
        BreathPattern {
            id: "coherence".to_string(),
            label: "Coherence".to_string(),
            tag: "Heart Health".to_string(),
            description: "Six seconds in, six seconds out.".to_string(),
            timings: PhaseTimings {
                inhale: 6.0,
                hold_in: 0.0,
                exhale: 6.0,
                hold_out: 0.0,
            },
            recommended_cycles: 10,
        },
    );

    patterns.insert(
        "triangle".to_string(),
        BreathPattern {
            id: "triangle".to_string(),
            label: "Triangle".to_string(),
            tag: "Yoga".to_string(),
            description: "Three equal sides for emotional stability.".to_string(),
            timings: PhaseTimings {
                inhale: 4.0,
                hold_in: 4.0,
                exhale: 4.0,
                hold_out: 0.0,
            },
            recommended_cycles: 8,
        },
    );

    patterns.insert(
        "tactical".to_string(),
        BreathPattern {
            id: "tactical".to_string(),
            label: "Tactical".to_string(),
            tag: "Advanced Focus".to_string(),
            description: "Extended box breathing for high-stress situations.".to_string(),
            timings: PhaseTimings {
                inhale: 5.0,
                hold_in: 5.0,
                exhale: 5.0,
                hold_out: 5.0,
            },
            recommended_cycles: 5,
        },
    );

    patterns
}

/// Get a pattern by ID
pub fn get_pattern(id: &str) -> Option<BreathPattern> {
    builtin_patterns().remove(id)
}
