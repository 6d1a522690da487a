//! Simulation event types.
//!
//! Structured events emitted by the scene runner at various points in each
//! step. Events are lightweight value types that carry just enough data to
//! be useful for monitoring and debugging.

use serde::{Deserialize, Serialize};

/// A simulation event emitted by the runner.
///
/// Events are tagged with a step index and carry domain-specific data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Step number (0-indexed).
    pub step: u64,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// Step started.
    StepBegin {
        /// Simulated time at the start of this step (seconds).
        sim_time: f64,
        /// Time delta about to be applied.
        dt: f32,
    },

    /// Step completed for every cloth.
    StepEnd {
        /// Wall-clock time for the entire step (seconds).
        wall_time: f64,
        /// Force evaluations summed over all cloths.
        force_evaluations: u32,
    },

    /// Energy snapshot of one cloth.
    Energy {
        /// Cloth name.
        cloth: String,
        /// Kinetic energy of the unlocked points.
        kinetic: f64,
    },

    /// A lock flag was set or cleared.
    LockChanged {
        /// Cloth name.
        cloth: String,
        row: usize,
        col: usize,
        locked: bool,
    },

    /// The runner was paused or resumed.
    PauseToggled {
        paused: bool,
    },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SimulationEvent {
    /// Creates a new event for the given step.
    pub fn new(step: u64, kind: EventKind) -> Self {
        Self { step, kind }
    }

    /// Short name of the payload variant.
    pub fn label(&self) -> &str {
        match &self.kind {
            EventKind::StepBegin { .. } => "step_begin",
            EventKind::StepEnd { .. } => "step_end",
            EventKind::Energy { .. } => "energy",
            EventKind::LockChanged { .. } => "lock_changed",
            EventKind::PauseToggled { .. } => "pause_toggled",
            EventKind::Custom { label, .. } => label,
        }
    }
}
