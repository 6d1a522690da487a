//! # sailcloth-telemetry
//!
//! Event bus for simulation telemetry. Emits structured events
//! (step timing, energy, lock changes) that are consumed by pluggable
//! sinks (in-memory capture, `tracing` logs, JSON Lines files).

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, JsonLinesSink, TracingSink, VecSink};
