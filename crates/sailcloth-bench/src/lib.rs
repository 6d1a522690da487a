//! # sailcloth-bench
//!
//! Benchmark suite for the sailcloth engine.
//!
//! Provides five procedural scenarios (the hanging curtain plus the flag,
//! sail, banner and rope rigs), metric collection, and CSV/JSON export
//! for regression tracking.

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::BenchmarkMetrics;
pub use runner::BenchmarkRunner;
pub use scenarios::{Scenario, ScenarioKind};
