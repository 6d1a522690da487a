//! # sailcloth-io
//!
//! Scene files, validation, the multi-cloth runner and frame export.
//!
//! Defines the boundary types that external systems (CLI, viewers, asset
//! pipelines) use to drive the sailcloth core.

pub mod contract;
pub mod export;
pub mod runner;
pub mod validator;

pub use contract::{ClothSpec, RunConfig, SceneConfig};
pub use export::{FrameExporter, JsonFrameExporter};
pub use runner::SceneRunner;
