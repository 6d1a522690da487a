//! # sailcloth-types
//!
//! Shared types, identifiers, error types, and physical constants
//! for the sailcloth simulation engine.
//!
//! This crate has zero domain logic: it defines the vocabulary
//! that all other sailcloth crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{SailclothError, SailclothResult};
pub use ids::GridCoord;
