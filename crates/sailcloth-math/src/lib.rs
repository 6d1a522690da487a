//! # sailcloth-math
//!
//! Vector math for the sailcloth simulation engine.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec2`, `Vec3`)
//! - Guarded geometric primitives (face normals, spring directions,
//!   tangent-space solves) that return a defined value instead of NaN
//!   for coincident points and degenerate triangles

pub mod geometry;

// Re-export glam types as the canonical math types for sailcloth.
pub use glam::{Vec2, Vec3};
