//! # sailcloth-solver
//!
//! Force accumulation, time integration and simulation state management.
//!
//! ## Key Types
//!
//! - [`Cloth`]: Owns the grid, its render mesh, state and integrator
//! - [`SimulationState`]: SoA buffers for positions, velocities, forces, locks
//! - [`SolverStrategy`]: Pluggable integrator trait
//! - [`ImprovedEuler`]: Two-stage explicit Heun integrator
//! - [`ClothConfig`]: Stiffness, damping, mass, drag and external fields
//! - [`ForceModel`]: Gravity, structural springs and aerodynamic drag

pub mod cloth;
pub mod config;
pub mod constraints;
pub mod forces;
pub mod heun;
pub mod state;
pub mod strategy;

pub use cloth::Cloth;
pub use config::{ClothConfig, DragModel};
pub use forces::ForceModel;
pub use heun::ImprovedEuler;
pub use state::SimulationState;
pub use strategy::{SolverStrategy, StepResult};
