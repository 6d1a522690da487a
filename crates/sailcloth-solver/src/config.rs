//! Cloth configuration.
//!
//! Physical parameters shared by every point and spring of one cloth:
//! stiffness, damping, mass, drag and the constant external fields.

use sailcloth_types::constants::{
    DEFAULT_DAMPING, DEFAULT_DRAG, DEFAULT_GRAVITY, DEFAULT_MASS, DEFAULT_STIFFNESS,
};
use sailcloth_types::{SailclothError, SailclothResult};
use serde::{Deserialize, Serialize};

/// How aerodynamic drag treats the two triangles of each grid cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragModel {
    /// First triangle: weight 0.5, velocity relative to the ambient air.
    /// Second triangle: weight 0.75, absolute velocity.
    ///
    /// This asymmetry reproduces the reference force model. It is most
    /// likely a latent defect; see [`DragModel::Symmetric`].
    /// One difference remains: the second triangle averages the velocities
    /// of its own corners `p2, p3, p4`, where the reference used `p4` twice.
    #[default]
    Reference,
    /// Both triangles use weight 0.5 and velocity relative to the air.
    /// A deliberate deviation from the reference model.
    Symmetric,
}

/// Configuration for one cloth.
///
/// Stability of the explicit integrator is the caller's responsibility:
/// nothing here clamps `dt`. As a rule of thumb a spring chain stays stable
/// while `dt < 2 * sqrt(mass / stiffness)`, and damping tightens that bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothConfig {
    /// Structural spring stiffness `k`.
    pub stiffness: f32,

    /// Structural spring damping `kv`.
    pub damping: f32,

    /// Mass of every point.
    pub mass: f32,

    /// Aerodynamic drag coefficient.
    pub drag_coefficient: f32,

    /// Constant force applied to every point, independent of mass.
    pub gravity: [f32; 3],

    /// Velocity of the ambient air.
    pub air_velocity: [f32; 3],

    /// Per-cell drag weighting.
    pub drag_model: DragModel,
}

impl Default for ClothConfig {
    fn default() -> Self {
        Self {
            stiffness: DEFAULT_STIFFNESS,
            damping: DEFAULT_DAMPING,
            mass: DEFAULT_MASS,
            drag_coefficient: DEFAULT_DRAG,
            gravity: DEFAULT_GRAVITY,
            air_velocity: [0.0, 0.0, 0.0],
            drag_model: DragModel::Reference,
        }
    }
}

impl ClothConfig {
    /// Springs only: no gravity, no drag.
    pub fn springs_only() -> Self {
        Self {
            gravity: [0.0; 3],
            drag_coefficient: 0.0,
            ..Default::default()
        }
    }

    /// A light cloth in a steady breeze along +X.
    pub fn windy() -> Self {
        Self {
            stiffness: 60.0,
            damping: 8.0,
            air_velocity: [3.0, 0.0, 0.0],
            ..Default::default()
        }
    }

    /// Returns `1 / mass`.
    #[inline]
    pub fn inv_mass(&self) -> f32 {
        1.0 / self.mass
    }

    /// Checks that every parameter is finite and the mass is positive.
    pub fn validate(&self) -> SailclothResult<()> {
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(SailclothError::InvalidConfig(format!(
                "Mass must be positive and finite, got {}",
                self.mass
            )));
        }
        let scalars = [
            ("stiffness", self.stiffness),
            ("damping", self.damping),
            ("drag_coefficient", self.drag_coefficient),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(SailclothError::InvalidConfig(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if !self.gravity.iter().all(|v| v.is_finite()) {
            return Err(SailclothError::InvalidConfig("Gravity must be finite".into()));
        }
        if !self.air_velocity.iter().all(|v| v.is_finite()) {
            return Err(SailclothError::InvalidConfig(
                "Air velocity must be finite".into(),
            ));
        }
        Ok(())
    }
}
