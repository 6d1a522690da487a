//! Force accumulation: gravity, structural springs and aerodynamic drag.
//!
//! One call to [`ForceModel::accumulate`] overwrites the state's force
//! scratch with the net force on every point for the current positions
//! and velocities. Locked points receive forces like any other point; the
//! integrator is what ignores them.

use sailcloth_math::geometry::{direction_and_length, edge_normal};
use sailcloth_math::Vec3;
use sailcloth_mesh::topology::{GridCell, GridTopology};
use sailcloth_types::constants::{DRAG_WEIGHT_FIRST, DRAG_WEIGHT_SECOND};

use crate::config::{ClothConfig, DragModel};
use crate::state::SimulationState;

/// Force parameters of one cloth, unpacked into `glam` types.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceModel {
    pub gravity: Vec3,
    pub stiffness: f32,
    pub damping: f32,
    pub rest_length: f32,
    pub drag_coefficient: f32,
    pub air_velocity: Vec3,
    pub drag_model: DragModel,
}

/// Weighting and air handling of one drag triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragTerm {
    weight: f32,
    relative_to_air: bool,
}

impl ForceModel {
    /// Builds the model from a cloth configuration and the spring rest length.
    pub fn new(config: &ClothConfig, rest_length: f32) -> Self {
        Self {
            gravity: Vec3::from_array(config.gravity),
            stiffness: config.stiffness,
            damping: config.damping,
            rest_length,
            drag_coefficient: config.drag_coefficient,
            air_velocity: Vec3::from_array(config.air_velocity),
            drag_model: config.drag_model,
        }
    }

    /// Net force on every point: gravity, then springs, then drag.
    pub fn accumulate(&self, topology: &GridTopology, state: &mut SimulationState) {
        state.reset_forces(self.gravity);
        self.apply_springs(topology, state);
        if self.drag_coefficient != 0.0 {
            self.apply_drag(topology, state);
        }
    }

    /// Adds the force of every rope and cross spring.
    pub fn apply_springs(&self, topology: &GridTopology, state: &mut SimulationState) {
        for [a, b] in topology.springs() {
            let f = self.spring_force(
                state.position(a),
                state.position(b),
                state.velocity(a),
                state.velocity(b),
            );
            state.add_force(a, f);
            state.add_force(b, -f);
        }
    }

    /// Force exerted on endpoint `a` by the spring `a`–`b`; `b` receives the
    /// negation.
    ///
    /// With `dir = (p_a - p_b) / |p_a - p_b|` the magnitude along `dir` is
    /// `-k (len - rest) - kv (v_a·dir - v_b·dir)`. Coincident endpoints have
    /// no direction and yield zero.
    #[inline]
    pub fn spring_force(&self, pa: Vec3, pb: Vec3, va: Vec3, vb: Vec3) -> Vec3 {
        let Some((dir, len)) = direction_and_length(pa - pb) else {
            return Vec3::ZERO;
        };
        let spring = -self.stiffness * (len - self.rest_length);
        let damp = -self.damping * (va.dot(dir) - vb.dot(dir));
        dir * (spring + damp)
    }

    /// Adds aerodynamic drag for both triangles of every cell.
    pub fn apply_drag(&self, topology: &GridTopology, state: &mut SimulationState) {
        let [first, second] = self.drag_terms();
        for cell in topology.cells() {
            self.apply_first_triangle(cell, first, state);
            self.apply_second_triangle(cell, second, state);
        }
    }

    fn drag_terms(&self) -> [DragTerm; 2] {
        match self.drag_model {
            DragModel::Reference => [
                DragTerm {
                    weight: DRAG_WEIGHT_FIRST,
                    relative_to_air: true,
                },
                DragTerm {
                    weight: DRAG_WEIGHT_SECOND,
                    relative_to_air: false,
                },
            ],
            DragModel::Symmetric => [DragTerm {
                weight: DRAG_WEIGHT_FIRST,
                relative_to_air: true,
            }; 2],
        }
    }

    /// Triangle `(p1, p2, p3)`, normal `(p1 - p2) × (p3 - p2)`.
    fn apply_first_triangle(&self, cell: GridCell, term: DragTerm, state: &mut SimulationState) {
        let GridCell { p1, p2, p3, .. } = cell;
        let Some(normal) = edge_normal(
            state.position(p1) - state.position(p2),
            state.position(p3) - state.position(p2),
        ) else {
            return;
        };
        let mean_vel = (state.velocity(p1) + state.velocity(p2) + state.velocity(p3)) / 3.0;
        let share = self.drag_share(mean_vel, normal, term);
        for v in [p1, p2, p3] {
            state.add_force(v, share);
        }
    }

    /// Triangle `(p2, p3, p4)`, normal `(p2 - p4) × (p3 - p4)`.
    fn apply_second_triangle(&self, cell: GridCell, term: DragTerm, state: &mut SimulationState) {
        let GridCell { p2, p3, p4, .. } = cell;
        let Some(normal) = edge_normal(
            state.position(p2) - state.position(p4),
            state.position(p3) - state.position(p4),
        ) else {
            return;
        };
        let mean_vel = (state.velocity(p2) + state.velocity(p3) + state.velocity(p4)) / 3.0;
        let share = self.drag_share(mean_vel, normal, term);
        for v in [p2, p3, p4] {
            state.add_force(v, share);
        }
    }

    /// Drag on each vertex of one triangle.
    ///
    /// `normal` is the unnormalized face normal, so `s = |u| (u·n) w` grows
    /// with the triangle area. The force `-0.5 * c_d * s * n̂` is split evenly
    /// over the three vertices. A zero normal yields zero; callers filter
    /// sliver triangles with [`edge_normal`] first.
    pub fn triangle_drag(&self, mean_vel: Vec3, normal: Vec3, weight: f32) -> Vec3 {
        let area2 = normal.length();
        if area2 == 0.0 {
            return Vec3::ZERO;
        }
        let s = mean_vel.length() * mean_vel.dot(normal) * weight;
        let unit = normal / area2;
        (-0.5 * self.drag_coefficient * s * unit) / 3.0
    }

    #[inline]
    fn drag_share(&self, mean_vel: Vec3, normal: Vec3, term: DragTerm) -> Vec3 {
        let rel = if term.relative_to_air {
            mean_vel - self.air_velocity
        } else {
            mean_vel
        };
        self.triangle_drag(rel, normal, term.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> ForceModel {
        ForceModel::new(&ClothConfig::springs_only(), 1.0)
    }

    #[test]
    fn spring_at_rest_is_silent() {
        let f = model().spring_force(Vec3::X, Vec3::ZERO, Vec3::ZERO, Vec3::ZERO);
        assert!(f.length() < 1e-6);
    }

    #[test]
    fn coincident_spring_is_silent() {
        let f = model().spring_force(Vec3::ONE, Vec3::ONE, Vec3::X, Vec3::ZERO);
        assert_eq!(f, Vec3::ZERO);
    }
}
