//! Simulation state: SoA buffers for all per-point data.
//!
//! This is the primary mutable data structure during simulation.
//! The integrator reads and writes these buffers each timestep; the mesh
//! only receives a copy of the positions once a step has finished.

use sailcloth_math::Vec3;
use sailcloth_mesh::TriangleMesh;

/// SoA simulation state buffers.
///
/// # Layout
///
/// All arrays have length `vertex_count`. Channels are stored contiguously:
/// ```text
/// pos_x: [x0, x1, x2, ...]
/// pos_y: [y0, y1, y2, ...]
/// ...
/// ```
///
/// `force_*` is scratch space for one force evaluation. It is sized once
/// here and overwritten by every evaluation, never reallocated.
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Number of points.
    pub vertex_count: usize,

    // ─── Position ───
    pub pos_x: Vec<f32>,
    pub pos_y: Vec<f32>,
    pub pos_z: Vec<f32>,

    // ─── Velocity ───
    pub vel_x: Vec<f32>,
    pub vel_y: Vec<f32>,
    pub vel_z: Vec<f32>,

    // ─── Force scratch ───
    pub force_x: Vec<f32>,
    pub force_y: Vec<f32>,
    pub force_z: Vec<f32>,

    // ─── Anchors ───
    /// Locked points are not integrated but still exert and receive
    /// spring and drag forces at their frozen position.
    pub locked: Vec<bool>,
}

impl SimulationState {
    /// Initialize simulation state from a mesh.
    ///
    /// Copies positions from the mesh. Velocities start at zero and no
    /// point is locked.
    pub fn from_mesh(mesh: &TriangleMesh) -> Self {
        let n = mesh.vertex_count();
        Self {
            vertex_count: n,
            pos_x: mesh.pos_x.clone(),
            pos_y: mesh.pos_y.clone(),
            pos_z: mesh.pos_z.clone(),
            vel_x: vec![0.0; n],
            vel_y: vec![0.0; n],
            vel_z: vec![0.0; n],
            force_x: vec![0.0; n],
            force_y: vec![0.0; n],
            force_z: vec![0.0; n],
            locked: vec![false; n],
        }
    }

    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    #[inline]
    pub fn velocity(&self, i: usize) -> Vec3 {
        Vec3::new(self.vel_x[i], self.vel_y[i], self.vel_z[i])
    }

    #[inline]
    pub fn force(&self, i: usize) -> Vec3 {
        Vec3::new(self.force_x[i], self.force_y[i], self.force_z[i])
    }

    #[inline]
    pub fn set_velocity(&mut self, i: usize, v: Vec3) {
        self.vel_x[i] = v.x;
        self.vel_y[i] = v.y;
        self.vel_z[i] = v.z;
    }

    #[inline]
    pub fn add_force(&mut self, i: usize, f: Vec3) {
        self.force_x[i] += f.x;
        self.force_y[i] += f.y;
        self.force_z[i] += f.z;
    }

    /// Overwrite every force with `base` (the uniform external force).
    pub fn reset_forces(&mut self, base: Vec3) {
        self.force_x.fill(base.x);
        self.force_y.fill(base.y);
        self.force_z.fill(base.z);
    }

    /// Predictor half of the improved-Euler step, for unlocked points:
    /// `v += F * 0.5 * dt / m`, then `p += v * dt` with the updated `v`.
    pub fn kick_and_drift(&mut self, dt: f32, inv_mass: f32) {
        let h = 0.5 * dt * inv_mass;
        for i in 0..self.vertex_count {
            if self.locked[i] {
                continue;
            }
            self.vel_x[i] += self.force_x[i] * h;
            self.vel_y[i] += self.force_y[i] * h;
            self.vel_z[i] += self.force_z[i] * h;

            self.pos_x[i] += self.vel_x[i] * dt;
            self.pos_y[i] += self.vel_y[i] * dt;
            self.pos_z[i] += self.vel_z[i] * dt;
        }
    }

    /// Corrector half of the improved-Euler step, for unlocked points:
    /// `v += F * 0.5 * dt / m`.
    pub fn kick(&mut self, dt: f32, inv_mass: f32) {
        let h = 0.5 * dt * inv_mass;
        for i in 0..self.vertex_count {
            if self.locked[i] {
                continue;
            }
            self.vel_x[i] += self.force_x[i] * h;
            self.vel_y[i] += self.force_y[i] * h;
            self.vel_z[i] += self.force_z[i] * h;
        }
    }

    /// Copy positions into the mesh's position channels.
    pub fn write_positions(&self, mesh: &mut TriangleMesh) {
        mesh.pos_x.copy_from_slice(&self.pos_x);
        mesh.pos_y.copy_from_slice(&self.pos_y);
        mesh.pos_z.copy_from_slice(&self.pos_z);
    }

    /// Compute total kinetic energy of the unlocked points: 0.5 * m * Σ ||v_i||².
    pub fn kinetic_energy(&self, mass: f32) -> f64 {
        let mut sum = 0.0f64;
        for i in 0..self.vertex_count {
            if self.locked[i] {
                continue;
            }
            let vx = self.vel_x[i] as f64;
            let vy = self.vel_y[i] as f64;
            let vz = self.vel_z[i] as f64;
            sum += vx * vx + vy * vy + vz * vz;
        }
        0.5 * mass as f64 * sum
    }

    /// Returns true if every position and velocity component is finite.
    pub fn is_finite(&self) -> bool {
        [
            &self.pos_x, &self.pos_y, &self.pos_z, &self.vel_x, &self.vel_y, &self.vel_z,
        ]
        .iter()
        .all(|channel| channel.iter().all(|v| v.is_finite()))
    }

    /// Number of locked points.
    pub fn locked_count(&self) -> usize {
        self.locked.iter().filter(|&&l| l).count()
    }
}
