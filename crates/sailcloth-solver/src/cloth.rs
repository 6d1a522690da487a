//! The cloth object: grid, mesh, state and integrator under one owner.
//!
//! A consumer builds a [`Cloth`], locks a few points, then calls
//! [`Cloth::step`] once per frame and reads the refreshed mesh buffers.

use sailcloth_math::Vec3;
use sailcloth_mesh::generators::{cloth_grid, GridLayout};
use sailcloth_mesh::normals::compute_vertex_normals;
use sailcloth_mesh::tangents::compute_vertex_tangents;
use sailcloth_mesh::topology::GridTopology;
use sailcloth_mesh::TriangleMesh;
use sailcloth_types::{GridCoord, SailclothError, SailclothResult};

use crate::config::ClothConfig;
use crate::constraints;
use crate::heun::ImprovedEuler;
use crate::state::SimulationState;
use crate::strategy::{SolverStrategy, StepResult};

/// A simulated cloth grid.
///
/// Owns every buffer it touches; nothing is shared between instances.
///
/// # Stability
///
/// The integrator is explicit and never clamps or sub-steps `dt`. Keeping
/// `dt` small relative to `sqrt(mass / stiffness)` is the caller's job;
/// an unstable choice blows up into huge but finite values long before
/// anything becomes NaN.
pub struct Cloth {
    layout: GridLayout,
    config: ClothConfig,
    topology: GridTopology,
    mesh: TriangleMesh,
    state: SimulationState,
    solver: Box<dyn SolverStrategy>,
    steps: u64,
    sim_time: f64,
}

impl Cloth {
    /// Builds a cloth integrated by [`ImprovedEuler`].
    ///
    /// Fails if the layout or configuration is invalid.
    pub fn new(layout: GridLayout, config: ClothConfig) -> SailclothResult<Self> {
        Self::with_solver(layout, config, Box::new(ImprovedEuler::new()))
    }

    /// Builds a cloth integrated by a custom solver.
    pub fn with_solver(
        layout: GridLayout,
        config: ClothConfig,
        mut solver: Box<dyn SolverStrategy>,
    ) -> SailclothResult<Self> {
        config.validate()?;
        let mesh = cloth_grid(&layout)?;
        let topology = layout.topology();
        let state = SimulationState::from_mesh(&mesh);
        solver.init(&topology, &config, layout.rest_length)?;

        tracing::debug!(
            rows = topology.rows(),
            columns = topology.columns(),
            springs = topology.spring_count(),
            solver = solver.name(),
            "Cloth created"
        );

        Ok(Self {
            layout,
            config,
            topology,
            mesh,
            state,
            solver,
            steps: 0,
            sim_time: 0.0,
        })
    }

    // ─── Locking ─────────────────────────────────────────────

    /// Locks or unlocks the point at `(row, col)`.
    ///
    /// Idempotent. Out-of-range coordinates return
    /// [`SailclothError::GridCoordOutOfRange`] and change nothing.
    pub fn lock_node(&mut self, row: usize, col: usize, locked: bool) -> SailclothResult<()> {
        let coord = GridCoord::new(row, col);
        if constraints::lock_node(&mut self.state, &self.topology, coord, locked)? {
            tracing::debug!(row, col, locked, "Lock changed");
        }
        Ok(())
    }

    /// Locks or unlocks every point of rope `row`.
    pub fn lock_row(&mut self, row: usize, locked: bool) -> SailclothResult<()> {
        let changed = constraints::lock_row(&mut self.state, &self.topology, row, locked)?;
        tracing::debug!(row, locked, changed, "Row lock changed");
        Ok(())
    }

    /// Locks or unlocks point `col` of every rope.
    pub fn lock_column(&mut self, col: usize, locked: bool) -> SailclothResult<()> {
        let changed = constraints::lock_column(&mut self.state, &self.topology, col, locked)?;
        tracing::debug!(col, locked, changed, "Column lock changed");
        Ok(())
    }

    /// Returns whether the point at `(row, col)` is locked.
    pub fn is_locked(&self, row: usize, col: usize) -> SailclothResult<bool> {
        constraints::is_locked(&self.state, &self.topology, GridCoord::new(row, col))
    }

    /// Number of locked points.
    pub fn locked_count(&self) -> usize {
        self.state.locked_count()
    }

    // ─── Stepping ────────────────────────────────────────────

    /// Advances the cloth by `dt`: forces, integration, then normals and
    /// tangents.
    ///
    /// A negative or non-finite `dt` is rejected before anything changes.
    pub fn step(&mut self, dt: f32) -> SailclothResult<StepResult> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(SailclothError::InvalidConfig(format!(
                "Time step must be finite and non-negative, got {dt}"
            )));
        }

        let result = self.solver.step(&mut self.state, &self.topology, dt)?;

        self.state.write_positions(&mut self.mesh);
        compute_vertex_normals(&mut self.mesh);
        compute_vertex_tangents(&mut self.mesh);

        self.steps += 1;
        self.sim_time += dt as f64;

        tracing::trace!(
            step = self.steps,
            dt,
            wall_time = result.wall_time,
            "Cloth stepped"
        );
        Ok(result)
    }

    // ─── Accessors ───────────────────────────────────────────

    /// Render buffers: positions, normals, tangents, UVs and indices.
    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    /// Simulation buffers: positions, velocities, forces and locks.
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn topology(&self) -> &GridTopology {
        &self.topology
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn config(&self) -> &ClothConfig {
        &self.config
    }

    /// Name of the integrator.
    pub fn solver_name(&self) -> &str {
        self.solver.name()
    }

    /// Number of completed steps.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Sum of all `dt` passed to [`Cloth::step`].
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Position of the point at `(row, col)`.
    pub fn point_position(&self, row: usize, col: usize) -> SailclothResult<Vec3> {
        let i = constraints::checked_index(&self.topology, row, col)?;
        Ok(self.state.position(i))
    }

    /// Velocity of the point at `(row, col)`.
    pub fn point_velocity(&self, row: usize, col: usize) -> SailclothResult<Vec3> {
        let i = constraints::checked_index(&self.topology, row, col)?;
        Ok(self.state.velocity(i))
    }

    /// Kinetic energy of the unlocked points.
    pub fn kinetic_energy(&self) -> f64 {
        self.state.kinetic_energy(self.config.mass)
    }
}

impl std::fmt::Debug for Cloth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cloth")
            .field("rows", &self.topology.rows())
            .field("columns", &self.topology.columns())
            .field("solver", &self.solver.name())
            .field("steps", &self.steps)
            .field("sim_time", &self.sim_time)
            .finish()
    }
}
