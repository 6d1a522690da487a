//! Solver strategy trait, the seam for time integration.
//!
//! A [`Cloth`](crate::cloth::Cloth) drives its integrator only through this
//! trait, so an alternative explicit scheme can be swapped in without
//! touching the cloth or its consumers.

use sailcloth_mesh::topology::GridTopology;
use sailcloth_types::SailclothResult;

use crate::config::ClothConfig;
use crate::state::SimulationState;

/// Result of a solver step.
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Number of full force evaluations performed.
    pub force_evaluations: u32,
    /// Wall-clock time for this step (seconds).
    pub wall_time: f64,
}

/// Trait for time integration solvers.
///
/// The cloth calls these methods in order:
///
/// ```text
/// solver.init(topology, config, rest_length)?;
/// loop {
///     solver.step(state, topology, dt)?;
/// }
/// ```
///
/// # Implementations
///
/// - [`ImprovedEuler`](crate::heun::ImprovedEuler): two-stage explicit Heun scheme
pub trait SolverStrategy: Send {
    /// Initialize the solver with the grid topology and configuration.
    ///
    /// Called once when the cloth is built. The solver captures whatever
    /// force parameters it needs; it must not allocate per step afterwards.
    fn init(
        &mut self,
        topology: &GridTopology,
        config: &ClothConfig,
        rest_length: f32,
    ) -> SailclothResult<()>;

    /// Advance the simulation by one timestep.
    ///
    /// Modifies positions and velocities of unlocked points in place.
    /// Locked points must come out bit-identical.
    fn step(
        &mut self,
        state: &mut SimulationState,
        topology: &GridTopology,
        dt: f32,
    ) -> SailclothResult<StepResult>;

    /// Returns the solver's name.
    fn name(&self) -> &str;
}
