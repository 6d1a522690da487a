//! Improved Euler (Heun) integrator.
//!
//! Two force evaluations per step:
//! 1. **Evaluate** `F0` at the current state
//! 2. **Kick and drift** `v += F0 dt / 2m`, then `p += v dt`
//! 3. **Evaluate** `F1` at the drifted positions
//! 4. **Kick** `v += F1 dt / 2m`
//!
//! Locked points skip 2 and 4 but take part in both evaluations.

use std::time::Instant;

use sailcloth_mesh::topology::GridTopology;
use sailcloth_types::{SailclothError, SailclothResult};

use crate::config::ClothConfig;
use crate::forces::ForceModel;
use crate::state::SimulationState;
use crate::strategy::{SolverStrategy, StepResult};

/// Explicit second-order integrator.
///
/// There is no clamping or sub-stepping. The caller bounds `dt` against
/// stiffness and mass.
pub struct ImprovedEuler {
    /// Force model captured by `init()`.
    forces: Option<ForceModel>,
    /// Cached `1 / mass`.
    inv_mass: f32,
}

impl ImprovedEuler {
    /// Creates a new integrator (uninitialized).
    pub fn new() -> Self {
        Self {
            forces: None,
            inv_mass: 0.0,
        }
    }

    /// The force model, once initialized.
    pub fn force_model(&self) -> Option<&ForceModel> {
        self.forces.as_ref()
    }
}

impl Default for ImprovedEuler {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverStrategy for ImprovedEuler {
    fn init(
        &mut self,
        _topology: &GridTopology,
        config: &ClothConfig,
        rest_length: f32,
    ) -> SailclothResult<()> {
        config.validate()?;
        self.forces = Some(ForceModel::new(config, rest_length));
        self.inv_mass = config.inv_mass();
        Ok(())
    }

    fn step(
        &mut self,
        state: &mut SimulationState,
        topology: &GridTopology,
        dt: f32,
    ) -> SailclothResult<StepResult> {
        let start = Instant::now();

        let Some(forces) = self.forces.as_ref() else {
            return Err(SailclothError::InvalidConfig(
                "Solver not initialized. Call init() first.".into(),
            ));
        };

        // Predictor
        forces.accumulate(topology, state);
        state.kick_and_drift(dt, self.inv_mass);

        // Corrector
        forces.accumulate(topology, state);
        state.kick(dt, self.inv_mass);

        Ok(StepResult {
            force_evaluations: 2,
            wall_time: start.elapsed().as_secs_f64(),
        })
    }

    fn name(&self) -> &str {
        "improved_euler"
    }
}
