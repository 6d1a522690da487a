//! Benchmark runner: executes scenarios and collects metrics.

use std::time::Instant;

use sailcloth_mesh::normals::min_normal_length;
use sailcloth_solver::strategy::SolverStrategy;
use sailcloth_solver::{Cloth, ImprovedEuler};
use sailcloth_types::{SailclothError, SailclothResult};

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::Scenario;

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Run a single scenario with the default integrator.
    ///
    /// Fails with [`SailclothError::InvariantViolation`] as soon as any
    /// position or velocity stops being finite.
    pub fn run(scenario: &Scenario) -> SailclothResult<BenchmarkMetrics> {
        Self::run_with_solver(scenario, Box::new(ImprovedEuler::new()))
    }

    /// Run a single scenario with a custom integrator.
    pub fn run_with_solver(
        scenario: &Scenario,
        solver: Box<dyn SolverStrategy>,
    ) -> SailclothResult<BenchmarkMetrics> {
        let mut cloth = Cloth::with_solver(scenario.layout.clone(), scenario.config.clone(), solver)?;
        for coord in &scenario.locks {
            cloth.lock_node(coord.row, coord.col, true)?;
        }
        Self::run_cloth(scenario, cloth)
    }

    fn run_cloth(scenario: &Scenario, mut cloth: Cloth) -> SailclothResult<BenchmarkMetrics> {
        let name = scenario.kind.name();
        let initial = cloth.state().clone();

        let mut step_times: Vec<f64> = Vec::with_capacity(scenario.timesteps as usize);
        let mut total_evaluations: u64 = 0;

        let total_start = Instant::now();

        for step in 0..scenario.timesteps {
            let result = cloth.step(scenario.dt)?;
            step_times.push(result.wall_time);
            total_evaluations += result.force_evaluations as u64;

            if !cloth.state().is_finite() {
                tracing::warn!(scenario = name, step, "Non-finite state");
                return Err(SailclothError::InvariantViolation(format!(
                    "Scenario '{name}' produced a non-finite state at step {step}"
                )));
            }
        }

        let total_wall_time = total_start.elapsed().as_secs_f64();

        let state = cloth.state();
        let max_displacement = (0..state.vertex_count)
            .map(|i| (state.position(i) - initial.position(i)).length())
            .fold(0.0f32, f32::max);

        let avg_step = if step_times.is_empty() {
            0.0
        } else {
            step_times.iter().sum::<f64>() / step_times.len() as f64
        };
        let min_step = step_times.iter().copied().fold(f64::MAX, f64::min);
        let max_step = step_times.iter().copied().fold(0.0, f64::max);
        let avg_evaluations = if scenario.timesteps > 0 {
            total_evaluations as f32 / scenario.timesteps as f32
        } else {
            0.0
        };

        tracing::debug!(scenario = name, total_wall_time, "Benchmark finished");

        Ok(BenchmarkMetrics {
            scenario: name.to_string(),
            total_wall_time,
            timesteps: scenario.timesteps,
            avg_step_time: avg_step,
            min_step_time: if step_times.is_empty() { 0.0 } else { min_step },
            max_step_time: max_step,
            final_kinetic_energy: cloth.kinetic_energy(),
            max_displacement,
            min_normal_length: min_normal_length(cloth.mesh()),
            avg_force_evaluations: avg_evaluations,
            vertex_count: cloth.mesh().vertex_count(),
            triangle_count: cloth.mesh().triangle_count(),
            locked_count: cloth.locked_count(),
        })
    }
}
