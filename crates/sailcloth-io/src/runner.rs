//! Scene runner: steps every cloth of a scene on one clock.
//!
//! The runner is the single owner of all simulation state in a run. There
//! is no global registry; callers hold the runner and pass it around.

use std::time::Instant;

use sailcloth_solver::Cloth;
use sailcloth_telemetry::{EventBus, EventKind, SimulationEvent};
use sailcloth_types::{SailclothError, SailclothResult};

use crate::contract::{ClothSummary, RunSummary, SceneConfig};
use crate::validator::validate_scene;

/// A cloth together with its scene name.
#[derive(Debug)]
pub struct SceneCloth {
    pub name: String,
    pub cloth: Cloth,
}

/// Drives all cloths of a scene with a shared `dt`, pause flag and clock.
pub struct SceneRunner {
    cloths: Vec<SceneCloth>,
    dt: f32,
    paused: bool,
    steps: u64,
    sim_time: f64,
    wall_time: f64,
    bus: EventBus,
}

impl SceneRunner {
    /// Validates the scene, builds every cloth and applies its locks.
    pub fn from_config(scene: &SceneConfig) -> SailclothResult<Self> {
        Self::with_bus(scene, EventBus::new())
    }

    /// Like [`SceneRunner::from_config`], reporting through `bus`.
    pub fn with_bus(scene: &SceneConfig, bus: EventBus) -> SailclothResult<Self> {
        validate_scene(scene)?;

        let mut runner = Self {
            cloths: Vec::with_capacity(scene.cloths.len()),
            dt: scene.run.dt,
            paused: scene.run.start_paused,
            steps: 0,
            sim_time: 0.0,
            wall_time: 0.0,
            bus,
        };

        for spec in &scene.cloths {
            let cloth = Cloth::new(spec.grid.clone(), spec.physics.clone())?;
            runner.cloths.push(SceneCloth {
                name: spec.name.clone(),
                cloth,
            });
            for coord in spec.locked_coords() {
                runner.lock(&spec.name, coord.row, coord.col, true)?;
            }
        }
        runner.bus.flush();

        tracing::info!(
            cloths = runner.cloths.len(),
            dt = runner.dt,
            paused = runner.paused,
            "Scene ready"
        );
        Ok(runner)
    }

    // ─── Control ─────────────────────────────────────────────

    /// Locks or unlocks one point of the named cloth.
    pub fn lock(&mut self, name: &str, row: usize, col: usize, locked: bool) -> SailclothResult<()> {
        let was = self.cloth(name)?.is_locked(row, col)?;
        self.cloth_mut(name)?.lock_node(row, col, locked)?;
        if was != locked {
            self.bus.emit(SimulationEvent::new(
                self.steps,
                EventKind::LockChanged {
                    cloth: name.to_string(),
                    row,
                    col,
                    locked,
                },
            ));
        }
        Ok(())
    }

    /// Pauses or resumes the runner.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            self.paused = paused;
            self.bus
                .emit(SimulationEvent::new(self.steps, EventKind::PauseToggled { paused }));
            tracing::debug!(paused, "Pause toggled");
        }
    }

    /// Flips the pause flag and returns the new value.
    pub fn toggle_pause(&mut self) -> bool {
        self.set_paused(!self.paused);
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    // ─── Stepping ────────────────────────────────────────────

    /// Steps every cloth once by the scene `dt`.
    ///
    /// Returns `Ok(false)` without touching anything while paused.
    pub fn advance(&mut self) -> SailclothResult<bool> {
        if self.paused {
            return Ok(false);
        }

        let start = Instant::now();
        self.bus.emit(SimulationEvent::new(
            self.steps,
            EventKind::StepBegin {
                sim_time: self.sim_time,
                dt: self.dt,
            },
        ));

        let mut force_evaluations = 0;
        for entry in &mut self.cloths {
            let result = entry.cloth.step(self.dt)?;
            force_evaluations += result.force_evaluations;
        }

        let elapsed = start.elapsed().as_secs_f64();
        self.wall_time += elapsed;
        self.sim_time += self.dt as f64;

        self.bus.emit(SimulationEvent::new(
            self.steps,
            EventKind::StepEnd {
                wall_time: elapsed,
                force_evaluations,
            },
        ));
        for entry in &self.cloths {
            self.bus.emit(SimulationEvent::new(
                self.steps,
                EventKind::Energy {
                    cloth: entry.name.clone(),
                    kinetic: entry.cloth.kinetic_energy(),
                },
            ));
        }
        self.bus.flush();
        self.steps += 1;
        Ok(true)
    }

    /// Advances `count` times, calling `on_step` after each step taken.
    ///
    /// Stops early, returning the number taken, if the runner is paused.
    pub fn run<F>(&mut self, count: u64, mut on_step: F) -> SailclothResult<u64>
    where
        F: FnMut(&SceneRunner) -> SailclothResult<()>,
    {
        let mut taken = 0;
        while taken < count {
            if !self.advance()? {
                break;
            }
            taken += 1;
            on_step(self)?;
        }
        Ok(taken)
    }

    /// Flushes and finalizes telemetry.
    pub fn finish(&mut self) -> RunSummary {
        self.bus.finalize();
        self.summary()
    }

    // ─── Accessors ───────────────────────────────────────────

    pub fn cloths(&self) -> &[SceneCloth] {
        &self.cloths
    }

    /// Looks up a cloth by name.
    pub fn cloth(&self, name: &str) -> SailclothResult<&Cloth> {
        self.cloths
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.cloth)
            .ok_or_else(|| unknown_cloth(name))
    }

    fn cloth_mut(&mut self, name: &str) -> SailclothResult<&mut Cloth> {
        self.cloths
            .iter_mut()
            .find(|c| c.name == name)
            .map(|c| &mut c.cloth)
            .ok_or_else(|| unknown_cloth(name))
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Number of steps taken.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Simulated time covered so far.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    /// Current state of every cloth.
    pub fn summary(&self) -> RunSummary {
        let cloths = self
            .cloths
            .iter()
            .map(|entry| {
                let cloth = &entry.cloth;
                let min_height = cloth
                    .state()
                    .pos_y
                    .iter()
                    .copied()
                    .fold(f32::INFINITY, f32::min);
                ClothSummary {
                    name: entry.name.clone(),
                    vertex_count: cloth.mesh().vertex_count(),
                    triangle_count: cloth.mesh().triangle_count(),
                    locked_count: cloth.locked_count(),
                    kinetic_energy: cloth.kinetic_energy(),
                    min_height,
                }
            })
            .collect();
        RunSummary {
            steps: self.steps,
            sim_time: self.sim_time,
            wall_time_seconds: self.wall_time,
            cloths,
        }
    }
}

fn unknown_cloth(name: &str) -> SailclothError {
    SailclothError::InvalidConfig(format!("Unknown cloth '{name}'"))
}
