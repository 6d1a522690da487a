//! Scene description contract types.
//!
//! These types define the I/O boundary of the sailcloth engine: a scene
//! file names one or more cloths, their grids, physics and anchor points,
//! plus the run clock. They are serializable for TOML configuration and
//! JSON reporting.
//!
//! ```toml
//! [run]
//! dt = 0.02
//! duration = 10.0
//!
//! [[cloth]]
//! name = "curtain"
//! lock_columns = [39]
//!
//! [cloth.grid]
//! rows = 40
//! columns = 40
//! rest_length = 0.25
//! origin = [-4.5, 32.0]
//! offset = 0.5
//!
//! [cloth.physics]
//! stiffness = 100.0
//! damping = 20.0
//! ```

use std::path::Path;

use sailcloth_mesh::generators::GridLayout;
use sailcloth_solver::config::ClothConfig;
use sailcloth_types::constants::DEFAULT_DT;
use sailcloth_types::{GridCoord, SailclothError, SailclothResult};
use serde::{Deserialize, Serialize};

/// A complete scene: run clock plus every cloth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Clock settings.
    #[serde(default)]
    pub run: RunConfig,

    /// Cloths in the scene, stepped in declaration order.
    #[serde(default, rename = "cloth")]
    pub cloths: Vec<ClothSpec>,
}

/// Clock settings for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Timestep in seconds.
    pub dt: f32,
    /// Total simulated time in seconds.
    pub duration: f32,
    /// Whether the runner starts paused.
    pub start_paused: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            duration: 10.0,
            start_paused: false,
        }
    }
}

impl RunConfig {
    /// Number of steps needed to cover `duration`, rounded to nearest.
    pub fn step_count(&self) -> u64 {
        if self.dt <= 0.0 || !self.dt.is_finite() || !self.duration.is_finite() {
            return 0;
        }
        (self.duration / self.dt).round().max(0.0) as u64
    }
}

/// One named cloth of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothSpec {
    /// Unique name, used in telemetry and exports.
    pub name: String,

    /// Individual locked points as `[row, col]`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locks: Vec<[usize; 2]>,

    /// Ropes locked along their whole length.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lock_rows: Vec<usize>,

    /// Columns locked across every rope.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lock_columns: Vec<usize>,

    /// Grid dimensions and placement.
    #[serde(default)]
    pub grid: GridLayout,

    /// Physical parameters.
    #[serde(default)]
    pub physics: ClothConfig,
}

impl ClothSpec {
    /// A spec with default grid and physics and no locks.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locks: Vec::new(),
            lock_rows: Vec::new(),
            lock_columns: Vec::new(),
            grid: GridLayout::default(),
            physics: ClothConfig::default(),
        }
    }

    /// Every point the spec locks, expanded from rows and columns.
    ///
    /// May contain duplicates and out-of-range coordinates; the validator
    /// reports the latter.
    pub fn locked_coords(&self) -> Vec<GridCoord> {
        let mut coords: Vec<GridCoord> = self.locks.iter().map(|&rc| GridCoord::from(rc)).collect();
        for &row in &self.lock_rows {
            coords.extend((0..self.grid.columns).map(|col| GridCoord::new(row, col)));
        }
        for &col in &self.lock_columns {
            coords.extend((0..self.grid.rows).map(|row| GridCoord::new(row, col)));
        }
        coords
    }
}

impl SceneConfig {
    /// Parses a scene from TOML text.
    pub fn from_toml_str(text: &str) -> SailclothResult<Self> {
        toml::from_str(text)
            .map_err(|e| SailclothError::Serialization(format!("Invalid scene TOML: {e}")))
    }

    /// Reads and parses a scene file.
    pub fn load(path: impl AsRef<Path>) -> SailclothResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let scene = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), cloths = scene.cloths.len(), "Scene loaded");
        Ok(scene)
    }

    /// Serializes the scene back to TOML.
    pub fn to_toml_string(&self) -> SailclothResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| SailclothError::Serialization(format!("Scene TOML encoding failed: {e}")))
    }

    /// The classic hanging curtain: a 40×40 grid held along its last
    /// column, starting paused.
    pub fn demo() -> Self {
        let mut curtain = ClothSpec::new("curtain");
        curtain.grid = GridLayout::new(40, 40, 0.25).at(-4.5, 32.0, 0.5);
        curtain.lock_columns = vec![39];
        Self {
            run: RunConfig {
                start_paused: true,
                ..Default::default()
            },
            cloths: vec![curtain],
        }
    }
}

/// Summary of a finished run, for JSON reporting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Steps executed.
    pub steps: u64,
    /// Simulated time covered (seconds).
    pub sim_time: f64,
    /// Wall-clock time (seconds).
    pub wall_time_seconds: f64,
    /// Final state per cloth.
    pub cloths: Vec<ClothSummary>,
}

/// Final state of one cloth.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClothSummary {
    pub name: String,
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub locked_count: usize,
    /// Kinetic energy of the unlocked points.
    pub kinetic_energy: f64,
    /// Lowest point reached at the end of the run.
    pub min_height: f32,
}
