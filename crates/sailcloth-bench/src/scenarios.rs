//! Benchmark scenarios: grid layout, physics and anchors for each test case.
//!
//! Five canonical rigs for regression testing:
//! 1. **Curtain**: 40×40 sheet held along its last column
//! 2. **Flag**: sheet held along its pole edge in a steady breeze
//! 3. **Sail**: leading rope held at both ends, wind from behind
//! 4. **Banner**: held at the two corners of its first column, symmetric drag
//! 5. **Rope**: a single rope (no triangles) held at its first point

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use sailcloth_mesh::generators::GridLayout;
use sailcloth_solver::config::{ClothConfig, DragModel};
use sailcloth_solver::Cloth;
use sailcloth_types::constants::DEFAULT_DT;
use sailcloth_types::{GridCoord, SailclothError, SailclothResult};

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// Square sheet hanging from one edge.
    Curtain,
    /// Sheet on a pole, flapping in wind.
    Flag,
    /// Sheet held by two corners, filled by wind.
    Sail,
    /// Sheet held by two corners in still air.
    Banner,
    /// Single rope, no render triangles.
    Rope,
}

impl ScenarioKind {
    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::Curtain,
            ScenarioKind::Flag,
            ScenarioKind::Sail,
            ScenarioKind::Banner,
            ScenarioKind::Rope,
        ]
    }

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::Curtain => "curtain",
            ScenarioKind::Flag => "flag",
            ScenarioKind::Sail => "sail",
            ScenarioKind::Banner => "banner",
            ScenarioKind::Rope => "rope",
        }
    }
}

impl FromStr for ScenarioKind {
    type Err = SailclothError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::all().iter().map(|k| k.name()).collect();
                SailclothError::InvalidConfig(format!(
                    "Unknown scenario '{s}'. Available: {}",
                    names.join(", ")
                ))
            })
    }
}

/// A fully specified benchmark scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Scenario type.
    pub kind: ScenarioKind,
    /// Grid dimensions and placement.
    pub layout: GridLayout,
    /// Physical parameters.
    pub config: ClothConfig,
    /// Points locked before the first step.
    pub locks: Vec<GridCoord>,
    /// Number of timesteps to simulate.
    pub timesteps: u32,
    /// Timestep size (seconds).
    pub dt: f32,
}

impl Scenario {
    /// Create the curtain scenario.
    ///
    /// 40×40 points at 0.25 spacing, every rope held at its last point,
    /// default physics, 10 seconds at the default step.
    pub fn curtain() -> Self {
        let layout = GridLayout::new(40, 40, 0.25).at(-4.5, 32.0, 0.5);
        let locks = (0..layout.rows).map(|row| GridCoord::new(row, 39)).collect();
        Self {
            kind: ScenarioKind::Curtain,
            layout,
            config: ClothConfig::default(),
            locks,
            timesteps: 500,
            dt: DEFAULT_DT,
        }
    }

    /// Create the flag scenario.
    ///
    /// 12 ropes of 20 points, held along column 0 (the pole), in a breeze
    /// blowing along the ropes.
    pub fn flag() -> Self {
        let layout = GridLayout::new(12, 20, 0.2).at(0.0, 10.0, 0.0);
        let locks = (0..layout.rows).map(|row| GridCoord::new(row, 0)).collect();
        Self {
            kind: ScenarioKind::Flag,
            layout,
            config: ClothConfig {
                air_velocity: [0.0, 0.0, -3.0],
                ..ClothConfig::windy()
            },
            locks,
            timesteps: 300,
            dt: DEFAULT_DT,
        }
    }

    /// Create the sail scenario.
    ///
    /// 16×16 sheet held at both ends of its leading rope, with wind pushing
    /// across the ropes.
    pub fn sail() -> Self {
        let layout = GridLayout::new(16, 16, 0.25).at(0.0, 8.0, 0.0);
        Self {
            kind: ScenarioKind::Sail,
            locks: vec![GridCoord::new(0, 0), GridCoord::new(0, 15)],
            layout,
            config: ClothConfig::windy(),
            timesteps: 300,
            dt: DEFAULT_DT,
        }
    }

    /// Create the banner scenario.
    ///
    /// 10 ropes of 24 points held at the two ends of column 0, with the
    /// symmetric drag model in still air.
    pub fn banner() -> Self {
        let layout = GridLayout::new(10, 24, 0.2).at(0.0, 6.0, 0.0);
        Self {
            kind: ScenarioKind::Banner,
            locks: vec![GridCoord::new(0, 0), GridCoord::new(9, 0)],
            layout,
            config: ClothConfig {
                drag_model: DragModel::Symmetric,
                ..Default::default()
            },
            timesteps: 300,
            dt: DEFAULT_DT,
        }
    }

    /// Create the rope scenario.
    ///
    /// One rope of 30 points held at its first point. There are no cells,
    /// so no triangles, no drag and zero normals throughout.
    pub fn rope() -> Self {
        Self {
            kind: ScenarioKind::Rope,
            layout: GridLayout::new(1, 30, 0.2).at(0.0, 5.0, 0.0),
            config: ClothConfig::default(),
            locks: vec![GridCoord::new(0, 0)],
            timesteps: 300,
            dt: DEFAULT_DT,
        }
    }

    /// Create a scenario by kind.
    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::Curtain => Self::curtain(),
            ScenarioKind::Flag => Self::flag(),
            ScenarioKind::Sail => Self::sail(),
            ScenarioKind::Banner => Self::banner(),
            ScenarioKind::Rope => Self::rope(),
        }
    }

    /// Overrides the number of timesteps.
    pub fn with_timesteps(mut self, timesteps: u32) -> Self {
        self.timesteps = timesteps;
        self
    }

    /// Builds the cloth and applies the locks.
    pub fn build_cloth(&self) -> SailclothResult<Cloth> {
        let mut cloth = Cloth::new(self.layout.clone(), self.config.clone())?;
        for coord in &self.locks {
            cloth.lock_node(coord.row, coord.col, true)?;
        }
        Ok(cloth)
    }
}
