//! Scene validation.
//!
//! Validates scene files before any cloth is built, catching data-level
//! errors early with clear diagnostics.

use std::collections::HashSet;

use sailcloth_types::{SailclothError, SailclothResult};

use crate::contract::{ClothSpec, RunConfig, SceneConfig};

/// Validates a complete scene.
///
/// Checks:
/// - Run clock is positive, finite and reasonably sized
/// - At least one cloth, with unique non-empty names
/// - Every grid and physics block is valid
/// - Every lock coordinate lies inside its grid
pub fn validate_scene(scene: &SceneConfig) -> SailclothResult<()> {
    validate_run(&scene.run)?;

    if scene.cloths.is_empty() {
        return Err(SailclothError::InvalidConfig(
            "Scene must contain at least one [[cloth]]".into(),
        ));
    }

    let mut names = HashSet::new();
    for spec in &scene.cloths {
        if !names.insert(spec.name.as_str()) {
            return Err(SailclothError::InvalidConfig(format!(
                "Duplicate cloth name '{}'",
                spec.name
            )));
        }
        validate_cloth(spec)?;
    }

    Ok(())
}

/// Validates the run clock.
fn validate_run(run: &RunConfig) -> SailclothResult<()> {
    if !run.dt.is_finite() || run.dt <= 0.0 {
        return Err(SailclothError::InvalidConfig(
            "Timestep dt must be positive".into(),
        ));
    }
    if run.dt > 1.0 {
        return Err(SailclothError::InvalidConfig(
            "Timestep dt > 1.0 is unreasonably large".into(),
        ));
    }
    if !run.duration.is_finite() || run.duration <= 0.0 {
        return Err(SailclothError::InvalidConfig(
            "Duration must be positive".into(),
        ));
    }
    Ok(())
}

/// Validates one cloth block.
pub fn validate_cloth(spec: &ClothSpec) -> SailclothResult<()> {
    if spec.name.trim().is_empty() {
        return Err(SailclothError::InvalidConfig("Cloth name must not be empty".into()));
    }

    let context = |e: SailclothError| match e {
        SailclothError::InvalidConfig(msg) => {
            SailclothError::InvalidConfig(format!("Cloth '{}': {msg}", spec.name))
        }
        other => other,
    };
    spec.grid.validate().map_err(context)?;
    spec.physics.validate().map_err(context)?;

    let topology = spec.grid.topology();
    for coord in spec.locked_coords() {
        if !topology.contains(coord.row, coord.col) {
            return Err(SailclothError::GridCoordOutOfRange {
                row: coord.row,
                col: coord.col,
                rows: topology.rows(),
                columns: topology.columns(),
            });
        }
    }

    Ok(())
}
