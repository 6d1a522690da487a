//! Point locking by grid coordinate.
//!
//! Out-of-range coordinates are rejected and leave the state untouched.

use sailcloth_mesh::topology::GridTopology;
use sailcloth_types::{GridCoord, SailclothError, SailclothResult};

use crate::state::SimulationState;

/// Resolves `(row, col)` to a flat index or reports it as out of range.
pub fn checked_index(topology: &GridTopology, row: usize, col: usize) -> SailclothResult<usize> {
    if topology.contains(row, col) {
        Ok(topology.index(row, col))
    } else {
        Err(SailclothError::GridCoordOutOfRange {
            row,
            col,
            rows: topology.rows(),
            columns: topology.columns(),
        })
    }
}

/// Sets the locked flag of one point. Returns whether the flag changed.
pub fn lock_node(
    state: &mut SimulationState,
    topology: &GridTopology,
    coord: GridCoord,
    locked: bool,
) -> SailclothResult<bool> {
    let i = checked_index(topology, coord.row, coord.col)?;
    let changed = state.locked[i] != locked;
    state.locked[i] = locked;
    Ok(changed)
}

/// Reads the locked flag of one point.
pub fn is_locked(
    state: &SimulationState,
    topology: &GridTopology,
    coord: GridCoord,
) -> SailclothResult<bool> {
    let i = checked_index(topology, coord.row, coord.col)?;
    Ok(state.locked[i])
}

/// Sets the flag on every point of rope `row`. Returns how many flags changed.
pub fn lock_row(
    state: &mut SimulationState,
    topology: &GridTopology,
    row: usize,
    locked: bool,
) -> SailclothResult<usize> {
    checked_index(topology, row, 0)?;
    let mut changed = 0;
    for col in 0..topology.columns() {
        if lock_node(state, topology, GridCoord::new(row, col), locked)? {
            changed += 1;
        }
    }
    Ok(changed)
}

/// Sets the flag on point `col` of every rope. Returns how many flags changed.
pub fn lock_column(
    state: &mut SimulationState,
    topology: &GridTopology,
    col: usize,
    locked: bool,
) -> SailclothResult<usize> {
    checked_index(topology, 0, col)?;
    let mut changed = 0;
    for row in 0..topology.rows() {
        if lock_node(state, topology, GridCoord::new(row, col), locked)? {
            changed += 1;
        }
    }
    Ok(changed)
}
