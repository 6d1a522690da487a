//! Procedural cloth grid generator.
//!
//! Builds the flat point lattice, its UVs and its fixed triangulation, then
//! computes the initial normals and tangents so the mesh is render-ready
//! before the first step.

use sailcloth_types::constants::DEFAULT_REST_LENGTH;
use sailcloth_types::{SailclothError, SailclothResult};
use serde::{Deserialize, Serialize};

use crate::mesh::TriangleMesh;
use crate::normals::compute_vertex_normals;
use crate::tangents::compute_vertex_tangents;
use crate::topology::GridTopology;

/// Placement of a cloth grid.
///
/// Point `(row, col)` starts at
/// `(origin[0] + row * rest_length, origin[1], offset - col * rest_length)`:
/// ropes advance along +X, points along a rope advance along −Z, and the
/// sheet lies flat at height `origin[1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    /// Number of ropes (≥ 1).
    pub rows: usize,
    /// Points per rope (≥ 1).
    pub columns: usize,
    /// Initial spacing between neighbours, equal to the spring rest length.
    pub rest_length: f32,
    /// Start of the grid in the X/Y plane.
    pub origin: [f32; 2],
    /// Z coordinate of the first point of every rope.
    pub offset: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            rows: 10,
            columns: 10,
            rest_length: DEFAULT_REST_LENGTH,
            origin: [0.0, 0.0],
            offset: 0.0,
        }
    }
}

impl GridLayout {
    /// A `rows × columns` layout at the origin with the given spacing.
    pub fn new(rows: usize, columns: usize, rest_length: f32) -> Self {
        Self {
            rows,
            columns,
            rest_length,
            ..Default::default()
        }
    }

    /// Sets the X/Y origin and the Z offset.
    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.origin = [x, y];
        self.offset = z;
        self
    }

    /// Checks the construction preconditions.
    pub fn validate(&self) -> SailclothResult<()> {
        if self.rows < 1 || self.columns < 1 {
            return Err(SailclothError::InvalidConfig(format!(
                "Grid must have at least one row and one column, got {}x{}",
                self.rows, self.columns
            )));
        }
        // Vertex ids are stored as u32 in the index buffer.
        let points = self.rows.checked_mul(self.columns);
        if !points.is_some_and(|n| n <= u32::MAX as usize) {
            return Err(SailclothError::InvalidConfig(format!(
                "Grid {}x{} has too many points (at most {} allowed)",
                self.rows,
                self.columns,
                u32::MAX
            )));
        }
        if !self.rest_length.is_finite() || self.rest_length < 0.0 {
            return Err(SailclothError::InvalidConfig(format!(
                "Rest length must be finite and non-negative, got {}",
                self.rest_length
            )));
        }
        if !self.origin.iter().all(|v| v.is_finite()) || !self.offset.is_finite() {
            return Err(SailclothError::InvalidConfig(
                "Grid origin and offset must be finite".into(),
            ));
        }
        Ok(())
    }

    /// Topology of this layout.
    pub fn topology(&self) -> GridTopology {
        GridTopology::new(self.rows, self.columns)
    }
}

/// Generates the flat cloth grid described by `layout`.
///
/// UVs are `u = row / (rows - 1)` and `v = col / (columns - 1)`, so they
/// span `[0, 1]²`; a dimension of one maps to zero. A grid with fewer than
/// two rows or columns is a rope: it has points but no triangles.
///
/// # Example
/// ```
/// use sailcloth_mesh::generators::{cloth_grid, GridLayout};
/// let mesh = cloth_grid(&GridLayout::new(3, 4, 0.5)).unwrap();
/// assert_eq!(mesh.vertex_count(), 12);
/// assert_eq!(mesh.triangle_count(), 12); // 2×3 cells × 2 tris each
/// ```
pub fn cloth_grid(layout: &GridLayout) -> SailclothResult<TriangleMesh> {
    layout.validate()?;

    let topology = layout.topology();
    let rows = layout.rows;
    let columns = layout.columns;
    let rest = layout.rest_length;
    let u_span = rows.saturating_sub(1).max(1) as f32;
    let v_span = columns.saturating_sub(1).max(1) as f32;

    let n = topology.point_count();
    let mut positions = [Vec::with_capacity(n), Vec::with_capacity(n), Vec::with_capacity(n)];
    let mut uvs = [Vec::with_capacity(n), Vec::with_capacity(n)];

    // Vertices, rope by rope
    for row in 0..rows {
        for col in 0..columns {
            positions[0].push(layout.origin[0] + row as f32 * rest);
            positions[1].push(layout.origin[1]);
            positions[2].push(layout.offset - col as f32 * rest);

            uvs[0].push(row as f32 / u_span);
            uvs[1].push(col as f32 / v_span);
        }
    }

    // Two triangles per cell
    let mut indices = Vec::with_capacity(topology.triangle_count() * 3);
    for cell in topology.cells() {
        for tri in cell.triangles() {
            indices.extend(tri.iter().map(|&v| v as u32));
        }
    }

    let mut mesh = TriangleMesh::from_channels(positions, uvs, indices)?;
    compute_vertex_normals(&mut mesh);
    compute_vertex_tangents(&mut mesh);

    tracing::debug!(
        rows,
        columns,
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "built cloth grid"
    );

    Ok(mesh)
}
