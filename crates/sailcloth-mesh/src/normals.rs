//! Vertex normal computation from triangle mesh data.
//!
//! Computes area-weighted vertex normals by accumulating
//! face normals from each adjacent triangle.

use sailcloth_math::geometry::{face_normal, normalize_or_zero};

use crate::mesh::TriangleMesh;

/// Recompute vertex normals from triangle geometry (area-weighted).
///
/// Each triangle `[a, b, c]` contributes `(b - a) × (c - a)` to all three
/// of its vertices; the magnitude of that cross product is twice the
/// triangle area. The sums are then normalized.
///
/// A vertex whose accumulated normal vanishes (no adjacent triangles, or
/// only zero-area ones) gets the zero vector.
///
/// This modifies the mesh's `normal_x`, `normal_y`, `normal_z` arrays in place.
pub fn compute_vertex_normals(mesh: &mut TriangleMesh) {
    let n = mesh.vertex_count();

    // Zero out normals
    for i in 0..n {
        mesh.normal_x[i] = 0.0;
        mesh.normal_y[i] = 0.0;
        mesh.normal_z[i] = 0.0;
    }

    // Accumulate area-weighted face normals
    for t in 0..mesh.triangle_count() {
        let [ia, ib, ic] = mesh.triangle(t);
        let a = ia as usize;
        let b = ib as usize;
        let c = ic as usize;

        let fnormal = face_normal(
            mesh.position_vec3(a),
            mesh.position_vec3(b),
            mesh.position_vec3(c),
        );

        for v in [a, b, c] {
            mesh.normal_x[v] += fnormal.x;
            mesh.normal_y[v] += fnormal.y;
            mesh.normal_z[v] += fnormal.z;
        }
    }

    // Normalize
    for i in 0..n {
        let unit = normalize_or_zero(mesh.normal_vec3(i));
        mesh.set_normal(i, unit);
    }
}

/// Returns true if every normal is unit length within `tolerance`.
pub fn normals_are_unit(mesh: &TriangleMesh, tolerance: f32) -> bool {
    (0..mesh.vertex_count()).all(|i| (mesh.normal_vec3(i).length() - 1.0).abs() <= tolerance)
}

/// Smallest normal length in the mesh, `0.0` for an empty mesh.
///
/// A value near zero flags vertices that hit the degenerate fallback.
pub fn min_normal_length(mesh: &TriangleMesh) -> f32 {
    if mesh.vertex_count() == 0 {
        return 0.0;
    }
    (0..mesh.vertex_count())
        .map(|i| mesh.normal_vec3(i).length())
        .fold(f32::INFINITY, f32::min)
}
