//! Vertex tangent computation for normal-mapped shading.
//!
//! Per triangle, the tangent is the surface direction in which the `u`
//! texture coordinate grows. It is found by solving the 2×2 system that
//! maps the two UV edges onto the two position edges; the per-triangle
//! results are summed at the vertices and normalized.

use sailcloth_math::geometry::{normalize_or_zero, triangle_tangent};

use crate::mesh::TriangleMesh;

/// Recompute vertex tangents from positions and UVs.
///
/// For triangle `[a, b, c]` the edges are `c - a` and `b - a` with the
/// matching UV edges. Triangles whose UV determinant vanishes (duplicate or
/// collinear UVs) are skipped; a vertex with nothing accumulated gets the
/// zero vector.
pub fn compute_vertex_tangents(mesh: &mut TriangleMesh) {
    let n = mesh.vertex_count();

    for i in 0..n {
        mesh.tangent_x[i] = 0.0;
        mesh.tangent_y[i] = 0.0;
        mesh.tangent_z[i] = 0.0;
    }

    for t in 0..mesh.triangle_count() {
        let [ia, ib, ic] = mesh.triangle(t);
        let a = ia as usize;
        let b = ib as usize;
        let c = ic as usize;

        let pa = mesh.position_vec3(a);
        let e1 = mesh.position_vec3(c) - pa;
        let e2 = mesh.position_vec3(b) - pa;
        let uva = mesh.uv(a);
        let duv1 = mesh.uv(c) - uva;
        let duv2 = mesh.uv(b) - uva;

        let Some(tangent) = triangle_tangent(e1, e2, duv1, duv2) else {
            continue;
        };

        for v in [a, b, c] {
            mesh.tangent_x[v] += tangent.x;
            mesh.tangent_y[v] += tangent.y;
            mesh.tangent_z[v] += tangent.z;
        }
    }

    for i in 0..n {
        let unit = normalize_or_zero(mesh.tangent_vec3(i));
        mesh.set_tangent(i, unit);
    }
}
