//! The render-facing cloth surface.
//!
//! Every per-vertex attribute is its own flat `Vec<f32>` channel
//! (`pos_x`, `pos_y`, `normal_z`, ...), indexed by point index. A grid
//! point at `(row, col)` is vertex `row * columns + col`.
//!
//! Renderers that want interleaved buffers use the `interleaved_*`
//! exports; the mesh itself knows nothing about any graphics API.

use sailcloth_math::{Vec2, Vec3};
use sailcloth_types::{SailclothError, SailclothResult};
use serde::{Deserialize, Serialize};

/// Per-vertex channels plus a flat triangle index list.
///
/// Positions, normals and tangents change every simulation step; UVs and
/// indices are fixed when the mesh is built.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub pos_x: Vec<f32>,
    pub pos_y: Vec<f32>,
    pub pos_z: Vec<f32>,

    pub normal_x: Vec<f32>,
    pub normal_y: Vec<f32>,
    pub normal_z: Vec<f32>,

    pub tangent_x: Vec<f32>,
    pub tangent_y: Vec<f32>,
    pub tangent_z: Vec<f32>,

    pub uv_u: Vec<f32>,
    pub uv_v: Vec<f32>,

    /// Three entries per triangle, counter-clockwise seen from +Y on a
    /// flat grid.
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Builds a mesh from position and UV channels. Normals and tangents
    /// start zeroed.
    pub fn from_channels(
        positions: [Vec<f32>; 3],
        uvs: [Vec<f32>; 2],
        indices: Vec<u32>,
    ) -> SailclothResult<Self> {
        let [pos_x, pos_y, pos_z] = positions;
        let [uv_u, uv_v] = uvs;
        let n = pos_x.len();
        let mesh = Self {
            pos_x,
            pos_y,
            pos_z,
            normal_x: vec![0.0; n],
            normal_y: vec![0.0; n],
            normal_z: vec![0.0; n],
            tangent_x: vec![0.0; n],
            tangent_y: vec![0.0; n],
            tangent_z: vec![0.0; n],
            uv_u,
            uv_v,
            indices,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn position(&self, i: usize) -> [f32; 3] {
        self.position_vec3(i).to_array()
    }

    #[inline]
    pub fn position_vec3(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    #[inline]
    pub fn normal_vec3(&self, i: usize) -> Vec3 {
        Vec3::new(self.normal_x[i], self.normal_y[i], self.normal_z[i])
    }

    #[inline]
    pub fn tangent_vec3(&self, i: usize) -> Vec3 {
        Vec3::new(self.tangent_x[i], self.tangent_y[i], self.tangent_z[i])
    }

    #[inline]
    pub fn uv(&self, i: usize) -> Vec2 {
        Vec2::new(self.uv_u[i], self.uv_v[i])
    }

    /// Vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        let tri = &self.indices[t * 3..t * 3 + 3];
        [tri[0], tri[1], tri[2]]
    }

    #[inline]
    pub fn set_normal(&mut self, i: usize, n: Vec3) {
        self.normal_x[i] = n.x;
        self.normal_y[i] = n.y;
        self.normal_z[i] = n.z;
    }

    #[inline]
    pub fn set_tangent(&mut self, i: usize, t: Vec3) {
        self.tangent_x[i] = t.x;
        self.tangent_y[i] = t.y;
        self.tangent_z[i] = t.z;
    }

    /// Checks that every channel has one entry per vertex and that the
    /// index list describes whole triangles over existing, distinct
    /// vertices.
    pub fn validate(&self) -> SailclothResult<()> {
        let n = self.vertex_count();
        let channels: [(&str, &[f32]); 10] = [
            ("pos_y", &self.pos_y),
            ("pos_z", &self.pos_z),
            ("normal_x", &self.normal_x),
            ("normal_y", &self.normal_y),
            ("normal_z", &self.normal_z),
            ("tangent_x", &self.tangent_x),
            ("tangent_y", &self.tangent_y),
            ("tangent_z", &self.tangent_z),
            ("uv_u", &self.uv_u),
            ("uv_v", &self.uv_v),
        ];
        if let Some((name, channel)) = channels.iter().find(|(_, c)| c.len() != n) {
            return Err(SailclothError::InvalidMesh(format!(
                "channel {name} has {} entries, expected {n}",
                channel.len()
            )));
        }

        if self.indices.len() % 3 != 0 {
            return Err(SailclothError::InvalidMesh(format!(
                "{} indices do not form whole triangles",
                self.indices.len()
            )));
        }

        for (t, tri) in self.indices.chunks_exact(3).enumerate() {
            if let Some(&bad) = tri.iter().find(|&&v| v as usize >= n) {
                return Err(SailclothError::InvalidMesh(format!(
                    "triangle {t} references vertex {bad} of {n}"
                )));
            }
            if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
                return Err(SailclothError::InvalidMesh(format!(
                    "triangle {t} repeats a vertex: {tri:?}"
                )));
            }
        }

        Ok(())
    }

    /// Positions as `[x0, y0, z0, x1, y1, z1, ...]`.
    pub fn interleaved_positions(&self) -> Vec<f32> {
        interleave3(&self.pos_x, &self.pos_y, &self.pos_z)
    }

    pub fn interleaved_normals(&self) -> Vec<f32> {
        interleave3(&self.normal_x, &self.normal_y, &self.normal_z)
    }

    pub fn interleaved_tangents(&self) -> Vec<f32> {
        interleave3(&self.tangent_x, &self.tangent_y, &self.tangent_z)
    }

    /// UVs as `[u0, v0, u1, v1, ...]`.
    pub fn interleaved_uvs(&self) -> Vec<f32> {
        self.uv_u
            .iter()
            .zip(&self.uv_v)
            .flat_map(|(&u, &v)| [u, v])
            .collect()
    }
}

fn interleave3(x: &[f32], y: &[f32], z: &[f32]) -> Vec<f32> {
    x.iter()
        .zip(y)
        .zip(z)
        .flat_map(|((&x, &y), &z)| [x, y, z])
        .collect()
}
