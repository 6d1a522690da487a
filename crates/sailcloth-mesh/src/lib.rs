//! # sailcloth-mesh
//!
//! Triangle mesh representation with Structure-of-Arrays (SoA) layout,
//! plus the grid-specific pieces of the cloth: the point-lattice builder,
//! the implicit spring/cell topology, and per-vertex shading attributes.
//!
//! ## Key Types
//!
//! - [`TriangleMesh`]: Positions, normals, tangents, UVs and the fixed
//!   index list in contiguous SoA buffers.
//! - [`GridTopology`]: Row/column adjacency by index arithmetic
//!   (springs and cells are never materialized).
//! - [`GridLayout`]: Construction parameters for [`generators::cloth_grid`].

pub mod generators;
pub mod mesh;
pub mod normals;
pub mod tangents;
pub mod topology;

pub use generators::GridLayout;
pub use mesh::TriangleMesh;
pub use topology::GridTopology;
