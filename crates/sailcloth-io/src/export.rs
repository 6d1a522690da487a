//! Frame export: the headless stand-in for GPU upload.
//!
//! A [`FrameExporter`] is given the fixed per-cloth data once (indices and
//! UVs), then the per-step vertex attributes of every frame it should keep.
//! [`JsonFrameExporter`] buffers everything and writes one JSON document on
//! `finalize()`; until then [`JsonFrameExporter::to_json_string`] renders
//! the captured frames without touching the file.

use std::path::PathBuf;

use sailcloth_mesh::TriangleMesh;
use sailcloth_types::{SailclothError, SailclothResult};
use serde::Serialize;

/// Trait for consumers of per-frame render buffers.
pub trait FrameExporter {
    /// Registers a cloth and captures its fixed topology and UVs.
    fn add_cloth(&mut self, name: &str, mesh: &TriangleMesh) -> SailclothResult<()>;

    /// Captures one frame. `meshes` follows registration order.
    fn submit_frame(&mut self, step: u64, sim_time: f64, meshes: &[&TriangleMesh]) -> SailclothResult<()>;

    /// Flush buffers, close files, etc.
    fn finalize(&mut self) -> SailclothResult<()>;

    /// Returns the exporter name.
    fn name(&self) -> &str;

    /// Returns the number of frames submitted.
    fn frame_count(&self) -> usize;
}

/// Vertex attributes of one cloth in one frame, interleaved `xyz`.
#[derive(Serialize)]
struct ClothFrame {
    positions: Vec<f32>,
    normals: Vec<f32>,
    tangents: Vec<f32>,
}

#[derive(Serialize)]
struct FrameData {
    step: u64,
    sim_time: f64,
    cloths: Vec<ClothFrame>,
}

#[derive(Serialize)]
struct ClothTrack {
    name: String,
    vertex_count: usize,
    triangle_count: usize,
    indices: Vec<u32>,
    uvs: Vec<f32>, // Interleaved [u0,v0, u1,v1, ...]
}

/// Complete animation data for JSON export.
#[derive(Serialize)]
struct AnimationData<'a> {
    cloths: &'a [ClothTrack],
    frames: &'a [FrameData],
}

/// Exports simulation frames to a JSON file.
///
/// Usage:
/// ```text
/// let mut exporter = JsonFrameExporter::new("frames.json");
/// exporter.add_cloth("curtain", cloth.mesh())?;
/// // ... step, calling submit_frame() for the frames to keep ...
/// exporter.finalize()?; // Writes the JSON file
/// ```
pub struct JsonFrameExporter {
    output_path: PathBuf,
    tracks: Vec<ClothTrack>,
    frames: Vec<FrameData>,
}

impl JsonFrameExporter {
    /// Creates a new exporter that will write to the given path.
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            tracks: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// Renders everything captured so far as JSON.
    pub fn to_json_string(&self) -> SailclothResult<String> {
        let data = AnimationData {
            cloths: &self.tracks,
            frames: &self.frames,
        };
        serde_json::to_string(&data)
            .map_err(|e| SailclothError::Serialization(format!("JSON serialization failed: {e}")))
    }
}

impl FrameExporter for JsonFrameExporter {
    fn add_cloth(&mut self, name: &str, mesh: &TriangleMesh) -> SailclothResult<()> {
        if !self.frames.is_empty() {
            return Err(SailclothError::InvalidConfig(
                "Cloths must be registered before the first frame".into(),
            ));
        }
        self.tracks.push(ClothTrack {
            name: name.to_string(),
            vertex_count: mesh.vertex_count(),
            triangle_count: mesh.triangle_count(),
            indices: mesh.indices.clone(),
            uvs: mesh.interleaved_uvs(),
        });
        Ok(())
    }

    fn submit_frame(&mut self, step: u64, sim_time: f64, meshes: &[&TriangleMesh]) -> SailclothResult<()> {
        if meshes.len() != self.tracks.len() {
            return Err(SailclothError::InvalidMesh(format!(
                "Frame has {} meshes, exporter tracks {} cloths",
                meshes.len(),
                self.tracks.len()
            )));
        }
        let mut cloths = Vec::with_capacity(meshes.len());
        for (mesh, track) in meshes.iter().zip(&self.tracks) {
            if mesh.vertex_count() != track.vertex_count {
                return Err(SailclothError::InvalidMesh(format!(
                    "Cloth '{}' changed vertex count from {} to {}",
                    track.name,
                    track.vertex_count,
                    mesh.vertex_count()
                )));
            }
            cloths.push(ClothFrame {
                positions: mesh.interleaved_positions(),
                normals: mesh.interleaved_normals(),
                tangents: mesh.interleaved_tangents(),
            });
        }
        self.frames.push(FrameData {
            step,
            sim_time,
            cloths,
        });
        Ok(())
    }

    fn finalize(&mut self) -> SailclothResult<()> {
        let path = &self.output_path;
        let json = self.to_json_string()?;
        std::fs::write(path, json)?;
        tracing::info!(
            path = %path.display(),
            frames = self.frames.len(),
            cloths = self.tracks.len(),
            "Frames exported"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "json_exporter"
    }

    fn frame_count(&self) -> usize {
        self.frames.len()
    }
}
