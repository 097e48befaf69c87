//! Rendering hand-off for the voxel engine.
//!
//! The engine never talks to a graphics API. It builds `ChunkMesh`es (positions,
//! triangle indices and atlas UVs in chunk-local space) and hands them, together with
//! the chunk's world-space origin, to a `MeshSink` owned by whatever renders the
//! scene. The sink is also told when chunks enter or leave the active set, and when
//! a retained chunk is dropped for good.

use std::collections::{HashMap, HashSet};

use cgmath::Point3;

use super::voxels::coords::ChunkCoord;

pub mod meshing;
pub mod tasks;
pub mod texture;
pub mod vertex;

// Re-export commonly used types
pub use meshing::ChunkMesh;
pub use texture::TextureAtlas;
pub use vertex::MeshVertex;

/// The receiving end of chunk meshes.
///
/// All calls happen on the main thread, from `EngineState`'s update step.
pub trait MeshSink {
    /// A chunk's mesh was built or rebuilt. `origin` is the world position of the
    /// chunk's minimum corner; mesh positions are relative to it.
    fn upload_chunk_mesh(&mut self, coord: ChunkCoord, origin: Point3<f32>, mesh: &ChunkMesh);

    /// The chunk entered (`true`) or left (`false`) the active set.
    fn set_chunk_visible(&mut self, coord: ChunkCoord, visible: bool);

    /// The chunk was destroyed; any geometry kept for it can be released.
    fn remove_chunk(&mut self, coord: ChunkCoord);
}

/// A sink that keeps no geometry, only counts.
///
/// Used by the headless runner and by tests to observe what a renderer would be told.
#[derive(Debug, Default)]
pub struct MeshStatsSink {
    /// Quad count of the last mesh uploaded for each live chunk
    quads: HashMap<ChunkCoord, usize>,
    /// Chunks currently shown
    visible: HashSet<ChunkCoord>,
    /// Total number of uploads received
    uploads: usize,
}

impl MeshStatsSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uploads(&self) -> usize {
        self.uploads
    }

    pub fn visible(&self) -> &HashSet<ChunkCoord> {
        &self.visible
    }

    pub fn is_visible(&self, coord: ChunkCoord) -> bool {
        self.visible.contains(&coord)
    }

    /// Quad count of the chunk's current mesh, if it has one.
    pub fn quads(&self, coord: ChunkCoord) -> Option<usize> {
        self.quads.get(&coord).copied()
    }

    /// Sum of quads over visible chunks.
    pub fn visible_quads(&self) -> usize {
        self.visible
            .iter()
            .filter_map(|coord| self.quads.get(coord))
            .sum()
    }
}

impl MeshSink for MeshStatsSink {
    fn upload_chunk_mesh(&mut self, coord: ChunkCoord, _origin: Point3<f32>, mesh: &ChunkMesh) {
        self.uploads += 1;
        self.quads.insert(coord, mesh.quad_count());
    }

    fn set_chunk_visible(&mut self, coord: ChunkCoord, visible: bool) {
        if visible {
            self.visible.insert(coord);
        } else {
            self.visible.remove(&coord);
        }
    }

    fn remove_chunk(&mut self, coord: ChunkCoord) {
        self.quads.remove(&coord);
        self.visible.remove(&coord);
    }
}
