//! Task for generating mesh data for chunks in a background thread.
//!
//! This module contains the `ChunkMeshGenerationTask` which builds the culled mesh of
//! a freshly generated chunk. Its result is where the chunk finally joins the world:
//! the grid and mesh are registered together, so no chunk is ever visible without
//! its mesh.

use std::sync::Arc;

use log::debug;

use crate::engine_state::{
    rendering::{meshing::ChunkMesh, texture::TextureAtlas},
    task_management::task::{Task, TaskContext, TaskResult},
    voxels::{
        block::BlockCatalog,
        chunk::{Chunk, NeighborSnapshot, VoxelGrid},
        coords::ChunkCoord,
    },
};

/// A task that generates mesh data for a chunk in a background thread.
pub struct ChunkMeshGenerationTask {
    /// The chunk being meshed
    position: ChunkCoord,
    /// The chunk's voxels
    grid: Arc<VoxelGrid>,
    /// Voxels across the chunk's horizontal edges
    neighbors: NeighborSnapshot,
    catalog: Arc<BlockCatalog>,
    atlas: TextureAtlas,
    voxel_size: f32,
}

impl ChunkMeshGenerationTask {
    /// Creates a new chunk mesh generation task.
    ///
    /// # Arguments
    /// * `position` - The chunk coordinate
    /// * `grid` - The chunk's generated voxels
    /// * `neighbors` - Snapshot of the registered neighbours
    /// * `catalog` - Solidity and texture lookups
    /// * `atlas` - Texture atlas layout
    /// * `voxel_size` - Edge length of a voxel in scene units
    pub fn new(
        position: ChunkCoord,
        grid: Arc<VoxelGrid>,
        neighbors: NeighborSnapshot,
        catalog: Arc<BlockCatalog>,
        atlas: TextureAtlas,
        voxel_size: f32,
    ) -> Self {
        ChunkMeshGenerationTask {
            position,
            grid,
            neighbors,
            catalog,
            atlas,
            voxel_size,
        }
    }
}

impl Task for ChunkMeshGenerationTask {
    /// Builds the mesh. Runs on a worker thread and touches nothing shared but
    /// read-only snapshots.
    fn process(&self) -> Box<dyn TaskResult + Send> {
        let mesh = ChunkMesh::build_culled(
            self.position,
            &self.grid,
            &self.catalog,
            &self.atlas,
            self.voxel_size,
            &self.neighbors,
        );

        Box::new(ChunkMeshGenerationTaskResult {
            position: self.position,
            grid: Arc::clone(&self.grid),
            mesh,
        })
    }
}

/// The result of a chunk mesh generation task.
pub struct ChunkMeshGenerationTaskResult {
    position: ChunkCoord,
    grid: Arc<VoxelGrid>,
    mesh: ChunkMesh,
}

impl TaskResult for ChunkMeshGenerationTaskResult {
    /// Registers the chunk with the world under the write lock, then tells the mesh
    /// sink about it.
    fn handle_result(self: Box<Self>, context: &mut TaskContext<'_>) -> Vec<Box<dyn Task + Send>> {
        let position = self.position;
        let chunk = Chunk::from_parts(position, self.grid, self.mesh);

        let (integration, origin) = {
            let mut world = context.world.get_mut();
            let origin = world.frame().chunk_world_origin(position);
            (world.integrate_chunk(chunk), origin)
        };

        let Some(integration) = integration else {
            return Vec::new();
        };

        if !integration.evicted.contains(&position) {
            let world = context.world.get();
            if let Some(chunk) = world.chunk(position) {
                context.mesh_sink.upload_chunk_mesh(position, origin, chunk.mesh());
            }
            context
                .mesh_sink
                .set_chunk_visible(position, integration.active);
        }
        for evicted in integration.evicted {
            context.mesh_sink.remove_chunk(evicted);
        }

        debug!(
            "Chunk {:?} integrated ({})",
            position,
            if integration.active { "active" } else { "inactive" }
        );
        Vec::new()
    }
}
