//! # Chunk Generation Task
//!
//! This module defines the `ChunkGenerationTask` which fills a chunk's voxel grid on
//! a worker thread. This task is scheduled for every coordinate a view-distance plan
//! lists as missing.

use std::sync::Arc;

use log::{debug, trace};
use web_time::Instant;

use crate::engine_state::{
    rendering::tasks::chunk_mesh_generation_task::ChunkMeshGenerationTask,
    task_management::task::{Task, TaskContext, TaskResult},
    voxels::{
        block::BlockCatalog,
        chunk::VoxelGrid,
        coords::ChunkCoord,
        generation::VoxelGenerator,
    },
};

/// A task that generates chunk data asynchronously.
///
/// This task is responsible for:
/// 1. Generating the voxel grid at the specified position
/// 2. Scheduling mesh generation for it, with a snapshot of its neighbours
pub struct ChunkGenerationTask {
    /// The position of the chunk to generate (in chunk coordinates)
    position: ChunkCoord,
    /// Shared, immutable generator
    generator: Arc<VoxelGenerator>,
    /// Shared, immutable catalog
    catalog: Arc<BlockCatalog>,
}

impl ChunkGenerationTask {
    /// Creates a new chunk generation task.
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates where the chunk should be generated
    /// * `generator` - The world's voxel generator
    /// * `catalog` - The world's block catalog
    pub fn new(
        position: ChunkCoord,
        generator: Arc<VoxelGenerator>,
        catalog: Arc<BlockCatalog>,
    ) -> Self {
        ChunkGenerationTask {
            position,
            generator,
            catalog,
        }
    }
}

impl Task for ChunkGenerationTask {
    /// Generates every voxel of the chunk. Runs on a worker thread.
    fn process(&self) -> Box<dyn TaskResult + Send> {
        let start = Instant::now();
        let grid = VoxelGrid::generate(self.position, &self.generator, &self.catalog);
        trace!(
            "Generated chunk {:?} ({} non-air voxels) in {:?}",
            self.position,
            grid.non_air_count(),
            start.elapsed()
        );

        Box::new(ChunkGenerationTaskResult {
            position: self.position,
            grid: Arc::new(grid),
        })
    }
}

/// The result of a chunk generation task.
///
/// This contains the generated voxels and is responsible for scheduling the mesh
/// generation that depends on them.
pub struct ChunkGenerationTaskResult {
    position: ChunkCoord,
    grid: Arc<VoxelGrid>,
}

impl TaskResult for ChunkGenerationTaskResult {
    /// Captures the chunk's registered neighbours and schedules meshing.
    ///
    /// If the chunk was registered in the meantime (by the synchronous path), the
    /// generated grid is discarded.
    fn handle_result(self: Box<Self>, context: &mut TaskContext<'_>) -> Vec<Box<dyn Task + Send>> {
        let world = context.world.get();

        if world.is_chunk_in_world(self.position) {
            debug!(
                "Chunk {:?} was registered while generating; discarding",
                self.position
            );
            return Vec::new();
        }

        vec![Box::new(ChunkMeshGenerationTask::new(
            self.position,
            self.grid,
            world.neighbor_snapshot(self.position),
            Arc::clone(world.catalog()),
            *world.atlas(),
            world.frame().voxel_size,
        ))]
    }
}
