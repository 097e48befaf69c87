//! Read-only views of the voxels around a chunk, for meshing off the main thread.

use std::{collections::HashMap, sync::Arc};

use cgmath::Point2;

use crate::engine_state::voxels::{
    block::BlockId,
    coords::{voxel_coord_to_chunk_coord, voxel_coord_to_local_coord, ChunkCoord, VoxelCoord},
    generation::VoxelGenerator,
};

use super::{VoxelGrid, VoxelSource};

/// The four horizontal neighbours of a chunk, captured at one point in time.
///
/// Neighbours that were registered when the snapshot was taken answer from their
/// grids. Anything else is generated on the fly, which gives the same answer the
/// neighbour will have once it exists.
#[derive(Clone)]
pub struct NeighborSnapshot {
    grids: HashMap<ChunkCoord, Arc<VoxelGrid>>,
    generator: Arc<VoxelGenerator>,
}

impl NeighborSnapshot {
    /// The chunk coordinates whose voxels a chunk's faces can look into.
    pub fn neighbor_coords(center: ChunkCoord) -> [ChunkCoord; 4] {
        [
            Point2::new(center.x - 1, center.y),
            Point2::new(center.x + 1, center.y),
            Point2::new(center.x, center.y - 1),
            Point2::new(center.x, center.y + 1),
        ]
    }

    pub fn new(generator: Arc<VoxelGenerator>) -> Self {
        NeighborSnapshot {
            grids: HashMap::new(),
            generator,
        }
    }

    /// Adds a registered neighbour's grid.
    pub fn insert(&mut self, coord: ChunkCoord, grid: Arc<VoxelGrid>) {
        self.grids.insert(coord, grid);
    }

    /// Number of neighbours answered from real grids.
    pub fn captured(&self) -> usize {
        self.grids.len()
    }
}

impl VoxelSource for NeighborSnapshot {
    fn block_at(&self, voxel: VoxelCoord) -> BlockId {
        match self.grids.get(&voxel_coord_to_chunk_coord(voxel)) {
            Some(grid) => grid.get(voxel_coord_to_local_coord(voxel)),
            None => self.generator.generate_voxel(voxel),
        }
    }
}
