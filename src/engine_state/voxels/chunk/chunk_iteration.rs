//! # Chunk Iteration Module
//!
//! An iterator over the non-air voxels of a `VoxelGrid`. The mesher walks chunks
//! through it, so air (usually most of a chunk) is skipped without producing items.

use cgmath::Point3;

use crate::engine_state::voxels::block::{BlockId, AIR};

use super::{index_to_local, VoxelGrid};

/// Yields `(local coordinate, block)` for every non-air voxel, in storage order.
pub struct ChunkBlockIterator<'a> {
    /// The grid being iterated over
    grid_ref: &'a VoxelGrid,
    /// Next index to inspect
    current_offset: usize,
    /// Non-air voxels not yet yielded
    remaining: usize,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates an iterator positioned at the first voxel of the grid.
    pub fn new(grid_ref: &'a VoxelGrid) -> Self {
        ChunkBlockIterator {
            grid_ref,
            current_offset: 0,
            remaining: grid_ref.non_air_count(),
        }
    }
}

impl Iterator for ChunkBlockIterator<'_> {
    type Item = (Point3<usize>, BlockId);

    fn next(&mut self) -> Option<Self::Item> {
        // Nothing left to find; stop without scanning the trailing air.
        if self.remaining == 0 {
            return None;
        }

        let blocks = self.grid_ref.blocks();
        while self.current_offset < blocks.len() {
            let index = self.current_offset;
            self.current_offset += 1;

            let block = blocks[index];
            if block != AIR {
                self.remaining -= 1;
                return Some((index_to_local(index), block));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
