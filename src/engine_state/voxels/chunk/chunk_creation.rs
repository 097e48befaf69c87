//! # Chunk Creation Module
//!
//! A builder that fills a `VoxelGrid` one voxel at a time, in storage order, while
//! keeping the solidity bit vector and the non-air count consistent with the blocks.
//!
//! Callers push exactly `CHUNK_VOLUME` identifiers: x fastest, then z, then y.

use bitvec::vec::BitVec;

use crate::engine_state::voxels::{
    block::{BlockCatalog, BlockId, AIR},
    coords::CHUNK_VOLUME,
};

use super::VoxelGrid;

/// A builder for populating a `VoxelGrid` in storage order.
pub struct ChunkCreationIterator<'a> {
    /// Resolves solidity for every pushed block.
    catalog: &'a BlockCatalog,
    /// Bit vector where each bit represents whether a block is solid (1) or not (0)
    solid_array: BitVec,
    /// Block identifiers pushed so far, air included
    blocks: Vec<BlockId>,
    /// Number of non-air blocks pushed so far
    non_air: usize,
}

impl<'a> ChunkCreationIterator<'a> {
    /// Creates a builder with room for a full chunk.
    ///
    /// # Arguments
    /// * `catalog` - The catalog used to decide which pushed blocks are solid
    pub fn new(catalog: &'a BlockCatalog) -> Self {
        ChunkCreationIterator {
            catalog,
            solid_array: BitVec::with_capacity(CHUNK_VOLUME),
            blocks: Vec::with_capacity(CHUNK_VOLUME),
            non_air: 0,
        }
    }

    /// Finalizes the grid.
    ///
    /// Any voxels that were never pushed are filled with air so the grid is always full.
    pub fn return_grid(mut self) -> VoxelGrid {
        debug_assert_eq!(self.blocks.len(), CHUNK_VOLUME, "incomplete chunk");
        while self.blocks.len() < CHUNK_VOLUME {
            self.push_block(AIR);
        }
        self.blocks.truncate(CHUNK_VOLUME);
        self.solid_array.truncate(CHUNK_VOLUME);

        VoxelGrid {
            blocks: self.blocks,
            solid_array: self.solid_array,
            non_air: self.non_air,
        }
    }

    /// Appends the block for the next voxel in storage order.
    pub fn push_block(&mut self, block: BlockId) {
        self.solid_array.push(self.catalog.is_solid(block));
        if block != AIR {
            self.non_air += 1;
        }
        self.blocks.push(block);
    }
}
