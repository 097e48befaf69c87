use cgmath::Point3;

use crate::engine_state::voxels::block::block_side::BlockSide;

/// Represents a single exposed quad face of a voxel.
///
/// A face is the voxel's chunk-local coordinate, the side it faces and the texture
/// it shows. Corner positions come from the side's entry in the cube corner table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Minimum corner of the voxel in chunk coordinates
    pub position: Point3<i32>,
    /// Which side of the block this face represents
    pub block_side: BlockSide,
    /// Atlas tile shown on this face
    pub texture_index: u32,
}

impl Face {
    /// Creates a new face for a voxel at the given coordinates.
    ///
    /// # Arguments
    /// * `position` - The coordinates of the voxel in chunk space
    /// * `block_side` - Which side of the block this face represents
    /// * `texture_index` - The atlas tile for this side of the block
    pub fn new(position: Point3<i32>, block_side: BlockSide, texture_index: u32) -> Self {
        Face {
            position,
            block_side,
            texture_index,
        }
    }

    /// The four corners of the quad in chunk space, scaled by `voxel_size`.
    ///
    /// Corners are in the order expected by `ChunkMesh::push_face`, so that triangles
    /// `(0, 1, 2)` and `(2, 1, 3)` face outwards.
    pub fn vertices(&self, voxel_size: f32) -> [[f32; 3]; 4] {
        self.block_side.corners().map(|corner| {
            let corner = self.position + corner;
            [
                corner.x as f32 * voxel_size,
                corner.y as f32 * voxel_size,
                corner.z as f32 * voxel_size,
            ]
        })
    }
}
