//! # Block Side Module
//!
//! This module defines the six faces of a voxel block together with the geometry
//! tables the mesher needs: the unit direction toward the neighbour each face looks
//! at, and the four cube corners that make up each face's quad.

use cgmath::Vector3;
use num_derive::FromPrimitive;

/// Represents the six possible faces of a voxel block.
///
/// The discriminants are the face indices used by the block catalog's per-face
/// texture table, so they double as array indices.
///
/// The order is: [BACK, FRONT, TOP, BOTTOM, LEFT, RIGHT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug, FromPrimitive)]
pub enum BlockSide {
    /// The back face (facing negative Z)
    BACK = 0,

    /// The front face (facing positive Z)
    FRONT = 1,

    /// The top face (facing positive Y)
    TOP = 2,

    /// The bottom face (facing negative Y)
    BOTTOM = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

/// The eight corners of a unit cube, indexed by `BlockSide::corner_indices`.
pub const CUBE_CORNERS: [Vector3<i32>; 8] = [
    Vector3 { x: 0, y: 0, z: 0 },
    Vector3 { x: 1, y: 0, z: 0 },
    Vector3 { x: 1, y: 1, z: 0 },
    Vector3 { x: 0, y: 1, z: 0 },
    Vector3 { x: 0, y: 0, z: 1 },
    Vector3 { x: 1, y: 0, z: 1 },
    Vector3 { x: 1, y: 1, z: 1 },
    Vector3 { x: 0, y: 1, z: 1 },
];

impl BlockSide {
    /// Returns an array containing all six block faces in face-index order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::BACK,
            BlockSide::FRONT,
            BlockSide::TOP,
            BlockSide::BOTTOM,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ]
    }

    /// Converts a face index back into a `BlockSide`.
    ///
    /// # Returns
    /// `None` if `index` is not in `0..6`.
    pub fn from_index(index: usize) -> Option<Self> {
        num_traits::FromPrimitive::from_usize(index)
    }

    /// The face index, used to address per-face tables.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Unit offset from a voxel to the neighbour this face is adjacent to.
    pub fn normal(self) -> Vector3<i32> {
        match self {
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
        }
    }

    /// Indices into `CUBE_CORNERS` for the four vertices of this face's quad.
    ///
    /// The order is chosen so that triangles `(0, 1, 2)` and `(2, 1, 3)` share the
    /// same winding on every face, and so that vertex 0 sits at the texture's
    /// lower-left corner.
    pub fn corner_indices(self) -> [usize; 4] {
        match self {
            BlockSide::BACK => [0, 3, 1, 2],
            BlockSide::FRONT => [5, 6, 4, 7],
            BlockSide::TOP => [3, 7, 2, 6],
            BlockSide::BOTTOM => [1, 5, 0, 4],
            BlockSide::LEFT => [4, 7, 0, 3],
            BlockSide::RIGHT => [1, 2, 5, 6],
        }
    }

    /// The four corner offsets of this face's quad, relative to the voxel's minimum corner.
    pub fn corners(self) -> [Vector3<i32>; 4] {
        self.corner_indices().map(|i| CUBE_CORNERS[i])
    }
}
