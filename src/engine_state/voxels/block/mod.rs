//! # Block Module
//!
//! This module provides the block-related data of the voxel engine: the one-byte
//! identifier stored in every voxel, the per-type properties a catalog entry carries,
//! block face handling, and the catalog itself.

use serde::{Deserialize, Serialize};

use block_side::BlockSide;

pub mod block_side;
pub mod catalog;

pub use catalog::{BlockCatalog, CatalogError};

/// The underlying integer type used to represent block types in memory.
/// Every voxel of every chunk is stored as one of these.
pub type BlockId = u8;

/// The identifier reserved for empty space. It is never solid and never textured.
pub const AIR: BlockId = 0;

/// Texture atlas indices for each face of a block.
///
/// Field order follows `BlockSide`: back, front, top, bottom, left, right.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceTextures {
    pub back: u32,
    pub front: u32,
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl FaceTextures {
    /// Uses the same texture on all six faces.
    pub const fn uniform(texture: u32) -> Self {
        FaceTextures {
            back: texture,
            front: texture,
            top: texture,
            bottom: texture,
            left: texture,
            right: texture,
        }
    }

    /// One texture on the top, one on the bottom and one shared by the four sides.
    pub const fn top_side_bottom(top: u32, side: u32, bottom: u32) -> Self {
        FaceTextures {
            back: side,
            front: side,
            top,
            bottom,
            left: side,
            right: side,
        }
    }

    /// Gets the texture index for a single face.
    pub fn get(&self, side: BlockSide) -> u32 {
        match side {
            BlockSide::BACK => self.back,
            BlockSide::FRONT => self.front,
            BlockSide::TOP => self.top,
            BlockSide::BOTTOM => self.bottom,
            BlockSide::LEFT => self.left,
            BlockSide::RIGHT => self.right,
        }
    }
}

/// An externally supplied block definition, as read from a catalog file.
///
/// # JSON Layout
/// ```json
/// { "id": 2, "name": "grass", "solid": true,
///   "textures": { "back": 2, "front": 2, "top": 7, "bottom": 1, "left": 2, "right": 2 } }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDefinition {
    pub id: BlockId,
    pub name: String,
    #[serde(default = "default_solid")]
    pub solid: bool,
    #[serde(default)]
    pub textures: FaceTextures,
}

fn default_solid() -> bool {
    true
}

impl BlockDefinition {
    /// Convenience constructor used by the built-in catalog and by tests.
    pub fn new(id: BlockId, name: &str, solid: bool, textures: FaceTextures) -> Self {
        BlockDefinition {
            id,
            name: name.to_string(),
            solid,
            textures,
        }
    }
}

/// A validated catalog entry. Immutable once the catalog is loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockType {
    id: BlockId,
    name: String,
    solid: bool,
    textures: FaceTextures,
}

impl BlockType {
    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether neighbouring faces are hidden by this block. Always `false` for air.
    pub fn is_solid(&self) -> bool {
        self.solid
    }

    pub fn textures(&self) -> &FaceTextures {
        &self.textures
    }

    /// Gets the atlas index of the texture drawn on the given face.
    pub fn texture_index(&self, side: BlockSide) -> u32 {
        self.textures.get(side)
    }
}

impl From<BlockDefinition> for BlockType {
    fn from(definition: BlockDefinition) -> Self {
        BlockType {
            id: definition.id,
            name: definition.name,
            solid: definition.solid,
            textures: definition.textures,
        }
    }
}
