//! Texture atlas addressing.
//!
//! Block faces reference their texture by a single index into a square atlas of
//! `size_in_blocks × size_in_blocks` equally sized tiles, numbered row by row from the
//! atlas's top-left corner. UV space has its origin at the bottom-left, so rows are
//! flipped when converting.

use serde::{Deserialize, Serialize};

/// A square texture atlas measured in tiles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureAtlas {
    size_in_blocks: u32,
}

impl Default for TextureAtlas {
    fn default() -> Self {
        TextureAtlas { size_in_blocks: 4 }
    }
}

impl TextureAtlas {
    /// Creates an atlas with `size_in_blocks` tiles per row. Zero is treated as one.
    pub fn new(size_in_blocks: u32) -> Self {
        TextureAtlas {
            size_in_blocks: size_in_blocks.max(1),
        }
    }

    pub fn size_in_blocks(&self) -> u32 {
        self.size_in_blocks
    }

    /// The width (and height) of one tile in UV units.
    pub fn normalized_block_size(&self) -> f32 {
        1.0 / self.size_in_blocks as f32
    }

    /// The `(column, row)` of a tile, counting rows from the top.
    pub fn tile_position(&self, texture_index: u32) -> (u32, u32) {
        (
            texture_index % self.size_in_blocks,
            texture_index / self.size_in_blocks,
        )
    }

    /// UVs for the four vertices of a quad showing `texture_index`.
    ///
    /// The order matches `BlockSide::corner_indices`: bottom-left, top-left,
    /// bottom-right, top-right.
    pub fn uv_quad(&self, texture_index: u32) -> [[f32; 2]; 4] {
        let n = self.normalized_block_size();
        let (column, row) = self.tile_position(texture_index);
        let u = column as f32 * n;
        let v = 1.0 - row as f32 * n - n;

        [[u, v], [u, v + n], [u + n, v], [u + n, v + n]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tile_is_the_top_left_corner() {
        let atlas = TextureAtlas::new(4);
        assert_eq!(
            atlas.uv_quad(0),
            [[0.0, 0.75], [0.0, 1.0], [0.25, 0.75], [0.25, 1.0]]
        );
    }

    #[test]
    fn rows_wrap_and_count_downwards() {
        let atlas = TextureAtlas::new(4);
        assert_eq!(atlas.tile_position(7), (3, 1));
        assert_eq!(
            atlas.uv_quad(7),
            [[0.75, 0.5], [0.75, 0.75], [1.0, 0.5], [1.0, 0.75]]
        );
        assert_eq!(atlas.uv_quad(15)[0], [0.75, 0.0]);
    }

    #[test]
    fn zero_sized_atlas_is_a_single_tile() {
        let atlas = TextureAtlas::new(0);
        assert_eq!(atlas.size_in_blocks(), 1);
        assert_eq!(atlas.uv_quad(0), [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]]);
    }
}
