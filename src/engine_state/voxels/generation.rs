//! # Voxel Generation
//!
//! The pure function from a voxel coordinate to the block generated there. It holds
//! no mutable state, so the same `VoxelGenerator` is shared (behind an `Arc`) by the
//! world and by every generation task, and any voxel can be evaluated in any order.
//!
//! ## Passes
//!
//! 1. The bottom layer (`y == 0`) is always bedrock.
//! 2. A 2D noise height field places the surface at
//!    `floor(terrain_height * noise) + ground_level`.
//! 3. The surface voxel is the surface block, the three voxels below it are the
//!    sub-surface block, everything above is air and everything deeper is stone.
//! 4. Stone alone is then offered to the biome's lode rules, in order; the last rule
//!    whose height band and 3D noise both match decides the block.

use cgmath::Point3;
use serde::{Deserialize, Serialize};

use super::{
    biome::BiomeDescriptor,
    block::{BlockCatalog, BlockId, CatalogError, AIR},
    coords::VoxelCoord,
    terrain_noise::NoiseSampler,
};

/// Offset into the 2D noise domain used for the height field.
pub const TERRAIN_NOISE_OFFSET: f64 = 10_000.0;
/// Base offset into the 3D noise domain used for lodes, added to each rule's own offset.
pub const LODE_NOISE_OFFSET: f64 = 10_000.0;
/// Voxels strictly between `surface - SUBSURFACE_DEPTH` and the surface use the sub-surface block.
pub const SUBSURFACE_DEPTH: i32 = 4;

/// Catalog names of the blocks the base terrain is built from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteNames {
    pub bedrock: String,
    pub surface: String,
    pub subsurface: String,
    pub stone: String,
}

impl Default for PaletteNames {
    fn default() -> Self {
        PaletteNames {
            bedrock: "bedrock".to_string(),
            surface: "grass".to_string(),
            subsurface: "dirt".to_string(),
            stone: "stone".to_string(),
        }
    }
}

/// The resolved identifiers of the base terrain blocks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TerrainPalette {
    pub bedrock: BlockId,
    pub surface: BlockId,
    pub subsurface: BlockId,
    pub stone: BlockId,
}

impl TerrainPalette {
    /// Resolves palette names against a catalog.
    ///
    /// # Errors
    /// `CatalogError::NotFound` for the first name the catalog doesn't know.
    pub fn resolve(names: &PaletteNames, catalog: &BlockCatalog) -> Result<Self, CatalogError> {
        Ok(TerrainPalette {
            bedrock: catalog.lookup_by_name(&names.bedrock)?,
            surface: catalog.lookup_by_name(&names.surface)?,
            subsurface: catalog.lookup_by_name(&names.subsurface)?,
            stone: catalog.lookup_by_name(&names.stone)?,
        })
    }
}

/// Deterministic voxel generator for one seed and one biome.
#[derive(Clone, Debug)]
pub struct VoxelGenerator {
    noise: NoiseSampler,
    biome: BiomeDescriptor,
    palette: TerrainPalette,
}

impl VoxelGenerator {
    /// Creates a generator, checking that every lode places a block the catalog defines.
    pub fn new(
        seed: u32,
        biome: BiomeDescriptor,
        palette: TerrainPalette,
        catalog: &BlockCatalog,
    ) -> Result<Self, CatalogError> {
        for lode in &biome.lodes {
            catalog.lookup(lode.block_id)?;
        }

        Ok(VoxelGenerator {
            noise: NoiseSampler::new(seed),
            biome,
            palette,
        })
    }

    pub fn biome(&self) -> &BiomeDescriptor {
        &self.biome
    }

    pub fn palette(&self) -> &TerrainPalette {
        &self.palette
    }

    pub fn noise(&self) -> &NoiseSampler {
        &self.noise
    }

    /// The y coordinate of the surface voxel of column `(x, z)`.
    pub fn terrain_height(&self, x: i32, z: i32) -> i32 {
        let sample = self.noise.sample_2d(
            x as f64,
            z as f64,
            TERRAIN_NOISE_OFFSET,
            self.biome.terrain_scale,
        );
        (self.biome.terrain_height as f64 * sample).floor() as i32 + self.biome.ground_level
    }

    /// The block generated at `voxel`.
    pub fn generate_voxel(&self, voxel: VoxelCoord) -> BlockId {
        if voxel.y == 0 {
            return self.palette.bedrock;
        }

        let terrain_height = self.terrain_height(voxel.x, voxel.z);
        let y = voxel.y;

        let base = if y == terrain_height {
            self.palette.surface
        } else if y < terrain_height && y > terrain_height - SUBSURFACE_DEPTH {
            self.palette.subsurface
        } else if y > terrain_height {
            return AIR;
        } else {
            self.palette.stone
        };

        if base != self.palette.stone {
            return base;
        }

        self.apply_lodes(voxel, base)
    }

    /// Runs the lode pass over a stone voxel. Later matches overwrite earlier ones.
    fn apply_lodes(&self, voxel: Point3<i32>, stone: BlockId) -> BlockId {
        let mut block = stone;
        for lode in &self.biome.lodes {
            if lode.contains_height(voxel.y)
                && self.noise.sample_3d_above(
                    voxel,
                    lode.noise_offset + LODE_NOISE_OFFSET,
                    lode.scale,
                    lode.threshold,
                )
            {
                block = lode.block_id;
            }
        }
        block
    }
}
