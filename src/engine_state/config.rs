//! # Engine Configuration
//!
//! Everything that shapes a world session, loaded from JSON or defaulted field by
//! field. A config file only needs the keys it wants to change:
//!
//! ```json
//! { "seed": 7, "render_distance": 6, "biome": { "ground_level": 30 } }
//! ```

use std::{fs, path::Path, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    rendering::texture::TextureAtlas,
    voxels::{
        biome::BiomeDescriptor,
        block::{BlockCatalog, CatalogError},
        coords::{WorldFrame, MAX_RENDER_DISTANCE},
        generation::PaletteNames,
    },
};

/// Errors raised while loading or validating an `EngineConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings for one world session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seed for every noise field.
    pub seed: u32,
    /// Chunks kept active on each side of the viewer's chunk.
    pub render_distance: u32,
    /// Worker threads for generation and meshing. Zero runs tasks on the main thread.
    pub worker_count: usize,
    /// Inactive chunks kept in memory before the least recently hidden one is dropped.
    /// Zero drops chunks as soon as they leave the view ring.
    pub max_retained_chunks: usize,
    /// Tiles per row of the block texture atlas.
    pub atlas_size_in_blocks: u32,
    /// World origin and voxel size.
    pub frame: WorldFrame,
    /// Catalog names of the base terrain blocks.
    pub palette: PaletteNames,
    /// Terrain parameters.
    pub biome: BiomeDescriptor,
    /// Block catalog JSON. The built-in catalog is used when absent.
    pub catalog_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            seed: 0,
            render_distance: 4,
            worker_count: 4,
            max_retained_chunks: 256,
            atlas_size_in_blocks: 4,
            frame: WorldFrame::default(),
            palette: PaletteNames::default(),
            biome: BiomeDescriptor::default(),
            catalog_path: None,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a config from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Rejects values no world can be built from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.frame.voxel_size.is_finite() && self.frame.voxel_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "voxel_size must be positive, got {}",
                self.frame.voxel_size
            )));
        }
        if self.render_distance > MAX_RENDER_DISTANCE {
            return Err(ConfigError::Invalid(format!(
                "render_distance must be at most {}, got {}",
                MAX_RENDER_DISTANCE, self.render_distance
            )));
        }
        if self.atlas_size_in_blocks == 0 {
            return Err(ConfigError::Invalid(
                "atlas_size_in_blocks must be at least 1".to_string(),
            ));
        }
        if self.biome.terrain_height < 0 {
            return Err(ConfigError::Invalid(format!(
                "terrain_height must not be negative, got {}",
                self.biome.terrain_height
            )));
        }
        Ok(())
    }

    pub fn atlas(&self) -> TextureAtlas {
        TextureAtlas::new(self.atlas_size_in_blocks)
    }

    /// Loads the catalog named by `catalog_path`, or the built-in one.
    pub fn load_catalog(&self) -> Result<BlockCatalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => BlockCatalog::from_json_file(path),
            None => Ok(BlockCatalog::default()),
        }
    }
}
