//! # Block Catalog
//!
//! The immutable registry mapping a `BlockId` to its `BlockType`.
//!
//! Entries are sorted by identifier once, at load time, so that identifier lookup is a
//! plain array index. Identifiers are assigned explicitly by the definitions rather than
//! by load order, and the load step validates them:
//!
//! - identifier 0 must exist and must be non-solid (it is air)
//! - identifiers must be unique and contiguous starting at 0
//! - names must be unique (case-sensitive)
//!
//! Any violation aborts the load. Catalog errors are the only errors that are allowed
//! to stop the engine from starting.

use std::{collections::HashMap, fs, path::Path};

use log::{error, info};
use thiserror::Error;

use super::{block_side::BlockSide, BlockDefinition, BlockId, BlockType, FaceTextures, AIR};

/// Errors raised while loading or querying the block catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The definition list was empty.
    #[error("block catalog is empty")]
    Empty,

    /// Identifier 0 is missing or was declared solid.
    #[error("block id 0 must be a non-solid air block, found {0:?}")]
    InvalidAir(Option<String>),

    /// Two definitions share an identifier.
    #[error("block id {id} is defined twice ({first} and {second})")]
    DuplicateId {
        id: BlockId,
        first: String,
        second: String,
    },

    /// The sorted identifiers skip a value.
    #[error("block ids must be contiguous: expected {expected}, found {found}")]
    NonContiguousIds { expected: usize, found: BlockId },

    /// Two definitions share a name.
    #[error("block name {0:?} is registered more than once")]
    DuplicateName(String),

    /// Lookup with an identifier the catalog never defined.
    #[error("block id {id} is out of range for a catalog of {len} entries")]
    InvalidId { id: BlockId, len: usize },

    /// Lookup with a name the catalog never registered.
    #[error("no block named {0:?}")]
    NotFound(String),

    /// The catalog file could not be read.
    #[error("failed to read block catalog: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not a valid list of block definitions.
    #[error("failed to parse block catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The immutable registry of block types, indexed by identifier.
///
/// Built once before any chunk work starts and shared read-only (behind an `Arc`)
/// with every generation and meshing task.
#[derive(Clone, Debug)]
pub struct BlockCatalog {
    /// Block types sorted so that `block_types[id].id() == id`.
    block_types: Vec<BlockType>,
    /// Name to identifier, for tooling that refers to blocks by name.
    block_names: HashMap<String, BlockId>,
}

impl BlockCatalog {
    /// Builds a catalog from an unordered list of definitions.
    ///
    /// # Errors
    /// Returns the first validation failure found; see the module docs for the rules.
    pub fn from_definitions(mut definitions: Vec<BlockDefinition>) -> Result<Self, CatalogError> {
        if definitions.is_empty() {
            return Err(CatalogError::Empty);
        }

        definitions.sort_by_key(|definition| definition.id);

        for pair in definitions.windows(2) {
            if pair[0].id == pair[1].id {
                return Err(CatalogError::DuplicateId {
                    id: pair[0].id,
                    first: pair[0].name.clone(),
                    second: pair[1].name.clone(),
                });
            }
        }

        let air = &definitions[0];
        if air.id != AIR || air.solid {
            let name = (air.id == AIR).then(|| air.name.clone());
            return Err(CatalogError::InvalidAir(name));
        }

        for (expected, definition) in definitions.iter().enumerate() {
            if definition.id as usize != expected {
                return Err(CatalogError::NonContiguousIds {
                    expected,
                    found: definition.id,
                });
            }
        }

        let mut block_names = HashMap::with_capacity(definitions.len());
        for definition in &definitions {
            if block_names
                .insert(definition.name.clone(), definition.id)
                .is_some()
            {
                return Err(CatalogError::DuplicateName(definition.name.clone()));
            }
        }

        let block_types: Vec<BlockType> = definitions.into_iter().map(BlockType::from).collect();
        info!("Loaded block catalog with {} block types", block_types.len());

        Ok(BlockCatalog {
            block_types,
            block_names,
        })
    }

    /// Parses a JSON array of `BlockDefinition`s and builds a catalog from it.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let definitions: Vec<BlockDefinition> = serde_json::from_str(json)?;
        Self::from_definitions(definitions)
    }

    /// Reads and parses a JSON catalog file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Looks up a block type by identifier.
    ///
    /// # Errors
    /// `CatalogError::InvalidId` if `id` is not below `len()`.
    pub fn lookup(&self, id: BlockId) -> Result<&BlockType, CatalogError> {
        self.block_types
            .get(id as usize)
            .ok_or(CatalogError::InvalidId {
                id,
                len: self.block_types.len(),
            })
    }

    /// Looks up a block identifier by its exact, case-sensitive name.
    pub fn lookup_by_name(&self, name: &str) -> Result<BlockId, CatalogError> {
        self.block_names
            .get(name)
            .copied()
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))
    }

    /// Whether the block with this identifier hides adjacent faces.
    ///
    /// Air is never solid. An unknown identifier is a programming error: it asserts in
    /// debug builds and is treated as air in release builds.
    pub fn is_solid(&self, id: BlockId) -> bool {
        if id == AIR {
            return false;
        }
        match self.lookup(id) {
            Ok(block_type) => block_type.is_solid(),
            Err(err) => {
                debug_assert!(false, "{err}");
                error!("{err}; treating as air");
                false
            }
        }
    }

    /// The texture atlas index for one face of a block, or `None` for air and unknown ids.
    pub fn texture_index(&self, id: BlockId, side: BlockSide) -> Option<u32> {
        if id == AIR {
            return None;
        }
        self.lookup(id)
            .ok()
            .map(|block_type| block_type.texture_index(side))
    }

    /// A uniformly random non-air block identifier.
    ///
    /// Returns `AIR` if the catalog holds nothing but air.
    pub fn random_block_id(&self) -> BlockId {
        if self.block_types.len() < 2 {
            return AIR;
        }
        // Ids are contiguous from 0, so the largest id always fits in a BlockId.
        fastrand::u8(1..=(self.block_types.len() - 1) as BlockId)
    }

    /// The number of block types, air included.
    pub fn len(&self) -> usize {
        self.block_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.block_types.is_empty()
    }

    /// Iterates the block types in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &BlockType> {
        self.block_types.iter()
    }
}

impl Default for BlockCatalog {
    /// The built-in palette: air, stone, grass, dirt, sand, coal ore, bedrock, gravel.
    fn default() -> Self {
        let definitions = vec![
            BlockDefinition::new(0, "air", false, FaceTextures::uniform(0)),
            BlockDefinition::new(1, "stone", true, FaceTextures::uniform(0)),
            BlockDefinition::new(2, "grass", true, FaceTextures::top_side_bottom(7, 2, 1)),
            BlockDefinition::new(3, "dirt", true, FaceTextures::uniform(1)),
            BlockDefinition::new(4, "sand", true, FaceTextures::uniform(10)),
            BlockDefinition::new(5, "coal_ore", true, FaceTextures::uniform(8)),
            BlockDefinition::new(6, "bedrock", true, FaceTextures::uniform(9)),
            BlockDefinition::new(7, "gravel", true, FaceTextures::uniform(11)),
        ];

        BlockCatalog {
            block_names: definitions
                .iter()
                .map(|definition| (definition.name.clone(), definition.id))
                .collect(),
            block_types: definitions.into_iter().map(BlockType::from).collect(),
        }
    }
}
