//! # Biome Descriptor
//!
//! Static terrain parameters consumed by voxel generation: the ground level, the
//! amplitude and horizontal scale of the height field, and an ordered list of lode
//! rules that replace stone with other blocks inside a height band.
//!
//! Lode order matters. Rules are evaluated in declaration order and a later match
//! overwrites an earlier one.

use serde::{Deserialize, Serialize};

use super::block::BlockId;

/// A rule that overrides stone with `block_id` where a 3D noise sample passes a threshold.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LodeRule {
    /// Label used in logs and config files.
    #[serde(default)]
    pub name: String,
    /// The block placed where the rule matches. May be air, which carves caves.
    pub block_id: BlockId,
    /// Exclusive lower bound of the height band.
    pub min_height: i32,
    /// Exclusive upper bound of the height band.
    pub max_height: i32,
    /// Frequency of the 3D noise field.
    pub scale: f64,
    /// The rule matches where the averaged noise is strictly above this value.
    pub threshold: f64,
    /// Shifts this rule's noise domain so rules sharing a scale stay decorrelated.
    #[serde(default)]
    pub noise_offset: f64,
}

impl LodeRule {
    /// Whether `y` lies strictly inside this rule's height band.
    pub fn contains_height(&self, y: i32) -> bool {
        y > self.min_height && y < self.max_height
    }
}

/// Generation parameters for a region of terrain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeDescriptor {
    pub name: String,
    /// Height of the lowest possible surface.
    pub ground_level: i32,
    /// Amplitude of the height field added on top of `ground_level`.
    pub terrain_height: i32,
    /// Horizontal frequency of the height field.
    pub terrain_scale: f64,
    /// Ordered lode rules; the last matching rule wins.
    pub lodes: Vec<LodeRule>,
}

impl Default for BiomeDescriptor {
    /// Rolling grassland over stone with dirt, sand and gravel pockets, coal seams and caves.
    /// Block ids refer to the built-in catalog.
    fn default() -> Self {
        BiomeDescriptor {
            name: "grassland".to_string(),
            ground_level: 42,
            terrain_height: 42,
            terrain_scale: 0.25,
            lodes: vec![
                LodeRule {
                    name: "dirt".to_string(),
                    block_id: 3,
                    min_height: 1,
                    max_height: 255,
                    scale: 0.1,
                    threshold: 0.5,
                    noise_offset: 0.0,
                },
                LodeRule {
                    name: "sand".to_string(),
                    block_id: 4,
                    min_height: 30,
                    max_height: 60,
                    scale: 0.2,
                    threshold: 0.6,
                    noise_offset: 500.0,
                },
                LodeRule {
                    name: "gravel".to_string(),
                    block_id: 7,
                    min_height: 5,
                    max_height: 50,
                    scale: 0.2,
                    threshold: 0.6,
                    noise_offset: 1_000.0,
                },
                LodeRule {
                    name: "coal".to_string(),
                    block_id: 5,
                    min_height: 5,
                    max_height: 60,
                    scale: 0.3,
                    threshold: 0.62,
                    noise_offset: 1_500.0,
                },
                LodeRule {
                    name: "caves".to_string(),
                    block_id: 0,
                    min_height: 5,
                    max_height: 60,
                    scale: 0.1,
                    threshold: 0.58,
                    noise_offset: 43.0,
                },
            ],
        }
    }
}
