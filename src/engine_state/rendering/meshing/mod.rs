//! Mesh generation for voxel chunks.
//!
//! Converts a chunk's voxels into renderer-agnostic vertex, triangle and UV lists.
//!
//! # Architecture
//! - `mesh/`: The face-culling mesher and the quad builder it emits through
//!
//! # Performance Considerations
//! - Solidity inside a chunk is answered from a packed bit mask
//! - Only faces that border a non-solid voxel are emitted

mod mesh;

pub use mesh::*;
