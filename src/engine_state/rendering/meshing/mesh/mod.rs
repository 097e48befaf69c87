//! Mesh generation for voxel rendering.
//!
//! This module converts voxel data into the vertex, index and UV lists a renderer
//! consumes. Meshing is face-culled: a voxel face is emitted only where the
//! neighbouring voxel is not solid, and each emitted face is its own quad.
//!
//! # Architecture
//! - [`ChunkMesh`]: The mesh of one chunk, plus the culled mesher that builds it
//! - [`Face`]: A single exposed face of a voxel with its side and texture

mod face;
mod mesh;

pub use face::Face;
pub use mesh::*;
