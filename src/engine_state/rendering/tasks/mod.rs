//! Background tasks for the rendering system.
//!
//! # Available Tasks
//! - `ChunkMeshGenerationTask`: Generates the culled mesh of a chunk in the background

pub mod chunk_mesh_generation_task;
