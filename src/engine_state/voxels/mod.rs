//! # Voxel Engine Core
//!
//! This module contains the core voxel functionality: block definitions, procedural
//! generation, chunk storage and meshing inputs, and the world that ties them together.
//!
//! ## Architecture
//!
//! The voxel system is organized into several key components:
//!
//! * **Block**: Block identifiers, faces and the catalog of block properties
//! * **Coords**: Conversions between world positions, voxel, chunk and local coordinates
//! * **Terrain noise / Biome / Generation**: The deterministic voxel generator
//! * **Chunk**: Fixed-size columns of voxels with their mesh and active flag
//! * **World**: The chunk registry, the active set and cross-chunk queries
//! * **Tasks**: Asynchronous chunk generation
//!
//! ## Data Flow
//!
//! 1. The engine tells the world where the viewer is
//! 2. The world works out which chunks must be generated, activated or hidden
//! 3. Generation and meshing run on worker threads
//! 4. Finished chunks are registered with the world and their meshes handed to the renderer
//!
//! ## Thread Safety
//!
//! * The generator and catalog are immutable and shared behind `Arc`
//! * Chunk grids are shared read-only with meshing tasks; writes copy on demand
//! * The world itself is only written from the main thread

pub mod biome;
pub mod block;
pub mod chunk;
pub mod coords;
pub mod generation;
pub mod tasks;
pub mod terrain_noise;
pub mod world;
