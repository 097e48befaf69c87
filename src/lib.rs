#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Terrain
//!
//! A procedural voxel world engine: deterministic terrain generation, chunked storage,
//! face-culled meshing, and a view-distance driven chunk lifecycle that does its heavy
//! lifting on a worker pool.
//!
//! ## Key Modules
//!
//! * `core` - Core utilities and data structures used throughout the engine
//! * `engine_state` - The engine: configuration, voxels, meshing and task management
//!
//! ## Architecture
//!
//! The engine follows a modular architecture with clear separation between:
//! * Voxel data (block catalog, generator, chunks, world)
//! * Meshing, which produces renderer-agnostic vertex, index and UV lists
//! * Task scheduling and execution
//!
//! Rendering is not part of the crate. A renderer implements `MeshSink` and is handed
//! each chunk's mesh and world-space origin as chunks are finished.
//!
//! ## Usage
//!
//! ```rust,no_run
//! fn main() {
//!     voxel_terrain::run();
//! }
//! ```

use std::path::PathBuf;

use cgmath::Point3;
use log::{error, info};

pub mod core;
pub mod engine_state;

pub use crate::core::MtResource;
pub use engine_state::{
    config::{ConfigError, EngineConfig},
    rendering::{ChunkMesh, MeshSink, MeshStatsSink, MeshVertex, TextureAtlas},
    voxels::{
        block::{BlockCatalog, BlockId, CatalogError, AIR},
        chunk::{Chunk, VoxelSource},
        coords::{ChunkCoord, VoxelCoord, WorldFrame},
        world::{World, WorldError, WorldSlot},
    },
    EngineState,
};

/// Number of steps the headless walk takes.
const WALK_STEPS: usize = 64;
/// Distance the viewer moves along +x per step, in scene units.
const WALK_STRIDE: f32 = 2.0;

/// Runs a headless session: loads the config named by the first command-line
/// argument (or the defaults), then walks a viewer across the terrain and logs what
/// a renderer would have been sent.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => match EngineConfig::from_json_file(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("Could not load config {}: {}", path.display(), e);
                return;
            }
        },
        None => EngineConfig::default(),
    };

    if let Err(e) = walk(config) {
        error!("Session failed: {}", e);
    }
}

fn walk(config: EngineConfig) -> Result<(), WorldError> {
    let catalog = config.load_catalog()?;
    let mut slot = WorldSlot::new();
    let mut engine = EngineState::new(&mut slot, config, catalog, MeshStatsSink::new())?;

    let start = web_time::Instant::now();
    let mut viewer = Point3::new(3.0, 60.0, 3.0);
    for _ in 0..WALK_STEPS {
        engine.update(viewer);
        viewer.x += WALK_STRIDE;
    }
    engine.run_until_idle();

    {
        let world = engine.world.get();
        let sink = engine.mesh_sink();
        info!(
            "Walked to {:?} in {:?}: {} chunks loaded, {} active, {} visible quads, {} uploads",
            engine.current_viewer_chunk(),
            start.elapsed(),
            world.chunk_count(),
            world.active_chunks().len(),
            sink.visible_quads(),
            sink.uploads()
        );
    }

    engine.shutdown(&mut slot);
    Ok(())
}
