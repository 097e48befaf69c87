//! # Engine State Module
//!
//! The core engine module that manages a world session.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `config` - Session settings loaded from JSON
//! * `rendering` - Chunk meshes and the hand-off to a renderer
//! * `task_management` - Manages asynchronous tasks and worker threads
//! * `voxels` - Handles voxel data, chunks, and world generation
//!
//! ## Architecture
//!
//! `EngineState` is the central coordinator. Each step it receives the viewer's
//! world position; when the viewer crosses into another chunk it asks the world for a
//! view-distance plan, forwards visibility changes to the mesh sink and schedules
//! generation for missing chunks. Then it pumps the task manager, whose results
//! register finished chunks and upload their meshes.

use std::{sync::Arc, thread, time::Duration};

use cgmath::Point3;
use log::{debug, info};
use task_management::{
    task::{Task, TaskContext},
    TaskManager,
};
use voxels::{
    block::BlockCatalog,
    coords::ChunkCoord,
    tasks::chunk_generation_task::ChunkGenerationTask,
    world::{EnsureOutcome, ViewDistanceChange, World, WorldError, WorldSlot},
};

use crate::core::MtResource;

pub mod config;
pub mod rendering;
pub mod task_management;
pub mod voxels;

use config::EngineConfig;
use rendering::MeshSink;

/// Pause between polls while waiting for workers in `run_until_idle`.
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// The main state container for the voxel engine
///
/// Owns the task manager and the mesh sink, and shares the world with the session's
/// `WorldSlot`.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_terrain::{
///     BlockCatalog, EngineConfig, EngineState, MeshStatsSink, WorldSlot,
/// };
///
/// let config = EngineConfig { render_distance: 1, worker_count: 0, ..EngineConfig::default() };
/// let mut slot = WorldSlot::new();
/// let mut engine =
///     EngineState::new(&mut slot, config, BlockCatalog::default(), MeshStatsSink::new()).unwrap();
///
/// engine.update(Point3::new(3.0, 40.0, 3.0));
/// engine.run_until_idle();
/// assert_eq!(engine.world.get().active_chunks().len(), 9);
/// ```
pub struct EngineState<S: MeshSink> {
    /// Settings the session was started with
    pub config: EngineConfig,
    /// Task manager for asynchronous operations
    pub task_manager: TaskManager,
    /// The voxel world containing all chunk data
    pub world: MtResource<World>,
    /// Receives meshes and visibility changes
    mesh_sink: S,
    /// Chunk the viewer was in at the last refresh
    current_viewer_chunk: Option<ChunkCoord>,
}

impl<S: MeshSink> EngineState<S> {
    /// Creates a new engine state and the session's world
    ///
    /// # Arguments
    ///
    /// * `slot` - The session's world slot; must be empty
    /// * `config` - Session settings
    /// * `catalog` - The block catalog the world is built from
    /// * `mesh_sink` - Where finished meshes are sent
    ///
    /// # Errors
    ///
    /// `WorldError::AlreadyInitialized` if the slot already holds a world.
    pub fn new(
        slot: &mut WorldSlot,
        config: EngineConfig,
        catalog: BlockCatalog,
        mesh_sink: S,
    ) -> Result<Self, WorldError> {
        let world = slot.init(&config, catalog)?;
        let task_manager = TaskManager::new(config.worker_count);

        info!(
            "Engine started with {} workers and render distance {}",
            task_manager.worker_count(),
            config.render_distance
        );

        Ok(Self {
            config,
            task_manager,
            world,
            mesh_sink,
            current_viewer_chunk: None,
        })
    }

    pub fn mesh_sink(&self) -> &S {
        &self.mesh_sink
    }

    pub fn current_viewer_chunk(&self) -> Option<ChunkCoord> {
        self.current_viewer_chunk
    }

    /// Advances the engine by one step
    ///
    /// Refreshes the view ring if the viewer has changed chunks, then processes tasks.
    ///
    /// # Returns
    ///
    /// `true` if the view ring was refreshed
    pub fn update(&mut self, viewer_position: Point3<f32>) -> bool {
        let viewer_chunk = self
            .world
            .get()
            .frame()
            .world_position_to_chunk_coord(viewer_position);

        let refreshed = self.current_viewer_chunk != Some(viewer_chunk);
        if refreshed {
            self.refresh_view_distance(viewer_chunk);
        }

        self.process_tasks();
        refreshed
    }

    /// Moves the view ring and schedules generation for the chunks it is missing
    ///
    /// # Returns
    ///
    /// The number of generation tasks published
    pub fn refresh_view_distance(&mut self, viewer_chunk: ChunkCoord) -> usize {
        let (plan, generator, catalog) = {
            let mut world = self.world.get_mut();
            let plan = world.plan_view_distance(viewer_chunk);
            (
                plan,
                Arc::clone(world.generator()),
                Arc::clone(world.catalog()),
            )
        };

        for coord in &plan.reactivated {
            self.mesh_sink.set_chunk_visible(*coord, true);
        }
        for coord in &plan.deactivated {
            self.mesh_sink.set_chunk_visible(*coord, false);
        }
        for coord in &plan.evicted {
            self.mesh_sink.remove_chunk(*coord);
        }

        let scheduled = plan.to_generate.len();
        for coord in plan.to_generate {
            let task: Box<dyn Task + Send> = Box::new(ChunkGenerationTask::new(
                coord,
                Arc::clone(&generator),
                Arc::clone(&catalog),
            ));
            self.task_manager.publish_task(task);
        }

        debug!(
            "Viewer entered chunk {:?}: {} chunks scheduled",
            viewer_chunk, scheduled
        );
        self.current_viewer_chunk = Some(viewer_chunk);
        scheduled
    }

    /// Moves the view ring and generates every missing chunk on the calling thread
    pub fn refresh_view_distance_now(&mut self, viewer_chunk: ChunkCoord) -> ViewDistanceChange {
        let change = self.world.get_mut().refresh_view_distance(viewer_chunk);

        {
            let world = self.world.get();
            for coord in &change.created {
                if let Some(chunk) = world.chunk(*coord) {
                    let origin = world.frame().chunk_world_origin(*coord);
                    self.mesh_sink.upload_chunk_mesh(*coord, origin, chunk.mesh());
                    self.mesh_sink.set_chunk_visible(*coord, true);
                }
            }
        }
        for coord in &change.reactivated {
            self.mesh_sink.set_chunk_visible(*coord, true);
        }
        for coord in &change.deactivated {
            self.mesh_sink.set_chunk_visible(*coord, false);
        }
        for coord in &change.evicted {
            self.mesh_sink.remove_chunk(*coord);
        }

        self.current_viewer_chunk = Some(viewer_chunk);
        change
    }

    /// Makes one chunk active right away, generating it on the calling thread if needed
    pub fn ensure_chunk(&mut self, coord: ChunkCoord) -> EnsureOutcome {
        let outcome = self.world.get_mut().ensure_chunk(coord);
        let world = self.world.get();
        match outcome {
            EnsureOutcome::Created => {
                if let Some(chunk) = world.chunk(coord) {
                    let origin = world.frame().chunk_world_origin(coord);
                    self.mesh_sink.upload_chunk_mesh(coord, origin, chunk.mesh());
                    self.mesh_sink.set_chunk_visible(coord, true);
                }
            }
            EnsureOutcome::Reactivated => self.mesh_sink.set_chunk_visible(coord, true),
            EnsureOutcome::AlreadyActive => {}
        }
        outcome
    }

    /// Processes completed and queued tasks
    ///
    /// This method should be called each step so that generation and meshing
    /// results reach the world and the mesh sink.
    pub fn process_tasks(&mut self) {
        let mut context = TaskContext {
            world: &self.world,
            mesh_sink: &mut self.mesh_sink,
        };
        self.task_manager.process_completed_tasks(&mut context);
        self.task_manager.process_queued_tasks();
    }

    /// Whether every scheduled task has completed and been handled
    pub fn is_idle(&self) -> bool {
        self.task_manager.is_idle()
    }

    /// Processes tasks until none are left
    pub fn run_until_idle(&mut self) {
        loop {
            self.process_tasks();
            if self.is_idle() {
                break;
            }
            thread::sleep(IDLE_POLL_INTERVAL);
        }
    }

    /// Stops the engine, waiting for workers, and empties the world slot
    pub fn shutdown(self, slot: &mut WorldSlot) -> S {
        let EngineState {
            task_manager,
            mesh_sink,
            ..
        } = self;
        drop(task_manager);
        slot.shutdown();
        mesh_sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::MeshStatsSink;
    use cgmath::Point2;

    fn engine(slot: &mut WorldSlot, workers: usize) -> EngineState<MeshStatsSink> {
        let config = EngineConfig {
            seed: 3,
            render_distance: 1,
            worker_count: workers,
            ..EngineConfig::default()
        };
        EngineState::new(slot, config, BlockCatalog::default(), MeshStatsSink::new()).unwrap()
    }

    #[test]
    fn update_refreshes_only_when_the_viewer_changes_chunk() {
        let mut slot = WorldSlot::new();
        let mut engine = engine(&mut slot, 0);

        assert!(engine.update(Point3::new(3.0, 40.0, 3.0)));
        assert!(!engine.update(Point3::new(10.0, 40.0, 12.0)));
        assert!(engine.update(Point3::new(17.0, 40.0, 3.0)));
        assert_eq!(engine.current_viewer_chunk(), Some(Point2::new(1, 0)));
    }

    #[test]
    fn asynchronous_and_synchronous_paths_agree() {
        let mut async_slot = WorldSlot::new();
        let mut asynchronous = engine(&mut async_slot, 2);
        asynchronous.update(Point3::new(-5.0, 40.0, 20.0));
        asynchronous.run_until_idle();

        let mut sync_slot = WorldSlot::new();
        let mut synchronous = engine(&mut sync_slot, 0);
        synchronous.refresh_view_distance_now(Point2::new(-1, 1));

        let a = asynchronous.world.get();
        let s = synchronous.world.get();
        assert_eq!(a.active_chunks(), s.active_chunks());
        for coord in s.active_chunks() {
            assert_eq!(a.chunk(*coord).unwrap().grid(), s.chunk(*coord).unwrap().grid());
        }
        assert_eq!(
            asynchronous.mesh_sink().visible(),
            synchronous.mesh_sink().visible()
        );
    }

    #[test]
    fn shutdown_frees_the_slot() {
        let mut slot = WorldSlot::new();
        let engine = engine(&mut slot, 1);
        assert!(slot.is_initialized());
        engine.shutdown(&mut slot);
        assert!(!slot.is_initialized());
    }
}
