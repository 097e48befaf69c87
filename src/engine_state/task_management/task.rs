//! # Task System Core Traits
//!
//! This module defines the fundamental building blocks of the task system,
//! which provides a framework for executing work asynchronously across multiple threads.
//!
//! ## Core Components
//! - `Task`: Represents a unit of work that can be executed asynchronously
//! - `TaskResult`: Represents the result of a completed task
//! - `TaskContext`: What a result may touch when it is handled on the main thread
//!
//! ## Task Lifecycle
//! 1. A `Task` is created and scheduled via `TaskManager::publish_task()`
//! 2. The task's `process()` method is called on a worker thread
//! 3. The task returns a boxed `TaskResult`
//! 4. The result's `handle_result()` is called on the main thread
//! 5. The result can update the world, hand meshes to the sink and spawn new tasks
//!
//! ## Thread Safety
//! - `Task` must be `Send` to be transferred between threads
//! - `TaskResult` must be `Send` to be transferred back to the main thread
//! - Tasks own everything they read (`Arc` snapshots); they never lock the world

use crate::{
    core::MtResource,
    engine_state::{rendering::MeshSink, voxels::world::World},
};

/// A trait representing a unit of work that can be executed asynchronously.
///
/// Tasks are the primary mechanism for offloading work from the main thread to
/// background workers. They should be self-contained and own all the data they
/// need to perform their work.
pub trait Task: Send {
    /// Processes the task and returns a result.
    ///
    /// This method contains the actual work to be performed asynchronously.
    /// It runs on a background thread (or inline when the manager has no workers).
    ///
    /// # Returns
    /// A boxed `TaskResult` that will be processed on the main thread.
    fn process(&self) -> Box<dyn TaskResult + Send>;
}

/// Main-thread state available to task results.
pub struct TaskContext<'a> {
    /// The session's world. Results take the write lock to integrate chunks.
    pub world: &'a MtResource<World>,
    /// Receives finished meshes and visibility changes.
    pub mesh_sink: &'a mut dyn MeshSink,
}

/// A trait representing the result of processing a `Task`.
///
/// Task results are processed on the main thread and can perform actions such as:
/// - Spawning new tasks for further processing
/// - Registering finished chunks with the world
/// - Handing meshes to the rendering sink
pub trait TaskResult: Send {
    /// Handles the result of a completed task on the main thread.
    ///
    /// # Returns
    /// New tasks to schedule (can be empty)
    fn handle_result(self: Box<Self>, context: &mut TaskContext<'_>) -> Vec<Box<dyn Task + Send>>;
}
