//! # Task Management System
//!
//! This module provides the worker pool that runs chunk generation and meshing off
//! the main thread.
//!
//! ## Architecture Overview
//!
//! The task management system consists of several key components:
//! - `TaskManager`: Central coordinator for task distribution and worker management
//! - `Task`: A unit of work that can be executed asynchronously
//! - `TaskResult`: The result of a completed task, which can spawn additional tasks
//! - `TaskChannel`: Communication channel between the main thread and worker threads
//!
//! ## Workers
//!
//! - Uses the standard library's `std::thread` for true multi-threading
//! - Each worker has a dedicated pair of channels for tasks and results
//! - With zero workers, queued tasks run inline on the calling thread during
//!   `process_queued_tasks`, which keeps the same result flow and makes runs
//!   fully deterministic
//! - A worker that disconnects (its thread panicked) is retired; if none are left,
//!   the manager falls back to inline execution
//!
//! ## Task Lifecycle
//! 1. Tasks are created and published via `TaskManager::publish_task()`
//! 2. The manager distributes tasks to available worker channels using round-robin
//! 3. Workers process tasks asynchronously and return results
//! 4. Results are processed on the main thread in `process_completed_tasks()`
//! 5. Results can spawn new tasks, which are published in turn
//! 6. The cycle continues until all work is complete (`is_idle()`)
//!
//! ## Example Usage
//! ```rust,ignore
//! let mut task_manager = TaskManager::new(num_workers);
//!
//! // Publish a task for background processing
//! task_manager.publish_task(Box::new(MyTask::new(...)));
//!
//! // In the main loop:
//! task_manager.process_completed_tasks(&mut context);
//! task_manager.process_queued_tasks();
//! ```

pub mod task;

use log::{debug, error, info};
use std::collections::VecDeque;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use task::{Task, TaskContext, TaskResult};

/// A communication channel between the main thread and a worker thread.
///
/// # Fields
/// - `task_sender`: Sends tasks from main thread to worker
/// - `result_receiver`: Receives task results from worker
/// - `num_tasks_in_flight`: Tracks number of tasks currently being processed
/// - `alive`: Cleared once the worker has disconnected
/// - `worker`: Handle to the worker thread, joined when the manager is dropped
#[derive(Debug)]
pub struct TaskChannel {
    task_sender: Sender<Box<dyn Task + Send>>,
    result_receiver: Receiver<Box<dyn TaskResult + Send>>,
    num_tasks_in_flight: usize,
    alive: bool,
    worker: JoinHandle<()>,
}

/// Manages a pool of worker threads and coordinates task execution.
///
/// The `TaskManager` is responsible for:
/// - Creating and managing worker threads
/// - Distributing tasks across available workers
/// - Collecting and processing task results
/// - Handling task queuing when all workers are busy
///
/// # Fields
/// - `channels`: Set of worker channels
/// - `queued_tasks`: Tasks waiting for an available worker
/// - `completed_inline`: Results of tasks run on the main thread, not yet handled
/// - `current_channel`: Index for round-robin scheduling
pub struct TaskManager {
    channels: Vec<TaskChannel>,
    queued_tasks: VecDeque<Box<dyn Task + Send>>,
    completed_inline: VecDeque<Box<dyn TaskResult + Send>>,
    current_channel: usize,
}

/// Maximum number of tasks that can be in flight per worker channel.
///
/// This is set to 1 to ensure tasks are processed in order within each channel.
pub const MAX_TASKS_IN_FLIGHT: usize = 1;

impl TaskManager {
    /// Creates a new `TaskManager` with the specified number of worker threads.
    ///
    /// # Arguments
    /// * `num_workers` - Number of worker threads to create. Zero runs every task inline.
    pub fn new(num_workers: usize) -> Self {
        let mut channels = Vec::with_capacity(num_workers);

        if num_workers > 0 {
            info!(
                "Starting {} workers (available parallelism: {:?})",
                num_workers,
                thread::available_parallelism()
            );
        } else {
            info!("No workers requested; tasks will run inline");
        }

        for index in 0..num_workers {
            let (task_tx, task_rx) = channel::<Box<dyn Task + Send>>();
            let (result_tx, result_rx) = channel::<Box<dyn TaskResult + Send>>();

            let task_closure = move || {
                while let Ok(task) = task_rx.recv() {
                    let result = task.process();
                    if result_tx.send(result).is_err() {
                        break;
                    }
                }
            };

            let worker = match thread::Builder::new()
                .name(format!("voxel-worker-{index}"))
                .spawn(task_closure)
            {
                Ok(worker) => worker,
                Err(e) => {
                    error!("Failed to spawn worker {}: {}", index, e);
                    continue;
                }
            };

            channels.push(TaskChannel {
                task_sender: task_tx,
                result_receiver: result_rx,
                num_tasks_in_flight: 0,
                alive: true,
                worker,
            });
        }

        TaskManager {
            channels,
            queued_tasks: VecDeque::new(),
            completed_inline: VecDeque::new(),
            current_channel: 0,
        }
    }

    /// Number of workers still accepting tasks.
    pub fn worker_count(&self) -> usize {
        self.channels.iter().filter(|channel| channel.alive).count()
    }

    /// Number of tasks waiting for a worker.
    pub fn queued_len(&self) -> usize {
        self.queued_tasks.len()
    }

    /// Whether no task is queued, running, or waiting for its result to be handled.
    pub fn is_idle(&self) -> bool {
        self.queued_tasks.is_empty()
            && self.completed_inline.is_empty()
            && self
                .channels
                .iter()
                .all(|channel| channel.num_tasks_in_flight == 0)
    }

    /// Attempts to send a task to a specific worker channel.
    ///
    /// # Returns
    /// - `Ok(())` if the task was successfully sent to the worker
    /// - `Err(task)` if the send failed (worker disconnected); the channel is retired
    fn try_send_task(
        &mut self,
        task: Box<dyn Task + Send>,
        channel_idx: usize,
    ) -> Result<(), Box<dyn Task + Send>> {
        let channel = &mut self.channels[channel_idx];
        match channel.task_sender.send(task) {
            Ok(_) => {
                channel.num_tasks_in_flight += 1;
                Ok(())
            }
            Err(task) => {
                error!("Worker {} disconnected; retiring it", channel_idx);
                channel.alive = false;
                Err(task.0)
            }
        }
    }

    /// Finds an available worker channel that can accept a new task.
    ///
    /// Round-robin starting from the channel after the last one used. Channels at
    /// `MAX_TASKS_IN_FLIGHT` and retired channels are skipped.
    fn find_available_channel(&self) -> Option<usize> {
        let len = self.channels.len();
        (0..len)
            .map(|offset| (self.current_channel + offset) % len)
            .find(|&idx| {
                let channel = &self.channels[idx];
                channel.alive && channel.num_tasks_in_flight < MAX_TASKS_IN_FLIGHT
            })
    }

    /// Publishes a new task for execution.
    ///
    /// # Returns
    /// - `true` if the task was immediately scheduled on an available worker
    /// - `false` if the task was queued (all workers busy, or inline mode)
    pub fn publish_task(&mut self, task: Box<dyn Task + Send>) -> bool {
        match self.find_available_channel() {
            Some(channel_idx) => match self.try_send_task(task, channel_idx) {
                Ok(_) => {
                    self.current_channel = (channel_idx + 1) % self.channels.len();
                    true
                }
                Err(task) => {
                    self.queued_tasks.push_back(task);
                    false
                }
            },
            None => {
                self.queued_tasks.push_back(task);
                false
            }
        }
    }

    /// Hands queued tasks to workers as they become available.
    ///
    /// Without live workers, every task queued at the time of the call is run inline
    /// and its result is kept for the next `process_completed_tasks`.
    pub fn process_queued_tasks(&mut self) {
        if self.queued_tasks.is_empty() {
            return;
        }

        if self.worker_count() == 0 {
            let count = self.queued_tasks.len();
            for task in self.queued_tasks.drain(..) {
                self.completed_inline.push_back(task.process());
            }
            debug!("Ran {} tasks inline", count);
            return;
        }

        while let Some(channel_idx) = self.find_available_channel() {
            let Some(task) = self.queued_tasks.pop_front() else {
                break;
            };
            match self.try_send_task(task, channel_idx) {
                Ok(_) => self.current_channel = (channel_idx + 1) % self.channels.len(),
                Err(task) => {
                    // Channel is disconnected, put task back and try the next one
                    self.queued_tasks.push_front(task);
                }
            }
        }
    }

    /// Processes all completed task results.
    ///
    /// Must be called on the main thread. Results are handled in the order they are
    /// received from each worker, and the tasks they spawn are published.
    pub fn process_completed_tasks(&mut self, context: &mut TaskContext<'_>) {
        let mut tasks_to_queue = Vec::new();

        while let Some(result) = self.completed_inline.pop_front() {
            tasks_to_queue.extend(result.handle_result(context));
        }

        for (idx, channel) in self.channels.iter_mut().enumerate() {
            loop {
                match channel.result_receiver.try_recv() {
                    Ok(result) => {
                        channel.num_tasks_in_flight = channel.num_tasks_in_flight.saturating_sub(1);
                        tasks_to_queue.extend(result.handle_result(context));
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        if channel.alive || channel.num_tasks_in_flight > 0 {
                            error!(
                                "Worker {} stopped with {} task(s) in flight; retiring it",
                                idx, channel.num_tasks_in_flight
                            );
                        }
                        channel.alive = false;
                        channel.num_tasks_in_flight = 0;
                        break;
                    }
                }
            }
        }

        for task in tasks_to_queue {
            self.publish_task(task);
        }
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        self.queued_tasks.clear();
        for channel in self.channels.drain(..) {
            let TaskChannel {
                task_sender,
                worker,
                ..
            } = channel;
            // Closing the task channel ends the worker's receive loop.
            drop(task_sender);
            if worker.join().is_err() {
                error!("A worker thread panicked");
            }
        }
    }
}
