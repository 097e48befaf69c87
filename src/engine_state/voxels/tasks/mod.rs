//! # Voxel Task System
//!
//! This module contains tasks related to voxel world generation. They run on the
//! task manager's workers so that moving the viewer never stalls the main thread.

pub mod chunk_generation_task;
