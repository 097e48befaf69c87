//! End-to-end chunk lifecycle: a viewer walking across the world with worker threads,
//! the bounded cache of hidden chunks and the one-world-per-session rule.

use std::collections::HashSet;

use cgmath::{Point2, Point3};
use voxel_terrain::{
    BlockCatalog, ChunkCoord, ChunkMesh, EngineConfig, EngineState, MeshSink, MeshStatsSink,
    WorldError, WorldSlot,
};

/// Records everything the engine asks a renderer to do.
#[derive(Default)]
struct RecordingSink {
    uploaded: Vec<ChunkCoord>,
    visible: HashSet<ChunkCoord>,
    removed: Vec<ChunkCoord>,
}

impl MeshSink for RecordingSink {
    fn upload_chunk_mesh(&mut self, coord: ChunkCoord, _origin: Point3<f32>, _mesh: &ChunkMesh) {
        self.uploaded.push(coord);
    }

    fn set_chunk_visible(&mut self, coord: ChunkCoord, visible: bool) {
        if visible {
            self.visible.insert(coord);
        } else {
            self.visible.remove(&coord);
        }
    }

    fn remove_chunk(&mut self, coord: ChunkCoord) {
        self.visible.remove(&coord);
        self.removed.push(coord);
    }
}

fn config(workers: usize, retained: usize) -> EngineConfig {
    EngineConfig {
        seed: 99,
        render_distance: 1,
        worker_count: workers,
        max_retained_chunks: retained,
        ..EngineConfig::default()
    }
}

fn ring(center: ChunkCoord) -> HashSet<ChunkCoord> {
    let mut ring = HashSet::new();
    for dx in -1..=1 {
        for dz in -1..=1 {
            ring.insert(Point2::new(center.x + dx, center.y + dz));
        }
    }
    ring
}

#[test]
fn walking_viewer_keeps_the_active_set_on_the_view_ring() {
    let mut slot = WorldSlot::new();
    let mut engine =
        EngineState::new(&mut slot, config(3, 64), BlockCatalog::default(), RecordingSink::default())
            .unwrap();

    let mut viewer = Point3::new(8.0, 60.0, 8.0);
    for _ in 0..6 {
        engine.update(viewer);
        engine.run_until_idle();

        let expected = ring(engine.current_viewer_chunk().unwrap());
        let world = engine.world.get();
        assert_eq!(world.active_chunks(), &expected);
        assert_eq!(world.pending_count(), 0);
        assert_eq!(engine.mesh_sink().visible, expected);

        viewer.x += 16.0;
    }

    let sink = engine.shutdown(&mut slot);
    let unique: HashSet<_> = sink.uploaded.iter().copied().collect();
    assert_eq!(unique.len(), sink.uploaded.len(), "a chunk was meshed twice");
    assert!(sink.removed.is_empty());
}

#[test]
fn refreshing_the_same_chunk_schedules_nothing() {
    let mut slot = WorldSlot::new();
    let mut engine =
        EngineState::new(&mut slot, config(2, 64), BlockCatalog::default(), MeshStatsSink::new())
            .unwrap();
    let center = Point2::new(4, -4);

    assert_eq!(engine.refresh_view_distance(center), 9);
    assert_eq!(engine.refresh_view_distance(center), 0);
    engine.run_until_idle();
    assert_eq!(engine.refresh_view_distance(center), 0);

    let world = engine.world.get();
    assert_eq!(world.chunk_count(), 9);
    assert_eq!(engine.mesh_sink().uploads(), 9);
}

#[test]
fn returning_viewer_reuses_retained_chunks() {
    let mut slot = WorldSlot::new();
    let mut engine =
        EngineState::new(&mut slot, config(0, 64), BlockCatalog::default(), MeshStatsSink::new())
            .unwrap();

    engine.refresh_view_distance_now(Point2::new(0, 0));
    let moved = engine.refresh_view_distance_now(Point2::new(3, 0));
    assert_eq!(moved.deactivated.len(), 9);
    assert!(moved.evicted.is_empty());

    let back = engine.refresh_view_distance_now(Point2::new(0, 0));
    assert!(back.created.is_empty());
    assert_eq!(back.reactivated.len(), 9);
    assert_eq!(engine.mesh_sink().uploads(), 18);
}

#[test]
fn hidden_chunks_beyond_the_cache_are_dropped() {
    let mut slot = WorldSlot::new();
    let mut engine = EngineState::new(
        &mut slot,
        config(0, 4),
        BlockCatalog::default(),
        RecordingSink::default(),
    )
    .unwrap();

    engine.refresh_view_distance_now(Point2::new(0, 0));
    let moved = engine.refresh_view_distance_now(Point2::new(10, 10));
    assert_eq!(moved.deactivated.len(), 9);
    assert_eq!(moved.evicted.len(), 5);

    let world = engine.world.get();
    assert_eq!(world.chunk_count(), 9 + 4);
    for coord in &moved.evicted {
        assert!(!world.is_chunk_in_world(*coord));
    }
    assert_eq!(engine.mesh_sink().removed, moved.evicted);
}

#[test]
fn a_session_has_one_world() {
    let mut slot = WorldSlot::new();
    let engine =
        EngineState::new(&mut slot, config(1, 8), BlockCatalog::default(), MeshStatsSink::new())
            .unwrap();

    let second =
        EngineState::new(&mut slot, config(1, 8), BlockCatalog::default(), MeshStatsSink::new());
    assert!(matches!(second, Err(WorldError::AlreadyInitialized)));

    engine.shutdown(&mut slot);
    assert!(
        EngineState::new(&mut slot, config(1, 8), BlockCatalog::default(), MeshStatsSink::new())
            .is_ok()
    );
}
