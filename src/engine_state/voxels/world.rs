//! # World Module
//!
//! This module provides the `World` struct, the registry of loaded chunks and the
//! central coordinator for chunk lifecycle, the active set and cross-chunk voxel
//! queries.
//!
//! ## Chunk Lifecycle
//!
//! A chunk coordinate moves through these states:
//!
//! 1. **Absent**: nothing is stored. Queries that land here are answered by the
//!    generator directly, without registering anything.
//! 2. **Pending**: generation has been scheduled on the task manager and has not
//!    completed. A pending coordinate is never scheduled again.
//! 3. **Active**: registered, meshed and inside the current view ring.
//! 4. **Inactive**: registered but outside the view ring. Inactive chunks are kept in
//!    a least-recently-hidden cache of bounded size; the oldest ones are dropped and
//!    regenerated (identically) if they come back into view.
//!
//! ## View Distance
//!
//! The view ring is the square of chunks within `render_distance` of the viewer's
//! chunk on both axes. `refresh_view_distance` brings every chunk in the ring into the
//! active set synchronously. `plan_view_distance` does the same bookkeeping but hands
//! back the coordinates that still need generating, for the asynchronous path.
//! Both are idempotent for an unchanged viewer chunk.
//!
//! ## Thread Safety
//!
//! The engine keeps the world in an `MtResource`; task results integrate chunks under
//! the write lock on the main thread, so there is a single writer. Worker threads never
//! touch the world: they receive `Arc` snapshots of what they need.

use std::{
    collections::{HashMap, HashSet},
    num::NonZeroUsize,
    sync::Arc,
};

use cgmath::{MetricSpace, Point2};
use log::{debug, info, warn};
use lru::LruCache;
use thiserror::Error;

use crate::{
    core::MtResource,
    engine_state::{
        config::{ConfigError, EngineConfig},
        rendering::texture::TextureAtlas,
    },
};

use super::{
    block::{BlockCatalog, BlockId, CatalogError, AIR},
    chunk::{Chunk, NeighborSnapshot, VoxelSource},
    coords::{
        chunks_within_distance, is_within_height, voxel_coord_to_chunk_coord,
        voxel_coord_to_local_coord, ChunkCoord, VoxelCoord, WorldFrame,
    },
    generation::{TerrainPalette, VoxelGenerator},
};

/// Errors raised while creating a world.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("a world is already initialized for this session")]
    AlreadyInitialized,
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// What `ensure_chunk` had to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// The chunk was generated, meshed and registered.
    Created,
    /// A retained inactive chunk was put back in the active set.
    Reactivated,
    /// Nothing; the chunk was already active.
    AlreadyActive,
}

/// The changes a synchronous view-distance refresh made.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewDistanceChange {
    pub created: Vec<ChunkCoord>,
    pub reactivated: Vec<ChunkCoord>,
    pub deactivated: Vec<ChunkCoord>,
    /// Inactive chunks dropped from the registry.
    pub evicted: Vec<ChunkCoord>,
}

impl ViewDistanceChange {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty()
            && self.reactivated.is_empty()
            && self.deactivated.is_empty()
            && self.evicted.is_empty()
    }
}

/// The bookkeeping half of a view-distance refresh, for the asynchronous path.
///
/// Activation changes have already been applied. `to_generate` lists the coordinates,
/// nearest first, that are now pending and must be scheduled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewDistancePlan {
    pub to_generate: Vec<ChunkCoord>,
    pub reactivated: Vec<ChunkCoord>,
    pub deactivated: Vec<ChunkCoord>,
    pub evicted: Vec<ChunkCoord>,
}

impl ViewDistancePlan {
    pub fn is_empty(&self) -> bool {
        self.to_generate.is_empty()
            && self.reactivated.is_empty()
            && self.deactivated.is_empty()
            && self.evicted.is_empty()
    }
}

/// The outcome of registering a chunk built elsewhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkIntegration {
    /// Whether the chunk went straight into the active set.
    pub active: bool,
    /// Chunks dropped from the registry to make room. May include the chunk itself
    /// when nothing is retained.
    pub evicted: Vec<ChunkCoord>,
}

/// The voxel world: loaded chunks, the active set and the voxel generator.
pub struct World {
    catalog: Arc<BlockCatalog>,
    generator: Arc<VoxelGenerator>,
    atlas: TextureAtlas,
    frame: WorldFrame,
    render_distance: u32,
    /// Every registered chunk, active or not.
    chunks: HashMap<ChunkCoord, Chunk>,
    active_chunks: HashSet<ChunkCoord>,
    /// Coordinates with generation in flight.
    pending: HashSet<ChunkCoord>,
    /// The current view ring.
    wanted: HashSet<ChunkCoord>,
    viewer_chunk: Option<ChunkCoord>,
    /// Inactive chunks, least recently hidden first out. `None` retains nothing.
    retained: Option<LruCache<ChunkCoord, ()>>,
}

impl World {
    /// Creates an empty world.
    ///
    /// # Errors
    /// Fails if `config` does not validate, or if the palette names or any lode block
    /// are missing from `catalog`.
    pub fn new(config: &EngineConfig, catalog: BlockCatalog) -> Result<Self, WorldError> {
        config.validate()?;
        let palette = TerrainPalette::resolve(&config.palette, &catalog)?;
        let generator = VoxelGenerator::new(config.seed, config.biome.clone(), palette, &catalog)?;

        info!(
            "World created: seed {}, render distance {}, biome {:?}",
            config.seed, config.render_distance, config.biome.name
        );

        Ok(World {
            catalog: Arc::new(catalog),
            generator: Arc::new(generator),
            atlas: config.atlas(),
            frame: config.frame,
            render_distance: config.render_distance,
            chunks: HashMap::new(),
            active_chunks: HashSet::new(),
            pending: HashSet::new(),
            wanted: HashSet::new(),
            viewer_chunk: None,
            retained: NonZeroUsize::new(config.max_retained_chunks).map(LruCache::new),
        })
    }

    pub fn catalog(&self) -> &Arc<BlockCatalog> {
        &self.catalog
    }

    pub fn generator(&self) -> &Arc<VoxelGenerator> {
        &self.generator
    }

    pub fn atlas(&self) -> &TextureAtlas {
        &self.atlas
    }

    pub fn frame(&self) -> &WorldFrame {
        &self.frame
    }

    pub fn render_distance(&self) -> u32 {
        self.render_distance
    }

    pub fn viewer_chunk(&self) -> Option<ChunkCoord> {
        self.viewer_chunk
    }

    /// The block the generator places at `voxel`, ignoring any loaded chunk.
    pub fn generate_voxel(&self, voxel: VoxelCoord) -> BlockId {
        self.generator.generate_voxel(voxel)
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    pub fn chunk_mut(&mut self, coord: ChunkCoord) -> Option<&mut Chunk> {
        self.chunks.get_mut(&coord)
    }

    /// Whether a chunk is registered (active or retained).
    pub fn is_chunk_in_world(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    pub fn is_pending(&self, coord: ChunkCoord) -> bool {
        self.pending.contains(&coord)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn active_chunks(&self) -> &HashSet<ChunkCoord> {
        &self.active_chunks
    }

    /// Number of registered chunks, active or not.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// The block at `voxel` if its chunk is registered. Outside the world's height
    /// this is air.
    pub fn try_get_block(&self, voxel: VoxelCoord) -> Option<BlockId> {
        if !is_within_height(voxel.y) {
            return Some(AIR);
        }
        self.chunks
            .get(&voxel_coord_to_chunk_coord(voxel))
            .map(|chunk| chunk.get(voxel_coord_to_local_coord(voxel)))
    }

    /// The block at `voxel`. Unregistered chunks are answered by the generator.
    pub fn block_at(&self, voxel: VoxelCoord) -> BlockId {
        self.try_get_block(voxel)
            .unwrap_or_else(|| self.generator.generate_voxel(voxel))
    }

    /// Whether the voxel at `voxel` is solid, from whichever chunk holds it.
    pub fn is_solid_at(&self, voxel: VoxelCoord) -> bool {
        self.catalog.is_solid(self.block_at(voxel))
    }

    /// Read-only copies of the registered horizontal neighbours of `coord`.
    pub fn neighbor_snapshot(&self, coord: ChunkCoord) -> NeighborSnapshot {
        let mut snapshot = NeighborSnapshot::new(Arc::clone(&self.generator));
        for neighbour in NeighborSnapshot::neighbor_coords(coord) {
            if let Some(chunk) = self.chunks.get(&neighbour) {
                snapshot.insert(neighbour, chunk.grid_snapshot());
            }
        }
        snapshot
    }

    /// Makes sure the chunk at `coord` is registered and active, generating it on the
    /// calling thread if needed.
    pub fn ensure_chunk(&mut self, coord: ChunkCoord) -> EnsureOutcome {
        if let Some(chunk) = self.chunks.get(&coord) {
            if chunk.is_active() {
                return EnsureOutcome::AlreadyActive;
            }
            self.activate(coord);
            return EnsureOutcome::Reactivated;
        }

        let chunk = Chunk::build(
            coord,
            &self.generator,
            &self.catalog,
            &self.atlas,
            self.frame.voxel_size,
            &*self,
        );
        self.pending.remove(&coord);
        self.chunks.insert(coord, chunk);
        self.activate(coord);
        debug!("Chunk {:?} created synchronously", coord);
        EnsureOutcome::Created
    }

    /// Moves the view ring to `viewer_chunk` and brings every chunk in it into the
    /// active set, generating missing ones on the calling thread.
    pub fn refresh_view_distance(&mut self, viewer_chunk: ChunkCoord) -> ViewDistanceChange {
        let (ring, deactivated, evicted) = self.retarget(viewer_chunk);
        let mut change = ViewDistanceChange {
            deactivated,
            evicted,
            ..ViewDistanceChange::default()
        };

        for coord in ring {
            match self.ensure_chunk(coord) {
                EnsureOutcome::Created => change.created.push(coord),
                EnsureOutcome::Reactivated => change.reactivated.push(coord),
                EnsureOutcome::AlreadyActive => {}
            }
        }

        if !change.is_empty() {
            info!(
                "View refreshed around {:?}: {} created, {} reactivated, {} deactivated",
                viewer_chunk,
                change.created.len(),
                change.reactivated.len(),
                change.deactivated.len()
            );
        }
        change
    }

    /// Moves the view ring to `viewer_chunk`, applies activation changes and marks the
    /// chunks that still need generating as pending.
    pub fn plan_view_distance(&mut self, viewer_chunk: ChunkCoord) -> ViewDistancePlan {
        let (ring, deactivated, evicted) = self.retarget(viewer_chunk);
        let mut plan = ViewDistancePlan {
            deactivated,
            evicted,
            ..ViewDistancePlan::default()
        };

        for coord in ring {
            match self.chunks.get(&coord) {
                Some(chunk) if chunk.is_active() => {}
                Some(_) => {
                    self.activate(coord);
                    plan.reactivated.push(coord);
                }
                None => {
                    if self.pending.insert(coord) {
                        plan.to_generate.push(coord);
                    }
                }
            }
        }

        if !plan.is_empty() {
            debug!(
                "View planned around {:?}: {} to generate, {} reactivated, {} deactivated",
                viewer_chunk,
                plan.to_generate.len(),
                plan.reactivated.len(),
                plan.deactivated.len()
            );
        }
        plan
    }

    /// Registers a chunk generated and meshed off the main thread.
    ///
    /// The chunk becomes active if it is inside the current view ring (or if no ring
    /// has been set yet), and inactive otherwise.
    ///
    /// # Returns
    /// `None` if a chunk is already registered at that coordinate; the new one is dropped.
    pub fn integrate_chunk(&mut self, chunk: Chunk) -> Option<ChunkIntegration> {
        let coord = chunk.coord();
        self.pending.remove(&coord);

        if self.chunks.contains_key(&coord) {
            debug!("Chunk {:?} is already registered, dropping duplicate", coord);
            return None;
        }

        let active = self.viewer_chunk.is_none() || self.wanted.contains(&coord);
        self.chunks.insert(coord, chunk);

        let evicted = if active {
            self.activate(coord);
            Vec::new()
        } else {
            debug!("Chunk {:?} completed outside the view ring", coord);
            self.deactivate(coord)
        };

        Some(ChunkIntegration { active, evicted })
    }

    /// Sets a new view ring and deactivates active chunks outside it.
    ///
    /// # Returns
    /// The ring (nearest first), the deactivated chunks and the evicted chunks.
    fn retarget(
        &mut self,
        viewer_chunk: ChunkCoord,
    ) -> (Vec<ChunkCoord>, Vec<ChunkCoord>, Vec<ChunkCoord>) {
        let mut ring = chunks_within_distance(viewer_chunk, self.render_distance);
        let center = Point2::new(viewer_chunk.x as f32, viewer_chunk.y as f32);
        ring.sort_by(|a, b| {
            let da = center.distance2(Point2::new(a.x as f32, a.y as f32));
            let db = center.distance2(Point2::new(b.x as f32, b.y as f32));
            da.total_cmp(&db)
        });

        self.viewer_chunk = Some(viewer_chunk);
        self.wanted = ring.iter().copied().collect();

        let mut leaving: Vec<ChunkCoord> = self
            .active_chunks
            .iter()
            .filter(|coord| !self.wanted.contains(coord))
            .copied()
            .collect();
        leaving.sort_by_key(|coord| (coord.x, coord.y));

        let mut evicted = Vec::new();
        for coord in &leaving {
            evicted.extend(self.deactivate(*coord));
        }

        (ring, leaving, evicted)
    }

    fn activate(&mut self, coord: ChunkCoord) {
        if let Some(chunk) = self.chunks.get_mut(&coord) {
            chunk.set_active(true);
            self.active_chunks.insert(coord);
            if let Some(retained) = self.retained.as_mut() {
                retained.pop(&coord);
            }
        }
    }

    /// Hides a chunk and puts it in the retained cache.
    ///
    /// # Returns
    /// The chunks dropped from the registry as a result.
    fn deactivate(&mut self, coord: ChunkCoord) -> Vec<ChunkCoord> {
        let Some(chunk) = self.chunks.get_mut(&coord) else {
            return Vec::new();
        };
        chunk.set_active(false);
        self.active_chunks.remove(&coord);

        let dropped = match self.retained.as_mut() {
            None => Some(coord),
            Some(retained) => match retained.push(coord, ()) {
                Some((old, ())) if old != coord => Some(old),
                _ => None,
            },
        };

        match dropped {
            Some(old) => {
                self.chunks.remove(&old);
                debug!("Chunk {:?} dropped from the registry", old);
                vec![old]
            }
            None => Vec::new(),
        }
    }
}

impl VoxelSource for World {
    fn block_at(&self, voxel: VoxelCoord) -> BlockId {
        World::block_at(self, voxel)
    }
}

/// Holder of the session's single world.
///
/// The engine creates one slot per session and initializes it once; a second
/// `init` is refused and leaves the first world untouched.
#[derive(Default)]
pub struct WorldSlot {
    world: Option<MtResource<World>>,
}

impl WorldSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the session's world.
    ///
    /// # Errors
    /// `WorldError::AlreadyInitialized` if the slot already holds a world, or the
    /// catalog error that prevented building one.
    pub fn init(
        &mut self,
        config: &EngineConfig,
        catalog: BlockCatalog,
    ) -> Result<MtResource<World>, WorldError> {
        if self.world.is_some() {
            warn!("World already initialized; keeping the existing world");
            return Err(WorldError::AlreadyInitialized);
        }

        let world = MtResource::new(World::new(config, catalog)?);
        self.world = Some(world.clone());
        Ok(world)
    }

    /// A handle to the world, if one is initialized.
    pub fn get(&self) -> Option<MtResource<World>> {
        self.world.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.world.is_some()
    }

    /// Releases the slot's handle so a new world can be initialized.
    ///
    /// # Returns
    /// `true` if a world was released.
    pub fn shutdown(&mut self) -> bool {
        let released = self.world.take().is_some();
        if released {
            info!("World shut down");
        }
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::coords::{chunk_coord_to_voxel_origin, CHUNK_HEIGHT};
    use cgmath::Point3;

    fn config(render_distance: u32, max_retained_chunks: usize) -> EngineConfig {
        EngineConfig {
            seed: 42,
            render_distance,
            worker_count: 0,
            max_retained_chunks,
            ..EngineConfig::default()
        }
    }

    fn world(render_distance: u32, max_retained_chunks: usize) -> World {
        World::new(&config(render_distance, max_retained_chunks), BlockCatalog::default()).unwrap()
    }

    #[test]
    fn refresh_is_idempotent() {
        let mut world = world(1, 16);
        let first = world.refresh_view_distance(Point2::new(0, 0));
        assert_eq!(first.created.len(), 9);
        assert_eq!(world.active_chunks().len(), 9);

        let second = world.refresh_view_distance(Point2::new(0, 0));
        assert!(second.is_empty());
        assert_eq!(world.active_chunks().len(), 9);
        assert_eq!(world.chunk_count(), 9);
    }

    #[test]
    fn moving_the_viewer_swaps_the_edge_columns() {
        let mut world = world(1, 16);
        world.refresh_view_distance(Point2::new(0, 0));
        let change = world.refresh_view_distance(Point2::new(1, 0));

        assert_eq!(change.created.len(), 3);
        assert_eq!(
            change.deactivated,
            vec![Point2::new(-1, -1), Point2::new(-1, 0), Point2::new(-1, 1)]
        );
        assert_eq!(world.active_chunks().len(), 9);
        assert_eq!(world.chunk_count(), 12);
        assert!(!world.chunk(Point2::new(-1, 0)).unwrap().is_active());

        let back = world.refresh_view_distance(Point2::new(0, 0));
        assert!(back.created.is_empty());
        assert_eq!(back.reactivated.len(), 3);
    }

    #[test]
    fn retained_chunks_are_bounded() {
        let mut world = world(0, 2);
        for x in 0..5 {
            world.refresh_view_distance(Point2::new(x, 0));
        }
        // One active, two retained; the oldest two were dropped.
        assert_eq!(world.chunk_count(), 3);
        assert!(!world.is_chunk_in_world(Point2::new(0, 0)));
        assert!(!world.is_chunk_in_world(Point2::new(1, 0)));
        assert!(world.is_chunk_in_world(Point2::new(2, 0)));
        assert!(world.is_chunk_in_world(Point2::new(3, 0)));
    }

    #[test]
    fn zero_retention_drops_chunks_immediately() {
        let mut world = world(0, 0);
        world.refresh_view_distance(Point2::new(0, 0));
        let change = world.refresh_view_distance(Point2::new(5, 5));
        assert_eq!(change.evicted, vec![Point2::new(0, 0)]);
        assert_eq!(world.chunk_count(), 1);
    }

    #[test]
    fn solidity_crosses_chunk_boundaries() {
        let mut world = world(1, 16);
        world.refresh_view_distance(Point2::new(0, 0));

        // Voxel (-1, y, 0) lives in chunk (-1, 0), not chunk (0, 0).
        for y in 0..CHUNK_HEIGHT {
            let voxel = Point3::new(-1, y, 0);
            let stored = world
                .chunk(Point2::new(-1, 0))
                .unwrap()
                .get(voxel_coord_to_local_coord(voxel));
            assert_eq!(world.block_at(voxel), stored);
            assert_eq!(world.is_solid_at(voxel), world.catalog().is_solid(stored));
        }
        assert!(world.is_solid_at(Point3::new(-1, 0, 0)));
        assert!(!world.is_solid_at(Point3::new(-1, -1, 0)));
        assert!(!world.is_solid_at(Point3::new(-1, CHUNK_HEIGHT, 0)));
    }

    #[test]
    fn missing_chunks_are_answered_by_the_generator() {
        let world = world(1, 16);
        let voxel = Point3::new(500, 20, -700);
        assert_eq!(world.try_get_block(voxel), None);
        assert_eq!(world.block_at(voxel), world.generate_voxel(voxel));
        assert_eq!(world.chunk_count(), 0);
    }

    #[test]
    fn edits_are_visible_through_world_queries() {
        let mut world = world(0, 16);
        world.ensure_chunk(Point2::new(0, 0));
        let catalog = Arc::clone(world.catalog());
        let chunk = world.chunk_mut(Point2::new(0, 0)).unwrap();
        chunk.set(Point3::new(2, 5, 2), AIR, &catalog);

        let voxel = chunk_coord_to_voxel_origin(Point2::new(0, 0)) + cgmath::Vector3::new(2, 5, 2);
        assert_eq!(world.block_at(voxel), AIR);
        assert!(!world.is_solid_at(voxel));
    }

    #[test]
    fn plan_marks_pending_and_never_schedules_twice() {
        let mut world = world(1, 16);
        let plan = world.plan_view_distance(Point2::new(0, 0));
        assert_eq!(plan.to_generate.len(), 9);
        assert_eq!(plan.to_generate[0], Point2::new(0, 0));
        assert_eq!(world.pending_count(), 9);
        assert!(world.active_chunks().is_empty());

        let again = world.plan_view_distance(Point2::new(0, 0));
        assert!(again.is_empty());

        let shifted = world.plan_view_distance(Point2::new(1, 0));
        assert_eq!(shifted.to_generate.len(), 3);
        assert_eq!(world.pending_count(), 12);
    }

    #[test]
    fn late_completions_are_integrated_inactive() {
        let mut world = world(0, 16);
        world.plan_view_distance(Point2::new(0, 0));
        world.plan_view_distance(Point2::new(3, 0));

        let chunk = Chunk::build(
            Point2::new(0, 0),
            world.generator(),
            world.catalog(),
            world.atlas(),
            1.0,
            &world,
        );
        let integration = world.integrate_chunk(chunk).unwrap();
        assert!(!integration.active);
        assert!(!world.is_pending(Point2::new(0, 0)));
        assert!(world.is_chunk_in_world(Point2::new(0, 0)));
        assert!(!world.active_chunks().contains(&Point2::new(0, 0)));
    }

    #[test]
    fn duplicate_integration_keeps_the_first_chunk() {
        let mut world = world(0, 16);
        world.ensure_chunk(Point2::new(0, 0));
        let chunk = Chunk::build(
            Point2::new(0, 0),
            world.generator(),
            world.catalog(),
            world.atlas(),
            1.0,
            &world,
        );
        assert_eq!(world.integrate_chunk(chunk), None);
        assert_eq!(world.chunk_count(), 1);
        assert_eq!(world.ensure_chunk(Point2::new(0, 0)), EnsureOutcome::AlreadyActive);
    }

    #[test]
    fn second_init_is_refused_and_keeps_the_original() {
        let mut slot = WorldSlot::new();
        let first = slot.init(&config(1, 16), BlockCatalog::default()).unwrap();
        first.get_mut().ensure_chunk(Point2::new(0, 0));

        let second = slot.init(&config(3, 16), BlockCatalog::default());
        assert!(matches!(second, Err(WorldError::AlreadyInitialized)));

        let current = slot.get().unwrap();
        assert!(current.ptr_eq(&first));
        assert_eq!(current.get().render_distance(), 1);
        assert_eq!(current.get().chunk_count(), 1);

        assert!(slot.shutdown());
        assert!(!slot.is_initialized());
        assert!(slot.init(&config(3, 16), BlockCatalog::default()).is_ok());
    }

    #[test]
    fn unknown_palette_block_fails_world_creation() {
        let mut config = config(1, 16);
        config.palette.stone = "marble".to_string();
        assert!(matches!(
            World::new(&config, BlockCatalog::default()),
            Err(WorldError::Catalog(CatalogError::NotFound(_)))
        ));
    }

    #[test]
    fn invalid_config_fails_world_creation() {
        let mut zero_voxels = config(1, 16);
        zero_voxels.frame.voxel_size = 0.0;
        assert!(matches!(
            World::new(&zero_voxels, BlockCatalog::default()),
            Err(WorldError::Config(ConfigError::Invalid(_)))
        ));

        let mut slot = WorldSlot::new();
        assert!(slot.init(&zero_voxels, BlockCatalog::default()).is_err());
        assert!(!slot.is_initialized());

        let mut too_far = config(1, 16);
        too_far.render_distance = u32::MAX;
        assert!(matches!(
            World::new(&too_far, BlockCatalog::default()),
            Err(WorldError::Config(ConfigError::Invalid(_)))
        ));
    }
}
