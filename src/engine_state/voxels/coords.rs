//! # Coordinate Conversions
//!
//! The world uses three integer coordinate spaces and one continuous one:
//!
//! * **World position** (`Point3<f32>`): where the viewer is, in scene units.
//! * **Voxel coordinate** (`VoxelCoord`): one integer triple per voxel of the whole world.
//! * **Chunk coordinate** (`ChunkCoord`): one integer pair (x, z) per chunk column. The
//!   `y` component of the `Point2` holds the chunk's z index.
//! * **Local coordinate** (`LocalCoord`): a voxel's position inside its chunk.
//!
//! Horizontal chunk and local coordinates use floor division and a positive modulo, so
//! that for every voxel `v` within the world's height:
//!
//! ```text
//! chunk_coord_to_voxel_origin(voxel_coord_to_chunk_coord(v)) + voxel_coord_to_local_coord(v) == v
//! ```
//!
//! In particular voxel x = -1 lives in chunk x = -1 at local x = 15, not in chunk 0.

use cgmath::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// The width and depth of a chunk in voxels.
pub const CHUNK_WIDTH: i32 = 16;
/// The height of a chunk in voxels. A chunk spans the full height of the world.
pub const CHUNK_HEIGHT: i32 = 128;
/// The number of voxels in one horizontal slice of a chunk.
pub const CHUNK_PLANE_SIZE: usize = (CHUNK_WIDTH * CHUNK_WIDTH) as usize;
/// The total number of voxels in a chunk.
pub const CHUNK_VOLUME: usize = CHUNK_PLANE_SIZE * CHUNK_HEIGHT as usize;
/// Largest view distance, in chunks, a world accepts.
pub const MAX_RENDER_DISTANCE: u32 = 64;

/// A chunk column's horizontal index. `.x` is the x index, `.y` is the z index.
pub type ChunkCoord = Point2<i32>;
/// A voxel's integer coordinate in the world.
pub type VoxelCoord = Point3<i32>;
/// A voxel's coordinate inside its chunk.
pub type LocalCoord = Point3<usize>;

/// Placement of the voxel grid in world space.
///
/// The voxel with coordinate `(0, 0, 0)` has its minimum corner at `origin`, and every
/// voxel is a cube with edge `voxel_size`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldFrame {
    pub origin: [f32; 3],
    pub voxel_size: f32,
}

impl Default for WorldFrame {
    fn default() -> Self {
        WorldFrame {
            origin: [0.0; 3],
            voxel_size: 1.0,
        }
    }
}

impl WorldFrame {
    /// The origin as a point.
    pub fn origin(&self) -> Point3<f32> {
        Point3::from(self.origin)
    }

    /// Converts a world position into the coordinate of the voxel that contains it.
    ///
    /// Each axis is floored, never truncated, so positions just below zero land in voxel -1.
    pub fn world_position_to_voxel_coord(&self, world_position: Point3<f32>) -> VoxelCoord {
        let relative = world_position - self.origin();
        Point3::new(
            (relative.x / self.voxel_size).floor() as i32,
            (relative.y / self.voxel_size).floor() as i32,
            (relative.z / self.voxel_size).floor() as i32,
        )
    }

    /// The world position of a voxel's minimum corner.
    pub fn voxel_coord_to_world_position(&self, voxel: VoxelCoord) -> Point3<f32> {
        self.origin()
            + Vector3::new(voxel.x as f32, voxel.y as f32, voxel.z as f32) * self.voxel_size
    }

    /// The world position of a chunk's minimum corner.
    pub fn chunk_world_origin(&self, chunk: ChunkCoord) -> Point3<f32> {
        self.voxel_coord_to_world_position(chunk_coord_to_voxel_origin(chunk))
    }

    /// Shorthand for `voxel_coord_to_chunk_coord(world_position_to_voxel_coord(p))`.
    pub fn world_position_to_chunk_coord(&self, world_position: Point3<f32>) -> ChunkCoord {
        voxel_coord_to_chunk_coord(self.world_position_to_voxel_coord(world_position))
    }
}

/// The chunk column containing a voxel, using floor division on x and z.
pub fn voxel_coord_to_chunk_coord(voxel: VoxelCoord) -> ChunkCoord {
    Point2::new(
        voxel.x.div_euclid(CHUNK_WIDTH),
        voxel.z.div_euclid(CHUNK_WIDTH),
    )
}

/// A voxel's position inside its chunk. x and z always land in `0..CHUNK_WIDTH`.
///
/// `y` is carried through unchanged; callers check `is_within_height` first.
pub fn voxel_coord_to_local_coord(voxel: VoxelCoord) -> LocalCoord {
    Point3::new(
        voxel.x.rem_euclid(CHUNK_WIDTH) as usize,
        voxel.y.max(0) as usize,
        voxel.z.rem_euclid(CHUNK_WIDTH) as usize,
    )
}

/// The voxel coordinate of a chunk's minimum corner: `(x, 0, z) * CHUNK_WIDTH`.
pub fn chunk_coord_to_voxel_origin(chunk: ChunkCoord) -> VoxelCoord {
    Point3::new(chunk.x * CHUNK_WIDTH, 0, chunk.y * CHUNK_WIDTH)
}

/// Rebuilds a world voxel coordinate from a chunk and a local coordinate.
pub fn local_to_voxel_coord(chunk: ChunkCoord, local: LocalCoord) -> VoxelCoord {
    let origin = chunk_coord_to_voxel_origin(chunk);
    Point3::new(
        origin.x + local.x as i32,
        origin.y + local.y as i32,
        origin.z + local.z as i32,
    )
}

/// Whether `y` lies inside the world's vertical extent `[0, CHUNK_HEIGHT)`.
pub fn is_within_height(y: i32) -> bool {
    (0..CHUNK_HEIGHT).contains(&y)
}

/// Whether a local coordinate addresses a voxel of a chunk.
pub fn is_local_in_chunk(local: LocalCoord) -> bool {
    local.x < CHUNK_WIDTH as usize && local.y < CHUNK_HEIGHT as usize && local.z < CHUNK_WIDTH as usize
}

/// Every chunk coordinate within `distance` of `center` on both axes (a square ring,
/// `(2 * distance + 1)²` coordinates), in x-major order.
///
/// `distance` is capped at `MAX_RENDER_DISTANCE`. Coordinates that would overflow
/// `i32` are left out.
pub fn chunks_within_distance(center: ChunkCoord, distance: u32) -> Vec<ChunkCoord> {
    let distance = distance.min(MAX_RENDER_DISTANCE) as i32;
    let side = (2 * distance + 1) as usize;
    let mut coords = Vec::with_capacity(side * side);
    for x in center.x.saturating_sub(distance)..=center.x.saturating_add(distance) {
        for z in center.y.saturating_sub(distance)..=center.y.saturating_add(distance) {
            coords.push(Point2::new(x, z));
        }
    }
    coords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_voxel_maps_to_the_chunk_that_contains_it() {
        let voxel = Point3::new(-1, 5, -1);
        let chunk = voxel_coord_to_chunk_coord(voxel);
        let local = voxel_coord_to_local_coord(voxel);
        let origin = chunk_coord_to_voxel_origin(chunk);

        assert_eq!(chunk, Point2::new(-1, -1));
        assert_eq!(local, Point3::new(15, 5, 15));
        assert_eq!(origin, Point3::new(-16, 0, -16));
        assert_eq!(local_to_voxel_coord(chunk, local), voxel);
    }

    #[test]
    fn chunk_edges_are_assigned_by_floor_division() {
        assert_eq!(voxel_coord_to_chunk_coord(Point3::new(0, 0, 0)), Point2::new(0, 0));
        assert_eq!(voxel_coord_to_chunk_coord(Point3::new(15, 0, 15)), Point2::new(0, 0));
        assert_eq!(voxel_coord_to_chunk_coord(Point3::new(16, 0, -16)), Point2::new(1, -1));
        assert_eq!(voxel_coord_to_chunk_coord(Point3::new(-17, 0, -32)), Point2::new(-2, -2));
        assert_eq!(voxel_coord_to_local_coord(Point3::new(-16, 3, -17)), Point3::new(0, 3, 15));
    }

    #[test]
    fn world_positions_are_floored() {
        let frame = WorldFrame::default();
        assert_eq!(
            frame.world_position_to_voxel_coord(Point3::new(-0.25, 0.5, 3.99)),
            Point3::new(-1, 0, 3)
        );

        let scaled = WorldFrame {
            origin: [10.0, 0.0, -10.0],
            voxel_size: 0.5,
        };
        assert_eq!(
            scaled.world_position_to_voxel_coord(Point3::new(9.9, 1.0, -10.0)),
            Point3::new(-1, 2, 0)
        );
        assert_eq!(
            scaled.voxel_coord_to_world_position(Point3::new(-1, 2, 0)),
            Point3::new(9.5, 1.0, -10.0)
        );
        assert_eq!(
            scaled.world_position_to_chunk_coord(Point3::new(9.9, 1.0, -10.0)),
            Point2::new(-1, 0)
        );
    }

    #[test]
    fn height_bounds() {
        assert!(is_within_height(0));
        assert!(is_within_height(CHUNK_HEIGHT - 1));
        assert!(!is_within_height(-1));
        assert!(!is_within_height(CHUNK_HEIGHT));
    }

    #[test]
    fn ring_is_square_and_centered() {
        let ring = chunks_within_distance(Point2::new(-3, 2), 1);
        assert_eq!(ring.len(), 9);
        assert!(ring.contains(&Point2::new(-4, 1)));
        assert!(ring.contains(&Point2::new(-2, 3)));
        assert!(!ring.contains(&Point2::new(-1, 2)));
        assert_eq!(chunks_within_distance(Point2::new(0, 0), 0), vec![Point2::new(0, 0)]);
    }

    #[test]
    fn ring_distance_is_capped() {
        let side = (2 * MAX_RENDER_DISTANCE + 1) as usize;
        assert_eq!(chunks_within_distance(Point2::new(0, 0), u32::MAX).len(), side * side);

        let edge = chunks_within_distance(Point2::new(i32::MAX, i32::MIN), 2);
        assert_eq!(edge.len(), 9);
        assert!(edge.contains(&Point2::new(i32::MAX, i32::MIN)));
    }
}
