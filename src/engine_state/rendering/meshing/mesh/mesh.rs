//! Mesh data structures and the culled mesher.
//!
//! This module turns a chunk's voxels into the three parallel lists a scene graph
//! consumes: vertex positions, triangle indices and per-vertex UVs. Every exposed face
//! of a non-air voxel becomes its own quad; faces are never merged.

use cgmath::Point3;
use log::trace;
use web_time::Instant;

use crate::engine_state::{
    rendering::{texture::TextureAtlas, vertex::MeshVertex},
    voxels::{
        block::{block_side::BlockSide, BlockCatalog},
        chunk::{VoxelGrid, VoxelSource},
        coords::{is_within_height, local_to_voxel_coord, ChunkCoord, CHUNK_WIDTH},
    },
};

use super::face::Face;

/// The surface mesh of one chunk, in chunk-local space.
///
/// Positions are relative to the chunk's world origin (see `WorldFrame::chunk_world_origin`)
/// and already scaled by the voxel size.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMesh {
    /// Four vertices per quad
    pub vertices: Vec<[f32; 3]>,
    /// Three indices per triangle, two triangles per quad
    pub triangles: Vec<u32>,
    /// One UV pair per vertex
    pub uvs: Vec<[f32; 2]>,
}

impl ChunkMesh {
    /// Builds the culled mesh of a chunk.
    ///
    /// For every non-air voxel and every side, the neighbouring voxel is looked up:
    /// inside the grid directly, across a horizontal chunk edge through `surroundings`,
    /// and above or below the world as air. A quad is emitted only where the neighbour
    /// is not solid.
    ///
    /// # Arguments
    /// * `coord` - The chunk being meshed, used to address `surroundings`
    /// * `grid` - The chunk's voxels
    /// * `catalog` - Solidity and per-face texture lookups
    /// * `atlas` - Maps texture indices to UVs
    /// * `voxel_size` - Edge length of one voxel in scene units
    /// * `surroundings` - Voxels outside the chunk
    pub fn build_culled(
        coord: ChunkCoord,
        grid: &VoxelGrid,
        catalog: &BlockCatalog,
        atlas: &TextureAtlas,
        voxel_size: f32,
        surroundings: &dyn VoxelSource,
    ) -> Self {
        let start = Instant::now();
        let mut mesh = ChunkMesh::default();

        for (local, block) in grid.iter_non_air() {
            let position = Point3::new(local.x as i32, local.y as i32, local.z as i32);
            for side in BlockSide::all() {
                let neighbour = position + side.normal();
                if is_neighbour_solid(coord, grid, catalog, surroundings, neighbour) {
                    continue;
                }
                if let Some(texture_index) = catalog.texture_index(block, side) {
                    mesh.push_face(&Face::new(position, side, texture_index), atlas, voxel_size);
                }
            }
        }

        trace!(
            "Meshed chunk {:?}: {} quads in {:?}",
            coord,
            mesh.quad_count(),
            start.elapsed()
        );
        mesh
    }

    /// Appends one quad.
    pub fn push_face(&mut self, face: &Face, atlas: &TextureAtlas, voxel_size: f32) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(face.vertices(voxel_size));
        self.uvs.extend(atlas.uv_quad(face.texture_index));
        self.triangles.extend(Self::generate_face_indices(base));
    }

    /// Indices for one quad whose first vertex is `base`: triangles `(0, 1, 2)` and `(2, 1, 3)`.
    pub fn generate_face_indices(base: u32) -> [u32; 6] {
        [base, base + 1, base + 2, base + 2, base + 1, base + 3]
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Positions and UVs interleaved into a single vertex list.
    pub fn interleaved(&self) -> Vec<MeshVertex> {
        self.vertices
            .iter()
            .zip(&self.uvs)
            .map(|(position, uv)| MeshVertex::new(*position, *uv))
            .collect()
    }
}

fn is_neighbour_solid(
    coord: ChunkCoord,
    grid: &VoxelGrid,
    catalog: &BlockCatalog,
    surroundings: &dyn VoxelSource,
    neighbour: Point3<i32>,
) -> bool {
    if !is_within_height(neighbour.y) {
        return false;
    }

    let inside = (0..CHUNK_WIDTH).contains(&neighbour.x) && (0..CHUNK_WIDTH).contains(&neighbour.z);
    if inside {
        return grid.is_solid(Point3::new(
            neighbour.x as usize,
            neighbour.y as usize,
            neighbour.z as usize,
        ));
    }

    let origin = local_to_voxel_coord(coord, Point3::new(0, 0, 0));
    let voxel = Point3::new(
        origin.x + neighbour.x,
        neighbour.y,
        origin.z + neighbour.z,
    );
    catalog.is_solid(surroundings.block_at(voxel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::{
        block::{BlockId, AIR},
        chunk::EmptySurroundings,
        coords::{voxel_coord_to_chunk_coord, VoxelCoord, CHUNK_HEIGHT},
    };
    use cgmath::Point2;

    /// Everything outside the chunk is the same block.
    struct Filled(BlockId);

    impl VoxelSource for Filled {
        fn block_at(&self, _voxel: VoxelCoord) -> BlockId {
            self.0
        }
    }

    fn grid_with(catalog: &BlockCatalog, voxels: &[(Point3<usize>, BlockId)]) -> VoxelGrid {
        let mut grid = VoxelGrid::filled(AIR, catalog);
        for (local, block) in voxels {
            grid.set(*local, *block, catalog);
        }
        grid
    }

    fn mesh(grid: &VoxelGrid, surroundings: &dyn VoxelSource) -> ChunkMesh {
        ChunkMesh::build_culled(
            Point2::new(0, 0),
            grid,
            &BlockCatalog::default(),
            &TextureAtlas::default(),
            1.0,
            surroundings,
        )
    }

    #[test]
    fn single_voxel_has_six_faces() {
        let catalog = BlockCatalog::default();
        let grid = grid_with(&catalog, &[(Point3::new(4, 10, 4), 1)]);
        let mesh = mesh(&grid, &EmptySurroundings);

        assert_eq!(mesh.quad_count(), 6);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.uvs.len(), 24);
        assert_eq!(mesh.triangles.len(), 36);
    }

    #[test]
    fn shared_face_between_adjacent_voxels_is_culled() {
        let catalog = BlockCatalog::default();
        let grid = grid_with(
            &catalog,
            &[(Point3::new(4, 10, 4), 1), (Point3::new(5, 10, 4), 1)],
        );
        let mesh = mesh(&grid, &EmptySurroundings);

        assert_eq!(mesh.quad_count(), 10);
        // No quad lies on the shared plane x = 5.
        for quad in mesh.vertices.chunks(4) {
            assert!(!quad.iter().all(|v| v[0] == 5.0));
        }
    }

    #[test]
    fn solid_neighbours_across_chunk_edges_hide_faces() {
        let catalog = BlockCatalog::default();
        let grid = grid_with(&catalog, &[(Point3::new(0, 10, 15), 1)]);

        assert_eq!(mesh(&grid, &EmptySurroundings).quad_count(), 6);
        // Left and front faces now look into solid stone in the neighbouring chunks.
        assert_eq!(mesh(&grid, &Filled(1)).quad_count(), 4);
    }

    #[test]
    fn world_floor_and_ceiling_count_as_open() {
        let catalog = BlockCatalog::default();
        let grid = grid_with(
            &catalog,
            &[
                (Point3::new(3, 0, 3), 6),
                (Point3::new(3, CHUNK_HEIGHT as usize - 1, 3), 1),
            ],
        );
        let mesh = mesh(&grid, &Filled(1));
        assert_eq!(mesh.quad_count(), 12);
    }

    #[test]
    fn surroundings_are_asked_in_world_coordinates() {
        struct OnlyChunk(ChunkCoord);
        impl VoxelSource for OnlyChunk {
            fn block_at(&self, voxel: VoxelCoord) -> BlockId {
                if voxel_coord_to_chunk_coord(voxel) == self.0 {
                    1
                } else {
                    AIR
                }
            }
        }

        let catalog = BlockCatalog::default();
        let grid = grid_with(&catalog, &[(Point3::new(15, 20, 7), 1)]);
        let coord = Point2::new(-3, 2);
        let mesh = ChunkMesh::build_culled(
            coord,
            &grid,
            &catalog,
            &TextureAtlas::default(),
            1.0,
            &OnlyChunk(Point2::new(-2, 2)),
        );
        assert_eq!(mesh.quad_count(), 5);
    }

    #[test]
    fn uvs_follow_the_face_texture() {
        let catalog = BlockCatalog::default();
        let atlas = TextureAtlas::default();
        let grass = catalog.lookup_by_name("grass").unwrap();
        let grid = grid_with(&catalog, &[(Point3::new(1, 1, 1), grass)]);
        let mesh = mesh(&grid, &EmptySurroundings);

        let top = BlockSide::TOP.index();
        let expected = atlas.uv_quad(catalog.texture_index(grass, BlockSide::TOP).unwrap());
        assert_eq!(mesh.uvs[top * 4..top * 4 + 4], expected);
    }

    #[test]
    fn interleaving_pairs_each_position_with_its_uv() {
        let catalog = BlockCatalog::default();
        let grid = grid_with(&catalog, &[(Point3::new(0, 1, 0), 1)]);
        let mesh = mesh(&grid, &EmptySurroundings);
        let vertices = mesh.interleaved();

        assert_eq!(vertices.len(), mesh.vertices.len());
        assert_eq!(vertices[5].position, mesh.vertices[5]);
        assert_eq!(vertices[5].tex_coords, mesh.uvs[5]);
    }

    #[test]
    fn quad_indices() {
        assert_eq!(ChunkMesh::generate_face_indices(8), [8, 9, 10, 10, 9, 11]);
    }
}
