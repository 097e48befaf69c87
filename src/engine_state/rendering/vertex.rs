//! Interleaved vertex format for handing chunk meshes to a GPU.
//!
//! `ChunkMesh` keeps positions and UVs in separate lists, which is what most scene
//! graphs want. Renderers that upload a single vertex buffer can ask for
//! `MeshVertex`es instead and cast the slice straight to bytes.

use bytemuck::{Pod, Zeroable};

/// A single mesh vertex.
///
/// # Memory Layout
/// - Position: 3x f32 (12 bytes), chunk-local, already scaled by the voxel size
/// - Texture Coordinates: 2x f32 (8 bytes)
///
/// Total size: 20 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl MeshVertex {
    pub fn new(position: [f32; 3], tex_coords: [f32; 2]) -> Self {
        MeshVertex {
            position,
            tex_coords,
        }
    }

    /// Size of one vertex in bytes, for describing buffer strides.
    pub const STRIDE: usize = std::mem::size_of::<MeshVertex>();
}
