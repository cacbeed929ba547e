/// AssetLoader trait - file access for resource loading
///
/// Resources never open files themselves. Paths are relative to the
/// configured resource directory ("textures/brick.png", "shaders/basic.vs").

use bytemuck::{Pod, Zeroable};
use crate::error::Result;

/// Decoded image, 8 bits per channel, rows tightly packed
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub channels: u32,
    pub pixels: Vec<u8>,
}

/// Interleaved vertex: position, texture coordinates, normal
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex3DTN {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
}

impl Vertex3DTN {
    pub const fn new(position: [f32; 3], uv: [f32; 2], normal: [f32; 3]) -> Self {
        Self { position, uv, normal }
    }
}

/// Imported mesh geometry
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex3DTN>,
    /// Empty when the geometry is not indexed
    pub indices: Vec<u32>,
    /// Number of meshes found in the source file (only the first is kept)
    pub mesh_count: usize,
}

/// Asset import collaborator
pub trait AssetLoader: Send + Sync {
    /// Read a whole text file (shader sources, JSON manifests)
    fn read_text(&self, path: &str) -> Result<String>;

    /// Decode an image file
    fn load_image(&self, path: &str) -> Result<ImageData>;

    /// Import a mesh file
    fn load_mesh(&self, path: &str) -> Result<MeshData>;
}
