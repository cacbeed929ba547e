/// In-memory AssetLoader for unit tests

use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use super::asset_loader::{AssetLoader, ImageData, MeshData, Vertex3DTN};

#[derive(Debug, Default, Clone)]
pub struct MemoryAssetLoader {
    texts: FxHashMap<String, String>,
    images: FxHashMap<String, ImageData>,
    meshes: FxHashMap<String, MeshData>,
}

impl MemoryAssetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, path: &str, text: &str) -> Self {
        self.texts.insert(path.to_string(), text.to_string());
        self
    }

    pub fn with_image(mut self, path: &str, image: ImageData) -> Self {
        self.images.insert(path.to_string(), image);
        self
    }

    /// Add a solid `width` x `height` image with `channels` channels
    pub fn with_solid_image(self, path: &str, width: u32, height: u32, channels: u32) -> Self {
        let pixels = vec![255u8; (width * height * channels) as usize];
        self.with_image(path, ImageData { width, height, channels, pixels })
    }

    pub fn with_mesh(mut self, path: &str, mesh: MeshData) -> Self {
        self.meshes.insert(path.to_string(), mesh);
        self
    }

    /// Add a single triangle mesh, reported as coming from a file holding
    /// `mesh_count` meshes
    pub fn with_triangle(self, path: &str, mesh_count: usize) -> Self {
        let mesh = MeshData {
            vertices: vec![
                Vertex3DTN::new([0.0, 0.0, 0.0], [0.0, 0.0], [0.0, 0.0, 1.0]),
                Vertex3DTN::new([1.0, 0.0, 0.0], [1.0, 0.0], [0.0, 0.0, 1.0]),
                Vertex3DTN::new([0.0, 1.0, 0.0], [0.0, 1.0], [0.0, 0.0, 1.0]),
            ],
            indices: vec![0, 1, 2],
            mesh_count,
        };
        self.with_mesh(path, mesh)
    }
}

impl AssetLoader for MemoryAssetLoader {
    fn read_text(&self, path: &str) -> Result<String> {
        self.texts
            .get(path)
            .cloned()
            .ok_or_else(|| Error::Io(format!("{}: not found", path)))
    }

    fn load_image(&self, path: &str) -> Result<ImageData> {
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| Error::Io(format!("{}: not found", path)))
    }

    fn load_mesh(&self, path: &str) -> Result<MeshData> {
        self.meshes
            .get(path)
            .cloned()
            .ok_or_else(|| Error::Io(format!("{}: not found", path)))
    }
}
