/// Filesystem asset loader (image + tobj)

use std::path::{Path, PathBuf};
use image::{DynamicImage, GenericImageView, ImageError};
use crate::error::{Error, Result};
use super::asset_loader::{AssetLoader, ImageData, MeshData, Vertex3DTN};

/// Loads assets from a directory on disk
#[derive(Debug, Clone)]
pub struct FsAssetLoader {
    root: PathBuf,
}

impl FsAssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        if path.is_empty() {
            return Err(Error::EmptyName);
        }
        Ok(self.root.join(path))
    }
}

impl AssetLoader for FsAssetLoader {
    fn read_text(&self, path: &str) -> Result<String> {
        let full = self.resolve(path)?;
        std::fs::read_to_string(&full)
            .map_err(|e| Error::Io(format!("{}: {}", full.display(), e)))
    }

    fn load_image(&self, path: &str) -> Result<ImageData> {
        let full = self.resolve(path)?;
        let img = image::open(&full).map_err(|e| match e {
            ImageError::IoError(io) => Error::Io(format!("{}: {}", full.display(), io)),
            other => Error::Parse(format!("{}: {}", full.display(), other)),
        })?;

        let (width, height) = img.dimensions();
        let (channels, pixels) = match img {
            DynamicImage::ImageLuma8(buf) => (1, buf.into_raw()),
            DynamicImage::ImageRgb8(buf) => (3, buf.into_raw()),
            DynamicImage::ImageRgba8(buf) => (4, buf.into_raw()),
            other => (4, other.into_rgba8().into_raw()),
        };

        Ok(ImageData { width, height, channels, pixels })
    }

    fn load_mesh(&self, path: &str) -> Result<MeshData> {
        let full = self.resolve(path)?;
        let (models, _materials) = tobj::load_obj(&full, &tobj::GPU_LOAD_OPTIONS)
            .map_err(|e| Error::Parse(format!("{}: {}", full.display(), e)))?;

        let Some(model) = models.first() else {
            return Err(Error::Parse(format!("{}: no mesh found", full.display())));
        };
        let mesh = &model.mesh;

        let vertex_count = mesh.positions.len() / 3;
        let vertices = (0..vertex_count)
            .map(|i| {
                let uv = if mesh.texcoords.len() >= (i + 1) * 2 {
                    [mesh.texcoords[i * 2], mesh.texcoords[i * 2 + 1]]
                } else {
                    [0.0, 0.0]
                };
                let normal = if mesh.normals.len() >= (i + 1) * 3 {
                    [mesh.normals[i * 3], mesh.normals[i * 3 + 1], mesh.normals[i * 3 + 2]]
                } else {
                    [0.0, 0.0, 0.0]
                };
                Vertex3DTN::new(
                    [mesh.positions[i * 3], mesh.positions[i * 3 + 1], mesh.positions[i * 3 + 2]],
                    uv,
                    normal,
                )
            })
            .collect();

        Ok(MeshData {
            vertices,
            indices: mesh.indices.clone(),
            mesh_count: models.len(),
        })
    }
}
