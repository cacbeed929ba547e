/// Material resource.
///
/// A material owns a sampler and shares its diffuse and normal textures
/// with every other material referencing them. Textures are resolved by
/// manifest name through the ResourceManager, so each one is loaded once
/// and reference counted.

use glam::Vec3;
use crate::error::Result;
use crate::graphics_device::{SamplerDesc, SamplerHandle, TextureFiltering};
use super::manifest::{MaterialManifest, ResourceKind};
use super::resource::{ResourceKey, UnloadContext};
use super::resource_manager::ResourceManager;

/// Name of the built-in material used by objects without one
pub const DEFAULT_MATERIAL: &str = "__default_material__";

#[derive(Debug, Default)]
pub struct Material {
    ambient: Vec3,
    diffuse: Vec3,
    specular: Vec3,
    repeat: [f32; 2],
    filtering: TextureFiltering,
    diffuse_map: Option<ResourceKey>,
    normal_map: Option<ResourceKey>,
    sampler: Option<SamplerHandle>,
}

impl Material {
    // ===== ACCESSORS =====

    pub fn ambient(&self) -> Vec3 {
        self.ambient
    }

    pub fn diffuse(&self) -> Vec3 {
        self.diffuse
    }

    pub fn specular(&self) -> Vec3 {
        self.specular
    }

    pub fn repeat(&self) -> [f32; 2] {
        self.repeat
    }

    pub fn filtering(&self) -> TextureFiltering {
        self.filtering
    }

    /// Diffuse texture resource, if the material has one
    pub fn diffuse_map(&self) -> Option<ResourceKey> {
        self.diffuse_map
    }

    /// Normal texture resource, if the material has one
    pub fn normal_map(&self) -> Option<ResourceKey> {
        self.normal_map
    }

    pub fn sampler(&self) -> Option<SamplerHandle> {
        self.sampler
    }

    // ===== LIFECYCLE =====

    pub(crate) fn load(&mut self, name: &str, manifest: &MaterialManifest, rm: &mut ResourceManager) -> Result<()> {
        // Keys are stored as soon as they are acquired so a failure further
        // down still releases them.
        if let Some(map) = &manifest.diffuse_map {
            self.diffuse_map = Some(rm.load_dependency(name, map, ResourceKind::Texture)?);
        }
        if let Some(map) = &manifest.normal_map {
            self.normal_map = Some(rm.load_dependency(name, map, ResourceKind::Texture)?);
        }

        self.sampler = Some(rm.device()?.create_sampler(&SamplerDesc {
            mipmaps: manifest.mipmapping,
            filtering: manifest.filtering,
        })?);

        self.ambient = manifest.ambient;
        self.diffuse = manifest.diffuse;
        self.specular = manifest.specular;
        self.repeat = manifest.repeat;
        self.filtering = manifest.filtering;
        Ok(())
    }

    pub(crate) fn unload(&mut self, ctx: &mut UnloadContext) {
        if let Some(sampler) = self.sampler.take() {
            ctx.with_device(|device| device.destroy_sampler(sampler));
        }
        if let Some(key) = self.diffuse_map.take() {
            ctx.release(key);
        }
        if let Some(key) = self.normal_map.take() {
            ctx.release(key);
        }
    }
}
