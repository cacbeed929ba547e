/// Resource - a live, reference-counted instance built from one manifest.
///
/// The kind-specific state lives in `ResourceData`, a closed enum with one
/// variant per `ResourceKind`. Loading dispatches on it with an exhaustive
/// match; dependencies are requested by name through the ResourceManager so
/// that sharing and reference counting hold transitively.

use std::sync::{Arc, Mutex};
use slotmap::new_key_type;
use crate::error::{Error, Result};
use crate::graphics_device::GraphicsDevice;
use crate::log::Log;
use crate::scene::{EntityKey, EntityTree, Scene};
use crate::engine_error;
use super::entity::{EntityResource, Light, Object};
use super::manifest::{Manifest, ManifestDesc, ResourceKind};
use super::material::Material;
use super::mesh::Mesh;
use super::resource_manager::ResourceManager;
use super::shader::Shader;
use super::texture::Texture;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a Resource within a ResourceManager.
    ///
    /// Cache entries are never evicted, so a key stays valid for the
    /// lifetime of the manager, whether the resource is loaded or not.
    pub struct ResourceKey;
}

// ===== UNLOAD CONTEXT =====

/// Collaborators available while releasing a resource
///
/// Unloading never fails. GPU handles are destroyed through the device,
/// entity nodes removed from the tree, and the keys of dependencies the
/// resource held are collected in `released` for the manager to release.
pub(crate) struct UnloadContext<'a> {
    device: &'a Mutex<dyn GraphicsDevice>,
    pub(crate) entities: &'a mut EntityTree,
    pub(crate) log: &'a Log,
    released: Vec<ResourceKey>,
}

impl<'a> UnloadContext<'a> {
    pub(crate) fn new(
        device: &'a Mutex<dyn GraphicsDevice>,
        entities: &'a mut EntityTree,
        log: &'a Log,
    ) -> Self {
        Self { device, entities, log, released: Vec::new() }
    }

    /// Run `f` against the graphics device, logging a poisoned lock
    pub(crate) fn with_device(&mut self, f: impl FnOnce(&mut dyn GraphicsDevice)) {
        match self.device.lock() {
            Ok(mut device) => f(&mut *device),
            Err(_) => engine_error!(self.log, "lumen3d::Resource",
                "Graphics device lock poisoned, GPU object leaked"),
        }
    }

    /// Hand a dependency back to the manager
    pub(crate) fn release(&mut self, key: ResourceKey) {
        self.released.push(key);
    }

    pub(crate) fn into_released(self) -> Vec<ResourceKey> {
        self.released
    }
}

// ===== RESOURCE DATA =====

/// Kind-specific state of a resource
#[derive(Debug)]
pub enum ResourceData {
    Texture(Texture),
    Material(Material),
    Mesh(Mesh),
    Shader(Shader),
    Entity(EntityResource),
    Object(Object),
    Light(Light),
    Scene(Scene),
}

impl ResourceData {
    /// Unloaded state for a kind
    pub fn empty(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Texture => ResourceData::Texture(Texture::default()),
            ResourceKind::Material => ResourceData::Material(Material::default()),
            ResourceKind::Mesh => ResourceData::Mesh(Mesh::default()),
            ResourceKind::Shader => ResourceData::Shader(Shader::default()),
            ResourceKind::Entity => ResourceData::Entity(EntityResource::default()),
            ResourceKind::Object => ResourceData::Object(Object::default()),
            ResourceKind::Light => ResourceData::Light(Light::default()),
            ResourceKind::Scene => ResourceData::Scene(Scene::default()),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceData::Texture(_) => ResourceKind::Texture,
            ResourceData::Material(_) => ResourceKind::Material,
            ResourceData::Mesh(_) => ResourceKind::Mesh,
            ResourceData::Shader(_) => ResourceKind::Shader,
            ResourceData::Entity(_) => ResourceKind::Entity,
            ResourceData::Object(_) => ResourceKind::Object,
            ResourceData::Light(_) => ResourceKind::Light,
            ResourceData::Scene(_) => ResourceKind::Scene,
        }
    }
}

// ===== RESOURCE =====

#[derive(Debug)]
pub struct Resource {
    manifest: Arc<Manifest>,
    ref_count: u32,
    loaded: bool,
    data: ResourceData,
}

impl Resource {
    /// Unloaded resource bound to `manifest`, with a zero reference count
    pub fn new(manifest: Arc<Manifest>) -> Self {
        let data = ResourceData::empty(manifest.kind());
        Self {
            manifest,
            ref_count: 0,
            loaded: false,
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.manifest.name
    }

    pub fn kind(&self) -> ResourceKind {
        self.manifest.kind()
    }

    pub fn manifest(&self) -> &Arc<Manifest> {
        &self.manifest
    }

    pub fn ref_count(&self) -> u32 {
        self.ref_count
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn data(&self) -> &ResourceData {
        &self.data
    }

    pub fn inc_ref_count(&mut self) {
        self.ref_count += 1;
    }

    /// Drop one reference
    ///
    /// # Panics
    ///
    /// Panics if the count is already zero.
    pub fn dec_ref_count(&mut self) {
        assert!(
            self.ref_count > 0,
            "reference count underflow on resource '{}'",
            self.manifest.name
        );
        self.ref_count -= 1;
    }

    /// Load the kind-specific state
    ///
    /// On failure the resource may hold part of its dependencies; the
    /// caller releases them with `unload`.
    pub(crate) fn load(&mut self, manager: &mut ResourceManager) -> Result<()> {
        let manifest = self.manifest.clone();
        let name = manifest.name.as_str();
        let expected = self.data.kind();
        match (&manifest.desc, &mut self.data) {
            (ManifestDesc::Texture(m), ResourceData::Texture(texture)) => texture.load(name, m, manager)?,
            (ManifestDesc::Material(m), ResourceData::Material(material)) => material.load(name, m, manager)?,
            (ManifestDesc::Mesh, ResourceData::Mesh(mesh)) => mesh.load(name, manager)?,
            (ManifestDesc::Shader(m), ResourceData::Shader(shader)) => shader.load(name, m, manager)?,
            (ManifestDesc::Entity(m), ResourceData::Entity(entity)) => entity.load(name, m, manager)?,
            (ManifestDesc::Object(m), ResourceData::Object(object)) => object.load(name, m, manager)?,
            (ManifestDesc::Light(m), ResourceData::Light(light)) => light.load(name, m, manager)?,
            (ManifestDesc::Scene(m), ResourceData::Scene(scene)) => scene.load(name, m, manager)?,
            (desc, _) => {
                return Err(Error::KindMismatch {
                    name: name.to_string(),
                    expected,
                    found: desc.kind(),
                })
            }
        }
        self.loaded = true;
        Ok(())
    }

    /// Release everything the resource holds
    ///
    /// Safe on a never-loaded or already unloaded resource: each GPU handle,
    /// entity node and dependency is given back exactly once.
    pub(crate) fn unload(&mut self, ctx: &mut UnloadContext) {
        match &mut self.data {
            ResourceData::Texture(texture) => texture.unload(ctx),
            ResourceData::Material(material) => material.unload(ctx),
            ResourceData::Mesh(mesh) => mesh.unload(ctx),
            ResourceData::Shader(shader) => shader.unload(ctx),
            ResourceData::Entity(entity) => entity.unload(ctx),
            ResourceData::Object(object) => object.unload(ctx),
            ResourceData::Light(light) => light.unload(ctx),
            ResourceData::Scene(scene) => scene.unload(ctx),
        }
        self.loaded = false;
    }

    /// Take over the freshly loaded state of `other`, keeping this
    /// resource's reference count
    pub(crate) fn replace_state(&mut self, other: Resource) {
        self.data = other.data;
        self.loaded = other.loaded;
    }

    // ===== DOWNCASTS =====

    pub fn as_texture(&self) -> Option<&Texture> {
        match &self.data {
            ResourceData::Texture(texture) => Some(texture),
            _ => None,
        }
    }

    pub fn as_material(&self) -> Option<&Material> {
        match &self.data {
            ResourceData::Material(material) => Some(material),
            _ => None,
        }
    }

    pub fn as_mesh(&self) -> Option<&Mesh> {
        match &self.data {
            ResourceData::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn as_shader(&self) -> Option<&Shader> {
        match &self.data {
            ResourceData::Shader(shader) => Some(shader),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match &self.data {
            ResourceData::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_light(&self) -> Option<&Light> {
        match &self.data {
            ResourceData::Light(light) => Some(light),
            _ => None,
        }
    }

    pub fn as_scene(&self) -> Option<&Scene> {
        match &self.data {
            ResourceData::Scene(scene) => Some(scene),
            _ => None,
        }
    }

    pub(crate) fn as_scene_mut(&mut self) -> Option<&mut Scene> {
        match &mut self.data {
            ResourceData::Scene(scene) => Some(scene),
            _ => None,
        }
    }

    /// Entity node of Entity, Object and Light resources
    pub fn entity_key(&self) -> Option<EntityKey> {
        match &self.data {
            ResourceData::Entity(entity) => entity.node(),
            ResourceData::Object(object) => object.node(),
            ResourceData::Light(light) => light.node(),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
