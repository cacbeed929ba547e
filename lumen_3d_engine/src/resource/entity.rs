/// Entity, Object and Light resources.
///
/// Each of them owns one node of the manager's EntityTree, created detached
/// on load and removed on unload. The owning scene decides where the node
/// is attached.

use crate::error::Result;
use crate::scene::{EntityKey, EntityKind, LightParams};
use crate::engine_warn;
use super::manifest::{EntityDesc, LightManifest, ObjectManifest, ResourceKind};
use super::material::DEFAULT_MATERIAL;
use super::resource::{ResourceKey, UnloadContext};
use super::resource_manager::ResourceManager;

fn remove_node(node: &mut Option<EntityKey>, ctx: &mut UnloadContext) {
    if let Some(node) = node.take() {
        ctx.entities.remove(node);
    }
}

// ===== ENTITY =====

/// Plain transform node
#[derive(Debug, Default)]
pub struct EntityResource {
    node: Option<EntityKey>,
}

impl EntityResource {
    pub fn node(&self) -> Option<EntityKey> {
        self.node
    }

    pub(crate) fn load(&mut self, name: &str, manifest: &EntityDesc, rm: &mut ResourceManager) -> Result<()> {
        self.node = Some(rm.entities_mut().create(name, manifest.transform, EntityKind::Node));
        Ok(())
    }

    pub(crate) fn unload(&mut self, ctx: &mut UnloadContext) {
        remove_node(&mut self.node, ctx);
    }
}

// ===== OBJECT =====

/// Drawable entity: shares a material and a mesh
#[derive(Debug, Default)]
pub struct Object {
    node: Option<EntityKey>,
    material: Option<ResourceKey>,
    mesh: Option<ResourceKey>,
}

impl Object {
    pub fn node(&self) -> Option<EntityKey> {
        self.node
    }

    pub fn material(&self) -> Option<ResourceKey> {
        self.material
    }

    pub fn mesh(&self) -> Option<ResourceKey> {
        self.mesh
    }

    pub(crate) fn load(&mut self, name: &str, manifest: &ObjectManifest, rm: &mut ResourceManager) -> Result<()> {
        let material_name = match manifest.material.as_deref() {
            Some(material) => material,
            None => {
                engine_warn!(rm.log(), "lumen3d::Object",
                    "'{}' has no material, using {}", name, DEFAULT_MATERIAL);
                DEFAULT_MATERIAL
            }
        };
        let material = rm.load_dependency(name, material_name, ResourceKind::Material)?;
        self.material = Some(material);

        let mesh = rm.load_dependency(name, &manifest.mesh, ResourceKind::Mesh)?;
        self.mesh = Some(mesh);

        let kind = EntityKind::Object { material, mesh };
        self.node = Some(rm.entities_mut().create(name, manifest.entity.transform, kind));
        Ok(())
    }

    pub(crate) fn unload(&mut self, ctx: &mut UnloadContext) {
        remove_node(&mut self.node, ctx);
        if let Some(key) = self.material.take() {
            ctx.release(key);
        }
        if let Some(key) = self.mesh.take() {
            ctx.release(key);
        }
    }
}

// ===== LIGHT =====

#[derive(Debug, Default)]
pub struct Light {
    node: Option<EntityKey>,
    params: Option<LightParams>,
}

impl Light {
    pub fn node(&self) -> Option<EntityKey> {
        self.node
    }

    /// Photometric data, None while unloaded
    pub fn params(&self) -> Option<&LightParams> {
        self.params.as_ref()
    }

    pub(crate) fn load(&mut self, name: &str, manifest: &LightManifest, rm: &mut ResourceManager) -> Result<()> {
        let params = LightParams {
            light_type: manifest.light_type,
            diffuse: manifest.diffuse,
            specular: manifest.specular,
            power: manifest.power,
            attenuation: manifest.attenuation,
            spot_cutoff: manifest.spot_cutoff,
        };
        self.node = Some(rm.entities_mut().create(name, manifest.entity.transform, EntityKind::Light(params)));
        self.params = Some(params);
        Ok(())
    }

    pub(crate) fn unload(&mut self, ctx: &mut UnloadContext) {
        remove_node(&mut self.node, ctx);
        self.params = None;
    }
}
