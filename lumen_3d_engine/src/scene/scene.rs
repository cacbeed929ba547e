//! Scene resource and its render index.
//!
//! Loading a scene creates a root node named `<scene>_rootNode`, loads every
//! object and light it lists, hangs them under their declared parents (or
//! under the root) and walks the tree once to build:
//!
//! - a **RenderMap**: material -> objects drawn with it, in traversal order
//! - a **LightList**: every light, in traversal order
//!
//! Both hold keys into the manager's EntityTree and are rebuilt in full,
//! never patched.

use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::resource::{ResourceKey, ResourceKind, ResourceManager, SceneManifest, UnloadContext};
use crate::{engine_error, engine_info, engine_warn};
use super::entity_tree::{EntityKey, EntityKind, EntityTree, Transform};

const SOURCE: &str = "lumen3d::Scene";

// ===== RENDER INDEX =====

/// Material -> objects using it
///
/// Buckets keep insertion order; iteration order across materials is
/// unspecified.
#[derive(Debug, Default, Clone)]
pub struct RenderMap {
    buckets: FxHashMap<ResourceKey, Vec<EntityKey>>,
}

impl RenderMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, material: ResourceKey, object: EntityKey) {
        self.buckets.entry(material).or_default().push(object);
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
    }

    /// Objects drawn with `material` (empty if none)
    pub fn get(&self, material: ResourceKey) -> &[EntityKey] {
        self.buckets.get(&material).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of materials
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of objects across all buckets
    pub fn object_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceKey, &[EntityKey])> {
        self.buckets.iter().map(|(&material, objects)| (material, objects.as_slice()))
    }
}

/// Lights of a scene, in traversal order
pub type LightList = Vec<EntityKey>;

// ===== SCENE =====

#[derive(Debug, Default)]
pub struct Scene {
    root: Option<EntityKey>,
    objects: Vec<ResourceKey>,
    lights: Vec<ResourceKey>,
    render_map: RenderMap,
    light_list: LightList,
}

impl Scene {
    /// Synthetic root node, None while unloaded
    pub fn root(&self) -> Option<EntityKey> {
        self.root
    }

    /// Object resources held by the scene, in manifest order
    pub fn objects(&self) -> &[ResourceKey] {
        &self.objects
    }

    /// Light resources held by the scene, in manifest order
    pub fn lights(&self) -> &[ResourceKey] {
        &self.lights
    }

    pub fn render_map(&self) -> &RenderMap {
        &self.render_map
    }

    pub fn light_list(&self) -> &LightList {
        &self.light_list
    }

    pub(crate) fn load(&mut self, name: &str, manifest: &SceneManifest, rm: &mut ResourceManager) -> Result<()> {
        let root = rm
            .entities_mut()
            .create(format!("{}_rootNode", name), Transform::default(), EntityKind::Node);
        self.root = Some(root);

        for object in &manifest.objects {
            self.objects.push(rm.load_dependency(name, object, ResourceKind::Object)?);
        }
        for light in &manifest.lights {
            self.lights.push(rm.load_dependency(name, light, ResourceKind::Light)?);
        }

        let moved = self.attach_members(name, root, rm);
        rm.entities_mut().update(root, 0.0);
        if moved {
            rm.rebuild_scene_indices();
        }
        self.rebuild_index(rm.entities());

        engine_info!(rm.log(), SOURCE, "'{}' loaded: {} materials, {} objects, {} lights",
            name, self.render_map.len(), self.render_map.object_count(), self.light_list.len());
        Ok(())
    }

    /// Attach every member node under its declared parent, or the root
    ///
    /// Returns true if a member was taken over from another scene's tree.
    fn attach_members(&self, name: &str, root: EntityKey, rm: &mut ResourceManager) -> bool {
        let members: Vec<(EntityKey, Option<String>)> = self
            .objects
            .iter()
            .chain(&self.lights)
            .filter_map(|&key| {
                let resource = rm.resource(key)?;
                let parent = resource.manifest().entity_desc().and_then(|d| d.parent.clone());
                Some((resource.entity_key()?, parent))
            })
            .collect();

        let by_name: FxHashMap<String, EntityKey> = members
            .iter()
            .filter_map(|&(node, _)| rm.entities().get(node).map(|e| (e.name().to_string(), node)))
            .collect();

        let log = rm.log().clone();
        let tree = rm.entities_mut();
        // A member hanging under a node outside this scene is held by another one
        let mut moved = false;
        for &(node, _) in &members {
            let top = tree.top(node);
            if top != node && !by_name.values().any(|&member| member == top) {
                if let Some(entity) = tree.get(node) {
                    engine_warn!(log, SOURCE,
                        "'{}': '{}' already belongs to another scene, moving it here", name, entity.name());
                }
                moved = true;
            }
        }

        for (node, parent) in members {
            let target = match parent.as_deref() {
                None => root,
                Some(parent) => match by_name.get(parent) {
                    Some(&parent_node) if parent_node != node => parent_node,
                    _ => {
                        engine_warn!(log, SOURCE,
                            "'{}': parent '{}' not found in the scene, attaching to root", name, parent);
                        root
                    }
                },
            };

            if let Err(err) = tree.set_parent(node, Some(target)) {
                engine_warn!(log, SOURCE, "'{}': {}, attaching to root", name, err);
                if let Err(err) = tree.set_parent(node, Some(root)) {
                    engine_error!(log, SOURCE, "'{}': {}", name, err);
                }
            }
        }
        moved
    }

    /// Rebuild the RenderMap and LightList from a full walk of the tree
    pub fn rebuild_index(&mut self, tree: &EntityTree) {
        self.render_map.clear();
        self.light_list.clear();
        let Some(root) = self.root else {
            return;
        };
        for key in tree.walk(root) {
            match tree.get(key).map(|e| *e.kind()) {
                Some(EntityKind::Object { material, .. }) => self.render_map.push(material, key),
                Some(EntityKind::Light(_)) => self.light_list.push(key),
                _ => {}
            }
        }
    }

    pub(crate) fn unload(&mut self, ctx: &mut UnloadContext) {
        if let Some(root) = self.root.take() {
            ctx.entities.remove(root);
        }
        for key in self.objects.drain(..).chain(self.lights.drain(..)) {
            ctx.release(key);
        }
        self.render_map.clear();
        self.light_list.clear();
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
