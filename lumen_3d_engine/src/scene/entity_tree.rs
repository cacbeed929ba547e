/// Entity hierarchy - parent/child transform tree.
///
/// Entities live in a SlotMap arena. A node's parent is a non-owning key and
/// its children an ordered list of keys. The tree keeps both directions in
/// sync: a node appears in exactly one parent's child list, and only in the
/// list of the parent its back link names.

use glam::{Mat4, Vec3};
use slotmap::{new_key_type, SlotMap};
use crate::error::{Error, Result};
use crate::log::Log;
use crate::resource::{LightType, ResourceKey};
use crate::engine_warn;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for an Entity within an EntityTree.
    pub struct EntityKey;
}

// ===== TRANSFORM =====

/// Local transform (rotation as Euler angles in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Local-to-parent matrix: translate, rotate Y, rotate X, rotate Z, scale
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_z(self.rotation.z)
            * Mat4::from_scale(self.scale)
    }
}

// ===== ENTITY =====

/// Photometric data carried by Light nodes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightParams {
    pub light_type: LightType,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub power: f32,
    pub attenuation: f32,
    pub spot_cutoff: f32,
}

/// What a node stands for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityKind {
    /// Plain transform node (scene roots, Entity resources)
    Node,
    /// Drawable: material and mesh resources it renders with
    Object {
        material: ResourceKey,
        mesh: ResourceKey,
    },
    Light(LightParams),
}

#[derive(Debug, Clone)]
pub struct Entity {
    name: String,
    transform: Transform,
    world: Mat4,
    parent: Option<EntityKey>,
    children: Vec<EntityKey>,
    kind: EntityKind,
}

impl Entity {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Mutable local transform (world matrix is refreshed by `EntityTree::update`)
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Local-to-world matrix as of the last update
    pub fn world(&self) -> Mat4 {
        self.world
    }

    pub fn parent(&self) -> Option<EntityKey> {
        self.parent
    }

    pub fn children(&self) -> &[EntityKey] {
        &self.children
    }

    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }
}

// ===== ENTITY TREE =====

pub struct EntityTree {
    nodes: SlotMap<EntityKey, Entity>,
    log: Log,
}

impl EntityTree {
    pub fn new(log: Log) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            log,
        }
    }

    /// Create a detached node with an identity world matrix
    pub fn create(&mut self, name: impl Into<String>, transform: Transform, kind: EntityKind) -> EntityKey {
        self.nodes.insert(Entity {
            name: name.into(),
            transform,
            world: Mat4::IDENTITY,
            parent: None,
            children: Vec::new(),
            kind,
        })
    }

    /// Remove a node
    ///
    /// The node is detached from its parent and its children become
    /// detached roots.
    pub fn remove(&mut self, key: EntityKey) -> Option<Entity> {
        let entity = self.nodes.remove(key)?;
        if let Some(parent) = entity.parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|&c| c != key);
        }
        for &child in &entity.children {
            if let Some(child) = self.nodes.get_mut(child) {
                child.parent = None;
            }
        }
        Some(entity)
    }

    pub fn get(&self, key: EntityKey) -> Option<&Entity> {
        self.nodes.get(key)
    }

    pub fn get_mut(&mut self, key: EntityKey) -> Option<&mut Entity> {
        self.nodes.get_mut(key)
    }

    pub fn contains(&self, key: EntityKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, key: EntityKey) -> Option<EntityKey> {
        self.nodes.get(key).and_then(|e| e.parent)
    }

    pub fn children(&self, key: EntityKey) -> &[EntityKey] {
        self.nodes.get(key).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    /// Whether `ancestor` is `key` itself or one of its ancestors
    pub fn is_ancestor(&self, ancestor: EntityKey, key: EntityKey) -> bool {
        let mut current = Some(key);
        while let Some(k) = current {
            if k == ancestor {
                return true;
            }
            current = self.parent(k);
        }
        false
    }

    /// Topmost ancestor of `key` (`key` itself when detached)
    pub fn top(&self, key: EntityKey) -> EntityKey {
        let mut current = key;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    fn entity(&self, key: EntityKey) -> Result<&Entity> {
        self.nodes
            .get(key)
            .ok_or_else(|| Error::InvalidHierarchy(format!("unknown entity {:?}", key)))
    }

    /// Attach `child` under `parent`, or detach it when `parent` is None
    ///
    /// The child leaves its previous parent's list. Attaching to the current
    /// parent leaves the list untouched. Attaching a node under itself or
    /// under one of its descendants fails and changes nothing.
    pub fn set_parent(&mut self, child: EntityKey, parent: Option<EntityKey>) -> Result<()> {
        let old_parent = self.entity(child)?.parent;

        if let Some(p) = parent {
            let parent_name = self.entity(p)?.name.clone();
            if self.is_ancestor(child, p) {
                return Err(Error::InvalidHierarchy(format!(
                    "'{}' cannot be attached under '{}' (cycle)",
                    self.nodes[child].name, parent_name
                )));
            }
        }

        if let Some(old) = old_parent.filter(|&old| Some(old) != parent) {
            if let Some(old) = self.nodes.get_mut(old) {
                old.children.retain(|&c| c != child);
            }
        }

        if let Some(p) = parent {
            let list = &mut self.nodes[p].children;
            if !list.contains(&child) {
                list.push(child);
            }
        }

        self.nodes[child].parent = parent;
        Ok(())
    }

    /// Attach `child` under `parent`, reparenting it if needed
    ///
    /// Adding a node that is already a child succeeds and logs a warning.
    pub fn add_child(&mut self, parent: EntityKey, child: EntityKey) -> Result<()> {
        let parent_entity = self.entity(parent)?;
        if parent_entity.children.contains(&child) && self.parent(child) == Some(parent) {
            engine_warn!(self.log, "lumen3d::EntityTree",
                "'{}' is already a child of '{}'", self.nodes[child].name, parent_entity.name);
            return Ok(());
        }
        self.set_parent(child, Some(parent))
    }

    /// Detach `child` from `parent`; fails if it is not one of its children
    pub fn remove_child(&mut self, parent: EntityKey, child: EntityKey) -> Result<()> {
        let parent_entity = self.entity(parent)?;
        if !parent_entity.children.contains(&child) {
            return Err(Error::InvalidHierarchy(format!(
                "entity {:?} is not a child of '{}'",
                child, parent_entity.name
            )));
        }
        self.nodes[parent].children.retain(|&c| c != child);
        if let Some(child) = self.nodes.get_mut(child) {
            child.parent = None;
        }
        Ok(())
    }

    /// Recompute world matrices of `root` and its whole subtree
    ///
    /// `root` is composed with its parent's current world matrix, so a
    /// subtree can be refreshed on its own.
    pub fn update(&mut self, root: EntityKey, _dt: f32) {
        let parent_world = self
            .parent(root)
            .and_then(|p| self.nodes.get(p))
            .map(|p| p.world)
            .unwrap_or(Mat4::IDENTITY);
        self.update_node(root, parent_world);
    }

    fn update_node(&mut self, key: EntityKey, parent_world: Mat4) {
        let Some(entity) = self.nodes.get_mut(key) else {
            return;
        };
        entity.world = parent_world * entity.transform.local_matrix();
        let world = entity.world;
        let children = entity.children.clone();
        for child in children {
            self.update_node(child, world);
        }
    }

    /// Pre-order traversal of `root`'s subtree, children in insertion order
    pub fn walk(&self, root: EntityKey) -> Vec<EntityKey> {
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(key) = stack.pop() {
            let Some(entity) = self.nodes.get(key) else {
                continue;
            };
            order.push(key);
            stack.extend(entity.children.iter().rev());
        }
        order
    }

    /// Find a node by name (first match)
    pub fn find(&self, name: &str) -> Option<EntityKey> {
        self.nodes.iter().find(|(_, e)| e.name == name).map(|(k, _)| k)
    }
}

#[cfg(test)]
#[path = "entity_tree_tests.rs"]
mod tests;
