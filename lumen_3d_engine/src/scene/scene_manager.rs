//! Current-scene tracking.
//!
//! Only one scene is current at a time. Loading another one unloads the
//! previous scene first; its objects stay cached until garbage collection.

use crate::error::{Error, Result};
use crate::log::Log;
use crate::resource::{ResourceKey, ResourceManager};
use crate::{engine_bail, engine_info};
use super::scene::Scene;

const SOURCE: &str = "lumen3d::SceneManager";

pub struct SceneManager {
    current: Option<(String, ResourceKey)>,
    log: Log,
}

impl SceneManager {
    pub fn new(log: Log) -> Self {
        Self { current: None, log }
    }

    /// Make `name` the current scene
    ///
    /// The previous current scene is unloaded first, even when the new one
    /// then fails to load.
    pub fn load_scene(&mut self, rm: &mut ResourceManager, name: &str) -> Result<ResourceKey> {
        if name.is_empty() {
            engine_bail!(self.log, SOURCE, Error::EmptyName);
        }
        if rm.get_manifest(name).is_none() {
            engine_bail!(self.log, SOURCE, Error::ManifestNotFound(name.to_string()));
        }

        self.unload_current(rm)?;

        engine_info!(self.log, SOURCE, "Loading scene '{}'", name);
        let key = rm.load_resource(name)?;
        self.current = Some((name.to_string(), key));
        Ok(key)
    }

    /// Unload the current scene, if any
    pub fn unload_current(&mut self, rm: &mut ResourceManager) -> Result<()> {
        if let Some((name, _)) = self.current.take() {
            if rm.is_loaded(&name) {
                rm.unload_resource(&name)?;
            }
        }
        Ok(())
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_ref().map(|(name, _)| name.as_str())
    }

    pub fn current_key(&self) -> Option<ResourceKey> {
        self.current.as_ref().map(|&(_, key)| key)
    }

    /// Current scene, if it is loaded
    pub fn current<'a>(&self, rm: &'a ResourceManager) -> Option<&'a Scene> {
        self.current_key().and_then(|key| rm.scene(key))
    }

    /// Propagate transforms from the current scene root
    pub fn update(&self, rm: &mut ResourceManager, dt: f32) {
        if let Some(root) = self.current(rm).and_then(Scene::root) {
            rm.entities_mut().update(root, dt);
        }
    }

    /// Rebuild the current scene's render index after hierarchy changes
    pub fn rebuild_index(&self, rm: &mut ResourceManager) {
        let Some(key) = self.current_key() else {
            return;
        };
        rm.rebuild_scene_index(key);
    }
}

#[cfg(test)]
#[path = "scene_manager_tests.rs"]
mod tests;
