//! Resource manager - manifest registry, resource cache and garbage collector.
//!
//! Resources are created lazily: `load_resource(name)` looks the manifest up,
//! builds the matching kind, loads it (recursively loading its dependencies
//! through this same manager) and caches it by name. Later requests for the
//! same name return the same key and add a reference.
//!
//! References never free anything by themselves. A resource whose count
//! drops to zero stays loaded until a `collect_garbage()` sweep unloads it. Cache
//! entries are never evicted, so keys stay valid and a collected resource is
//! simply loaded again on the next request.

use std::fmt::Write as _;
use std::sync::{Arc, Mutex, MutexGuard};
use rustc_hash::FxHashMap;
use serde_json::Value;
use slotmap::SlotMap;
use crate::asset::AssetLoader;
use crate::error::{Error, Result};
use crate::graphics_device::GraphicsDevice;
use crate::log::Log;
use crate::scene::{EntityTree, Scene};
use crate::{engine_bail, engine_debug, engine_err, engine_error, engine_info, engine_trace, engine_warn};
use super::manifest::{Manifest, ManifestDesc, MaterialManifest, ResourceKind};
use super::manifest_reader;
use super::manifest_registry::ManifestRegistry;
use super::material::DEFAULT_MATERIAL;
use super::mesh::{CUBE_MESH, PLANE_MESH};
use super::resource::{Resource, ResourceKey, UnloadContext};

const SOURCE: &str = "lumen3d::ResourceManager";

/// Counters and sizes of a ResourceManager
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceStats {
    /// Successful loads (cache hits excluded)
    pub total_loaded: usize,
    /// Failed load requests
    pub total_fails: usize,
    /// Cache entries, loaded or not
    pub cached: usize,
    /// Cache entries currently loaded
    pub loaded: usize,
    /// Registered manifests
    pub manifests: usize,
}

pub struct ResourceManager {
    registry: ManifestRegistry,
    resources: SlotMap<ResourceKey, Resource>,
    cache: FxHashMap<String, ResourceKey>,
    entities: EntityTree,
    device: Arc<Mutex<dyn GraphicsDevice>>,
    loader: Arc<dyn AssetLoader>,
    log: Log,
    default_shader: Option<String>,
    total_loaded: usize,
    total_fails: usize,
}

impl ResourceManager {
    /// Create a manager with the built-in manifests registered
    /// (`__cube__`, `__plane__` and `__default_material__`)
    pub fn new(
        device: Arc<Mutex<dyn GraphicsDevice>>,
        loader: Arc<dyn AssetLoader>,
        log: Log,
    ) -> Self {
        let mut manager = Self {
            registry: ManifestRegistry::new(),
            resources: SlotMap::with_key(),
            cache: FxHashMap::default(),
            entities: EntityTree::new(log.clone()),
            device,
            loader,
            log,
            default_shader: None,
            total_loaded: 0,
            total_fails: 0,
        };

        for builtin in [
            Manifest::mesh(CUBE_MESH),
            Manifest::mesh(PLANE_MESH),
            Manifest::material(DEFAULT_MATERIAL, MaterialManifest::default()),
        ] {
            // Registry is empty, cannot collide
            let _ = manager.registry.add(builtin);
        }
        manager
    }

    // ===== COLLABORATORS =====

    pub fn log(&self) -> &Log {
        &self.log
    }

    pub(crate) fn loader(&self) -> &dyn AssetLoader {
        self.loader.as_ref()
    }

    pub(crate) fn device(&self) -> Result<MutexGuard<'_, dyn GraphicsDevice + 'static>> {
        self.device
            .lock()
            .map_err(|_| Error::BackendError("graphics device lock poisoned".to_string()))
    }

    pub fn entities(&self) -> &EntityTree {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut EntityTree {
        &mut self.entities
    }

    // ===== MANIFESTS =====

    /// Register a manifest; fails on empty or already used names
    pub fn add_manifest(&mut self, manifest: Manifest) -> Result<()> {
        match self.registry.add(manifest) {
            Ok(manifest) => {
                engine_debug!(self.log, SOURCE, "Registered {:?} manifest '{}'", manifest.kind(), manifest.name);
                Ok(())
            }
            Err(err) => Err(engine_err!(self.log, SOURCE, err)),
        }
    }

    pub fn get_manifest(&self, name: &str) -> Option<&Arc<Manifest>> {
        self.registry.get(name)
    }

    pub fn registry(&self) -> &ManifestRegistry {
        &self.registry
    }

    // ===== LOADING =====

    /// Load a resource by manifest name and take a reference to it
    ///
    /// Returns the cached key when the resource is already loaded. A cached
    /// resource that was unloaded (explicitly or by garbage collection) is
    /// loaded again under the same key. A failed load leaves nothing behind:
    /// dependencies acquired so far are released and no cache entry is made.
    pub fn load_resource(&mut self, name: &str) -> Result<ResourceKey> {
        if name.is_empty() {
            self.total_fails += 1;
            engine_bail!(self.log, SOURCE, Error::EmptyName);
        }
        let Some(manifest) = self.registry.get(name).cloned() else {
            self.total_fails += 1;
            engine_bail!(self.log, SOURCE, Error::ManifestNotFound(name.to_string()));
        };

        if let Some(&key) = self.cache.get(name) {
            let loaded = self.resources.get(key).is_some_and(Resource::is_loaded);
            if loaded {
                let resource = &mut self.resources[key];
                resource.inc_ref_count();
                engine_trace!(self.log, SOURCE, "'{}' already loaded ({} refs)", name, resource.ref_count());
                return Ok(key);
            }

            let fresh = self.construct(manifest)?;
            let resource = &mut self.resources[key];
            resource.replace_state(fresh);
            resource.inc_ref_count();
            return Ok(key);
        }

        let mut resource = self.construct(manifest)?;
        resource.inc_ref_count();
        let key = self.resources.insert(resource);
        self.cache.insert(name.to_string(), key);
        Ok(key)
    }

    /// Load a dependency of `owner`, checking its kind first
    pub(crate) fn load_dependency(&mut self, owner: &str, name: &str, kind: ResourceKind) -> Result<ResourceKey> {
        if let Some(found) = self.registry.kind_of(name).filter(|&found| found != kind) {
            engine_bail!(self.log, SOURCE, Error::KindMismatch { name: name.to_string(), expected: kind, found });
        }
        self.load_resource(name).map_err(|_| Error::DependencyFailed {
            resource: owner.to_string(),
            dependency: name.to_string(),
        })
    }

    /// Build and load a resource outside the cache
    fn construct(&mut self, manifest: Arc<Manifest>) -> Result<Resource> {
        engine_info!(self.log, SOURCE, "Loading {:?} '{}'", manifest.kind(), manifest.name);

        let mut resource = Resource::new(manifest);
        match resource.load(self) {
            Ok(()) => {
                self.total_loaded += 1;
                Ok(resource)
            }
            Err(err) => {
                self.release_held(&mut resource);
                self.total_fails += 1;
                engine_error!(self.log, SOURCE,
                    "Failed to load {:?} '{}': {}", resource.kind(), resource.name(), err);
                Err(err)
            }
        }
    }

    /// Unload a resource and drop the caller's reference
    ///
    /// Fails if there is no manifest for `name`, the resource is not
    /// currently loaded, or its reference count is already zero (every
    /// holder gave it back; garbage collection unloads it). The cache entry
    /// is kept.
    pub fn unload_resource(&mut self, name: &str) -> Result<()> {
        if name.is_empty() {
            engine_bail!(self.log, SOURCE, Error::EmptyName);
        }
        if !self.registry.contains(name) {
            engine_bail!(self.log, SOURCE, Error::ManifestNotFound(name.to_string()));
        }
        let Some(key) = self
            .cache
            .get(name)
            .copied()
            .filter(|&key| self.resources.get(key).is_some_and(Resource::is_loaded))
        else {
            engine_bail!(self.log, SOURCE, Error::NotLoaded(name.to_string()));
        };

        if self.resources[key].ref_count() == 0 {
            engine_bail!(self.log, SOURCE, Error::Unreferenced(name.to_string()));
        }

        engine_info!(self.log, SOURCE, "Unloading '{}'", name);
        self.unload_key(key);
        self.release(key);
        Ok(())
    }

    /// Unload every resource nobody references
    ///
    /// Works on a snapshot of the zero-count entries taken when the call
    /// starts and returns its size. Dependencies released by the unloaded
    /// resources stay loaded until a later sweep.
    pub fn collect_garbage(&mut self) -> usize {
        let unreferenced: Vec<ResourceKey> = self
            .resources
            .iter()
            .filter(|(_, r)| r.ref_count() == 0)
            .map(|(key, _)| key)
            .collect();

        let mut unloaded = 0;
        for &key in &unreferenced {
            if self.resources.get(key).is_some_and(Resource::is_loaded) {
                engine_debug!(self.log, SOURCE, "Collecting '{}'", self.resources[key].name());
                self.unload_key(key);
                unloaded += 1;
            }
        }

        engine_info!(self.log, SOURCE,
            "Garbage collection: {} unreferenced entries, {} unloaded", unreferenced.len(), unloaded);
        unreferenced.len()
    }

    /// Sweep until no unreferenced resource is left loaded
    ///
    /// Returns the number of zero-count entries after the last sweep.
    pub fn collect_all_garbage(&mut self) -> usize {
        while self.resources.values().any(|r| r.ref_count() == 0 && r.is_loaded()) {
            self.collect_garbage();
        }
        self.resources.values().filter(|r| r.ref_count() == 0).count()
    }

    fn unload_key(&mut self, key: ResourceKey) {
        let Some(resource) = self.resources.get_mut(key) else {
            return;
        };
        let mut ctx = UnloadContext::new(&*self.device, &mut self.entities, &self.log);
        resource.unload(&mut ctx);
        let released = ctx.into_released();
        self.release_all(released);
    }

    /// Release what a resource that never reached the cache still holds
    fn release_held(&mut self, resource: &mut Resource) {
        let mut ctx = UnloadContext::new(&*self.device, &mut self.entities, &self.log);
        resource.unload(&mut ctx);
        let released = ctx.into_released();
        self.release_all(released);
    }

    fn release_all(&mut self, keys: Vec<ResourceKey>) {
        for key in keys {
            self.release(key);
        }
    }

    /// Drop one reference held on `key`
    fn release(&mut self, key: ResourceKey) {
        let Some(resource) = self.resources.get_mut(key) else {
            return;
        };
        if resource.ref_count() > 0 {
            resource.dec_ref_count();
        } else {
            engine_warn!(self.log, SOURCE,
                "'{}' released with no reference left", resource.name());
        }
    }

    // ===== LOOKUP =====

    pub fn resource(&self, key: ResourceKey) -> Option<&Resource> {
        self.resources.get(key)
    }

    /// Cached resource by name (loaded or not)
    pub fn get(&self, name: &str) -> Option<&Resource> {
        self.cache.get(name).and_then(|&key| self.resources.get(key))
    }

    pub fn key_of(&self, name: &str) -> Option<ResourceKey> {
        self.cache.get(name).copied()
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.get(name).is_some_and(Resource::is_loaded)
    }

    pub fn ref_count(&self, name: &str) -> Option<u32> {
        self.get(name).map(Resource::ref_count)
    }

    pub fn scene(&self, key: ResourceKey) -> Option<&Scene> {
        self.resources.get(key).and_then(Resource::as_scene)
    }

    pub fn resources(&self) -> impl Iterator<Item = (ResourceKey, &Resource)> {
        self.resources.iter()
    }

    /// Rebuild the render index of a loaded scene from the current hierarchy
    pub fn rebuild_scene_index(&mut self, key: ResourceKey) {
        if let Some(scene) = self.resources.get_mut(key).and_then(Resource::as_scene_mut) {
            scene.rebuild_index(&self.entities);
        }
    }

    /// Rebuild the render index of every cached scene
    pub(crate) fn rebuild_scene_indices(&mut self) {
        let entities = &self.entities;
        for scene in self.resources.values_mut().filter_map(Resource::as_scene_mut) {
            scene.rebuild_index(entities);
        }
    }

    // ===== MANIFEST FILES =====

    fn read_json(&self, file: &str) -> Result<Value> {
        let text = self
            .loader
            .read_text(file)
            .map_err(|err| engine_err!(self.log, SOURCE, err))?;
        serde_json::from_str(&text)
            .map_err(|err| engine_err!(self.log, SOURCE, Error::Parse(format!("{}: {}", file, err))))
    }

    /// Register the materials of `materials/<name>.json`
    ///
    /// Texture manifests are created for referenced textures that are not
    /// registered yet. Every material is attempted; the call fails if any of
    /// them could not be read or registered.
    pub fn load_material_lib(&mut self, name: &str) -> Result<()> {
        if name.is_empty() {
            engine_bail!(self.log, SOURCE, Error::EmptyName);
        }
        let file = format!("materials/{}.json", name);
        let json = self.read_json(&file)?;
        let lib = manifest_reader::read_material_lib(&json, &file, &self.log)
            .map_err(|err| engine_err!(self.log, SOURCE, err))?;

        let mut failures = lib.errors;
        let count = lib.materials.len();
        for material in lib.materials {
            if !self.register_material(&file, material) {
                failures += 1;
            }
        }

        if failures > 0 {
            engine_bail!(self.log, SOURCE,
                Error::InvalidManifest(format!("{}: {} entries could not be registered", file, failures)));
        }
        engine_info!(self.log, SOURCE, "{}: {} materials registered", file, count);
        Ok(())
    }

    /// Register one material, then manifests for the textures it references
    /// that are not registered yet
    ///
    /// Nothing is registered when the material is rejected.
    fn register_material(&mut self, file: &str, material: Manifest) -> bool {
        let textures: Vec<String> = match &material.desc {
            ManifestDesc::Material(desc) => desc.texture_names().map(str::to_string).collect(),
            _ => Vec::new(),
        };
        for texture in &textures {
            let found = match self.registry.kind_of(texture) {
                _ if *texture == material.name => Some(ResourceKind::Material),
                kind => kind.filter(|&k| k != ResourceKind::Texture),
            };
            if let Some(found) = found {
                engine_error!(self.log, SOURCE,
                    "{}: '{}': '{}' is a {:?}, not a texture", file, material.name, texture, found);
                return false;
            }
        }
        if self.add_manifest(material).is_err() {
            return false;
        }

        let mut registered = true;
        for texture in textures {
            if !self.registry.contains(&texture) {
                engine_info!(self.log, SOURCE, "Creating texture manifest '{}'", texture);
                registered &= self.add_manifest(Manifest::texture(texture)).is_ok();
            }
        }
        registered
    }

    /// `load_material_lib` for several libraries; all are attempted
    pub fn load_material_libs<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        let mut first_error = None;
        for name in names {
            if let Err(err) = self.load_material_lib(name.as_ref()) {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Register the scene described by `scenes/<name>.json` and its
    /// objects, lights and new meshes
    ///
    /// The file is validated as a whole first; on error nothing is registered.
    pub fn create_scene(&mut self, name: &str) -> Result<()> {
        if name.is_empty() {
            engine_bail!(self.log, SOURCE, Error::EmptyName);
        }
        let file = format!("scenes/{}.json", name);
        let json = self.read_json(&file)?;
        let scene = manifest_reader::read_scene_file(&json, name, &file, &self.registry, &self.log)
            .map_err(|err| engine_err!(self.log, SOURCE, err))?;

        for mesh in scene.new_meshes {
            self.add_manifest(Manifest::mesh(mesh))?;
        }
        let count = scene.entities.len();
        for entity in scene.entities {
            self.add_manifest(entity)?;
        }
        self.add_manifest(scene.scene)?;

        engine_info!(self.log, SOURCE, "Created manifest for scene '{}' ({} entities)", name, count);
        Ok(())
    }

    /// `create_scene` for several scene files; all are attempted
    pub fn create_scene_manifests<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        let mut first_error = None;
        for name in names {
            if let Err(err) = self.create_scene(name.as_ref()) {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Register the shaders of `shaders/<name>.json` and remember its default
    pub fn load_shader_lib(&mut self, name: &str) -> Result<()> {
        if name.is_empty() {
            engine_bail!(self.log, SOURCE, Error::EmptyName);
        }
        let file = format!("shaders/{}.json", name);
        let json = self.read_json(&file)?;
        let lib = manifest_reader::read_shader_lib(&json, &file, &self.log)
            .map_err(|err| engine_err!(self.log, SOURCE, err))?;

        let mut failures = lib.errors;
        for shader in lib.shaders {
            if self.add_manifest(shader).is_err() {
                failures += 1;
            }
        }

        if let Some(default) = lib.default {
            if self.registry.kind_of(&default) == Some(ResourceKind::Shader) {
                self.default_shader = Some(default);
            } else {
                engine_warn!(self.log, SOURCE, "{}: default shader '{}' is not a shader", file, default);
            }
        }

        if failures > 0 {
            engine_bail!(self.log, SOURCE,
                Error::InvalidManifest(format!("{}: {} shaders could not be registered", file, failures)));
        }
        Ok(())
    }

    /// Default shader declared by the last shader library loaded
    pub fn default_shader(&self) -> Option<&str> {
        self.default_shader.as_deref()
    }

    // ===== DIAGNOSTICS =====

    pub fn stats(&self) -> ResourceStats {
        ResourceStats {
            total_loaded: self.total_loaded,
            total_fails: self.total_fails,
            cached: self.cache.len(),
            loaded: self.resources.values().filter(|r| r.is_loaded()).count(),
            manifests: self.registry.len(),
        }
    }

    pub fn log_stats(&self) {
        let stats = self.stats();
        engine_info!(self.log, SOURCE,
            "{} loads, {} failures, {} cached ({} loaded), {} manifests",
            stats.total_loaded, stats.total_fails, stats.cached, stats.loaded, stats.manifests);
    }

    /// Registered manifests, one per line, sorted by name
    pub fn manifest_report(&self) -> String {
        let mut report = format!("Manifests ({}):\n", self.registry.len());
        for name in self.registry.names() {
            if let Some(kind) = self.registry.kind_of(name) {
                let _ = writeln!(report, "  [{:?}] {}", kind, name);
            }
        }
        report
    }

    /// Cached resources, one per line, sorted by name
    pub fn resource_report(&self) -> String {
        let mut entries: Vec<&Resource> = self.resources.values().collect();
        entries.sort_by(|a, b| a.name().cmp(b.name()));

        let mut report = format!("Resources ({} cached):\n", entries.len());
        for resource in entries {
            let _ = writeln!(
                report,
                "  [{:?}] {} refs={} {}",
                resource.kind(),
                resource.name(),
                resource.ref_count(),
                if resource.is_loaded() { "loaded" } else { "unloaded" },
            );
        }
        report
    }
}

#[cfg(test)]
#[path = "resource_manager_tests.rs"]
mod tests;
