/// Append-only, name-keyed table of manifests.

use std::sync::Arc;
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use super::manifest::{Manifest, ResourceKind};

#[derive(Debug, Default)]
pub struct ManifestRegistry {
    manifests: FxHashMap<String, Arc<Manifest>>,
}

impl ManifestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a manifest
    ///
    /// Fails without touching the registry if the name is empty or already
    /// used by a manifest of any kind.
    pub fn add(&mut self, manifest: Manifest) -> Result<Arc<Manifest>> {
        if manifest.name.is_empty() {
            return Err(Error::EmptyName);
        }
        if self.manifests.contains_key(&manifest.name) {
            return Err(Error::DuplicateManifest(manifest.name));
        }
        let manifest = Arc::new(manifest);
        self.manifests.insert(manifest.name.clone(), manifest.clone());
        Ok(manifest)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Manifest>> {
        self.manifests.get(name)
    }

    /// Kind of the manifest registered under `name`
    pub fn kind_of(&self, name: &str) -> Option<ResourceKind> {
        self.manifests.get(name).map(|m| m.kind())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.manifests.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.manifests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.manifests.is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.manifests.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of manifests of the given kind
    pub fn count_of(&self, kind: ResourceKind) -> usize {
        self.manifests.values().filter(|m| m.kind() == kind).count()
    }
}

#[cfg(test)]
#[path = "manifest_registry_tests.rs"]
mod tests;
