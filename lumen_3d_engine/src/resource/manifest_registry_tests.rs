//! Unit tests for manifest_registry.rs

use crate::error::Error;
use crate::resource::{Manifest, MaterialManifest, ResourceKind};
use super::ManifestRegistry;

// ============================================================================
// REGISTRATION TESTS
// ============================================================================

#[test]
fn test_new_registry_is_empty() {
    let registry = ManifestRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
    assert!(registry.get("anything").is_none());
}

#[test]
fn test_add_and_get() {
    let mut registry = ManifestRegistry::new();
    let added = registry.add(Manifest::texture("brick.png")).unwrap();

    assert_eq!(added.name, "brick.png");
    assert!(registry.contains("brick.png"));
    assert_eq!(registry.kind_of("brick.png"), Some(ResourceKind::Texture));
    assert_eq!(registry.get("brick.png").unwrap().as_ref(), added.as_ref());
}

#[test]
fn test_add_empty_name_rejected() {
    let mut registry = ManifestRegistry::new();
    let result = registry.add(Manifest::mesh(""));

    assert!(matches!(result, Err(Error::EmptyName)));
    assert!(registry.is_empty());
}

#[test]
fn test_duplicate_name_rejected_across_kinds() {
    let mut registry = ManifestRegistry::new();
    registry.add(Manifest::mesh("wall")).unwrap();

    let result = registry.add(Manifest::material("wall", MaterialManifest::default()));

    assert!(matches!(result, Err(Error::DuplicateManifest(ref name)) if name == "wall"));
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.kind_of("wall"), Some(ResourceKind::Mesh));
}

// ============================================================================
// QUERY TESTS
// ============================================================================

#[test]
fn test_names_sorted() {
    let mut registry = ManifestRegistry::new();
    for name in ["table", "__cube__", "lamp", "brick.png"] {
        registry.add(Manifest::mesh(name)).unwrap();
    }
    assert_eq!(registry.names(), vec!["__cube__", "brick.png", "lamp", "table"]);
}

#[test]
fn test_count_of_kind() {
    let mut registry = ManifestRegistry::new();
    registry.add(Manifest::texture("a.png")).unwrap();
    registry.add(Manifest::texture("b.png")).unwrap();
    registry.add(Manifest::object("table", "__cube__", None)).unwrap();
    registry.add(Manifest::scene("room", &["table"], &[])).unwrap();

    assert_eq!(registry.count_of(ResourceKind::Texture), 2);
    assert_eq!(registry.count_of(ResourceKind::Object), 1);
    assert_eq!(registry.count_of(ResourceKind::Scene), 1);
    assert_eq!(registry.count_of(ResourceKind::Light), 0);
}

#[test]
fn test_entity_desc_only_for_entity_kinds() {
    let mut registry = ManifestRegistry::new();
    registry.add(Manifest::object("table", "__cube__", Some("wall"))).unwrap();
    registry.add(Manifest::mesh("__plane__")).unwrap();

    assert!(registry.get("table").unwrap().entity_desc().is_some());
    assert!(registry.get("__plane__").unwrap().entity_desc().is_none());
}
