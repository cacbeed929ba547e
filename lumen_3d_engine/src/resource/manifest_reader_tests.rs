/// Unit tests for manifest_reader.rs

use super::*;
use crate::log::{CaptureLogger, LogSeverity};
use serde_json::json;

fn log() -> (Log, CaptureLogger) {
    let capture = CaptureLogger::new();
    (capture.handle(), capture)
}

fn material(manifest: &Manifest) -> &MaterialManifest {
    match &manifest.desc {
        ManifestDesc::Material(m) => m,
        other => panic!("expected a material, got {:?}", other),
    }
}

// ============================================================================
// Tests: vectors
// ============================================================================

#[test]
fn test_read_vec3_rules() {
    assert_eq!(read_vec3(&json!([0.5])), Vec3::splat(0.5));
    assert_eq!(read_vec3(&json!(2.0)), Vec3::splat(2.0));
    assert_eq!(read_vec3(&json!([])), Vec3::ZERO);
    assert_eq!(read_vec3(&json!([1, 2])), Vec3::ZERO);
    assert_eq!(read_vec3(&json!([1, 2, 3])), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(read_vec3(&json!([1, 2, 3, 4])), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(read_vec3(&Value::Null), Vec3::ZERO);
}

#[test]
fn test_read_vec2_rules() {
    assert_eq!(read_vec2(&json!([3])), [3.0, 3.0]);
    assert_eq!(read_vec2(&json!([2, 4])), [2.0, 4.0]);
    assert_eq!(read_vec2(&json!([])), [0.0, 0.0]);
}

// ============================================================================
// Tests: material library
// ============================================================================

#[test]
fn test_material_lib_full_entry() {
    let (log, _) = log();
    let json = json!({ "materials": [{
        "name": "wall",
        "ambient": [0.1],
        "diffuse": [1, 0.5, 0.25],
        "specular": [0],
        "diffuseMap": "brick.png",
        "normalMap": "brick_n.png",
        "mapping": { "mipmapping": true, "repeat": [2, 3], "filtering": "linear" }
    }]});

    let lib = read_material_lib(&json, "materials/lib.json", &log).unwrap();
    assert_eq!(lib.errors, 0);
    assert_eq!(lib.materials.len(), 1);

    let wall = material(&lib.materials[0]);
    assert_eq!(wall.texture_names().collect::<Vec<_>>(), vec!["brick.png", "brick_n.png"]);
    assert_eq!(lib.materials[0].name, "wall");
    assert_eq!(wall.ambient, Vec3::splat(0.1));
    assert_eq!(wall.diffuse, Vec3::new(1.0, 0.5, 0.25));
    assert_eq!(wall.diffuse_map.as_deref(), Some("brick.png"));
    assert_eq!(wall.repeat, [2.0, 3.0]);
    assert_eq!(wall.filtering, TextureFiltering::Linear);
    assert!(wall.mipmapping);
}

#[test]
fn test_material_lib_defaults_without_mapping() {
    let (log, _) = log();
    let json = json!({ "materials": [{ "name": "plain" }] });
    let lib = read_material_lib(&json, "f", &log).unwrap();

    let plain = material(&lib.materials[0]);
    assert_eq!(plain.repeat, [1.0, 1.0]);
    assert_eq!(plain.filtering, TextureFiltering::Nearest);
    assert!(!plain.mipmapping);
    assert!(plain.diffuse_map.is_none());
    assert_eq!(plain.texture_names().count(), 0);
}

#[test]
fn test_material_lib_normal_map_only() {
    let (log, _) = log();
    let json = json!({ "materials": [{ "name": "b", "normalMap": "n.png" }] });
    let lib = read_material_lib(&json, "f", &log).unwrap();

    let b = material(&lib.materials[0]);
    assert!(b.diffuse_map.is_none());
    assert_eq!(b.texture_names().collect::<Vec<_>>(), vec!["n.png"]);
}

#[test]
fn test_material_lib_missing_name_counted() {
    let (log, capture) = log();
    let json = json!({ "materials": [{ "diffuse": [1] }, { "name": "ok" }] });
    let lib = read_material_lib(&json, "f", &log).unwrap();

    assert_eq!(lib.errors, 1);
    assert_eq!(lib.materials.len(), 1);
    assert!(capture.contains(LogSeverity::Error, "Empty material names"));
}

#[test]
fn test_material_lib_bad_mapping_skipped() {
    let (log, capture) = log();
    let json = json!({ "materials": [{ "name": "odd", "mapping": 3 }] });
    let lib = read_material_lib(&json, "f", &log).unwrap();

    assert!(lib.materials.is_empty());
    assert_eq!(lib.errors, 0);
    assert!(capture.contains(LogSeverity::Warn, "mapping"));
}

#[test]
fn test_material_lib_unknown_filtering_warns() {
    let (log, capture) = log();
    let json = json!({ "materials": [{ "name": "m", "mapping": { "filtering": "cubic" } }] });
    let lib = read_material_lib(&json, "f", &log).unwrap();

    assert_eq!(material(&lib.materials[0]).filtering, TextureFiltering::Nearest);
    assert!(capture.contains(LogSeverity::Warn, "cubic"));
}

#[test]
fn test_material_lib_requires_array() {
    let (log, _) = log();
    assert!(matches!(
        read_material_lib(&json!({ "mats": [] }), "f", &log),
        Err(Error::InvalidManifest(_))
    ));
}

// ============================================================================
// Tests: scene file
// ============================================================================

fn registry_with_wall() -> ManifestRegistry {
    let mut registry = ManifestRegistry::new();
    registry.add(Manifest::mesh("__cube__")).unwrap();
    registry.add(Manifest::material("wall", MaterialManifest::default())).unwrap();
    registry
}

#[test]
fn test_scene_file_objects_and_lights() {
    let (log, _) = log();
    let registry = registry_with_wall();
    let json = json!({
        "objects": [
            { "name": "table", "mesh": "table.obj", "material": "wall",
              "transform": { "position": [0, 1, 0] } },
            { "name": "cube1", "mesh": "__cube__", "material": "wall", "parent": "table" },
        ],
        "lights": [
            { "name": "sun", "type": "sun", "power": 2.5 },
        ],
    });

    let file = read_scene_file(&json, "room", "scenes/room.json", &registry, &log).unwrap();

    assert_eq!(file.scene.name, "room");
    let ManifestDesc::Scene(scene) = &file.scene.desc else { panic!("not a scene") };
    assert_eq!(scene.objects, vec!["table", "cube1"]);
    assert_eq!(scene.lights, vec!["sun"]);
    assert_eq!(file.new_meshes, vec!["table.obj"]);
    assert_eq!(file.entities.len(), 3);

    let ManifestDesc::Object(table) = &file.entities[0].desc else { panic!("not an object") };
    assert_eq!(table.entity.transform.position, Vec3::Y);
    assert_eq!(table.entity.transform.scale, Vec3::ONE);
    assert_eq!(table.material.as_deref(), Some("wall"));
    assert_eq!(file.entities[1].entity_desc().unwrap().parent.as_deref(), Some("table"));

    let ManifestDesc::Light(sun) = &file.entities[2].desc else { panic!("not a light") };
    assert_eq!(sun.light_type, LightType::Sun);
    assert_eq!(sun.power, 2.5);
    assert_eq!(sun.diffuse, Vec3::ONE);
}

#[test]
fn test_scene_file_unknown_material_warns() {
    let (log, capture) = log();
    let registry = registry_with_wall();
    let json = json!({ "objects": [{ "name": "o", "mesh": "__cube__", "material": "nope" }] });

    let file = read_scene_file(&json, "s", "f", &registry, &log).unwrap();
    let ManifestDesc::Object(o) = &file.entities[0].desc else { panic!("not an object") };
    assert!(o.material.is_none());
    assert!(capture.contains(LogSeverity::Warn, "nope"));
}

#[test]
fn test_scene_file_duplicate_in_file() {
    let (log, _) = log();
    let registry = registry_with_wall();
    let json = json!({ "objects": [
        { "name": "o", "mesh": "__cube__" },
        { "name": "o", "mesh": "__cube__" },
    ]});
    assert!(matches!(
        read_scene_file(&json, "s", "f", &registry, &log),
        Err(Error::DuplicateManifest(name)) if name == "o"
    ));
}

#[test]
fn test_scene_file_duplicate_against_registry() {
    let (log, _) = log();
    let registry = registry_with_wall();
    let json = json!({ "objects": [{ "name": "wall", "mesh": "__cube__" }] });
    assert!(matches!(
        read_scene_file(&json, "s", "f", &registry, &log),
        Err(Error::DuplicateManifest(_))
    ));
}

#[test]
fn test_scene_file_existing_scene_name() {
    let (log, _) = log();
    let registry = registry_with_wall();
    let json = json!({ "objects": [] });
    assert!(matches!(
        read_scene_file(&json, "wall", "f", &registry, &log),
        Err(Error::DuplicateManifest(_))
    ));
}

#[test]
fn test_scene_file_mesh_of_wrong_kind() {
    let (log, _) = log();
    let registry = registry_with_wall();
    let json = json!({ "objects": [{ "name": "o", "mesh": "wall" }] });
    assert!(matches!(
        read_scene_file(&json, "s", "f", &registry, &log),
        Err(Error::KindMismatch { expected: ResourceKind::Mesh, found: ResourceKind::Material, .. })
    ));
}

#[test]
fn test_scene_file_missing_name_or_mesh() {
    let (log, _) = log();
    let registry = registry_with_wall();
    for json in [
        json!({ "objects": [{ "mesh": "__cube__" }] }),
        json!({ "objects": [{ "name": "o" }] }),
        json!({ "lights": [] }),
        json!({ "objects": [], "lights": 3 }),
    ] {
        assert!(matches!(
            read_scene_file(&json, "s", "f", &registry, &log),
            Err(Error::InvalidManifest(_))
        ));
    }
}

#[test]
fn test_scene_file_unknown_light_type() {
    let (log, capture) = log();
    let registry = registry_with_wall();
    let json = json!({ "objects": [], "lights": [{ "name": "l", "type": "laser" }] });

    let file = read_scene_file(&json, "s", "f", &registry, &log).unwrap();
    let ManifestDesc::Light(l) = &file.entities[0].desc else { panic!("not a light") };
    assert_eq!(l.light_type, LightType::Point);
    assert!(capture.contains(LogSeverity::Warn, "laser"));
}

// ============================================================================
// Tests: shader library
// ============================================================================

#[test]
fn test_shader_lib() {
    let (log, capture) = log();
    let json = json!({
        "default": "basic",
        "shaders": [
            { "name": "basic", "vs": "basic.vs", "fs": "basic.fs",
              "inputFormat": "VERTEX_3DN", "outputs": 2,
              "uniforms": { "uMVP": "_MVP_", "uTex": "_TEX_DIFFUSE_", "uOdd": "_WHAT_" } },
            { "name": "broken", "vs": "x.vs" },
        ],
    });

    let lib = read_shader_lib(&json, "shaders/lib.json", &log).unwrap();
    assert_eq!(lib.default.as_deref(), Some("basic"));
    assert_eq!(lib.errors, 1);
    assert_eq!(lib.shaders.len(), 1);

    let ManifestDesc::Shader(basic) = &lib.shaders[0].desc else { panic!("not a shader") };
    assert_eq!(basic.vs_version, 330);
    assert_eq!(basic.input_format, VertexFormat::Vertex3DN);
    assert_eq!(basic.num_outputs, 2);
    assert_eq!(basic.uniforms.len(), 2);
    assert!(basic.uniforms.contains(&("uMVP".to_string(), UniformType::Mvp)));
    assert!(capture.contains(LogSeverity::Warn, "uOdd"));
}
