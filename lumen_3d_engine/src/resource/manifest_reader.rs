/// JSON manifest files -> manifests.
///
/// Readers work on `serde_json::Value` so that an absent or null field stays
/// distinguishable from a present one. They only build manifests; the
/// ResourceManager decides what gets registered.
///
/// Material library (`materials/<name>.json`):
///
/// ```json
/// { "materials": [ { "name": "wall", "ambient": [0.2], "diffuse": [1, 1, 1],
///     "specular": [0], "diffuseMap": "brick.png", "normalMap": "brick_n.png",
///     "mapping": { "mipmapping": true, "repeat": [2, 2], "filtering": "linear" } } ] }
/// ```
///
/// Scene file (`scenes/<name>.json`):
///
/// ```json
/// { "objects": [ { "name": "cube1", "mesh": "__cube__", "material": "wall",
///     "parent": "table", "transform": { "position": [0, 1, 0],
///     "rotation": [0], "scaling": [1] } } ],
///   "lights": [ { "name": "sun", "type": "sun", "diffuse": [1], "specular": [1],
///     "power": 1.0, "attenuation": 0.0, "spotCutoff": 0.0 } ] }
/// ```
///
/// Shader library (`shaders/<name>.json`):
///
/// ```json
/// { "default": "basic",
///   "shaders": [ { "name": "basic", "vs": "basic.vs", "fs": "basic.fs",
///     "vsVersion": 330, "fsVersion": 330, "inputFormat": "VERTEX_3DTN",
///     "outputs": 1, "uniforms": { "uMVP": "_MVP_" } } ] }
/// ```

use glam::Vec3;
use rustc_hash::FxHashSet;
use serde_json::Value;
use crate::error::{Error, Result};
use crate::graphics_device::{TextureFiltering, VertexFormat};
use crate::log::Log;
use crate::scene::Transform;
use crate::{engine_error, engine_warn};
use super::manifest::{
    EntityDesc, LightManifest, LightType, Manifest, ManifestDesc, MaterialManifest,
    ObjectManifest, ResourceKind, SceneManifest, ShaderManifest, UniformType,
};
use super::manifest_registry::ManifestRegistry;

const SOURCE: &str = "lumen3d::ManifestReader";

// ===== VECTORS =====

/// Read a 3-component vector
///
/// A single element (or a bare number) is splatted, fewer than three
/// elements give zero, extra elements are ignored.
pub fn read_vec3(value: &Value) -> Vec3 {
    match value {
        Value::Number(n) => Vec3::splat(n.as_f64().unwrap_or(0.0) as f32),
        Value::Array(items) => {
            let f = |i: usize| items[i].as_f64().unwrap_or(0.0) as f32;
            match items.len() {
                1 => Vec3::splat(f(0)),
                0 | 2 => Vec3::ZERO,
                _ => Vec3::new(f(0), f(1), f(2)),
            }
        }
        _ => Vec3::ZERO,
    }
}

/// Read a 2-component vector (one element splats)
pub fn read_vec2(value: &Value) -> [f32; 2] {
    match value {
        Value::Number(n) => [n.as_f64().unwrap_or(0.0) as f32; 2],
        Value::Array(items) => {
            let f = |i: usize| items[i].as_f64().unwrap_or(0.0) as f32;
            match items.len() {
                0 => [0.0, 0.0],
                1 => [f(0); 2],
                _ => [f(0), f(1)],
            }
        }
        _ => [0.0, 0.0],
    }
}

fn read_vec3_or(value: &Value, default: Vec3) -> Vec3 {
    if value.is_null() { default } else { read_vec3(value) }
}

fn read_string(value: &Value) -> Option<String> {
    value.as_str().filter(|s| !s.is_empty()).map(str::to_string)
}

fn read_transform(value: &Value) -> Transform {
    if !value.is_object() {
        return Transform::default();
    }
    Transform {
        position: read_vec3(&value["position"]),
        rotation: read_vec3(&value["rotation"]),
        scale: read_vec3_or(&value["scaling"], Vec3::ONE),
    }
}

// ===== MATERIAL LIBRARY =====

/// Materials read from one library file
#[derive(Debug, Default)]
pub struct MaterialLib {
    /// Material manifests, in file order
    pub materials: Vec<Manifest>,
    /// Entries that could not be read
    pub errors: usize,
}

/// Read a material library
///
/// Fails only when the file has no `materials` array. Broken entries are
/// logged, counted in `errors` and skipped.
pub fn read_material_lib(json: &Value, file: &str, log: &Log) -> Result<MaterialLib> {
    let Some(entries) = json["materials"].as_array() else {
        return Err(Error::InvalidManifest(format!("{}: \"materials\" array expected", file)));
    };

    let mut lib = MaterialLib::default();

    for entry in entries {
        let Some(name) = read_string(&entry["name"]) else {
            engine_error!(log, SOURCE, "{}: Empty material names not supported", file);
            lib.errors += 1;
            continue;
        };

        let mut material = MaterialManifest {
            ambient: read_vec3(&entry["ambient"]),
            diffuse: read_vec3(&entry["diffuse"]),
            specular: read_vec3(&entry["specular"]),
            diffuse_map: read_string(&entry["diffuseMap"]),
            normal_map: read_string(&entry["normalMap"]),
            ..MaterialManifest::default()
        };

        let mapping = &entry["mapping"];
        if !mapping.is_null() {
            if !mapping.is_object() {
                engine_warn!(log, SOURCE,
                    "{}: '{}': \"mapping\" is expected to be an object, material skipped", file, name);
                continue;
            }
            material.mipmapping = mapping["mipmapping"].as_bool().unwrap_or(false);
            if mapping["repeat"].is_array() {
                material.repeat = read_vec2(&mapping["repeat"]);
            }
            material.filtering = match mapping["filtering"].as_str() {
                None => TextureFiltering::Nearest,
                Some(value) => TextureFiltering::from_name(value).unwrap_or_else(|| {
                    engine_warn!(log, SOURCE,
                        "'{}': unknown value \"{}\" of \"filtering\" property, using nearest", name, value);
                    TextureFiltering::Nearest
                }),
            };
        }

        lib.materials.push(Manifest::material(name, material));
    }

    Ok(lib)
}

// ===== SCENE FILE =====

/// Manifests declared by one scene file
#[derive(Debug)]
pub struct SceneFile {
    pub scene: Manifest,
    /// Object manifests then light manifests
    pub entities: Vec<Manifest>,
    /// Mesh names not registered yet, no duplicates
    pub new_meshes: Vec<String>,
}

/// Read and validate a scene file against the current registry
///
/// Nothing is returned unless the whole file is valid: every object and
/// light has a name, names are unique both inside the file and against the
/// registry, and mesh names refer to meshes (or to nothing yet). Unknown
/// materials are not an error; the object falls back to the default one.
pub fn read_scene_file(
    json: &Value,
    scene_name: &str,
    file: &str,
    registry: &ManifestRegistry,
    log: &Log,
) -> Result<SceneFile> {
    if scene_name.is_empty() {
        return Err(Error::EmptyName);
    }
    if registry.contains(scene_name) {
        return Err(Error::DuplicateManifest(scene_name.to_string()));
    }
    let Some(objects) = json["objects"].as_array() else {
        return Err(Error::InvalidManifest(format!("{}: \"objects\" array expected", file)));
    };
    let lights = match &json["lights"] {
        Value::Null => &[][..],
        Value::Array(lights) => lights.as_slice(),
        _ => return Err(Error::InvalidManifest(format!("{}: \"lights\" is expected to be an array", file))),
    };

    let mut names = FxHashSet::default();
    names.insert(scene_name.to_string());
    let mut claim = |name: Option<String>, what: &str| -> Result<String> {
        let name = name.ok_or_else(|| Error::InvalidManifest(format!("{}: expected {} name", file, what)))?;
        if registry.contains(&name) || !names.insert(name.clone()) {
            return Err(Error::DuplicateManifest(name));
        }
        Ok(name)
    };

    let mut entities = Vec::with_capacity(objects.len() + lights.len());
    let mut scene = SceneManifest::default();
    let mut new_meshes: Vec<String> = Vec::new();

    for object in objects {
        let name = claim(read_string(&object["name"]), "object")?;
        let Some(mesh) = read_string(&object["mesh"]) else {
            return Err(Error::InvalidManifest(format!("{}: object '{}' has no mesh", file, name)));
        };
        match registry.kind_of(&mesh) {
            Some(ResourceKind::Mesh) => {}
            Some(found) => {
                return Err(Error::KindMismatch { name: mesh, expected: ResourceKind::Mesh, found });
            }
            None => {
                if !new_meshes.contains(&mesh) {
                    new_meshes.push(mesh.clone());
                }
            }
        }

        let material = read_string(&object["material"]).and_then(|material| {
            if registry.kind_of(&material) == Some(ResourceKind::Material) {
                Some(material)
            } else {
                engine_warn!(log, SOURCE,
                    "{}: material '{}' of '{}' not found, using default", file, material, name);
                None
            }
        });

        scene.objects.push(name.clone());
        entities.push(Manifest::new(name, ManifestDesc::Object(ObjectManifest {
            mesh,
            material,
            entity: EntityDesc {
                transform: read_transform(&object["transform"]),
                parent: read_string(&object["parent"]),
            },
        })));
    }

    for light in lights {
        let name = claim(read_string(&light["name"]), "light")?;
        let light_type = match light["type"].as_str() {
            None => LightType::default(),
            Some(value) => LightType::from_name(value).unwrap_or_else(|| {
                engine_warn!(log, SOURCE, "{}: light '{}' has unknown type \"{}\", using point", file, name, value);
                LightType::Point
            }),
        };
        let defaults = LightManifest::default();

        scene.lights.push(name.clone());
        entities.push(Manifest::light(name, LightManifest {
            light_type,
            diffuse: read_vec3_or(&light["diffuse"], defaults.diffuse),
            specular: read_vec3_or(&light["specular"], defaults.specular),
            power: light["power"].as_f64().map_or(defaults.power, |v| v as f32),
            attenuation: light["attenuation"].as_f64().map_or(defaults.attenuation, |v| v as f32),
            spot_cutoff: light["spotCutoff"].as_f64().map_or(defaults.spot_cutoff, |v| v as f32),
            entity: EntityDesc {
                transform: read_transform(&light["transform"]),
                parent: read_string(&light["parent"]),
            },
        }));
    }

    Ok(SceneFile {
        scene: Manifest::new(scene_name, ManifestDesc::Scene(scene)),
        entities,
        new_meshes,
    })
}

// ===== SHADER LIBRARY =====

/// Shaders read from one library file
#[derive(Debug, Default)]
pub struct ShaderLib {
    pub shaders: Vec<Manifest>,
    /// Name of the default shader, if the library declares one
    pub default: Option<String>,
    pub errors: usize,
}

pub fn read_shader_lib(json: &Value, file: &str, log: &Log) -> Result<ShaderLib> {
    let Some(entries) = json["shaders"].as_array() else {
        return Err(Error::InvalidManifest(format!("{}: \"shaders\" array expected", file)));
    };

    let mut lib = ShaderLib {
        default: read_string(&json["default"]),
        ..ShaderLib::default()
    };

    for entry in entries {
        let (Some(name), Some(vs), Some(fs)) = (
            read_string(&entry["name"]),
            read_string(&entry["vs"]),
            read_string(&entry["fs"]),
        ) else {
            engine_error!(log, SOURCE, "{}: every shader needs \"name\", \"vs\" and \"fs\"", file);
            lib.errors += 1;
            continue;
        };

        let input_format = match entry["inputFormat"].as_str() {
            None => VertexFormat::default(),
            Some(value) => VertexFormat::from_name(value).unwrap_or_else(|| {
                engine_warn!(log, SOURCE, "'{}': unknown input format \"{}\", using VERTEX_3DTN", name, value);
                VertexFormat::default()
            }),
        };

        let mut uniforms = Vec::new();
        if let Some(map) = entry["uniforms"].as_object() {
            for (uniform, value) in map {
                match value.as_str().and_then(UniformType::from_name) {
                    Some(ty) => uniforms.push((uniform.clone(), ty)),
                    None => engine_warn!(log, SOURCE,
                        "'{}': uniform '{}' maps to unknown value {}, ignored", name, uniform, value),
                }
            }
        }

        lib.shaders.push(Manifest::new(name, ManifestDesc::Shader(ShaderManifest {
            vs,
            fs,
            vs_version: entry["vsVersion"].as_u64().unwrap_or(330) as u32,
            fs_version: entry["fsVersion"].as_u64().unwrap_or(330) as u32,
            input_format,
            num_outputs: entry["outputs"].as_u64().unwrap_or(1) as u32,
            uniforms,
        })));
    }

    Ok(lib)
}

#[cfg(test)]
#[path = "manifest_reader_tests.rs"]
mod tests;
