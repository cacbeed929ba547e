/// Manifests - immutable descriptors of loadable content.
///
/// A manifest is registered once under a globally unique name and never
/// changes afterwards. References to other content (a material's textures,
/// an object's mesh and material, a scene's objects and lights) are plain
/// manifest names, resolved through the ResourceManager at load time.

use glam::Vec3;
use crate::graphics_device::{TextureFiltering, TextureUsage, VertexFormat};
use crate::scene::Transform;

// ===== RESOURCE KIND =====

/// Closed set of loadable content kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Texture,
    Material,
    Mesh,
    Shader,
    Entity,
    Object,
    Light,
    Scene,
}

impl ResourceKind {
    /// All kinds, in declaration order
    pub const ALL: [ResourceKind; 8] = [
        ResourceKind::Texture,
        ResourceKind::Material,
        ResourceKind::Mesh,
        ResourceKind::Shader,
        ResourceKind::Entity,
        ResourceKind::Object,
        ResourceKind::Light,
        ResourceKind::Scene,
    ];
}

// ===== ENTITY PART =====

/// Fields shared by every entity-like manifest (Entity, Object, Light)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntityDesc {
    pub transform: Transform,
    /// Name of the parent entity inside the owning scene
    pub parent: Option<String>,
}

// ===== PER-KIND FIELDS =====

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextureManifest {
    pub mipmapping: bool,
    pub usage: TextureUsage,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialManifest {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub diffuse_map: Option<String>,
    pub normal_map: Option<String>,
    /// Texture repeat count along U and V
    pub repeat: [f32; 2],
    pub filtering: TextureFiltering,
    pub mipmapping: bool,
}

impl MaterialManifest {
    /// Referenced texture names: diffuse map, then normal map
    pub fn texture_names(&self) -> impl Iterator<Item = &str> {
        self.diffuse_map.iter().chain(&self.normal_map).map(String::as_str)
    }
}

impl Default for MaterialManifest {
    fn default() -> Self {
        Self {
            ambient: Vec3::splat(0.2),
            diffuse: Vec3::splat(0.8),
            specular: Vec3::ZERO,
            diffuse_map: None,
            normal_map: None,
            repeat: [1.0, 1.0],
            filtering: TextureFiltering::Nearest,
            mipmapping: false,
        }
    }
}

/// Engine-provided value bound to a shader uniform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformType {
    Mvp,
    Model,
    View,
    Proj,
    TexDiffuse,
    TexNormal,
    Lights,
    NumLights,
    Material,
}

impl UniformType {
    /// Parse a shader library value ("_MVP_", "_TEX_DIFFUSE_", ...)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "_MVP_" => Some(UniformType::Mvp),
            "_MODEL_" => Some(UniformType::Model),
            "_VIEW_" => Some(UniformType::View),
            "_PROJ_" => Some(UniformType::Proj),
            "_TEX_DIFFUSE_" => Some(UniformType::TexDiffuse),
            "_TEX_NORMAL_" => Some(UniformType::TexNormal),
            "_LIGHTS_" => Some(UniformType::Lights),
            "_NUM_LIGHTS_" => Some(UniformType::NumLights),
            "_MATERIAL_" => Some(UniformType::Material),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShaderManifest {
    /// Vertex stage file, relative to `shaders/`
    pub vs: String,
    /// Fragment stage file, relative to `shaders/`
    pub fs: String,
    pub vs_version: u32,
    pub fs_version: u32,
    pub input_format: VertexFormat,
    pub num_outputs: u32,
    /// Uniform name -> engine value
    pub uniforms: Vec<(String, UniformType)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectManifest {
    pub mesh: String,
    /// Falls back to the default material when absent
    pub material: Option<String>,
    pub entity: EntityDesc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightType {
    Ambient,
    Sun,
    #[default]
    Point,
    Spot,
}

impl LightType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ambient" => Some(LightType::Ambient),
            "sun" => Some(LightType::Sun),
            "point" => Some(LightType::Point),
            "spot" => Some(LightType::Spot),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LightManifest {
    pub light_type: LightType,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub power: f32,
    pub attenuation: f32,
    /// Cutoff angle in radians (spot lights)
    pub spot_cutoff: f32,
    pub entity: EntityDesc,
}

impl Default for LightManifest {
    fn default() -> Self {
        Self {
            light_type: LightType::Point,
            diffuse: Vec3::ONE,
            specular: Vec3::ONE,
            power: 1.0,
            attenuation: 0.0,
            spot_cutoff: 0.0,
            entity: EntityDesc::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneManifest {
    /// Object manifest names, in load order
    pub objects: Vec<String>,
    /// Light manifest names, in load order
    pub lights: Vec<String>,
}

// ===== MANIFEST =====

/// Kind-specific part of a manifest
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestDesc {
    Texture(TextureManifest),
    Material(MaterialManifest),
    /// Built-in geometry (`__cube__`, `__plane__`) or a file under `meshes/`
    Mesh,
    Shader(ShaderManifest),
    Entity(EntityDesc),
    Object(ObjectManifest),
    Light(LightManifest),
    Scene(SceneManifest),
}

impl ManifestDesc {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ManifestDesc::Texture(_) => ResourceKind::Texture,
            ManifestDesc::Material(_) => ResourceKind::Material,
            ManifestDesc::Mesh => ResourceKind::Mesh,
            ManifestDesc::Shader(_) => ResourceKind::Shader,
            ManifestDesc::Entity(_) => ResourceKind::Entity,
            ManifestDesc::Object(_) => ResourceKind::Object,
            ManifestDesc::Light(_) => ResourceKind::Light,
            ManifestDesc::Scene(_) => ResourceKind::Scene,
        }
    }
}

/// Named content descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    pub name: String,
    pub desc: ManifestDesc,
}

impl Manifest {
    pub fn new(name: impl Into<String>, desc: ManifestDesc) -> Self {
        Self { name: name.into(), desc }
    }

    pub fn kind(&self) -> ResourceKind {
        self.desc.kind()
    }

    /// Texture manifest with default settings
    pub fn texture(name: impl Into<String>) -> Self {
        Self::new(name, ManifestDesc::Texture(TextureManifest::default()))
    }

    pub fn mesh(name: impl Into<String>) -> Self {
        Self::new(name, ManifestDesc::Mesh)
    }

    pub fn material(name: impl Into<String>, material: MaterialManifest) -> Self {
        Self::new(name, ManifestDesc::Material(material))
    }

    /// Object at the origin, without declared parent
    pub fn object(name: impl Into<String>, mesh: &str, material: Option<&str>) -> Self {
        Self::new(name, ManifestDesc::Object(ObjectManifest {
            mesh: mesh.to_string(),
            material: material.map(str::to_string),
            entity: EntityDesc::default(),
        }))
    }

    pub fn light(name: impl Into<String>, light: LightManifest) -> Self {
        Self::new(name, ManifestDesc::Light(light))
    }

    pub fn scene(name: impl Into<String>, objects: &[&str], lights: &[&str]) -> Self {
        Self::new(name, ManifestDesc::Scene(SceneManifest {
            objects: objects.iter().map(|s| s.to_string()).collect(),
            lights: lights.iter().map(|s| s.to_string()).collect(),
        }))
    }

    /// Entity part of Entity, Object and Light manifests
    pub fn entity_desc(&self) -> Option<&EntityDesc> {
        match &self.desc {
            ManifestDesc::Entity(entity) => Some(entity),
            ManifestDesc::Object(object) => Some(&object.entity),
            ManifestDesc::Light(light) => Some(&light.entity),
            _ => None,
        }
    }
}
