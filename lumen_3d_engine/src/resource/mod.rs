//! Resource management module
//!
//! Manifests describe loadable content; the ResourceManager turns them into
//! shared, reference-counted resources and collects the unused ones.

pub mod manifest;
pub mod manifest_registry;
pub mod manifest_reader;
pub mod resource;
pub mod texture;
pub mod material;
pub mod mesh;
pub mod shader;
pub mod entity;
mod resource_manager;

pub use manifest::{
    ResourceKind, Manifest, ManifestDesc,
    TextureManifest, MaterialManifest, ShaderManifest, ObjectManifest,
    LightManifest, SceneManifest, EntityDesc,
    LightType, UniformType,
};
pub use manifest_registry::ManifestRegistry;
pub use resource::{Resource, ResourceData, ResourceKey};
pub(crate) use resource::UnloadContext;
pub use resource_manager::{ResourceManager, ResourceStats};
pub use texture::Texture;
pub use material::{Material, DEFAULT_MATERIAL};
pub use mesh::{Mesh, CUBE_MESH, PLANE_MESH};
pub use shader::Shader;
pub use entity::{EntityResource, Object, Light};
