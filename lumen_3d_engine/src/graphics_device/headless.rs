/// Headless graphics device
///
/// Hands out handles without touching a GPU and keeps track of which ones
/// are alive. Used by tools, the demo and tests.

use rustc_hash::FxHashSet;
use crate::error::{Error, Result};
use super::graphics_device::{
    DeviceStats, GraphicsDevice, MeshDesc, MeshHandle, SamplerDesc, SamplerHandle,
    ShaderDesc, ShaderHandle, TextureDesc, TextureHandle,
};

/// GraphicsDevice that only does bookkeeping
#[derive(Debug, Default)]
pub struct HeadlessGraphicsDevice {
    next_id: u64,
    textures: FxHashSet<u64>,
    samplers: FxHashSet<u64>,
    meshes: FxHashSet<u64>,
    shaders: FxHashSet<u64>,
}

impl HeadlessGraphicsDevice {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn is_texture_alive(&self, handle: TextureHandle) -> bool {
        self.textures.contains(&handle.0)
    }

    pub fn is_mesh_alive(&self, handle: MeshHandle) -> bool {
        self.meshes.contains(&handle.0)
    }
}

impl GraphicsDevice for HeadlessGraphicsDevice {
    fn create_texture(&mut self, desc: &TextureDesc) -> Result<TextureHandle> {
        let expected = desc.width as usize * desc.height as usize * desc.format.channels() as usize;
        if desc.width == 0 || desc.height == 0 || desc.data.len() < expected {
            return Err(Error::BackendError(format!(
                "Texture '{}': {} bytes for {}x{} {:?}",
                desc.name, desc.data.len(), desc.width, desc.height, desc.format
            )));
        }
        let id = self.next();
        self.textures.insert(id);
        Ok(TextureHandle(id))
    }

    fn destroy_texture(&mut self, handle: TextureHandle) {
        self.textures.remove(&handle.0);
    }

    fn create_sampler(&mut self, _desc: &SamplerDesc) -> Result<SamplerHandle> {
        let id = self.next();
        self.samplers.insert(id);
        Ok(SamplerHandle(id))
    }

    fn destroy_sampler(&mut self, handle: SamplerHandle) {
        self.samplers.remove(&handle.0);
    }

    fn create_mesh(&mut self, desc: &MeshDesc) -> Result<MeshHandle> {
        if desc.vertex_count == 0 || desc.vertex_data.is_empty() {
            return Err(Error::BackendError(format!("Mesh '{}' has no vertices", desc.name)));
        }
        let id = self.next();
        self.meshes.insert(id);
        Ok(MeshHandle(id))
    }

    fn destroy_mesh(&mut self, handle: MeshHandle) {
        self.meshes.remove(&handle.0);
    }

    fn create_shader(&mut self, desc: &ShaderDesc) -> Result<ShaderHandle> {
        if desc.vs_source.is_empty() || desc.fs_source.is_empty() {
            return Err(Error::BackendError(format!("Shader '{}' has an empty stage", desc.name)));
        }
        let id = self.next();
        self.shaders.insert(id);
        Ok(ShaderHandle(id))
    }

    fn destroy_shader(&mut self, handle: ShaderHandle) {
        self.shaders.remove(&handle.0);
    }

    fn stats(&self) -> DeviceStats {
        DeviceStats {
            textures: self.textures.len(),
            samplers: self.samplers.len(),
            meshes: self.meshes.len(),
            shaders: self.shaders.len(),
        }
    }
}
