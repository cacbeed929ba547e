/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Wraps a HeadlessGraphicsDevice for the handle bookkeeping, records every
/// call as a string ("create_texture:brick.png", "destroy_mesh:3", ...) and
/// can be told to refuse the creation of a given object.

use crate::error::{Error, Result};
use super::graphics_device::{
    DeviceStats, GraphicsDevice, MeshDesc, MeshHandle, SamplerDesc, SamplerHandle,
    ShaderDesc, ShaderHandle, TextureDesc, TextureHandle,
};
use super::headless::HeadlessGraphicsDevice;

#[derive(Debug, Default)]
pub struct MockGraphicsDevice {
    inner: HeadlessGraphicsDevice,
    /// Recorded calls, in order
    pub calls: Vec<String>,
    /// Creation requests matching one of these ("texture:brick.png",
    /// "mesh:*", ...) fail with a BackendError
    pub fail_on: Vec<String>,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `create_<kind>` fail for `name` ("*" matches every name)
    pub fn fail(&mut self, kind: &str, name: &str) {
        self.fail_on.push(format!("{}:{}", kind, name));
    }

    /// Number of recorded calls starting with `prefix`
    pub fn count(&self, prefix: &str) -> usize {
        self.calls.iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn check(&mut self, kind: &str, name: &str) -> Result<()> {
        self.calls.push(format!("create_{}:{}", kind, name));
        let exact = format!("{}:{}", kind, name);
        let any = format!("{}:*", kind);
        if self.fail_on.iter().any(|f| *f == exact || *f == any) {
            return Err(Error::BackendError(format!("mock refused {} '{}'", kind, name)));
        }
        Ok(())
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_texture(&mut self, desc: &TextureDesc) -> Result<TextureHandle> {
        self.check("texture", desc.name)?;
        self.inner.create_texture(desc)
    }

    fn destroy_texture(&mut self, handle: TextureHandle) {
        self.calls.push(format!("destroy_texture:{}", handle.0));
        self.inner.destroy_texture(handle);
    }

    fn create_sampler(&mut self, desc: &SamplerDesc) -> Result<SamplerHandle> {
        self.check("sampler", "")?;
        self.inner.create_sampler(desc)
    }

    fn destroy_sampler(&mut self, handle: SamplerHandle) {
        self.calls.push(format!("destroy_sampler:{}", handle.0));
        self.inner.destroy_sampler(handle);
    }

    fn create_mesh(&mut self, desc: &MeshDesc) -> Result<MeshHandle> {
        self.check("mesh", desc.name)?;
        self.inner.create_mesh(desc)
    }

    fn destroy_mesh(&mut self, handle: MeshHandle) {
        self.calls.push(format!("destroy_mesh:{}", handle.0));
        self.inner.destroy_mesh(handle);
    }

    fn create_shader(&mut self, desc: &ShaderDesc) -> Result<ShaderHandle> {
        self.check("shader", desc.name)?;
        self.inner.create_shader(desc)
    }

    fn destroy_shader(&mut self, handle: ShaderHandle) {
        self.calls.push(format!("destroy_shader:{}", handle.0));
        self.inner.destroy_shader(handle);
    }

    fn stats(&self) -> DeviceStats {
        self.inner.stats()
    }
}
