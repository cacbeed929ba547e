/// Shader resource - a linked GPU program built from two source files.

use crate::error::Result;
use crate::graphics_device::{ShaderDesc, ShaderHandle};
use crate::engine_debug;
use super::manifest::{ShaderManifest, UniformType};
use super::resource::UnloadContext;
use super::resource_manager::ResourceManager;

#[derive(Debug, Default)]
pub struct Shader {
    handle: Option<ShaderHandle>,
    uniforms: Vec<(String, UniformType)>,
}

impl Shader {
    pub fn handle(&self) -> Option<ShaderHandle> {
        self.handle
    }

    /// Uniform name -> engine value
    pub fn uniforms(&self) -> &[(String, UniformType)] {
        &self.uniforms
    }

    /// Name of the uniform bound to `value`, if any
    pub fn uniform_for(&self, value: UniformType) -> Option<&str> {
        self.uniforms.iter().find(|(_, v)| *v == value).map(|(n, _)| n.as_str())
    }

    pub(crate) fn load(&mut self, name: &str, manifest: &ShaderManifest, rm: &mut ResourceManager) -> Result<()> {
        let vs_source = rm.loader().read_text(&format!("shaders/{}", manifest.vs))?;
        let fs_source = rm.loader().read_text(&format!("shaders/{}", manifest.fs))?;

        let handle = rm.device()?.create_shader(&ShaderDesc {
            name,
            vs_source: &vs_source,
            fs_source: &fs_source,
            vs_version: manifest.vs_version,
            fs_version: manifest.fs_version,
            input_format: manifest.input_format,
            num_outputs: manifest.num_outputs,
        })?;

        self.handle = Some(handle);
        self.uniforms = manifest.uniforms.clone();

        engine_debug!(rm.log(), "lumen3d::Shader",
            "'{}' linked ({} + {}, {} uniforms)", name, manifest.vs, manifest.fs, self.uniforms.len());
        Ok(())
    }

    pub(crate) fn unload(&mut self, ctx: &mut UnloadContext) {
        if let Some(handle) = self.handle.take() {
            ctx.with_device(|device| device.destroy_shader(handle));
        }
        self.uniforms.clear();
    }
}
