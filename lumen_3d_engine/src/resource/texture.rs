/// Texture resource - a GPU texture decoded from `textures/<name>`.

use crate::error::{Error, Result};
use crate::graphics_device::{ImageFormat, TextureDesc, TextureHandle, TextureUsage};
use crate::engine_debug;
use super::manifest::TextureManifest;
use super::resource::UnloadContext;
use super::resource_manager::ResourceManager;

#[derive(Debug, Default)]
pub struct Texture {
    handle: Option<TextureHandle>,
    width: u32,
    height: u32,
    format: Option<ImageFormat>,
    usage: TextureUsage,
}

impl Texture {
    // ===== ACCESSORS =====

    /// GPU handle, None while unloaded
    pub fn handle(&self) -> Option<TextureHandle> {
        self.handle
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> Option<ImageFormat> {
        self.format
    }

    pub fn usage(&self) -> TextureUsage {
        self.usage
    }

    // ===== LIFECYCLE =====

    pub(crate) fn load(&mut self, name: &str, manifest: &TextureManifest, rm: &mut ResourceManager) -> Result<()> {
        let image = rm.loader().load_image(&format!("textures/{}", name))?;

        let Some(format) = ImageFormat::from_channels(image.channels) else {
            return Err(Error::InvalidManifest(format!(
                "texture '{}' has {} channels (1, 3 or 4 supported)",
                name, image.channels
            )));
        };

        let handle = rm.device()?.create_texture(&TextureDesc {
            name,
            width: image.width,
            height: image.height,
            format,
            usage: manifest.usage,
            mipmaps: manifest.mipmapping,
            data: &image.pixels,
        })?;

        self.handle = Some(handle);
        self.width = image.width;
        self.height = image.height;
        self.format = Some(format);
        self.usage = manifest.usage;

        engine_debug!(rm.log(), "lumen3d::Texture",
            "'{}' uploaded ({}x{} {:?})", name, image.width, image.height, format);
        Ok(())
    }

    pub(crate) fn unload(&mut self, ctx: &mut UnloadContext) {
        if let Some(handle) = self.handle.take() {
            ctx.with_device(|device| device.destroy_texture(handle));
        }
        self.format = None;
    }
}
