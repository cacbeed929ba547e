/// GraphicsDevice trait - GPU resource factory interface
///
/// The resource layer never talks to a graphics API directly. Textures,
/// samplers, meshes and shaders are requested through this trait, which
/// hands back opaque handles that are later given back to `destroy_*`.

use crate::error::Result;

// ============================================================================
// Handles
// ============================================================================

/// Opaque handle to a GPU texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Opaque handle to a GPU sampler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SamplerHandle(pub u64);

/// Opaque handle to GPU vertex/index buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// Opaque handle to a linked GPU shader program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u64);

// ============================================================================
// Formats and settings
// ============================================================================

/// Pixel layout of uploaded image data (8 bits per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    R,
    Rgb,
    Rgba,
}

impl ImageFormat {
    /// Map a channel count to a format (1, 3 and 4 channels are supported)
    pub fn from_channels(channels: u32) -> Option<Self> {
        match channels {
            1 => Some(ImageFormat::R),
            3 => Some(ImageFormat::Rgb),
            4 => Some(ImageFormat::Rgba),
            _ => None,
        }
    }

    pub fn channels(self) -> u32 {
        match self {
            ImageFormat::R => 1,
            ImageFormat::Rgb => 3,
            ImageFormat::Rgba => 4,
        }
    }
}

/// Texture filtering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureFiltering {
    #[default]
    Nearest,
    Linear,
}

impl TextureFiltering {
    /// Parse a manifest value ("nearest", "linear")
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "nearest" => Some(TextureFiltering::Nearest),
            "linear" => Some(TextureFiltering::Linear),
            _ => None,
        }
    }
}

/// What a texture is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureUsage {
    #[default]
    Diffuse,
    Normal,
    RenderTarget,
}

/// Vertex layout of mesh data and shader input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VertexFormat {
    /// Position + texture coordinates
    Vertex3DT,
    /// Position + normal
    Vertex3DN,
    /// Position + texture coordinates + normal
    #[default]
    Vertex3DTN,
}

impl VertexFormat {
    /// Parse a manifest value ("VERTEX_3DT", "VERTEX_3DN", "VERTEX_3DTN")
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "VERTEX_3DT" => Some(VertexFormat::Vertex3DT),
            "VERTEX_3DN" => Some(VertexFormat::Vertex3DN),
            "VERTEX_3DTN" => Some(VertexFormat::Vertex3DTN),
            _ => None,
        }
    }
}

// ============================================================================
// Descriptors
// ============================================================================

/// Texture creation descriptor
#[derive(Debug, Clone)]
pub struct TextureDesc<'a> {
    /// Debug name (the texture manifest name)
    pub name: &'a str,
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    pub usage: TextureUsage,
    /// Generate the mipmap chain after upload
    pub mipmaps: bool,
    /// Tightly packed pixel rows
    pub data: &'a [u8],
}

/// Sampler creation descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerDesc {
    pub mipmaps: bool,
    pub filtering: TextureFiltering,
}

/// Mesh creation descriptor
#[derive(Debug, Clone)]
pub struct MeshDesc<'a> {
    pub name: &'a str,
    pub format: VertexFormat,
    /// Interleaved vertex bytes laid out according to `format`
    pub vertex_data: &'a [u8],
    pub vertex_count: u32,
    /// Optional index buffer
    pub indices: Option<&'a [u32]>,
}

/// Shader program creation descriptor
#[derive(Debug, Clone)]
pub struct ShaderDesc<'a> {
    pub name: &'a str,
    pub vs_source: &'a str,
    pub fs_source: &'a str,
    pub vs_version: u32,
    pub fs_version: u32,
    pub input_format: VertexFormat,
    pub num_outputs: u32,
}

/// Live GPU object counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceStats {
    pub textures: usize,
    pub samplers: usize,
    pub meshes: usize,
    pub shaders: usize,
}

// ============================================================================
// GraphicsDevice trait
// ============================================================================

/// GPU resource factory
///
/// Implemented by backends. Every `create_*` either succeeds with a handle or
/// returns an error; `destroy_*` must tolerate handles it does not know.
pub trait GraphicsDevice: Send + Sync {
    /// Upload an image and create a texture
    fn create_texture(&mut self, desc: &TextureDesc) -> Result<TextureHandle>;

    /// Destroy a texture
    fn destroy_texture(&mut self, handle: TextureHandle);

    /// Create a sampler
    fn create_sampler(&mut self, desc: &SamplerDesc) -> Result<SamplerHandle>;

    /// Destroy a sampler
    fn destroy_sampler(&mut self, handle: SamplerHandle);

    /// Upload vertex (and index) data
    fn create_mesh(&mut self, desc: &MeshDesc) -> Result<MeshHandle>;

    /// Destroy mesh buffers
    fn destroy_mesh(&mut self, handle: MeshHandle);

    /// Compile and link a shader program
    fn create_shader(&mut self, desc: &ShaderDesc) -> Result<ShaderHandle>;

    /// Destroy a shader program
    fn destroy_shader(&mut self, handle: ShaderHandle);

    /// Number of live objects of each type
    fn stats(&self) -> DeviceStats;
}
