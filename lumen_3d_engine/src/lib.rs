/*!
# Lumen 3D Engine

Resource lifecycle core of the Lumen 3D engine.

Content is described by named, immutable **manifests** (textures, materials,
meshes, shaders, entities, objects, lights, scenes). The **ResourceManager**
turns a manifest name into a shared, reference-counted resource, loading its
dependencies through itself, and a garbage collector unloads what nobody
references anymore. Loading a **scene** builds an entity hierarchy and a
render index grouping drawable objects by material, plus the list of lights.

## Architecture

- **GraphicsDevice**: GPU object factory trait (textures, samplers, meshes, shaders)
- **AssetLoader**: File access trait (text, decoded images, imported meshes)
- **ResourceManager**: Manifest registry, resource cache, garbage collector
- **EntityTree**: Parent/child transform hierarchy
- **Scene**: Scene resource with its RenderMap and LightList
- **Engine**: Context owning all of the above

There is no global state: everything is reached through an `Engine` (or a
`ResourceManager`) created by the application.
*/

// Internal modules
mod error;
mod engine;
mod config;
pub mod log;
pub mod graphics_device;
pub mod asset;
pub mod resource;
pub mod scene;

// Main lumen3d namespace module
pub mod lumen3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine context and configuration
    pub use crate::engine::Engine;
    pub use crate::config::{EngineConfig, LoggingConfig};

    // Logging sub-module (types only; the engine_* macros are exported at the crate root)
    pub mod log {
        pub use crate::log::{
            Logger, LogEntry, LogSeverity, Log,
            DefaultLogger, FileLogger, CompositeLogger,
        };
    }

    // GPU object factory
    pub mod graphics_device {
        pub use crate::graphics_device::*;
    }

    // File access
    pub mod asset {
        pub use crate::asset::*;
    }

    // Manifests and resources
    pub mod resource {
        pub use crate::resource::*;
    }

    // Entity hierarchy, scenes and render index
    pub mod scene {
        pub use crate::scene::*;
    }
}

// Re-export math library
pub use glam;
