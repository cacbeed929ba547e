/// Lumen3D Engine - context owning the engine subsystems
///
/// The engine holds the log, the graphics device, the asset loader, the
/// resource manager and the scene manager. There is no global state:
/// applications create an `Engine` and pass it (or its parts) around.
///
/// # Example
///
/// ```no_run
/// use std::sync::{Arc, Mutex};
/// use lumen_3d_engine::lumen3d::{Engine, EngineConfig};
/// use lumen_3d_engine::lumen3d::asset::FsAssetLoader;
/// use lumen_3d_engine::lumen3d::graphics_device::HeadlessGraphicsDevice;
///
/// let config = EngineConfig::from_file("data/main.json")?;
/// let loader = Arc::new(FsAssetLoader::new(&config.resource_path));
/// let device = Arc::new(Mutex::new(HeadlessGraphicsDevice::new()));
///
/// let mut engine = Engine::new(config, device, loader)?;
/// engine.init_resources()?;
/// engine.load_scene("room")?;
/// engine.update(0.016);
/// engine.shutdown();
/// # Ok::<(), lumen_3d_engine::lumen3d::Error>(())
/// ```

use std::sync::{Arc, Mutex};
use crate::asset::AssetLoader;
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::graphics_device::GraphicsDevice;
use crate::log::{CompositeLogger, DefaultLogger, FileLogger, Log, LogSeverity, Logger};
use crate::resource::{ResourceKey, ResourceManager};
use crate::scene::{Scene, SceneManager};
use crate::{engine_err, engine_error, engine_info, engine_warn};

const SOURCE: &str = "lumen3d::Engine";

pub struct Engine {
    config: EngineConfig,
    log: Log,
    resources: ResourceManager,
    scenes: SceneManager,
}

impl Engine {
    /// Create the engine, with log sinks built from `config.logging`
    ///
    /// Entries go to the colored console, and also to `logging.file` when
    /// one is configured.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the log file cannot be opened.
    pub fn new(
        config: EngineConfig,
        device: Arc<Mutex<dyn GraphicsDevice>>,
        loader: Arc<dyn AssetLoader>,
    ) -> Result<Self> {
        let level = config.log_severity().unwrap_or(LogSeverity::Warn);
        let logger: Arc<dyn Logger> = match &config.logging.file {
            None => Arc::new(DefaultLogger),
            Some(path) => {
                let file = FileLogger::create(path)
                    .map_err(|err| Error::Io(format!("{}: {}", path.display(), err)))?;
                let sinks: Vec<Box<dyn Logger>> = vec![Box::new(DefaultLogger), Box::new(file)];
                Arc::new(CompositeLogger::new(sinks))
            }
        };
        Ok(Self::with_log(config, device, loader, Log::from_shared(logger, level)))
    }

    /// Create the engine around an existing log handle
    pub fn with_log(
        config: EngineConfig,
        device: Arc<Mutex<dyn GraphicsDevice>>,
        loader: Arc<dyn AssetLoader>,
        log: Log,
    ) -> Self {
        if config.log_severity().is_none() {
            engine_warn!(log, SOURCE, "Unknown log level \"{}\", using WARN", config.logging.level);
        }
        engine_info!(log, SOURCE, "Engine created (resources in {})", config.resource_path.display());

        Self {
            resources: ResourceManager::new(device, loader, log.clone()),
            scenes: SceneManager::new(log.clone()),
            config,
            log,
        }
    }

    /// Register everything the configuration lists
    ///
    /// Material libraries first (scenes refer to materials), then scene
    /// files, then the shader library. Every step is attempted; the first
    /// error is returned.
    pub fn init_resources(&mut self) -> Result<()> {
        let materials = self.resources.load_material_libs(&self.config.materials);
        let scenes = self.resources.create_scene_manifests(&self.config.scenes);
        let shaders = match &self.config.shaders {
            Some(lib) => self.resources.load_shader_lib(lib),
            None => Ok(()),
        };

        let result = materials.and(scenes).and(shaders);
        match &result {
            Ok(()) => engine_info!(self.log, SOURCE, "{} manifests registered", self.resources.registry().len()),
            Err(err) => engine_error!(self.log, SOURCE, "Resource initialisation incomplete: {}", err),
        }
        result
    }

    // ===== ACCESSORS =====

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn log(&self) -> &Log {
        &self.log
    }

    pub fn resources(&self) -> &ResourceManager {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceManager {
        &mut self.resources
    }

    pub fn scenes(&self) -> &SceneManager {
        &self.scenes
    }

    // ===== SCENES =====

    /// Make `name` the current scene
    pub fn load_scene(&mut self, name: &str) -> Result<ResourceKey> {
        self.scenes.load_scene(&mut self.resources, name)
    }

    pub fn current_scene(&self) -> Option<&Scene> {
        self.scenes.current(&self.resources)
    }

    /// Propagate transforms of the current scene
    pub fn update(&mut self, dt: f32) {
        self.scenes.update(&mut self.resources, dt);
    }

    pub fn collect_garbage(&mut self) -> usize {
        self.resources.collect_garbage()
    }

    /// Unload the current scene and collect everything left unreferenced
    pub fn shutdown(&mut self) {
        if let Err(err) = self.scenes.unload_current(&mut self.resources) {
            let _ = engine_err!(self.log, SOURCE, err);
        }
        let unused = self.resources.collect_all_garbage();
        engine_info!(self.log, SOURCE, "Engine shut down ({} unreferenced resources)", unused);
        self.resources.log_stats();
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
