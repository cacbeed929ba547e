//! Lumen3D demo
//!
//! Loads `data/main.json` (or the file given as first argument), registers
//! the configured resources, loads a scene, ticks it a few times, prints
//! the manifest and resource reports, then shuts the engine down.
//!
//! Usage: lumen3d_demo [config.json] [scene]

use std::sync::{Arc, Mutex};
use lumen_3d_engine::lumen3d::{Engine, EngineConfig, Error, Result};
use lumen_3d_engine::lumen3d::asset::FsAssetLoader;
use lumen_3d_engine::lumen3d::graphics_device::{GraphicsDevice, HeadlessGraphicsDevice};

const TICKS: usize = 3;

fn main() {
    if let Err(err) = run() {
        eprintln!("lumen3d_demo: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| "data/main.json".to_string());
    let config = EngineConfig::from_file(&config_path)?;

    let scene = match args.next().or_else(|| config.scenes.first().cloned()) {
        Some(scene) => scene,
        None => return Err(Error::InvalidManifest(format!("{}: no scene to load", config_path))),
    };

    let device = Arc::new(Mutex::new(HeadlessGraphicsDevice::new()));
    let loader = Arc::new(FsAssetLoader::new(&config.resource_path));
    let mut engine = Engine::new(config, device.clone(), loader)?;

    engine.init_resources()?;
    engine.load_scene(&scene)?;

    if let Some(current) = engine.current_scene() {
        println!(
            "Scene '{}': {} materials, {} objects, {} lights",
            scene,
            current.render_map().len(),
            current.render_map().object_count(),
            current.light_list().len(),
        );
    }
    for _ in 0..TICKS {
        engine.update(1.0 / 60.0);
    }

    println!("{}", engine.resources().manifest_report());
    println!("{}", engine.resources().resource_report());

    engine.shutdown();
    println!("{}", engine.resources().resource_report());

    if let Ok(device) = device.lock() {
        let stats = device.stats();
        println!(
            "GPU objects left: {} textures, {} samplers, {} meshes, {} shaders",
            stats.textures, stats.samplers, stats.meshes, stats.shaders
        );
    }
    Ok(())
}
