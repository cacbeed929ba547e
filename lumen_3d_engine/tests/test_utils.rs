//! Shared helpers for integration tests
//!
//! Builds a complete resource directory (textures, meshes, material, scene
//! and shader libraries, main.json) inside a temporary directory.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use image::{Rgba, RgbaImage};
use lumen_3d_engine::lumen3d::graphics_device::{GraphicsDevice, HeadlessGraphicsDevice};
use lumen_3d_engine::lumen3d::log::{LogEntry, LogSeverity, Logger};
use serde_json::json;
use tempfile::TempDir;

pub const TRIANGLE_OBJ: &str = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1
";

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Resource directory with:
/// - textures/brick.png (4x4 RGBA)
/// - meshes/table.obj (one triangle)
/// - materials/common.json: wall (brick.png), floor (no texture)
/// - scenes/room.json: table, cube1 (child of table), lamp; sun
/// - shaders/default.json + basic.vs/basic.fs
/// - main.json pointing at all of the above
pub fn data_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::create_dir_all(root.join("textures")).unwrap();
    RgbaImage::from_pixel(4, 4, Rgba([200, 100, 50, 255]))
        .save(root.join("textures/brick.png"))
        .unwrap();

    write(root, "meshes/table.obj", TRIANGLE_OBJ);

    let materials = json!({ "materials": [
        { "name": "wall", "diffuse": [1], "diffuseMap": "brick.png",
          "mapping": { "repeat": [2, 2], "filtering": "linear" } },
        { "name": "floor", "ambient": [0.1, 0.1, 0.1] },
    ]});
    write(root, "materials/common.json", &materials.to_string());

    let room = json!({
        "objects": [
            { "name": "table", "mesh": "table.obj", "material": "floor",
              "transform": { "position": [0, 1, 0] } },
            { "name": "cube1", "mesh": "__cube__", "material": "wall", "parent": "table",
              "transform": { "position": [2, 0, 0], "scaling": [0.5] } },
            { "name": "lamp", "mesh": "__plane__", "material": "wall" },
        ],
        "lights": [
            { "name": "sun", "type": "sun", "diffuse": [1, 0.9, 0.8], "power": 2.0 },
        ],
    });
    write(root, "scenes/room.json", &room.to_string());

    let shaders = json!({
        "default": "basic",
        "shaders": [{ "name": "basic", "vs": "basic.vs", "fs": "basic.fs",
                      "uniforms": { "uMVP": "_MVP_", "uDiffuse": "_TEX_DIFFUSE_" } }],
    });
    write(root, "shaders/default.json", &shaders.to_string());
    write(root, "shaders/basic.vs", "#version 330\nvoid main() {}\n");
    write(root, "shaders/basic.fs", "#version 330\nvoid main() {}\n");

    let main = json!({
        "resource_path": root,
        "logging": { "level": "ERROR" },
        "materials": ["common"],
        "scenes": ["room"],
        "shaders": "default",
    });
    write(root, "main.json", &main.to_string());

    dir
}

/// Headless device, plus the same device as a trait object
pub fn headless() -> (Arc<Mutex<HeadlessGraphicsDevice>>, Arc<Mutex<dyn GraphicsDevice>>) {
    let device = Arc::new(Mutex::new(HeadlessGraphicsDevice::new()));
    let shared: Arc<Mutex<dyn GraphicsDevice>> = device.clone();
    (device, shared)
}

/// Logger keeping every entry in memory
#[derive(Clone, Default)]
pub struct MemoryLogger {
    pub entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MemoryLogger {
    pub fn count(&self, severity: LogSeverity) -> usize {
        self.entries.lock().unwrap().iter().filter(|e| e.severity == severity).count()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.entries.lock().unwrap().iter().any(|e| e.message.contains(needle))
    }
}

impl Logger for MemoryLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}
