//! Scene management module
//!
//! Provides the entity hierarchy, the scene resource with its render index
//! (RenderMap + LightList) and current-scene tracking.

mod entity_tree;
mod scene;
mod scene_manager;

pub use entity_tree::{
    EntityKey, EntityTree, Entity, EntityKind,
    Transform, LightParams,
};
pub use scene::{Scene, RenderMap, LightList};
pub use scene_manager::SceneManager;
