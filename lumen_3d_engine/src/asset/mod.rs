/// Asset module - image, mesh and text import

pub mod asset_loader;
pub mod fs_asset_loader;

pub use asset_loader::*;
pub use fs_asset_loader::FsAssetLoader;

#[cfg(test)]
pub mod memory_asset_loader;

#[cfg(test)]
#[path = "asset_tests.rs"]
mod tests;
