/// Graphics device module - GPU resource factory trait and implementations

pub mod graphics_device;
pub mod headless;

pub use graphics_device::*;
pub use headless::HeadlessGraphicsDevice;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;

#[cfg(test)]
#[path = "graphics_device_tests.rs"]
mod tests;
