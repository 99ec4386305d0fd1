/// Device module - the GPU seam used by the shader lifecycle

pub mod graphics_device;

pub use graphics_device::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_device;
