//! wgpu implementation of [`GraphicsDevice`](super::GraphicsDevice).
//!
//! Layout expected from batch shaders:
//! - group 0, binding 0: the matrix uniform (dynamic offset per draw)
//! - group 1, binding 0: the batch texture
//! - group 1, binding 1: its sampler

mod device;
mod mesh;
mod pipeline;
mod target;

pub use device::{WgpuDevice, WgpuDeviceConfig};
pub use target::WgpuTarget;
