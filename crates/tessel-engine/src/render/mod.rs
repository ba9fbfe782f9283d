//! Device seam between [`Batch`](crate::batch::Batch) and the GPU.
//!
//! A batch renders through any [`GraphicsDevice`]. Two ship with the crate:
//! [`WgpuDevice`] draws with wgpu, [`RecordingDevice`] only records what it
//! was asked to do.
//!
//! Convention:
//! - Draw matrices map batch space (top-left origin, +Y down) to clip space.
//! - Scissor rects arrive in target pixels, already clamped.

mod backend;
mod gpu;
mod recording;
mod scissor;

pub use backend::{DrawCall, GraphicsDevice, MeshHandle, RenderTarget, ScissorRect};
pub use gpu::{WgpuDevice, WgpuDeviceConfig, WgpuTarget};
pub use recording::{RecordedDraw, RecordingDevice, RecordingTarget};

pub(crate) use scissor::clip_to_scissor;
