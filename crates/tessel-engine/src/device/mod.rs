//! Headless GPU context.
//!
//! Creates the wgpu Instance/Adapter/Device/Queue used by
//! [`WgpuDevice`](crate::render::WgpuDevice). Window and surface management
//! stay with the host application.

mod gpu;
mod init;

pub use gpu::Gpu;
pub use init::GpuInit;
