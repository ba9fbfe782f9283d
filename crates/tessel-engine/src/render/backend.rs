use std::ops::Range;

use anyhow::Result;

use crate::batch::Vertex;
use crate::coords::Mat4x4;
use crate::paint::BlendMode;
use crate::resource::{MaterialRef, TextureRef};

/// Device-side mesh owned by exactly one batch.
///
/// Not `Clone`: the owner hands it back through
/// [`GraphicsDevice::release_mesh`] when done.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct MeshHandle(u64);

impl MeshHandle {
    /// Wraps a device-specific mesh id. Only devices should create handles.
    #[inline]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Scissor rectangle in target pixels, already clamped to the target.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ScissorRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ScissorRect {
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

/// Something a device can draw into.
pub trait RenderTarget {
    /// Size in pixels.
    fn size(&self) -> (u32, u32);

    /// True when row 0 of the target is the bottom row (typical for
    /// OpenGL framebuffers). Batches then render flipped.
    fn origin_bottom_left(&self) -> bool {
        false
    }
}

/// One draw call of one compiled batch.
#[derive(Debug)]
pub struct DrawCall<'a> {
    /// Index range into the mesh's index buffer.
    pub indices: Range<u32>,
    pub material: &'a MaterialRef,
    pub blend: BlendMode,
    pub scissor: ScissorRect,
    /// Uniform that receives [`matrix`](Self::matrix).
    pub matrix_uniform: &'a str,
    /// Caller transform composed with the target projection.
    pub matrix: Mat4x4,
    /// Uniform that receives [`texture`](Self::texture).
    pub texture_uniform: &'a str,
    pub texture: &'a TextureRef,
    pub flip_vertically: bool,
}

/// The graphics backend a [`Batch`](crate::batch::Batch) renders through.
///
/// A render is one `upload`, one `draw` per batch in paint order, then
/// `finish`. Errors abort the render and reach the caller unchanged.
pub trait GraphicsDevice {
    type Target: RenderTarget;

    /// Allocates an empty mesh.
    fn create_mesh(&mut self) -> Result<MeshHandle>;

    /// Replaces the mesh contents.
    fn upload(&mut self, mesh: &MeshHandle, vertices: &[Vertex], indices: &[u32]) -> Result<()>;

    fn draw(&mut self, target: &mut Self::Target, mesh: &MeshHandle, call: &DrawCall<'_>) -> Result<()>;

    /// Called after the last draw of a render. Devices that record draws
    /// submit them here.
    fn finish(&mut self, _target: &mut Self::Target) -> Result<()> {
        Ok(())
    }

    fn release_mesh(&mut self, mesh: MeshHandle);
}
