use std::collections::HashSet;
use std::ops::Range;

use anyhow::{bail, Result};

use crate::batch::Vertex;
use crate::coords::Mat4x4;
use crate::paint::BlendMode;
use crate::resource::{MaterialId, TextureId};

use super::{DrawCall, GraphicsDevice, MeshHandle, RenderTarget, ScissorRect};

/// Headless target of a fixed size.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RecordingTarget {
    pub width: u32,
    pub height: u32,
    pub origin_bottom_left: bool,
}

impl RecordingTarget {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height, origin_bottom_left: false }
    }

    pub const fn bottom_left(width: u32, height: u32) -> Self {
        Self { width, height, origin_bottom_left: true }
    }
}

impl RenderTarget for RecordingTarget {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn origin_bottom_left(&self) -> bool {
        self.origin_bottom_left
    }
}

/// A draw call as seen by [`RecordingDevice`], with handles reduced to ids.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    pub mesh: u64,
    pub indices: Range<u32>,
    pub material: MaterialId,
    pub blend: BlendMode,
    pub scissor: ScissorRect,
    pub matrix_uniform: String,
    pub matrix: Mat4x4,
    pub texture_uniform: String,
    pub texture: TextureId,
    pub flip_vertically: bool,
}

/// Device that draws nothing and remembers everything.
///
/// Useful for tests and for inspecting what a batch would submit.
#[derive(Debug, Default)]
pub struct RecordingDevice {
    next_mesh: u64,
    live: HashSet<u64>,

    /// Contents of the most recent upload.
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub upload_count: usize,
    pub draws: Vec<RecordedDraw>,
    pub finish_count: usize,

    /// Makes the next `upload` fail.
    pub fail_next_upload: bool,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Meshes created and not yet released.
    pub fn live_meshes(&self) -> usize {
        self.live.len()
    }
}

impl GraphicsDevice for RecordingDevice {
    type Target = RecordingTarget;

    fn create_mesh(&mut self) -> Result<MeshHandle> {
        self.next_mesh += 1;
        self.live.insert(self.next_mesh);
        Ok(MeshHandle::new(self.next_mesh))
    }

    fn upload(&mut self, mesh: &MeshHandle, vertices: &[Vertex], indices: &[u32]) -> Result<()> {
        if std::mem::take(&mut self.fail_next_upload) {
            bail!("recording device: upload refused");
        }
        if !self.live.contains(&mesh.id()) {
            bail!("recording device: mesh {} is not live", mesh.id());
        }
        self.vertices.clear();
        self.vertices.extend_from_slice(vertices);
        self.indices.clear();
        self.indices.extend_from_slice(indices);
        self.upload_count += 1;
        Ok(())
    }

    fn draw(&mut self, _target: &mut RecordingTarget, mesh: &MeshHandle, call: &DrawCall<'_>) -> Result<()> {
        if call.indices.end as usize > self.indices.len() {
            bail!(
                "recording device: draw range {:?} exceeds {} uploaded indices",
                call.indices,
                self.indices.len()
            );
        }
        self.draws.push(RecordedDraw {
            mesh: mesh.id(),
            indices: call.indices.clone(),
            material: call.material.id(),
            blend: call.blend,
            scissor: call.scissor,
            matrix_uniform: call.matrix_uniform.to_owned(),
            matrix: call.matrix,
            texture_uniform: call.texture_uniform.to_owned(),
            texture: call.texture.id(),
            flip_vertically: call.flip_vertically,
        });
        Ok(())
    }

    fn finish(&mut self, _target: &mut RecordingTarget) -> Result<()> {
        self.finish_count += 1;
        Ok(())
    }

    fn release_mesh(&mut self, mesh: MeshHandle) {
        self.live.remove(&mesh.id());
    }
}
