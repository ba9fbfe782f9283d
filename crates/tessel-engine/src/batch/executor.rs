use anyhow::{Context, Result, bail};

use crate::coords::Mat4x4;
use crate::render::{DrawCall, GraphicsDevice, RenderTarget, clip_to_scissor};
use crate::resource::UniformKind;

use super::Batch;

impl Batch {
    /// Draws everything accumulated so far into `target`.
    ///
    /// Geometry is projected with a pixel-space orthographic projection of
    /// the target. The batch keeps its contents and its open batch, so
    /// geometry drawn afterwards under the same state extends the last draw
    /// call of the next render. Call [`clear`](Self::clear) to start the
    /// next frame.
    pub fn render<D: GraphicsDevice>(&mut self, device: &mut D, target: &mut D::Target) -> Result<()> {
        self.render_with_matrix(device, target, Mat4x4::IDENTITY)
    }

    /// Like [`render`](Self::render), with `matrix` applied to the geometry
    /// before the target projection (a camera, for instance).
    pub fn render_with_matrix<D: GraphicsDevice>(
        &mut self,
        device: &mut D,
        target: &mut D::Target,
        matrix: Mat4x4,
    ) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let (width, height) = target.size();
        let flip = target.origin_bottom_left();
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        let projection = if flip {
            Mat4x4::ortho_offcenter(0.0, w, 0.0, h, -1.0, 1.0)
        } else {
            Mat4x4::ortho_offcenter(0.0, w, h, 0.0, -1.0, 1.0)
        };
        let transform = matrix * projection;

        self.check_uniforms()?;

        if self.mesh.is_none() {
            let mesh = device.create_mesh().context("creating batch mesh")?;
            log::debug!("Batch: created device mesh {}", mesh.id());
            self.mesh = Some(mesh);
        }
        let Some(mesh) = self.mesh.as_ref() else { return Ok(()) };
        device
            .upload(mesh, self.buffer.vertices(), self.buffer.indices())
            .context("uploading batch mesh")?;

        self.compiler.set_flip(flip);

        // Stable: equal layers keep submission order.
        let batches = &self.compiler;
        self.sorted.clear();
        self.sorted.extend(0..batches.len());
        self.sorted.sort_by_key(|&i| batches.get(i).layer);

        let mut skipped = 0usize;
        for &i in &self.sorted {
            let batch = batches.get(i);
            let Some(scissor) = clip_to_scissor(batch.scissor, width, height, flip) else {
                skipped += 1;
                continue;
            };
            let call = DrawCall {
                indices: batch.index_range(),
                material: &batch.material,
                blend: batch.blend,
                scissor,
                matrix_uniform: &self.matrix_uniform,
                matrix: transform,
                texture_uniform: &self.texture_uniform,
                texture: &batch.texture,
                flip_vertically: batch.flip_vertically,
            };
            device
                .draw(target, mesh, &call)
                .with_context(|| format!("issuing draw call for batch {i}"))?;
        }

        log::trace!(
            "Batch: rendered {} batches ({} clipped away), {} triangles",
            batches.len() - skipped,
            skipped,
            self.buffer.index_len() / 3
        );

        device.finish(target).context("finishing batch render")
    }

    /// Releases the device mesh. The batch stays usable; the next render
    /// creates a new mesh.
    pub fn dispose<D: GraphicsDevice>(&mut self, device: &mut D) {
        if let Some(mesh) = self.mesh.take() {
            log::debug!("Batch: releasing device mesh {}", mesh.id());
            device.release_mesh(mesh);
        }
    }

    /// Every material about to be drawn must expose the two uniforms the batch binds.
    fn check_uniforms(&self) -> Result<()> {
        for batch in self.compiler.iter() {
            let shader = batch.material.shader();
            if !shader.has_uniform(&self.matrix_uniform, UniformKind::Mat4x4) {
                bail!(
                    "shader '{}' has no mat4x4 uniform named '{}'",
                    shader.label(),
                    self.matrix_uniform
                );
            }
            if !shader.has_uniform(&self.texture_uniform, UniformKind::Texture2D) {
                bail!(
                    "shader '{}' has no texture uniform named '{}'",
                    shader.label(),
                    self.texture_uniform
                );
            }
        }
        Ok(())
    }
}
