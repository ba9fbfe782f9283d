use std::collections::HashMap;
use std::ops::Range;

use anyhow::{Context, Result, bail, ensure};

use crate::batch::Vertex;
use crate::device::Gpu;
use crate::paint::{BlendFactor, BlendMode};
use crate::render::{DrawCall, GraphicsDevice, MeshHandle, ScissorRect};
use crate::resource::{Shader, ShaderId, Texture, TextureId, TextureRef};

use super::mesh::WgpuMesh;
use super::pipeline::{
    BatchLayouts, MATRIX_SLOT_SIZE, MatrixUniform, PipelineKey, blend_constant, create_pipeline,
};
use super::WgpuTarget;

/// Settings for [`WgpuDevice`].
#[derive(Debug, Clone)]
pub struct WgpuDeviceConfig {
    /// Filter used when sampling batch textures.
    pub sampler_filter: wgpu::FilterMode,
    /// Format of textures created with [`WgpuDevice::create_texture`].
    pub texture_format: wgpu::TextureFormat,
}

impl Default for WgpuDeviceConfig {
    fn default() -> Self {
        Self {
            sampler_filter: wgpu::FilterMode::Linear,
            texture_format: wgpu::TextureFormat::Rgba8Unorm,
        }
    }
}

struct GpuTexture {
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// A draw recorded by `draw` and encoded by `finish`.
struct PendingDraw {
    pipeline: PipelineKey,
    mesh: u64,
    texture: TextureId,
    indices: Range<u32>,
    scissor: ScissorRect,
    /// Slot of this draw's matrix in the uniform buffer.
    slot: u32,
}

/// [`GraphicsDevice`] backed by wgpu.
///
/// Draws are recorded and encoded into a single render pass on `finish`,
/// which loads the target's existing contents. Pipelines are cached per
/// (shader, blend mode, target format).
///
/// Textures drawn through this device must come from
/// [`create_texture`](Self::create_texture); the white texture is provided.
pub struct WgpuDevice {
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: WgpuDeviceConfig,

    layouts: BatchLayouts,
    sampler: wgpu::Sampler,

    shaders: HashMap<ShaderId, wgpu::ShaderModule>,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
    textures: HashMap<TextureId, GpuTexture>,
    meshes: HashMap<u64, WgpuMesh>,
    next_mesh: u64,

    matrices: Vec<MatrixUniform>,
    matrix_ubo: Option<wgpu::Buffer>,
    matrix_bind_group: Option<wgpu::BindGroup>,
    matrix_capacity: usize,

    pending: Vec<PendingDraw>,
    warned_flip: bool,
}

impl WgpuDevice {
    pub fn new(gpu: &Gpu, config: WgpuDeviceConfig) -> Self {
        let device = gpu.device().clone();
        let queue = gpu.queue().clone();
        let layouts = BatchLayouts::new(&device);

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("tessel batch sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: config.sampler_filter,
            min_filter: config.sampler_filter,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        Self {
            device,
            queue,
            config,
            layouts,
            sampler,
            shaders: HashMap::new(),
            pipelines: HashMap::new(),
            textures: HashMap::new(),
            meshes: HashMap::new(),
            next_mesh: 0,
            matrices: Vec::new(),
            matrix_ubo: None,
            matrix_bind_group: None,
            matrix_capacity: 0,
            pending: Vec::new(),
            warned_flip: false,
        }
    }

    // ── textures ──────────────────────────────────────────────────────────

    /// Uploads tightly packed RGBA8 pixels (premultiplied) and returns the
    /// handle batches draw with.
    pub fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> Result<TextureRef> {
        ensure!(width > 0 && height > 0, "texture has zero size ({width}x{height})");
        let handle = Texture::new(width, height);
        self.upload_texture(handle.id(), width, height, rgba)?;
        Ok(handle)
    }

    /// Replaces the pixels of a texture created by this device.
    pub fn update_texture(&mut self, texture: &TextureRef, rgba: &[u8]) -> Result<()> {
        ensure!(
            self.textures.contains_key(&texture.id()),
            "texture {:?} was not created by this device",
            texture.id()
        );
        self.upload_texture(texture.id(), texture.width(), texture.height(), rgba)
    }

    pub fn release_texture(&mut self, texture: &TextureRef) {
        self.textures.remove(&texture.id());
    }

    fn upload_texture(&mut self, id: TextureId, width: u32, height: u32, rgba: &[u8]) -> Result<()> {
        let expected = width as usize * height as usize * 4;
        ensure!(
            rgba.len() == expected,
            "texture data is {} bytes, expected {expected} for {width}x{height} RGBA8",
            rgba.len()
        );

        let size = wgpu::Extent3d { width, height, depth_or_array_layers: 1 };
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("tessel batch texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.config.texture_format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tessel texture bind group"),
            layout: &self.layouts.texture,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        self.textures.insert(id, GpuTexture { _texture: texture, bind_group });
        Ok(())
    }

    fn ensure_white(&mut self) -> Result<()> {
        if self.textures.contains_key(&TextureId::WHITE) {
            return Ok(());
        }
        self.upload_texture(TextureId::WHITE, 1, 1, &[255; 4])
    }

    // ── pipelines ─────────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, shader: &Shader, key: PipelineKey) {
        if self.pipelines.contains_key(&key) {
            return;
        }

        let module = self.shaders.entry(shader.id()).or_insert_with(|| {
            log::debug!("WgpuDevice: compiling shader '{}'", shader.label());
            self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(shader.label()),
                source: wgpu::ShaderSource::Wgsl(shader.source().into()),
            })
        });

        log::debug!("WgpuDevice: creating pipeline for {key:?}");
        let pipeline = create_pipeline(&self.device, &self.layouts, module, key);
        self.pipelines.insert(key, pipeline);
    }

    /// The batch pipelines bind the matrix at group 0 and the texture at group 1.
    fn check_bindings(shader: &Shader, call: &DrawCall<'_>) -> Result<()> {
        for (name, group) in [(call.matrix_uniform, 0), (call.texture_uniform, 1)] {
            let Some(info) = shader.uniform(name) else {
                bail!("shader '{}' has no uniform named '{name}'", shader.label());
            };
            ensure!(
                info.group == group && info.binding == 0,
                "uniform '{name}' of shader '{}' must be bound at group {group}, binding 0 (found group {}, binding {})",
                shader.label(),
                info.group,
                info.binding
            );
        }
        Ok(())
    }

    fn record_draw(&mut self, target: &WgpuTarget, mesh: &MeshHandle, call: &DrawCall<'_>) -> Result<()> {
        let shader = call.material.shader();
        Self::check_bindings(shader, call)?;

        if call.flip_vertically && !self.warned_flip {
            log::warn!("WgpuDevice: flip_vertically requested; wgpu targets are top-left, projection already handles it");
            self.warned_flip = true;
        }

        let Some(gpu_mesh) = self.meshes.get(&mesh.id()) else {
            bail!("mesh {} is not owned by this device", mesh.id());
        };
        ensure!(
            call.indices.end <= gpu_mesh.index_count,
            "draw range {:?} exceeds the {} uploaded indices",
            call.indices,
            gpu_mesh.index_count
        );

        if call.texture.is_white() {
            self.ensure_white()?;
        }
        ensure!(
            self.textures.contains_key(&call.texture.id()),
            "texture {:?} ({}x{}) was not created by this device",
            call.texture.id(),
            call.texture.width(),
            call.texture.height()
        );

        let key = PipelineKey { shader: shader.id(), blend: call.blend, format: target.format() };
        self.ensure_pipeline(shader, key);

        self.pending.push(PendingDraw {
            pipeline: key,
            mesh: mesh.id(),
            texture: call.texture.id(),
            indices: call.indices.clone(),
            scissor: call.scissor,
            slot: self.matrices.len() as u32,
        });
        self.matrices.push(call.matrix.into());
        Ok(())
    }

    fn discard_pending(&mut self) {
        if !self.pending.is_empty() {
            log::debug!("WgpuDevice: discarding {} unsubmitted draws", self.pending.len());
        }
        self.pending.clear();
        self.matrices.clear();
    }

    // ── uniforms ──────────────────────────────────────────────────────────

    fn write_matrices(&mut self) {
        let required = self.matrices.len();
        if required > self.matrix_capacity || self.matrix_ubo.is_none() {
            let cap = required.next_power_of_two().max(64);
            let ubo = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("tessel matrix ubo"),
                size: cap as u64 * MATRIX_SLOT_SIZE,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("tessel matrix bind group"),
                layout: &self.layouts.matrix,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: &ubo,
                        offset: 0,
                        size: wgpu::BufferSize::new(std::mem::size_of::<MatrixUniform>() as u64),
                    }),
                }],
            });
            self.matrix_ubo = Some(ubo);
            self.matrix_bind_group = Some(bind_group);
            self.matrix_capacity = cap;
        }

        let Some(ubo) = self.matrix_ubo.as_ref() else { return };
        let slot = MATRIX_SLOT_SIZE as usize;
        let mut staging = vec![0u8; required * slot];
        for (i, m) in self.matrices.iter().enumerate() {
            let bytes = bytemuck::bytes_of(m);
            staging[i * slot..i * slot + bytes.len()].copy_from_slice(bytes);
        }
        self.queue.write_buffer(ubo, 0, &staging);
    }
}

fn uses_constant(mode: BlendMode) -> bool {
    [mode.color_src, mode.color_dst, mode.alpha_src, mode.alpha_dst]
        .iter()
        .any(|f| matches!(f, BlendFactor::ConstantColor | BlendFactor::OneMinusConstantColor))
}

impl GraphicsDevice for WgpuDevice {
    type Target = WgpuTarget;

    fn create_mesh(&mut self) -> Result<MeshHandle> {
        self.next_mesh += 1;
        self.meshes.insert(self.next_mesh, WgpuMesh::default());
        Ok(MeshHandle::new(self.next_mesh))
    }

    fn upload(&mut self, mesh: &MeshHandle, vertices: &[Vertex], indices: &[u32]) -> Result<()> {
        let gpu_mesh = self
            .meshes
            .get_mut(&mesh.id())
            .with_context(|| format!("mesh {} is not owned by this device", mesh.id()))?;
        gpu_mesh.write(&self.device, &self.queue, vertices, indices);
        // A new upload starts a new render; draws left over from one that
        // never reached `finish` refer to the old contents.
        self.discard_pending();
        Ok(())
    }

    fn draw(&mut self, target: &mut WgpuTarget, mesh: &MeshHandle, call: &DrawCall<'_>) -> Result<()> {
        let result = self.record_draw(target, mesh, call);
        if result.is_err() {
            self.discard_pending();
        }
        result
    }

    fn finish(&mut self, target: &mut WgpuTarget) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        self.write_matrices();

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("tessel batch encoder"),
        });

        {
            let Some(matrix_bind_group) = self.matrix_bind_group.as_ref() else {
                bail!("matrix uniform buffer was not created");
            };

            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("tessel batch pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target.view(),
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            for draw in &self.pending {
                let Some(pipeline) = self.pipelines.get(&draw.pipeline) else { continue };
                let Some(texture) = self.textures.get(&draw.texture) else { continue };
                let Some(mesh) = self.meshes.get(&draw.mesh) else { continue };
                let (Some(vbo), Some(ibo)) = (mesh.vbo.as_ref(), mesh.ibo.as_ref()) else { continue };

                rpass.set_pipeline(pipeline);
                if uses_constant(draw.pipeline.blend) {
                    rpass.set_blend_constant(blend_constant(draw.pipeline.blend));
                }
                rpass.set_bind_group(0, matrix_bind_group, &[draw.slot * MATRIX_SLOT_SIZE as u32]);
                rpass.set_bind_group(1, &texture.bind_group, &[]);
                rpass.set_vertex_buffer(0, vbo.slice(..));
                rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);

                let s = draw.scissor;
                rpass.set_scissor_rect(s.x, s.y, s.width, s.height);
                rpass.draw_indexed(draw.indices.clone(), 0, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        log::trace!("WgpuDevice: submitted {} draws", self.pending.len());

        self.pending.clear();
        self.matrices.clear();
        Ok(())
    }

    fn release_mesh(&mut self, mesh: MeshHandle) {
        self.meshes.remove(&mesh.id());
    }
}
