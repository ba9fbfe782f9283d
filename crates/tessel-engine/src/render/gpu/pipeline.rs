use bytemuck::{Pod, Zeroable};

use crate::batch::Vertex;
use crate::coords::Mat4x4;
use crate::paint::{BlendFactor, BlendMode, BlendOp, ColorMask};
use crate::resource::ShaderId;

/// Stride between per-draw matrices in the uniform buffer. Matches the
/// default `min_uniform_buffer_offset_alignment`.
pub(super) const MATRIX_SLOT_SIZE: u64 = 256;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct MatrixUniform {
    pub matrix: [[f32; 4]; 4],
}

impl From<Mat4x4> for MatrixUniform {
    fn from(m: Mat4x4) -> Self {
        Self { matrix: m.to_cols_array_2d() }
    }
}

/// Everything a render pipeline is specialized on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub(super) struct PipelineKey {
    pub shader: ShaderId,
    pub blend: BlendMode,
    pub format: wgpu::TextureFormat,
}

// ── blend ─────────────────────────────────────────────────────────────────

fn blend_factor(f: BlendFactor) -> wgpu::BlendFactor {
    match f {
        BlendFactor::Zero => wgpu::BlendFactor::Zero,
        BlendFactor::One => wgpu::BlendFactor::One,
        BlendFactor::SrcColor => wgpu::BlendFactor::Src,
        BlendFactor::OneMinusSrcColor => wgpu::BlendFactor::OneMinusSrc,
        BlendFactor::DstColor => wgpu::BlendFactor::Dst,
        BlendFactor::OneMinusDstColor => wgpu::BlendFactor::OneMinusDst,
        BlendFactor::SrcAlpha => wgpu::BlendFactor::SrcAlpha,
        BlendFactor::OneMinusSrcAlpha => wgpu::BlendFactor::OneMinusSrcAlpha,
        BlendFactor::DstAlpha => wgpu::BlendFactor::DstAlpha,
        BlendFactor::OneMinusDstAlpha => wgpu::BlendFactor::OneMinusDstAlpha,
        BlendFactor::ConstantColor => wgpu::BlendFactor::Constant,
        BlendFactor::OneMinusConstantColor => wgpu::BlendFactor::OneMinusConstant,
        BlendFactor::SrcAlphaSaturated => wgpu::BlendFactor::SrcAlphaSaturated,
    }
}

fn blend_op(op: BlendOp) -> wgpu::BlendOperation {
    match op {
        BlendOp::Add => wgpu::BlendOperation::Add,
        BlendOp::Subtract => wgpu::BlendOperation::Subtract,
        BlendOp::ReverseSubtract => wgpu::BlendOperation::ReverseSubtract,
        BlendOp::Min => wgpu::BlendOperation::Min,
        BlendOp::Max => wgpu::BlendOperation::Max,
    }
}

/// wgpu blend state for a batch blend mode.
///
/// wgpu requires `One` factors with `Min`/`Max`; the factors are forced
/// accordingly.
pub(super) fn blend_state(mode: BlendMode) -> wgpu::BlendState {
    let component = |op: BlendOp, src: BlendFactor, dst: BlendFactor| {
        let (src, dst) = match op {
            BlendOp::Min | BlendOp::Max => (wgpu::BlendFactor::One, wgpu::BlendFactor::One),
            _ => (blend_factor(src), blend_factor(dst)),
        };
        wgpu::BlendComponent { src_factor: src, dst_factor: dst, operation: blend_op(op) }
    };
    wgpu::BlendState {
        color: component(mode.color_op, mode.color_src, mode.color_dst),
        alpha: component(mode.alpha_op, mode.alpha_src, mode.alpha_dst),
    }
}

pub(super) fn color_writes(mask: ColorMask) -> wgpu::ColorWrites {
    let mut w = wgpu::ColorWrites::empty();
    if mask.red {
        w |= wgpu::ColorWrites::RED;
    }
    if mask.green {
        w |= wgpu::ColorWrites::GREEN;
    }
    if mask.blue {
        w |= wgpu::ColorWrites::BLUE;
    }
    if mask.alpha {
        w |= wgpu::ColorWrites::ALPHA;
    }
    w
}

/// The `0xRRGGBBAA` blend constant as a wgpu color.
pub(super) fn blend_constant(mode: BlendMode) -> wgpu::Color {
    let c = mode.constant;
    let ch = |shift: u32| ((c >> shift) & 0xff) as f64 / 255.0;
    wgpu::Color { r: ch(24), g: ch(16), b: ch(8), a: ch(0) }
}

// ── layouts ───────────────────────────────────────────────────────────────

/// Bind group layouts shared by every batch pipeline.
///
/// - group 0: the matrix uniform, one dynamic-offset slot per draw
/// - group 1: texture (binding 0) and sampler (binding 1)
pub(super) struct BatchLayouts {
    pub matrix: wgpu::BindGroupLayout,
    pub texture: wgpu::BindGroupLayout,
    pub pipeline: wgpu::PipelineLayout,
}

impl BatchLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let matrix = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tessel matrix bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<MatrixUniform>() as u64),
                },
                count: None,
            }],
        });

        let texture = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tessel texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tessel batch pipeline layout"),
            bind_group_layouts: &[&matrix, &texture],
            immediate_size: 0,
        });

        Self { matrix, texture, pipeline }
    }
}

pub(super) fn create_pipeline(
    device: &wgpu::Device,
    layouts: &BatchLayouts,
    module: &wgpu::ShaderModule,
    key: PipelineKey,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("tessel batch pipeline"),
        layout: Some(&layouts.pipeline),

        vertex: wgpu::VertexState {
            module,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[Vertex::layout()],
        },

        fragment: Some(wgpu::FragmentState {
            module,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: key.format,
                blend: Some(blend_state(key.blend)),
                write_mask: color_writes(key.blend.mask),
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}
