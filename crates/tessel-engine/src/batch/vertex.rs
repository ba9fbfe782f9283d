use bytemuck::{Pod, Zeroable};

use crate::coords::Vec2;
use crate::paint::{Color, FillWeights};

/// Batch vertex (24 bytes).
///
/// Layout:
///
///  offset  0  pos      [f32; 2]   loc 0  Float32x2
///  offset  8  tex      [f32; 2]   loc 1  Float32x2
///  offset 16  col      [u8; 4]    loc 2  Unorm8x4
///  offset 20  mult, wash, fill, _pad  loc 3  Unorm8x4
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 2],
    pub tex: [f32; 2],
    pub col: [u8; 4],
    pub mult: u8,
    pub wash: u8,
    pub fill: u8,
    pub _pad: u8,
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x2, // tex
        2 => Unorm8x4,  // col
        3 => Unorm8x4   // mult, wash, fill, pad
    ];

    #[inline]
    pub fn new(pos: Vec2, tex: Vec2, col: Color, weights: FillWeights) -> Self {
        Self {
            pos: [pos.x, pos.y],
            tex: [tex.x, tex.y],
            col: col.to_array(),
            mult: weights.mult,
            wash: weights.wash,
            fill: weights.fill,
            _pad: 0,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.pos[0], self.pos[1])
    }

    #[inline]
    pub fn color(&self) -> Color {
        Color::rgba(self.col[0], self.col[1], self.col[2], self.col[3])
    }

    #[inline]
    pub fn weights(&self) -> FillWeights {
        FillWeights { mult: self.mult, wash: self.wash, fill: self.fill }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}
