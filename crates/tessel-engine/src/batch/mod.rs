//! Deferred 2D geometry batcher.
//!
//! Responsibilities:
//! - keep the render-state stacks (matrix, scissor, blend, material, layer, color mode)
//! - tessellate primitives into one shared vertex/index buffer (see `shapes`)
//! - split the index buffer into draw batches whenever batch-defining state changes
//!
//! Drawing happens later, in [`Batch::render`], against any
//! [`GraphicsDevice`](crate::render::GraphicsDevice).
//!
//! ```ignore
//! let mut batch = Batch::new();
//! batch.push_matrix(Mat3x2::translation(Vec2::new(20.0, 20.0)));
//! batch.rect(Rect::new(0.0, 0.0, 64.0, 32.0), Color::RED);
//! batch.tex(&sprite, Vec2::new(100.0, 0.0), Color::WHITE);
//! batch.pop_matrix();
//! batch.render(&mut device, &mut target)?;
//! batch.clear();
//! ```

mod buffer;
mod compiler;
mod executor;
mod shapes;
mod state;
mod vertex;

pub use compiler::DrawBatch;
pub use state::ResolvedState;
pub use vertex::Vertex;

use crate::coords::{Mat3x2, Rect, Vec2};
use crate::paint::{BlendMode, Color, ColorMode, FillWeights};
use crate::render::MeshHandle;
use crate::resource::{Material, MaterialRef, Shader, Texture, TextureRef};

use buffer::GeometryBuffer;
use compiler::{BatchCompiler, BatchKey};
use state::RenderState;

/// Construction parameters for a [`Batch`].
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Name of the `mat4x4` uniform that receives the final transform.
    pub matrix_uniform: String,
    /// Name of the texture uniform that receives each batch's texture.
    pub texture_uniform: String,
    /// Vertices to reserve up front.
    pub initial_vertex_capacity: usize,
    /// Indices to reserve up front.
    pub initial_index_capacity: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            matrix_uniform: "u_matrix".to_owned(),
            texture_uniform: "u_texture".to_owned(),
            initial_vertex_capacity: 0,
            initial_index_capacity: 0,
        }
    }
}

/// Accumulates 2D geometry under a stack of render states and compiles it
/// into a minimal sequence of draw calls.
///
/// A batch is built once and reused every frame: draw, [`render`](Self::render),
/// then [`clear`](Self::clear). It owns one GPU mesh, created on first render
/// and released by [`dispose`](Self::dispose); for that reason it is not `Clone`.
pub struct Batch {
    /// Uniform slot that receives the transform. Configurable per shader convention.
    pub matrix_uniform: String,
    /// Uniform slot that receives the batch texture.
    pub texture_uniform: String,

    state: RenderState,
    texture: TextureRef,
    default_material: MaterialRef,

    compiler: BatchCompiler,
    buffer: GeometryBuffer,

    mesh: Option<MeshHandle>,
    /// Paint-order scratch buffer reused by `render`.
    sorted: Vec<usize>,
    warned_empty_scissor: bool,
}

impl Default for Batch {
    fn default() -> Self {
        Self::new()
    }
}

impl Batch {
    pub fn new() -> Self {
        Self::with_config(BatchConfig::default())
    }

    pub fn with_config(config: BatchConfig) -> Self {
        let default_material = Material::with_label(Shader::batch_default(), Some("tessel default material"));
        let texture = Texture::white();
        let state = RenderState::new(default_material.clone());

        let compiler = BatchCompiler::new(BatchKey {
            layer: 0,
            material: &default_material,
            blend: BlendMode::NORMAL,
            texture: &texture,
            scissor: None,
        });

        Self {
            matrix_uniform: config.matrix_uniform,
            texture_uniform: config.texture_uniform,
            state,
            texture,
            default_material,
            compiler,
            buffer: GeometryBuffer::with_capacity(config.initial_vertex_capacity, config.initial_index_capacity),
            mesh: None,
            sorted: Vec::new(),
            warned_empty_scissor: false,
        }
    }

    // ── state stacks ──────────────────────────────────────────────────────

    /// Pushes a transform applied to everything drawn until the matching pop.
    ///
    /// Nested transforms compound: `matrix` is applied first, then the
    /// transform that was active before.
    pub fn push_matrix(&mut self, matrix: Mat3x2) {
        let combined = matrix * *self.state.matrix.current();
        self.state.matrix.push(combined);
    }

    /// Restores the previous transform and returns the one that was active.
    ///
    /// # Panics
    /// Panics without a matching [`push_matrix`](Self::push_matrix).
    pub fn pop_matrix(&mut self) -> Mat3x2 {
        self.state.matrix.pop()
    }

    /// Restricts drawing to `scissor`, intersected with the active clip.
    ///
    /// Nested clips only shrink. Disjoint clips produce a zero-area clip;
    /// geometry drawn under it is kept but never visible.
    pub fn push_scissor(&mut self, scissor: Rect) {
        let effective = match self.state.scissor.current() {
            None => scissor.normalized(),
            Some(parent) => parent.intersect(scissor).unwrap_or(Rect::zero()),
        };
        if effective.is_empty() && !self.warned_empty_scissor {
            log::warn!("Batch::push_scissor: empty clip; following geometry will not be visible");
            self.warned_empty_scissor = true;
        }
        self.state.scissor.push(Some(effective));
    }

    /// # Panics
    /// Panics without a matching [`push_scissor`](Self::push_scissor).
    pub fn pop_scissor(&mut self) -> Option<Rect> {
        self.state.scissor.pop()
    }

    pub fn push_blend(&mut self, blend: BlendMode) {
        self.state.blend.push(blend);
    }

    /// # Panics
    /// Panics without a matching [`push_blend`](Self::push_blend).
    pub fn pop_blend(&mut self) -> BlendMode {
        self.state.blend.pop()
    }

    pub fn push_material(&mut self, material: MaterialRef) {
        self.state.material.push(material);
    }

    /// # Panics
    /// Panics without a matching [`push_material`](Self::push_material).
    pub fn pop_material(&mut self) -> MaterialRef {
        self.state.material.pop()
    }

    /// Lower layers render first regardless of submission order.
    pub fn push_layer(&mut self, layer: i32) {
        self.state.layer.push(layer);
    }

    /// # Panics
    /// Panics without a matching [`push_layer`](Self::push_layer).
    pub fn pop_layer(&mut self) -> i32 {
        self.state.layer.pop()
    }

    pub fn push_color_mode(&mut self, mode: ColorMode) {
        self.state.color_mode.push(mode);
    }

    /// # Panics
    /// Panics without a matching [`push_color_mode`](Self::push_color_mode).
    pub fn pop_color_mode(&mut self) -> ColorMode {
        self.state.color_mode.pop()
    }

    /// Sets the texture sampled by subsequent geometry. `None` selects the
    /// implicit white texture.
    pub fn set_texture(&mut self, texture: Option<TextureRef>) {
        self.texture = texture.unwrap_or_else(Texture::white);
    }

    // ── resolved state ────────────────────────────────────────────────────

    #[inline]
    pub fn matrix(&self) -> Mat3x2 {
        *self.state.matrix.current()
    }

    #[inline]
    pub fn scissor(&self) -> Option<Rect> {
        *self.state.scissor.current()
    }

    #[inline]
    pub fn blend(&self) -> BlendMode {
        *self.state.blend.current()
    }

    #[inline]
    pub fn material(&self) -> &MaterialRef {
        self.state.material.current()
    }

    #[inline]
    pub fn layer(&self) -> i32 {
        *self.state.layer.current()
    }

    #[inline]
    pub fn color_mode(&self) -> ColorMode {
        *self.state.color_mode.current()
    }

    #[inline]
    pub fn texture(&self) -> &TextureRef {
        &self.texture
    }

    #[inline]
    pub fn default_material(&self) -> &MaterialRef {
        &self.default_material
    }

    /// Snapshot of every stack top.
    pub fn resolved_state(&self) -> ResolvedState {
        self.state.snapshot()
    }

    // ── accumulated output ────────────────────────────────────────────────

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        self.buffer.vertices()
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        self.buffer.indices()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Draw batches in submission order: finalized ones, then the open one
    /// if it holds geometry.
    pub fn batches(&self) -> impl Iterator<Item = &DrawBatch> {
        self.compiler.iter()
    }

    /// Allocated `(vertex, index)` capacity.
    #[inline]
    pub fn capacity(&self) -> (usize, usize) {
        self.buffer.capacity()
    }

    /// Reserves room for at least `vertices` more vertices and `indices` more indices.
    pub fn reserve(&mut self, vertices: usize, indices: usize) {
        self.buffer.reserve(vertices, indices);
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    /// Drops all geometry and batches and resets every stack to its base.
    ///
    /// Allocations (buffers, batch list, stacks) and the GPU mesh are kept.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.state.reset(self.default_material.clone());
        self.texture = Texture::white();
        self.compiler.reset(BatchKey {
            layer: 0,
            material: &self.default_material,
            blend: BlendMode::NORMAL,
            texture: &self.texture,
            scissor: None,
        });
        self.warned_empty_scissor = false;
    }

    // ── emission core ─────────────────────────────────────────────────────

    /// Starts an emission under the current state. Returns the index count
    /// at the start so [`end_primitive`](Self::end_primitive) can measure it.
    fn begin_primitive(&mut self) -> usize {
        let key = BatchKey {
            layer: *self.state.layer.current(),
            material: self.state.material.current(),
            blend: *self.state.blend.current(),
            texture: &self.texture,
            scissor: *self.state.scissor.current(),
        };
        let start = self.buffer.index_len();
        self.compiler.prepare(key, start);
        start
    }

    fn end_primitive(&mut self, start: usize) {
        self.compiler.extend(self.buffer.index_len() - start);
    }

    /// Fill weights for textured geometry under the current color mode.
    #[inline]
    fn texture_weights(&self) -> FillWeights {
        FillWeights::select(*self.state.color_mode.current(), true)
    }

    /// Appends one vertex, transformed by the current matrix. Returns its index.
    #[inline]
    fn push_vertex(&mut self, pos: Vec2, tex: Vec2, col: Color, weights: FillWeights) -> u32 {
        let index = self.buffer.next_vertex();
        let pos = self.state.matrix.current().transform_point(pos);
        self.buffer.push_vertex(Vertex::new(pos, tex, col, weights));
        index
    }

    /// Appends a triangle as its own three vertices.
    fn emit_tri(&mut self, pos: [Vec2; 3], tex: [Vec2; 3], col: [Color; 3], weights: FillWeights) {
        let start = self.begin_primitive();
        let a = self.push_vertex(pos[0], tex[0], col[0], weights);
        let b = self.push_vertex(pos[1], tex[1], col[1], weights);
        let c = self.push_vertex(pos[2], tex[2], col[2], weights);
        self.buffer.push_triangle(a, b, c);
        self.end_primitive(start);
    }

    /// Appends a quad as four vertices and the triangles (0,1,2), (0,2,3).
    fn emit_quad(&mut self, pos: [Vec2; 4], tex: [Vec2; 4], col: [Color; 4], weights: FillWeights) {
        let start = self.begin_primitive();
        let a = self.push_vertex(pos[0], tex[0], col[0], weights);
        self.push_vertex(pos[1], tex[1], col[1], weights);
        self.push_vertex(pos[2], tex[2], col[2], weights);
        self.push_vertex(pos[3], tex[3], col[3], weights);
        self.buffer.push_triangle(a, a + 1, a + 2);
        self.buffer.push_triangle(a, a + 2, a + 3);
        self.end_primitive(start);
    }
}

impl Drop for Batch {
    fn drop(&mut self) {
        if self.mesh.is_some() {
            log::warn!("Batch dropped without dispose(); its device mesh is released only when the device is");
        }
    }
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn unit() -> Rect {
        Rect::new(0.0, 0.0, 1.0, 1.0)
    }

    /// Checks that the batches tile `[0, indices.len())` in order without gaps.
    fn assert_partition(b: &Batch) {
        let mut next = 0;
        for batch in b.batches() {
            assert_eq!(batch.offset, next);
            assert_eq!(batch.elements % 3, 0);
            assert!(batch.elements > 0);
            next += batch.elements;
        }
        assert_eq!(next as usize, b.indices().len());
    }

    // ── state stacks ──────────────────────────────────────────────────────

    #[test]
    fn push_pop_sequences_restore_state() {
        let mut b = Batch::new();
        let before = b.resolved_state();

        b.push_matrix(Mat3x2::translation(Vec2::new(3.0, 4.0)));
        b.push_scissor(Rect::new(0.0, 0.0, 50.0, 50.0));
        b.push_blend(BlendMode::ADDITIVE);
        b.push_material(Material::new(Shader::batch_default()));
        b.push_layer(-2);
        b.push_color_mode(ColorMode::Wash);
        assert_ne!(b.resolved_state(), before);

        b.pop_color_mode();
        b.pop_layer();
        b.pop_material();
        b.pop_blend();
        b.pop_scissor();
        b.pop_matrix();
        assert_eq!(b.resolved_state(), before);
    }

    #[test]
    #[should_panic(expected = "pop_matrix called without a matching push_matrix")]
    fn popping_the_base_panics() {
        Batch::new().pop_matrix();
    }

    #[test]
    fn matrix_push_composes_local_first() {
        let mut b = Batch::new();
        b.push_matrix(Mat3x2::translation(Vec2::new(10.0, 0.0)));
        b.push_matrix(Mat3x2::uniform_scale(2.0));
        // Scale applies first, then the outer translation.
        assert_eq!(b.matrix().transform_point(Vec2::new(1.0, 1.0)), Vec2::new(12.0, 2.0));

        b.rect(unit(), Color::WHITE);
        assert_eq!(b.vertices()[2].position(), Vec2::new(12.0, 2.0));
    }

    #[test]
    fn scissor_push_intersects() {
        let mut b = Batch::new();
        b.push_scissor(Rect::new(0.0, 0.0, 100.0, 100.0));
        b.push_scissor(Rect::new(50.0, 50.0, 100.0, 100.0));
        assert_eq!(b.scissor(), Some(Rect::new(50.0, 50.0, 50.0, 50.0)));

        b.push_scissor(Rect::new(500.0, 500.0, 10.0, 10.0));
        assert!(b.scissor().unwrap().is_empty());
        b.pop_scissor();
        b.pop_scissor();
        assert_eq!(b.scissor(), Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
    }

    #[test]
    fn set_texture_none_is_white() {
        let mut b = Batch::new();
        b.set_texture(Some(Texture::new(4, 4)));
        assert!(!b.texture().is_white());
        b.set_texture(None);
        assert!(b.texture().is_white());
    }

    // ── batching ──────────────────────────────────────────────────────────

    #[test]
    fn identical_state_coalesces() {
        let mut b = Batch::new();
        for i in 0..10 {
            b.rect(Rect::new(i as f32, 0.0, 1.0, 1.0), Color::WHITE);
        }
        let batches: Vec<_> = b.batches().collect();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].index_range(), 0..60);
    }

    #[test]
    fn matrix_and_color_mode_do_not_split() {
        let mut b = Batch::new();
        b.rect(unit(), Color::WHITE);
        b.push_matrix(Mat3x2::translation(Vec2::new(5.0, 5.0)));
        b.push_color_mode(ColorMode::Wash);
        b.rect(unit(), Color::WHITE);
        b.pop_color_mode();
        b.pop_matrix();
        assert_eq!(b.batches().count(), 1);
    }

    #[test]
    fn texture_change_splits() {
        let mut b = Batch::new();
        b.rect(unit(), Color::WHITE);
        let t = Texture::new(16, 16);
        b.set_texture(Some(t.clone()));
        b.rect(unit(), Color::WHITE);

        let batches: Vec<_> = b.batches().collect();
        assert_eq!(batches.len(), 2);
        assert!(batches[0].texture.is_white());
        assert!(Arc::ptr_eq(&batches[1].texture, &t));
        assert_eq!(batches[1].offset, 6);
        assert_partition(&b);
    }

    #[test]
    fn every_key_component_splits() {
        let mut b = Batch::new();
        b.rect(unit(), Color::WHITE);
        b.push_blend(BlendMode::ADDITIVE);
        b.rect(unit(), Color::WHITE);
        b.pop_blend();
        b.push_layer(1);
        b.rect(unit(), Color::WHITE);
        b.pop_layer();
        b.push_scissor(Rect::new(0.0, 0.0, 8.0, 8.0));
        b.rect(unit(), Color::WHITE);
        b.pop_scissor();
        b.push_material(Material::new(Shader::batch_default()));
        b.rect(unit(), Color::WHITE);
        b.pop_material();
        b.rect(unit(), Color::WHITE);

        assert_eq!(b.batches().count(), 6);
        assert_partition(&b);
    }

    #[test]
    fn state_changes_without_geometry_leave_no_empty_batch() {
        let mut b = Batch::new();
        b.push_layer(3);
        b.set_texture(Some(Texture::new(2, 2)));
        b.pop_layer();
        b.set_texture(None);
        b.rect(unit(), Color::WHITE);
        assert_eq!(b.batches().count(), 1);
        assert_partition(&b);
    }

    #[test]
    fn mixed_sequence_partitions_index_buffer() {
        let mut b = Batch::new();
        let tex = Texture::new(8, 8);
        for i in 0..20 {
            if i % 3 == 0 {
                b.set_texture(Some(tex.clone()));
            } else if i % 5 == 0 {
                b.set_texture(None);
            }
            if i % 4 == 0 {
                b.push_layer(i);
                b.circle(Vec2::zero(), 4.0, 6, Color::RED);
                b.pop_layer();
            } else {
                b.line(Vec2::zero(), Vec2::new(1.0, 1.0), 1.0, Color::BLUE);
            }
        }
        assert_partition(&b);
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn clear_keeps_capacity_and_resets_state() {
        let mut b = Batch::new();
        for _ in 0..64 {
            b.rect(unit(), Color::WHITE);
        }
        b.push_layer(4);
        b.set_texture(Some(Texture::new(2, 2)));
        b.rect(unit(), Color::WHITE);
        let cap = b.capacity();

        b.clear();
        assert!(b.is_empty());
        assert!(b.vertices().is_empty());
        assert_eq!(b.batches().count(), 0);
        assert_eq!(b.capacity(), cap);
        assert_eq!(b.layer(), 0);
        assert!(b.texture().is_white());
        assert!(Arc::ptr_eq(b.material(), b.default_material()));

        for _ in 0..65 {
            b.rect(unit(), Color::WHITE);
        }
        assert_eq!(b.capacity(), cap);
        assert_eq!(b.batches().next().map(|d| d.offset), Some(0));
    }

    #[test]
    fn config_sets_uniform_names_and_capacity() {
        let b = Batch::with_config(BatchConfig {
            matrix_uniform: "u_mvp".to_owned(),
            texture_uniform: "u_atlas".to_owned(),
            initial_vertex_capacity: 128,
            initial_index_capacity: 192,
        });
        assert_eq!(b.matrix_uniform, "u_mvp");
        assert_eq!(b.texture_uniform, "u_atlas");
        let (v, i) = b.capacity();
        assert!(v >= 128 && i >= 192);
    }
}
