use std::sync::Arc;

use crate::coords::Rect;
use crate::paint::BlendMode;
use crate::resource::{MaterialRef, TextureRef};

/// A contiguous run of triangle indices that shares one render state and is
/// drawn with a single draw call.
#[derive(Debug, Clone)]
pub struct DrawBatch {
    pub layer: i32,
    /// First index in the batch's index buffer.
    pub offset: u32,
    /// Number of indices; always a multiple of 3.
    pub elements: u32,
    pub material: MaterialRef,
    pub blend: BlendMode,
    pub texture: TextureRef,
    /// Clip rectangle in logical pixels; `None` draws everywhere.
    pub scissor: Option<Rect>,
    /// Set at render time for targets whose origin is bottom-left.
    pub flip_vertically: bool,
}

/// The batch-defining subset of the render state at one emission.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BatchKey<'a> {
    pub(crate) layer: i32,
    pub(crate) material: &'a MaterialRef,
    pub(crate) blend: BlendMode,
    pub(crate) texture: &'a TextureRef,
    pub(crate) scissor: Option<Rect>,
}

impl DrawBatch {
    fn open(key: BatchKey<'_>, offset: u32) -> Self {
        Self {
            layer: key.layer,
            offset,
            elements: 0,
            material: key.material.clone(),
            blend: key.blend,
            texture: key.texture.clone(),
            scissor: key.scissor,
            flip_vertically: false,
        }
    }

    /// True if geometry emitted under `key` can be appended to this batch.
    #[inline]
    pub(crate) fn matches(&self, key: BatchKey<'_>) -> bool {
        self.layer == key.layer
            && self.blend == key.blend
            && self.scissor == key.scissor
            && Arc::ptr_eq(&self.texture, key.texture)
            && Arc::ptr_eq(&self.material, key.material)
    }

    /// Index range `[offset, offset + elements)`.
    #[inline]
    pub fn index_range(&self) -> std::ops::Range<u32> {
        self.offset..self.offset + self.elements
    }

    #[inline]
    pub fn triangle_count(&self) -> u32 {
        self.elements / 3
    }
}

/// Turns a stream of (key, index count) emissions into draw batches.
///
/// Any maximal run of consecutive emissions sharing a key occupies exactly
/// one batch, and the batches tile the index buffer without gaps.
#[derive(Debug)]
pub(crate) struct BatchCompiler {
    open: DrawBatch,
    finalized: Vec<DrawBatch>,
}

impl BatchCompiler {
    pub(crate) fn new(initial: BatchKey<'_>) -> Self {
        Self { open: DrawBatch::open(initial, 0), finalized: Vec::new() }
    }

    /// Called before an emission that will start at index `index_len`.
    pub(crate) fn prepare(&mut self, key: BatchKey<'_>, index_len: usize) {
        if self.open.elements == 0 {
            if !self.open.matches(key) {
                self.open = DrawBatch::open(key, index_len as u32);
            } else {
                self.open.offset = index_len as u32;
            }
            return;
        }

        if self.open.matches(key) {
            return;
        }

        debug_assert_eq!(self.open.offset + self.open.elements, index_len as u32);
        self.close();
        self.open = DrawBatch::open(key, index_len as u32);
    }

    /// Extends the open batch by `count` indices emitted after `prepare`.
    #[inline]
    pub(crate) fn extend(&mut self, count: usize) {
        debug_assert_eq!(count % 3, 0, "emissions must be whole triangles");
        self.open.elements += count as u32;
    }

    /// Finalizes the open batch if it holds geometry; the next emission
    /// continues right after it.
    pub(crate) fn close(&mut self) {
        if self.open.elements == 0 {
            return;
        }
        self.finalized.push(self.open.clone());
        self.open.offset += self.open.elements;
        self.open.elements = 0;
    }

    /// Drops all batches and reopens at index 0 under `key`. Keeps capacity.
    pub(crate) fn reset(&mut self, key: BatchKey<'_>) {
        self.finalized.clear();
        self.open = DrawBatch::open(key, 0);
    }

    #[cfg(test)]
    pub(crate) fn finalized(&self) -> &[DrawBatch] {
        &self.finalized
    }

    /// Number of batches [`iter`](Self::iter) yields.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.finalized.len() + usize::from(self.open.elements > 0)
    }

    /// The `i`th batch in submission order; the open batch comes last.
    #[inline]
    pub(crate) fn get(&self, i: usize) -> &DrawBatch {
        self.finalized.get(i).unwrap_or(&self.open)
    }

    /// Marks every batch, the open one included, for a flipped target.
    pub(crate) fn set_flip(&mut self, flip: bool) {
        for batch in &mut self.finalized {
            batch.flip_vertically = flip;
        }
        self.open.flip_vertically = flip;
    }

    /// Finalized batches followed by the open one, if it has geometry.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &DrawBatch> {
        let open = (self.open.elements > 0).then_some(&self.open);
        self.finalized.iter().chain(open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{Material, Shader, Texture};

    struct Fixture {
        material: MaterialRef,
        white: TextureRef,
        other: TextureRef,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                material: Material::new(Shader::batch_default()),
                white: Texture::white(),
                other: Texture::new(8, 8),
            }
        }

        fn key<'a>(&'a self, texture: &'a TextureRef) -> BatchKey<'a> {
            BatchKey {
                layer: 0,
                material: &self.material,
                blend: BlendMode::NORMAL,
                texture,
                scissor: None,
            }
        }
    }

    #[test]
    fn same_key_coalesces() {
        let f = Fixture::new();
        let mut c = BatchCompiler::new(f.key(&f.white));
        let mut len = 0;
        for _ in 0..4 {
            c.prepare(f.key(&f.white), len);
            c.extend(6);
            len += 6;
        }
        c.close();
        assert_eq!(c.finalized().len(), 1);
        assert_eq!(c.finalized()[0].index_range(), 0..24);
    }

    #[test]
    fn key_change_splits_without_gaps() {
        let f = Fixture::new();
        let mut c = BatchCompiler::new(f.key(&f.white));
        c.prepare(f.key(&f.white), 0);
        c.extend(6);
        c.prepare(f.key(&f.other), 6);
        c.extend(3);
        c.close();
        let b = c.finalized();
        assert_eq!(b.len(), 2);
        assert_eq!(b[0].index_range(), 0..6);
        assert_eq!(b[1].index_range(), 6..9);
        assert!(Arc::ptr_eq(&b[1].texture, &f.other));
    }

    #[test]
    fn empty_open_batch_is_replaced_not_finalized() {
        let f = Fixture::new();
        let mut c = BatchCompiler::new(f.key(&f.white));
        c.prepare(f.key(&f.other), 0);
        c.prepare(f.key(&f.white), 0);
        c.extend(3);
        assert_eq!(c.iter().count(), 1);
        assert!(c.finalized().is_empty());
    }

    #[test]
    fn close_twice_is_harmless() {
        let f = Fixture::new();
        let mut c = BatchCompiler::new(f.key(&f.white));
        c.prepare(f.key(&f.white), 0);
        c.extend(3);
        c.close();
        c.close();
        assert_eq!(c.finalized().len(), 1);
        assert_eq!(c.iter().count(), 1);
    }

    #[test]
    fn open_batch_is_indexed_last() {
        let f = Fixture::new();
        let mut c = BatchCompiler::new(f.key(&f.white));
        c.prepare(f.key(&f.white), 0);
        c.extend(6);
        c.prepare(f.key(&f.other), 6);
        c.extend(3);
        assert_eq!(c.len(), 2);
        assert_eq!(c.get(0).index_range(), 0..6);
        assert_eq!(c.get(1).index_range(), 6..9);
        assert!(Arc::ptr_eq(&c.get(1).texture, &f.other));
    }

    #[test]
    fn flip_reaches_the_open_batch() {
        let f = Fixture::new();
        let mut c = BatchCompiler::new(f.key(&f.white));
        c.prepare(f.key(&f.white), 0);
        c.extend(3);
        c.set_flip(true);
        assert!(c.iter().all(|b| b.flip_vertically));
        c.prepare(f.key(&f.white), 3);
        c.extend(3);
        assert_eq!(c.len(), 1);
        assert!(c.get(0).flip_vertically);
    }
}
