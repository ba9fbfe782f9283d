use std::sync::Arc;

use crate::coords::{Mat3x2, Rect};
use crate::paint::{BlendMode, ColorMode};
use crate::resource::MaterialRef;

/// A value with a save stack: `push` stores the current value and installs a
/// new one, `pop` restores the last stored value.
#[derive(Debug)]
pub(crate) struct StateStack<T> {
    name: &'static str,
    current: T,
    saved: Vec<T>,
}

impl<T> StateStack<T> {
    pub(crate) fn new(name: &'static str, initial: T) -> Self {
        Self { name, current: initial, saved: Vec::new() }
    }

    #[inline]
    pub(crate) fn current(&self) -> &T {
        &self.current
    }

    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        self.saved.len()
    }

    #[inline]
    pub(crate) fn push(&mut self, value: T) {
        let prev = std::mem::replace(&mut self.current, value);
        self.saved.push(prev);
    }

    /// Restores the previous value and returns the one that was active.
    ///
    /// # Panics
    /// Panics if there is no matching push. Continuing with a desynchronized
    /// stack would silently render everything after it with the wrong state.
    #[inline]
    pub(crate) fn pop(&mut self) -> T {
        let Some(prev) = self.saved.pop() else {
            panic!("pop_{0} called without a matching push_{0}", self.name);
        };
        std::mem::replace(&mut self.current, prev)
    }

    /// Drops all saved values and installs `value`. Keeps capacity.
    #[inline]
    pub(crate) fn reset(&mut self, value: T) {
        self.saved.clear();
        self.current = value;
    }
}

/// The six render-state stacks of a batch.
#[derive(Debug)]
pub(crate) struct RenderState {
    pub(crate) matrix: StateStack<Mat3x2>,
    /// `None` means unclipped.
    pub(crate) scissor: StateStack<Option<Rect>>,
    pub(crate) blend: StateStack<BlendMode>,
    pub(crate) material: StateStack<MaterialRef>,
    pub(crate) layer: StateStack<i32>,
    pub(crate) color_mode: StateStack<ColorMode>,
}

impl RenderState {
    pub(crate) fn new(default_material: MaterialRef) -> Self {
        Self {
            matrix: StateStack::new("matrix", Mat3x2::IDENTITY),
            scissor: StateStack::new("scissor", None),
            blend: StateStack::new("blend", BlendMode::NORMAL),
            material: StateStack::new("material", default_material),
            layer: StateStack::new("layer", 0),
            color_mode: StateStack::new("color_mode", ColorMode::Normal),
        }
    }

    pub(crate) fn reset(&mut self, default_material: MaterialRef) {
        self.matrix.reset(Mat3x2::IDENTITY);
        self.scissor.reset(None);
        self.blend.reset(BlendMode::NORMAL);
        self.material.reset(default_material);
        self.layer.reset(0);
        self.color_mode.reset(ColorMode::Normal);
    }

    /// Snapshot of the resolved state, for comparisons and debugging.
    pub(crate) fn snapshot(&self) -> ResolvedState {
        ResolvedState {
            matrix: *self.matrix.current(),
            scissor: *self.scissor.current(),
            blend: *self.blend.current(),
            material: self.material.current().clone(),
            layer: *self.layer.current(),
            color_mode: *self.color_mode.current(),
        }
    }
}

/// Top of every state stack at one point in time.
#[derive(Debug, Clone)]
pub struct ResolvedState {
    pub matrix: Mat3x2,
    pub scissor: Option<Rect>,
    pub blend: BlendMode,
    pub material: MaterialRef,
    pub layer: i32,
    pub color_mode: ColorMode,
}

impl PartialEq for ResolvedState {
    fn eq(&self, other: &Self) -> bool {
        self.matrix == other.matrix
            && self.scissor == other.scissor
            && self.blend == other.blend
            && Arc::ptr_eq(&self.material, &other.material)
            && self.layer == other.layer
            && self.color_mode == other.color_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_restores_previous() {
        let mut s = StateStack::new("layer", 0);
        s.push(3);
        s.push(7);
        assert_eq!(*s.current(), 7);
        assert_eq!(s.depth(), 2);
        assert_eq!(s.pop(), 7);
        assert_eq!(s.pop(), 3);
        assert_eq!(*s.current(), 0);
    }

    #[test]
    #[should_panic(expected = "pop_layer called without a matching push_layer")]
    fn pop_at_base_panics() {
        let mut s = StateStack::new("layer", 0);
        s.pop();
    }

    #[test]
    fn reset_clears_saved_values() {
        let mut s = StateStack::new("blend", BlendMode::NORMAL);
        s.push(BlendMode::ADDITIVE);
        s.reset(BlendMode::NORMAL);
        assert_eq!(s.depth(), 0);
        assert_eq!(*s.current(), BlendMode::NORMAL);
    }
}
