//! Primitive emitters.
//!
//! Each module extends [`Batch`] with one family of shapes. Every emitter goes
//! through the same path: open the primitive under the current state, push
//! vertices through the active transform, push triangles, close.

mod bezier;
mod circle;
mod line;
mod polygon;
mod rounded_rect;
mod sprite;
mod text;

use crate::coords::Vec2;
use crate::paint::{Color, FillWeights};

use super::Batch;

/// Fewest segments a full or partial circle is built from.
pub(crate) const MIN_ARC_STEPS: i32 = 3;

/// Fewest segments a bezier stroke is built from.
pub(crate) const MIN_CURVE_STEPS: i32 = 1;

impl Batch {
    /// Triangle fan from `center` over `rim`. A closed fan also connects the
    /// last rim point back to the first.
    ///
    /// Emits `rim.len() + 1` vertices.
    pub(crate) fn emit_fan(&mut self, center: Vec2, center_color: Color, rim: &[Vec2], rim_color: Color, closed: bool) {
        if rim.len() < 2 {
            return;
        }
        let start = self.begin_primitive();
        let c = self.push_vertex(center, Vec2::zero(), center_color, FillWeights::FILL);
        for &p in rim {
            self.push_vertex(p, Vec2::zero(), rim_color, FillWeights::FILL);
        }

        let n = rim.len() as u32;
        let segments = if closed { n } else { n - 1 };
        for i in 0..segments {
            self.buffer.push_triangle(c, c + 1 + i, c + 1 + (i + 1) % n);
        }
        self.end_primitive(start);
    }

    /// Band between two paths of equal length, one quad per segment.
    pub(crate) fn emit_band(&mut self, outer: &[Vec2], inner: &[Vec2], color: Color, closed: bool) {
        debug_assert_eq!(outer.len(), inner.len());
        let n = outer.len().min(inner.len()) as u32;
        if n < 2 {
            return;
        }
        let start = self.begin_primitive();
        let base = self.buffer.next_vertex();
        for (&o, &i) in outer.iter().zip(inner) {
            self.push_vertex(o, Vec2::zero(), color, FillWeights::FILL);
            self.push_vertex(i, Vec2::zero(), color, FillWeights::FILL);
        }

        let segments = if closed { n } else { n - 1 };
        for s in 0..segments {
            let o0 = base + s * 2;
            let i0 = o0 + 1;
            let o1 = base + ((s + 1) % n) * 2;
            let i1 = o1 + 1;
            self.buffer.push_triangle(o0, o1, i1);
            self.buffer.push_triangle(o0, i1, i0);
        }
        self.end_primitive(start);
    }
}

/// Points on a circle of `radius` around `center`, from `start` towards
/// `end` radians in `steps` segments. Includes both endpoints.
pub(crate) fn arc_points(center: Vec2, radius: f32, start: f32, end: f32, steps: i32, out: &mut Vec<Vec2>) {
    let steps = steps.max(MIN_ARC_STEPS);
    let sweep = end - start;
    out.reserve(steps as usize + 1);
    for i in 0..=steps {
        let a = start + sweep * (i as f32 / steps as f32);
        out.push(center + Vec2::from_angle(a, radius));
    }
}

/// Polygon offset inwards by `t`, with mitered joins.
///
/// Returns `None` for degenerate (zero-area) polygons.
pub(crate) fn inset_polygon(points: &[Vec2], t: f32) -> Option<Vec<Vec2>> {
    let n = points.len();
    let area: f32 = (0..n).map(|i| points[i].cross(points[(i + 1) % n])).sum();
    if n < 3 || area == 0.0 || !area.is_finite() {
        return None;
    }
    let sign = area.signum();
    let inward = |e: Vec2| Vec2::new(-e.y, e.x).normalized() * sign;

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let here = points[i];
        let next = points[(i + 1) % n];

        let n0 = inward(here - prev);
        let n1 = inward(next - here);
        let dir = (n0 + n1).normalized();
        // Limit the miter so needle-sharp corners don't shoot off.
        let cos_half = dir.dot(n0).max(0.25);
        out.push(here + dir * (t / cos_half));
    }
    Some(out)
}
