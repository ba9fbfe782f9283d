use crate::batch::Batch;
use crate::coords::{Rect, Vec2};
use crate::paint::{Color, FillWeights};

use super::inset_polygon;

impl Batch {
    // ── triangles ─────────────────────────────────────────────────────────

    #[inline]
    pub fn tri(&mut self, p0: Vec2, p1: Vec2, p2: Vec2, color: Color) {
        self.tri_colored(p0, p1, p2, color, color, color);
    }

    /// Triangle with one color per corner, interpolated across the face.
    pub fn tri_colored(&mut self, p0: Vec2, p1: Vec2, p2: Vec2, c0: Color, c1: Color, c2: Color) {
        self.emit_tri([p0, p1, p2], [Vec2::zero(); 3], [c0, c1, c2], FillWeights::FILL);
    }

    /// Triangle sampling the current texture at `t0..t2`.
    #[inline]
    pub fn tri_textured(&mut self, p0: Vec2, p1: Vec2, p2: Vec2, t0: Vec2, t1: Vec2, t2: Vec2, color: Color) {
        self.tri_textured_colored(p0, p1, p2, t0, t1, t2, color, color, color);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn tri_textured_colored(
        &mut self,
        p0: Vec2,
        p1: Vec2,
        p2: Vec2,
        t0: Vec2,
        t1: Vec2,
        t2: Vec2,
        c0: Color,
        c1: Color,
        c2: Color,
    ) {
        let weights = self.texture_weights();
        self.emit_tri([p0, p1, p2], [t0, t1, t2], [c0, c1, c2], weights);
    }

    /// Triangle outline `t` pixels thick, drawn inside the edges.
    pub fn tri_line(&mut self, p0: Vec2, p1: Vec2, p2: Vec2, t: f32, color: Color) {
        self.polygon_line(&[p0, p1, p2], t, color);
    }

    // ── quads ─────────────────────────────────────────────────────────────

    /// Quad split along the `p0`-`p2` diagonal.
    #[inline]
    pub fn quad(&mut self, p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, color: Color) {
        self.quad_colored(p0, p1, p2, p3, color, color, color, color);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn quad_colored(&mut self, p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, c0: Color, c1: Color, c2: Color, c3: Color) {
        self.emit_quad([p0, p1, p2, p3], [Vec2::zero(); 4], [c0, c1, c2, c3], FillWeights::FILL);
    }

    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub fn quad_textured(
        &mut self,
        p0: Vec2,
        p1: Vec2,
        p2: Vec2,
        p3: Vec2,
        t0: Vec2,
        t1: Vec2,
        t2: Vec2,
        t3: Vec2,
        color: Color,
    ) {
        self.quad_textured_colored([p0, p1, p2, p3], [t0, t1, t2, t3], [color; 4]);
    }

    /// Quad sampling the current texture, with per-corner uvs and colors.
    pub fn quad_textured_colored(&mut self, pos: [Vec2; 4], tex: [Vec2; 4], colors: [Color; 4]) {
        let weights = self.texture_weights();
        self.emit_quad(pos, tex, colors, weights);
    }

    pub fn quad_line(&mut self, p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32, color: Color) {
        self.polygon_line(&[p0, p1, p2, p3], t, color);
    }

    // ── rectangles ────────────────────────────────────────────────────────

    /// Solid rectangle: four vertices (top-left, top-right, bottom-right,
    /// bottom-left) and six indices.
    pub fn rect(&mut self, rect: Rect, color: Color) {
        self.quad(rect.top_left(), rect.top_right(), rect.bottom_right(), rect.bottom_left(), color);
    }

    /// Rectangle outline `t` pixels thick, drawn inside `rect`. Falls back to a
    /// fill when the outline would cover the whole rectangle.
    pub fn rect_line(&mut self, rect: Rect, t: f32, color: Color) {
        let rect = rect.normalized();
        if t * 2.0 >= rect.width().min(rect.height()) {
            self.rect(rect, color);
            return;
        }
        let inner = rect.inset(t);
        let outer_pts = [rect.top_left(), rect.top_right(), rect.bottom_right(), rect.bottom_left()];
        let inner_pts = [inner.top_left(), inner.top_right(), inner.bottom_right(), inner.bottom_left()];
        self.emit_band(&outer_pts, &inner_pts, color, true);
    }

    /// Closed outline of a convex polygon, inset by `t`.
    fn polygon_line(&mut self, points: &[Vec2], t: f32, color: Color) {
        match inset_polygon(points, t) {
            Some(inner) => self.emit_band(points, &inner, color, true),
            None => {
                // Collinear points: nothing to inset towards, stroke the edges.
                for i in 0..points.len() {
                    self.line(points[i], points[(i + 1) % points.len()], t, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::batch::Batch;
    use crate::coords::{Rect, Vec2};
    use crate::paint::{Color, ColorMode, FillWeights};
    use crate::resource::Texture;

    #[test]
    fn rect_is_four_vertices_six_indices() {
        let mut b = Batch::new();
        b.rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::RED);

        assert_eq!(b.vertices().len(), 4);
        assert_eq!(b.indices(), &[0, 1, 2, 0, 2, 3]);
        let v = b.vertices();
        assert_eq!(v[0].position(), Vec2::new(0.0, 0.0));
        assert_eq!(v[1].position(), Vec2::new(10.0, 0.0));
        assert_eq!(v[2].position(), Vec2::new(10.0, 10.0));
        assert_eq!(v[3].position(), Vec2::new(0.0, 10.0));
        for v in v {
            assert_eq!(v.weights(), FillWeights::FILL);
            assert_eq!(v.color(), Color::RED);
        }
    }

    #[test]
    fn tri_colored_keeps_corner_colors() {
        let mut b = Batch::new();
        b.tri_colored(Vec2::zero(), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0), Color::RED, Color::GREEN, Color::BLUE);
        let cols: Vec<Color> = b.vertices().iter().map(|v| v.color()).collect();
        assert_eq!(cols, vec![Color::RED, Color::GREEN, Color::BLUE]);
        assert_eq!(b.indices(), &[0, 1, 2]);
    }

    #[test]
    fn textured_weights_follow_color_mode() {
        let mut b = Batch::new();
        b.set_texture(Some(Texture::new(4, 4)));
        let uv = [Vec2::zero(), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0)];
        b.quad_textured_colored(uv, uv, [Color::WHITE; 4]);
        b.push_color_mode(ColorMode::Wash);
        b.quad_textured_colored(uv, uv, [Color::WHITE; 4]);
        b.pop_color_mode();

        let v = b.vertices();
        assert!(v[..4].iter().all(|v| v.weights() == FillWeights::MULT));
        assert!(v[4..].iter().all(|v| v.weights() == FillWeights::WASH));
        assert_eq!(v[2].tex, [1.0, 1.0]);
    }

    #[test]
    fn wash_mode_does_not_affect_untextured_fills() {
        let mut b = Batch::new();
        b.push_color_mode(ColorMode::Wash);
        b.tri(Vec2::zero(), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0), Color::WHITE);
        b.pop_color_mode();
        assert!(b.vertices().iter().all(|v| v.weights() == FillWeights::FILL));
    }

    #[test]
    fn rect_line_is_a_closed_band() {
        let mut b = Batch::new();
        b.rect_line(Rect::new(0.0, 0.0, 10.0, 10.0), 1.0, Color::WHITE);
        assert_eq!(b.vertices().len(), 8);
        assert_eq!(b.indices().len(), 24);
        // Inner ring sits one pixel in.
        assert_eq!(b.vertices()[1].position(), Vec2::new(1.0, 1.0));
        assert_eq!(b.vertices()[5].position(), Vec2::new(9.0, 9.0));
    }

    #[test]
    fn thick_rect_line_fills() {
        let mut b = Batch::new();
        b.rect_line(Rect::new(0.0, 0.0, 4.0, 10.0), 2.0, Color::WHITE);
        assert_eq!(b.vertices().len(), 4);
    }

    #[test]
    fn tri_line_emits_band_per_edge() {
        let mut b = Batch::new();
        b.tri_line(Vec2::zero(), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0), 1.0, Color::WHITE);
        assert_eq!(b.vertices().len(), 6);
        assert_eq!(b.indices().len(), 18);
        assert_eq!(b.batches().count(), 1);
    }

    #[test]
    fn degenerate_quad_line_strokes_edges() {
        let mut b = Batch::new();
        let p = |x| Vec2::new(x, 0.0);
        b.quad_line(p(0.0), p(1.0), p(2.0), p(3.0), 1.0, Color::WHITE);
        assert_eq!(b.indices().len(), 4 * 6);
    }
}
