use crate::batch::Batch;
use crate::coords::Vec2;
use crate::paint::Color;

use super::MIN_CURVE_STEPS;

impl Batch {
    /// Quadratic bezier from `from` to `to` with control point `b`, stroked as
    /// `steps` straight segments.
    pub fn bezier_line(&mut self, from: Vec2, b: Vec2, to: Vec2, steps: i32, t: f32, color: Color) {
        self.stroke_curve(steps, t, color, |u| Vec2::lerp_bezier(from, b, to, u));
    }

    /// Cubic bezier from `from` to `to` with control points `b` and `c`.
    #[allow(clippy::too_many_arguments)]
    pub fn bezier_line_cubic(&mut self, from: Vec2, b: Vec2, c: Vec2, to: Vec2, steps: i32, t: f32, color: Color) {
        self.stroke_curve(steps, t, color, |u| Vec2::lerp_bezier_cubic(from, b, c, to, u));
    }

    fn stroke_curve(&mut self, steps: i32, t: f32, color: Color, curve: impl Fn(f32) -> Vec2) {
        let steps = steps.max(MIN_CURVE_STEPS);
        let mut prev = curve(0.0);
        for i in 1..=steps {
            let next = curve(i as f32 / steps as f32);
            self.line(prev, next, t, color);
            prev = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::batch::Batch;
    use crate::coords::Vec2;
    use crate::paint::Color;

    #[test]
    fn quadratic_segments() {
        let mut b = Batch::new();
        b.bezier_line(Vec2::zero(), Vec2::new(5.0, 10.0), Vec2::new(10.0, 0.0), 8, 1.0, Color::WHITE);
        assert_eq!(b.vertices().len(), 8 * 4);
        assert_eq!(b.indices().len(), 8 * 6);
        assert_eq!(b.batches().count(), 1);
    }

    #[test]
    fn zero_steps_draw_one_segment() {
        let mut b = Batch::new();
        b.bezier_line_cubic(
            Vec2::zero(),
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(10.0, 0.0),
            0,
            2.0,
            Color::WHITE,
        );
        assert_eq!(b.vertices().len(), 4);
        // A single chord from start to end.
        assert_eq!(b.vertices()[0].position(), Vec2::new(0.0, -1.0));
        assert_eq!(b.vertices()[1].position(), Vec2::new(10.0, -1.0));
    }

    #[test]
    fn curve_passes_through_endpoints() {
        let mut b = Batch::new();
        let end = Vec2::new(20.0, 0.0);
        b.bezier_line(Vec2::zero(), Vec2::new(10.0, 20.0), end, 4, 0.0, Color::WHITE);
        let last = b.vertices()[b.vertices().len() - 3].position();
        assert!((last - end).length() < 1e-4);
    }
}
