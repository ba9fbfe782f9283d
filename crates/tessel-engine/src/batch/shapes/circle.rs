use std::f32::consts::TAU;

use crate::batch::Batch;
use crate::coords::Vec2;
use crate::paint::Color;

use super::{MIN_ARC_STEPS, arc_points};

/// `steps` points evenly spaced around a full circle, starting at angle 0.
fn ring(center: Vec2, radius: f32, steps: i32) -> Vec<Vec2> {
    let steps = steps.max(MIN_ARC_STEPS);
    (0..steps)
        .map(|i| center + Vec2::from_angle(i as f32 / steps as f32 * TAU, radius))
        .collect()
}

impl Batch {
    /// Filled circle as a fan of `steps` triangles (at least 3) around the
    /// center: `steps + 1` vertices, `3 * steps` indices.
    pub fn circle(&mut self, center: Vec2, radius: f32, steps: i32, color: Color) {
        let rim = ring(center, radius, steps);
        self.emit_fan(center, color, &rim, color, true);
    }

    /// Circle outline `t` pixels thick, inside `radius`. Outlines at least as
    /// thick as the radius are filled.
    pub fn circle_line(&mut self, center: Vec2, radius: f32, t: f32, steps: i32, color: Color) {
        if t >= radius {
            self.circle(center, radius, steps, color);
            return;
        }
        let outer = ring(center, radius, steps);
        let inner = ring(center, radius - t, steps);
        self.emit_band(&outer, &inner, color, true);
    }

    /// Pie slice from `start` to `end` radians.
    #[inline]
    pub fn semi_circle(&mut self, center: Vec2, start: f32, end: f32, radius: f32, steps: i32, color: Color) {
        self.semi_circle_gradient(center, start, end, radius, steps, color, color);
    }

    /// Pie slice shaded from `center_color` at the center to `edge_color` on the arc.
    #[allow(clippy::too_many_arguments)]
    pub fn semi_circle_gradient(
        &mut self,
        center: Vec2,
        start: f32,
        end: f32,
        radius: f32,
        steps: i32,
        center_color: Color,
        edge_color: Color,
    ) {
        let mut rim = Vec::new();
        arc_points(center, radius, start, end, steps, &mut rim);
        self.emit_fan(center, center_color, &rim, edge_color, false);
    }

    /// Arc stroke `t` pixels thick, inside `radius`.
    #[allow(clippy::too_many_arguments)]
    pub fn semi_circle_line(&mut self, center: Vec2, start: f32, end: f32, radius: f32, steps: i32, t: f32, color: Color) {
        if t >= radius {
            self.semi_circle(center, start, end, radius, steps, color);
            return;
        }
        let mut outer = Vec::new();
        let mut inner = Vec::new();
        arc_points(center, radius, start, end, steps, &mut outer);
        arc_points(center, radius - t, start, end, steps, &mut inner);
        self.emit_band(&outer, &inner, color, false);
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use crate::batch::Batch;
    use crate::coords::Vec2;
    use crate::paint::Color;

    #[test]
    fn circle_fan_counts() {
        for n in [3, 8, 32] {
            let mut b = Batch::new();
            b.circle(Vec2::new(5.0, 5.0), 2.0, n, Color::WHITE);
            assert_eq!(b.vertices().len(), n as usize + 1);
            assert_eq!(b.indices().len(), 3 * n as usize);
            assert_eq!(b.vertices()[0].position(), Vec2::new(5.0, 5.0));
        }
    }

    #[test]
    fn circle_steps_clamp_to_three() {
        let mut b = Batch::new();
        b.circle(Vec2::zero(), 1.0, 1, Color::WHITE);
        assert_eq!(b.vertices().len(), 4);
        assert_eq!(b.indices(), &[0, 1, 2, 0, 2, 3, 0, 3, 1]);
    }

    #[test]
    fn circle_rim_lies_on_radius() {
        let mut b = Batch::new();
        b.circle(Vec2::new(1.0, 2.0), 3.0, 12, Color::WHITE);
        for v in &b.vertices()[1..] {
            let d = (v.position() - Vec2::new(1.0, 2.0)).length();
            assert!((d - 3.0).abs() < 1e-4);
        }
    }

    #[test]
    fn circle_line_ring_quads() {
        let mut b = Batch::new();
        b.circle_line(Vec2::zero(), 10.0, 2.0, 16, Color::WHITE);
        assert_eq!(b.vertices().len(), 32);
        assert_eq!(b.indices().len(), 16 * 6);
    }

    #[test]
    fn thick_circle_line_fills() {
        let mut b = Batch::new();
        b.circle_line(Vec2::zero(), 2.0, 5.0, 8, Color::WHITE);
        assert_eq!(b.vertices().len(), 9);
    }

    #[test]
    fn semi_circle_is_open_fan() {
        let mut b = Batch::new();
        b.semi_circle(Vec2::zero(), 0.0, PI, 1.0, 4, Color::WHITE);
        assert_eq!(b.vertices().len(), 1 + 5);
        assert_eq!(b.indices().len(), 3 * 4);
    }

    #[test]
    fn semi_circle_gradient_center_to_edge() {
        let mut b = Batch::new();
        b.semi_circle_gradient(Vec2::zero(), 0.0, PI, 1.0, 3, Color::RED, Color::BLUE);
        let v = b.vertices();
        assert_eq!(v[0].color(), Color::RED);
        assert!(v[1..].iter().all(|v| v.color() == Color::BLUE));
    }

    #[test]
    fn semi_circle_line_band() {
        let mut b = Batch::new();
        b.semi_circle_line(Vec2::zero(), 0.0, PI, 4.0, 6, 1.0, Color::WHITE);
        assert_eq!(b.vertices().len(), 2 * 7);
        assert_eq!(b.indices().len(), 6 * 6);
    }
}
