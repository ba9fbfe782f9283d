use std::f32::consts::PI;

use crate::coords::Vec2;
use crate::paint::{Color, FillWeights};

use crate::batch::Batch;

/// Half-angle between an arrow head's sides and its axis.
const ARROW_HALF_ANGLE: f32 = PI / 6.0;

impl Batch {
    /// Stroked segment `t` pixels thick.
    #[inline]
    pub fn line(&mut self, from: Vec2, to: Vec2, t: f32, color: Color) {
        self.line_gradient(from, to, t, color, color);
    }

    /// Stroked segment whose color goes from `from_color` to `to_color`.
    ///
    /// The quad is offset by ±`t/2` along the unit perpendicular. Zero-length
    /// segments have no direction and produce a degenerate quad.
    pub fn line_gradient(&mut self, from: Vec2, to: Vec2, t: f32, from_color: Color, to_color: Color) {
        let offset = (to - from).normalized().perpendicular() * (t * 0.5);
        let uv = Vec2::zero();
        self.emit_quad(
            [from + offset, to + offset, to - offset, from - offset],
            [uv; 4],
            [from_color, to_color, to_color, from_color],
            FillWeights::FILL,
        );
    }

    /// Filled isosceles triangle with its apex at `point`, pointing along
    /// `radians`. Both sides are `side_len` long.
    pub fn arrow_head(&mut self, point: Vec2, radians: f32, side_len: f32, color: Color) {
        let back = radians + PI;
        let left = point + Vec2::from_angle(back - ARROW_HALF_ANGLE, side_len);
        let right = point + Vec2::from_angle(back + ARROW_HALF_ANGLE, side_len);
        self.tri(point, left, right, color);
    }

    /// Arrow head at `point` pointing away from `from`.
    #[inline]
    pub fn arrow_head_from(&mut self, point: Vec2, from: Vec2, side_len: f32, color: Color) {
        self.arrow_head(point, (point - from).angle(), side_len, color);
    }
}
