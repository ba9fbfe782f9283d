use core::ops::Mul;

use super::Vec2;

/// 2D affine transform (row-vector convention).
///
/// A point is transformed as `[x y 1] * M`, so `a * b` applies `a` first and
/// then `b`. Nested batch transforms compose as `local * parent`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat3x2 {
    pub m11: f32,
    pub m12: f32,
    pub m21: f32,
    pub m22: f32,
    pub m31: f32,
    pub m32: f32,
}

impl Default for Mat3x2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat3x2 {
    pub const IDENTITY: Mat3x2 = Mat3x2::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    #[inline]
    pub const fn new(m11: f32, m12: f32, m21: f32, m22: f32, m31: f32, m32: f32) -> Self {
        Self { m11, m12, m21, m22, m31, m32 }
    }

    #[inline]
    pub const fn translation(offset: Vec2) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, offset.x, offset.y)
    }

    #[inline]
    pub const fn scale(scale: Vec2) -> Self {
        Self::new(scale.x, 0.0, 0.0, scale.y, 0.0, 0.0)
    }

    #[inline]
    pub const fn uniform_scale(scale: f32) -> Self {
        Self::new(scale, 0.0, 0.0, scale, 0.0, 0.0)
    }

    /// Rotation by `radians`; positive angles turn +X towards +Y.
    #[inline]
    pub fn rotation(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::new(c, s, -s, c, 0.0, 0.0)
    }

    /// Sprite-style transform: move `origin` to zero, scale, rotate, then move to `position`.
    pub fn transform(position: Vec2, origin: Vec2, scale: Vec2, rotation: f32) -> Self {
        let mut m = Self::IDENTITY;
        if origin != Vec2::zero() {
            m = m * Self::translation(-origin);
        }
        if scale != Vec2::one() {
            m = m * Self::scale(scale);
        }
        if rotation != 0.0 {
            m = m * Self::rotation(rotation);
        }
        if position != Vec2::zero() {
            m = m * Self::translation(position);
        }
        m
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    #[inline]
    pub fn determinant(&self) -> f32 {
        self.m11 * self.m22 - self.m21 * self.m12
    }

    /// Inverse transform, or `None` when the matrix is singular.
    pub fn invert(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv = 1.0 / det;
        Some(Self::new(
            self.m22 * inv,
            -self.m12 * inv,
            -self.m21 * inv,
            self.m11 * inv,
            (self.m21 * self.m32 - self.m31 * self.m22) * inv,
            (self.m31 * self.m12 - self.m11 * self.m32) * inv,
        ))
    }

    /// Transforms a point (translation applied).
    #[inline]
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x * self.m11 + p.y * self.m21 + self.m31,
            p.x * self.m12 + p.y * self.m22 + self.m32,
        )
    }

    /// Transforms a direction (translation ignored).
    #[inline]
    pub fn transform_vector(&self, v: Vec2) -> Vec2 {
        Vec2::new(v.x * self.m11 + v.y * self.m21, v.x * self.m12 + v.y * self.m22)
    }
}

impl Mul for Mat3x2 {
    type Output = Mat3x2;

    #[inline]
    fn mul(self, b: Mat3x2) -> Mat3x2 {
        let a = self;
        Mat3x2::new(
            a.m11 * b.m11 + a.m12 * b.m21,
            a.m11 * b.m12 + a.m12 * b.m22,
            a.m21 * b.m11 + a.m22 * b.m21,
            a.m21 * b.m12 + a.m22 * b.m22,
            a.m31 * b.m11 + a.m32 * b.m21 + b.m31,
            a.m31 * b.m12 + a.m32 * b.m22 + b.m32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn translation_moves_points() {
        let m = Mat3x2::translation(Vec2::new(3.0, 4.0));
        assert_eq!(m.transform_point(Vec2::new(1.0, 1.0)), Vec2::new(4.0, 5.0));
        assert_eq!(m.transform_vector(Vec2::new(1.0, 1.0)), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn multiplication_applies_left_first() {
        let scale = Mat3x2::uniform_scale(2.0);
        let shift = Mat3x2::translation(Vec2::new(10.0, 0.0));
        let p = Vec2::new(1.0, 1.0);
        assert_eq!((scale * shift).transform_point(p), Vec2::new(12.0, 2.0));
        assert_eq!((shift * scale).transform_point(p), Vec2::new(22.0, 2.0));
    }

    #[test]
    fn rotation_quarter_turn() {
        let m = Mat3x2::rotation(core::f32::consts::FRAC_PI_2);
        assert!(approx(m.transform_point(Vec2::new(1.0, 0.0)), Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn sprite_transform_pivots_around_origin() {
        let m = Mat3x2::transform(
            Vec2::new(100.0, 50.0),
            Vec2::new(5.0, 5.0),
            Vec2::new(2.0, 2.0),
            0.0,
        );
        // The origin itself lands on the position.
        assert!(approx(m.transform_point(Vec2::new(5.0, 5.0)), Vec2::new(100.0, 50.0)));
        assert!(approx(m.transform_point(Vec2::new(0.0, 0.0)), Vec2::new(90.0, 40.0)));
    }

    #[test]
    fn invert_round_trips_a_point() {
        let m = Mat3x2::transform(Vec2::new(7.0, -3.0), Vec2::zero(), Vec2::new(2.0, 0.5), 0.3);
        let inv = m.invert().unwrap();
        let p = Vec2::new(4.0, 9.0);
        assert!(approx(inv.transform_point(m.transform_point(p)), p));
        assert!(Mat3x2::uniform_scale(0.0).invert().is_none());
    }
}
