use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// 2D vector in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[inline]
    pub const fn one() -> Self {
        Self { x: 1.0, y: 1.0 }
    }

    /// Unit vector pointing at `radians` (0 = +X, PI/2 = +Y), scaled by `length`.
    #[inline]
    pub fn from_angle(radians: f32, length: f32) -> Self {
        Self::new(radians.cos() * length, radians.sin() * length)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn dot(self, rhs: Vec2) -> f32 {
        self.x * rhs.x + self.y * rhs.y
    }

    /// Z component of the 3D cross product.
    #[inline]
    pub fn cross(self, rhs: Vec2) -> f32 {
        self.x * rhs.y - self.y * rhs.x
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Returns the unit vector, or zero for a zero-length input.
    #[inline]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len > 0.0 { self / len } else { Vec2::zero() }
    }

    /// Rotates 90° so that, with +Y down, the result points to the left of `self`.
    ///
    /// `(1, 0)` becomes `(0, -1)`.
    #[inline]
    pub fn perpendicular(self) -> Self {
        Self::new(self.y, -self.x)
    }

    /// Angle of the vector in radians.
    #[inline]
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    #[inline]
    pub fn lerp(a: Vec2, b: Vec2, t: f32) -> Self {
        a + (b - a) * t
    }

    /// Point on a quadratic bezier curve at parameter `t`.
    #[inline]
    pub fn lerp_bezier(a: Vec2, b: Vec2, end: Vec2, t: f32) -> Self {
        Self::lerp(Self::lerp(a, b, t), Self::lerp(b, end, t), t)
    }

    /// Point on a cubic bezier curve at parameter `t`.
    #[inline]
    pub fn lerp_bezier_cubic(a: Vec2, b: Vec2, c: Vec2, end: Vec2, t: f32) -> Self {
        Self::lerp_bezier(Self::lerp(a, b, t), Self::lerp(b, c, t), Self::lerp(c, end, t), t)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-5 && (a.y - b.y).abs() < 1e-5
    }

    #[test]
    fn perpendicular_points_left_with_y_down() {
        assert_eq!(Vec2::new(1.0, 0.0).perpendicular(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn normalized_zero_stays_zero() {
        assert_eq!(Vec2::zero().normalized(), Vec2::zero());
    }

    #[test]
    fn bezier_endpoints() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(5.0, 10.0);
        let c = Vec2::new(10.0, 0.0);
        assert!(approx(Vec2::lerp_bezier(a, b, c, 0.0), a));
        assert!(approx(Vec2::lerp_bezier(a, b, c, 1.0), c));
        assert!(approx(Vec2::lerp_bezier(a, b, c, 0.5), Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn cubic_bezier_midpoint_of_straight_line() {
        let p = Vec2::lerp_bezier_cubic(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(3.0, 0.0),
            0.5,
        );
        assert!(approx(p, Vec2::new(1.5, 0.0)));
    }
}
