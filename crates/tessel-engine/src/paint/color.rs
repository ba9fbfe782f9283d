/// 8-bit RGBA color, stored exactly as it is written into vertices.
///
/// Invariant:
/// - colors are premultiplied (`rgb` already multiplied by `a`), matching
///   [`BlendMode::NORMAL`](super::BlendMode::NORMAL).
///
/// Use [`Color::from_straight`] for straight-alpha inputs.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);

    /// Opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from premultiplied components.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `0xRRGGBB` into an opaque color.
    #[inline]
    pub const fn hex(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Premultiplies straight-alpha bytes.
    #[inline]
    pub fn from_straight(r: u8, g: u8, b: u8, a: u8) -> Self {
        let mul = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
        Self { r: mul(r), g: mul(g), b: mul(b), a }
    }

    /// Premultiplied color from straight `f32` components in `[0, 1]`.
    #[inline]
    pub fn from_straight_f32(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        let q = |c: f32| (c.clamp(0.0, 1.0) * a * 255.0).round() as u8;
        Self { r: q(r), g: q(g), b: q(b), a: (a * 255.0).round() as u8 }
    }

    /// Scales all four (premultiplied) channels by `alpha` in `[0, 1]`.
    #[inline]
    pub fn with_alpha(self, alpha: f32) -> Self {
        let alpha = alpha.clamp(0.0, 1.0);
        let q = |c: u8| (c as f32 * alpha).round() as u8;
        Self { r: q(self.r), g: q(self.g), b: q(self.b), a: q(self.a) }
    }

    /// Linear interpolation per channel; `t` is clamped to `[0, 1]`.
    #[inline]
    pub fn lerp(a: Color, b: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let l = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
        Self { r: l(a.r, b.r), g: l(a.g, b.g), b: l(a.b, b.b), a: l(a.a, b.a) }
    }

    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Debug-only validation: asserts that RGB channels do not exceed alpha,
    /// which would indicate a straight-alpha color was passed where premul was expected.
    ///
    /// No-op in release builds.
    #[inline]
    pub fn debug_assert_premul(self) {
        debug_assert!(
            self.r <= self.a && self.g <= self.a && self.b <= self.a,
            "Color::debug_assert_premul: {self:?} looks like straight-alpha was passed as premul"
        );
    }
}
