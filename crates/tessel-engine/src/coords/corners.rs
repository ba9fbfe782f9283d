/// One corner of a rounded rectangle: radius in logical pixels plus the
/// number of arc segments used to tessellate it.
///
/// A radius of zero (or less) produces a sharp corner and no arc geometry.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Corner {
    pub radius: f32,
    pub steps: i32,
}

impl Corner {
    #[inline]
    pub const fn new(radius: f32, steps: i32) -> Self {
        Self { radius, steps }
    }

    /// Sharp corner.
    #[inline]
    pub const fn sharp() -> Self {
        Self { radius: 0.0, steps: 0 }
    }
}

/// Per-corner description of a rounded rectangle.
///
/// Corners follow CSS order: top-left, top-right, bottom-right, bottom-left.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Corners {
    pub top_left: Corner,
    pub top_right: Corner,
    pub bottom_right: Corner,
    pub bottom_left: Corner,
}

impl Corners {
    #[inline]
    pub const fn new(top_left: Corner, top_right: Corner, bottom_right: Corner, bottom_left: Corner) -> Self {
        Self { top_left, top_right, bottom_right, bottom_left }
    }

    /// Same radius and step count on all four corners.
    #[inline]
    pub const fn all(radius: f32, steps: i32) -> Self {
        let c = Corner::new(radius, steps);
        Self { top_left: c, top_right: c, bottom_right: c, bottom_left: c }
    }

    /// No rounding.
    #[inline]
    pub const fn sharp() -> Self {
        Self::all(0.0, 0)
    }

    #[inline]
    pub fn is_sharp(&self) -> bool {
        self.top_left.radius <= 0.0
            && self.top_right.radius <= 0.0
            && self.bottom_right.radius <= 0.0
            && self.bottom_left.radius <= 0.0
    }

    /// Corners in perimeter order (clockwise with +Y down, starting top-left).
    #[inline]
    pub fn to_array(self) -> [Corner; 4] {
        [self.top_left, self.top_right, self.bottom_right, self.bottom_left]
    }
}
