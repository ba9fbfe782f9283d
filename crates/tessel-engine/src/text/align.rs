use core::ops::{BitAnd, BitOr};

/// Anchor of a text run relative to its draw position.
///
/// Horizontal and vertical flags combine with `|`. An axis with no flag is
/// centered, so [`TextAlign::CENTER`] (no flags) centers on both axes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TextAlign(u8);

impl TextAlign {
    pub const CENTER: TextAlign = TextAlign(0);
    pub const LEFT: TextAlign = TextAlign(1 << 1);
    pub const RIGHT: TextAlign = TextAlign(1 << 2);
    pub const TOP: TextAlign = TextAlign(1 << 3);
    pub const BOTTOM: TextAlign = TextAlign(1 << 4);

    pub const TOP_LEFT: TextAlign = TextAlign(Self::TOP.0 | Self::LEFT.0);
    pub const TOP_RIGHT: TextAlign = TextAlign(Self::TOP.0 | Self::RIGHT.0);
    pub const BOTTOM_LEFT: TextAlign = TextAlign(Self::BOTTOM.0 | Self::LEFT.0);
    pub const BOTTOM_RIGHT: TextAlign = TextAlign(Self::BOTTOM.0 | Self::RIGHT.0);

    #[inline]
    pub const fn contains(self, other: TextAlign) -> bool {
        self.0 & other.0 == other.0
    }

    /// Horizontal anchor as a fraction of the line width (0 = left, 1 = right).
    #[inline]
    pub(crate) fn horizontal_factor(self) -> f32 {
        if self.contains(Self::LEFT) {
            0.0
        } else if self.contains(Self::RIGHT) {
            1.0
        } else {
            0.5
        }
    }
}

impl Default for TextAlign {
    fn default() -> Self {
        Self::TOP_LEFT
    }
}

impl BitOr for TextAlign {
    type Output = TextAlign;
    #[inline]
    fn bitor(self, rhs: TextAlign) -> TextAlign {
        TextAlign(self.0 | rhs.0)
    }
}

impl BitAnd for TextAlign {
    type Output = TextAlign;
    #[inline]
    fn bitand(self, rhs: TextAlign) -> TextAlign {
        TextAlign(self.0 & rhs.0)
    }
}
