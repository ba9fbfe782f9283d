/// How textured geometry combines the sampled texel with the vertex color.
///
/// Untextured geometry is unaffected: it always fills with the vertex color.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum ColorMode {
    /// Texel multiplied by the vertex color (alpha included).
    #[default]
    Normal,
    /// Texel alpha only; its color is replaced by the vertex color.
    Wash,
}

/// Per-vertex fill weights. Exactly one of the three paths is at full intensity.
///
/// The shader computes
/// `mult * texel * color + wash * texel.a * color + fill * color`,
/// so triangles with different fill semantics can share one draw call.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FillWeights {
    pub mult: u8,
    pub wash: u8,
    pub fill: u8,
}

impl FillWeights {
    /// Ignore the texture; solid vertex color.
    pub const FILL: FillWeights = FillWeights { mult: 0, wash: 0, fill: 255 };
    /// Texture multiplied by the vertex color.
    pub const MULT: FillWeights = FillWeights { mult: 255, wash: 0, fill: 0 };
    /// Texture alpha with the vertex color.
    pub const WASH: FillWeights = FillWeights { mult: 0, wash: 255, fill: 0 };

    /// Weights for a primitive given the active color mode.
    #[inline]
    pub const fn select(mode: ColorMode, textured: bool) -> Self {
        match (textured, mode) {
            (false, _) => Self::FILL,
            (true, ColorMode::Normal) => Self::MULT,
            (true, ColorMode::Wash) => Self::WASH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untextured_always_fills() {
        assert_eq!(FillWeights::select(ColorMode::Normal, false), FillWeights::FILL);
        assert_eq!(FillWeights::select(ColorMode::Wash, false), FillWeights::FILL);
    }

    #[test]
    fn textured_follows_color_mode() {
        assert_eq!(FillWeights::select(ColorMode::Normal, true), FillWeights::MULT);
        assert_eq!(FillWeights::select(ColorMode::Wash, true), FillWeights::WASH);
    }

    #[test]
    fn every_preset_sums_to_full_intensity() {
        for w in [FillWeights::FILL, FillWeights::MULT, FillWeights::WASH] {
            assert_eq!(w.mult as u32 + w.wash as u32 + w.fill as u32, 255);
        }
    }
}
