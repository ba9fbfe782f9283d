/// Per-channel combine operation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BlendOp {
    Add,
    Subtract,
    ReverseSubtract,
    Min,
    Max,
}

/// Source/destination weighting factor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    Zero,
    One,
    SrcColor,
    OneMinusSrcColor,
    DstColor,
    OneMinusDstColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstAlpha,
    OneMinusDstAlpha,
    ConstantColor,
    OneMinusConstantColor,
    SrcAlphaSaturated,
}

/// Which channels a draw call writes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ColorMask {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
    pub alpha: bool,
}

impl ColorMask {
    pub const ALL: ColorMask = ColorMask { red: true, green: true, blue: true, alpha: true };
    pub const RGB: ColorMask = ColorMask { red: true, green: true, blue: true, alpha: false };
}

/// GPU pixel-combine function applied to a whole draw call.
///
/// Part of the batch key: consecutive geometry with different blend modes
/// always ends up in different draw batches.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BlendMode {
    pub color_op: BlendOp,
    pub color_src: BlendFactor,
    pub color_dst: BlendFactor,
    pub alpha_op: BlendOp,
    pub alpha_src: BlendFactor,
    pub alpha_dst: BlendFactor,
    pub mask: ColorMask,
    /// Constant color for the `ConstantColor` factors, as `0xRRGGBBAA`.
    pub constant: u32,
}

impl BlendMode {
    /// Premultiplied-alpha "over". The default for all batches.
    pub const NORMAL: BlendMode = BlendMode::uniform(BlendOp::Add, BlendFactor::One, BlendFactor::OneMinusSrcAlpha);

    /// Straight-alpha "over".
    pub const NON_PREMULTIPLIED: BlendMode =
        BlendMode::uniform(BlendOp::Add, BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha);

    /// Adds source onto destination.
    pub const ADDITIVE: BlendMode = BlendMode::uniform(BlendOp::Add, BlendFactor::SrcAlpha, BlendFactor::One);

    /// Subtracts source from destination.
    pub const SUBTRACT: BlendMode = BlendMode::uniform(BlendOp::ReverseSubtract, BlendFactor::One, BlendFactor::One);

    /// Same operation and factors for color and alpha, all channels written.
    pub const fn uniform(op: BlendOp, src: BlendFactor, dst: BlendFactor) -> Self {
        Self {
            color_op: op,
            color_src: src,
            color_dst: dst,
            alpha_op: op,
            alpha_src: src,
            alpha_dst: dst,
            mask: ColorMask::ALL,
            constant: 0xffff_ffff,
        }
    }
}

impl Default for BlendMode {
    fn default() -> Self {
        Self::NORMAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_premultiplied_over() {
        let b = BlendMode::default();
        assert_eq!(b, BlendMode::NORMAL);
        assert_eq!(b.color_src, BlendFactor::One);
        assert_eq!(b.color_dst, BlendFactor::OneMinusSrcAlpha);
        assert_eq!(b.mask, ColorMask::ALL);
    }

    #[test]
    fn presets_are_distinct() {
        assert_ne!(BlendMode::NORMAL, BlendMode::ADDITIVE);
        assert_ne!(BlendMode::NORMAL, BlendMode::NON_PREMULTIPLIED);
        assert_ne!(BlendMode::ADDITIVE, BlendMode::SUBTRACT);
    }
}
