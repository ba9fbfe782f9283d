use crate::coords::{Rect, Vec2};

use super::TextureRef;

/// A rectangular region of a texture, usually a sprite inside an atlas.
///
/// `source` is in texture pixels. `frame` describes where the source sits
/// inside the untrimmed sprite: a frame at `(-2, -3)` means the packer trimmed
/// two transparent columns on the left and three rows on top. Drawing offsets
/// the quad accordingly so trimmed and untrimmed sprites line up.
#[derive(Debug, Clone)]
pub struct Subtexture {
    texture: Option<TextureRef>,
    source: Rect,
    frame: Rect,
    tex_coords: [Vec2; 4],
    draw_coords: [Vec2; 4],
}

impl Subtexture {
    /// Region `source` of `texture`, untrimmed.
    pub fn new(texture: Option<TextureRef>, source: Rect) -> Self {
        let frame = Rect::new(0.0, 0.0, source.size.x, source.size.y);
        Self::with_frame(texture, source, frame)
    }

    /// Whole texture.
    pub fn full(texture: TextureRef) -> Self {
        let source = Rect::from_origin_size(Vec2::zero(), texture.size());
        Self::new(Some(texture), source)
    }

    /// Region given in normalized UV space; `uv` is scaled by the texture size.
    pub fn from_uv(texture: TextureRef, uv: Rect) -> Self {
        let size = texture.size();
        let source = Rect::new(
            uv.origin.x * size.x,
            uv.origin.y * size.y,
            uv.size.x * size.x,
            uv.size.y * size.y,
        );
        Self::new(Some(texture), source)
    }

    pub fn with_frame(texture: Option<TextureRef>, source: Rect, frame: Rect) -> Self {
        let mut sub = Self {
            texture,
            source,
            frame,
            tex_coords: [Vec2::zero(); 4],
            draw_coords: [Vec2::zero(); 4],
        };
        sub.update();
        sub
    }

    #[inline]
    pub fn texture(&self) -> Option<&TextureRef> {
        self.texture.as_ref()
    }

    #[inline]
    pub fn source(&self) -> Rect {
        self.source
    }

    #[inline]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// UVs of the four corners: top-left, top-right, bottom-right, bottom-left.
    #[inline]
    pub fn tex_coords(&self) -> &[Vec2; 4] {
        &self.tex_coords
    }

    /// Local quad corners in the same order as [`tex_coords`](Self::tex_coords).
    #[inline]
    pub fn draw_coords(&self) -> &[Vec2; 4] {
        &self.draw_coords
    }

    /// Untrimmed width.
    #[inline]
    pub fn width(&self) -> f32 {
        self.frame.size.x
    }

    /// Untrimmed height.
    #[inline]
    pub fn height(&self) -> f32 {
        self.frame.size.y
    }

    fn update(&mut self) {
        let s = self.source;
        let f = self.frame;

        self.draw_coords = [
            Vec2::new(-f.origin.x, -f.origin.y),
            Vec2::new(-f.origin.x + s.size.x, -f.origin.y),
            Vec2::new(-f.origin.x + s.size.x, -f.origin.y + s.size.y),
            Vec2::new(-f.origin.x, -f.origin.y + s.size.y),
        ];

        self.tex_coords = match &self.texture {
            Some(t) if t.width() > 0 && t.height() > 0 => {
                let (tw, th) = (t.width() as f32, t.height() as f32);
                let (u0, v0) = (s.origin.x / tw, s.origin.y / th);
                let (u1, v1) = ((s.origin.x + s.size.x) / tw, (s.origin.y + s.size.y) / th);
                [Vec2::new(u0, v0), Vec2::new(u1, v0), Vec2::new(u1, v1), Vec2::new(u0, v1)]
            }
            _ => [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0)],
        };
    }
}
