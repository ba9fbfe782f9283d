use crate::batch::Batch;
use crate::coords::{Mat3x2, Vec2};
use crate::paint::Color;
use crate::text::{FontMetrics, TextAlign};

impl Batch {
    /// Draws `text` with its top-left corner at `pos`, at the font's own size.
    pub fn str<F: FontMetrics + ?Sized>(&mut self, font: &F, text: &str, pos: Vec2, color: Color) {
        self.str_ex(font, text, pos, TextAlign::TOP_LEFT, font.size(), color);
    }

    /// Draws `text` anchored at `pos` by `align`, scaled to `size` pixels.
    ///
    /// Each line is aligned on its own. Glyphs are emitted as textured quads
    /// in the current color mode; their atlas texture becomes the current
    /// texture.
    pub fn str_ex<F: FontMetrics + ?Sized>(
        &mut self,
        font: &F,
        text: &str,
        pos: Vec2,
        align: TextAlign,
        size: f32,
        color: Color,
    ) {
        let scale = if font.size() > 0.0 { size / font.size() } else { 1.0 };
        self.push_matrix(Mat3x2::uniform_scale(scale) * Mat3x2::translation(pos));

        let line_x = |line: &str| -font.width_of_line(line) * align.horizontal_factor();
        let baseline = font.ascent() + font.descent();
        let y = if align.contains(TextAlign::TOP) {
            baseline
        } else if align.contains(TextAlign::BOTTOM) {
            baseline - font.height_of(text)
        } else {
            baseline - font.height_of(text) * 0.5
        };

        let mut pen = Vec2::new(line_x(text), y);
        let mut last: Option<char> = None;

        for (i, ch) in text.char_indices() {
            if ch == '\n' {
                pen.x = line_x(&text[i + 1..]);
                pen.y += font.line_height();
                last = None;
                continue;
            }

            if let Some(prev) = last {
                pen.x += font.kerning(prev, ch);
            }
            last = Some(ch);

            let Some(glyph) = font.glyph(ch) else {
                continue;
            };

            if let Some(texture) = glyph.subtexture.texture() {
                if !std::sync::Arc::ptr_eq(self.texture(), texture) {
                    self.set_texture(Some(texture.clone()));
                }
                let origin = pen + glyph.offset;
                let corners = (*glyph.subtexture.draw_coords()).map(|c| origin + c);
                self.quad_textured_colored(corners, *glyph.subtexture.tex_coords(), [color; 4]);
            }

            pen.x += glyph.advance;
        }

        self.pop_matrix();
    }
}

#[cfg(test)]
mod tests {
    use crate::batch::Batch;
    use crate::coords::{Rect, Vec2};
    use crate::paint::{Color, ColorMode, FillWeights};
    use crate::resource::{Subtexture, Texture};
    use crate::text::{FontMetrics, Glyph, SpriteFont, TextAlign};

    /// 10px font, 8px glyph boxes sitting on the baseline, 6px advance.
    fn font() -> SpriteFont {
        let atlas = Texture::new(64, 64);
        let mut f = SpriteFont::new("mono", 10.0, 8.0, -2.0, 0.0);
        for (i, ch) in "abc".chars().enumerate() {
            f.insert_glyph(
                ch,
                Glyph {
                    subtexture: Subtexture::new(Some(atlas.clone()), Rect::new(i as f32 * 8.0, 0.0, 8.0, 8.0)),
                    advance: 6.0,
                    offset: Vec2::new(0.0, -8.0),
                },
            );
        }
        f.insert_glyph(
            ' ',
            Glyph { subtexture: Subtexture::new(None, Rect::zero()), advance: 4.0, offset: Vec2::zero() },
        );
        f
    }

    fn glyph_origins(b: &Batch) -> Vec<Vec2> {
        b.vertices().chunks(4).map(|q| q[0].position()).collect()
    }

    #[test]
    fn one_quad_per_visible_glyph() {
        let mut b = Batch::new();
        b.str(&font(), "ab c", Vec2::zero(), Color::WHITE);
        assert_eq!(b.vertices().len(), 3 * 4);
        assert_eq!(b.indices().len(), 3 * 6);
        assert_eq!(b.batches().count(), 1);

        // Space advances without drawing.
        let xs: Vec<f32> = glyph_origins(&b).iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 6.0, 16.0]);
        assert!(b.vertices().iter().all(|v| v.weights() == FillWeights::MULT));
    }

    #[test]
    fn unknown_characters_are_skipped() {
        let mut b = Batch::new();
        b.str(&font(), "a?b", Vec2::zero(), Color::WHITE);
        assert_eq!(glyph_origins(&b).iter().map(|p| p.x).collect::<Vec<_>>(), vec![0.0, 6.0]);
    }

    #[test]
    fn kerning_shifts_following_glyph() {
        let mut f = font();
        f.set_kerning('a', 'b', -2.0);
        let mut b = Batch::new();
        b.str(&f, "ab", Vec2::zero(), Color::WHITE);
        assert_eq!(glyph_origins(&b)[1].x, 4.0);
    }

    #[test]
    fn newline_moves_down_and_realigns() {
        let mut b = Batch::new();
        b.str_ex(&font(), "ab\nc", Vec2::zero(), TextAlign::TOP_RIGHT, 10.0, Color::WHITE);
        let o = glyph_origins(&b);
        assert_eq!(o.len(), 3);
        assert_eq!(o[0].x, -12.0);
        assert_eq!(o[2].x, -6.0);
        assert_eq!(o[2].y - o[0].y, 10.0);
    }

    #[test]
    fn size_scales_around_position() {
        let mut b = Batch::new();
        b.str_ex(&font(), "b", Vec2::new(100.0, 50.0), TextAlign::TOP_LEFT, 20.0, Color::WHITE);
        let v = b.vertices();
        // Glyph top sits at baseline (6) - 8 = -2 font px, doubled.
        assert_eq!(v[0].position(), Vec2::new(100.0, 46.0));
        assert_eq!(v[2].position(), Vec2::new(116.0, 62.0));
    }

    #[test]
    fn centered_alignment_offsets_half_the_run() {
        let mut b = Batch::new();
        b.str_ex(&font(), "ab", Vec2::zero(), TextAlign::CENTER, 10.0, Color::WHITE);
        let o = glyph_origins(&b);
        assert_eq!(o[0].x, -6.0);
        // baseline (6) - height (10) / 2 - glyph rise (8)
        assert_eq!(o[0].y, -7.0);
    }

    #[test]
    fn bottom_alignment_lifts_every_line_above_the_anchor() {
        let f = font();
        let mut b = Batch::new();
        b.str_ex(&f, "ab\nc", Vec2::zero(), TextAlign::BOTTOM_LEFT, 10.0, Color::WHITE);
        let o = glyph_origins(&b);
        assert_eq!(o.len(), 3);
        // baseline (6) - two lines (20) - glyph rise (8)
        assert_eq!(f.height_of("ab\nc"), 20.0);
        assert_eq!(o[0], Vec2::new(0.0, -22.0));
        assert_eq!(o[2], Vec2::new(0.0, -12.0));
    }

    #[test]
    fn wash_mode_applies_to_glyphs() {
        let mut b = Batch::new();
        b.push_color_mode(ColorMode::Wash);
        b.str(&font(), "abc", Vec2::zero(), Color::BLUE);
        b.pop_color_mode();
        assert!(b.vertices().iter().all(|v| v.weights() == FillWeights::WASH));
    }
}
