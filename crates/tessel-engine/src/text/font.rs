use std::collections::HashMap;

use crate::coords::Vec2;
use crate::resource::Subtexture;

/// Placement data for one character.
#[derive(Debug, Clone)]
pub struct Glyph {
    /// Atlas region to draw. A region without a texture advances the pen only.
    pub subtexture: Subtexture,
    /// Horizontal pen advance after this glyph.
    pub advance: f32,
    /// Offset of the quad's top-left from the pen position on the baseline.
    pub offset: Vec2,
}

/// Font-metrics provider used by [`Batch::str`](crate::batch::Batch::str).
///
/// All metrics are in pixels at [`size`](Self::size). `descent` is negative
/// (below the baseline).
pub trait FontMetrics {
    /// Pixel size the metrics were generated at.
    fn size(&self) -> f32;
    fn ascent(&self) -> f32;
    fn descent(&self) -> f32;

    fn line_gap(&self) -> f32 {
        0.0
    }

    fn glyph(&self, ch: char) -> Option<&Glyph>;

    /// Extra horizontal offset between two consecutive characters.
    fn kerning(&self, _first: char, _second: char) -> f32 {
        0.0
    }

    fn line_height(&self) -> f32 {
        self.ascent() - self.descent() + self.line_gap()
    }

    /// Width of the first line of `text` (up to the first `'\n'`).
    fn width_of_line(&self, text: &str) -> f32 {
        let mut width = 0.0;
        let mut last: Option<char> = None;
        for ch in text.chars() {
            if ch == '\n' {
                break;
            }
            if let Some(prev) = last {
                width += self.kerning(prev, ch);
            }
            if let Some(g) = self.glyph(ch) {
                width += g.advance;
            }
            last = Some(ch);
        }
        width
    }

    /// Width of the widest line of `text`.
    fn width_of(&self, text: &str) -> f32 {
        text.split('\n')
            .map(|line| self.width_of_line(line))
            .fold(0.0, f32::max)
    }

    /// Height of all lines of `text`; zero for an empty string.
    fn height_of(&self, text: &str) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        let breaks = text.chars().filter(|&c| c == '\n').count() as f32;
        self.line_height() * (breaks + 1.0) - self.line_gap()
    }
}

/// Atlas-backed bitmap font: a glyph table plus kerning pairs.
#[derive(Debug, Clone, Default)]
pub struct SpriteFont {
    pub name: String,
    pub size: f32,
    pub ascent: f32,
    pub descent: f32,
    pub line_gap: f32,
    glyphs: HashMap<char, Glyph>,
    kerning: HashMap<(char, char), f32>,
}

impl SpriteFont {
    pub fn new(name: &str, size: f32, ascent: f32, descent: f32, line_gap: f32) -> Self {
        Self {
            name: name.to_owned(),
            size,
            ascent,
            descent,
            line_gap,
            glyphs: HashMap::new(),
            kerning: HashMap::new(),
        }
    }

    pub fn insert_glyph(&mut self, ch: char, glyph: Glyph) {
        self.glyphs.insert(ch, glyph);
    }

    pub fn set_kerning(&mut self, first: char, second: char, value: f32) {
        if value == 0.0 {
            self.kerning.remove(&(first, second));
        } else {
            self.kerning.insert((first, second), value);
        }
    }

    #[inline]
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }
}

impl FontMetrics for SpriteFont {
    fn size(&self) -> f32 {
        self.size
    }

    fn ascent(&self) -> f32 {
        self.ascent
    }

    fn descent(&self) -> f32 {
        self.descent
    }

    fn line_gap(&self) -> f32 {
        self.line_gap
    }

    fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    fn kerning(&self, first: char, second: char) -> f32 {
        self.kerning.get(&(first, second)).copied().unwrap_or(0.0)
    }
}
