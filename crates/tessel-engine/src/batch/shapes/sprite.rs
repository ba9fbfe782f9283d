use crate::batch::Batch;
use crate::coords::{Mat3x2, Vec2};
use crate::paint::Color;
use crate::resource::Subtexture;

impl Batch {
    /// Draws `sub` with its top-left at `pos`.
    ///
    /// The subtexture's texture becomes the current texture and stays current
    /// afterwards. A subtexture without a texture samples the white texture.
    pub fn tex(&mut self, sub: &Subtexture, pos: Vec2, color: Color) {
        self.tex_ex(sub, pos, Vec2::zero(), Vec2::one(), 0.0, color);
    }

    /// Draws `sub` moved so `origin` (in sprite pixels) lands on `pos`,
    /// scaled and rotated around that origin.
    pub fn tex_ex(&mut self, sub: &Subtexture, pos: Vec2, origin: Vec2, scale: Vec2, rotation: f32, color: Color) {
        self.set_texture(sub.texture().cloned());

        self.push_matrix(Mat3x2::transform(pos, origin, scale, rotation));
        self.quad_textured_colored(*sub.draw_coords(), *sub.tex_coords(), [color; 4]);
        self.pop_matrix();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::batch::Batch;
    use crate::coords::{Rect, Vec2};
    use crate::paint::{Color, ColorMode, FillWeights};
    use crate::resource::{Subtexture, Texture};

    #[test]
    fn tex_places_quad_and_sets_texture() {
        let tex = Texture::new(32, 32);
        let sub = Subtexture::new(Some(tex.clone()), Rect::new(0.0, 0.0, 16.0, 8.0));
        let mut b = Batch::new();
        b.tex(&sub, Vec2::new(10.0, 20.0), Color::WHITE);

        let v = b.vertices();
        assert_eq!(v.len(), 4);
        assert_eq!(v[0].position(), Vec2::new(10.0, 20.0));
        assert_eq!(v[2].position(), Vec2::new(26.0, 28.0));
        assert_eq!(v[2].tex, [0.5, 0.25]);
        assert!(v.iter().all(|v| v.weights() == FillWeights::MULT));

        assert!(Arc::ptr_eq(b.texture(), &tex));
        let batch = b.batches().next().unwrap();
        assert!(Arc::ptr_eq(&batch.texture, &tex));
        // The sprite transform does not leak.
        assert!(b.matrix().is_identity());
    }

    #[test]
    fn wash_mode_encodes_wash_weights() {
        let sub = Subtexture::full(Texture::new(8, 8));
        let mut b = Batch::new();
        b.push_color_mode(ColorMode::Wash);
        b.tex(&sub, Vec2::zero(), Color::RED);
        b.pop_color_mode();

        for v in b.vertices() {
            assert_eq!((v.mult, v.wash, v.fill), (0, 255, 0));
            assert_eq!(v.color(), Color::RED);
        }
    }

    #[test]
    fn missing_texture_uses_white() {
        let sub = Subtexture::new(None, Rect::new(0.0, 0.0, 4.0, 4.0));
        let mut b = Batch::new();
        b.set_texture(Some(Texture::new(2, 2)));
        b.tex(&sub, Vec2::zero(), Color::WHITE);
        assert!(b.texture().is_white());
    }

    #[test]
    fn tex_ex_rotates_around_origin() {
        let sub = Subtexture::full(Texture::new(10, 10));
        let mut b = Batch::new();
        b.tex_ex(&sub, Vec2::new(100.0, 100.0), Vec2::new(5.0, 5.0), Vec2::new(2.0, 2.0), std::f32::consts::PI, Color::WHITE);

        // Top-left corner: (-5, -5) * 2 rotated by PI = (10, 10), then moved.
        let p = b.vertices()[0].position();
        assert!((p - Vec2::new(110.0, 110.0)).length() < 1e-3, "{p:?}");
    }
}
