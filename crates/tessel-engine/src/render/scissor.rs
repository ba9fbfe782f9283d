use crate::coords::Rect;

use super::ScissorRect;

/// Converts a batch clip rectangle to a scissor rect clamped to a
/// `width`×`height` target.
///
/// `None` clips to the whole target. Returns `None` when nothing remains
/// visible; the draw call is then skipped. With `flip`, rows count from the
/// bottom of the target.
pub(crate) fn clip_to_scissor(clip: Option<Rect>, width: u32, height: u32, flip: bool) -> Option<ScissorRect> {
    let (x, y, w, h) = match clip {
        None => (0, 0, width, height),
        Some(r) => {
            let r = r.normalized();
            let x = (r.origin.x.max(0.0) as u32).min(width);
            let y = (r.origin.y.max(0.0) as u32).min(height);
            let x2 = ((r.origin.x + r.size.x).max(0.0).ceil() as u32).min(width);
            let y2 = ((r.origin.y + r.size.y).max(0.0).ceil() as u32).min(height);
            (x, y, x2.saturating_sub(x), y2.saturating_sub(y))
        }
    };

    if w == 0 || h == 0 {
        return None;
    }
    let y = if flip { height - (y + h) } else { y };
    Some(ScissorRect::new(x, y, w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_clip_covers_target() {
        assert_eq!(clip_to_scissor(None, 800, 600, false), Some(ScissorRect::new(0, 0, 800, 600)));
    }

    #[test]
    fn clip_is_clamped_to_target() {
        let s = clip_to_scissor(Some(Rect::new(-10.0, 500.0, 100.0, 200.0)), 800, 600, false);
        assert_eq!(s, Some(ScissorRect::new(0, 500, 90, 100)));
    }

    #[test]
    fn fractional_edges_round_outwards() {
        let s = clip_to_scissor(Some(Rect::new(1.5, 2.5, 3.0, 3.0)), 100, 100, false);
        assert_eq!(s, Some(ScissorRect::new(1, 2, 4, 4)));
    }

    #[test]
    fn empty_or_offscreen_clip_is_none() {
        assert_eq!(clip_to_scissor(Some(Rect::zero()), 800, 600, false), None);
        assert_eq!(clip_to_scissor(Some(Rect::new(900.0, 0.0, 50.0, 50.0)), 800, 600, false), None);
    }

    #[test]
    fn flipped_targets_count_rows_from_bottom() {
        let s = clip_to_scissor(Some(Rect::new(0.0, 0.0, 10.0, 20.0)), 100, 100, true);
        assert_eq!(s, Some(ScissorRect::new(0, 80, 10, 20)));
    }
}
