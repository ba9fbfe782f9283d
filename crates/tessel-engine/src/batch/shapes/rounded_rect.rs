use std::f32::consts::{FRAC_PI_2, PI};

use crate::batch::Batch;
use crate::coords::{Corner, Corners, Rect, Vec2};
use crate::paint::Color;

use super::arc_points;

/// Corners with radii clamped so opposite arcs never overlap.
fn clamp_corners(rect: Rect, corners: Corners) -> [Corner; 4] {
    let max_r = rect.width().min(rect.height()) * 0.5;
    corners.to_array().map(|c| Corner::new(c.radius.clamp(0.0, max_r.max(0.0)), c.steps))
}

/// Clockwise perimeter starting at the top-left corner's arc.
///
/// Sharp corners contribute one point, rounded corners `steps + 1`. With
/// `inset > 0`, the path is shrunk by `inset` while keeping the same point
/// count, so an outer and an inner perimeter pair up point for point.
fn perimeter(rect: Rect, corners: &[Corner; 4], inset: f32, out: &mut Vec<Vec2>) {
    let r = rect.inset(inset);
    let (x0, y0, x1, y1) = (r.origin.x, r.origin.y, r.origin.x + r.size.x, r.origin.y + r.size.y);

    // (corner point, inward direction to the arc center, start angle)
    let layout = [
        (Vec2::new(x0, y0), Vec2::new(1.0, 1.0), PI),
        (Vec2::new(x1, y0), Vec2::new(-1.0, 1.0), PI + FRAC_PI_2),
        (Vec2::new(x1, y1), Vec2::new(-1.0, -1.0), 0.0),
        (Vec2::new(x0, y1), Vec2::new(1.0, -1.0), FRAC_PI_2),
    ];

    for (corner, (point, towards, start)) in corners.iter().zip(layout) {
        if corner.radius <= 0.0 {
            out.push(point);
            continue;
        }
        let radius = (corner.radius - inset).max(0.0);
        let center = point + towards * radius;
        arc_points(center, radius, start, start + FRAC_PI_2, corner.steps, out);
    }
}

impl Batch {
    /// Rectangle with every corner rounded by `radius` in `steps` segments.
    #[inline]
    pub fn rect_rounded(&mut self, rect: Rect, radius: f32, steps: i32, color: Color) {
        self.rect_rounded_corners(rect, Corners::all(radius, steps), color);
    }

    /// Rectangle with per-corner radius and step count. A corner with zero
    /// radius stays sharp; radii larger than half the short side are clamped.
    pub fn rect_rounded_corners(&mut self, rect: Rect, corners: Corners, color: Color) {
        let rect = rect.normalized();
        if corners.is_sharp() {
            self.rect(rect, color);
            return;
        }
        let corners = clamp_corners(rect, corners);
        let mut path = Vec::new();
        perimeter(rect, &corners, 0.0, &mut path);
        self.emit_fan(rect.center(), color, &path, color, true);
    }

    /// Rounded outline `t` pixels thick, drawn inside `rect`.
    #[inline]
    pub fn rect_rounded_line(&mut self, rect: Rect, radius: f32, steps: i32, t: f32, color: Color) {
        self.rect_rounded_line_corners(rect, Corners::all(radius, steps), t, color);
    }

    pub fn rect_rounded_line_corners(&mut self, rect: Rect, corners: Corners, t: f32, color: Color) {
        let rect = rect.normalized();
        if corners.is_sharp() {
            self.rect_line(rect, t, color);
            return;
        }
        if t * 2.0 >= rect.width().min(rect.height()) {
            self.rect_rounded_corners(rect, corners, color);
            return;
        }
        let corners = clamp_corners(rect, corners);
        let mut outer = Vec::new();
        let mut inner = Vec::new();
        perimeter(rect, &corners, 0.0, &mut outer);
        perimeter(rect, &corners, t, &mut inner);
        self.emit_band(&outer, &inner, color, true);
    }
}
