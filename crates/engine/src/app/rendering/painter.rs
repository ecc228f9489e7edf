use crate::app::geometry::Vec2;
use crate::app::palette::Rgba;

use super::raster::FrameBuffer;

/// Draws shapes given in world-pixel offsets around an anchor, scaled by the zoom.
///
/// Rect edges are rounded independently so adjacent shapes never leave gaps.
pub(crate) struct Painter<'a> {
    frame: &'a mut FrameBuffer,
    anchor: Vec2,
    scale: f32,
}

impl<'a> Painter<'a> {
    pub(crate) fn new(frame: &'a mut FrameBuffer, anchor: Vec2, scale: f32) -> Self {
        Self {
            frame,
            anchor,
            scale,
        }
    }

    pub(crate) fn point(&self, x: f32, y: f32) -> (f32, f32) {
        (self.anchor.x + x * self.scale, self.anchor.y + y * self.scale)
    }

    pub(crate) fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba) {
        let (x0, y0) = self.point(x, y);
        let (x1, y1) = self.point(x + width, y + height);
        let (x0, y0) = (x0.round() as i32, y0.round() as i32);
        let (x1, y1) = (x1.round() as i32, y1.round() as i32);
        self.frame.fill_rect(x0, y0, x1 - x0, y1 - y0, color);
    }

    pub(crate) fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba) {
        let (x0, y0) = self.point(x, y);
        let (x1, y1) = self.point(x + width, y + height);
        let (x0, y0) = (x0.round() as i32, y0.round() as i32);
        let (x1, y1) = (x1.round() as i32, y1.round() as i32);
        self.frame.stroke_rect(x0, y0, x1 - x0, y1 - y0, color);
    }

    /// Opaque colours only: the corner discs overlap the body.
    pub(crate) fn round_rect(&mut self, x: f32, y: f32, width: f32, height: f32, radius: f32, color: Rgba) {
        let r = radius.min(width * 0.5).min(height * 0.5).max(0.0);
        if r <= 0.0 {
            self.rect(x, y, width, height, color);
            return;
        }
        self.rect(x + r, y, width - 2.0 * r, height, color);
        self.rect(x, y + r, width, height - 2.0 * r, color);
        for (cx, cy) in [
            (x + r, y + r),
            (x + width - r, y + r),
            (x + r, y + height - r),
            (x + width - r, y + height - r),
        ] {
            self.circle(cx, cy, r, color);
        }
    }

    pub(crate) fn circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
        let (cx, cy) = self.point(x, y);
        self.frame.fill_circle(cx, cy, radius * self.scale, color);
    }

    pub(crate) fn ellipse(&mut self, x: f32, y: f32, rx: f32, ry: f32, color: Rgba) {
        let (cx, cy) = self.point(x, y);
        self.frame
            .fill_ellipse(cx, cy, rx * self.scale, ry * self.scale, color);
    }

    pub(crate) fn triangle(&mut self, a: (f32, f32), b: (f32, f32), c: (f32, f32), color: Rgba) {
        let a = self.point(a.0, a.1);
        let b = self.point(b.0, b.1);
        let c = self.point(c.0, c.1);
        self.frame.fill_triangle(a, b, c, color);
    }
}
