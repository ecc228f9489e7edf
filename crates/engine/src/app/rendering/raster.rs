//! Software rasterisation onto an RGBA8 frame.
//!
//! Every primitive clips against the frame bounds; out-of-range coordinates are
//! silently dropped. Colours with alpha below 255 are composited source-over.

use crate::app::palette::Rgba;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn clear(&mut self, color: Rgba) {
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color);
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        let offset = self.offset(x, y)?;
        let mut out = [0; 4];
        out.copy_from_slice(&self.pixels[offset..offset + 4]);
        Some(out)
    }

    pub fn put(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(offset) = self.offset(x, y) {
            self.pixels[offset..offset + 4].copy_from_slice(&color);
        }
    }

    /// Source-over composite of one pixel.
    pub fn blend(&mut self, x: i32, y: i32, color: Rgba) {
        match color[3] {
            0 => {}
            255 => self.put(x, y, color),
            alpha => {
                let Some(offset) = self.offset(x, y) else {
                    return;
                };
                let a = u32::from(alpha);
                let inv = 255 - a;
                for channel in 0..3 {
                    let dst = u32::from(self.pixels[offset + channel]);
                    let src = u32::from(color[channel]);
                    self.pixels[offset + channel] = ((src * a + dst * inv + 127) / 255) as u8;
                }
                self.pixels[offset + 3] = 255;
            }
        }
    }

    /// Additive ("lighter") composite, saturating per channel.
    pub fn add(&mut self, x: i32, y: i32, rgb: [u8; 3]) {
        let Some(offset) = self.offset(x, y) else {
            return;
        };
        for channel in 0..3 {
            self.pixels[offset + channel] = self.pixels[offset + channel].saturating_add(rgb[channel]);
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Rgba) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, width, height) else {
            return;
        };
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend(px, py, color);
            }
        }
    }

    pub fn stroke_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Rgba) {
        if width <= 0 || height <= 0 {
            return;
        }
        self.fill_rect(x, y, width, 1, color);
        if height > 1 {
            self.fill_rect(x, y + height - 1, width, 1, color);
        }
        if height > 2 {
            self.fill_rect(x, y + 1, 1, height - 2, color);
            if width > 1 {
                self.fill_rect(x + width - 1, y + 1, 1, height - 2, color);
            }
        }
    }

    /// Rectangle with its four corner pixels knocked out.
    pub fn fill_rounded_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Rgba) {
        if width < 3 || height < 3 {
            self.fill_rect(x, y, width, height, color);
            return;
        }
        self.fill_rect(x + 1, y, width - 2, 1, color);
        self.fill_rect(x, y + 1, width, height - 2, color);
        self.fill_rect(x + 1, y + height - 1, width - 2, 1, color);
    }

    pub fn hline(&mut self, x0: i32, x1: i32, y: i32, color: Rgba) {
        let (start, end) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        self.fill_rect(start, y, end - start + 1, 1, color);
    }

    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
        let (mut x, mut y) = (x0, y0);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.blend(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let doubled = 2 * err;
            if doubled >= dy {
                err += dy;
                x += sx;
            }
            if doubled <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        self.fill_ellipse(cx, cy, radius, radius, color);
    }

    /// Pixels whose centres fall inside the ellipse.
    pub fn fill_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, color: Rgba) {
        if !(rx > 0.0 && ry > 0.0) || !cx.is_finite() || !cy.is_finite() {
            return;
        }
        let y_start = (cy - ry).floor() as i32;
        let y_end = (cy + ry).ceil() as i32;
        for py in y_start.max(0)..y_end.min(self.height as i32) {
            let dy = (py as f32 + 0.5 - cy) / ry;
            let span = 1.0 - dy * dy;
            if span <= 0.0 {
                continue;
            }
            let half = rx * span.sqrt();
            let x0 = (cx - half - 0.5).ceil() as i32;
            let x1 = (cx + half - 0.5).floor() as i32;
            if x1 >= x0 {
                self.hline(x0, x1, py, color);
            }
        }
    }

    pub fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        if !(radius > 0.0) || !cx.is_finite() || !cy.is_finite() {
            return;
        }
        let steps = ((radius * 8.0).ceil() as i32).clamp(8, 256);
        let mut last: Option<(i32, i32)> = None;
        for step in 0..steps {
            let angle = step as f32 / steps as f32 * std::f32::consts::TAU;
            let point = (
                (cx + radius * angle.cos()).round() as i32,
                (cy + radius * angle.sin()).round() as i32,
            );
            if last != Some(point) {
                self.blend(point.0, point.1, color);
            }
            last = Some(point);
        }
    }

    /// Scanline fill of a triangle given in pixel coordinates.
    pub fn fill_triangle(&mut self, a: (f32, f32), b: (f32, f32), c: (f32, f32), color: Rgba) {
        let min_y = a.1.min(b.1).min(c.1).floor().max(0.0) as i32;
        let max_y = a.1.max(b.1).max(c.1).ceil().min(self.height as f32) as i32;
        let edges = [(a, b), (b, c), (c, a)];
        for py in min_y..max_y {
            let sample_y = py as f32 + 0.5;
            let mut span: Option<(f32, f32)> = None;
            for (p, q) in edges {
                if (p.1 <= sample_y) == (q.1 <= sample_y) {
                    continue;
                }
                let t = (sample_y - p.1) / (q.1 - p.1);
                let x = p.0 + (q.0 - p.0) * t;
                span = Some(match span {
                    Some((lo, hi)) => (lo.min(x), hi.max(x)),
                    None => (x, x),
                });
            }
            if let Some((lo, hi)) = span {
                let x0 = (lo - 0.5).ceil() as i32;
                let x1 = (hi - 0.5).floor() as i32;
                if x1 >= x0 {
                    self.hline(x0, x1, py, color);
                }
            }
        }
    }

    /// Full-width vertical gradient between rows `y0` (inclusive) and `y1` (exclusive).
    pub fn vertical_gradient(&mut self, y0: i32, y1: i32, top: Rgba, bottom: Rgba) {
        let span = (y1 - y0).max(1) as f32;
        for py in y0.max(0)..y1.min(self.height as i32) {
            let t = (py - y0) as f32 / span;
            let color = lerp_rgba(top, bottom, t);
            self.fill_rect(0, py, self.width as i32, 1, color);
        }
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }

    fn clip(&self, x: i32, y: i32, width: i32, height: i32) -> Option<(i32, i32, i32, i32)> {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(width).min(self.width as i32);
        let y1 = y.saturating_add(height).min(self.height as i32);
        (x1 > x0 && y1 > y0).then_some((x0, y0, x1, y1))
    }
}

/// Interpolates all four channels, alpha included.
pub fn lerp_rgba(a: Rgba, b: Rgba, t: f32) -> Rgba {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let mut out = [0; 4];
    for channel in 0..4 {
        let from = f32::from(a[channel]);
        let to = f32::from(b[channel]);
        out[channel] = (from + (to - from) * t).round() as u8;
    }
    out
}
