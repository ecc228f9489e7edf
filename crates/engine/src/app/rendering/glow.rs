//! Additive light buffer.
//!
//! Emissive draws accumulate here instead of on the frame. [`GlowBuffer::resolve_into`]
//! blurs the light by a half-resolution round trip, adds it onto the frame and then
//! empties the buffer, so light never survives into the next frame.

use crate::app::palette::Rgba;

use super::raster::FrameBuffer;

#[derive(Debug, Clone)]
pub struct GlowBuffer {
    width: u32,
    height: u32,
    light: Vec<[f32; 3]>,
    half_width: u32,
    half_height: u32,
    half: Vec<[f32; 3]>,
    lit: bool,
}

impl GlowBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let half_width = width.div_ceil(2).max(1);
        let half_height = height.div_ceil(2).max(1);
        Self {
            width,
            height,
            light: vec![[0.0; 3]; width as usize * height as usize],
            half_width,
            half_height,
            half: vec![[0.0; 3]; half_width as usize * half_height as usize],
            lit: false,
        }
    }

    pub fn clear(&mut self) {
        if !self.lit {
            return;
        }
        self.light.fill([0.0; 3]);
        self.half.fill([0.0; 3]);
        self.lit = false;
    }

    pub fn is_clear(&self) -> bool {
        !self.lit
            && self
                .light
                .iter()
                .chain(self.half.iter())
                .all(|texel| *texel == [0.0; 3])
    }

    /// Soft disc: full `intensity` at the centre falling to zero at `radius`.
    pub fn add_disc(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba, intensity: f32) {
        if !(radius > 0.0) || !(intensity > 0.0) || !cx.is_finite() || !cy.is_finite() {
            return;
        }
        let strength = intensity * f32::from(color[3]) / 255.0;
        let tint = [
            f32::from(color[0]) * strength,
            f32::from(color[1]) * strength,
            f32::from(color[2]) * strength,
        ];
        let x0 = ((cx - radius).floor() as i32).max(0);
        let x1 = ((cx + radius).ceil() as i32).min(self.width as i32);
        let y0 = ((cy - radius).floor() as i32).max(0);
        let y1 = ((cy + radius).ceil() as i32).min(self.height as i32);
        for py in y0..y1 {
            for px in x0..x1 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                let falloff = 1.0 - (dx * dx + dy * dy).sqrt() / radius;
                if falloff <= 0.0 {
                    continue;
                }
                let weight = falloff * falloff;
                let texel = &mut self.light[py as usize * self.width as usize + px as usize];
                for channel in 0..3 {
                    texel[channel] += tint[channel] * weight;
                }
                self.lit = true;
            }
        }
    }

    /// Downsample, upsample, add onto `frame`, then clear.
    pub fn resolve_into(&mut self, frame: &mut FrameBuffer) {
        if self.lit {
            self.downsample();
            self.upsample_additive(frame);
        }
        self.clear();
    }

    fn downsample(&mut self) {
        let (width, height) = (self.width as usize, self.height as usize);
        for hy in 0..self.half_height as usize {
            for hx in 0..self.half_width as usize {
                let mut sum = [0.0_f32; 3];
                let mut count = 0.0_f32;
                for y in (hy * 2)..(hy * 2 + 2).min(height) {
                    for x in (hx * 2)..(hx * 2 + 2).min(width) {
                        let texel = self.light[y * width + x];
                        for channel in 0..3 {
                            sum[channel] += texel[channel];
                        }
                        count += 1.0;
                    }
                }
                let out = &mut self.half[hy * self.half_width as usize + hx];
                if count > 0.0 {
                    *out = [sum[0] / count, sum[1] / count, sum[2] / count];
                }
            }
        }
    }

    fn upsample_additive(&self, frame: &mut FrameBuffer) {
        let max_x = self.half_width as f32 - 1.0;
        let max_y = self.half_height as f32 - 1.0;
        let rows = self.height.min(frame.height());
        let cols = self.width.min(frame.width());
        for y in 0..rows {
            let sy = ((y as f32 + 0.5) * 0.5 - 0.5).clamp(0.0, max_y);
            for x in 0..cols {
                let sx = ((x as f32 + 0.5) * 0.5 - 0.5).clamp(0.0, max_x);
                let sample = self.sample_half(sx, sy);
                if sample.iter().all(|value| *value < 0.5) {
                    continue;
                }
                frame.add(
                    x as i32,
                    y as i32,
                    [
                        sample[0].round().min(255.0) as u8,
                        sample[1].round().min(255.0) as u8,
                        sample[2].round().min(255.0) as u8,
                    ],
                );
            }
        }
    }

    fn sample_half(&self, sx: f32, sy: f32) -> [f32; 3] {
        let stride = self.half_width as usize;
        let x0 = sx.floor() as usize;
        let y0 = sy.floor() as usize;
        let x1 = (x0 + 1).min(self.half_width as usize - 1);
        let y1 = (y0 + 1).min(self.half_height as usize - 1);
        let tx = sx - x0 as f32;
        let ty = sy - y0 as f32;
        let at = |x: usize, y: usize| self.half[y * stride + x];
        let (a, b, c, d) = (at(x0, y0), at(x1, y0), at(x0, y1), at(x1, y1));
        let mut out = [0.0; 3];
        for channel in 0..3 {
            let top = a[channel] + (b[channel] - a[channel]) * tx;
            let bottom = c[channel] + (d[channel] - c[channel]) * tx;
            out[channel] = top + (bottom - top) * ty;
        }
        out
    }
}
