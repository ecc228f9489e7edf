//! Sky, parallax hills and fog.

use crate::app::palette::{rgb, rgba, Rgba};

use super::raster::{lerp_rgba, FrameBuffer};
use super::transform::ScreenProjection;

const SKY_TOP: Rgba = rgb(10, 16, 38);
const SKY_BOTTOM: Rgba = rgb(10, 13, 24);
const FOG_TOP: Rgba = rgba(173, 216, 230, 8);
const FOG_BOTTOM: Rgba = rgba(173, 216, 230, 31);

struct HillLayer {
    top: Rgba,
    bottom: Rgba,
    /// Crest height above the bottom edge of the view, in world pixels.
    lift: f32,
    amplitude: f32,
    /// Horizontal drift in world pixels per second.
    drift: f32,
    /// Fraction of camera motion the layer follows.
    parallax: f32,
}

/// Back to front. Further layers sit higher, drift slower and swell less.
const HILLS: [HillLayer; 3] = [
    HillLayer {
        top: rgb(9, 16, 36),
        bottom: rgb(12, 21, 48),
        lift: 110.0,
        amplitude: 1.2 * 12.0,
        drift: 1.0,
        parallax: 0.1,
    },
    HillLayer {
        top: rgb(12, 21, 48),
        bottom: rgb(17, 28, 61),
        lift: 80.0,
        amplitude: 1.6 * 12.0,
        drift: 1.4,
        parallax: 0.2,
    },
    HillLayer {
        top: rgb(19, 34, 79),
        bottom: rgb(26, 44, 98),
        lift: 50.0,
        amplitude: 2.0 * 12.0,
        drift: 1.8,
        parallax: 0.35,
    },
];

const HILL_FREQUENCY: f32 = 0.02;

pub(crate) fn draw_sky(frame: &mut FrameBuffer) {
    let height = frame.height() as i32;
    frame.vertical_gradient(0, height, SKY_TOP, SKY_BOTTOM);
}

pub(crate) fn draw_hills(frame: &mut FrameBuffer, projection: &ScreenProjection, time_s: f32) {
    let zoom = projection.zoom.max(f32::EPSILON);
    let (width, height) = (frame.width() as i32, frame.height() as i32);
    for layer in &HILLS {
        let base = height as f32 - layer.lift * zoom;
        let crest_top = (base - layer.amplitude * zoom).floor() as i32;
        let span = (height - crest_top).max(1) as f32;
        let shift = projection.origin.x * layer.parallax + time_s * layer.drift;
        for column in 0..width {
            let x = column as f32 / zoom + shift;
            let crest = base + (x * HILL_FREQUENCY).sin() * layer.amplitude * zoom;
            let start = crest.round() as i32;
            for row in start.max(0)..height {
                let t = (row - crest_top) as f32 / span;
                frame.put(column, row, lerp_rgba(layer.top, layer.bottom, t));
            }
        }
    }
}

/// World-anchored haze thickening over the lower half of the world.
pub(crate) fn draw_fog(frame: &mut FrameBuffer, projection: &ScreenProjection, world_height: f32) {
    let zoom = projection.zoom.max(f32::EPSILON);
    let half = world_height * 0.5;
    for row in 0..frame.height() as i32 {
        let world_y = projection.origin.y + (row as f32 + 0.5) / zoom;
        let t = if half > 0.0 { (world_y - half) / half } else { 0.0 };
        let color = lerp_rgba(FOG_TOP, FOG_BOTTOM, t);
        frame.fill_rect(0, row, frame.width() as i32, 1, color);
    }
}
