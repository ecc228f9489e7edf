use std::f32::consts::PI;

use crate::app::geometry::Vec2;
use crate::app::palette::{rgb, rgba, Rgba};
use crate::app::world::{TileRect, TileWorld, TILE_SIZE};

use super::raster::{lerp_rgba, FrameBuffer};
use super::transform::ScreenProjection;

const SOLID_FILL: Rgba = rgb(27, 36, 51);
const SOLID_INSET: Rgba = rgb(17, 25, 42);
/// Walkable ground lets a trace of the backdrop through.
const GROUND_BASE: Rgba = rgba(13, 20, 39, 224);
const GROUND_LIP: Rgba = rgba(255, 255, 255, 5);
const WATER_TOP: Rgba = rgb(16, 46, 82);
const WATER_BOTTOM: Rgba = rgb(9, 28, 56);
const RIPPLE_A: Rgba = rgba(150, 210, 255, 70);
const RIPPLE_B: Rgba = rgba(110, 231, 255, 45);
const EDGE_HIGHLIGHT: Rgba = rgba(200, 240, 255, 90);
const EDGE_SHADE: Rgba = rgba(0, 0, 0, 90);
const RIPPLE_SPACING: f32 = 6.0;

/// Inclusive-exclusive tile range covering the screen, clamped to the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TileSpan {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

pub(crate) fn visible_tiles(
    projection: &ScreenProjection,
    frame: &FrameBuffer,
    world: &TileWorld,
) -> TileSpan {
    let top_left = projection.origin;
    let bottom_right = projection.screen_to_world(Vec2::new(
        frame.width() as f32,
        frame.height() as f32,
    ));
    TileSpan {
        x0: ((top_left.x / TILE_SIZE).floor() as i32).max(0),
        y0: ((top_left.y / TILE_SIZE).floor() as i32).max(0),
        x1: ((bottom_right.x / TILE_SIZE).ceil() as i32).min(world.width() as i32),
        y1: ((bottom_right.y / TILE_SIZE).ceil() as i32).min(world.height() as i32),
    }
}

/// Stable per-tile noise; no state is kept between frames.
pub(crate) fn tile_hash(tile_x: i32, tile_y: i32) -> u32 {
    let mut h = (tile_x as u32).wrapping_mul(0x27d4_eb2d) ^ (tile_y as u32).wrapping_mul(0x1656_67b1);
    h ^= h >> 15;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^ (h >> 16)
}

pub(crate) fn ground_color(tile_x: i32, tile_y: i32) -> Rgba {
    let hash = tile_hash(tile_x, tile_y);
    let lift = (hash % 7) as u8;
    let cool = ((hash >> 8) % 4) as u8;
    [
        GROUND_BASE[0].saturating_add(lift),
        GROUND_BASE[1].saturating_add(lift),
        GROUND_BASE[2].saturating_add(lift + cool),
        GROUND_BASE[3],
    ]
}

fn tile_screen_rect(projection: &ScreenProjection, x: f32, y: f32, w: f32, h: f32) -> (i32, i32, i32, i32) {
    let (x0, y0) = projection.world_to_screen_px(Vec2::new(x, y));
    let (x1, y1) = projection.world_to_screen_px(Vec2::new(x + w, y + h));
    (x0, y0, x1 - x0, y1 - y0)
}

pub(crate) fn draw_ground(frame: &mut FrameBuffer, projection: &ScreenProjection, world: &TileWorld) {
    let span = visible_tiles(projection, frame, world);
    for ty in span.y0..span.y1 {
        for tx in span.x0..span.x1 {
            let (x, y) = (tx as f32 * TILE_SIZE, ty as f32 * TILE_SIZE);
            let (sx, sy, sw, sh) = tile_screen_rect(projection, x, y, TILE_SIZE, TILE_SIZE);
            if world.is_solid_tile(tx, ty) {
                frame.fill_rect(sx, sy, sw, sh, SOLID_FILL);
                let (ix, iy, iw, ih) =
                    tile_screen_rect(projection, x + 4.0, y + 4.0, TILE_SIZE - 8.0, TILE_SIZE - 8.0);
                frame.fill_rect(ix, iy, iw, ih, SOLID_INSET);
            } else {
                frame.fill_rect(sx, sy, sw, sh, ground_color(tx, ty));
                let (lx, ly, lw, lh) =
                    tile_screen_rect(projection, x, y + TILE_SIZE - 3.0, TILE_SIZE, 3.0);
                frame.fill_rect(lx, ly, lw, lh, GROUND_LIP);
            }
        }
    }
}

pub(crate) fn draw_water(
    frame: &mut FrameBuffer,
    projection: &ScreenProjection,
    world: &TileWorld,
    time_s: f32,
) {
    for region in world.water_regions() {
        draw_water_region(frame, projection, region, time_s);
    }
}

fn draw_water_region(frame: &mut FrameBuffer, projection: &ScreenProjection, region: &TileRect, time_s: f32) {
    let x = region.x as f32 * TILE_SIZE;
    let y = region.y as f32 * TILE_SIZE;
    let w = region.width as f32 * TILE_SIZE;
    let h = region.height as f32 * TILE_SIZE;
    let (sx, sy, sw, sh) = tile_screen_rect(projection, x, y, w, h);
    if sw <= 0 || sh <= 0 {
        return;
    }
    let x_lo = sx.max(0);
    let x_hi = (sx + sw).min(frame.width() as i32);
    let y_lo = sy.max(0);
    let y_hi = (sy + sh).min(frame.height() as i32);
    if x_lo >= x_hi || y_lo >= y_hi {
        return;
    }

    for row in y_lo..y_hi {
        let t = (row - sy) as f32 / sh.max(1) as f32;
        frame.fill_rect(x_lo, row, x_hi - x_lo, 1, lerp_rgba(WATER_TOP, WATER_BOTTOM, t));
    }

    let zoom = projection.zoom;
    let mut band_y = y + RIPPLE_SPACING * 0.5;
    let mut band = 0usize;
    while band_y < y + h - 1.0 {
        let (color, phase, speed) = if band % 2 == 0 {
            (RIPPLE_A, 0.0, 2.0)
        } else {
            (RIPPLE_B, PI, -1.6)
        };
        for column in x_lo..x_hi {
            let world_x = projection.origin.x + (column as f32 + 0.5) / zoom;
            let offset = (world_x * 0.18 + time_s * speed + phase).sin() * 1.2;
            let world_y = (band_y + offset).clamp(y + 1.0, y + h - 2.0);
            let row = ((world_y - projection.origin.y) * zoom).round() as i32;
            if row >= y_lo && row < y_hi {
                frame.blend(column, row, color);
            }
        }
        band_y += RIPPLE_SPACING;
        band += 1;
    }

    frame.fill_rect(x_lo, sy, x_hi - x_lo, 1, EDGE_HIGHLIGHT);
    frame.fill_rect(x_lo, sy + sh - 1, x_hi - x_lo, 1, EDGE_SHADE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::world::TileWorldLayout;

    fn pond_world() -> TileWorld {
        TileWorld::new(TileWorldLayout {
            width: 8,
            height: 8,
            solids: vec![false; 64],
            water_regions: vec![TileRect {
                x: 2,
                y: 2,
                width: 3,
                height: 2,
            }],
            spawn_point: TileWorld::tile_center(1, 1),
            ..TileWorldLayout::default()
        })
        .expect("world")
    }

    #[test]
    fn ground_colour_is_stable_and_varied() {
        assert_eq!(ground_color(3, 9), ground_color(3, 9));
        let distinct: std::collections::HashSet<Rgba> =
            (0..16).map(|x| ground_color(x, 5)).collect();
        assert!(distinct.len() > 1);
    }

    #[test]
    fn solid_tiles_use_their_own_fill() {
        let world = pond_world();
        let projection = ScreenProjection::new(Vec2::ZERO, 1.0);
        let mut frame = FrameBuffer::new(128, 128);
        frame.clear([0, 0, 0, 255]);
        draw_ground(&mut frame, &projection, &world);
        assert_eq!(frame.pixel(1, 1), Some(SOLID_FILL));
        assert_eq!(frame.pixel(8, 8), Some(SOLID_INSET));
        assert_ne!(frame.pixel(40, 40), Some(SOLID_FILL));
    }

    #[test]
    fn visible_span_is_clamped_to_world() {
        let world = pond_world();
        let projection = ScreenProjection::new(Vec2::new(-20.0, 40.0), 2.0);
        let frame = FrameBuffer::new(640, 360);
        let span = visible_tiles(&projection, &frame, &world);
        assert_eq!(span, TileSpan { x0: 0, y0: 2, x1: 8, y1: 8 });
    }

    #[test]
    fn water_animates_inside_region_only() {
        let world = pond_world();
        let projection = ScreenProjection::new(Vec2::ZERO, 1.0);
        let render = |time_s: f32| {
            let mut frame = FrameBuffer::new(128, 128);
            frame.clear([0, 0, 0, 255]);
            draw_water(&mut frame, &projection, &world, time_s);
            frame
        };
        let a = render(0.0);
        let b = render(1.3);
        assert_ne!(a, b);
        assert_eq!(a.pixel(10, 10), Some([0, 0, 0, 255]));
        assert_eq!(a.pixel(32, 32), Some(EDGE_HIGHLIGHT_ON_TOP));
    }

    // 90/255 of (200,240,255) over WATER_TOP, rounded like FrameBuffer::blend.
    const EDGE_HIGHLIGHT_ON_TOP: Rgba = [
        over(200, WATER_TOP[0]),
        over(240, WATER_TOP[1]),
        over(255, WATER_TOP[2]),
        255,
    ];

    const fn over(src: u8, dst: u8) -> u8 {
        ((src as u32 * 90 + dst as u32 * 165 + 127) / 255) as u8
    }
}
