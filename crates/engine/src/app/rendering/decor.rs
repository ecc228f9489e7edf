//! Props and points of interest. Emissive pieces also feed the glow buffer.

use crate::app::palette::{rgb, rgba, Rgba};
use crate::app::world::{ObjectKind, PointOfInterest, Prop, PropKind, TileWorld};

use super::glow::GlowBuffer;
use super::painter::Painter;
use super::raster::FrameBuffer;
use super::terrain::tile_hash;
use super::transform::ScreenProjection;

const POI_HALO: Rgba = rgba(110, 231, 255, 31);
const POI_GLOW: Rgba = rgb(110, 231, 255);
const CYAN: Rgba = rgb(110, 231, 255);
const MAGENTA: Rgba = rgb(255, 122, 230);
const INK: Rgba = rgb(11, 18, 32);
const PAPER: Rgba = rgb(207, 230, 245);
const STONE: Rgba = rgb(185, 200, 216);

const LANTERN_LIGHT: Rgba = rgb(255, 210, 122);
const TREE_LEAVES: Rgba = rgb(31, 90, 70);
const FLOWER_PETALS: Rgba = rgb(255, 122, 230);

/// Off-screen margin in world pixels before a piece is skipped.
const CULL_MARGIN: f32 = 24.0;

fn on_screen(frame: &FrameBuffer, x: f32, y: f32, zoom: f32) -> bool {
    let margin = CULL_MARGIN * zoom;
    x > -margin
        && y > -margin
        && x < frame.width() as f32 + margin
        && y < frame.height() as f32 + margin
}

/// 0.75..=1.0 breathing, desynchronised per tile.
fn pulse(time_s: f32, tile_x: u32, tile_y: u32, rate: f32) -> f32 {
    let phase = (tile_hash(tile_x as i32, tile_y as i32) % 628) as f32 / 100.0;
    0.875 + 0.125 * (time_s * rate + phase).sin()
}

pub(crate) fn draw_props(
    frame: &mut FrameBuffer,
    glow: &mut GlowBuffer,
    projection: &ScreenProjection,
    world: &TileWorld,
    time_s: f32,
) {
    for prop in world.props() {
        let center = projection.world_to_screen(TileWorld::tile_center(prop.tile_x, prop.tile_y));
        if !on_screen(frame, center.x, center.y, projection.zoom) {
            continue;
        }
        let mut painter = Painter::new(frame, center, projection.zoom);
        let light = draw_prop(&mut painter, prop);
        if prop.emissive {
            let strength = pulse(time_s, prop.tile_x, prop.tile_y, 2.4);
            let (lx, ly) = painter.point(light.0, light.1);
            glow.add_disc(lx, ly, 11.0 * projection.zoom * strength, light.2, 0.6 * strength);
        }
    }
}

/// Draws one prop and returns where its light sits (local x, local y, colour).
fn draw_prop(painter: &mut Painter<'_>, prop: &Prop) -> (f32, f32, Rgba) {
    match prop.kind {
        PropKind::Tree => {
            let leaves = prop.color.unwrap_or(TREE_LEAVES);
            painter.ellipse(0.0, 7.0, 6.0, 2.5, rgba(0, 0, 0, 80));
            painter.rect(-1.5, 1.0, 3.0, 7.0, rgb(59, 42, 31));
            painter.circle(0.0, -3.0, 6.5, leaves);
            painter.circle(-2.0, -5.0, 2.5, lighten(leaves, 28));
            (0.0, -3.0, leaves)
        }
        PropKind::Lantern => {
            let light = prop.color.unwrap_or(LANTERN_LIGHT);
            painter.rect(-0.5, -3.0, 1.0, 10.0, rgb(42, 51, 68));
            painter.rect(-2.5, -7.0, 5.0, 5.0, rgb(42, 51, 68));
            painter.rect(-1.5, -6.0, 3.0, 3.0, light);
            (0.0, -4.5, light)
        }
        PropKind::Bench => {
            let wood = prop.color.unwrap_or(rgb(107, 74, 50));
            painter.rect(-6.0, -2.0, 12.0, 1.5, wood);
            painter.rect(-6.0, 1.0, 12.0, 2.0, wood);
            painter.rect(-5.0, 3.0, 1.0, 3.0, rgb(42, 51, 68));
            painter.rect(4.0, 3.0, 1.0, 3.0, rgb(42, 51, 68));
            (0.0, 0.0, wood)
        }
        PropKind::Rock => {
            let stone = prop.color.unwrap_or(rgb(74, 85, 104));
            painter.ellipse(0.0, 2.0, 5.0, 3.5, stone);
            painter.ellipse(-1.5, 1.0, 2.0, 1.2, lighten(stone, 30));
            (0.0, 1.0, stone)
        }
        PropKind::Flower => {
            let petals = prop.color.unwrap_or(FLOWER_PETALS);
            painter.rect(-0.5, 0.0, 1.0, 5.0, rgb(44, 110, 73));
            for (dx, dy) in [(-1.5, -1.0), (1.5, -1.0), (0.0, -2.5), (0.0, 0.5)] {
                painter.circle(dx, dy, 1.3, petals);
            }
            painter.circle(0.0, -1.0, 0.8, rgb(255, 236, 160));
            (0.0, -1.0, petals)
        }
        PropKind::Sign => {
            let board = prop.color.unwrap_or(rgb(138, 106, 74));
            painter.rect(-0.5, 0.0, 1.0, 7.0, rgb(91, 70, 54));
            painter.rect(-5.0, -5.0, 10.0, 6.0, board);
            painter.stroke_rect(-5.0, -5.0, 10.0, 6.0, rgb(59, 42, 31));
            painter.rect(-3.0, -3.0, 6.0, 1.0, rgb(59, 42, 31));
            (0.0, -2.0, board)
        }
    }
}

pub(crate) fn draw_points_of_interest(
    frame: &mut FrameBuffer,
    glow: &mut GlowBuffer,
    projection: &ScreenProjection,
    world: &TileWorld,
    time_s: f32,
) {
    for object in world.objects() {
        let center = projection.world_to_screen(TileWorld::tile_center(object.tile_x, object.tile_y));
        if !on_screen(frame, center.x, center.y, projection.zoom) {
            continue;
        }
        let mut painter = Painter::new(frame, center, projection.zoom);
        painter.circle(0.0, 0.0, 10.0, POI_HALO);
        draw_icon(&mut painter, object);
        let strength = pulse(time_s, object.tile_x, object.tile_y, 3.0);
        glow.add_disc(center.x, center.y, 14.0 * projection.zoom, POI_GLOW, 0.35 * strength);
    }
}

fn draw_icon(painter: &mut Painter<'_>, object: &PointOfInterest) {
    match &object.kind {
        ObjectKind::Gallery(_) => {
            painter.rect(-6.0, -4.0, 12.0, 8.0, CYAN);
            painter.rect(-3.0, -1.0, 6.0, 3.0, MAGENTA);
        }
        ObjectKind::Projects(_) => {
            painter.triangle((-6.0, -5.0), (6.0, 0.0), (-6.0, 5.0), MAGENTA);
        }
        ObjectKind::Skills(_) => {
            painter.circle(0.0, 0.0, 6.0, CYAN);
            painter.rect(-1.0, -3.0, 2.0, 6.0, INK);
        }
        ObjectKind::Contact(_) => {
            painter.rect(-6.0, -4.0, 12.0, 8.0, PAPER);
            painter.stroke_rect(-6.0, -4.0, 12.0, 8.0, INK);
        }
        ObjectKind::About(_) => {
            painter.circle(0.0, -2.0, 4.0, STONE);
            painter.rect(-3.0, 2.0, 6.0, 4.0, STONE);
        }
    }
}

fn lighten(color: Rgba, amount: u8) -> Rgba {
    [
        color[0].saturating_add(amount),
        color[1].saturating_add(amount),
        color[2].saturating_add(amount),
        color[3],
    ]
}
