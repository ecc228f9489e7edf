use crate::app::camera::Camera;
use crate::app::geometry::Vec2;
use crate::app::palette::{rgb, rgba, Rgba};
use crate::app::world::TileWorld;

use super::raster::FrameBuffer;

pub const MINIMAP_WIDTH: i32 = 96;
pub const MINIMAP_HEIGHT: i32 = 64;
const MARGIN: i32 = 6;

const FRAME_COLOR: Rgba = rgba(154, 195, 255, 140);
const SOLID: Rgba = rgba(27, 36, 51, 235);
const OPEN: Rgba = rgba(13, 20, 39, 215);
const WATER: Rgba = rgba(30, 80, 130, 235);
const OBJECT: Rgba = rgb(110, 231, 255);
const NPC: Rgba = rgb(185, 200, 216);
const PLAYER: Rgba = rgb(255, 210, 122);
const VIEW: Rgba = rgba(255, 255, 255, 170);

/// Top-left corner of the inset on a frame of the given width.
pub fn minimap_origin(frame_width: u32) -> (i32, i32) {
    (frame_width as i32 - MINIMAP_WIDTH - MARGIN, MARGIN)
}

/// Rebuilt from live state every frame.
pub(crate) fn draw_minimap(
    frame: &mut FrameBuffer,
    world: &TileWorld,
    camera: &Camera,
    player: Vec2,
) {
    let (ox, oy) = minimap_origin(frame.width());
    let world_px = world.pixel_size();
    if world_px.x <= 0.0 || world_px.y <= 0.0 {
        return;
    }
    let sx = MINIMAP_WIDTH as f32 / world_px.x;
    let sy = MINIMAP_HEIGHT as f32 / world_px.y;
    let to_map = |point: Vec2| -> (i32, i32) {
        (
            ox + (point.x * sx).floor() as i32,
            oy + (point.y * sy).floor() as i32,
        )
    };

    for my in 0..MINIMAP_HEIGHT {
        let tile_y = ((my as f32 + 0.5) / MINIMAP_HEIGHT as f32 * world.height() as f32) as i32;
        for mx in 0..MINIMAP_WIDTH {
            let tile_x = ((mx as f32 + 0.5) / MINIMAP_WIDTH as f32 * world.width() as f32) as i32;
            let color = if world.is_water_tile(tile_x, tile_y) {
                WATER
            } else if world.is_solid_tile(tile_x, tile_y) {
                SOLID
            } else {
                OPEN
            };
            frame.blend(ox + mx, oy + my, color);
        }
    }

    for npc in world.npc_spawns() {
        let (x, y) = to_map(TileWorld::tile_center(npc.tile_x, npc.tile_y));
        frame.fill_rect(x, y, 1, 1, NPC);
    }
    for object in world.objects() {
        let (x, y) = to_map(TileWorld::tile_center(object.tile_x, object.tile_y));
        frame.fill_rect(x - 1, y - 1, 2, 2, OBJECT);
    }

    let (vx0, vy0) = to_map(camera.position);
    let (vx1, vy1) = to_map(camera.position + camera.viewport_size());
    frame.stroke_rect(vx0, vy0, (vx1 - vx0).max(2), (vy1 - vy0).max(2), VIEW);

    let (px, py) = to_map(player);
    frame.fill_rect(px - 1, py - 1, 3, 3, PLAYER);

    frame.stroke_rect(ox - 1, oy - 1, MINIMAP_WIDTH + 2, MINIMAP_HEIGHT + 2, FRAME_COLOR);
}
