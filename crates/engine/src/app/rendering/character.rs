//! Chibi renderer for the player and NPCs.
//!
//! A pure function of entity state and wall-clock time: the silhouette follows
//! `facing`, the limbs follow `animation_frame` and the idle bob follows `time_s`.

use crate::app::entity::{Accessory, Entity, Facing};
use crate::app::geometry::Vec2;
use crate::app::palette::{mix, rgb, rgba, Rgba};

use super::painter::Painter;
use super::raster::FrameBuffer;
use super::transform::ScreenProjection;

const NPC_TONE_TARGET: Rgba = rgb(34, 34, 51);
const NPC_TONE_AMOUNT: f32 = 0.15;
const SHADOW: Rgba = rgba(0, 0, 0, 89);
const LEGS: Rgba = rgb(207, 214, 224);
const MOUTH: Rgba = rgb(15, 23, 42);
const PROFILE_MOUTH: Rgba = rgb(100, 116, 139);
const HEAD_Y: f32 = -12.0;
const BODY_Y: f32 = -2.0;
const BOB_AMPLITUDE: f32 = 0.9;
const BOB_RATE: f32 = 8.0;
const SCARF_WAVE_RATE: f32 = 6.0;

/// Arm/leg offset for a walk frame: frames 0 and 2 are the extremes.
pub(crate) fn limb_swing(frame: u8) -> f32 {
    match frame {
        0 => -1.0,
        2 => 1.0,
        _ => 0.0,
    }
}

pub(crate) fn idle_bob(time_s: f32) -> f32 {
    (time_s * BOB_RATE).sin() * BOB_AMPLITUDE
}

pub(crate) fn draw_entity(
    frame: &mut FrameBuffer,
    projection: &ScreenProjection,
    entity: &Entity,
    time_s: f32,
    background: bool,
) {
    let feet = Vec2::new(entity.position.x.floor(), entity.position.y.floor() + idle_bob(time_s));
    let anchor = projection.world_to_screen(feet);
    let margin = 24.0 * projection.zoom;
    if anchor.x < -margin
        || anchor.y < -margin
        || anchor.x > frame.width() as f32 + margin
        || anchor.y > frame.height() as f32 + margin
    {
        return;
    }

    let tone = |color: Rgba| {
        if background {
            mix(color, NPC_TONE_TARGET, NPC_TONE_AMOUNT)
        } else {
            color
        }
    };
    let palette = &entity.palette;
    let swing = limb_swing(entity.animation_frame);
    let mut p = Painter::new(frame, anchor, projection.zoom);

    p.ellipse(0.0, 7.0, 6.0, 3.0, SHADOW);

    // Body, shading band, swinging arms.
    p.round_rect(-5.0, BODY_Y, 10.0, 12.0, 3.0, tone(palette.outfit));
    p.rect(-4.0, BODY_Y + 2.0, 8.0, 2.0, tone(palette.outfit_hi));
    p.rect(-6.0, BODY_Y + 3.0 + swing, 2.0, 6.0, tone(palette.outfit));
    p.rect(4.0, BODY_Y + 3.0 - swing, 2.0, 6.0, tone(palette.outfit));

    p.rect(-4.0, BODY_Y + 10.0, 3.0, 4.0, LEGS);
    p.rect(1.0, BODY_Y + 10.0, 3.0, 4.0, LEGS);
    p.rect(-4.0, BODY_Y + 12.0 + swing, 3.0, 2.0, palette.boot);
    p.rect(1.0, BODY_Y + 12.0 - swing, 3.0, 2.0, palette.boot);

    p.round_rect(-6.0, HEAD_Y, 12.0, 12.0, 5.0, palette.skin);
    p.rect(-4.0, HEAD_Y + 1.0, 3.0, 2.0, rgba(255, 255, 255, 30));

    draw_hair(&mut p, entity.facing, palette.hair, palette.hair_hi);
    draw_face(&mut p, entity.facing, palette.eye);

    if entity.accessory == Some(Accessory::Scarf) {
        let wave = (time_s * SCARF_WAVE_RATE).sin() * 0.5;
        p.rect(-3.0, BODY_Y, 6.0, 2.0, palette.scarf);
        p.rect(2.0, BODY_Y + 1.0, 2.0, 4.0 + wave, palette.scarf);
    }

    let accent = [palette.outline[0], palette.outline[1], palette.outline[2], 56];
    p.stroke_rect(-6.0, HEAD_Y, 12.0, 12.0, accent);
    p.stroke_rect(-5.0, BODY_Y, 10.0, 12.0, accent);
}

fn draw_hair(p: &mut Painter<'_>, facing: Facing, hair: Rgba, highlight: Rgba) {
    match facing {
        Facing::Up => {
            p.ellipse(0.0, HEAD_Y + 3.0, 6.5, 6.5, hair);
            p.rect(-6.0, HEAD_Y + 3.0, 12.0, 5.0, hair);
            p.rect(-2.0, HEAD_Y - 1.0, 4.0, 2.0, highlight);
        }
        Facing::Down => {
            p.ellipse(0.0, HEAD_Y + 0.5, 6.5, 3.5, hair);
            p.rect(-6.0, HEAD_Y + 1.0, 2.0, 7.0, hair);
            p.rect(4.0, HEAD_Y + 1.0, 2.0, 7.0, hair);
            p.rect(-3.0, HEAD_Y + 1.0, 6.0, 2.0, highlight);
        }
        Facing::Left => {
            p.ellipse(0.5, HEAD_Y + 1.0, 6.5, 3.5, hair);
            p.rect(2.0, HEAD_Y + 1.0, 4.0, 8.0, hair);
            p.rect(-4.0, HEAD_Y + 1.0, 4.0, 2.0, highlight);
        }
        Facing::Right => {
            p.ellipse(-0.5, HEAD_Y + 1.0, 6.5, 3.5, hair);
            p.rect(-6.0, HEAD_Y + 1.0, 4.0, 8.0, hair);
            p.rect(0.0, HEAD_Y + 1.0, 4.0, 2.0, highlight);
        }
    }
}

fn draw_face(p: &mut Painter<'_>, facing: Facing, eye: Rgba) {
    match facing {
        Facing::Up => {}
        Facing::Down => {
            p.circle(-2.0, HEAD_Y + 5.0, 1.2, eye);
            p.circle(2.0, HEAD_Y + 5.0, 1.2, eye);
            p.rect(-1.0, HEAD_Y + 8.0, 2.0, 1.0, MOUTH);
        }
        Facing::Left => {
            p.circle(-3.0, HEAD_Y + 5.0, 1.2, eye);
            p.rect(-5.0, HEAD_Y + 8.0, 2.0, 1.0, PROFILE_MOUTH);
        }
        Facing::Right => {
            p.circle(3.0, HEAD_Y + 5.0, 1.2, eye);
            p.rect(3.0, HEAD_Y + 8.0, 2.0, 1.0, PROFILE_MOUTH);
        }
    }
}
