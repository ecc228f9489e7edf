use serde::Deserialize;

use super::geometry::Vec2;
use super::palette::Palette;
use super::world::{NpcSpawn, TileWorld};

pub const IDLE_FRAME: u8 = 1;
pub const WALK_FRAMES_PER_SECOND: f32 = 8.0;
pub const WALK_FRAME_COUNT: u8 = 4;
const IDLE_CLOCK_RATE: f32 = 0.5;
const LOOK_DECAY: f32 = 0.9;
const LOOK_SNAP_BELOW: f32 = 0.1;

pub const PLAYER_NAME: &str = "Sam";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    pub fn unit_vector(self) -> Vec2 {
        match self {
            Facing::Up => Vec2::new(0.0, -1.0),
            Facing::Down => Vec2::new(0.0, 1.0),
            Facing::Left => Vec2::new(-1.0, 0.0),
            Facing::Right => Vec2::new(1.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessory {
    Scarf,
}

/// Player or NPC state. Mutated every tick, never destroyed during a session.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub position: Vec2,
    pub facing: Facing,
    pub animation_clock: f32,
    pub animation_frame: u8,
    pub look: Vec2,
    pub palette: Palette,
    pub accessory: Option<Accessory>,
    pub name: String,
    pub dialogue: Vec<String>,
}

impl Entity {
    pub fn player(spawn: Vec2) -> Self {
        Self {
            position: spawn,
            facing: Facing::Down,
            animation_clock: 0.0,
            animation_frame: IDLE_FRAME,
            look: Facing::Down.unit_vector(),
            palette: Palette::BASE,
            accessory: Some(Accessory::Scarf),
            name: PLAYER_NAME.to_string(),
            dialogue: Vec::new(),
        }
    }

    pub fn npc(spawn: &NpcSpawn) -> Self {
        Self {
            position: TileWorld::tile_center(spawn.tile_x, spawn.tile_y),
            facing: spawn.facing,
            animation_clock: 0.0,
            animation_frame: IDLE_FRAME,
            look: Facing::Down.unit_vector(),
            palette: Palette::BASE.with_patch(&spawn.palette),
            accessory: None,
            name: spawn.name.clone(),
            dialogue: spawn.dialogue.clone(),
        }
    }
}

/// Facing follows the dominant axis; zero input leaves facing alone and lets the look vector settle.
pub fn update_facing(entity: &mut Entity, x_axis: f32, y_axis: f32) {
    let next = if x_axis.abs() > y_axis.abs() {
        Some(if x_axis < 0.0 {
            Facing::Left
        } else {
            Facing::Right
        })
    } else if y_axis.abs() > 0.0 {
        Some(if y_axis < 0.0 { Facing::Up } else { Facing::Down })
    } else {
        None
    };

    match next {
        Some(facing) => {
            entity.facing = facing;
            entity.look = facing.unit_vector();
        }
        None => {
            entity.look = entity.look * LOOK_DECAY;
            if entity.look.length() < LOOK_SNAP_BELOW {
                entity.look = Vec2::ZERO;
            }
        }
    }
}

pub fn update_walk(entity: &mut Entity, dt: f32) {
    entity.animation_clock += dt;
    entity.animation_frame = walk_frame_at(entity.animation_clock);
}

pub fn update_idle(entity: &mut Entity, dt: f32) {
    entity.animation_clock += dt * IDLE_CLOCK_RATE;
    entity.animation_frame = IDLE_FRAME;
}

pub fn walk_frame_at(clock: f32) -> u8 {
    let step = (clock * WALK_FRAMES_PER_SECOND).floor();
    if !step.is_finite() || step < 0.0 {
        return 0;
    }
    (step as u64 % u64::from(WALK_FRAME_COUNT)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_starts_idle_facing_down_with_scarf() {
        let player = Entity::player(Vec2::new(88.0, 328.0));
        assert_eq!(player.animation_frame, IDLE_FRAME);
        assert_eq!(player.facing, Facing::Down);
        assert_eq!(player.look, Vec2::new(0.0, 1.0));
        assert_eq!(player.accessory, Some(Accessory::Scarf));
        assert_eq!(player.name, "Sam");
    }

    #[test]
    fn dominant_axis_picks_facing() {
        let mut entity = Entity::player(Vec2::ZERO);
        update_facing(&mut entity, -1.0, 0.5);
        assert_eq!(entity.facing, Facing::Left);
        assert_eq!(entity.look, Vec2::new(-1.0, 0.0));

        update_facing(&mut entity, 0.7, -0.7);
        assert_eq!(entity.facing, Facing::Up);
        assert_eq!(entity.look, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn zero_input_keeps_facing_and_decays_look_to_zero() {
        let mut entity = Entity::player(Vec2::ZERO);
        update_facing(&mut entity, 1.0, 0.0);

        update_facing(&mut entity, 0.0, 0.0);
        assert_eq!(entity.facing, Facing::Right);
        assert!((entity.look.x - 0.9).abs() < 1e-6);

        for _ in 0..40 {
            update_facing(&mut entity, 0.0, 0.0);
        }
        assert_eq!(entity.look, Vec2::ZERO);
        assert_eq!(entity.facing, Facing::Right);
    }

    #[test]
    fn walk_frame_tracks_cumulative_clock() {
        let mut entity = Entity::player(Vec2::ZERO);
        let steps = [0.016_f32, 0.05, 0.2, 0.001, 0.13, 0.4, 0.07];
        let mut total = 0.0_f32;
        for dt in steps {
            update_walk(&mut entity, dt);
            total += dt;
            let expected = ((total * 8.0).floor() as u64 % 4) as u8;
            assert_eq!(entity.animation_frame, expected, "at t={total}");
        }
    }

    #[test]
    fn walk_cycle_visits_every_frame_in_half_a_second() {
        let mut entity = Entity::player(Vec2::ZERO);
        let mut seen = Vec::new();
        for _ in 0..4 {
            update_walk(&mut entity, 0.125);
            seen.push(entity.animation_frame);
        }
        assert_eq!(seen, vec![1, 2, 3, 0]);
    }

    #[test]
    fn idle_pins_frame_but_advances_clock_at_half_rate() {
        let mut entity = Entity::player(Vec2::ZERO);
        update_walk(&mut entity, 0.3);
        for dt in [0.0, 0.01, 1.0, 7.5] {
            let before = entity.animation_clock;
            update_idle(&mut entity, dt);
            assert_eq!(entity.animation_frame, IDLE_FRAME);
            assert!((entity.animation_clock - (before + dt * 0.5)).abs() < 1e-5);
        }
    }
}
