use std::f32::consts::FRAC_1_SQRT_2;

use super::entity::{update_facing, update_idle, update_walk, Entity};
use super::geometry::Vec2;
use super::input::{InputAction, InputSnapshot};
use super::world::{TileWorld, TILE_SIZE};

/// 3.5 tiles per second.
pub const PLAYER_SPEED: f32 = 3.5 * TILE_SIZE;
pub const PLAYER_HALF_WIDTH: f32 = 6.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    pub const NONE: MoveIntent = MoveIntent {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    pub fn from_input(input: &InputSnapshot) -> Self {
        Self {
            up: input.is_down(InputAction::MoveUp),
            down: input.is_down(InputAction::MoveDown),
            left: input.is_down(InputAction::MoveLeft),
            right: input.is_down(InputAction::MoveRight),
        }
    }

    /// Opposing keys cancel. Diagonals are scaled so every direction has unit length.
    pub fn axes(self) -> Vec2 {
        let axis = |negative: bool, positive: bool| f32::from(positive as u8) - f32::from(negative as u8);
        let x = axis(self.left, self.right);
        let y = axis(self.up, self.down);
        if x != 0.0 && y != 0.0 {
            Vec2::new(x * FRAC_1_SQRT_2, y * FRAC_1_SQRT_2)
        } else {
            Vec2::new(x, y)
        }
    }

    pub fn is_idle(self) -> bool {
        self.axes() == Vec2::ZERO
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionOutcome {
    pub moved: bool,
    pub blocked_x: bool,
    pub blocked_y: bool,
}

pub fn velocity(intent: MoveIntent) -> Vec2 {
    intent.axes() * PLAYER_SPEED
}

/// Samples the four corners of the player's square footprint.
pub fn collides(world: &TileWorld, x: f32, y: f32) -> bool {
    let h = PLAYER_HALF_WIDTH;
    world.is_solid(x - h, y - h)
        || world.is_solid(x + h, y - h)
        || world.is_solid(x - h, y + h)
        || world.is_solid(x + h, y + h)
}

pub fn step_player(
    player: &mut Entity,
    world: &TileWorld,
    intent: MoveIntent,
    dt: f32,
) -> MotionOutcome {
    let axes = intent.axes();
    update_facing(player, axes.x, axes.y);
    if axes == Vec2::ZERO {
        update_idle(player, dt);
        return MotionOutcome::default();
    }

    let before = player.position;
    let v = axes * PLAYER_SPEED;
    let mut outcome = MotionOutcome::default();

    let next_x = before.x + v.x * dt;
    if v.x != 0.0 && collides(world, next_x, before.y) {
        outcome.blocked_x = true;
    } else {
        player.position.x = next_x;
    }

    let next_y = before.y + v.y * dt;
    if v.y != 0.0 && collides(world, player.position.x, next_y) {
        outcome.blocked_y = true;
    } else {
        player.position.y = next_y;
    }

    let bounds = world.pixel_size();
    player.position.x = clamp_inside_border(player.position.x, bounds.x);
    player.position.y = clamp_inside_border(player.position.y, bounds.y);

    outcome.moved = player.position != before;
    update_walk(player, dt);
    outcome
}

fn clamp_inside_border(value: f32, extent: f32) -> f32 {
    let high = (extent - TILE_SIZE).max(TILE_SIZE);
    value.clamp(TILE_SIZE, high)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::entity::IDLE_FRAME;
    use crate::app::world::TileWorldLayout;

    /// 12x10 open field with a vertical wall at column 6 from row 1 to row 4.
    fn walled_world() -> TileWorld {
        let (width, height) = (12u32, 10u32);
        let mut solids = vec![false; (width * height) as usize];
        for y in 1..=4 {
            solids[(y * width + 6) as usize] = true;
        }
        TileWorld::new(TileWorldLayout {
            width,
            height,
            solids,
            spawn_point: TileWorld::tile_center(2, 2),
            ..TileWorldLayout::default()
        })
        .expect("world")
    }

    fn right() -> MoveIntent {
        MoveIntent {
            right: true,
            ..MoveIntent::NONE
        }
    }

    #[test]
    fn diagonal_speed_matches_cardinal_speed() {
        let cardinal = velocity(right()).length();
        let diagonal = velocity(MoveIntent {
            right: true,
            down: true,
            ..MoveIntent::NONE
        })
        .length();
        assert!((cardinal - PLAYER_SPEED).abs() < 1e-4);
        assert!((diagonal - cardinal).abs() < 1e-4);
    }

    #[test]
    fn opposing_keys_cancel() {
        let intent = MoveIntent {
            left: true,
            right: true,
            ..MoveIntent::NONE
        };
        assert!(intent.is_idle());
    }

    #[test]
    fn no_input_idles_without_moving() {
        let world = walled_world();
        let mut player = Entity::player(world.spawn_point());
        update_walk(&mut player, 0.2);
        let outcome = step_player(&mut player, &world, MoveIntent::NONE, 0.05);
        assert_eq!(outcome, MotionOutcome::default());
        assert_eq!(player.position, world.spawn_point());
        assert_eq!(player.animation_frame, IDLE_FRAME);
    }

    #[test]
    fn wall_blocks_x_and_leaves_y_untouched() {
        let world = walled_world();
        let start = Vec2::new(6.0 * TILE_SIZE - PLAYER_HALF_WIDTH - 1.0, 3.0 * TILE_SIZE);
        let mut player = Entity::player(start);

        let outcome = step_player(&mut player, &world, right(), 0.05);
        assert!(outcome.blocked_x);
        assert!(!outcome.moved);
        assert_eq!(player.position, start);
    }

    #[test]
    fn diagonal_into_wall_slides_along_free_axis() {
        let world = walled_world();
        let start = Vec2::new(6.0 * TILE_SIZE - PLAYER_HALF_WIDTH - 1.0, 3.0 * TILE_SIZE);
        let mut player = Entity::player(start);
        let intent = MoveIntent {
            right: true,
            down: true,
            ..MoveIntent::NONE
        };

        let outcome = step_player(&mut player, &world, intent, 0.05);
        assert!(outcome.blocked_x);
        assert!(!outcome.blocked_y);
        assert_eq!(player.position.x, start.x);
        assert!(player.position.y > start.y);
    }

    #[test]
    fn corner_landing_exactly_on_boundary_counts_as_entering() {
        let world = walled_world();
        // 56 px/s for 1/16 s is 3.5 px: the right edge lands exactly on x = 96, the wall's first pixel.
        let start = Vec2::new(6.0 * TILE_SIZE - PLAYER_HALF_WIDTH - 3.5, 3.0 * TILE_SIZE);
        let mut player = Entity::player(start);
        let outcome = step_player(&mut player, &world, right(), 0.0625);
        assert!(outcome.blocked_x);
        assert_eq!(player.position.x, start.x);
    }

    #[test]
    fn holding_into_wall_never_changes_blocked_axis() {
        let world = walled_world();
        // One 60 Hz step is 56 / 60 px, so a 0.5 px gap is never closed.
        let start = Vec2::new(6.0 * TILE_SIZE - PLAYER_HALF_WIDTH - 0.5, 2.5 * TILE_SIZE);
        let mut player = Entity::player(start);
        for _ in 0..120 {
            let outcome = step_player(&mut player, &world, right(), 1.0 / 60.0);
            assert!(outcome.blocked_x);
            assert_eq!(player.position, start);
        }
    }

    #[test]
    fn final_position_is_clamped_inside_border_tiles() {
        let world = walled_world();
        let mut player = Entity::player(Vec2::new(5.0, 5.0));
        step_player(&mut player, &world, right(), 0.0);
        assert_eq!(player.position, Vec2::new(TILE_SIZE, TILE_SIZE));
    }
}
