//! Viewport follow policies.
//!
//! The camera position is the viewport's top-left corner in world pixels. After every
//! update it is clamped so the viewport never leaves the world (or pinned to 0 on an
//! axis where the world is smaller than the viewport).

use super::entity::Entity;
use super::geometry::Vec2;
use super::rendering::ScreenProjection;

pub const DEFAULT_FOLLOW_GAIN: f32 = 6.0;
pub const DEFAULT_LOOK_AHEAD_PX: f32 = 12.0;
pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 4.0;
pub const ZOOM_STEP: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraPolicy {
    /// Eases toward the player plus an offset along the look vector.
    LookAhead { distance: f32 },
    /// Holds still while the player stays inside a centred box of `size` world pixels.
    DeadZone { size: Vec2 },
}

impl CameraPolicy {
    pub fn look_ahead() -> Self {
        CameraPolicy::LookAhead {
            distance: DEFAULT_LOOK_AHEAD_PX,
        }
    }

    /// Box covering a third of the width and a quarter of the height of a 320x180 view.
    pub fn dead_zone() -> Self {
        CameraPolicy::DeadZone {
            size: Vec2::new(96.0, 48.0),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CameraPolicy::LookAhead { .. } => "lookahead",
            CameraPolicy::DeadZone { .. } => "deadzone",
        }
    }
}

impl Default for CameraPolicy {
    fn default() -> Self {
        Self::dead_zone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec2,
    canvas_size: Vec2,
    viewport_size: Vec2,
    zoom: f32,
    pub follow_gain: f32,
    pub policy: CameraPolicy,
}

impl Camera {
    pub fn new(canvas_width: u32, canvas_height: u32, zoom: f32, policy: CameraPolicy) -> Self {
        let mut camera = Self {
            position: Vec2::ZERO,
            canvas_size: Vec2::new(canvas_width as f32, canvas_height as f32),
            viewport_size: Vec2::ZERO,
            zoom: MIN_ZOOM,
            follow_gain: DEFAULT_FOLLOW_GAIN,
            policy,
        };
        camera.set_zoom(zoom);
        camera
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Viewport extent in world pixels (canvas / zoom).
    pub fn viewport_size(&self) -> Vec2 {
        self.viewport_size
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        let zoom = if zoom.is_finite() { zoom } else { MIN_ZOOM };
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.viewport_size = Vec2::new(
            self.canvas_size.x / self.zoom,
            self.canvas_size.y / self.zoom,
        );
    }

    pub fn apply_zoom_steps(&mut self, steps: i32) -> bool {
        if steps == 0 {
            return false;
        }
        let before = self.zoom;
        self.set_zoom(before + steps as f32 * ZOOM_STEP);
        self.zoom != before
    }

    pub fn update(&mut self, player: &Entity, world_size: Vec2, dt: f32) {
        let target = self.target_for(player);
        let blend = (dt * self.follow_gain).clamp(0.0, 1.0);
        self.position = self.position + (target - self.position) * blend;
        self.clamp_to_world(world_size);
    }

    /// Centres the viewport on the player without easing.
    pub fn snap_to(&mut self, player: &Entity, world_size: Vec2) {
        self.position = player.position - self.viewport_size * 0.5;
        self.clamp_to_world(world_size);
    }

    pub fn clamp_to_world(&mut self, world_size: Vec2) {
        self.position.x = clamp_axis(self.position.x, world_size.x, self.viewport_size.x);
        self.position.y = clamp_axis(self.position.y, world_size.y, self.viewport_size.y);
    }

    pub fn projection(&self) -> ScreenProjection {
        ScreenProjection::new(self.position, self.zoom)
    }

    /// Returns (min, max) corners of the dead-zone in world pixels, or `None` for look-ahead.
    pub fn dead_zone_bounds(&self) -> Option<(Vec2, Vec2)> {
        let CameraPolicy::DeadZone { size } = self.policy else {
            return None;
        };
        let zone = self.zone_extent(size);
        let low = self.position + (self.viewport_size - zone) * 0.5;
        Some((low, low + zone))
    }

    fn target_for(&self, player: &Entity) -> Vec2 {
        match self.policy {
            CameraPolicy::LookAhead { distance } => {
                player.position + player.look * distance - self.viewport_size * 0.5
            }
            CameraPolicy::DeadZone { size } => {
                let zone = self.zone_extent(size);
                Vec2::new(
                    dead_zone_axis(
                        self.position.x,
                        player.position.x,
                        self.viewport_size.x,
                        zone.x,
                    ),
                    dead_zone_axis(
                        self.position.y,
                        player.position.y,
                        self.viewport_size.y,
                        zone.y,
                    ),
                )
            }
        }
    }

    fn zone_extent(&self, size: Vec2) -> Vec2 {
        Vec2::new(
            size.x.clamp(0.0, self.viewport_size.x),
            size.y.clamp(0.0, self.viewport_size.y),
        )
    }
}

/// Target along one axis so the violated zone edge re-aligns with the player.
fn dead_zone_axis(camera: f32, player: f32, viewport: f32, zone: f32) -> f32 {
    let margin = (viewport - zone) * 0.5;
    let low = camera + margin;
    let high = low + zone;
    if player < low {
        player - margin
    } else if player > high {
        player - margin - zone
    } else {
        camera
    }
}

fn clamp_axis(value: f32, world: f32, viewport: f32) -> f32 {
    let max = (world - viewport).max(0.0);
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: Vec2 = Vec2::new(960.0, 640.0);

    fn player_at(x: f32, y: f32) -> Entity {
        Entity::player(Vec2::new(x, y))
    }

    fn dead_zone_camera() -> Camera {
        let mut camera = Camera::new(640, 360, 2.0, CameraPolicy::dead_zone());
        camera.snap_to(&player_at(480.0, 320.0), WORLD);
        camera
    }

    #[test]
    fn zoom_changes_effective_viewport() {
        let mut camera = Camera::new(640, 360, 2.0, CameraPolicy::look_ahead());
        assert_eq!(camera.viewport_size(), Vec2::new(320.0, 180.0));
        camera.set_zoom(9.0);
        assert_eq!(camera.zoom(), MAX_ZOOM);
        assert_eq!(camera.viewport_size(), Vec2::new(160.0, 90.0));
        assert!(camera.apply_zoom_steps(-4));
        assert_eq!(camera.zoom(), 3.0);
    }

    #[test]
    fn position_stays_in_bounds_for_any_player_path() {
        let path = [
            (-500.0, -500.0),
            (0.0, 0.0),
            (2000.0, 50.0),
            (480.0, 9000.0),
            (960.0, 640.0),
            (12.0, 630.0),
        ];
        for policy in [CameraPolicy::look_ahead(), CameraPolicy::dead_zone()] {
            let mut camera = Camera::new(640, 360, 2.0, policy);
            for (x, y) in path {
                for _ in 0..30 {
                    camera.update(&player_at(x, y), WORLD, 0.05);
                    assert!(camera.position.x >= 0.0 && camera.position.x <= 960.0 - 320.0);
                    assert!(camera.position.y >= 0.0 && camera.position.y <= 640.0 - 180.0);
                }
            }
        }
    }

    #[test]
    fn world_smaller_than_viewport_pins_to_zero() {
        let mut camera = Camera::new(640, 360, 1.0, CameraPolicy::look_ahead());
        let tiny = Vec2::new(320.0, 200.0);
        camera.update(&player_at(300.0, 190.0), tiny, 0.05);
        assert_eq!(camera.position, Vec2::ZERO);
    }

    #[test]
    fn dead_zone_ignores_motion_inside_box() {
        let mut camera = dead_zone_camera();
        let anchored = camera.position;
        for (x, y) in [(480.0, 320.0), (520.0, 300.0), (440.0, 340.0), (500.0, 310.0)] {
            camera.update(&player_at(x, y), WORLD, 0.05);
            assert_eq!(camera.position, anchored);
        }
    }

    #[test]
    fn dead_zone_exit_moves_camera_monotonically_toward_realignment() {
        let mut camera = dead_zone_camera();
        let (_, high) = camera.dead_zone_bounds().expect("dead zone");
        let player = player_at(high.x + 40.0, 320.0);

        let mut last_x = camera.position.x;
        for _ in 0..60 {
            camera.update(&player, WORLD, 1.0 / 60.0);
            assert!(camera.position.x >= last_x);
            last_x = camera.position.x;
        }
        let (_, high_after) = camera.dead_zone_bounds().expect("dead zone");
        assert!((high_after.x - player.position.x).abs() < 0.5);
        assert_eq!(camera.position.y, dead_zone_camera().position.y);
    }

    #[test]
    fn look_ahead_biases_toward_facing() {
        let mut camera = Camera::new(640, 360, 2.0, CameraPolicy::look_ahead());
        let mut player = player_at(480.0, 320.0);
        player.look = Vec2::new(1.0, 0.0);
        for _ in 0..200 {
            camera.update(&player, WORLD, 0.05);
        }
        assert!((camera.position.x - (480.0 + 12.0 - 160.0)).abs() < 0.01);
        assert!((camera.position.y - (320.0 - 90.0)).abs() < 0.01);
    }

    #[test]
    fn follow_blend_never_overshoots_on_large_dt() {
        let mut camera = Camera::new(640, 360, 2.0, CameraPolicy::look_ahead());
        let mut player = player_at(600.0, 400.0);
        player.look = Vec2::ZERO;
        camera.update(&player, WORLD, 10.0);
        assert_eq!(camera.position, Vec2::new(440.0, 310.0));
    }
}
