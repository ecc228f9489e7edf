use crate::app::geometry::Vec2;

/// `screen = (world - origin) * zoom`, with `origin` the camera's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenProjection {
    pub origin: Vec2,
    pub zoom: f32,
}

impl ScreenProjection {
    pub fn new(origin: Vec2, zoom: f32) -> Self {
        Self { origin, zoom }
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.origin) * self.zoom
    }

    pub fn world_to_screen_px(&self, world: Vec2) -> (i32, i32) {
        let screen = self.world_to_screen(world);
        (screen.x.round() as i32, screen.y.round() as i32)
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        if self.zoom == 0.0 {
            return self.origin;
        }
        screen * (1.0 / self.zoom) + self.origin
    }

    pub fn scale(&self, world_length: f32) -> f32 {
        world_length * self.zoom
    }
}
