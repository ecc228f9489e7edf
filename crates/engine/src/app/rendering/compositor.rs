//! Fixed-order scene composition into an off-screen frame.
//!
//! The compositor reads simulation state and never writes it back. Every frame
//! starts by clearing the glow buffer, so light from a previous frame cannot
//! bleed into the next one.

use crate::app::simulation::SimulationState;

use super::backdrop::{draw_fog, draw_hills, draw_sky};
use super::character::draw_entity;
use super::decor::{draw_points_of_interest, draw_props};
use super::glow::GlowBuffer;
use super::minimap::draw_minimap;
use super::raster::FrameBuffer;
use super::terrain::{draw_ground, draw_water};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneLayer {
    Sky,
    Hills,
    Fog,
    Ground,
    Water,
    Props,
    PointsOfInterest,
    Entities,
    Glow,
    Minimap,
}

/// Back to front.
pub const LAYER_ORDER: [SceneLayer; 10] = [
    SceneLayer::Sky,
    SceneLayer::Hills,
    SceneLayer::Fog,
    SceneLayer::Ground,
    SceneLayer::Water,
    SceneLayer::Props,
    SceneLayer::PointsOfInterest,
    SceneLayer::Entities,
    SceneLayer::Glow,
    SceneLayer::Minimap,
];

#[derive(Debug)]
pub struct Compositor {
    frame: FrameBuffer,
    glow: GlowBuffer,
}

impl Compositor {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frame: FrameBuffer::new(width, height),
            glow: GlowBuffer::new(width, height),
        }
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub(crate) fn frame_mut(&mut self) -> &mut FrameBuffer {
        &mut self.frame
    }

    pub fn compose(&mut self, state: &SimulationState, time_s: f32) -> &FrameBuffer {
        self.glow.clear();
        let world = state.world();
        let camera = state.camera();
        let projection = camera.projection();

        for layer in LAYER_ORDER {
            match layer {
                SceneLayer::Sky => draw_sky(&mut self.frame),
                SceneLayer::Hills => draw_hills(&mut self.frame, &projection, time_s),
                SceneLayer::Fog => draw_fog(&mut self.frame, &projection, world.pixel_size().y),
                SceneLayer::Ground => draw_ground(&mut self.frame, &projection, world),
                SceneLayer::Water => draw_water(&mut self.frame, &projection, world, time_s),
                SceneLayer::Props => {
                    draw_props(&mut self.frame, &mut self.glow, &projection, world, time_s)
                }
                SceneLayer::PointsOfInterest => {
                    draw_points_of_interest(&mut self.frame, &mut self.glow, &projection, world, time_s)
                }
                SceneLayer::Entities => {
                    for npc in state.npcs() {
                        draw_entity(&mut self.frame, &projection, npc, time_s, true);
                    }
                    draw_entity(&mut self.frame, &projection, state.player(), time_s, false);
                }
                SceneLayer::Glow => self.glow.resolve_into(&mut self.frame),
                SceneLayer::Minimap => {
                    draw_minimap(&mut self.frame, world, camera, state.player().position)
                }
            }
        }
        &self.frame
    }
}
