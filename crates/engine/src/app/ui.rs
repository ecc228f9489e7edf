use super::rendering::{FrameBuffer, ScreenProjection};
use super::world::PointOfInterest;

/// Boundary to whatever presents panels, prompts and dialogue on top of the scene.
///
/// The simulation only talks to the UI through this trait. While `is_modal_open`
/// is true the player cannot move.
pub trait UiCollaborator {
    fn is_modal_open(&self) -> bool;

    fn show_interaction_prompt(&mut self, anchor_tile_x: u32, anchor_tile_y: u32, key_label: &str);

    fn hide_interaction_prompt(&mut self);

    fn open_object_panel(&mut self, object: &PointOfInterest);

    fn open_dialogue(&mut self, name: &str, lines: &[String]);

    fn show_transient_message(&mut self, text: &str);

    fn close_modal(&mut self);

    /// Interact pressed while a modal is open. Pages dialogue, dismisses panels.
    fn advance_modal(&mut self) {
        self.close_modal();
    }

    fn update(&mut self, _dt: f32) {}

    fn draw_overlay(&self, _frame: &mut FrameBuffer, _projection: &ScreenProjection, _time_s: f32) {}
}

/// Headless collaborator: never opens a modal, swallows every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullUi;

impl UiCollaborator for NullUi {
    fn is_modal_open(&self) -> bool {
        false
    }

    fn show_interaction_prompt(&mut self, _anchor_tile_x: u32, _anchor_tile_y: u32, _key_label: &str) {}

    fn hide_interaction_prompt(&mut self) {}

    fn open_object_panel(&mut self, _object: &PointOfInterest) {}

    fn open_dialogue(&mut self, _name: &str, _lines: &[String]) {}

    fn show_transient_message(&mut self, _text: &str) {}

    fn close_modal(&mut self) {}
}
