use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use crate::app::simulation::SimulationState;
use crate::app::ui::UiCollaborator;

use super::compositor::Compositor;
use super::overlay::{draw_overlay, OverlayData};

/// Presents the composed canvas on the window.
///
/// The canvas keeps its logical size; `pixels` scales it to whatever surface the
/// window currently has.
pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    compositor: Compositor,
    canvas_width: u32,
    canvas_height: u32,
}

impl Renderer {
    pub fn new(window: Arc<Window>, canvas_width: u32, canvas_height: u32) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(
            Arc::clone(&window),
            size.width.max(1),
            size.height.max(1),
            canvas_width,
            canvas_height,
        )?;
        Ok(Self {
            window,
            pixels,
            compositor: Compositor::new(canvas_width, canvas_height),
            canvas_width,
            canvas_height,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(
            Arc::clone(&self.window),
            width,
            height,
            self.canvas_width,
            self.canvas_height,
        )?;
        Ok(())
    }

    fn build_pixels(
        window: Arc<Window>,
        surface_width: u32,
        surface_height: u32,
        canvas_width: u32,
        canvas_height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(surface_width, surface_height, window);
        Pixels::new(canvas_width, canvas_height, surface)
    }

    pub(crate) fn render_scene(
        &mut self,
        state: &SimulationState,
        ui: &dyn UiCollaborator,
        time_s: f32,
        overlay_data: Option<&OverlayData>,
    ) -> Result<(), Error> {
        compose_layers(&mut self.compositor, state, ui, time_s, overlay_data);
        self.pixels
            .frame_mut()
            .copy_from_slice(self.compositor.frame().as_bytes());
        self.pixels.render()
    }
}

/// Scene first, then the UI collaborator, then the debug overlay on top.
pub(crate) fn compose_layers(
    compositor: &mut Compositor,
    state: &SimulationState,
    ui: &dyn UiCollaborator,
    time_s: f32,
    overlay_data: Option<&OverlayData>,
) {
    compositor.compose(state, time_s);
    let projection = state.camera().projection();
    ui.draw_overlay(compositor.frame_mut(), &projection, time_s);
    if let Some(data) = overlay_data {
        draw_overlay(compositor.frame_mut(), data);
    }
}
