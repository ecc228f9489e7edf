mod backdrop;
mod character;
mod compositor;
mod decor;
mod glow;
mod minimap;
mod overlay;
mod painter;
mod raster;
mod renderer;
mod terrain;
mod text;
mod transform;

pub use compositor::{Compositor, SceneLayer, LAYER_ORDER};
pub use glow::GlowBuffer;
pub use minimap::{minimap_origin, MINIMAP_HEIGHT, MINIMAP_WIDTH};
pub(crate) use overlay::OverlayData;
pub use raster::{lerp_rgba, FrameBuffer};
pub use renderer::Renderer;
pub use text::{draw_text, glyph_advance, line_height, text_width, wrap_text, GLYPH_HEIGHT, GLYPH_WIDTH};
pub use transform::ScreenProjection;
