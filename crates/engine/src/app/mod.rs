mod camera;
mod entity;
mod geometry;
mod input;
mod interaction;
mod loop_runner;
mod metrics;
mod motion;
mod palette;
mod rendering;
mod simulation;
mod ui;
mod world;

pub use camera::{
    Camera, CameraPolicy, DEFAULT_FOLLOW_GAIN, DEFAULT_LOOK_AHEAD_PX, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP,
};
pub use entity::{
    update_facing, update_idle, update_walk, walk_frame_at, Accessory, Entity, Facing, IDLE_FRAME,
    PLAYER_NAME, WALK_FRAMES_PER_SECOND, WALK_FRAME_COUNT,
};
pub use geometry::Vec2;
pub use input::{InputAction, InputSnapshot};
pub use interaction::{anchor_tile, detect, InteractionTarget, INTERACTION_RADIUS};
pub use loop_runner::{run_app, AppError, LoopConfig, SLOW_FRAME_ENV_VAR};
pub use metrics::LoopMetricsSnapshot;
pub use motion::{
    collides, step_player, velocity, MotionOutcome, MoveIntent, PLAYER_HALF_WIDTH, PLAYER_SPEED,
};
pub use palette::{mix, parse_hex_color, rgb, rgba, with_alpha, Palette, PalettePatch, Rgba};
pub use rendering::{
    draw_text, glyph_advance, lerp_rgba, line_height, minimap_origin, text_width, wrap_text,
    Compositor, FrameBuffer, GlowBuffer, Renderer, SceneLayer, ScreenProjection, GLYPH_HEIGHT,
    GLYPH_WIDTH, LAYER_ORDER, MINIMAP_HEIGHT, MINIMAP_WIDTH,
};
pub use simulation::{
    SimulationSnapshot, SimulationState, TickReport, INTERACT_KEY_LABEL, MAX_FRAME_DT,
};
pub use ui::{NullUi, UiCollaborator};
pub use world::{
    AboutPanel, ContactLink, ContactPanel, GalleryItem, GalleryPanel, NpcSpawn, ObjectKind,
    PointOfInterest, ProjectItem, ProjectsPanel, Prop, PropKind, Skill, SkillsPanel, TileRect,
    TileWorld, TileWorldError, TileWorldLayout, MIN_WORLD_TILES, TILE_SIZE,
};
