pub mod app;
pub mod content;

pub use app::{
    detect, run_app, step_player, AppError, Camera, CameraPolicy, Compositor, Entity, Facing,
    FrameBuffer, InputAction, InputSnapshot, InteractionTarget, LoopConfig, LoopMetricsSnapshot,
    MoveIntent, NullUi, ObjectKind, PointOfInterest, Renderer, ScreenProjection, SimulationSnapshot,
    SimulationState, TickReport, TileWorld, TileWorldError, TileWorldLayout, UiCollaborator, Vec2,
    SLOW_FRAME_ENV_VAR, TILE_SIZE,
};
pub use content::{load_world_file, load_world_str, parse_world_json, WorldDef, WorldLoadError};
