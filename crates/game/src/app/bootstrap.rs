use std::env;
use std::path::PathBuf;

use plaza_engine::app::CameraPolicy;
use plaza_engine::{load_world_file, LoopConfig, TileWorld, UiCollaborator};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use super::panels::PanelUi;
use super::plaza;

const WORLD_ENV_VAR: &str = "PLAZA_WORLD";
const CAMERA_ENV_VAR: &str = "PLAZA_CAMERA";
const ZOOM_ENV_VAR: &str = "PLAZA_ZOOM";
const START_HINT: &str = "Explore the plaza and press E near glowing objects.";

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) world: TileWorld,
    pub(crate) ui: Box<dyn UiCollaborator>,
}

/// Returns `None` after logging when no world could be loaded.
pub(crate) fn build_app() -> Option<AppWiring> {
    init_tracing();
    info!("=== Plaza Startup ===");

    let world = load_world()?;
    let defaults = LoopConfig::default();
    let config = LoopConfig {
        camera_policy: env_override(CAMERA_ENV_VAR, env::var(CAMERA_ENV_VAR), parse_camera_policy)
            .unwrap_or(defaults.camera_policy),
        zoom: env_override(ZOOM_ENV_VAR, env::var(ZOOM_ENV_VAR), parse_zoom).unwrap_or(defaults.zoom),
        start_hint: Some(START_HINT.to_string()),
        ..defaults
    };

    Some(AppWiring {
        config,
        world,
        ui: Box::new(PanelUi::new()),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn load_world() -> Option<TileWorld> {
    match env_override(WORLD_ENV_VAR, env::var(WORLD_ENV_VAR), parse_world_path) {
        Some(path) => match load_world_file(&path) {
            Ok(world) => {
                info!(path = %path.display(), "world_source_file");
                Some(world)
            }
            Err(err) => {
                error!(path = %path.display(), error = %err, "world_load_failed");
                None
            }
        },
        None => match plaza::built_in_world() {
            Ok(world) => {
                info!("world_source_built_in");
                Some(world)
            }
            Err(err) => {
                error!(error = %err, "world_load_failed");
                None
            }
        },
    }
}

/// Unset means "use the default" silently; a value that fails to parse is logged first.
fn env_override<T>(
    var: &'static str,
    lookup: Result<String, env::VarError>,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    match lookup {
        Ok(raw) => {
            let parsed = parse(raw.trim());
            if parsed.is_none() {
                warn!(
                    env_var = var,
                    value = raw.as_str(),
                    "invalid env var value; falling back to default"
                );
            }
            parsed
        }
        Err(env::VarError::NotPresent) => None,
        Err(err) => {
            warn!(
                env_var = var,
                error = %err,
                "unable to read env var; falling back to default"
            );
            None
        }
    }
}

fn parse_camera_policy(raw: &str) -> Option<CameraPolicy> {
    match raw.to_ascii_lowercase().as_str() {
        "lookahead" | "look-ahead" | "look_ahead" => Some(CameraPolicy::look_ahead()),
        "deadzone" | "dead-zone" | "dead_zone" => Some(CameraPolicy::dead_zone()),
        _ => None,
    }
}

fn parse_zoom(raw: &str) -> Option<f32> {
    raw.parse::<f32>()
        .ok()
        .filter(|zoom| zoom.is_finite() && *zoom > 0.0)
}

fn parse_world_path(raw: &str) -> Option<PathBuf> {
    (!raw.is_empty()).then(|| PathBuf::from(raw))
}
