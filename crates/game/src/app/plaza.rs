use plaza_engine::{load_world_str, TileWorld, WorldLoadError};

const PLAZA_WORLD_JSON: &str = include_str!("../../assets/plaza.json");

/// The night plaza shipped with the binary.
pub(crate) fn built_in_world() -> Result<TileWorld, WorldLoadError> {
    load_world_str(PLAZA_WORLD_JSON)
}
