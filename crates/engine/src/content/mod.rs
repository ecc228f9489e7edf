mod loader;
mod types;

pub use loader::{load_world_file, load_world_str, parse_world_json, WorldLoadError, WorldShapeError};
pub use types::{
    HexColor, NpcDef, ObjectDef, PalettePatchDef, PropDef, TileCoord, WorldDef, SOLID_TILE_CHAR,
};
