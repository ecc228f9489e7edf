use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::app::{
    NpcSpawn, PointOfInterest, Prop, TileWorld, TileWorldError, TileWorldLayout,
};

use super::types::{WorldDef, SOLID_TILE_CHAR};

#[derive(Debug, Error)]
pub enum WorldLoadError {
    #[error("failed to read world file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse world json at {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Shape(#[from] WorldShapeError),
}

/// A definition that parsed but does not describe a usable grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldShapeError {
    #[error("expected {expected} rows, got {actual}")]
    RowCount { expected: u32, actual: usize },
    #[error("row {row} has {actual} tiles, expected {expected}")]
    RowWidth {
        row: usize,
        expected: u32,
        actual: usize,
    },
    #[error("{what} at tile {x},{y} lies outside the {width}x{height} grid")]
    OutOfBounds {
        what: String,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    #[error(transparent)]
    World(#[from] TileWorldError),
}

pub fn load_world_file(path: &Path) -> Result<TileWorld, WorldLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| WorldLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let world = load_world_str(&raw)?;
    debug!(path = %path.display(), "world_file_read");
    Ok(world)
}

pub fn load_world_str(raw: &str) -> Result<TileWorld, WorldLoadError> {
    let def = parse_world_json(raw)?;
    Ok(TileWorld::from_def(def)?)
}

pub fn parse_world_json(raw: &str) -> Result<WorldDef, WorldLoadError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    serde_path_to_error::deserialize::<_, WorldDef>(&mut deserializer).map_err(|error| {
        let path = error.path().to_string();
        WorldLoadError::Parse {
            path,
            source: error.into_inner(),
        }
    })
}

impl TileWorld {
    /// Builds the runtime grid from a parsed definition.
    pub fn from_def(def: WorldDef) -> Result<TileWorld, WorldShapeError> {
        let WorldDef {
            width,
            height,
            rows,
            water,
            props,
            objects,
            npcs,
            spawn,
        } = def;

        if rows.len() != height as usize {
            return Err(WorldShapeError::RowCount {
                expected: height,
                actual: rows.len(),
            });
        }
        // Rows are checked before anything is sized from the declared width.
        for (row_index, row) in rows.iter().enumerate() {
            let tiles = row.chars().count();
            if tiles != width as usize {
                return Err(WorldShapeError::RowWidth {
                    row: row_index,
                    expected: width,
                    actual: tiles,
                });
            }
        }
        let solids: Vec<bool> = rows
            .iter()
            .flat_map(|row| row.chars())
            .map(|tile| tile == SOLID_TILE_CHAR)
            .collect();

        let in_bounds = |what: String, x: u32, y: u32| {
            if x < width && y < height {
                Ok(())
            } else {
                Err(WorldShapeError::OutOfBounds {
                    what,
                    x,
                    y,
                    width,
                    height,
                })
            }
        };

        in_bounds("spawn".to_string(), spawn.x, spawn.y)?;
        for (index, region) in water.iter().enumerate() {
            let far_x = region.x.saturating_add(region.width).saturating_sub(1);
            let far_y = region.y.saturating_add(region.height).saturating_sub(1);
            in_bounds(format!("water[{index}]"), far_x, far_y)?;
        }

        let props = props
            .into_iter()
            .enumerate()
            .map(|(index, prop)| {
                in_bounds(format!("props[{index}]"), prop.x, prop.y)?;
                Ok(Prop {
                    kind: prop.kind,
                    tile_x: prop.x,
                    tile_y: prop.y,
                    emissive: prop.emissive,
                    color: prop.color.map(|hex| hex.0),
                })
            })
            .collect::<Result<Vec<_>, WorldShapeError>>()?;

        let objects = objects
            .into_iter()
            .map(|object| {
                in_bounds(format!("object '{}'", object.id), object.x, object.y)?;
                Ok(PointOfInterest {
                    id: object.id,
                    name: object.name,
                    tile_x: object.x,
                    tile_y: object.y,
                    kind: object.panel,
                })
            })
            .collect::<Result<Vec<_>, WorldShapeError>>()?;

        let npc_spawns = npcs
            .into_iter()
            .map(|npc| {
                in_bounds(format!("npc '{}'", npc.name), npc.x, npc.y)?;
                Ok(NpcSpawn {
                    tile_x: npc.x,
                    tile_y: npc.y,
                    facing: npc.facing,
                    palette: npc.palette.into(),
                    name: npc.name,
                    dialogue: npc.dialogue,
                })
            })
            .collect::<Result<Vec<_>, WorldShapeError>>()?;

        Ok(TileWorld::new(TileWorldLayout {
            width,
            height,
            solids,
            water_regions: water,
            props,
            objects,
            npc_spawns,
            spawn_point: TileWorld::tile_center(spawn.x, spawn.y),
        })?)
    }
}
