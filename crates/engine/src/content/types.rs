//! On-disk shape of a world definition.
//!
//! Coordinates are tile indices. Colours are `#rgb`, `#rrggbb` or `#rrggbbaa` strings.

use serde::Deserialize;

use crate::app::{parse_hex_color, Facing, ObjectKind, PalettePatch, PropKind, Rgba, TileRect};

pub const SOLID_TILE_CHAR: char = '#';

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorldDef {
    pub width: u32,
    pub height: u32,
    /// One string per row, `#` is solid and anything else is walkable.
    pub rows: Vec<String>,
    #[serde(default)]
    pub water: Vec<TileRect>,
    #[serde(default)]
    pub props: Vec<PropDef>,
    #[serde(default)]
    pub objects: Vec<ObjectDef>,
    #[serde(default)]
    pub npcs: Vec<NpcDef>,
    pub spawn: TileCoord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropDef {
    pub kind: PropKind,
    pub x: u32,
    pub y: u32,
    #[serde(default)]
    pub emissive: bool,
    #[serde(default)]
    pub color: Option<HexColor>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectDef {
    pub id: String,
    pub name: String,
    pub x: u32,
    pub y: u32,
    pub panel: ObjectKind,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NpcDef {
    pub name: String,
    pub x: u32,
    pub y: u32,
    #[serde(default)]
    pub facing: Facing,
    #[serde(default)]
    pub palette: PalettePatchDef,
    #[serde(default)]
    pub dialogue: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PalettePatchDef {
    pub hair: Option<HexColor>,
    pub hair_hi: Option<HexColor>,
    pub skin: Option<HexColor>,
    pub skin_hi: Option<HexColor>,
    pub outline: Option<HexColor>,
    pub eye: Option<HexColor>,
    pub outfit: Option<HexColor>,
    pub outfit_hi: Option<HexColor>,
    pub trim: Option<HexColor>,
    pub boot: Option<HexColor>,
    pub scarf: Option<HexColor>,
}

impl From<PalettePatchDef> for PalettePatch {
    fn from(def: PalettePatchDef) -> Self {
        let color = |value: Option<HexColor>| value.map(|hex| hex.0);
        PalettePatch {
            hair: color(def.hair),
            hair_hi: color(def.hair_hi),
            skin: color(def.skin),
            skin_hi: color(def.skin_hi),
            outline: color(def.outline),
            eye: color(def.eye),
            outfit: color(def.outfit),
            outfit_hi: color(def.outfit_hi),
            trim: color(def.trim),
            boot: color(def.boot),
            scarf: color(def.scarf),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct HexColor(pub Rgba);

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        parse_hex_color(&raw)
            .map(HexColor)
            .ok_or_else(|| format!("invalid hex colour '{raw}'"))
    }
}
