use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use super::entity::Facing;
use super::geometry::Vec2;
use super::palette::{PalettePatch, Rgba};

/// Edge length of one tile in world pixels.
pub const TILE_SIZE: f32 = 16.0;

/// Smallest grid that still has a walkable interior inside the sealed ring.
pub const MIN_WORLD_TILES: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TileRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl TileRect {
    pub fn contains(&self, tile_x: i32, tile_y: i32) -> bool {
        let (x, y) = (i64::from(tile_x), i64::from(tile_y));
        x >= i64::from(self.x)
            && y >= i64::from(self.y)
            && x < i64::from(self.x) + i64::from(self.width)
            && y < i64::from(self.y) + i64::from(self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropKind {
    Tree,
    Lantern,
    Bench,
    Rock,
    Flower,
    Sign,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prop {
    pub kind: PropKind,
    pub tile_x: u32,
    pub tile_y: u32,
    pub emissive: bool,
    pub color: Option<Rgba>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AboutPanel {
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Skill {
    pub name: String,
    pub level: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SkillsPanel {
    pub title: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GalleryItem {
    pub title: String,
    pub image: String,
    #[serde(default)]
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GalleryPanel {
    pub title: String,
    #[serde(default)]
    pub items: Vec<GalleryItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectsPanel {
    pub title: String,
    #[serde(default)]
    pub items: Vec<ProjectItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContactLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContactPanel {
    pub title: String,
    pub email: String,
    #[serde(default)]
    pub links: Vec<ContactLink>,
}

/// Closed set of point-of-interest kinds, each with the payload its panel shows.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectKind {
    About(AboutPanel),
    Skills(SkillsPanel),
    Gallery(GalleryPanel),
    Projects(ProjectsPanel),
    Contact(ContactPanel),
}

impl ObjectKind {
    pub fn title(&self) -> &str {
        match self {
            ObjectKind::About(panel) => &panel.title,
            ObjectKind::Skills(panel) => &panel.title,
            ObjectKind::Gallery(panel) => &panel.title,
            ObjectKind::Projects(panel) => &panel.title,
            ObjectKind::Contact(panel) => &panel.title,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            ObjectKind::About(_) => "about",
            ObjectKind::Skills(_) => "skills",
            ObjectKind::Gallery(_) => "gallery",
            ObjectKind::Projects(_) => "projects",
            ObjectKind::Contact(_) => "contact",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointOfInterest {
    pub id: String,
    pub name: String,
    pub tile_x: u32,
    pub tile_y: u32,
    pub kind: ObjectKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpcSpawn {
    pub tile_x: u32,
    pub tile_y: u32,
    pub facing: Facing,
    pub palette: PalettePatch,
    pub name: String,
    pub dialogue: Vec<String>,
}

/// Everything needed to build a [`TileWorld`]. `solids` is row-major, `width * height` long.
#[derive(Debug, Clone, Default)]
pub struct TileWorldLayout {
    pub width: u32,
    pub height: u32,
    pub solids: Vec<bool>,
    pub water_regions: Vec<TileRect>,
    pub props: Vec<Prop>,
    pub objects: Vec<PointOfInterest>,
    pub npc_spawns: Vec<NpcSpawn>,
    pub spawn_point: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TileWorldError {
    #[error("world must be at least {min}x{min} tiles, got {width}x{height}")]
    TooSmall { width: u32, height: u32, min: u32 },
    #[error("solid count mismatch: expected {expected}, got {actual}")]
    SolidCountMismatch { expected: usize, actual: usize },
}

/// Static collision grid plus the placed content of one world.
///
/// Immutable after construction. The outer ring of tiles is always solid and
/// every query outside the grid reports solid / no match.
#[derive(Debug, Clone)]
pub struct TileWorld {
    width: u32,
    height: u32,
    solids: Vec<bool>,
    water_regions: Vec<TileRect>,
    props: Vec<Prop>,
    objects: Vec<PointOfInterest>,
    npc_spawns: Vec<NpcSpawn>,
    spawn_point: Vec2,
}

impl TileWorld {
    pub fn new(layout: TileWorldLayout) -> Result<Self, TileWorldError> {
        let TileWorldLayout {
            width,
            height,
            mut solids,
            water_regions,
            props,
            objects,
            npc_spawns,
            spawn_point,
        } = layout;

        if width < MIN_WORLD_TILES || height < MIN_WORLD_TILES {
            return Err(TileWorldError::TooSmall {
                width,
                height,
                min: MIN_WORLD_TILES,
            });
        }
        let expected = width as usize * height as usize;
        if solids.len() != expected {
            return Err(TileWorldError::SolidCountMismatch {
                expected,
                actual: solids.len(),
            });
        }

        let sealed = seal_outer_ring(&mut solids, width, height);
        if sealed > 0 {
            warn!(sealed, width, height, "world_border_sealed");
        }

        let world = Self {
            width,
            height,
            solids,
            water_regions,
            props,
            objects,
            npc_spawns,
            spawn_point,
        };
        world.warn_on_blocked_placements();
        Ok(world)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// World extent in pixels.
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * TILE_SIZE,
            self.height as f32 * TILE_SIZE,
        )
    }

    pub fn spawn_point(&self) -> Vec2 {
        self.spawn_point
    }

    pub fn water_regions(&self) -> &[TileRect] {
        &self.water_regions
    }

    pub fn props(&self) -> &[Prop] {
        &self.props
    }

    pub fn objects(&self) -> &[PointOfInterest] {
        &self.objects
    }

    pub fn npc_spawns(&self) -> &[NpcSpawn] {
        &self.npc_spawns
    }

    pub fn tile_center(tile_x: u32, tile_y: u32) -> Vec2 {
        Vec2::new(
            tile_x as f32 * TILE_SIZE + TILE_SIZE * 0.5,
            tile_y as f32 * TILE_SIZE + TILE_SIZE * 0.5,
        )
    }

    /// World-pixel query. A point exactly on a tile edge belongs to the tile it enters.
    pub fn is_solid(&self, world_x: f32, world_y: f32) -> bool {
        if !world_x.is_finite() || !world_y.is_finite() {
            return true;
        }
        let tile_x = (world_x / TILE_SIZE).floor();
        let tile_y = (world_y / TILE_SIZE).floor();
        if tile_x < i32::MIN as f32 || tile_x > i32::MAX as f32 {
            return true;
        }
        if tile_y < i32::MIN as f32 || tile_y > i32::MAX as f32 {
            return true;
        }
        self.is_solid_tile(tile_x as i32, tile_y as i32)
    }

    pub fn is_solid_tile(&self, tile_x: i32, tile_y: i32) -> bool {
        match self.index_of(tile_x, tile_y) {
            Some(index) => self.solids[index],
            None => true,
        }
    }

    pub fn is_water_tile(&self, tile_x: i32, tile_y: i32) -> bool {
        self.water_regions
            .iter()
            .any(|region| region.contains(tile_x, tile_y))
    }

    pub fn objects_near(&self, point: Vec2, radius: f32) -> Option<&PointOfInterest> {
        self.nearest_object_index(point, radius)
            .map(|index| &self.objects[index])
    }

    pub fn npcs_near(&self, point: Vec2, radius: f32) -> Option<&NpcSpawn> {
        self.nearest_npc_where(point, radius, |_| true)
            .map(|index| &self.npc_spawns[index])
    }

    pub fn nearest_object_index(&self, point: Vec2, radius: f32) -> Option<usize> {
        nearest_index(
            &self.objects,
            |object| Self::tile_center(object.tile_x, object.tile_y),
            point,
            radius,
            |_| true,
        )
    }

    pub fn nearest_npc_where(
        &self,
        point: Vec2,
        radius: f32,
        keep: impl Fn(&NpcSpawn) -> bool,
    ) -> Option<usize> {
        nearest_index(
            &self.npc_spawns,
            |npc| Self::tile_center(npc.tile_x, npc.tile_y),
            point,
            radius,
            keep,
        )
    }

    fn index_of(&self, tile_x: i32, tile_y: i32) -> Option<usize> {
        if tile_x < 0 || tile_y < 0 {
            return None;
        }
        let (x, y) = (tile_x as u32, tile_y as u32);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    // Content defects are reported, not rejected: the scene still loads.
    fn warn_on_blocked_placements(&self) {
        for prop in &self.props {
            if self.is_solid_tile(prop.tile_x as i32, prop.tile_y as i32) {
                warn!(kind = ?prop.kind, tile_x = prop.tile_x, tile_y = prop.tile_y, "prop_on_solid_tile");
            }
        }
        for object in &self.objects {
            if self.is_solid_tile(object.tile_x as i32, object.tile_y as i32) {
                warn!(id = %object.id, tile_x = object.tile_x, tile_y = object.tile_y, "object_on_solid_tile");
            }
        }
        for npc in &self.npc_spawns {
            if self.is_solid_tile(npc.tile_x as i32, npc.tile_y as i32) {
                warn!(name = %npc.name, tile_x = npc.tile_x, tile_y = npc.tile_y, "npc_on_solid_tile");
            }
        }
        if self.is_solid(self.spawn_point.x, self.spawn_point.y) {
            warn!(
                x = self.spawn_point.x,
                y = self.spawn_point.y,
                "spawn_point_on_solid_tile"
            );
        }
    }
}

fn seal_outer_ring(solids: &mut [bool], width: u32, height: u32) -> usize {
    let width = width as usize;
    let height = height as usize;
    let mut sealed = 0;
    for y in 0..height {
        for x in 0..width {
            let on_edge = x == 0 || y == 0 || x == width - 1 || y == height - 1;
            let cell = &mut solids[y * width + x];
            if on_edge && !*cell {
                *cell = true;
                sealed += 1;
            }
        }
    }
    sealed
}

/// Strictly-inside-radius nearest match; earlier entries win ties.
fn nearest_index<T>(
    items: &[T],
    center_of: impl Fn(&T) -> Vec2,
    point: Vec2,
    radius: f32,
    keep: impl Fn(&T) -> bool,
) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, item) in items.iter().enumerate() {
        if !keep(item) {
            continue;
        }
        let distance = center_of(item).distance(point);
        if !(distance < radius) {
            continue;
        }
        if best.map_or(true, |(_, best_distance)| distance < best_distance) {
            best = Some((index, distance));
        }
    }
    best.map(|(index, _)| index)
}
