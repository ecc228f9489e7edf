use super::geometry::Vec2;
use super::world::TileWorld;

/// Reach from the player's centre to an object's or NPC's tile centre, in world pixels.
pub const INTERACTION_RADIUS: f32 = 14.0;

/// Indices point into [`TileWorld::npc_spawns`] and [`TileWorld::objects`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InteractionTarget {
    Npc(usize),
    Object(usize),
    #[default]
    None,
}

impl InteractionTarget {
    pub fn is_none(self) -> bool {
        matches!(self, InteractionTarget::None)
    }
}

/// Serves both the per-tick prompt and the interact commit so they never disagree.
///
/// An NPC with something to say wins over any object in range, even a closer one.
pub fn detect(world: &TileWorld, point: Vec2, radius: f32) -> InteractionTarget {
    if let Some(index) = world.nearest_npc_where(point, radius, |npc| !npc.dialogue.is_empty()) {
        return InteractionTarget::Npc(index);
    }
    match world.nearest_object_index(point, radius) {
        Some(index) => InteractionTarget::Object(index),
        None => InteractionTarget::None,
    }
}

pub fn anchor_tile(world: &TileWorld, target: InteractionTarget) -> Option<(u32, u32)> {
    match target {
        InteractionTarget::Npc(index) => world
            .npc_spawns()
            .get(index)
            .map(|npc| (npc.tile_x, npc.tile_y)),
        InteractionTarget::Object(index) => world
            .objects()
            .get(index)
            .map(|object| (object.tile_x, object.tile_y)),
        InteractionTarget::None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::entity::Facing;
    use crate::app::palette::PalettePatch;
    use crate::app::world::{
        ContactPanel, NpcSpawn, ObjectKind, PointOfInterest, TileWorldLayout,
    };

    fn world_with(npc_dialogue: Vec<String>) -> TileWorld {
        let (width, height) = (10u32, 10u32);
        TileWorld::new(TileWorldLayout {
            width,
            height,
            solids: vec![false; (width * height) as usize],
            objects: vec![PointOfInterest {
                id: "mailbox".to_string(),
                name: "Mailbox".to_string(),
                tile_x: 4,
                tile_y: 4,
                kind: ObjectKind::Contact(ContactPanel {
                    title: "Contact".to_string(),
                    email: "sam@example.com".to_string(),
                    links: Vec::new(),
                }),
            }],
            npc_spawns: vec![NpcSpawn {
                tile_x: 5,
                tile_y: 4,
                facing: Facing::Left,
                palette: PalettePatch::default(),
                name: "Ivy".to_string(),
                dialogue: npc_dialogue,
            }],
            spawn_point: TileWorld::tile_center(2, 2),
            ..TileWorldLayout::default()
        })
        .expect("world")
    }

    #[test]
    fn npc_wins_over_closer_object() {
        let world = world_with(vec!["Hello!".to_string()]);
        // 4 px from the mailbox, 12 px from Ivy.
        let point = TileWorld::tile_center(4, 4) + Vec2::new(4.0, 0.0);
        assert_eq!(detect(&world, point, INTERACTION_RADIUS), InteractionTarget::Npc(0));
        assert_eq!(anchor_tile(&world, InteractionTarget::Npc(0)), Some((5, 4)));
    }

    #[test]
    fn silent_npc_does_not_shadow_object() {
        let world = world_with(Vec::new());
        let point = TileWorld::tile_center(4, 4) + Vec2::new(4.0, 0.0);
        assert_eq!(
            detect(&world, point, INTERACTION_RADIUS),
            InteractionTarget::Object(0)
        );
    }

    #[test]
    fn nothing_in_range_is_none() {
        let world = world_with(vec!["Hello!".to_string()]);
        let target = detect(&world, TileWorld::tile_center(1, 8), INTERACTION_RADIUS);
        assert!(target.is_none());
        assert_eq!(anchor_tile(&world, target), None);
    }
}
