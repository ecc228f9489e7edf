use tracing::{debug, info};

use super::camera::Camera;
use super::entity::{update_idle, Entity, Facing};
use super::geometry::Vec2;
use super::input::InputSnapshot;
use super::interaction::{anchor_tile, detect, InteractionTarget, INTERACTION_RADIUS};
use super::motion::{step_player, MotionOutcome, MoveIntent};
use super::ui::UiCollaborator;
use super::world::{TileWorld, TILE_SIZE};

/// Longest step the simulation will integrate in one tick, in seconds.
pub const MAX_FRAME_DT: f32 = 0.05;
pub const INTERACT_KEY_LABEL: &str = "E";

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    pub dt: f32,
    pub motion: MotionOutcome,
    pub target: InteractionTarget,
    pub committed: Option<InteractionTarget>,
    pub modal_open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSnapshot {
    pub tick_count: u64,
    pub elapsed: f32,
    pub player_position: Vec2,
    pub player_tile: (i32, i32),
    pub facing: Facing,
    pub camera_position: Vec2,
    pub zoom: f32,
    pub camera_policy: &'static str,
    pub target: InteractionTarget,
}

/// Everything one running scene owns. Threaded explicitly through tick and compose.
#[derive(Debug, Clone)]
pub struct SimulationState {
    world: TileWorld,
    player: Entity,
    npcs: Vec<Entity>,
    camera: Camera,
    elapsed: f32,
    tick_count: u64,
    interaction: InteractionTarget,
}

impl SimulationState {
    pub fn new(world: TileWorld, mut camera: Camera) -> Self {
        let player = Entity::player(world.spawn_point());
        let npcs = world.npc_spawns().iter().map(Entity::npc).collect();
        camera.snap_to(&player, world.pixel_size());
        Self {
            world,
            player,
            npcs,
            camera,
            elapsed: 0.0,
            tick_count: 0,
            interaction: InteractionTarget::None,
        }
    }

    pub fn world(&self) -> &TileWorld {
        &self.world
    }

    pub fn player(&self) -> &Entity {
        &self.player
    }

    pub fn npcs(&self) -> &[Entity] {
        &self.npcs
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn interaction(&self) -> InteractionTarget {
        self.interaction
    }

    pub fn tick(
        &mut self,
        dt: f32,
        input: &InputSnapshot,
        ui: &mut dyn UiCollaborator,
    ) -> TickReport {
        let dt = sanitize_dt(dt);
        let mut report = TickReport {
            dt,
            ..TickReport::default()
        };

        if input.cancel_pressed() {
            ui.close_modal();
        }

        if self.camera.apply_zoom_steps(input.zoom_delta_steps()) {
            debug!(zoom = self.camera.zoom(), "camera_zoom_changed");
        }

        let modal_open = ui.is_modal_open();
        if modal_open {
            update_idle(&mut self.player, dt);
            if input.interact_pressed() {
                ui.advance_modal();
            }
            ui.hide_interaction_prompt();
        } else {
            report.motion = step_player(
                &mut self.player,
                &self.world,
                MoveIntent::from_input(input),
                dt,
            );
        }

        for npc in &mut self.npcs {
            update_idle(npc, dt);
        }

        let target = detect(&self.world, self.player.position, INTERACTION_RADIUS);
        if !modal_open {
            match anchor_tile(&self.world, target) {
                Some((tile_x, tile_y)) => {
                    ui.show_interaction_prompt(tile_x, tile_y, INTERACT_KEY_LABEL)
                }
                None => ui.hide_interaction_prompt(),
            }
            if input.interact_pressed() && self.commit(target, ui) {
                report.committed = Some(target);
                ui.hide_interaction_prompt();
            }
        }
        if target != self.interaction {
            debug!(target = ?target, "interaction_target_changed");
        }
        self.interaction = target;

        self.camera
            .update(&self.player, self.world.pixel_size(), dt);
        ui.update(dt);

        self.elapsed += dt;
        self.tick_count = self.tick_count.saturating_add(1);
        report.target = target;
        report.modal_open = ui.is_modal_open();
        report
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        let position = self.player.position;
        SimulationSnapshot {
            tick_count: self.tick_count,
            elapsed: self.elapsed,
            player_position: position,
            player_tile: (
                (position.x / TILE_SIZE).floor() as i32,
                (position.y / TILE_SIZE).floor() as i32,
            ),
            facing: self.player.facing,
            camera_position: self.camera.position,
            zoom: self.camera.zoom(),
            camera_policy: self.camera.policy.label(),
            target: self.interaction,
        }
    }

    fn commit(&self, target: InteractionTarget, ui: &mut dyn UiCollaborator) -> bool {
        match target {
            InteractionTarget::Npc(index) => {
                let Some(npc) = self.world.npc_spawns().get(index) else {
                    return false;
                };
                info!(kind = "npc", name = %npc.name, lines = npc.dialogue.len(), "interaction_committed");
                ui.open_dialogue(&npc.name, &npc.dialogue);
                true
            }
            InteractionTarget::Object(index) => {
                let Some(object) = self.world.objects().get(index) else {
                    return false;
                };
                info!(kind = object.kind.token(), id = %object.id, "interaction_committed");
                ui.open_object_panel(object);
                true
            }
            InteractionTarget::None => false,
        }
    }
}

fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_nan() {
        return 0.0;
    }
    dt.clamp(0.0, MAX_FRAME_DT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::camera::CameraPolicy;
    use crate::app::input::InputAction;
    use crate::app::motion::PLAYER_SPEED;
    use crate::app::palette::PalettePatch;
    use crate::app::world::{
        AboutPanel, NpcSpawn, ObjectKind, PointOfInterest, TileWorldLayout,
    };
    use crate::app::NullUi;

    #[derive(Debug, Default)]
    struct RecordingUi {
        modal_open: bool,
        calls: Vec<String>,
    }

    impl UiCollaborator for RecordingUi {
        fn is_modal_open(&self) -> bool {
            self.modal_open
        }

        fn show_interaction_prompt(&mut self, tile_x: u32, tile_y: u32, key_label: &str) {
            self.calls.push(format!("prompt {tile_x},{tile_y} {key_label}"));
        }

        fn hide_interaction_prompt(&mut self) {
            self.calls.push("hide".to_string());
        }

        fn open_object_panel(&mut self, object: &PointOfInterest) {
            self.modal_open = true;
            self.calls.push(format!("panel {}", object.id));
        }

        fn open_dialogue(&mut self, name: &str, lines: &[String]) {
            self.modal_open = true;
            self.calls.push(format!("dialogue {name} {}", lines.len()));
        }

        fn show_transient_message(&mut self, text: &str) {
            self.calls.push(format!("toast {text}"));
        }

        fn close_modal(&mut self) {
            self.modal_open = false;
            self.calls.push("close".to_string());
        }

        fn advance_modal(&mut self) {
            self.calls.push("advance".to_string());
        }
    }

    fn open_world(objects: Vec<PointOfInterest>, npc_spawns: Vec<NpcSpawn>) -> TileWorld {
        open_world_with_spawn(objects, npc_spawns, Vec2::new(5.0 * 16.0 + 8.0, 20.0 * 16.0 + 8.0))
    }

    fn open_world_with_spawn(
        objects: Vec<PointOfInterest>,
        npc_spawns: Vec<NpcSpawn>,
        spawn_point: Vec2,
    ) -> TileWorld {
        let (width, height) = (60u32, 40u32);
        TileWorld::new(TileWorldLayout {
            width,
            height,
            solids: vec![false; (width * height) as usize],
            objects,
            npc_spawns,
            spawn_point,
            ..TileWorldLayout::default()
        })
        .expect("world")
    }

    fn sign_at(tile_x: u32, tile_y: u32) -> PointOfInterest {
        PointOfInterest {
            id: "about".to_string(),
            name: "Sam".to_string(),
            tile_x,
            tile_y,
            kind: ObjectKind::About(AboutPanel {
                title: "About Sam".to_string(),
                text: "hello".to_string(),
                tags: Vec::new(),
            }),
        }
    }

    fn state(world: TileWorld) -> SimulationState {
        SimulationState::new(world, Camera::new(640, 360, 2.0, CameraPolicy::dead_zone()))
    }

    #[test]
    fn holding_right_advances_by_speed_times_time() {
        let mut sim = state(open_world(Vec::new(), Vec::new()));
        let spawn = sim.player().position;
        let input = InputSnapshot::empty().with_action_down(InputAction::MoveRight);

        for _ in 0..64 {
            sim.tick(1.0 / 64.0, &input, &mut NullUi);
        }

        assert!((sim.player().position.x - (spawn.x + PLAYER_SPEED)).abs() < 1e-3);
        assert_eq!(sim.player().position.y, spawn.y);
        assert_eq!(sim.player().facing, Facing::Right);
    }

    #[test]
    fn long_hold_is_clamped_to_world_bounds() {
        let mut sim = state(open_world(Vec::new(), Vec::new()));
        let input = InputSnapshot::empty().with_action_down(InputAction::MoveRight);
        for _ in 0..2000 {
            sim.tick(MAX_FRAME_DT, &input, &mut NullUi);
        }
        // Blocked by the sealed border before the hard clamp matters.
        let limit = 59.0 * TILE_SIZE - 6.0;
        assert!(sim.player().position.x <= limit);
        assert!(sim.player().position.x > limit - 3.0);
    }

    #[test]
    fn huge_dt_is_clamped_and_nan_is_zero() {
        let mut sim = state(open_world(Vec::new(), Vec::new()));
        let input = InputSnapshot::empty().with_action_down(InputAction::MoveRight);
        let spawn_x = sim.player().position.x;

        let report = sim.tick(3.0, &input, &mut NullUi);
        assert_eq!(report.dt, MAX_FRAME_DT);
        assert!((sim.player().position.x - (spawn_x + PLAYER_SPEED * MAX_FRAME_DT)).abs() < 1e-3);

        let before = sim.player().position;
        let report = sim.tick(f32::NAN, &input, &mut NullUi);
        assert_eq!(report.dt, 0.0);
        assert_eq!(sim.player().position, before);
    }

    #[test]
    fn modal_freezes_player_and_pages_on_interact() {
        let mut sim = state(open_world(Vec::new(), Vec::new()));
        let mut ui = RecordingUi {
            modal_open: true,
            ..RecordingUi::default()
        };
        let spawn = sim.player().position;
        let input = InputSnapshot::empty()
            .with_action_down(InputAction::MoveRight)
            .with_interact_pressed();

        let report = sim.tick(0.05, &input, &mut ui);

        assert_eq!(sim.player().position, spawn);
        assert!(report.modal_open);
        assert!(report.committed.is_none());
        assert_eq!(ui.calls, vec!["advance".to_string(), "hide".to_string()]);
    }

    #[test]
    fn cancel_closes_modal_before_movement() {
        let mut sim = state(open_world(Vec::new(), Vec::new()));
        let mut ui = RecordingUi {
            modal_open: true,
            ..RecordingUi::default()
        };
        let spawn = sim.player().position;
        let input = InputSnapshot::empty()
            .with_action_down(InputAction::MoveRight)
            .with_cancel_pressed();

        sim.tick(0.05, &input, &mut ui);

        assert_eq!(ui.calls.first().map(String::as_str), Some("close"));
        assert!(sim.player().position.x > spawn.x);
    }

    #[test]
    fn prompt_and_commit_agree_on_npc_priority() {
        let npc = NpcSpawn {
            tile_x: 6,
            tile_y: 20,
            facing: Facing::Left,
            palette: PalettePatch::default(),
            name: "Ivy".to_string(),
            dialogue: vec!["Hi".to_string(), "Bye".to_string()],
        };
        // 6 px from the sign, 10 px from Ivy.
        let spawn = Vec2::new(94.0, 328.0);
        let mut sim = state(open_world_with_spawn(vec![sign_at(5, 20)], vec![npc], spawn));
        let mut ui = RecordingUi::default();

        let report = sim.tick(0.0, &InputSnapshot::empty(), &mut ui);
        assert_eq!(report.target, InteractionTarget::Npc(0));
        assert_eq!(ui.calls, vec!["prompt 6,20 E".to_string()]);

        ui.calls.clear();
        let report = sim.tick(0.0, &InputSnapshot::empty().with_interact_pressed(), &mut ui);
        assert_eq!(report.committed, Some(InteractionTarget::Npc(0)));
        assert!(ui.calls.contains(&"dialogue Ivy 2".to_string()));
        assert!(report.modal_open);
    }

    #[test]
    fn interact_with_nothing_in_range_commits_nothing() {
        let mut sim = state(open_world(vec![sign_at(30, 30)], Vec::new()));
        let mut ui = RecordingUi::default();
        let report = sim.tick(0.016, &InputSnapshot::empty().with_interact_pressed(), &mut ui);
        assert!(report.committed.is_none());
        assert!(!ui.modal_open);
        assert_eq!(ui.calls, vec!["hide".to_string()]);
    }

    #[test]
    fn object_commit_opens_panel() {
        let mut sim = state(open_world(vec![sign_at(5, 20)], Vec::new()));
        let mut ui = RecordingUi::default();
        let report = sim.tick(0.016, &InputSnapshot::empty().with_interact_pressed(), &mut ui);
        assert_eq!(report.committed, Some(InteractionTarget::Object(0)));
        assert!(ui.calls.contains(&"panel about".to_string()));
    }

    #[test]
    fn npcs_idle_in_place_and_snapshot_reports_state() {
        let npc = NpcSpawn {
            tile_x: 20,
            tile_y: 10,
            facing: Facing::Up,
            palette: PalettePatch::default(),
            name: "Ivy".to_string(),
            dialogue: Vec::new(),
        };
        let mut sim = state(open_world(Vec::new(), vec![npc]));
        let home = sim.npcs()[0].position;
        for _ in 0..10 {
            sim.tick(0.05, &InputSnapshot::empty(), &mut NullUi);
        }
        assert_eq!(sim.npcs()[0].position, home);
        assert!((sim.npcs()[0].animation_clock - 0.25).abs() < 1e-4);

        let snapshot = sim.snapshot();
        assert_eq!(snapshot.tick_count, 10);
        assert_eq!(snapshot.player_tile, (5, 20));
        assert_eq!(snapshot.camera_policy, "deadzone");
    }

    #[test]
    fn zoom_steps_reach_camera() {
        let mut sim = state(open_world(Vec::new(), Vec::new()));
        sim.tick(0.016, &InputSnapshot::empty().with_zoom_delta_steps(2), &mut NullUi);
        assert_eq!(sim.camera().zoom(), 2.5);
    }
}
