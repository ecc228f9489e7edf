    use super::*;
    use plaza_engine::app::{
        AboutPanel, ContactLink, ContactPanel, GalleryItem, GalleryPanel, ProjectItem, ProjectsPanel,
        Skill, SkillsPanel,
    };
    use plaza_engine::{
        load_world_str, Camera, CameraPolicy, InputAction, InputSnapshot, SimulationState,
    };

    const SIGN_WORLD: &str = r########"{
        "width": 6,
        "height": 4,
        "rows": ["######", "#....#", "#....#", "######"],
        "objects": [{
            "id": "about",
            "name": "Sign",
            "x": 1,
            "y": 1,
            "panel": { "type": "about", "title": "About Me", "text": "Hello there." }
        }],
        "spawn": { "x": 1, "y": 1 }
    }"########;

    const NPC_WORLD: &str = r########"{
        "width": 6,
        "height": 4,
        "rows": ["######", "#....#", "#....#", "######"],
        "npcs": [{ "name": "Mika", "x": 2, "y": 2, "dialogue": ["Hi!", "Nice night."] }],
        "spawn": { "x": 2, "y": 2 }
    }"########;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|line| line.to_string()).collect()
    }

    fn sign(kind: ObjectKind) -> PointOfInterest {
        PointOfInterest {
            id: kind.token().to_string(),
            name: "Sign".to_string(),
            tile_x: 3,
            tile_y: 3,
            kind,
        }
    }

    fn simulation(raw: &str) -> SimulationState {
        let world = load_world_str(raw).expect("world");
        SimulationState::new(world, Camera::new(320, 180, 2.0, CameraPolicy::dead_zone()))
    }

    fn interact() -> InputSnapshot {
        InputSnapshot::empty().with_interact_pressed()
    }

    #[test]
    fn dialogue_pages_then_closes() {
        let mut ui = PanelUi::new();
        ui.open_dialogue("Mika", &lines(&["one", "two"]));
        assert!(ui.is_modal_open());

        ui.update(1.0);
        ui.advance_modal();
        assert!(matches!(ui.modal, Some(Modal::Dialogue { index: 1, .. })));

        ui.update(1.0);
        ui.advance_modal();
        assert!(!ui.is_modal_open());
    }

    #[test]
    fn dialogue_types_out_over_time() {
        let mut ui = PanelUi::new();
        ui.open_dialogue("Mika", &lines(&["Nice night."]));
        assert!(matches!(ui.modal, Some(Modal::Dialogue { revealed, .. }) if revealed == 0.0));

        ui.update(DIALOGUE_SECONDS_PER_CHAR * 4.5);
        let Some(modal) = &ui.modal else {
            panic!("dialogue closed early");
        };
        assert!(modal_lines(modal).iter().any(|(text, _)| text == "Nice"));

        ui.update(10.0);
        assert!(matches!(ui.modal, Some(Modal::Dialogue { revealed, .. }) if revealed == 11.0));
    }

    #[test]
    fn advance_finishes_a_partial_line_before_paging() {
        let mut ui = PanelUi::new();
        ui.open_dialogue("Mika", &lines(&["Hello there", "Bye"]));
        ui.update(DIALOGUE_SECONDS_PER_CHAR * 2.0);

        ui.advance_modal();
        assert!(matches!(
            ui.modal,
            Some(Modal::Dialogue { index: 0, revealed, .. }) if revealed == 11.0
        ));

        ui.advance_modal();
        assert!(matches!(
            ui.modal,
            Some(Modal::Dialogue { index: 1, revealed, .. }) if revealed == 0.0
        ));
    }

    #[test]
    fn empty_dialogue_never_opens() {
        let mut ui = PanelUi::new();
        ui.open_dialogue("Kai", &[]);
        assert!(!ui.is_modal_open());
    }

    #[test]
    fn panel_closes_on_first_advance() {
        let mut ui = PanelUi::new();
        ui.open_object_panel(&sign(ObjectKind::About(AboutPanel {
            title: "About".to_string(),
            text: "Hi".to_string(),
            tags: Vec::new(),
        })));
        assert!(ui.is_modal_open());
        ui.advance_modal();
        assert!(!ui.is_modal_open());
    }

    #[test]
    fn close_modal_is_idempotent() {
        let mut ui = PanelUi::new();
        ui.close_modal();
        ui.open_dialogue("Mika", &lines(&["one"]));
        ui.close_modal();
        ui.close_modal();
        assert!(!ui.is_modal_open());
    }

    #[test]
    fn toast_expires_after_its_duration() {
        let mut ui = PanelUi::new();
        ui.show_transient_message("Saved");
        let duration = toast_duration("Saved");
        assert!(duration >= TOAST_MIN_SECONDS);

        ui.update(duration * 0.5);
        assert!(ui.toast.is_some());
        ui.update(duration);
        assert!(ui.toast.is_none());
    }

    #[test]
    fn long_toasts_are_capped() {
        let text = "x".repeat(500);
        assert_eq!(toast_duration(&text), TOAST_MAX_SECONDS);
    }

    #[test]
    fn prompt_tracks_latest_anchor() {
        let mut ui = PanelUi::new();
        ui.show_interaction_prompt(4, 5, "E");
        ui.show_interaction_prompt(7, 2, "E");
        assert_eq!(
            ui.prompt,
            Some(Prompt {
                tile_x: 7,
                tile_y: 2,
                key_label: "E".to_string()
            })
        );
        ui.hide_interaction_prompt();
        assert!(ui.prompt.is_none());
    }

    #[test]
    fn skills_list_level_and_tags() {
        let lines = panel_lines(&ObjectKind::Skills(SkillsPanel {
            title: "Skills".to_string(),
            skills: vec![Skill {
                name: "Rust".to_string(),
                level: "Advanced".to_string(),
                tags: vec!["systems".to_string(), "wasm".to_string()],
            }],
        }));
        assert_eq!(lines, vec!["Rust - Advanced".to_string(), "  systems, wasm".to_string()]);
    }

    #[test]
    fn empty_gallery_shows_placeholder_text() {
        let lines = panel_lines(&ObjectKind::Gallery(GalleryPanel {
            title: "Gallery".to_string(),
            items: Vec::new(),
        }));
        assert_eq!(lines, vec![EMPTY_GALLERY_TEXT.to_string()]);

        let lines = panel_lines(&ObjectKind::Gallery(GalleryPanel {
            title: "Gallery".to_string(),
            items: vec![GalleryItem {
                title: String::new(),
                image: "a.png".to_string(),
                caption: "Dusk".to_string(),
            }],
        }));
        assert_eq!(lines, vec!["Untitled - Dusk".to_string()]);
    }

    #[test]
    fn projects_and_contact_show_links() {
        let lines = panel_lines(&ObjectKind::Projects(ProjectsPanel {
            title: "Projects".to_string(),
            items: vec![ProjectItem {
                title: "Plaza".to_string(),
                description: "A night walk.".to_string(),
                link: Some("https://example.com".to_string()),
            }],
        }));
        assert_eq!(
            lines,
            vec![
                "Plaza".to_string(),
                "A night walk.".to_string(),
                "Open: https://example.com".to_string()
            ]
        );

        let lines = panel_lines(&ObjectKind::Contact(ContactPanel {
            title: "Contact".to_string(),
            email: "sam@example.com".to_string(),
            links: vec![ContactLink {
                label: "GitHub".to_string(),
                url: "#".to_string(),
            }],
        }));
        assert_eq!(
            lines,
            vec!["Email: sam@example.com".to_string(), "GitHub: #".to_string()]
        );
    }

    #[test]
    fn long_about_text_is_wrapped_and_capped() {
        let lines = panel_lines(&ObjectKind::About(AboutPanel {
            title: "About".to_string(),
            text: "word ".repeat(400),
            tags: Vec::new(),
        }));
        assert_eq!(lines.len(), MODAL_MAX_LINES);
        assert!(lines.iter().all(|line| line.chars().count() <= PANEL_COLUMNS));
    }

    #[test]
    fn dialogue_footer_switches_on_last_page() {
        let mut modal = Modal::Dialogue {
            name: "Mika".to_string(),
            lines: lines(&["one", "two"]),
            index: 0,
            revealed: 3.0,
        };
        let footer = |modal: &Modal| modal_lines(modal).last().map(|(text, _)| text.clone());
        assert_eq!(footer(&modal).as_deref(), Some(DIALOGUE_FOOTER_MORE));

        if let Modal::Dialogue { index, revealed, .. } = &mut modal {
            *index = 1;
            *revealed = 0.0;
        }
        assert_eq!(footer(&modal).as_deref(), Some(PANEL_FOOTER));
    }

    #[test]
    fn overlay_draws_only_when_something_is_showing() {
        let projection = ScreenProjection::new(Vec2::ZERO, 2.0);
        let blank = FrameBuffer::new(320, 180);

        let mut frame = FrameBuffer::new(320, 180);
        PanelUi::new().draw_overlay(&mut frame, &projection, 0.0);
        assert_eq!(frame.as_bytes(), blank.as_bytes());

        let mut ui = PanelUi::new();
        ui.show_interaction_prompt(3, 3, "E");
        ui.show_transient_message("Hello");
        ui.open_dialogue("Mika", &lines(&["Hi!"]));
        ui.draw_overlay(&mut frame, &projection, 0.0);
        assert_ne!(frame.as_bytes(), blank.as_bytes());
        assert_ne!(frame.pixel(160, 90), Some([0, 0, 0, 0]));
    }

    #[test]
    fn toast_sits_in_bottom_left_corner() {
        let mut frame = FrameBuffer::new(320, 180);
        draw_toast(&mut frame, "Hi");
        let bottom = 180 - TOAST_MARGIN - 1;
        assert_eq!(frame.pixel(TOAST_MARGIN, bottom), Some(CHIP_BORDER_COLOR));
        assert_eq!(frame.pixel(319, bottom), Some([0, 0, 0, 0]));
    }

    #[test]
    fn prompt_off_screen_is_skipped() {
        let mut frame = FrameBuffer::new(64, 64);
        let projection = ScreenProjection::new(Vec2::new(1000.0, 1000.0), 1.0);
        let prompt = Prompt {
            tile_x: 0,
            tile_y: 0,
            key_label: "E".to_string(),
        };
        draw_prompt(&mut frame, &projection, &prompt, 0.0);
        assert_eq!(frame.as_bytes(), FrameBuffer::new(64, 64).as_bytes());
    }

    #[test]
    fn interacting_with_a_sign_opens_its_panel_and_freezes_the_player() {
        let mut sim = simulation(SIGN_WORLD);
        let mut ui = PanelUi::new();

        let report = sim.tick(1.0 / 60.0, &interact(), &mut ui);
        assert!(report.committed.is_some());
        assert!(matches!(&ui.modal, Some(Modal::Panel { title, .. }) if title == "About Me"));
        assert!(ui.prompt.is_none());

        let frozen = sim.player().position;
        let walk = InputSnapshot::empty().with_action_down(InputAction::MoveRight);
        for _ in 0..10 {
            sim.tick(1.0 / 60.0, &walk, &mut ui);
        }
        assert_eq!(sim.player().position, frozen);

        sim.tick(1.0 / 60.0, &interact(), &mut ui);
        assert!(!ui.is_modal_open());
        sim.tick(1.0 / 60.0, &walk, &mut ui);
        assert!(sim.player().position.x > frozen.x);
    }

    #[test]
    fn talking_to_an_npc_pages_through_dialogue() {
        let mut sim = simulation(NPC_WORLD);
        let mut ui = PanelUi::new();

        sim.tick(1.0 / 60.0, &InputSnapshot::empty(), &mut ui);
        assert_eq!(ui.prompt.as_ref().map(|prompt| (prompt.tile_x, prompt.tile_y)), Some((2, 2)));

        sim.tick(1.0 / 60.0, &interact(), &mut ui);
        assert!(matches!(&ui.modal, Some(Modal::Dialogue { name, index: 0, .. }) if name == "Mika"));

        // A press mid-line finishes the line instead of paging.
        sim.tick(1.0 / 60.0, &interact(), &mut ui);
        assert!(matches!(&ui.modal, Some(Modal::Dialogue { index: 0, revealed, .. }) if *revealed == 3.0));

        sim.tick(1.0 / 60.0, &interact(), &mut ui);
        assert!(matches!(&ui.modal, Some(Modal::Dialogue { index: 1, .. })));

        for _ in 0..60 {
            sim.tick(1.0 / 60.0, &InputSnapshot::empty(), &mut ui);
        }
        sim.tick(1.0 / 60.0, &interact(), &mut ui);
        assert!(!ui.is_modal_open());
    }

    #[test]
    fn cancel_closes_dialogue_immediately() {
        let mut sim = simulation(NPC_WORLD);
        let mut ui = PanelUi::new();
        sim.tick(1.0 / 60.0, &interact(), &mut ui);
        assert!(ui.is_modal_open());

        sim.tick(1.0 / 60.0, &InputSnapshot::empty().with_cancel_pressed(), &mut ui);
        assert!(!ui.is_modal_open());
    }
