use plaza_engine::app::{
    draw_text, line_height, rgba, text_width, wrap_text, ObjectKind, PointOfInterest, Rgba,
};
use plaza_engine::{FrameBuffer, ScreenProjection, UiCollaborator, Vec2, TILE_SIZE};
use tracing::debug;

const TOAST_MIN_SECONDS: f32 = 1.8;
const TOAST_SECONDS_PER_CHAR: f32 = 0.05;
const TOAST_MAX_SECONDS: f32 = 6.0;
const DIALOGUE_SECONDS_PER_CHAR: f32 = 0.018;
const PANEL_COLUMNS: usize = 60;
const TEXT_SCALE: i32 = 1;
const MODAL_INSET: i32 = 8;
const MODAL_MAX_LINES: usize = 24;
const TOAST_MARGIN: i32 = 8;
const PROMPT_LIFT_PX: f32 = 18.0;
const PROMPT_BOB_PX: f32 = 1.5;
const PROMPT_BOB_HZ: f32 = 1.2;
const DIALOGUE_HEADER: &str = "Conversation";
const PANEL_FOOTER: &str = "E close  -  Esc close";
const DIALOGUE_FOOTER_MORE: &str = "E next  -  Esc close";
const EMPTY_GALLERY_TEXT: &str = "No gallery items yet. Check back soon!";

const MODAL_BG_COLOR: Rgba = rgba(12, 16, 28, 232);
const MODAL_BORDER_COLOR: Rgba = [110, 231, 255, 255];
const TITLE_COLOR: Rgba = [255, 210, 122, 255];
const BODY_COLOR: Rgba = [220, 232, 245, 255];
const DIM_COLOR: Rgba = [140, 160, 184, 255];
const CHIP_BG_COLOR: Rgba = rgba(0, 0, 0, 140);
const CHIP_BORDER_COLOR: Rgba = [74, 92, 120, 255];
const TOAST_TEXT_COLOR: Rgba = [207, 230, 245, 255];

include!("render.rs");

#[derive(Debug, Clone, PartialEq)]
enum Modal {
    Panel {
        title: String,
        lines: Vec<String>,
    },
    /// `revealed` counts the characters of the current page typed out so far.
    Dialogue {
        name: String,
        lines: Vec<String>,
        index: usize,
        revealed: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Prompt {
    tile_x: u32,
    tile_y: u32,
    key_label: String,
}

#[derive(Debug, Clone, PartialEq)]
struct Toast {
    text: String,
    remaining: f32,
}

/// Bitmap-font panels, the interact prompt, a toast and a dialogue pager.
#[derive(Debug, Default)]
pub(crate) struct PanelUi {
    modal: Option<Modal>,
    prompt: Option<Prompt>,
    toast: Option<Toast>,
}

impl PanelUi {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl UiCollaborator for PanelUi {
    fn is_modal_open(&self) -> bool {
        self.modal.is_some()
    }

    fn show_interaction_prompt(&mut self, anchor_tile_x: u32, anchor_tile_y: u32, key_label: &str) {
        self.prompt = Some(Prompt {
            tile_x: anchor_tile_x,
            tile_y: anchor_tile_y,
            key_label: key_label.to_string(),
        });
    }

    fn hide_interaction_prompt(&mut self) {
        self.prompt = None;
    }

    fn open_object_panel(&mut self, object: &PointOfInterest) {
        debug!(id = %object.id, kind = object.kind.token(), "panel_opened");
        self.modal = Some(Modal::Panel {
            title: object.kind.title().to_string(),
            lines: panel_lines(&object.kind),
        });
    }

    fn open_dialogue(&mut self, name: &str, lines: &[String]) {
        if lines.is_empty() {
            return;
        }
        debug!(name, lines = lines.len(), "dialogue_opened");
        self.modal = Some(Modal::Dialogue {
            name: name.to_string(),
            lines: lines.to_vec(),
            index: 0,
            revealed: 0.0,
        });
    }

    fn show_transient_message(&mut self, text: &str) {
        self.toast = Some(Toast {
            text: text.to_string(),
            remaining: toast_duration(text),
        });
    }

    fn close_modal(&mut self) {
        if self.modal.take().is_some() {
            debug!("modal_closed");
        }
    }

    fn advance_modal(&mut self) {
        if let Some(Modal::Dialogue {
            lines,
            index,
            revealed,
            ..
        }) = &mut self.modal
        {
            let page = page_chars(lines, *index);
            if *revealed < page {
                *revealed = page;
                return;
            }
            if *index + 1 < lines.len() {
                *index += 1;
                *revealed = 0.0;
                return;
            }
        }
        self.close_modal();
    }

    fn update(&mut self, dt: f32) {
        if let Some(Modal::Dialogue {
            lines,
            index,
            revealed,
            ..
        }) = &mut self.modal
        {
            let page = page_chars(lines, *index);
            *revealed = (*revealed + dt.max(0.0) / DIALOGUE_SECONDS_PER_CHAR).min(page);
        }
        if let Some(toast) = &mut self.toast {
            toast.remaining -= dt.max(0.0);
            if toast.remaining <= 0.0 {
                self.toast = None;
            }
        }
    }

    fn draw_overlay(&self, frame: &mut FrameBuffer, projection: &ScreenProjection, time_s: f32) {
        if let Some(prompt) = &self.prompt {
            draw_prompt(frame, projection, prompt, time_s);
        }
        if let Some(toast) = &self.toast {
            draw_toast(frame, &toast.text);
        }
        if let Some(modal) = &self.modal {
            draw_modal(frame, modal);
        }
    }
}

fn page_chars(lines: &[String], index: usize) -> f32 {
    lines.get(index).map_or(0, |page| page.chars().count()) as f32
}

fn toast_duration(text: &str) -> f32 {
    (TOAST_MIN_SECONDS + text.chars().count() as f32 * TOAST_SECONDS_PER_CHAR)
        .min(TOAST_MAX_SECONDS)
}

/// Flattens a panel payload into wrapped text lines.
fn panel_lines(kind: &ObjectKind) -> Vec<String> {
    let mut lines = Vec::new();
    match kind {
        ObjectKind::About(panel) => {
            lines.extend(wrap_text(&panel.text, PANEL_COLUMNS));
            if !panel.tags.is_empty() {
                lines.push(String::new());
                lines.extend(wrap_text(&panel.tags.join("  "), PANEL_COLUMNS));
            }
        }
        ObjectKind::Skills(panel) => {
            for skill in &panel.skills {
                lines.push(format!("{} - {}", skill.name, skill.level));
                if !skill.tags.is_empty() {
                    lines.extend(
                        wrap_text(&skill.tags.join(", "), PANEL_COLUMNS - 2)
                            .into_iter()
                            .map(|line| format!("  {line}")),
                    );
                }
            }
        }
        ObjectKind::Gallery(panel) => {
            if panel.items.is_empty() {
                lines.push(EMPTY_GALLERY_TEXT.to_string());
            }
            for item in &panel.items {
                let title = if item.title.is_empty() {
                    "Untitled"
                } else {
                    item.title.as_str()
                };
                lines.extend(wrap_text(&format!("{title} - {}", item.caption), PANEL_COLUMNS));
            }
        }
        ObjectKind::Projects(panel) => {
            for (position, item) in panel.items.iter().enumerate() {
                if position > 0 {
                    lines.push(String::new());
                }
                lines.push(item.title.clone());
                lines.extend(
                    wrap_text(&item.description, PANEL_COLUMNS)
                        .into_iter()
                        .filter(|line| !line.is_empty()),
                );
                if let Some(link) = &item.link {
                    lines.push(format!("Open: {link}"));
                }
            }
        }
        ObjectKind::Contact(panel) => {
            lines.push(format!("Email: {}", panel.email));
            for link in &panel.links {
                lines.push(format!("{}: {}", link.label, link.url));
            }
        }
    }
    lines.truncate(MODAL_MAX_LINES);
    lines
}
