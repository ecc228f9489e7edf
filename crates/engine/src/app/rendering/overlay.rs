use crate::app::interaction::InteractionTarget;
use crate::app::metrics::LoopMetricsSnapshot;
use crate::app::palette::{rgba, Rgba};
use crate::app::simulation::SimulationSnapshot;

use super::raster::FrameBuffer;
use super::text::{draw_text, line_height, text_width};

const TEXT_SCALE: i32 = 1;
const OVERLAY_PADDING: i32 = 6;
const OVERLAY_PANEL_INSET_X: i32 = 4;
const OVERLAY_PANEL_INSET_Y: i32 = 3;
const OVERLAY_TEXT_PRIMARY_COLOR: Rgba = [244, 248, 252, 255];
const OVERLAY_TEXT_DIM_COLOR: Rgba = [176, 198, 220, 255];
const OVERLAY_PANEL_BG_COLOR: Rgba = rgba(10, 12, 16, 210);
const OVERLAY_PANEL_BORDER_COLOR: Rgba = [92, 106, 126, 255];
const PERF_SECTION_LABEL: &str = "Perf";
const SCENE_SECTION_LABEL: &str = "Scene";

#[derive(Debug, Clone, Copy)]
pub(crate) struct OverlayData {
    pub metrics: LoopMetricsSnapshot,
    pub snapshot: SimulationSnapshot,
    pub render_fps_cap: Option<u32>,
    pub slow_frame_delay_ms: u64,
}

pub(crate) fn draw_overlay(frame: &mut FrameBuffer, data: &OverlayData) {
    if frame.width() == 0 || frame.height() == 0 {
        return;
    }

    let lines = build_overlay_lines(data);
    let advance = line_height(TEXT_SCALE);
    let panel_width = lines
        .iter()
        .map(|line| text_width(line, TEXT_SCALE))
        .max()
        .unwrap_or(0)
        + OVERLAY_PANEL_INSET_X * 2;
    let panel_height = lines.len() as i32 * advance + OVERLAY_PANEL_INSET_Y * 2;
    let panel_left = OVERLAY_PADDING - OVERLAY_PANEL_INSET_X;
    let panel_top = OVERLAY_PADDING - OVERLAY_PANEL_INSET_Y;
    frame.fill_rect(panel_left, panel_top, panel_width, panel_height, OVERLAY_PANEL_BG_COLOR);
    frame.stroke_rect(panel_left, panel_top, panel_width, panel_height, OVERLAY_PANEL_BORDER_COLOR);

    let mut y = OVERLAY_PADDING;
    for line in lines {
        draw_text(frame, OVERLAY_PADDING, y, &line, overlay_line_color(&line), TEXT_SCALE);
        y += advance;
    }
}

fn build_overlay_lines(data: &OverlayData) -> Vec<String> {
    let snapshot = &data.snapshot;
    vec![
        PERF_SECTION_LABEL.to_string(),
        format_fps_line(data.metrics.fps, data.render_fps_cap, data.slow_frame_delay_ms),
        format!(
            "Frame: {:.2} ms worst {:.1}",
            data.metrics.frame_time_ms, data.metrics.worst_frame_ms
        ),
        format!("Ticks: {}", snapshot.tick_count),
        String::new(),
        SCENE_SECTION_LABEL.to_string(),
        format!(
            "Pos: {:.1},{:.1} tile {},{}",
            snapshot.player_position.x,
            snapshot.player_position.y,
            snapshot.player_tile.0,
            snapshot.player_tile.1
        ),
        format!("Facing: {:?}", snapshot.facing),
        format!(
            "Cam: {:.1},{:.1} x{:.2} {}",
            snapshot.camera_position.x, snapshot.camera_position.y, snapshot.zoom, snapshot.camera_policy
        ),
        format!("Target: {}", target_text(snapshot.target)),
    ]
}

fn overlay_line_color(line: &str) -> Rgba {
    if matches!(line, PERF_SECTION_LABEL | SCENE_SECTION_LABEL) {
        OVERLAY_TEXT_DIM_COLOR
    } else {
        OVERLAY_TEXT_PRIMARY_COLOR
    }
}

fn format_fps_line(current_fps: f32, cap: Option<u32>, slow_frame_delay_ms: u64) -> String {
    let cap_text = match cap {
        Some(value) => value.to_string(),
        None => "inf".to_string(),
    };
    format!("[{:.0} / {}] dbg+{}ms", current_fps, cap_text, slow_frame_delay_ms)
}

fn target_text(target: InteractionTarget) -> String {
    match target {
        InteractionTarget::Npc(index) => format!("npc {index}"),
        InteractionTarget::Object(index) => format!("object {index}"),
        InteractionTarget::None => "none".to_string(),
    }
}
