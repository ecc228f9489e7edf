fn draw_prompt(frame: &mut FrameBuffer, projection: &ScreenProjection, prompt: &Prompt, time_s: f32) {
    let anchor = Vec2::new(
        prompt.tile_x as f32 * TILE_SIZE + TILE_SIZE * 0.5,
        prompt.tile_y as f32 * TILE_SIZE + TILE_SIZE * 0.5,
    );
    let screen = projection.world_to_screen(anchor);
    let bob = (time_s * PROMPT_BOB_HZ * std::f32::consts::TAU).sin() * PROMPT_BOB_PX;
    let tip_x = screen.x.round() as i32;
    let tip_y = (screen.y - PROMPT_LIFT_PX + bob).round() as i32;
    if tip_x < 0 || tip_y < 0 || tip_x >= frame.width() as i32 || tip_y >= frame.height() as i32 {
        return;
    }

    let label = format!("Press {}", prompt.key_label);
    let width = text_width(&label, TEXT_SCALE) + 6;
    let height = line_height(TEXT_SCALE) + 2;
    let left = tip_x - width / 2;
    let top = tip_y - height;
    frame.fill_rounded_rect(left, top, width, height, CHIP_BG_COLOR);
    frame.stroke_rect(left, top, width, height, MODAL_BORDER_COLOR);
    frame.fill_triangle(
        ((tip_x - 2) as f32, tip_y as f32),
        ((tip_x + 3) as f32, tip_y as f32),
        (tip_x as f32 + 0.5, (tip_y + 3) as f32),
        MODAL_BORDER_COLOR,
    );
    draw_text(frame, left + 3, top + 2, &label, TITLE_COLOR, TEXT_SCALE);
}

fn draw_toast(frame: &mut FrameBuffer, text: &str) {
    let width = text_width(text, TEXT_SCALE) + 10;
    let height = line_height(TEXT_SCALE) + 4;
    let left = TOAST_MARGIN;
    let top = frame.height() as i32 - TOAST_MARGIN - height;
    frame.fill_rounded_rect(left, top, width, height, CHIP_BG_COLOR);
    frame.stroke_rect(left, top, width, height, CHIP_BORDER_COLOR);
    draw_text(frame, left + 5, top + 3, text, TOAST_TEXT_COLOR, TEXT_SCALE);
}

/// Lines of the modal box with their colours, header first and footer last.
fn modal_lines(modal: &Modal) -> Vec<(String, Rgba)> {
    let mut lines = Vec::new();
    match modal {
        Modal::Panel { title, lines: body } => {
            lines.push((title.clone(), TITLE_COLOR));
            lines.push((String::new(), BODY_COLOR));
            lines.extend(body.iter().map(|line| (line.clone(), BODY_COLOR)));
            lines.push((String::new(), BODY_COLOR));
            lines.push((PANEL_FOOTER.to_string(), DIM_COLOR));
        }
        Modal::Dialogue {
            name,
            lines: pages,
            index,
            revealed,
        } => {
            lines.push((DIALOGUE_HEADER.to_string(), DIM_COLOR));
            lines.push((name.clone(), TITLE_COLOR));
            if let Some(page) = pages.get(*index) {
                let shown: String = page.chars().take(*revealed as usize).collect();
                lines.extend(
                    wrap_text(&shown, PANEL_COLUMNS)
                        .into_iter()
                        .map(|line| (line, BODY_COLOR)),
                );
            }
            lines.push((String::new(), BODY_COLOR));
            let footer = if *index + 1 < pages.len() {
                DIALOGUE_FOOTER_MORE
            } else {
                PANEL_FOOTER
            };
            lines.push((footer.to_string(), DIM_COLOR));
        }
    }
    lines
}

fn draw_modal(frame: &mut FrameBuffer, modal: &Modal) {
    let lines = modal_lines(modal);
    let advance = line_height(TEXT_SCALE);
    let content_width = lines
        .iter()
        .map(|(line, _)| text_width(line, TEXT_SCALE))
        .max()
        .unwrap_or(0);
    let frame_width = frame.width() as i32;
    let frame_height = frame.height() as i32;
    let width = (content_width + MODAL_INSET * 2).min(frame_width - MODAL_INSET * 2);
    let height = (lines.len() as i32 * advance + MODAL_INSET * 2).min(frame_height - MODAL_INSET * 2);
    let left = (frame_width - width) / 2;
    let top = (frame_height - height) / 2;

    frame.fill_rounded_rect(left, top, width, height, MODAL_BG_COLOR);
    frame.stroke_rect(left, top, width, height, MODAL_BORDER_COLOR);

    let mut y = top + MODAL_INSET;
    for (line, color) in &lines {
        if y + advance > top + height {
            break;
        }
        draw_text(frame, left + MODAL_INSET, y, line, *color, TEXT_SCALE);
        y += advance;
    }
}
