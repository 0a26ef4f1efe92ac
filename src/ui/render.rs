use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{InputMode, Model};
use crate::render::render_slide;

use super::{CONTENT_PADDING, FOOTER_HEIGHT, status};

/// Width available to slide content inside a terminal of `total_width`.
pub fn content_width(total_width: u16) -> u16 {
    total_width.saturating_sub(CONTENT_PADDING * 2).max(1)
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let toast_height = u16::from(model.active_toast().is_some());
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(toast_height),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    render_slide_area(model, frame, rows[0]);
    status::render_toast_bar(model, frame, rows[1]);

    let footer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(rows[2]);
    status::render_divider(model, frame, footer[0]);
    if model.mode == InputMode::Search {
        status::render_search_bar(model, frame, footer[1]);
    } else {
        status::render_footer(model, frame, footer[1]);
    }
}

fn render_slide_area(model: &Model, frame: &mut Frame, area: Rect) {
    let inner = Rect {
        x: area.x + CONTENT_PADDING.min(area.width),
        y: area.y,
        width: content_width(area.width),
        height: area.height,
    }
    .intersection(area);
    let palette = model.theme.palette();

    let Some(slide) = model.current_slide() else {
        let empty = Paragraph::new("No slides").style(palette.footer);
        frame.render_widget(empty, inner);
        return;
    };

    let chunk = model.nav.chunk_index();
    let mut text = render_slide(slide, chunk, inner.width, model.theme).unwrap_or_else(|err| {
        tracing::warn!(%err, slide = model.nav.slide, "render failed, showing raw markdown");
        Text::raw(slide.visible_content(chunk))
    });

    if let Some(output) = &model.code_output {
        let style = if output.is_error {
            palette.code_error
        } else {
            palette.code_output
        };
        text.lines.push(Line::default());
        text.lines
            .extend(output.text.lines().map(|line| Line::styled(line.to_string(), style)));
    } else if model.code_running {
        text.lines.push(Line::default());
        text.lines
            .push(Line::styled("Running...", palette.code_output.add_modifier(Modifier::ITALIC)));
    }

    frame.render_widget(Paragraph::new(text), inner);
}
