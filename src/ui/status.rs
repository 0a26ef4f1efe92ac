use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};
use crate::render::footer_text;

pub fn render_divider(model: &Model, frame: &mut Frame, area: Rect) {
    let rule = "─".repeat(usize::from(area.width));
    frame.render_widget(
        Paragraph::new(rule).style(model.theme.palette().footer_rule),
        area,
    );
}

pub fn render_footer(model: &Model, frame: &mut Frame, area: Rect) {
    if model.document.is_empty() {
        return;
    }
    let (left, right) = footer_text(
        model.document.metadata(),
        model.nav.slide,
        model.nav.total_slides,
    );
    let style = model.theme.palette().footer;
    frame.render_widget(Paragraph::new(format!(" {left}")).style(style), area);
    frame.render_widget(
        Paragraph::new(format!("{right} "))
            .style(style)
            .alignment(Alignment::Right),
        area,
    );
}

pub fn render_search_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let bar = Paragraph::new(format!("/{}█", model.search_input));
    frame.render_widget(bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
