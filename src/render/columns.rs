use ratatui::text::{Line, Span, Text};

use super::{RenderError, Theme, render_markdown};
use crate::document::{COLUMN_GAP, ColumnLayout};

/// Render each column at its layout width and join them side by side.
///
/// Columns beyond the layout's ratio count are dropped.
pub(super) fn render_columns(
    columns: &[String],
    layout: &ColumnLayout,
    width: u16,
    theme: Theme,
) -> Result<Text<'static>, RenderError> {
    let widths = layout.column_widths(width);
    let rendered = columns
        .iter()
        .zip(&widths)
        .map(|(content, column_width)| {
            let content = content.trim();
            if content.is_empty() {
                Ok(Vec::new())
            } else {
                render_markdown(content, *column_width, theme).map(|text| text.lines)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    let height = rendered.iter().map(Vec::len).max().unwrap_or(0);
    let gap = " ".repeat(usize::from(COLUMN_GAP));
    let last = rendered.len().saturating_sub(1);

    let mut lines = Vec::with_capacity(height);
    for row in 0..height {
        let mut spans: Vec<Span<'static>> = Vec::new();
        for (idx, (column, column_width)) in rendered.iter().zip(&widths).enumerate() {
            let line = column.get(row).cloned().unwrap_or_default();
            let used = line.width();
            spans.extend(line.spans);
            if idx < last {
                let padding = usize::from(*column_width).saturating_sub(used);
                spans.push(Span::raw(format!("{}{gap}", " ".repeat(padding))));
            }
        }
        lines.push(Line::from(spans));
    }
    Ok(Text::from(lines))
}
