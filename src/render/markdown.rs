//! Markdown to styled terminal text with comrak.

use std::mem;

use comrak::nodes::{AstNode, ListDelimType, ListType, NodeList, NodeValue, TableAlignment};
use comrak::{Arena, Options, parse_document};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::{Palette, RenderError, Theme};
use crate::highlight::highlight_code;

const CODE_RIGHT_PADDING: usize = 1;
const QUOTE_PREFIX: &str = "│ ";

/// Render markdown into styled lines word-wrapped to `width` cells.
///
/// # Errors
///
/// Returns [`RenderError::Highlight`] when a fenced code block cannot be
/// highlighted.
pub fn render_markdown(
    markdown: &str,
    width: u16,
    theme: Theme,
) -> Result<Text<'static>, RenderError> {
    let arena = Arena::new();
    let root = parse_document(&arena, markdown, &create_options());
    let mut renderer = Renderer::new(usize::from(width.max(1)), theme);
    renderer.children(root)?;
    Ok(Text::from(renderer.finish()))
}

fn create_options() -> Options {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options
}

struct Renderer {
    width: usize,
    theme: Theme,
    palette: Palette,
    /// Inside a tight list: paragraphs are not followed by a blank line
    tight: bool,
    lines: Vec<Line<'static>>,
}

impl Renderer {
    fn new(width: usize, theme: Theme) -> Self {
        Self {
            width,
            theme,
            palette: theme.palette(),
            tight: false,
            lines: Vec::new(),
        }
    }

    fn nested(&self, width: usize, tight: bool) -> Self {
        Self {
            width: width.max(1),
            theme: self.theme,
            palette: self.palette.clone(),
            tight,
            lines: Vec::new(),
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        while self.lines.last().is_some_and(is_blank) {
            self.lines.pop();
        }
        self.lines
    }

    fn blank(&mut self) {
        if self.lines.last().is_some_and(|line| !is_blank(line)) {
            self.lines.push(Line::default());
        }
    }

    fn children<'a>(&mut self, node: &'a AstNode<'a>) -> Result<(), RenderError> {
        for child in node.children() {
            self.block(child)?;
        }
        Ok(())
    }

    fn block<'a>(&mut self, node: &'a AstNode<'a>) -> Result<(), RenderError> {
        let value = node.data.borrow().value.clone();
        match value {
            NodeValue::Heading(heading) => {
                self.blank();
                let spans = inline_spans(node, self.palette.heading(heading.level), &self.palette);
                self.lines.extend(wrap_spans(spans, self.width));
                self.blank();
            }
            NodeValue::Paragraph => {
                let spans = inline_spans(node, Style::default(), &self.palette);
                self.lines.extend(wrap_spans(spans, self.width));
                if !self.tight {
                    self.blank();
                }
            }
            NodeValue::CodeBlock(code) => {
                let language = code.info.split_whitespace().next().unwrap_or_default();
                self.code_block(language, &code.literal)?;
                self.blank();
            }
            NodeValue::List(list) => {
                self.list(node, &list)?;
                self.blank();
            }
            NodeValue::BlockQuote => {
                self.block_quote(node)?;
                self.blank();
            }
            NodeValue::ThematicBreak => {
                self.lines
                    .push(Line::styled("─".repeat(self.width), self.palette.hr));
                self.blank();
            }
            NodeValue::Table(_) => {
                self.table(node);
                self.blank();
            }
            NodeValue::HtmlBlock(html) => {
                for raw in html.literal.trim_end_matches('\n').lines() {
                    self.lines
                        .push(Line::styled(raw.to_string(), self.palette.html));
                }
                self.blank();
            }
            _ => self.children(node)?,
        }
        Ok(())
    }

    fn list<'a>(&mut self, node: &'a AstNode<'a>, list: &NodeList) -> Result<(), RenderError> {
        let count = node.children().count();
        let number_width = (list.start + count.saturating_sub(1)).to_string().len();
        let delimiter = match list.delimiter {
            ListDelimType::Paren => ')',
            ListDelimType::Period => '.',
        };

        for (index, item) in node.children().enumerate() {
            let marker = match (&item.data.borrow().value, list.list_type) {
                (NodeValue::TaskItem(Some(_)), _) => "✓ ".to_string(),
                (NodeValue::TaskItem(None), _) => "□ ".to_string(),
                (_, ListType::Bullet) => "• ".to_string(),
                (_, ListType::Ordered) => {
                    format!("{:>number_width$}{delimiter} ", list.start + index)
                }
            };
            let marker_width = UnicodeWidthStr::width(marker.as_str());

            let mut inner = self.nested(self.width.saturating_sub(marker_width), list.tight);
            inner.children(item)?;
            let body = inner.finish();

            let continuation = " ".repeat(marker_width);
            if body.is_empty() {
                self.lines
                    .push(Line::from(Span::styled(marker, self.palette.list_marker)));
                continue;
            }
            for (row, line) in body.into_iter().enumerate() {
                let prefix = if row == 0 {
                    Span::styled(marker.clone(), self.palette.list_marker)
                } else {
                    Span::raw(continuation.clone())
                };
                self.lines.push(prefixed(prefix, line));
            }
            if !list.tight && index + 1 < count {
                self.blank();
            }
        }
        Ok(())
    }

    fn block_quote<'a>(&mut self, node: &'a AstNode<'a>) -> Result<(), RenderError> {
        let prefix_width = UnicodeWidthStr::width(QUOTE_PREFIX);
        let mut inner = self.nested(self.width.saturating_sub(prefix_width), false);
        inner.children(node)?;
        for line in inner.finish() {
            let line = line.patch_style(self.palette.quote);
            self.lines
                .push(prefixed(Span::styled(QUOTE_PREFIX, self.palette.quote), line));
        }
        Ok(())
    }

    fn code_block(&mut self, language: &str, literal: &str) -> Result<(), RenderError> {
        let highlighted = if language.is_empty() {
            None
        } else {
            highlight_code(language, literal, self.theme).map_err(|source| {
                RenderError::Highlight {
                    language: language.to_string(),
                    source,
                }
            })?
        };
        let body: Vec<Line<'static>> = highlighted.unwrap_or_else(|| {
            literal
                .lines()
                .map(|raw| Line::styled(raw.to_string(), self.palette.code))
                .collect()
        });

        let content_width = body
            .iter()
            .map(Line::width)
            .max()
            .unwrap_or(0)
            .min(self.width.saturating_sub(4).max(1));
        let inner_width = content_width + 1 + CODE_RIGHT_PADDING;
        let border = self.palette.code_border;

        let label = if language.is_empty() {
            String::new()
        } else {
            truncate_text(&format!(" {language} "), inner_width)
        };
        let fill = inner_width.saturating_sub(UnicodeWidthStr::width(label.as_str()));
        self.lines.push(Line::from(vec![
            Span::styled("┌", border),
            Span::styled(label, border.add_modifier(Modifier::BOLD)),
            Span::styled(format!("{}┐", "─".repeat(fill)), border),
        ]));

        for line in body {
            let mut spans = vec![Span::styled("│ ", border)];
            let truncated = truncate_spans(line.spans, content_width);
            let used: usize = truncated.iter().map(Span::width).sum();
            spans.extend(truncated);
            spans.push(Span::raw(" ".repeat(
                content_width.saturating_sub(used) + CODE_RIGHT_PADDING,
            )));
            spans.push(Span::styled("│", border));
            self.lines.push(Line::from(spans));
        }

        self.lines.push(Line::styled(
            format!("└{}┘", "─".repeat(inner_width)),
            border,
        ));
        Ok(())
    }

    fn table<'a>(&mut self, node: &'a AstNode<'a>) {
        let (alignments, mut rows, has_header) = collect_table_rows(node);
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        if columns == 0 {
            return;
        }
        for row in &mut rows {
            row.resize(columns, String::new());
        }

        let mut widths = vec![1_usize; columns];
        for row in &rows {
            for (idx, cell) in row.iter().enumerate() {
                widths[idx] = widths[idx].max(UnicodeWidthStr::width(cell.as_str()));
            }
        }

        // Row width is 1 + sum(width + 3); shrink the widest column until it fits.
        let max_width = self.width.max(4);
        while 1 + widths.iter().sum::<usize>() + 3 * columns > max_width {
            let Some((widest, _)) = widths.iter().enumerate().max_by_key(|(_, w)| **w) else {
                break;
            };
            if widths[widest] <= 1 {
                break;
            }
            widths[widest] -= 1;
        }

        let border = self.palette.table_border;
        self.lines
            .push(Line::styled(table_border(&widths, '┌', '┬', '┐'), border));
        for (idx, row) in rows.iter().enumerate() {
            let header = has_header && idx == 0;
            self.lines
                .push(table_row(row, &widths, &alignments, border, header));
            if header {
                self.lines
                    .push(Line::styled(table_border(&widths, '├', '┼', '┤'), border));
            }
        }
        self.lines
            .push(Line::styled(table_border(&widths, '└', '┴', '┘'), border));
    }
}

fn is_blank(line: &Line<'_>) -> bool {
    line.spans.iter().all(|span| span.content.trim().is_empty())
}

fn prefixed(prefix: Span<'static>, line: Line<'static>) -> Line<'static> {
    let mut spans = Vec::with_capacity(line.spans.len() + 1);
    spans.push(prefix);
    spans.extend(line.spans);
    Line::from(spans)
}

fn inline_spans<'a>(node: &'a AstNode<'a>, base: Style, palette: &Palette) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for child in node.children() {
        collect_inline(child, base, palette, &mut spans);
    }
    spans
}

fn collect_inline<'a>(
    node: &'a AstNode<'a>,
    style: Style,
    palette: &Palette,
    spans: &mut Vec<Span<'static>>,
) {
    let value = node.data.borrow().value.clone();
    let nested = match value {
        NodeValue::Text(text) => {
            spans.push(Span::styled(text, style));
            return;
        }
        NodeValue::Code(code) => {
            spans.push(Span::styled(code.literal, palette.inline_code));
            return;
        }
        NodeValue::HtmlInline(html) => {
            spans.push(Span::styled(html, palette.html));
            return;
        }
        NodeValue::SoftBreak => {
            spans.push(Span::styled(" ", style));
            return;
        }
        NodeValue::LineBreak => {
            spans.push(Span::raw("\n"));
            return;
        }
        NodeValue::Emph => style.add_modifier(Modifier::ITALIC),
        NodeValue::Strong => style.add_modifier(Modifier::BOLD),
        NodeValue::Strikethrough => style.add_modifier(Modifier::CROSSED_OUT),
        NodeValue::Link(_) => style.patch(palette.link),
        NodeValue::Image(_) => style.add_modifier(Modifier::ITALIC),
        _ => style,
    };
    for child in node.children() {
        collect_inline(child, nested, palette, spans);
    }
}

/// Greedy word wrap preserving span styles. A `"\n"` span forces a break.
fn wrap_spans(spans: Vec<Span<'static>>, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut current_width = 0usize;

    let flush = |current: &mut Vec<Span<'static>>, lines: &mut Vec<Line<'static>>| {
        while current
            .last()
            .is_some_and(|span| span.content.trim().is_empty())
        {
            current.pop();
        }
        lines.push(Line::from(mem::take(current)));
    };

    for span in spans {
        if span.content == "\n" {
            flush(&mut current, &mut lines);
            current_width = 0;
            continue;
        }
        for token in split_tokens(&span.content) {
            let token_width = UnicodeWidthStr::width(token);
            let is_space = token.chars().all(char::is_whitespace);
            if is_space {
                if !current.is_empty() {
                    current.push(Span::styled(token.to_string(), span.style));
                    current_width += token_width;
                }
                continue;
            }
            if current_width + token_width > width && !current.is_empty() {
                flush(&mut current, &mut lines);
                current_width = 0;
            }
            current.push(Span::styled(token.to_string(), span.style));
            current_width += token_width;
        }
    }
    if !current.is_empty() {
        flush(&mut current, &mut lines);
    }
    lines
}

/// Split into alternating runs of whitespace and non-whitespace.
fn split_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;
    for (idx, ch) in text.char_indices() {
        let space = ch.is_whitespace();
        if in_space.is_some_and(|s| s != space) {
            tokens.push(&text[start..idx]);
            start = idx;
        }
        in_space = Some(space);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

fn truncate_spans(spans: Vec<Span<'static>>, max_width: usize) -> Vec<Span<'static>> {
    let mut out = Vec::new();
    let mut used = 0usize;
    for span in spans {
        let span_width = span.width();
        if used + span_width <= max_width {
            used += span_width;
            out.push(span);
            continue;
        }
        let text = truncate_text(&span.content, max_width - used);
        if !text.is_empty() {
            out.push(Span::styled(text, span.style));
        }
        break;
    }
    out
}

fn truncate_text(text: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut width = 0usize;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    out
}

fn collect_table_rows<'a>(
    table: &'a AstNode<'a>,
) -> (Vec<TableAlignment>, Vec<Vec<String>>, bool) {
    let alignments = match &table.data.borrow().value {
        NodeValue::Table(table) => table.alignments.clone(),
        _ => Vec::new(),
    };

    let mut rows = Vec::new();
    let mut has_header = false;
    for row in table.children() {
        let NodeValue::TableRow(header) = row.data.borrow().value else {
            continue;
        };
        has_header |= header;
        let cells = row
            .children()
            .filter(|cell| matches!(cell.data.borrow().value, NodeValue::TableCell))
            .map(|cell| {
                extract_text(cell)
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        rows.push(cells);
    }
    (alignments, rows, has_header)
}

fn table_border(widths: &[usize], left: char, middle: char, right: char) -> String {
    let inner: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{left}{}{right}", inner.join(&middle.to_string()))
}

fn table_row(
    cells: &[String],
    widths: &[usize],
    alignments: &[TableAlignment],
    border: Style,
    header: bool,
) -> Line<'static> {
    let cell_style = if header {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let mut spans = vec![Span::styled("│", border)];
    for (idx, width) in widths.iter().enumerate() {
        let content = truncate_text(cells.get(idx).map_or("", String::as_str), *width);
        let padding = width.saturating_sub(UnicodeWidthStr::width(content.as_str()));
        let (left, right) = match alignments.get(idx).copied().unwrap_or(TableAlignment::None) {
            TableAlignment::Right => (padding, 0),
            TableAlignment::Center => (padding / 2, padding - padding / 2),
            TableAlignment::Left | TableAlignment::None => (0, padding),
        };
        spans.push(Span::raw(format!(" {}", " ".repeat(left))));
        spans.push(Span::styled(content, cell_style));
        spans.push(Span::raw(format!("{} ", " ".repeat(right))));
        spans.push(Span::styled("│", border));
    }
    Line::from(spans)
}

fn extract_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    extract_text_recursive(node, &mut text);
    text
}

fn extract_text_recursive<'a>(node: &'a AstNode<'a>, text: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(t) | NodeValue::HtmlInline(t) => text.push_str(t),
        NodeValue::Code(code) => text.push_str(&code.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
        _ => {
            for child in node.children() {
                extract_text_recursive(child, text);
            }
        }
    }
}
