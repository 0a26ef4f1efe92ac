//! Syntax highlighting for code blocks.
//!
//! Uses syntect with the bundled Sublime Text syntax definitions.

use std::sync::OnceLock;

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme as SyntectTheme, ThemeSet};
use syntect::parsing::SyntaxSet;

use crate::render::Theme;

const DARK_THEMES: &[&str] = &["base16-eighties.dark", "base16-mocha.dark", "base16-ocean.dark"];
const LIGHT_THEMES: &[&str] = &["InspiredGitHub", "Solarized (light)", "base16-ocean.light"];

/// Highlight `code` as `language`.
///
/// Returns `Ok(None)` when the language is unknown so the caller can fall
/// back to plain styling.
pub fn highlight_code(
    language: &str,
    code: &str,
    theme: Theme,
) -> Result<Option<Vec<Line<'static>>>, syntect::Error> {
    let syntax_set = syntax_set();
    let Some(syntax) = syntax_set
        .find_syntax_by_token(language)
        .or_else(|| syntax_set.find_syntax_by_name(language))
    else {
        return Ok(None);
    };

    let mut highlighter = HighlightLines::new(syntax, syntect_theme(theme));
    let mut lines = Vec::new();
    for line in code.lines() {
        let ranges = highlighter.highlight_line(line, syntax_set)?;
        let spans: Vec<Span<'static>> = ranges
            .into_iter()
            .map(|(style, text)| {
                let fg = style.foreground;
                let color = adjust_fg_for_background((fg.r, fg.g, fg.b), theme);
                Span::styled(text.to_string(), Style::default().fg(color))
            })
            .collect();
        lines.push(Line::from(spans));
    }
    Ok(Some(lines))
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn syntect_theme(theme: Theme) -> &'static SyntectTheme {
    static DARK: OnceLock<SyntectTheme> = OnceLock::new();
    static LIGHT: OnceLock<SyntectTheme> = OnceLock::new();
    let (cell, preferred) = match theme {
        Theme::Dark => (&DARK, DARK_THEMES),
        Theme::Light => (&LIGHT, LIGHT_THEMES),
    };
    cell.get_or_init(|| {
        let theme_set = ThemeSet::load_defaults();
        preferred
            .iter()
            .find_map(|name| theme_set.themes.get(*name).cloned())
            .or_else(|| theme_set.themes.values().next().cloned())
            .unwrap_or_default()
    })
}

/// Light backgrounds wash out bright syntax colors, so those get darkened.
fn adjust_fg_for_background((r, g, b): (u8, u8, u8), theme: Theme) -> Color {
    if theme == Theme::Dark || luma(r, g, b) < 155.0 {
        return Color::Rgb(r, g, b);
    }
    Color::Rgb(darken(r), darken(g), darken(b))
}

fn luma(r: u8, g: u8, b: u8) -> f32 {
    0.0722f32.mul_add(
        f32::from(b),
        0.2126f32.mul_add(f32::from(r), 0.7152 * f32::from(g)),
    )
}

// Result is always 0-107, fits in u8
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn darken(channel: u8) -> u8 {
    (f32::from(channel) * 0.42).round() as u8
}
