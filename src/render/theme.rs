//! Light and dark color themes.
//!
//! Uses ANSI and 256-color indices so the deck follows the terminal's own
//! palette rather than painting a background.

use ratatui::style::{Color, Modifier, Style};

/// Which terminal background the colors are tuned for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Parse `light` or `dark`, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Guess from the `COLORFGBG` environment variable.
    pub fn detect() -> Self {
        Self::from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
    }

    /// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`); background
    /// indices 7 and above are light.
    pub fn from_colorfgbg(colorfgbg: Option<&str>) -> Self {
        let Some(value) = colorfgbg else {
            return Self::Dark;
        };
        let bg = value.rsplit(';').next().unwrap_or(value);
        match bg.parse::<u8>() {
            Ok(index) if index >= 7 => Self::Light,
            _ => Self::Dark,
        }
    }

    /// Pick the theme for a deck.
    ///
    /// The document's own `theme` wins, then an explicit user choice, then
    /// terminal detection.
    pub fn resolve(document_theme: Option<&str>, configured: Option<Self>) -> Self {
        document_theme
            .and_then(Self::from_name)
            .or(configured)
            .unwrap_or_else(Self::detect)
    }

    /// Styles for this theme.
    pub fn palette(self) -> Palette {
        match self {
            Self::Dark => Palette::dark(),
            Self::Light => Palette::light(),
        }
    }
}

/// Concrete styles for every rendered element.
#[derive(Debug, Clone)]
pub struct Palette {
    pub h1: Style,
    pub h2: Style,
    pub h3: Style,
    /// Heading level 4+ style
    pub h4: Style,
    /// Plain code block text when no syntax is known
    pub code: Style,
    pub code_border: Style,
    pub inline_code: Style,
    pub quote: Style,
    pub link: Style,
    pub list_marker: Style,
    pub table_border: Style,
    pub hr: Style,
    /// Raw HTML and unrecognized comments
    pub html: Style,
    pub footer: Style,
    pub footer_rule: Style,
    pub code_output: Style,
    pub code_error: Style,
}

impl Palette {
    /// Colors for dark terminals.
    pub fn dark() -> Self {
        Self {
            h1: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            h2: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            h3: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            h4: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            code: Style::default().fg(Color::Indexed(245)),
            code_border: Style::default().fg(Color::Indexed(240)),
            inline_code: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            quote: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::ITALIC),
            link: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::UNDERLINED),
            list_marker: Style::default().fg(Color::Yellow),
            table_border: Style::default().fg(Color::Indexed(240)),
            hr: Style::default().fg(Color::Indexed(240)),
            html: Style::default()
                .fg(Color::Indexed(243))
                .add_modifier(Modifier::DIM),
            footer: Style::default().fg(Color::Indexed(245)),
            footer_rule: Style::default().fg(Color::Indexed(238)),
            code_output: Style::default().fg(Color::Indexed(250)),
            code_error: Style::default().fg(Color::LightRed),
        }
    }

    /// Colors for light terminals.
    pub fn light() -> Self {
        Self {
            h1: Style::default()
                .fg(Color::Indexed(31)) // Darker cyan
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            h2: Style::default()
                .fg(Color::Indexed(28)) // Darker green
                .add_modifier(Modifier::BOLD),
            h3: Style::default()
                .fg(Color::Indexed(136)) // Olive
                .add_modifier(Modifier::BOLD),
            h4: Style::default()
                .fg(Color::Indexed(25)) // Darker blue
                .add_modifier(Modifier::BOLD),
            code: Style::default().fg(Color::Indexed(240)),
            code_border: Style::default().fg(Color::Indexed(245)),
            inline_code: Style::default()
                .fg(Color::Indexed(124))
                .add_modifier(Modifier::BOLD),
            quote: Style::default()
                .fg(Color::Indexed(25))
                .add_modifier(Modifier::ITALIC),
            link: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
            list_marker: Style::default().fg(Color::Indexed(136)),
            table_border: Style::default().fg(Color::Indexed(245)),
            hr: Style::default().fg(Color::Indexed(245)),
            html: Style::default().fg(Color::Indexed(246)),
            footer: Style::default().fg(Color::Indexed(241)),
            footer_rule: Style::default().fg(Color::Indexed(250)),
            code_output: Style::default().fg(Color::Indexed(238)),
            code_error: Style::default().fg(Color::Indexed(124)),
        }
    }

    /// Style for a heading of the given level.
    pub fn heading(&self, level: u8) -> Style {
        match level {
            1 => self.h1,
            2 => self.h2,
            3 => self.h3,
            _ => self.h4,
        }
    }
}
