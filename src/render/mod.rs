//! Slide rendering: markdown to styled ratatui text.

mod columns;
mod footer;
mod markdown;
mod theme;

use ratatui::text::Text;
use thiserror::Error;

pub use footer::footer_text;
pub use markdown::render_markdown;
pub use theme::{Palette, Theme};

use crate::document::Slide;

/// Failure while rendering a slide.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("highlighting {language} code failed: {source}")]
    Highlight {
        language: String,
        #[source]
        source: syntect::Error,
    },
}

/// Render the part of `slide` revealed up to `chunk`.
///
/// Column slides ignore `chunk` and show every column side by side.
///
/// # Errors
///
/// Propagates [`RenderError`] from the markdown renderer.
pub fn render_slide(
    slide: &Slide,
    chunk: usize,
    width: u16,
    theme: Theme,
) -> Result<Text<'static>, RenderError> {
    if let Some(layout) = slide.layout.as_ref().filter(|_| slide.has_columns()) {
        return columns::render_columns(&slide.columns, layout, width, theme);
    }
    let content = slide.visible_content(chunk);
    let content = content.trim();
    if content.is_empty() {
        return Ok(Text::default());
    }
    render_markdown(content, width, theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    fn plain(text: &Text<'_>) -> Vec<String> {
        text.lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_render_slide_shows_only_revealed_chunks() {
        let doc = Document::parse("first\n<!-- pause -->\nsecond");
        let slide = doc.slide(0).unwrap();

        let lines = plain(&render_slide(slide, 0, 40, Theme::Dark).unwrap());
        assert_eq!(lines, vec!["first"]);

        let lines = plain(&render_slide(slide, 1, 40, Theme::Dark).unwrap());
        assert_eq!(lines, vec!["first", "", "second"]);
    }

    #[test]
    fn test_render_empty_slide() {
        let slide = Slide::single("  \n\n");
        assert!(render_slide(&slide, 0, 40, Theme::Dark).unwrap().lines.is_empty());
    }

    #[test]
    fn test_layout_without_columns_renders_single_block() {
        let doc = Document::parse("<!-- column_layout: [1, 1] -->\nJust text");
        let slide = doc.slide(0).unwrap();
        assert!(!slide.has_columns());
        let lines = plain(&render_slide(slide, 0, 40, Theme::Dark).unwrap());
        assert_eq!(lines, vec!["Just text"]);
    }

    #[test]
    fn test_render_error_message() {
        let err = RenderError::Highlight {
            language: "rust".to_string(),
            source: syntect::Error::Fmt(std::fmt::Error),
        };
        assert!(err.to_string().starts_with("highlighting rust code failed"));
    }
}
