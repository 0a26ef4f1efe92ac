//! Inline directive extraction.
//!
//! Directives are HTML comments whose trimmed body matches one of the known
//! forms. Recognized directives are stripped from the text; anything else,
//! including a directive with invalid arguments, stays verbatim.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::types::{ColumnLayout, Directive};

static COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<!--\s*(.*?)\s*-->").expect("comment regex"));

/// A line holding nothing but a pause comment.
pub(super) static PAUSE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*<!--\s*pause\s*-->\s*$").expect("pause regex")
});

/// A line holding nothing but a column routing comment.
pub(super) static COLUMN_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*<!--\s*column:\s*\d+\s*-->\s*$").expect("column regex")
});

/// Find all directives in `content`.
///
/// Returns the directives in document order and the text with every
/// recognized directive comment removed.
pub fn extract_directives(content: &str) -> (Vec<Directive>, String) {
    extract(content, false)
}

/// Like [`extract_directives`] but leaves pause comments in place, so pause
/// boundaries can still be located in the cleaned text.
pub(crate) fn extract_non_pause_directives(content: &str) -> (Vec<Directive>, String) {
    extract(content, true)
}

fn extract(content: &str, keep_pauses: bool) -> (Vec<Directive>, String) {
    let mut directives = Vec::new();
    let cleaned = COMMENT.replace_all(content, |caps: &Captures| {
        let whole = caps[0].to_string();
        let inner = caps.get(1).map_or("", |m| m.as_str()).trim();
        if keep_pauses && inner == "pause" {
            return whole;
        }
        match parse_directive(inner) {
            Some(directive) => {
                directives.push(directive);
                String::new()
            }
            None => whole,
        }
    });
    (directives, cleaned.into_owned())
}

/// Classify the trimmed body of a comment.
pub fn parse_directive(inner: &str) -> Option<Directive> {
    match inner {
        "pause" => return Some(Directive::Pause),
        "reset_layout" => return Some(Directive::ResetLayout),
        _ => {}
    }

    if let Some(note) = inner.strip_prefix("speaker_note:") {
        return Some(Directive::SpeakerNote(note.trim().to_string()));
    }
    if let Some(ratios) = inner.strip_prefix("column_layout:") {
        return parse_ratios(ratios)
            .and_then(ColumnLayout::new)
            .map(Directive::ColumnLayout);
    }
    if let Some(column) = inner.strip_prefix("column:") {
        return column.trim().parse().ok().map(Directive::Column);
    }
    None
}

/// Parse `[3, 2]` style ratio lists. Any non-positive or malformed entry
/// rejects the whole list.
fn parse_ratios(text: &str) -> Option<Vec<usize>> {
    let list = text.trim().trim_matches(|c| c == '[' || c == ']');
    let mut ratios = Vec::new();
    for part in list.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.parse::<usize>() {
            Ok(n) if n > 0 => ratios.push(n),
            _ => return None,
        }
    }
    (!ratios.is_empty()).then_some(ratios)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pause_is_extracted_and_stripped() {
        let (directives, cleaned) = extract_directives("a\n<!-- pause -->\nb");
        assert_eq!(directives, vec![Directive::Pause]);
        assert_eq!(cleaned, "a\n\nb");
    }

    #[test]
    fn test_speaker_note_text_is_trimmed() {
        let (directives, cleaned) = extract_directives("<!--   speaker_note:   Say hi   -->Body");
        assert_eq!(directives, vec![Directive::SpeakerNote("Say hi".to_string())]);
        assert_eq!(cleaned, "Body");
    }

    #[test]
    fn test_column_layout_accepts_positive_ratios() {
        let (directives, _) = extract_directives("<!-- column_layout: [3, 2] -->");
        assert_eq!(
            directives,
            vec![Directive::ColumnLayout(ColumnLayout { ratios: vec![3, 2] })]
        );
    }

    #[test]
    fn test_column_layout_with_zero_is_left_verbatim() {
        let text = "<!-- column_layout: [1, 0] -->";
        let (directives, cleaned) = extract_directives(text);
        assert!(directives.is_empty());
        assert_eq!(cleaned, text);
    }

    #[test]
    fn test_column_layout_with_negative_or_garbage_is_left_verbatim() {
        for text in [
            "<!-- column_layout: [2, -1] -->",
            "<!-- column_layout: [a, b] -->",
            "<!-- column_layout: [] -->",
        ] {
            let (directives, cleaned) = extract_directives(text);
            assert!(directives.is_empty(), "{text} should be rejected");
            assert_eq!(cleaned, text);
        }
    }

    #[test]
    fn test_column_index_parsing() {
        let (directives, cleaned) = extract_directives("<!-- column: 1 -->x");
        assert_eq!(directives, vec![Directive::Column(1)]);
        assert_eq!(cleaned, "x");

        let text = "<!-- column: one -->";
        let (directives, cleaned) = extract_directives(text);
        assert!(directives.is_empty());
        assert_eq!(cleaned, text);
    }

    #[test]
    fn test_reset_layout_is_stripped() {
        let (directives, cleaned) = extract_directives("<!-- reset_layout -->rest");
        assert_eq!(directives, vec![Directive::ResetLayout]);
        assert_eq!(cleaned, "rest");
    }

    #[test]
    fn test_unknown_comment_is_untouched() {
        let text = "before <!-- TODO: fix --> after";
        let (directives, cleaned) = extract_directives(text);
        assert!(directives.is_empty());
        assert_eq!(cleaned, text);
    }

    #[test]
    fn test_directives_are_returned_in_document_order() {
        let text = "<!-- speaker_note: one --><!-- pause --><!-- speaker_note: two -->";
        let (directives, _) = extract_directives(text);
        assert_eq!(
            directives,
            vec![
                Directive::SpeakerNote("one".to_string()),
                Directive::Pause,
                Directive::SpeakerNote("two".to_string()),
            ]
        );
    }

    #[test]
    fn test_non_pause_variant_keeps_pause_comments() {
        let text = "a\n<!-- pause -->\n<!-- speaker_note: n -->b";
        let (directives, cleaned) = extract_non_pause_directives(text);
        assert_eq!(directives, vec![Directive::SpeakerNote("n".to_string())]);
        assert_eq!(cleaned, "a\n<!-- pause -->\nb");
    }
}
