//! Slide splitting and per-slide document building.
//!
//! Directives are scoped differently: speaker notes and layout apply to the
//! whole slide, `column:` markers route content per column, and `pause`
//! marks chunk boundaries. Each scope gets its own extraction pass over the
//! raw slide text rather than one combined pass.

use super::directive::{COLUMN_LINE, PAUSE_LINE, extract_directives, extract_non_pause_directives};
use super::frontmatter::parse_frontmatter;
use super::types::{Chunk, ColumnLayout, Directive, Document, Slide};

const SLIDE_DELIMITER: &str = "\n---\n";

impl Document {
    /// Parse presentation source into a Document.
    ///
    /// Parsing never fails; malformed syntax degrades to plain text.
    ///
    /// # Example
    ///
    /// ```
    /// use deck::document::Document;
    ///
    /// let doc = Document::parse("# One\n---\n# Two");
    /// assert_eq!(doc.slide_count(), 2);
    /// ```
    pub fn parse(source: &str) -> Self {
        parse(source)
    }
}

/// Parse presentation source into a Document.
pub fn parse(source: &str) -> Document {
    let (metadata, body) = parse_frontmatter(source);
    let slides: Vec<Slide> = split_slides(&body).iter().map(|raw| build_slide(raw)).collect();
    tracing::debug!(slides = slides.len(), "parsed document");
    Document::new(slides, metadata)
}

/// Split a body into raw slide strings on `\n---\n`.
///
/// Line endings are normalized first. A trailing slide that is empty or
/// only whitespace is dropped, so empty input yields no slides. The
/// delimiter is matched literally, including inside fenced code.
pub fn split_slides(body: &str) -> Vec<String> {
    let normalized = body.replace("\r\n", "\n");
    let mut slides: Vec<String> = normalized.split(SLIDE_DELIMITER).map(str::to_string).collect();
    if slides.last().is_some_and(|last| last.trim().is_empty()) {
        slides.pop();
    }
    slides
}

fn build_slide(raw: &str) -> Slide {
    // Pass 1: slide-wide directives.
    let (directives, _) = extract_directives(raw);
    let mut speaker_notes = Vec::new();
    let mut layout: Option<ColumnLayout> = None;
    for directive in directives {
        match directive {
            Directive::SpeakerNote(note) => speaker_notes.push(note),
            Directive::ColumnLayout(l) => layout = Some(l),
            Directive::Pause | Directive::Column(_) | Directive::ResetLayout => {}
        }
    }

    // Pass 2: column routing.
    let columns = layout
        .as_ref()
        .map(|l| extract_columns(raw, l.ratios.len()))
        .unwrap_or_default();

    // Pass 3: progressive-reveal chunks.
    let mut chunks: Vec<Chunk> = PAUSE_LINE
        .split(raw)
        .map(|part| Chunk::new(extract_non_pause_directives(part).1))
        .collect();
    if chunks.is_empty() {
        chunks.push(Chunk::new(raw));
    }

    Slide {
        chunks,
        columns,
        speaker_notes,
        layout,
    }
}

/// Route content following each `column:` marker into its column.
///
/// Content before the first marker is discarded, as is content routed to
/// a column index outside the layout. Returns an empty vec when the slide
/// has no markers at all.
fn extract_columns(raw: &str, column_count: usize) -> Vec<String> {
    let markers: Vec<&str> = COLUMN_LINE.find_iter(raw).map(|m| m.as_str()).collect();
    if markers.is_empty() {
        return Vec::new();
    }

    let mut columns = vec![String::new(); column_count];
    let mut current: Option<usize> = None;
    for (marker, content) in markers.iter().zip(COLUMN_LINE.split(raw).skip(1)) {
        let (directives, _) = extract_directives(marker);
        for directive in directives {
            if let Directive::Column(index) = directive {
                current = Some(index);
            }
        }

        if let Some(column) = current.and_then(|i| columns.get_mut(i)) {
            let (_, cleaned) = extract_non_pause_directives(content);
            column.push_str(&PAUSE_LINE.replace_all(&cleaned, ""));
        }
    }
    columns
}
