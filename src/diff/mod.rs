//! Change detection between two parsed documents.
//!
//! Used after a reload to move the viewer to the slide that was edited.

use crate::document::{Document, Slide};

/// Index of the first slide that differs between `old` and `new`.
///
/// A missing or empty `old` document counts as entirely new and yields
/// `Some(0)`. When the common prefix is identical but the slide counts
/// differ, the index of the first added or removed slide is returned.
/// Returns `None` when nothing changed.
///
/// Chunks are compared with surrounding whitespace trimmed, so editor noise
/// such as a trailing newline does not count as a change.
pub fn find_first_modified(old: Option<&Document>, new: &Document) -> Option<usize> {
    let Some(old) = old.filter(|doc| !doc.is_empty()) else {
        return Some(0);
    };

    let common = old.slide_count().min(new.slide_count());
    let changed = old
        .slides()
        .iter()
        .zip(new.slides())
        .position(|(a, b)| slide_changed(a, b));

    let result = changed.or_else(|| (old.slide_count() != new.slide_count()).then_some(common));
    tracing::debug!(?result, "document diff");
    result
}

fn slide_changed(a: &Slide, b: &Slide) -> bool {
    a.chunks.len() != b.chunks.len()
        || a
            .chunks
            .iter()
            .zip(&b.chunks)
            .any(|(x, y)| x.content.trim() != y.content.trim())
}
