//! Core document types.

/// Paging template applied when a metadata block omits `paging`.
pub const DEFAULT_PAGING: &str = "Slide %d / %d";

/// Gap in columns between adjacent columns of a multi-column slide.
pub const COLUMN_GAP: u16 = 2;

/// A parsed presentation: ordered slides plus metadata.
///
/// Documents are immutable once built. A file change produces a whole new
/// `Document` that replaces the previous one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    slides: Vec<Slide>,
    metadata: Metadata,
}

impl Document {
    pub(crate) const fn new(slides: Vec<Slide>, metadata: Metadata) -> Self {
        Self { slides, metadata }
    }

    /// Create an empty document with no slides and no metadata.
    pub fn empty() -> Self {
        Self::default()
    }

    /// All slides in document order.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Get a slide by index.
    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    /// Number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Returns true when the document has no slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Number of progressive-reveal chunks in the given slide.
    ///
    /// Out-of-range slides report a single chunk so callers can clamp safely.
    pub fn chunk_count(&self, index: usize) -> usize {
        self.slides.get(index).map_or(1, |slide| slide.chunks.len())
    }

    /// Presentation-level metadata from the frontmatter block.
    pub const fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

/// Presentation-level settings from the frontmatter block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Color theme hint (`light` or `dark`)
    pub theme: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    /// printf-style paging template, e.g. `Slide %d / %d`
    pub paging: Option<String>,
    /// Footer template with `{author}`, `{date}`, `{current_slide}`, `{total_slides}`
    pub footer: Option<String>,
}

/// A single slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    /// Progressive-reveal units; never empty
    pub chunks: Vec<Chunk>,
    /// Raw markdown per column, only populated when `layout` is set and the
    /// slide routes content with `column:` markers
    pub columns: Vec<String>,
    pub speaker_notes: Vec<String>,
    pub layout: Option<ColumnLayout>,
}

impl Slide {
    /// Create a slide holding a single chunk.
    pub fn single(content: impl Into<String>) -> Self {
        Self {
            chunks: vec![Chunk::new(content)],
            columns: Vec::new(),
            speaker_notes: Vec::new(),
            layout: None,
        }
    }

    /// Markdown revealed up to and including `chunk_index`.
    ///
    /// Indices past the last chunk are clamped, so this always returns the
    /// whole slide for large indices.
    pub fn visible_content(&self, chunk_index: usize) -> String {
        let last = self.chunks.len().saturating_sub(1);
        self.chunks
            .iter()
            .take(chunk_index.min(last) + 1)
            .map(|chunk| chunk.content.as_str())
            .collect()
    }

    /// Markdown of the fully revealed slide.
    pub fn full_content(&self) -> String {
        self.visible_content(usize::MAX)
    }

    /// Whether this slide renders as multiple columns.
    pub fn has_columns(&self) -> bool {
        self.layout.is_some() && !self.columns.is_empty()
    }
}

/// A progressive-reveal unit of a slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Markdown with all recognized directive comments removed
    pub content: String,
}

impl Chunk {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Proportional column widths, e.g. `[3, 2]` gives 3/5 and 2/5.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub ratios: Vec<usize>,
}

impl ColumnLayout {
    /// Build a layout, rejecting empty or non-positive ratios.
    pub fn new(ratios: Vec<usize>) -> Option<Self> {
        if ratios.is_empty() || ratios.contains(&0) {
            return None;
        }
        Some(Self { ratios })
    }

    /// Split `total_width` into per-column widths.
    ///
    /// Columns are separated by [`COLUMN_GAP`]. The last column absorbs the
    /// rounding remainder. When the terminal is too narrow every column
    /// gets a single cell.
    pub fn column_widths(&self, total_width: u16) -> Vec<u16> {
        let count = self.ratios.len();
        if count == 0 {
            return Vec::new();
        }

        let gaps = usize::from(COLUMN_GAP) * (count - 1);
        let available = usize::from(total_width).saturating_sub(gaps);
        if available < count {
            return vec![1; count];
        }

        // Ratios are unbounded, so the products need the extra range.
        let total: u128 = self.ratios.iter().map(|&r| r as u128).sum::<u128>().max(1);
        let mut remaining = available;
        let mut widths = Vec::with_capacity(count);
        for (i, &ratio) in self.ratios.iter().enumerate() {
            let width = if i == count - 1 {
                remaining
            } else {
                let share = available as u128 * ratio as u128 / total;
                let w = usize::try_from(share).unwrap_or(remaining).min(remaining);
                remaining -= w;
                w
            };
            widths.push(u16::try_from(width).unwrap_or(u16::MAX));
        }
        widths
    }
}

/// An inline presentation directive embedded as an HTML comment.
///
/// Directives are transient: the document builder folds them into chunk
/// boundaries, speaker notes, and column data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `<!-- pause -->`
    Pause,
    /// `<!-- speaker_note: text -->`
    SpeakerNote(String),
    /// `<!-- column_layout: [3, 2] -->`
    ColumnLayout(ColumnLayout),
    /// `<!-- column: 0 -->`
    Column(usize),
    /// `<!-- reset_layout -->`
    ResetLayout,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide_with(chunks: &[&str]) -> Slide {
        Slide {
            chunks: chunks.iter().map(|c| Chunk::new(*c)).collect(),
            columns: Vec::new(),
            speaker_notes: Vec::new(),
            layout: None,
        }
    }

    #[test]
    fn test_visible_content_first_chunk_only() {
        let slide = slide_with(&["First", " Second", " Third"]);
        assert_eq!(slide.visible_content(0), "First");
    }

    #[test]
    fn test_visible_content_accumulates_chunks() {
        let slide = slide_with(&["Alpha", " Bravo", " Charlie"]);
        assert_eq!(slide.visible_content(1), "Alpha Bravo");
        assert_eq!(slide.visible_content(2), "Alpha Bravo Charlie");
    }

    #[test]
    fn test_visible_content_clamps_past_last_chunk() {
        let slide = slide_with(&["A", "B"]);
        assert_eq!(slide.visible_content(10), "AB");
        assert_eq!(slide.full_content(), "AB");
    }

    #[test]
    fn test_visible_content_preserves_whitespace_between_chunks() {
        let slide = slide_with(&["Line 1\n", "\nLine 2"]);
        assert_eq!(slide.visible_content(1), "Line 1\n\nLine 2");
    }

    #[test]
    fn test_column_widths_even_split() {
        let layout = ColumnLayout::new(vec![1, 1]).unwrap();
        assert_eq!(layout.column_widths(82), vec![40, 40]);
    }

    #[test]
    fn test_column_widths_proportional_with_remainder() {
        let layout = ColumnLayout::new(vec![3, 2]).unwrap();
        assert_eq!(layout.column_widths(52), vec![30, 20]);

        let layout = ColumnLayout::new(vec![1, 2, 1]).unwrap();
        assert_eq!(layout.column_widths(44), vec![10, 20, 10]);
    }

    #[test]
    fn test_column_widths_narrow_terminal_gives_one_each() {
        let layout = ColumnLayout::new(vec![1, 1, 1]).unwrap();
        assert_eq!(layout.column_widths(2), vec![1, 1, 1]);
    }

    #[test]
    fn test_column_widths_huge_ratios_do_not_overflow() {
        let layout = ColumnLayout::new(vec![1_000_000_000_000_000_000, 1]).unwrap();
        assert_eq!(layout.column_widths(80), vec![77, 1]);

        let layout = ColumnLayout::new(vec![usize::MAX, usize::MAX]).unwrap();
        assert_eq!(layout.column_widths(82), vec![40, 40]);
    }

    #[test]
    fn test_column_widths_single_column_full_width() {
        let layout = ColumnLayout::new(vec![1]).unwrap();
        assert_eq!(layout.column_widths(80), vec![80]);
    }

    #[test]
    fn test_column_layout_rejects_zero_and_empty() {
        assert!(ColumnLayout::new(Vec::new()).is_none());
        assert!(ColumnLayout::new(vec![2, 0]).is_none());
    }

    #[test]
    fn test_chunk_count_out_of_range_is_one() {
        let doc = Document::new(vec![slide_with(&["a", "b"])], Metadata::default());
        assert_eq!(doc.chunk_count(0), 2);
        assert_eq!(doc.chunk_count(7), 1);
    }
}
