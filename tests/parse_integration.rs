use deck::diff::find_first_modified;
use deck::document::{DEFAULT_PAGING, Document, extract_directives, parse_frontmatter};
use deck::search::{search_next, search_prev};

const DECK: &str = "---\nauthor: Tester\n---\n# One\n---\n# Two\n\n<!-- pause -->\nreveal";

#[test]
fn test_end_to_end_parse() {
    let doc = Document::parse(DECK);

    assert_eq!(doc.slide_count(), 2);
    assert_eq!(doc.chunk_count(0), 1);
    assert_eq!(doc.chunk_count(1), 2);
    assert_eq!(doc.metadata().author.as_deref(), Some("Tester"));
    assert_eq!(doc.metadata().paging.as_deref(), Some(DEFAULT_PAGING));

    let slide = doc.slide(1).unwrap();
    assert_eq!(slide.chunks[0].content.trim(), "# Two");
    assert_eq!(slide.chunks[1].content.trim(), "reveal");
}

#[test]
fn test_end_to_end_search_next() {
    let doc = Document::parse(DECK);
    let result = search_next(doc.slides(), "Two", 0);
    assert!(result.found);
    assert_eq!(result.slide_index, 1);
}

#[test]
fn test_search_matches_unrevealed_chunks() {
    let doc = Document::parse(DECK);
    assert_eq!(search_next(doc.slides(), "reveal", 0).index(), Some(1));
    assert_eq!(search_prev(doc.slides(), "one/i", 1).index(), Some(0));
}

#[test]
fn test_no_frontmatter_means_no_paging_default() {
    let doc = Document::parse("# One\n---\n# Two");
    assert_eq!(doc.metadata().paging, None);
    assert_eq!(doc.slide_count(), 2);
}

#[test]
fn test_unterminated_frontmatter_is_plain_text() {
    let source = "---\nauthor: Nobody\n# Slide";
    let (metadata, rest) = parse_frontmatter(source);
    assert_eq!(metadata.author, None);
    assert_eq!(rest, source);
}

#[test]
fn test_speaker_notes_and_layout_are_collected() {
    let md = "\
<!-- speaker_note: first -->
<!-- column_layout: [2, 1] -->
<!-- column: 0 -->
Left
<!-- column: 1 -->
Right
<!-- speaker_note: second -->";
    let doc = Document::parse(md);
    let slide = doc.slide(0).unwrap();

    assert_eq!(slide.speaker_notes, vec!["first", "second"]);
    assert_eq!(slide.layout.as_ref().map(|l| l.ratios.clone()), Some(vec![2, 1]));
    assert_eq!(slide.columns.len(), 2);
    assert_eq!(slide.columns[0].trim(), "Left");
    assert_eq!(slide.columns[1].trim(), "Right");
    assert!(!slide.full_content().contains("speaker_note"));
}

#[test]
fn test_layout_without_column_markers_has_no_columns() {
    let doc = Document::parse("<!-- column_layout: [1, 1] -->\nJust text");
    let slide = doc.slide(0).unwrap();
    assert!(slide.layout.is_some());
    assert!(slide.columns.is_empty());
    assert!(!slide.has_columns());
}

#[test]
fn test_invalid_directives_stay_in_text() {
    let source = "<!-- column_layout: [1, 0] -->\n<!-- column: -1 -->\n<!-- note to self -->";
    let (directives, cleaned) = extract_directives(source);
    assert!(directives.is_empty());
    assert_eq!(cleaned, source);

    let doc = Document::parse(source);
    assert!(doc.slide(0).unwrap().layout.is_none());
    assert!(doc.slide(0).unwrap().full_content().contains("<!-- note to self -->"));
}

#[test]
fn test_reload_diff_points_at_edited_slide() {
    let old = Document::parse(DECK);
    let edited = Document::parse(&DECK.replace("reveal", "revealed"));
    let padded = Document::parse(&DECK.replace("# One", "# One  \n"));

    assert_eq!(find_first_modified(Some(&old), &edited), Some(1));
    assert_eq!(find_first_modified(Some(&old), &padded), None);
    assert_eq!(find_first_modified(Some(&old), &old.clone()), None);
}

#[test]
fn test_reload_diff_detects_appended_slide() {
    let old = Document::parse(DECK);
    let longer = Document::parse(&format!("{DECK}\n---\n# Three"));
    assert_eq!(find_first_modified(Some(&old), &longer), Some(2));
    assert_eq!(find_first_modified(Some(&longer), &old), Some(2));
}

#[test]
fn test_crlf_deck_parses_like_lf() {
    let crlf = DECK.replace('\n', "\r\n");
    let doc = Document::parse(&crlf);
    assert_eq!(doc.slide_count(), 2);
    assert_eq!(doc.chunk_count(1), 2);
}
