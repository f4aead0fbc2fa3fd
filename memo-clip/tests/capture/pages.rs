//! Capture over whole pages

use crate::common::{capture_all, capture_find};
use memo_clip::{
    capture, detect, CaptureResult, ConvertOptions, Page, PageSelection, Selection,
    SelectionSource, TextOffsets,
};

const ARTICLE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Field notes</title><style>p { color: red }</style></head>
<body><h2>Birds</h2><p>The <em>heron</em> waits.</p><p>Plain closing line.</p></body>
</html>"#;

// ============================================================================
// RESULT SHAPE
// ============================================================================

#[test]
fn test_result_always_has_three_fields() {
    let json = serde_json::to_value(capture_find(ARTICLE, "waits")).unwrap();
    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 3);
    for key in ["text", "markup", "hasFormatting"] {
        assert!(object.contains_key(key), "missing {key}");
    }
}

#[test]
fn test_empty_selection() {
    let page = Page::parse(ARTICLE).unwrap();
    let selection = Selection::empty();
    let result = capture(
        &PageSelection::new(&page, &selection),
        &ConvertOptions::default(),
    );
    assert_eq!(result, CaptureResult::empty());
}

// ============================================================================
// PLAIN SELECTIONS
// ============================================================================

#[test]
fn test_plain_run_inside_paragraph() {
    let result = capture_find(ARTICLE, "closing");
    assert!(!result.has_formatting);
    assert_eq!(result.text, "closing");
    assert_eq!(result.markup, result.text);
}

#[test]
fn test_collapsed_selection_is_plain_and_empty() {
    let page = Page::parse(ARTICLE).unwrap();
    let selection = Selection::from_offsets(&page, TextOffsets::new(25, 25)).unwrap();
    let result = capture(
        &PageSelection::new(&page, &selection),
        &ConvertOptions::default(),
    );
    assert_eq!(result.text, "");
    assert!(!result.has_formatting);
}

// ============================================================================
// FORMATTED SELECTIONS
// ============================================================================

#[test]
fn test_inside_emphasis_counts_as_formatted() {
    let result = capture_find(ARTICLE, "ero");
    assert!(result.has_formatting);
    assert_eq!(result.markup, "ero");
}

#[test]
fn test_inside_heading_counts_as_formatted() {
    let result = capture_find(ARTICLE, "Bird");
    assert!(result.has_formatting);
}

#[test]
fn test_cross_container_selection() {
    let result = capture_find(ARTICLE, "waits.Plain");
    assert!(result.has_formatting);
    assert_eq!(result.text, "waits.\n\nPlain");
    assert_eq!(result.markup, "waits.\n\nPlain");
}

#[test]
fn test_whole_body() {
    let result = capture_all(ARTICLE);
    assert!(result.has_formatting);
    assert_eq!(
        result.markup,
        "## BirdsThe *heron* waits.\n\nPlain closing line."
    );
    assert_eq!(result.text, "Birds\n\nThe heron waits.\n\nPlain closing line.");
    // head content never reaches the selection
    assert!(!result.text.contains("color"));
    assert!(!result.text.contains("Field notes"));
}

#[test]
fn test_snapshot_is_what_detect_sees() {
    let page = Page::parse(ARTICLE).unwrap();
    let selection = Selection::find(&page, "heron waits").unwrap();
    let source = PageSelection::new(&page, &selection);
    let snapshot = source.snapshot(0).unwrap();

    assert_eq!(snapshot.html, "<em>heron</em> waits");
    assert!(snapshot.crosses_multiple_containers);
    assert!(detect(&snapshot));
}

#[test]
fn test_page_title_is_read() {
    let page = Page::parse(ARTICLE).unwrap();
    assert_eq!(page.title(), Some("Field notes"));
}
