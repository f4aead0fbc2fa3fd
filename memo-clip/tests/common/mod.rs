//! Shared helpers for the integration tests.

use memo_clip::{capture, CaptureResult, ConvertOptions, Page, PageSelection, Selection};

/// Parse `html` and capture the first occurrence of `needle`
pub fn capture_find(html: &str, needle: &str) -> CaptureResult {
    let page = Page::parse(html).expect("page parses");
    let selection = Selection::find(&page, needle).expect("needle is on the page");
    capture(
        &PageSelection::new(&page, &selection),
        &ConvertOptions::default(),
    )
}

/// Parse `html` and capture the whole body
pub fn capture_all(html: &str) -> CaptureResult {
    let page = Page::parse(html).expect("page parses");
    let selection = Selection::all(&page).expect("body is selectable");
    capture(
        &PageSelection::new(&page, &selection),
        &ConvertOptions::default(),
    )
}
