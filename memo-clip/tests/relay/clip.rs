//! Clipper over a local channel

use memo_clip::relay::{ClipRequest, ClipSettings, Clipper, LocalChannel};
use memo_clip::{Page, Selection};
use std::time::Duration;

const PAGE: &str = "<p>Read the <a href=\"https://example.test/guide\">guide</a> first.</p>";

fn channel(needle: &str) -> LocalChannel {
    let page = Page::parse(PAGE).unwrap();
    let selection = Selection::find(&page, needle).unwrap();
    LocalChannel::new(page, selection)
}

fn request(url: &str, selection_text: &str) -> ClipRequest {
    ClipRequest {
        url: url.to_string(),
        title: "Guide page".to_string(),
        selection_text: selection_text.to_string(),
    }
}

#[test]
fn test_formatted_note() {
    let clipper = Clipper::new(channel("the guide"), ClipSettings::default());
    let note = clipper.clip(&request("https://example.test/", "the guide"));

    assert!(note.has_formatting);
    assert_eq!(note.content, "the [guide](https://example.test/guide)");
    assert_eq!(note.source_title, "Guide page");
}

#[test]
fn test_plain_selection_keeps_text() {
    let clipper = Clipper::new(channel("Read"), ClipSettings::default());
    let note = clipper.clip(&request("https://example.test/", "Read"));

    assert!(!note.has_formatting);
    assert_eq!(note.content, "Read");
}

#[test]
fn test_timeout_falls_back_to_plain() {
    let settings = ClipSettings {
        response_timeout: Duration::from_millis(20),
        ..ClipSettings::default()
    };
    let slow = channel("the guide").with_delay(Duration::from_millis(500));
    let note = Clipper::new(slow, settings).clip(&request("https://example.test/", "the guide"));

    assert!(!note.has_formatting);
    assert_eq!(note.content, "the guide");
}

#[test]
fn test_restricted_page_falls_back_to_plain() {
    let clipper = Clipper::new(channel("the guide"), ClipSettings::default());
    let note = clipper.clip(&request("about:blank", "the guide"));

    assert!(!note.has_formatting);
    assert_eq!(note.content, "the guide");
    assert_eq!(note.source_url, "about:blank");
}

#[test]
fn test_note_serializes_camel_case() {
    let clipper = Clipper::new(channel("the guide"), ClipSettings::default());
    let note = clipper.clip(&request("https://example.test/", "the guide"));
    let json = serde_json::to_value(&note).unwrap();

    assert_eq!(json["sourceUrl"], "https://example.test/");
    assert_eq!(json["hasFormatting"], true);
}
