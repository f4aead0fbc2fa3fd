//! Selection capture
//!
//! Answers a "get selection" request: freeze the first range of the current
//! selection, decide whether it carries formatting, and convert it to markup
//! when it does. Everything here is total; an absent selection yields the
//! empty result.

use crate::convert::{Converter, ConvertOptions};
use crate::detect;
use crate::normalize::normalize;
use crate::selection::SelectionSource;
use serde::{Deserialize, Serialize};
use tracing::debug;

const PREVIEW_CHARS: usize = 200;

/// Response to one capture request; all three fields are always present
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureResult {
    pub text: String,
    /// Converted markup, or the plain text when nothing was formatted
    pub markup: String,
    pub has_formatting: bool,
}

impl CaptureResult {
    pub fn empty() -> Self {
        CaptureResult::default()
    }

    fn plain(text: String) -> Self {
        CaptureResult {
            markup: text.clone(),
            text,
            has_formatting: false,
        }
    }
}

pub fn capture(source: &impl SelectionSource, options: &ConvertOptions) -> CaptureResult {
    if source.range_count() == 0 {
        return CaptureResult::empty();
    }
    let Some(snapshot) = source.snapshot(0) else {
        return CaptureResult::empty();
    };

    let evidence = detect::explain(&snapshot);
    debug!(
        text_len = snapshot.plain_text.len(),
        html_len = snapshot.html.len(),
        has_formatting = evidence.is_some(),
        ?evidence,
        text_preview = %preview(&snapshot.plain_text),
        html_preview = %preview(&snapshot.html),
        "selection analysis"
    );

    match evidence {
        Some(_) => {
            let raw = Converter::new(options.clone()).convert(&snapshot.fragment);
            CaptureResult {
                text: snapshot.plain_text,
                markup: normalize(&raw),
                has_formatting: true,
            }
        }
        None => CaptureResult::plain(snapshot.plain_text),
    }
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
