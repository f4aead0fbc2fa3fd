//! Clip orchestration with plain-text fallback
//!
//! The clipper always produces a note. It asks the page for its formatted
//! selection only when formatting is to be preserved and the page allows
//! it; any failure on the way (restricted page, channel error, timeout, an
//! answer without text) silently degrades to the plain selection text the
//! trigger supplied.

use super::{CaptureRequest, SelectionChannel};
use crate::error::ClipError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// URL prefixes of pages that refuse script injection
pub const DEFAULT_RESTRICTED_SCHEMES: &[&str] = &[
    "chrome://",
    "chrome-extension://",
    "moz-extension://",
    "about:",
];

pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipSettings {
    pub preserve_formatting: bool,
    pub response_timeout: Duration,
    pub restricted_schemes: Vec<String>,
}

impl Default for ClipSettings {
    fn default() -> Self {
        ClipSettings {
            preserve_formatting: true,
            response_timeout: DEFAULT_RESPONSE_TIMEOUT,
            restricted_schemes: DEFAULT_RESTRICTED_SCHEMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ClipSettings {
    pub fn is_restricted(&self, page_url: &str) -> bool {
        // Parsing lower-cases the scheme, so "CHROME://" matches too.
        let normalized = Url::parse(page_url)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| page_url.to_string());
        self.restricted_schemes
            .iter()
            .any(|prefix| normalized.starts_with(prefix.as_str()))
    }
}

/// What the trigger knows about the page at the time of the click
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipRequest {
    pub url: String,
    pub title: String,
    /// The browser's own plain rendering of the selection
    pub selection_text: String,
}

/// The note handed to the composer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClippedNote {
    pub content: String,
    pub source_url: String,
    pub source_title: String,
    pub has_formatting: bool,
}

#[derive(Debug)]
pub struct Clipper<C> {
    channel: C,
    settings: ClipSettings,
}

impl<C: SelectionChannel> Clipper<C> {
    pub fn new(channel: C, settings: ClipSettings) -> Self {
        Clipper { channel, settings }
    }

    pub fn settings(&self) -> &ClipSettings {
        &self.settings
    }

    pub fn clip(&self, request: &ClipRequest) -> ClippedNote {
        if !self.settings.preserve_formatting {
            debug!("formatting preservation disabled, keeping plain text");
            return plain_note(request);
        }

        match self.fetch(request) {
            Ok(note) => note,
            Err(err) => {
                debug!(%err, url = %request.url, "falling back to plain text");
                plain_note(request)
            }
        }
    }

    fn fetch(&self, request: &ClipRequest) -> Result<ClippedNote, ClipError> {
        if self.settings.is_restricted(&request.url) {
            return Err(ClipError::Restricted(request.url.clone()));
        }

        let response = self
            .channel
            .request(&CaptureRequest::get_selection(), self.settings.response_timeout)?;
        if response.text.is_empty() {
            return Err(ClipError::Protocol("response carried no text".to_string()));
        }

        let content = [response.markup, response.text]
            .into_iter()
            .find(|candidate| !candidate.is_empty())
            .unwrap_or_else(|| request.selection_text.clone());
        debug!(
            has_formatting = response.has_formatting,
            original_len = request.selection_text.len(),
            converted_len = content.len(),
            "using captured selection"
        );

        Ok(ClippedNote {
            content,
            source_url: request.url.clone(),
            source_title: request.title.clone(),
            has_formatting: response.has_formatting,
        })
    }
}

fn plain_note(request: &ClipRequest) -> ClippedNote {
    ClippedNote {
        content: request.selection_text.clone(),
        source_url: request.url.clone(),
        source_title: request.title.clone(),
        has_formatting: false,
    }
}
