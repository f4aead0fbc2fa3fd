//! Request/response relay around capture
//!
//! Capture runs wherever the page lives; whoever wants the note sits on the
//! other side of a message boundary. The only call across it is a single
//! [`CaptureRequest`] answered by a single [`CaptureResult`], made through a
//! [`SelectionChannel`] with one timeout. [`Clipper`] drives that call and
//! owns the plain-text fallback; [`host`] serves the same request over native
//! messaging frames.

pub mod clipper;
pub mod framing;
pub mod host;
pub mod local;

pub use clipper::{ClipRequest, ClipSettings, ClippedNote, Clipper};
pub use local::LocalChannel;

use crate::capture::CaptureResult;
use crate::error::ClipError;
use crate::selection::{Page, Selection, TextOffsets};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The one action a capture request can carry
pub const GET_SELECTION: &str = "getSelection";

/// A "get selection" request
///
/// Inside a browser the request is bare and the receiving side reads its own
/// live selection. Outside one the request carries the page and describes
/// the selection itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRequest {
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<SelectionSpec>,
}

impl CaptureRequest {
    pub fn get_selection() -> Self {
        CaptureRequest {
            action: GET_SELECTION.to_string(),
            html: None,
            selection: None,
        }
    }

    pub fn for_page(html: impl Into<String>, selection: SelectionSpec) -> Self {
        CaptureRequest {
            action: GET_SELECTION.to_string(),
            html: Some(html.into()),
            selection: Some(selection),
        }
    }

    /// Reject anything but a `getSelection` action
    pub fn check_action(&self) -> Result<(), ClipError> {
        if self.action == GET_SELECTION {
            Ok(())
        } else {
            Err(ClipError::Protocol(format!(
                "unknown action '{}'",
                self.action
            )))
        }
    }
}

/// A selection described without a live document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectionSpec {
    /// `{"start": 0, "end": 5}`: char offsets into the body text
    Offsets(TextOffsets),
    /// `{"find": "text"}`: the first occurrence of a string
    Find { find: String },
    /// `{"all": true}`: the whole body; `false` selects nothing
    All { all: bool },
}

impl SelectionSpec {
    pub fn resolve(&self, page: &Page) -> Result<Selection, ClipError> {
        match self {
            SelectionSpec::Offsets(offsets) => Selection::from_offsets(page, *offsets),
            SelectionSpec::Find { find } => Selection::find(page, find),
            SelectionSpec::All { all: true } => Selection::all(page),
            SelectionSpec::All { all: false } => Ok(Selection::empty()),
        }
    }
}

/// The message-passing hop to wherever the selection lives
pub trait SelectionChannel {
    /// Send one request and wait at most `timeout` for its single response
    fn request(
        &self,
        request: &CaptureRequest,
        timeout: Duration,
    ) -> Result<CaptureResult, ClipError>;
}
