//! Native messaging host
//!
//! Serves capture requests arriving as native messaging frames. Each request
//! carries the page HTML and the selection; the answer is the capture result,
//! with an `error` field added when the request could not be served. A bad
//! request never ends the loop, only the end of the input stream does.

use super::framing::{read_frame, write_message};
use super::CaptureRequest;
use crate::capture::{capture, CaptureResult};
use crate::convert::ConvertOptions;
use crate::error::ClipError;
use crate::selection::{Page, PageSelection, Selection};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use tracing::{debug, info, warn};

/// A capture result as sent back to the browser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostResponse {
    #[serde(flatten)]
    pub result: CaptureResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HostResponse {
    pub fn failed(err: &ClipError) -> Self {
        HostResponse {
            result: CaptureResult::empty(),
            error: Some(err.to_string()),
        }
    }
}

impl From<CaptureResult> for HostResponse {
    fn from(result: CaptureResult) -> Self {
        HostResponse {
            result,
            error: None,
        }
    }
}

/// Answer one request
///
/// A request without a selection selects nothing and gets the empty result.
pub fn handle_request(
    request: &CaptureRequest,
    options: &ConvertOptions,
) -> Result<CaptureResult, ClipError> {
    request.check_action()?;
    let html = request
        .html
        .as_deref()
        .ok_or_else(|| ClipError::Protocol("request carries no page html".to_string()))?;

    let page = Page::parse(html)?;
    let selection = match &request.selection {
        Some(spec) => spec.resolve(&page)?,
        None => Selection::empty(),
    };
    Ok(capture(&PageSelection::new(&page, &selection), options))
}

/// Serve frames from `reader` until the stream ends; returns the number answered
pub fn serve(
    reader: &mut impl Read,
    writer: &mut impl Write,
    options: &ConvertOptions,
) -> Result<usize, ClipError> {
    info!("native host ready");
    let mut answered = 0;

    while let Some(frame) = read_frame(reader)? {
        debug!(bytes = frame.len(), "received request");

        let response = match serde_json::from_slice::<CaptureRequest>(&frame)
            .map_err(ClipError::from)
            .and_then(|request| handle_request(&request, options))
        {
            Ok(result) => HostResponse::from(result),
            Err(err) => {
                warn!(%err, "request failed");
                HostResponse::failed(&err)
            }
        };

        write_message(writer, &response)?;
        answered += 1;
    }

    info!(answered, "input closed, native host stopping");
    Ok(answered)
}
