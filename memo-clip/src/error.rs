//! Error types for clipping operations
//!
//! The conversion core itself never fails: every tag has a rule and every
//! string normalizes. Errors only come from the edges around it (parsing a
//! page, resolving a selection, talking across the request/response boundary).

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur around the capture pipeline
#[derive(Debug, Error)]
pub enum ClipError {
    /// The HTML source could not be turned into an element tree
    #[error("Parse error: {0}")]
    Parse(String),

    /// Selection offsets or boundary points do not fit the page
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// The page runs in a context that refuses fragment extraction
    #[error("Capture not allowed on restricted page '{0}'")]
    Restricted(String),

    /// No response arrived before the deadline
    #[error("No response within {0:?}")]
    Timeout(Duration),

    /// The other side of the channel went away or refused the request
    #[error("Channel error: {0}")]
    Channel(String),

    /// A message did not follow the wire protocol
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
