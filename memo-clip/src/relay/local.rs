//! In-process channel backed by a worker thread
//!
//! The page and selection are handed to a fresh thread per request, which
//! runs capture and sends back the single result. The caller waits on the
//! receiving end with the request timeout; a reply that arrives later is
//! dropped together with the channel.

use super::{CaptureRequest, SelectionChannel};
use crate::capture::{capture, CaptureResult};
use crate::convert::ConvertOptions;
use crate::error::ClipError;
use crate::selection::{Page, PageSelection, Selection};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct LocalChannel {
    page: Arc<Page>,
    selection: Arc<Selection>,
    options: ConvertOptions,
    delay: Option<Duration>,
}

impl LocalChannel {
    pub fn new(page: Page, selection: Selection) -> Self {
        LocalChannel {
            page: Arc::new(page),
            selection: Arc::new(selection),
            options: ConvertOptions::default(),
            delay: None,
        }
    }

    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    /// Hold every reply back for `delay`, like a slow or busy page
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl SelectionChannel for LocalChannel {
    fn request(
        &self,
        request: &CaptureRequest,
        timeout: Duration,
    ) -> Result<CaptureResult, ClipError> {
        request.check_action()?;

        let (tx, rx) = mpsc::channel();
        let page = Arc::clone(&self.page);
        let selection = Arc::clone(&self.selection);
        let options = self.options.clone();
        let delay = self.delay;

        thread::Builder::new()
            .name("memo-clip-capture".to_string())
            .spawn(move || {
                if let Some(delay) = delay {
                    thread::sleep(delay);
                }
                let result = capture(&PageSelection::new(&page, &selection), &options);
                if tx.send(result).is_err() {
                    debug!("capture reply dropped, requester stopped waiting");
                }
            })?;

        match rx.recv_timeout(timeout) {
            Ok(result) => Ok(result),
            Err(RecvTimeoutError::Timeout) => {
                warn!(?timeout, "capture did not answer in time");
                Err(ClipError::Timeout(timeout))
            }
            Err(RecvTimeoutError::Disconnected) => Err(ClipError::Channel(
                "capture worker exited without replying".to_string(),
            )),
        }
    }
}
