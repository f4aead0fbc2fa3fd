//! Relay tests
//!
//! The request/response hop end to end: a clipper talking to a worker-thread
//! channel, and the native messaging host fed with framed requests.

mod clip;
mod host;
