//! Capture orchestrator tests
//!
//! Selections made on parsed pages, from the request down to the result.

mod pages;
