//! Tree serializer tests
//!
//! Whole-fragment conversions, checked by snapshot and by parsing the markup
//! back with comrak.

mod export;
mod options;
