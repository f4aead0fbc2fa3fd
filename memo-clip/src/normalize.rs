//! Output normalization
//!
//! Cleans raw converter output: three or more newlines collapse to a blank
//! line, a pipe followed only by whitespace and another pipe at line end loses
//! the empty trailing cell, and the result is trimmed. The rewrites run until
//! nothing changes before the trim, so normalizing twice equals normalizing
//! once.

use once_cell::sync::Lazy;
use regex::Regex;

static BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));
static EMPTY_TRAILING_CELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\|\s*\|\n").expect("valid regex"));

pub fn normalize(markup: &str) -> String {
    let mut current = markup.to_string();
    loop {
        let collapsed = BLANK_RUNS.replace_all(&current, "\n\n");
        let next = EMPTY_TRAILING_CELL.replace_all(&collapsed, "|\n").into_owned();
        if next == current {
            break;
        }
        current = next;
    }
    current.trim().to_string()
}
