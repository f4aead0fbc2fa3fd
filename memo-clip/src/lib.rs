//! Selection clipping with formatting preserved
//!
//!     This crate turns what a user selected on a web page into a note: the plain text of the
//!     selection, a lightweight markup rendering of it (Markdown-like, see ./convert/rules.rs) and
//!     a verdict on whether the selection carried any formatting worth keeping.
//!
//!     TLDR:
//!         - Parsing and serializing HTML is left to html5ever, we never hand-roll a tokenizer.
//!         - Everything downstream of parsing works on our own small element tree (./dom/mod.rs).
//!         - The core (detect, convert, normalize) is pure and total: it never fails and never
//!           touches the outside world.
//!         - Failure only exists at the edges (parsing a page, resolving offsets, the relay), and
//!           the relay turns every failure into a plain-text note.
//!
//!     This is a pure lib, it powers the memo-clip cli but is shell agnostic, that is no code
//!     should be written that supposes a shell environment, be it to std print, env vars etc.
//!     The one exception is the native messaging host loop (./relay/host.rs), which takes its
//!     reader and writer as arguments so the cli decides what they are.
//!
//! Architecture
//!
//!     The pipeline for one capture request:
//!
//!         page + selection ─► SelectionSnapshot ─► detect ─┬─► false: markup = plain text
//!                                                          └─► true:  convert ─► normalize
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── dom                     # Element tree, html5ever parse + serialize
//!     ├── selection               # Pages, boundary points, ranges, snapshots
//!     ├── detect.rs               # Formatting detector (ordered rules)
//!     ├── convert                 # Tree serializer: tag rule table + style hints
//!     ├── normalize.rs            # Output normalizer
//!     ├── capture.rs              # Capture orchestrator
//!     └── relay                   # Channel trait, Clipper fallback, native messaging
//!
//! Testing
//!     tests
//!     └── <area>
//!         └── <testname>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod (see tests/lib.rs).
//!
//! Selections Outside a Browser
//!
//!     A browser hands capture a live selection. Here a selection is a set of boundary points over a
//!     parsed page, addressed by index paths instead of node pointers. Callers that only know the
//!     page's text describe the selection as char offsets into the body text (or a string to
//!     find), and ./selection/mod.rs resolves that into the tightest range covering it.
//!
//! Conversion
//!
//!     Conversion is a post-order walk with one rule per tag. The rule table is static and
//!     unknown tags pass their content through, so any tree converts. The defaults reproduce the
//!     plain rule table exactly; the few choices that could reasonably go either way (ordered list
//!     numbering, escaping, extra style properties) are opt-in knobs on ConvertOptions.
//!
pub mod capture;
pub mod convert;
pub mod detect;
pub mod dom;
pub mod error;
pub mod normalize;
pub mod relay;
pub mod selection;

pub use capture::{capture, CaptureResult};
pub use convert::{convert, convert_with, ConvertOptions, Converter, ListNumbering};
pub use detect::detect;
pub use dom::{ElementNode, Fragment, Node, NodePath};
pub use error::ClipError;
pub use normalize::normalize;
pub use selection::{Page, PageSelection, Selection, SelectionSnapshot, SelectionSource, TextOffsets};

/// Converts an HTML fragment straight to normalized markup.
///
/// Detection is skipped: the fragment is converted whether or not it carries formatting.
pub fn html_to_markup(html: &str, options: &ConvertOptions) -> String {
    let fragment = dom::parse::parse_fragment(html);
    normalize(&convert_with(&fragment, options))
}
