//! Formatting detection
//!
//! Decides whether a selection carries formatting worth keeping. Plain text is
//! the safer answer, so the rules only say yes on positive evidence. They are
//! checked in order and the first match wins:
//!
//! | # | Evidence | Source |
//! |---|----------|--------|
//! | 1 | serialized fragment holds markup and differs from the plain text | `html` |
//! | 2 | the common ancestor element contains a formatting element | `common_ancestor` |
//! | 3 | start and end sit in different containers | `crosses_multiple_containers` |
//! | 4 | an ancestor of the start container is an inline-formatting element | `start_ancestor_tags` |

use crate::dom::ElementNode;
use crate::selection::{CommonAncestor, SelectionSnapshot};
use serde::Serialize;
use tracing::trace;

/// Elements whose presence under the common ancestor counts as formatting
pub const FORMATTING_TAGS: &[&str] = &[
    "strong", "b", "em", "i", "code", "a", "span", "div", "p", "h1", "h2", "h3", "h4", "h5", "h6",
];

/// Elements that format a selection made entirely inside them
pub const INLINE_FORMATTING_TAGS: &[&str] = &[
    "strong", "b", "em", "i", "code", "a", "h1", "h2", "h3", "h4", "h5", "h6",
];

/// Which detector rule fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Evidence {
    MarkupInFragment,
    FormattingDescendant,
    MultipleContainers,
    FormattedAncestor,
}

/// Whether the selection should be converted to markup
pub fn detect(snapshot: &SelectionSnapshot) -> bool {
    explain(snapshot).is_some()
}

/// Run the detector rules in order and report the first that matched
pub fn explain(snapshot: &SelectionSnapshot) -> Option<Evidence> {
    let evidence = first_match(snapshot);
    trace!(?evidence, "formatting detection");
    evidence
}

fn first_match(snapshot: &SelectionSnapshot) -> Option<Evidence> {
    if snapshot.html.contains('<') && snapshot.html != snapshot.plain_text {
        return Some(Evidence::MarkupInFragment);
    }

    if let CommonAncestor::Element(element) = &snapshot.common_ancestor {
        if element.has_descendant(&is_formatting) {
            return Some(Evidence::FormattingDescendant);
        }
    }

    if snapshot.crosses_multiple_containers {
        return Some(Evidence::MultipleContainers);
    }

    if snapshot
        .start_ancestor_tags
        .iter()
        .any(|tag| INLINE_FORMATTING_TAGS.contains(&tag.as_str()))
    {
        return Some(Evidence::FormattedAncestor);
    }

    None
}

fn is_formatting(element: &ElementNode) -> bool {
    FORMATTING_TAGS
        .iter()
        .any(|tag| element.tag.eq_ignore_ascii_case(tag))
}
