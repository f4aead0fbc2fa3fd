//! Frozen view of one selection range

use super::{Page, Range};
use crate::dom::{ElementNode, Fragment, Node};

/// What the range's common ancestor container turned out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommonAncestor {
    /// The selection lies inside a single text node
    Text,
    /// A full copy of the containing element (its whole subtree, not just the selected part)
    Element(ElementNode),
    /// The document itself, or a node outside the forest
    External,
}

/// Everything capture reads from a live selection, taken once per request
///
/// Immutable and discarded after the request; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSnapshot {
    /// Text rendering of the selection
    pub plain_text: String,
    /// Cloned contents of the range
    pub fragment: Fragment,
    /// The fragment serialized as a detached container's `innerHTML`
    pub html: String,
    pub common_ancestor: CommonAncestor,
    /// Start and end boundaries sit in different container nodes
    pub crosses_multiple_containers: bool,
    /// Tags from the start container's parent up to the body, innermost first
    pub start_ancestor_tags: Vec<String>,
}

impl SelectionSnapshot {
    pub fn from_range(page: &Page, range: &Range) -> Self {
        let fragment = range.clone_contents(page);
        let common_ancestor = match page.resolve(&range.common_ancestor_container()) {
            Some(Node::Text(_)) => CommonAncestor::Text,
            Some(Node::Element(element)) => CommonAncestor::Element(element.clone()),
            None => CommonAncestor::External,
        };

        SelectionSnapshot {
            plain_text: fragment.rendered_text(),
            html: fragment.to_html(),
            fragment,
            common_ancestor,
            crosses_multiple_containers: range.crosses_containers(),
            start_ancestor_tags: page.ancestor_tags(&range.start().container),
        }
    }

    /// Snapshot of a detached fragment with no surrounding document
    ///
    /// The fragment stands in for its own container: the common ancestor is
    /// a synthetic wrapper around it and there is no ancestor chain.
    pub fn from_fragment(fragment: Fragment) -> Self {
        let mut wrapper = ElementNode::new("div");
        wrapper.children = fragment.nodes.clone();
        let single_text = matches!(fragment.nodes.as_slice(), [Node::Text(_)]);

        SelectionSnapshot {
            plain_text: fragment.rendered_text(),
            html: fragment.to_html(),
            common_ancestor: if single_text {
                CommonAncestor::Text
            } else {
                CommonAncestor::Element(wrapper)
            },
            crosses_multiple_containers: fragment.nodes.len() > 1,
            start_ancestor_tags: Vec::new(),
            fragment,
        }
    }
}
