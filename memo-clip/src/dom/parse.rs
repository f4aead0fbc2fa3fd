//! HTML parsing (HTML string → element tree)
//!
//! Pipeline: HTML string → html5ever → RcDom → [`Node`] forest
//!
//! html5ever recovers from any malformed input the way a browser does, so
//! parsing never fails. Comments, doctypes and processing instructions are
//! dropped; only text and elements survive into the tree.

use super::{ElementNode, Fragment, Node};
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use tracing::trace;

/// Parse a complete HTML document into the forest below the document node
///
/// The result always holds an `html` element with `head` and `body`, as the
/// HTML5 tree builder synthesizes them when missing.
pub fn parse_page(source: &str) -> Vec<Node> {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(source);
    let nodes = convert_children(&dom.document);
    trace!(bytes = source.len(), roots = nodes.len(), "parsed page");
    nodes
}

/// Parse an HTML snippet the way assigning a container's `innerHTML` does
///
/// The snippet is parsed as a document body and the body's children become
/// the fragment. Table parts outside a table are dropped, same as in a browser.
pub fn parse_fragment(source: &str) -> Fragment {
    let nodes = parse_page(source);
    let body = nodes.iter().find_map(find_body);
    match body {
        Some(body) => Fragment::new(body.children.clone()),
        None => Fragment::new(nodes),
    }
}

fn find_body(node: &Node) -> Option<&ElementNode> {
    let element = node.as_element()?;
    if element.tag == "body" {
        return Some(element);
    }
    element.children.iter().find_map(find_body)
}

fn convert_children(handle: &Handle) -> Vec<Node> {
    handle
        .children
        .borrow()
        .iter()
        .filter_map(convert_handle)
        .collect()
}

fn convert_handle(handle: &Handle) -> Option<Node> {
    match &handle.data {
        NodeData::Text { contents } => Some(Node::text(contents.borrow().to_string())),
        NodeData::Element { name, attrs, .. } => {
            let mut element = ElementNode::new(&name.local);
            for attr in attrs.borrow().iter() {
                element
                    .attributes
                    .insert(attr.name.local.to_string(), attr.value.to_string());
            }
            element.children = convert_children(handle);
            Some(Node::Element(element))
        }
        NodeData::Document
        | NodeData::Doctype { .. }
        | NodeData::Comment { .. }
        | NodeData::ProcessingInstruction { .. } => None,
    }
}
