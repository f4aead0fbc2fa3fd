//! Range content cloning
//!
//! Copies the part of the forest between two boundary points, starting from
//! their common ancestor. Children wholly inside the range are deep-copied;
//! a child the start or end point descends into is copied shallow and filled
//! recursively with only its selected part. Text is sliced by char offset.

use super::BoundaryPoint;
use crate::dom::{Node, NodePath};

/// Clone everything between `start` and `end` below the node at `ancestor`
pub(super) fn contents_between(
    forest: &[Node],
    ancestor: &NodePath,
    start: &BoundaryPoint,
    end: &BoundaryPoint,
) -> Vec<Node> {
    if ancestor.is_root() {
        return children_between(forest, ancestor, Some(start), Some(end));
    }
    match ancestor.resolve(forest) {
        Some(node) => node_contents(node, ancestor, Some(start), Some(end)),
        None => Vec::new(),
    }
}

/// Contents of `node` clipped to the bounds that reach into it
///
/// A bound is either `None` (unbounded on that side), placed on `node`
/// itself, or placed somewhere below it.
fn node_contents(
    node: &Node,
    path: &NodePath,
    start: Option<&BoundaryPoint>,
    end: Option<&BoundaryPoint>,
) -> Vec<Node> {
    match node {
        Node::Text(text) => {
            let len = text.content.chars().count();
            let from = start
                .filter(|b| &b.container == path)
                .map_or(0, |b| b.offset.min(len));
            let to = end
                .filter(|b| &b.container == path)
                .map_or(len, |b| b.offset.min(len));
            if from >= to {
                return Vec::new();
            }
            let slice: String = text.content.chars().skip(from).take(to - from).collect();
            vec![Node::text(slice)]
        }
        Node::Element(element) => children_between(&element.children, path, start, end),
    }
}

fn children_between(
    children: &[Node],
    path: &NodePath,
    start: Option<&BoundaryPoint>,
    end: Option<&BoundaryPoint>,
) -> Vec<Node> {
    let depth = path.depth();
    let branch = |bound: &BoundaryPoint| bound.container.indices().get(depth).copied();

    // (first child index, bound to pass into that child if it is partial)
    let (first, start_inside) = match start {
        None => (0, None),
        Some(b) if &b.container == path => (b.offset, None),
        Some(b) => match branch(b) {
            Some(index) => (index, Some(b)),
            None => (0, None),
        },
    };
    // (one past the last child index, bound to pass into the last child)
    let (last, end_inside) = match end {
        None => (children.len(), None),
        Some(b) if &b.container == path => (b.offset, None),
        Some(b) => match branch(b) {
            Some(index) => (index + 1, Some(b)),
            None => (children.len(), None),
        },
    };

    let last = last.min(children.len());
    let mut out = Vec::new();
    for index in first..last {
        let child = &children[index];
        let child_start = start_inside.filter(|_| index == first);
        let child_end = end_inside.filter(|_| index + 1 == last);

        if child_start.is_none() && child_end.is_none() {
            out.push(child.clone());
            continue;
        }

        let child_path = path.child(index);
        match child {
            Node::Text(_) => out.extend(node_contents(child, &child_path, child_start, child_end)),
            Node::Element(element) => {
                let mut partial = element.shallow_clone();
                partial.children = node_contents(child, &child_path, child_start, child_end);
                out.push(Node::Element(partial));
            }
        }
    }
    out
}
