//! Element tree model
//!
//! A small, owned node hierarchy independent of any document API. Pages and
//! fragments are both plain `Vec<Node>` forests; the live-document side of a
//! selection addresses nodes by [`NodePath`] instead of parent pointers, so the
//! tree stays a simple acyclic value that can be cloned and compared.
//!
//! Conversion from and to HTML goes through `html5ever` + `markup5ever_rcdom`
//! (see [`parse`] and [`serialize`]); the rest of the crate only ever sees the
//! types defined here.

pub mod parse;
pub mod serialize;

use std::collections::BTreeMap;
use std::fmt;

/// A node of the element tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(TextNode),
    Element(ElementNode),
}

/// Leaf holding a run of character data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    pub content: String,
}

/// Element with a lower-cased tag name, attributes and ordered children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(TextNode {
            content: content.into(),
        })
    }

    pub fn element(element: ElementNode) -> Self {
        Node::Element(element)
    }

    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// Children of an element; text nodes have none
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(element) => &element.children,
            Node::Text(_) => &[],
        }
    }

    /// Number of boundary positions inside this node (chars for text, children for elements)
    pub fn len(&self) -> usize {
        match self {
            Node::Text(text) => text.content.chars().count(),
            Node::Element(element) => element.children.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Concatenated character data of this node and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&text.content),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl ElementNode {
    /// Create an element; the tag name is lower-cased
    pub fn new(tag: &str) -> Self {
        ElementNode {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes
            .insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_text(self, content: impl Into<String>) -> Self {
        self.with_child(Node::text(content))
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Shallow copy: same tag and attributes, no children
    pub fn shallow_clone(&self) -> Self {
        ElementNode {
            tag: self.tag.clone(),
            attributes: self.attributes.clone(),
            children: Vec::new(),
        }
    }

    /// Whether any descendant element (not this one) satisfies `pred`
    pub fn has_descendant(&self, pred: &dyn Fn(&ElementNode) -> bool) -> bool {
        self.children.iter().any(|child| match child {
            Node::Element(element) => pred(element) || element.has_descendant(pred),
            Node::Text(_) => false,
        })
    }
}

impl From<ElementNode> for Node {
    fn from(element: ElementNode) -> Self {
        Node::Element(element)
    }
}

/// The cloned contents of a selection range
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub nodes: Vec<Node>,
}

impl Fragment {
    pub fn new(nodes: Vec<Node>) -> Self {
        Fragment { nodes }
    }

    /// A fragment made of a single text node
    pub fn from_text(content: impl Into<String>) -> Self {
        Fragment {
            nodes: vec![Node::text(content)],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn text_content(&self) -> String {
        self.nodes.iter().map(Node::text_content).collect()
    }

    /// Text as a selection reads back to the user
    ///
    /// Unlike [`Fragment::text_content`], block boundaries become line breaks
    /// (two around `p`, one around other blocks), `br` is a newline and table
    /// cells are tab separated. Whitespace-only runs between blocks are
    /// dropped outside `pre`.
    pub fn rendered_text(&self) -> String {
        let mut pieces = Vec::new();
        collect_pieces(&self.nodes, false, &mut pieces);
        join_pieces(&pieces)
    }

    /// Serialized HTML of the fragment, as a container's `innerHTML` would read
    pub fn to_html(&self) -> String {
        serialize::fragment_to_html(self)
    }
}

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "caption", "dd", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table", "tr", "ul",
];

enum Piece<'a> {
    Text(&'a str),
    /// Whitespace-only run, kept only between two text pieces
    Space(&'a str),
    /// Required line breaks; adjacent breaks collapse to the largest
    Break(usize),
}

fn collect_pieces<'a>(nodes: &'a [Node], in_pre: bool, pieces: &mut Vec<Piece<'a>>) {
    let mut previous_cell = false;
    for node in nodes {
        let element = match node {
            Node::Text(text) if !in_pre && text.content.trim().is_empty() => {
                pieces.push(Piece::Space(&text.content));
                continue;
            }
            Node::Text(text) => {
                pieces.push(Piece::Text(&text.content));
                continue;
            }
            Node::Element(element) => element,
        };

        let tag = element.tag.to_ascii_lowercase();
        if tag == "br" {
            pieces.push(Piece::Text("\n"));
            continue;
        }

        let is_cell = matches!(tag.as_str(), "td" | "th");
        if is_cell && previous_cell {
            pieces.push(Piece::Text("\t"));
        }
        previous_cell = is_cell;

        let breaks = match tag.as_str() {
            "p" => 2,
            tag if BLOCK_TAGS.contains(&tag) => 1,
            _ => 0,
        };
        if breaks > 0 {
            pieces.push(Piece::Break(breaks));
        }
        collect_pieces(&element.children, in_pre || tag == "pre", pieces);
        if breaks > 0 {
            pieces.push(Piece::Break(breaks));
        }
    }
}

fn join_pieces(pieces: &[Piece]) -> String {
    let mut out = String::new();
    let mut pending = 0;
    for (index, piece) in pieces.iter().enumerate() {
        match piece {
            Piece::Break(count) => pending = pending.max(*count),
            Piece::Text(text) => {
                if !out.is_empty() {
                    out.push_str(&"\n".repeat(pending));
                }
                out.push_str(text);
                pending = 0;
            }
            Piece::Space(space) => {
                let between_text = !out.is_empty()
                    && pending == 0
                    && matches!(pieces.get(index + 1), Some(Piece::Text(_)));
                if between_text {
                    out.push_str(space);
                }
            }
        }
    }
    out
}

/// Index path from the top of a forest down to a node
///
/// The empty path denotes the forest itself (the document). Every prefix of a
/// path is an ancestor of the node it addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        NodePath(Vec::new())
    }

    pub fn new(indices: Vec<usize>) -> Self {
        NodePath(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        NodePath(indices)
    }

    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(NodePath(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// True when `self` is a strict prefix of `other`
    pub fn is_ancestor_of(&self, other: &NodePath) -> bool {
        self.0.len() < other.0.len() && other.0.starts_with(&self.0)
    }

    /// Deepest path that is a prefix of both
    pub fn common_ancestor(&self, other: &NodePath) -> NodePath {
        let shared = self
            .0
            .iter()
            .zip(other.0.iter())
            .take_while(|(a, b)| a == b)
            .count();
        NodePath(self.0[..shared].to_vec())
    }

    /// Resolve the path against a forest; `None` for the root or a dangling path
    pub fn resolve<'a>(&self, forest: &'a [Node]) -> Option<&'a Node> {
        let (first, rest) = self.0.split_first()?;
        let mut node = forest.get(*first)?;
        for index in rest {
            node = node.children().get(*index)?;
        }
        Some(node)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        write!(f, "/{}", parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Node> {
        vec![ElementNode::new("P")
            .with_text("hello ")
            .with_child(ElementNode::new("strong").with_text("world").into())
            .into()]
    }

    #[test]
    fn tags_are_lower_cased() {
        let forest = sample();
        assert_eq!(forest[0].as_element().unwrap().tag, "p");
    }

    #[test]
    fn text_content_concatenates_in_order() {
        let forest = sample();
        assert_eq!(forest[0].text_content(), "hello world");
    }

    #[test]
    fn rendered_text_breaks_at_blocks() {
        let fragment = parse::parse_fragment(
            "<h2>Birds</h2>\n<p>The <em>heron</em> waits.</p>\n<p>Plain<br>line</p>\n",
        );
        assert_eq!(
            fragment.rendered_text(),
            "Birds\n\nThe heron waits.\n\nPlain\nline"
        );
        assert_eq!(
            fragment.text_content(),
            "Birds\nThe heron waits.\nPlainline\n"
        );
    }

    #[test]
    fn rendered_text_keeps_inline_runs_and_pre() {
        let fragment = parse::parse_fragment("lo <b>bo</b> <i>x</i><pre>a\n  b</pre>");
        assert_eq!(fragment.rendered_text(), "lo bo x\na\n  b");
    }

    #[test]
    fn rendered_text_tabs_between_cells() {
        let fragment =
            parse::parse_fragment("<table><tr><td>a</td><td>b</td></tr><tr><td>c</td></tr></table>");
        assert_eq!(fragment.rendered_text(), "a\tb\nc");
    }

    #[test]
    fn paths_resolve_and_relate() {
        let forest = sample();
        let strong = NodePath::new(vec![0, 1]);
        let strong_text = strong.child(0);

        assert_eq!(strong_text.resolve(&forest), Some(&Node::text("world")));
        assert!(strong.is_ancestor_of(&strong_text));
        assert!(!strong_text.is_ancestor_of(&strong));
        assert_eq!(
            strong_text.common_ancestor(&NodePath::new(vec![0, 0])),
            NodePath::new(vec![0])
        );
        assert_eq!(NodePath::root().resolve(&forest), None);
        assert_eq!(NodePath::new(vec![3]).resolve(&forest), None);
        assert_eq!(strong_text.to_string(), "/0/1/0");
    }

    #[test]
    fn has_descendant_skips_self() {
        let em = ElementNode::new("em").with_text("x");
        assert!(!em.has_descendant(&|e| e.tag == "em"));

        let p = ElementNode::new("p").with_child(em.into());
        assert!(p.has_descendant(&|e| e.tag == "em"));
    }
}
