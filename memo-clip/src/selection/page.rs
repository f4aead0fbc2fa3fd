//! Parsed live document a selection points into

use crate::dom::parse::parse_page;
use crate::dom::{Node, NodePath};
use crate::error::ClipError;

/// A rendered document: the node forest plus the landmarks capture needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    nodes: Vec<Node>,
    body: NodePath,
    title: Option<String>,
}

impl Page {
    /// Parse a full HTML document
    pub fn parse(source: &str) -> Result<Self, ClipError> {
        Self::from_nodes(parse_page(source))
    }

    /// Wrap an existing forest; it must contain a `body` element
    pub fn from_nodes(nodes: Vec<Node>) -> Result<Self, ClipError> {
        let body = find_tag(&nodes, &NodePath::root(), "body")
            .ok_or_else(|| ClipError::Parse("document has no <body> element".to_string()))?;
        let title = find_tag(&nodes, &NodePath::root(), "title")
            .and_then(|path| path.resolve(&nodes))
            .map(|node| node.text_content().trim().to_string())
            .filter(|title| !title.is_empty());

        Ok(Page { nodes, body, title })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn body_path(&self) -> &NodePath {
        &self.body
    }

    pub fn body(&self) -> Option<&Node> {
        self.body.resolve(&self.nodes)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn resolve(&self, path: &NodePath) -> Option<&Node> {
        path.resolve(&self.nodes)
    }

    /// Text runs below `<body>` in document order, skipping script and style
    pub fn text_runs(&self) -> Vec<TextRun> {
        let mut runs = Vec::new();
        let mut offset = 0;
        if let Some(body) = self.body() {
            collect_runs(body, &self.body, &mut offset, &mut runs);
        }
        runs
    }

    /// Tag names from the parent of `path` up to (not including) `<body>`
    pub fn ancestor_tags(&self, path: &NodePath) -> Vec<String> {
        let mut tags = Vec::new();
        let mut current = path.parent();
        while let Some(ancestor) = current {
            if ancestor.is_root() || ancestor == self.body {
                break;
            }
            if let Some(element) = self.resolve(&ancestor).and_then(Node::as_element) {
                tags.push(element.tag.clone());
            }
            current = ancestor.parent();
        }
        tags
    }
}

/// A non-empty text node and where its characters fall in the body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub path: NodePath,
    /// Offset of the first char in the concatenated body text
    pub start: usize,
    pub len: usize,
}

impl TextRun {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

fn collect_runs(node: &Node, path: &NodePath, offset: &mut usize, runs: &mut Vec<TextRun>) {
    match node {
        Node::Text(text) => {
            let len = text.content.chars().count();
            if len > 0 {
                runs.push(TextRun {
                    path: path.clone(),
                    start: *offset,
                    len,
                });
                *offset += len;
            }
        }
        Node::Element(element) => {
            if matches!(element.tag.as_str(), "script" | "style" | "template") {
                return;
            }
            for (index, child) in element.children.iter().enumerate() {
                collect_runs(child, &path.child(index), offset, runs);
            }
        }
    }
}

fn find_tag(nodes: &[Node], base: &NodePath, tag: &str) -> Option<NodePath> {
    for (index, node) in nodes.iter().enumerate() {
        let path = base.child(index);
        if let Some(element) = node.as_element() {
            if element.tag == tag {
                return Some(path);
            }
            if let Some(found) = find_tag(&element.children, &path, tag) {
                return Some(found);
            }
        }
    }
    None
}
