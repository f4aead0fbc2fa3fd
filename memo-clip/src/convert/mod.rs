//! Element tree to markup
//!
//! A post-order walk over a [`Fragment`]: text is emitted as is, and every
//! element first converts its children, concatenates the results and then
//! hands them to its tag's [`TagRule`]. The walk is pure and deterministic;
//! the same fragment and options always give the same string.
//!
//! The output is raw. Runs of blank lines and dangling table pipes are left
//! for [`crate::normalize`] to tidy up.

pub mod rules;
pub mod style;

pub use rules::{rule_for, rule_table, RuleContext, TagRule};

use crate::dom::{ElementNode, Fragment, Node};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// How `li` children of an `ol` are numbered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListNumbering {
    /// Every ordered item gets `1.`
    #[default]
    Literal,
    /// 1, 2, 3 per list, starting from the `start` attribute when numeric
    Sequential,
}

/// Knobs for the converter; the default reproduces the plain rule table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    pub list_numbering: ListNumbering,
    /// Backslash-escape markup characters in text outside `pre`/`code`
    pub escape_text: bool,
    /// Numeric weights, `oblique` and `line-through` in style attributes
    pub extended_styles: bool,
}

/// Characters escaped when [`ConvertOptions::escape_text`] is on
pub const ESCAPED_CHARS: &[char] = &['\\', '*', '_', '`', '#'];

#[derive(Debug, Default)]
pub struct Converter {
    options: ConvertOptions,
}

/// Per-node walk state
#[derive(Clone, Copy)]
struct Walk<'a> {
    parent_tag: Option<&'a str>,
    ordinal: Option<i64>,
    in_code: bool,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Converter { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert the fragment's top-level nodes and concatenate the results
    pub fn convert(&self, fragment: &Fragment) -> String {
        let walk = Walk {
            parent_tag: None,
            ordinal: None,
            in_code: false,
        };
        let output = self.convert_children(&fragment.nodes, walk);
        trace!(nodes = fragment.nodes.len(), len = output.len(), "converted fragment");
        output
    }

    fn convert_children(&self, nodes: &[Node], walk: Walk) -> String {
        nodes
            .iter()
            .map(|node| self.convert_node(node, walk))
            .collect()
    }

    fn convert_node(&self, node: &Node, walk: Walk) -> String {
        match node {
            Node::Text(text) if self.options.escape_text && !walk.in_code => {
                escape_text(&text.content)
            }
            Node::Text(text) => text.content.clone(),
            Node::Element(element) => self.convert_element(element, walk),
        }
    }

    fn convert_element(&self, element: &ElementNode, walk: Walk) -> String {
        let tag = element.tag.to_ascii_lowercase();
        let tag = tag.as_str();
        let inner = Walk {
            parent_tag: Some(tag),
            ordinal: None,
            in_code: walk.in_code || matches!(tag, "pre" | "code"),
        };

        let content = if tag == "ol" && self.options.list_numbering == ListNumbering::Sequential {
            self.convert_ordered_items(element, inner)
        } else {
            self.convert_children(&element.children, inner)
        };

        let rule = rule_for(tag);
        let ctx = RuleContext {
            parent_tag: walk.parent_tag,
            ordinal: walk.ordinal,
            options: &self.options,
        };
        let output = rule.apply(content, element, &ctx);
        trace!(tag, ?rule, len = output.len(), "converted element");
        output
    }

    /// Children of an `ol`, each `li` carrying its running number
    fn convert_ordered_items(&self, list: &ElementNode, inner: Walk) -> String {
        let mut next = list
            .attr("start")
            .and_then(|start| start.trim().parse::<i64>().ok())
            .unwrap_or(1);

        let mut output = String::new();
        for child in &list.children {
            let is_item = child
                .as_element()
                .is_some_and(|el| el.tag.eq_ignore_ascii_case("li"));
            let walk = if is_item {
                let walk = Walk {
                    ordinal: Some(next),
                    ..inner
                };
                next = next.saturating_add(1);
                walk
            } else {
                inner
            };
            output.push_str(&self.convert_node(child, walk));
        }
        output
    }
}

/// Convert with default options
pub fn convert(fragment: &Fragment) -> String {
    Converter::default().convert(fragment)
}

pub fn convert_with(fragment: &Fragment, options: &ConvertOptions) -> String {
    Converter::new(options.clone()).convert(fragment)
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if ESCAPED_CHARS.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
