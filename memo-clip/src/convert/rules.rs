//! Tag rules
//!
//! Each tag maps to one [`TagRule`]; the rule receives the already converted
//! content of the element's children and decides how to wrap it. Tags missing
//! from the table pass their content through untouched, so conversion never
//! fails on unknown markup.

use super::style::{style_hint, StyleScope};
use super::{ConvertOptions, ListNumbering};
use crate::dom::ElementNode;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

/// How an element's converted content is turned into markup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagRule {
    /// Surround non-empty content with fixed delimiters
    Wrap {
        open: &'static str,
        close: &'static str,
    },
    /// Fenced code block
    Fence,
    /// ATX heading of the given level
    Heading(usize),
    /// Content followed by a blank line
    Paragraph,
    /// Bold or italic from the inline style attribute
    StyledBlock,
    /// Bold, italic or underline from the style or class attribute
    StyledInline,
    LineBreak,
    ThematicBreak,
    Blockquote,
    Passthrough,
    /// Marker chosen by the parent tag
    ListItem,
    Link,
    Image,
    Table,
    TableRow,
    TableCell,
}

/// Where a rule is being applied
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub parent_tag: Option<&'a str>,
    /// Position of a list item within its `ol`, when numbering sequentially
    pub ordinal: Option<i64>,
    pub options: &'a ConvertOptions,
}

static TAG_RULES: Lazy<HashMap<&'static str, TagRule>> = Lazy::new(|| {
    use TagRule::*;

    HashMap::from([
        ("strong", Wrap { open: "**", close: "**" }),
        ("b", Wrap { open: "**", close: "**" }),
        ("em", Wrap { open: "*", close: "*" }),
        ("i", Wrap { open: "*", close: "*" }),
        ("code", Wrap { open: "`", close: "`" }),
        ("del", Wrap { open: "~~", close: "~~" }),
        ("s", Wrap { open: "~~", close: "~~" }),
        ("mark", Wrap { open: "==", close: "==" }),
        ("sup", Wrap { open: "^", close: "^" }),
        ("sub", Wrap { open: "~", close: "~" }),
        ("u", Wrap { open: "<u>", close: "</u>" }),
        ("pre", Fence),
        ("h1", Heading(1)),
        ("h2", Heading(2)),
        ("h3", Heading(3)),
        ("h4", Heading(4)),
        ("h5", Heading(5)),
        ("h6", Heading(6)),
        ("p", Paragraph),
        ("div", StyledBlock),
        ("span", StyledInline),
        ("br", LineBreak),
        ("hr", ThematicBreak),
        ("blockquote", Blockquote),
        ("ul", Passthrough),
        ("ol", Passthrough),
        ("li", ListItem),
        ("a", Link),
        ("img", Image),
        ("table", Table),
        ("tr", TableRow),
        ("td", TableCell),
        ("th", TableCell),
    ])
});

/// Rule for `tag`; unknown tags pass through
pub fn rule_for(tag: &str) -> TagRule {
    TAG_RULES
        .get(tag.to_ascii_lowercase().as_str())
        .copied()
        .unwrap_or(TagRule::Passthrough)
}

/// Every known tag with its rule, sorted by tag name
pub fn rule_table() -> Vec<(&'static str, TagRule)> {
    let mut table: Vec<_> = TAG_RULES.iter().map(|(tag, rule)| (*tag, *rule)).collect();
    table.sort_by_key(|(tag, _)| *tag);
    table
}

impl TagRule {
    /// Wrap `content`, the converted children of `element`
    pub fn apply(&self, content: String, element: &ElementNode, ctx: &RuleContext) -> String {
        match *self {
            TagRule::Wrap { open, close } => wrap_non_empty(content, open, close),
            TagRule::Fence => wrap_non_empty(content, "```\n", "\n```"),
            TagRule::Heading(level) => {
                if content.is_empty() {
                    content
                } else {
                    format!("{} {}", "#".repeat(level), content)
                }
            }
            TagRule::Paragraph => {
                if content.is_empty() {
                    content
                } else {
                    format!("{content}\n\n")
                }
            }
            TagRule::StyledBlock | TagRule::StyledInline => {
                let scope = if *self == TagRule::StyledBlock {
                    StyleScope::Block
                } else {
                    StyleScope::Inline
                };
                match style_hint(
                    element.attr("style"),
                    element.attr("class"),
                    scope,
                    ctx.options.extended_styles,
                ) {
                    Some(hint) => hint.wrap(&content),
                    None => content,
                }
            }
            TagRule::LineBreak => "\n".to_string(),
            TagRule::ThematicBreak => "\n---\n".to_string(),
            TagRule::Blockquote => {
                if content.is_empty() {
                    return content;
                }
                content
                    .split('\n')
                    .map(|line| {
                        if line.is_empty() {
                            ">".to_string()
                        } else {
                            format!("> {line}")
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            TagRule::Passthrough => content,
            TagRule::ListItem => {
                if content.is_empty() {
                    return content;
                }
                format!("{}{content}\n", list_marker(ctx))
            }
            TagRule::Link => match element.attr("href") {
                Some(href) if !href.is_empty() && !content.is_empty() => {
                    format!("[{content}]({href})")
                }
                _ => content,
            },
            TagRule::Image => match element.attr("src") {
                Some(src) if !src.is_empty() => {
                    format!("![{}]({src})", element.attr("alt").unwrap_or(""))
                }
                _ => content,
            },
            TagRule::Table => {
                if content.is_empty() {
                    content
                } else {
                    format!("{content}\n")
                }
            }
            TagRule::TableRow => {
                if content.is_empty() {
                    content
                } else {
                    format!("{content}|\n")
                }
            }
            TagRule::TableCell => {
                if content.is_empty() {
                    "| ".to_string()
                } else {
                    format!("| {content} ")
                }
            }
        }
    }
}

fn wrap_non_empty(content: String, open: &str, close: &str) -> String {
    if content.is_empty() {
        content
    } else {
        format!("{open}{content}{close}")
    }
}

fn list_marker(ctx: &RuleContext) -> String {
    if ctx.parent_tag != Some("ol") {
        return "- ".to_string();
    }
    match (ctx.options.list_numbering, ctx.ordinal) {
        (ListNumbering::Sequential, Some(n)) => format!("{n}. "),
        _ => "1. ".to_string(),
    }
}

impl fmt::Display for TagRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagRule::Wrap { open, close } => write!(f, "{open}content{close}"),
            TagRule::Fence => write!(f, "```\\ncontent\\n```"),
            TagRule::Heading(level) => write!(f, "{} content", "#".repeat(*level)),
            TagRule::Paragraph => write!(f, "content\\n\\n"),
            TagRule::StyledBlock => write!(f, "bold or italic from style"),
            TagRule::StyledInline => write!(f, "bold, italic or underline from style/class"),
            TagRule::LineBreak => write!(f, "\\n"),
            TagRule::ThematicBreak => write!(f, "\\n---\\n"),
            TagRule::Blockquote => write!(f, "> content"),
            TagRule::Passthrough => write!(f, "content"),
            TagRule::ListItem => write!(f, "- content / 1. content"),
            TagRule::Link => write!(f, "[content](href)"),
            TagRule::Image => write!(f, "![alt](src)"),
            TagRule::Table => write!(f, "rows\\n"),
            TagRule::TableRow => write!(f, "cells|\\n"),
            TagRule::TableCell => write!(f, "| content "),
        }
    }
}
