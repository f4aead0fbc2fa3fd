//! Export tests (HTML fragment → markup)
//!
//! The markup is checked twice: as text, and as the CommonMark AST comrak
//! builds from it, so a change that keeps the string plausible but breaks
//! its meaning still shows up.

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};
use insta::assert_snapshot;
use memo_clip::{html_to_markup, ConvertOptions};
use pretty_assertions::assert_eq;
use std::collections::HashSet;

const KITCHENSINK: &str = include_str!("fixtures/kitchensink.html");

fn markup(html: &str) -> String {
    html_to_markup(html, &ConvertOptions::default())
}

/// Helper to convert HTML to markup and parse it to a Comrak AST
fn html_to_comrak_ast<'a>(html: &str, arena: &'a Arena<AstNode<'a>>) -> &'a AstNode<'a> {
    let md = markup(html);
    parse_document(arena, &md, &ComrakOptions::default())
}

/// Helper to recursively collect node types from a Comrak AST
fn collect_node_types<'a>(node: &'a AstNode<'a>, types: &mut HashSet<&'static str>) {
    let type_name = match &node.data.borrow().value {
        NodeValue::Document => "Document",
        NodeValue::Paragraph => "Paragraph",
        NodeValue::Heading(_) => "Heading",
        NodeValue::List(_) => "List",
        NodeValue::Item(_) => "Item",
        NodeValue::CodeBlock(_) => "CodeBlock",
        NodeValue::BlockQuote => "BlockQuote",
        NodeValue::Strong => "Strong",
        NodeValue::Emph => "Emph",
        NodeValue::Code(_) => "Code",
        NodeValue::Link(_) => "Link",
        NodeValue::Image(_) => "Image",
        _ => "Other",
    };
    types.insert(type_name);

    for child in node.children() {
        collect_node_types(child, types);
    }
}

// ============================================================================
// BASIC ELEMENT TESTS
// ============================================================================

#[test]
fn test_inline_elements() {
    assert_eq!(markup("<strong>hi</strong>"), "**hi**");
    assert_eq!(markup("<em>hi</em>"), "*hi*");
    assert_eq!(
        markup(r#"<a href="https://x.test">go</a>"#),
        "[go](https://x.test)"
    );
    assert_eq!(markup("<h2>Title</h2>"), "## Title");
}

#[test]
fn test_unordered_list() {
    // Raw converter output keeps the trailing newline, normalizing trims it.
    let fragment = memo_clip::dom::parse::parse_fragment("<ul><li>a</li><li>b</li></ul>");
    assert_eq!(memo_clip::convert(&fragment), "- a\n- b\n");
    assert_eq!(markup("<ul><li>a</li><li>b</li></ul>"), "- a\n- b");
}

#[test]
fn test_table_trailing_empty_cells_are_dropped() {
    assert_eq!(
        markup("<table><tr><th>a</th><th>b</th></tr><tr><td>1</td><td>2</td></tr></table>"),
        "| a | b |\n| 1 | 2 |"
    );
    assert_eq!(markup("<table><tr><td>a</td><td></td></tr></table>"), "| a |");
}

// ============================================================================
// DOCUMENT TESTS
// ============================================================================

#[test]
fn test_kitchensink_snapshot() {
    assert_snapshot!(markup(KITCHENSINK), @r###"
# Clipping notes
Some **bold**, *italic* and `code` text with a [link](https://example.test/doc).

- first

- second

```
fn main() {}
```
> quoted
"###);
}

#[test]
fn test_kitchensink_parses_back() {
    let arena = Arena::new();
    let root = html_to_comrak_ast(KITCHENSINK, &arena);

    let mut types = HashSet::new();
    collect_node_types(root, &mut types);

    for expected in [
        "Heading",
        "Paragraph",
        "Strong",
        "Emph",
        "Code",
        "Link",
        "List",
        "Item",
        "CodeBlock",
        "BlockQuote",
    ] {
        assert!(types.contains(expected), "missing {expected} in {types:?}");
    }
}

#[test]
fn test_heading_level_survives() {
    let arena = Arena::new();
    let root = html_to_comrak_ast("<h3>Deep</h3><p>after</p>", &arena);

    let levels: Vec<u8> = root
        .children()
        .filter_map(|child| match &child.data.borrow().value {
            NodeValue::Heading(heading) => Some(heading.level),
            _ => None,
        })
        .collect();
    assert_eq!(levels, vec![3]);
}

#[test]
fn test_ordered_list_parses_as_ordered() {
    let arena = Arena::new();
    let root = html_to_comrak_ast("<ol><li>one</li><li>two</li></ol>", &arena);

    let first = root.first_child().expect("document has a list");
    match &first.data.borrow().value {
        NodeValue::List(list) => assert_eq!(list.list_type, ListType::Ordered),
        other => panic!("expected a list, got {other:?}"),
    };
    assert_eq!(first.children().count(), 2);
}

#[test]
fn test_link_target_is_kept() {
    let arena = Arena::new();
    let root = html_to_comrak_ast(
        r#"<p>see <a href="https://example.test/a?b=c">the docs</a></p>"#,
        &arena,
    );

    let mut urls = Vec::new();
    for node in root.descendants() {
        if let NodeValue::Link(link) = &node.data.borrow().value {
            urls.push(link.url.clone());
        }
    }
    assert_eq!(urls, vec!["https://example.test/a?b=c".to_string()]);
}
