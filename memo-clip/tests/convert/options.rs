//! Converter option tests
//!
//! The defaults must reproduce the plain rule table; every option only ever
//! adds behavior on top of it.

use memo_clip::convert::rules::{rule_table, TagRule};
use memo_clip::{html_to_markup, ConvertOptions, ListNumbering};

const ARTICLE: &str = r#"<ol start="3"><li>three</li><li>four</li></ol><p>Use <span style="font-weight: 700">x * y</span> or <span style="text-decoration: line-through">_old_</span>.</p><pre><code>a * b</code></pre>"#;

#[test]
fn test_defaults_are_literal() {
    assert_eq!(
        html_to_markup(ARTICLE, &ConvertOptions::default()),
        "1. three\n1. four\nUse x * y or _old_.\n\n```\n`a * b`\n```"
    );
}

#[test]
fn test_sequential_numbering() {
    let options = ConvertOptions {
        list_numbering: ListNumbering::Sequential,
        ..ConvertOptions::default()
    };
    assert!(html_to_markup(ARTICLE, &options).starts_with("3. three\n4. four\n"));
}

#[test]
fn test_extended_styles() {
    let options = ConvertOptions {
        extended_styles: true,
        ..ConvertOptions::default()
    };
    assert!(html_to_markup(ARTICLE, &options).contains("Use **x * y** or ~~_old_~~."));
}

#[test]
fn test_escape_text_leaves_code_alone() {
    let options = ConvertOptions {
        escape_text: true,
        ..ConvertOptions::default()
    };
    let markup = html_to_markup(ARTICLE, &options);
    assert!(markup.contains(r"Use x \* y or \_old\_."));
    assert!(markup.ends_with("```\n`a * b`\n```"));
}

#[test]
fn test_all_options_combined() {
    let options = ConvertOptions {
        list_numbering: ListNumbering::Sequential,
        escape_text: true,
        extended_styles: true,
    };
    assert_eq!(
        html_to_markup(ARTICLE, &options),
        "3. three\n4. four\nUse **x \\* y** or ~~\\_old\\_~~.\n\n```\n`a * b`\n```"
    );
}

#[test]
fn test_rule_table_covers_block_and_inline_tags() {
    let table = rule_table();
    let rule = |tag: &str| table.iter().find(|(name, _)| *name == tag).map(|(_, r)| *r);

    assert_eq!(rule("h4"), Some(TagRule::Heading(4)));
    assert_eq!(rule("li"), Some(TagRule::ListItem));
    assert_eq!(
        rule("mark"),
        Some(TagRule::Wrap {
            open: "==",
            close: "=="
        })
    );
    assert_eq!(rule("section"), None);
}
