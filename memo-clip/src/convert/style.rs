//! Inline style and class hints for `div` and `span`
//!
//! The `style` attribute is parsed into normalized declarations (lower-cased
//! property and value, `!important` dropped) and run through an ordered rule
//! list: bold, then italic, then underline, then strike-through. The first
//! rule that matches decides the wrapping; nothing cascades or combines.
//!
//! Blocks (`div`) only look at the style attribute and only know bold and
//! italic. Inline elements (`span`) also match class-name substrings and know
//! underline. Numeric weights, `oblique` and `line-through` are only
//! recognized with extended styles turned on.

/// Formatting a style or class name can imply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleHint {
    Bold,
    Italic,
    Underline,
    Strikethrough,
}

impl StyleHint {
    pub fn wrap(self, content: &str) -> String {
        if content.is_empty() {
            return String::new();
        }
        match self {
            StyleHint::Bold => format!("**{content}**"),
            StyleHint::Italic => format!("*{content}*"),
            StyleHint::Underline => format!("<u>{content}</u>"),
            StyleHint::Strikethrough => format!("~~{content}~~"),
        }
    }
}

/// Which element family the hints are read for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleScope {
    Block,
    Inline,
}

struct StyleRule {
    hint: StyleHint,
    scopes: &'static [StyleScope],
    extended_only: bool,
    class_markers: &'static [&'static str],
    matches: fn(&Declarations, bool) -> bool,
}

const BOTH: &[StyleScope] = &[StyleScope::Block, StyleScope::Inline];
const INLINE: &[StyleScope] = &[StyleScope::Inline];

const STYLE_RULES: &[StyleRule] = &[
    StyleRule {
        hint: StyleHint::Bold,
        scopes: BOTH,
        extended_only: false,
        class_markers: &["bold", "strong"],
        matches: is_bold,
    },
    StyleRule {
        hint: StyleHint::Italic,
        scopes: BOTH,
        extended_only: false,
        class_markers: &["italic", "emphasis"],
        matches: is_italic,
    },
    StyleRule {
        hint: StyleHint::Underline,
        scopes: INLINE,
        extended_only: false,
        class_markers: &["underline"],
        matches: is_underline,
    },
    StyleRule {
        hint: StyleHint::Strikethrough,
        scopes: INLINE,
        extended_only: true,
        class_markers: &[],
        matches: is_strikethrough,
    },
];

/// First hint implied by an element's `style` (and, inline, `class`) attribute
pub fn style_hint(
    style: Option<&str>,
    class: Option<&str>,
    scope: StyleScope,
    extended: bool,
) -> Option<StyleHint> {
    let declarations = Declarations::parse(style.unwrap_or(""));
    let class = match scope {
        StyleScope::Inline => class.unwrap_or(""),
        StyleScope::Block => "",
    };

    STYLE_RULES
        .iter()
        .filter(|rule| rule.scopes.contains(&scope))
        .filter(|rule| extended || !rule.extended_only)
        .find(|rule| {
            (rule.matches)(&declarations, extended)
                || rule.class_markers.iter().any(|marker| class.contains(marker))
        })
        .map(|rule| rule.hint)
}

/// `property: value` pairs from an inline style attribute
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Declarations(Vec<(String, String)>);

impl Declarations {
    pub fn parse(style: &str) -> Self {
        let pairs = style
            .split(';')
            .filter_map(|declaration| declaration.split_once(':'))
            .map(|(property, value)| {
                let value = value.trim().to_ascii_lowercase();
                let value = value.trim_end_matches("!important").trim_end().to_string();
                (property.trim().to_ascii_lowercase(), value)
            })
            .filter(|(property, value)| !property.is_empty() && !value.is_empty())
            .collect();
        Declarations(pairs)
    }

    /// Value of the last declaration of `property`, as the cascade would pick it
    pub fn get(&self, property: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    fn decoration_has(&self, keyword: &str) -> bool {
        ["text-decoration", "text-decoration-line"]
            .iter()
            .filter_map(|property| self.get(property))
            .any(|value| value.split_whitespace().any(|word| word == keyword))
    }
}

fn is_bold(declarations: &Declarations, extended: bool) -> bool {
    match declarations.get("font-weight") {
        Some("bold") | Some("bolder") => true,
        Some(weight) if extended => weight.parse::<u16>().is_ok_and(|w| w >= 600),
        _ => false,
    }
}

fn is_italic(declarations: &Declarations, extended: bool) -> bool {
    match declarations.get("font-style") {
        Some("italic") => true,
        Some(style) if extended => style.starts_with("oblique"),
        _ => false,
    }
}

fn is_underline(declarations: &Declarations, _extended: bool) -> bool {
    declarations.decoration_has("underline")
}

fn is_strikethrough(declarations: &Declarations, _extended: bool) -> bool {
    declarations.decoration_has("line-through")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inline(style: &str) -> Option<StyleHint> {
        style_hint(Some(style), None, StyleScope::Inline, false)
    }

    #[test]
    fn declarations_are_normalized() {
        let declarations = Declarations::parse(" Font-Weight : BOLD !important ; color:red;;");
        assert_eq!(declarations.get("font-weight"), Some("bold"));
        assert_eq!(declarations.get("color"), Some("red"));
        assert_eq!(declarations.get("font-style"), None);
    }

    #[test]
    fn spacing_variants_match_alike() {
        assert_eq!(inline("font-weight: bold"), Some(StyleHint::Bold));
        assert_eq!(inline("font-weight:bold"), Some(StyleHint::Bold));
        assert_eq!(inline("font-style:italic"), Some(StyleHint::Italic));
        assert_eq!(inline("text-decoration: underline"), Some(StyleHint::Underline));
    }

    #[test]
    fn bold_wins_over_italic_regardless_of_order() {
        assert_eq!(
            inline("font-style: italic; font-weight: bold"),
            Some(StyleHint::Bold)
        );
    }

    #[test]
    fn class_names_hint_inline_only() {
        assert_eq!(
            style_hint(None, Some("text-bold big"), StyleScope::Inline, false),
            Some(StyleHint::Bold)
        );
        assert_eq!(
            style_hint(None, Some("emphasis"), StyleScope::Inline, false),
            Some(StyleHint::Italic)
        );
        assert_eq!(
            style_hint(None, Some("text-bold"), StyleScope::Block, false),
            None
        );
    }

    #[test]
    fn blocks_do_not_underline() {
        assert_eq!(
            style_hint(Some("text-decoration: underline"), None, StyleScope::Block, false),
            None
        );
    }

    #[test]
    fn extended_styles_are_opt_in() {
        assert_eq!(inline("font-weight: 700"), None);
        assert_eq!(inline("text-decoration: line-through"), None);

        let extended = |style| style_hint(Some(style), None, StyleScope::Inline, true);
        assert_eq!(extended("font-weight: 700"), Some(StyleHint::Bold));
        assert_eq!(extended("font-weight: 400"), None);
        assert_eq!(extended("font-style: oblique 10deg"), Some(StyleHint::Italic));
        assert_eq!(
            extended("text-decoration: line-through"),
            Some(StyleHint::Strikethrough)
        );
    }

    #[test]
    fn empty_content_is_not_wrapped() {
        assert_eq!(StyleHint::Bold.wrap(""), "");
        assert_eq!(StyleHint::Underline.wrap("u"), "<u>u</u>");
    }
}
