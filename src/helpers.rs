//! String helpers for class lists, inline styles and input classification.
//!
//! These are the small collaborators the content accessors and the
//! resolver lean on. None of them touch the tree.

use regex::Regex;
use std::sync::LazyLock;

/// Text that opens with a tag and may trail off in plain text.
#[allow(clippy::expect_used)]
static RAW_HTML_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(<[\w\W]+>)[^>]*$").expect("valid regex"));

/// A bare `#id` selector.
#[allow(clippy::expect_used)]
static ID_SELECTOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#([\w-]+)$").expect("valid regex"));

/// Split a `class` attribute value into its class names.
#[must_use]
pub fn split_class(class: &str) -> Vec<&str> {
    class.split_whitespace().collect()
}

/// Parse an inline `style` value into ordered `(property, value)` pairs.
///
/// Declarations without a colon are dropped. A property repeated later
/// overrides the earlier value but keeps its first position.
#[must_use]
pub fn split_css(style: &str) -> Vec<(String, String)> {
    let mut css: Vec<(String, String)> = Vec::new();
    for declaration in style.split(';') {
        let Some((name, value)) = declaration.trim().split_once(':') else {
            continue;
        };
        let (name, value) = (name.trim(), value.trim());
        match css.iter_mut().find(|(key, _)| key == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => css.push((name.to_string(), value.to_string())),
        }
    }
    css
}

/// Join `(property, value)` pairs back into an inline `style` value.
///
/// ```
/// use rs_html_query::helpers::implode_css;
///
/// let css = vec![("color".to_string(), "red".to_string())];
/// assert_eq!(implode_css(&css), "color: red;");
/// assert_eq!(implode_css(&[]), "");
/// ```
#[must_use]
pub fn implode_css(css: &[(String, String)]) -> String {
    if css.is_empty() {
        return String::new();
    }
    let joined = css
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect::<Vec<_>>()
        .join("; ");
    format!("{joined};")
}

/// Keys of `haystack` equal to `needle` ignoring ASCII case.
#[must_use]
pub fn case_insensitive_search<'a, I>(needle: &str, haystack: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    haystack
        .into_iter()
        .filter(|key| key.eq_ignore_ascii_case(needle))
        .collect()
}

/// Whether `input` should be parsed as markup rather than used as a selector.
///
/// ```
/// use rs_html_query::helpers::is_raw_html;
///
/// assert!(is_raw_html("<p>x</p>"));
/// assert!(is_raw_html("  <b>bold</b> tail"));
/// assert!(!is_raw_html("div > p"));
/// ```
#[must_use]
pub fn is_raw_html(input: &str) -> bool {
    if input.len() >= 3 && input.starts_with('<') && input.ends_with('>') {
        return true;
    }
    RAW_HTML_RE.is_match(input)
}

/// The id named by a bare `#id` selector, if `selector` is one.
#[must_use]
pub fn id_selector(selector: &str) -> Option<&str> {
    ID_SELECTOR_RE
        .captures(selector)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}
