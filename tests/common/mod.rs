//! Shared helpers for the integration tests.

#![allow(dead_code)]

use rs_html_query::{HtmlDocument, Options};

/// Markup used across the scenario tests.
pub const SAMPLE: &str = r#"<div class="c"><p class="a">x</p><p>y</p></div>"#;

/// A list with a form, used by traversal and value tests.
pub const PAGE: &str = r#"
<div id="main">
    <ul class="menu">
        <li id="one" class="item">One</li>
        <li id="two" class="item active">Two</li>
        <li id="three" class="item">Three</li>
        <li id="four">Four</li>
    </ul>
    <form>
        <input name="user" value="ann">
        <textarea name="note">hello</textarea>
        <select name="n">
            <option value="1">one</option>
            <option value="2">two</option>
        </select>
    </form>
</div>
"#;

/// Parse `html` as a fragment so serialized output stays free of the
/// `html`/`head`/`body` scaffolding.
pub fn fragment(html: &str) -> HtmlDocument {
    HtmlDocument::parse_with_options(html, &Options::fragment())
}

/// Collapse whitespace between tags and trim the ends.
pub fn squash(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut pending = String::new();
    for ch in html.trim().chars() {
        if ch.is_whitespace() {
            pending.push(ch);
            continue;
        }
        if !pending.is_empty() {
            let after_tag = out.ends_with('>');
            if !(after_tag || ch == '<') {
                out.push(' ');
            }
            pending.clear();
        }
        out.push(ch);
    }
    out
}

/// Assert two markup strings are equal ignoring inter-tag whitespace.
#[track_caller]
pub fn assert_same_html(actual: &str, expected: &str) {
    assert_eq!(squash(actual), squash(expected));
}

