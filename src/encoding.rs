//! Character encoding detection and transcoding.
//!
//! Byte input handed to [`HtmlDocument::from_bytes`](crate::HtmlDocument::from_bytes)
//! is decoded to UTF-8 before parsing. The charset is taken from a byte
//! order mark, then from the markup's own meta declarations.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Number of leading bytes scanned for a charset declaration.
const SNIFF_LIMIT: usize = 1024;

/// Match `<meta charset="...">`
#[allow(clippy::expect_used)]
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s/>;]+)"#).expect("valid regex")
});

/// Match `<meta http-equiv="Content-Type" content="...; charset=...">`
#[allow(clippy::expect_used)]
static HTTP_EQUIV_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#).expect("valid regex")
});

/// Detect the character encoding of HTML bytes.
///
/// Looks, in order, for:
/// 1. a byte order mark
/// 2. `<meta charset="...">`
/// 3. `<meta http-equiv="Content-Type" content="...; charset=...">`
///
/// and falls back to UTF-8. Only the first 1024 bytes are scanned.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LIMIT)]);

    [&*META_CHARSET_RE, &*HTTP_EQUIV_CHARSET_RE]
        .iter()
        .find_map(|re| declared_label(re, &head))
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8)
}

fn declared_label<'h>(re: &Regex, head: &'h str) -> Option<&'h str> {
    re.captures(head).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Decode HTML bytes to a UTF-8 string.
///
/// Malformed sequences are replaced with U+FFFD rather than rejected, the
/// same way a browser would recover.
///
/// # Examples
///
/// ```
/// use rs_html_query::encoding::decode_html;
///
/// let html = b"<meta charset=\"windows-1252\"><p>Caf\xE9</p>";
/// assert!(decode_html(html).contains("Café"));
/// ```
#[must_use]
pub fn decode_html(html: &[u8]) -> String {
    let encoding = detect_encoding(html);
    let (decoded, used, had_errors) = encoding.decode(html);
    if had_errors {
        tracing::debug!(encoding = used.name(), "replaced malformed byte sequences");
    }
    decoded.into_owned()
}
