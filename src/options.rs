//! Configuration options for document handles.
//!
//! The `Options` struct controls how markup is parsed into a document and
//! how the handle's selector compiler caches its work.

/// Configuration options for an [`HtmlDocument`](crate::HtmlDocument).
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_html_query::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Parse a snippet without the implied html/head/body wrapper
/// let options = Options {
///     fragment: true,
///     ..Options::default()
/// };
/// assert!(options.fragment);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Parse the input as a body fragment instead of a full document.
    ///
    /// When enabled, no `<html>`, `<head>` or `<body>` elements are implied
    /// and the parsed nodes become direct children of the document root,
    /// so [`HtmlDocument::outer_html`](crate::HtmlDocument::outer_html)
    /// reproduces the snippet as written.
    ///
    /// Default: `false`
    pub fragment: bool,

    /// Maximum number of compiled selectors cached per document handle.
    ///
    /// A value of `0` disables caching and every selector is compiled on
    /// each use. When the cache is full it is cleared before the next
    /// insertion.
    ///
    /// Default: `256`
    pub selector_cache_size: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            fragment: false,
            selector_cache_size: 256,
        }
    }
}

impl Options {
    /// Options for parsing a snippet as a standalone fragment.
    #[must_use]
    pub fn fragment() -> Self {
        Self {
            fragment: true,
            ..Self::default()
        }
    }
}
