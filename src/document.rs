//! The document handle.
//!
//! An [`HtmlDocument`] owns the parsed tree and the selector compiler used
//! against it. Every [`NodeSet`] borrows exactly one handle, and two sets
//! belong to the same document only if they borrow the same handle.

use std::path::Path;
use std::ptr;

use dom_query::{Document, NodeId, NodeRef, Tree};
use tendril::StrTendril;

use crate::encoding::decode_html;
use crate::error::Result;
use crate::helpers::is_raw_html;
use crate::node_set::NodeSet;
use crate::selector::SelectorCompiler;
use crate::tree::deep_clone;
use crate::Options;

/// A parsed HTML document and the entry point for selections.
///
/// # Example
///
/// ```rust
/// use rs_html_query::HtmlDocument;
///
/// let doc = HtmlDocument::parse(r#"<div class="c"><p class="a">x</p><p>y</p></div>"#);
/// let paragraphs = doc.find("p")?;
/// assert_eq!(paragraphs.len(), 2);
/// # Ok::<(), rs_html_query::Error>(())
/// ```
pub struct HtmlDocument {
    doc: Document,
    compiler: SelectorCompiler,
    options: Options,
}

impl std::fmt::Debug for HtmlDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlDocument")
            .field("options", &self.options)
            .field("cached_selectors", &self.compiler.cached())
            .finish_non_exhaustive()
    }
}

impl Default for HtmlDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlDocument {
    /// Create an empty document.
    ///
    /// The tree still holds the implied `<html>`, `<head>` and `<body>`
    /// elements, so markup can be appended to `body` right away.
    #[must_use]
    pub fn new() -> Self {
        Self::parse("")
    }

    /// Parse HTML with default options.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        Self::parse_with_options(html, &Options::default())
    }

    /// Parse HTML with custom options.
    #[must_use]
    pub fn parse_with_options(html: &str, options: &Options) -> Self {
        let doc = if options.fragment {
            fragment_document(html)
        } else {
            Document::from(html)
        };
        tracing::debug!(
            bytes = html.len(),
            fragment = options.fragment,
            "parsed document"
        );
        Self {
            doc,
            compiler: SelectorCompiler::new(options.selector_cache_size),
            options: options.clone(),
        }
    }

    /// Decode HTML bytes using their declared charset, then parse them.
    #[must_use]
    pub fn from_bytes(html: &[u8]) -> Self {
        Self::from_bytes_with_options(html, &Options::default())
    }

    /// Decode HTML bytes using their declared charset, then parse them with custom options.
    #[must_use]
    pub fn from_bytes_with_options(html: &[u8], options: &Options) -> Self {
        Self::parse_with_options(&decode_html(html), options)
    }

    /// Read and parse an HTML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Ok(Self::from_bytes(&bytes))
    }

    /// The options this document was parsed with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The arena holding every node of this document.
    #[inline]
    #[must_use]
    pub fn tree(&self) -> &Tree {
        &self.doc.tree
    }

    /// The document root node.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeRef<'_> {
        self.doc.tree.root()
    }

    /// The `<body>` element, if the document has one.
    #[must_use]
    pub fn body(&self) -> Option<NodeRef<'_>> {
        self.doc.body()
    }

    /// The selector compiler owned by this document.
    #[must_use]
    pub fn compiler(&self) -> &SelectorCompiler {
        &self.compiler
    }

    /// Whether `node` lives in this document's arena.
    #[inline]
    #[must_use]
    pub fn owns(&self, node: &NodeRef) -> bool {
        ptr::eq(node.tree, &self.doc.tree)
    }

    /// Serialize the whole document.
    #[must_use]
    pub fn outer_html(&self) -> StrTendril {
        self.root().inner_html()
    }

    /// A set holding only the document root.
    #[must_use]
    pub fn root_set(&self) -> NodeSet<'_> {
        NodeSet::from_trusted(self, vec![self.doc.tree.root_id()])
    }

    /// An empty set bound to this document.
    #[must_use]
    pub fn empty_set(&self) -> NodeSet<'_> {
        NodeSet::from_trusted(self, Vec::new())
    }

    /// Select elements of the whole document.
    ///
    /// A bare `#id` selector yields at most one element.
    pub fn find(&self, selector: &str) -> Result<NodeSet<'_>> {
        self.root_set().find(selector)
    }

    /// Markup becomes a detached fragment, anything else is a selector.
    ///
    /// ```rust
    /// use rs_html_query::HtmlDocument;
    ///
    /// let doc = HtmlDocument::parse("<p>a</p>");
    /// assert_eq!(doc.query("p")?.len(), 1);
    ///
    /// let fresh = doc.query("<b>1</b><i>2</i>")?;
    /// assert_eq!(fresh.len(), 2);
    /// assert!(fresh.get(0).and_then(|n| n.parent()).is_none());
    /// # Ok::<(), rs_html_query::Error>(())
    /// ```
    pub fn query(&self, input: &str) -> Result<NodeSet<'_>> {
        if is_raw_html(input) {
            Ok(self.fragment(input))
        } else {
            self.find(input)
        }
    }

    /// Parse `markup` into detached nodes owned by this document.
    #[must_use]
    pub fn fragment(&self, markup: &str) -> NodeSet<'_> {
        NodeSet::from_trusted(self, self.parse_fragment(markup))
    }

    /// Parse `markup` into top-level nodes owned by this document but not
    /// attached to its tree.
    ///
    /// The markup is parsed as the contents of a `<template>`, which
    /// accepts any element, so table rows and cells, list items and
    /// options keep their tags without their usual parents.
    #[must_use]
    pub fn parse_fragment(&self, markup: &str) -> Vec<NodeId> {
        let parsed = Document::fragment(format!("<template>{markup}</template>"));
        let Some(contents) = template_contents(&parsed) else {
            return Vec::new();
        };
        let ids: Vec<NodeId> = NodeRef::new(contents, &parsed.tree)
            .children()
            .iter()
            .map(|node| deep_clone(node, &self.doc.tree))
            .collect();
        tracing::debug!(nodes = ids.len(), "imported fragment");
        ids
    }
}

/// The contents fragment of the wrapping `<template>` of a parsed snippet.
fn template_contents(parsed: &Document) -> Option<NodeId> {
    let container = parsed.root().first_element_child()?;
    let template = container.first_element_child()?;
    template.query_or(None, |node| {
        node.as_element().and_then(|element| element.template_contents)
    })
}

/// Parse a snippet without implied `html`/`head`/`body` elements.
fn fragment_document(html: &str) -> Document {
    let doc = Document::fragment(html);
    let root = doc.tree.root();
    if let Some(container) = root.first_element_child() {
        for id in doc.tree.child_ids_of(&container.id) {
            root.append_child(&id);
        }
        container.remove_from_parent();
    }
    doc
}
