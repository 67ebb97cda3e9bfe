//! Turning caller input into node sets.
//!
//! Every operation that takes "something to select" accepts a closed
//! [`Input`]. How a bare string is read depends on the call site:
//!
//! - [`IntoTarget`]: a string is always a selector (`append_to("ul")`).
//! - [`IntoContent`]: a string is always markup (`append("<li>x</li>")`).
//! - `From<&str>`: a string is markup when it looks like a tag, otherwise
//!   a selector ([`HtmlDocument::resolve`]).
//!
//! Nodes and sets pass through after an ownership check.

use dom_query::NodeRef;

use crate::document::HtmlDocument;
use crate::error::{Error, Result};
use crate::helpers::is_raw_html;
use crate::node_set::NodeSet;

/// A value to be resolved into a [`NodeSet`].
#[derive(Debug, Clone)]
pub enum Input<'a> {
    /// Selector text, matched against the whole document.
    Selector(String),
    /// Markup, parsed into detached nodes.
    Markup(String),
    /// A single node.
    Node(NodeRef<'a>),
    /// A list of nodes, deduplicated on resolution.
    Nodes(Vec<NodeRef<'a>>),
    /// An existing set, passed through unchanged.
    Set(NodeSet<'a>),
}

impl Input<'_> {
    /// Read `text` as markup when it looks like a tag, otherwise as a selector.
    #[must_use]
    pub fn classify(text: &str) -> Self {
        if is_raw_html(text) {
            Input::Markup(text.to_string())
        } else {
            Input::Selector(text.to_string())
        }
    }
}

impl From<&str> for Input<'_> {
    fn from(text: &str) -> Self {
        Input::classify(text)
    }
}

impl From<String> for Input<'_> {
    fn from(text: String) -> Self {
        Input::classify(&text)
    }
}

impl<'a> From<NodeRef<'a>> for Input<'a> {
    fn from(node: NodeRef<'a>) -> Self {
        Input::Node(node)
    }
}

impl<'a> From<Vec<NodeRef<'a>>> for Input<'a> {
    fn from(nodes: Vec<NodeRef<'a>>) -> Self {
        Input::Nodes(nodes)
    }
}

impl<'a> From<NodeSet<'a>> for Input<'a> {
    fn from(set: NodeSet<'a>) -> Self {
        Input::Set(set)
    }
}

impl<'a> From<&NodeSet<'a>> for Input<'a> {
    fn from(set: &NodeSet<'a>) -> Self {
        Input::Set(set.clone())
    }
}

/// Conversion for inputs naming where something goes. Strings are selectors.
pub trait IntoTarget<'a> {
    fn into_target(self) -> Input<'a>;
}

/// Conversion for inputs naming what gets inserted. Strings are markup.
pub trait IntoContent<'a> {
    fn into_content(self) -> Input<'a>;
}

impl<'a> IntoTarget<'a> for &str {
    fn into_target(self) -> Input<'a> {
        Input::Selector(self.to_string())
    }
}

impl<'a> IntoTarget<'a> for String {
    fn into_target(self) -> Input<'a> {
        Input::Selector(self)
    }
}

impl<'a> IntoContent<'a> for &str {
    fn into_content(self) -> Input<'a> {
        Input::Markup(self.to_string())
    }
}

impl<'a> IntoContent<'a> for String {
    fn into_content(self) -> Input<'a> {
        Input::Markup(self)
    }
}

macro_rules! node_conversions {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<'a> IntoTarget<'a> for $ty {
                fn into_target(self) -> Input<'a> {
                    Input::from(self)
                }
            }

            impl<'a> IntoContent<'a> for $ty {
                fn into_content(self) -> Input<'a> {
                    Input::from(self)
                }
            }
        )*
    };
}

node_conversions!(NodeRef<'a>, Vec<NodeRef<'a>>, NodeSet<'a>, &NodeSet<'a>);

impl<'a> IntoTarget<'a> for Input<'a> {
    fn into_target(self) -> Input<'a> {
        self
    }
}

impl<'a> IntoContent<'a> for Input<'a> {
    fn into_content(self) -> Input<'a> {
        self
    }
}

/// Resolve `input` against `doc`.
pub(crate) fn resolve_in<'a>(doc: &'a HtmlDocument, input: Input<'a>) -> Result<NodeSet<'a>> {
    match input {
        Input::Selector(selector) => {
            tracing::trace!(%selector, "resolving selector");
            doc.find(&selector)
        }
        Input::Markup(markup) => {
            tracing::trace!(bytes = markup.len(), "resolving markup");
            Ok(doc.fragment(&markup))
        }
        Input::Node(node) => NodeSet::from_nodes(doc, [node]),
        Input::Nodes(nodes) => NodeSet::from_nodes(doc, nodes),
        Input::Set(set) => {
            if std::ptr::eq(set.document(), doc) {
                Ok(set)
            } else {
                tracing::warn!("node set bound to another document");
                Err(Error::OwnershipError)
            }
        }
    }
}

impl HtmlDocument {
    /// Resolve any supported input into a set bound to this document.
    ///
    /// ```rust
    /// use rs_html_query::HtmlDocument;
    ///
    /// let doc = HtmlDocument::parse("<p>a</p><p>b</p>");
    /// assert_eq!(doc.resolve("p")?.len(), 2);
    /// assert_eq!(doc.resolve("<p>c</p>")?.len(), 1);
    /// # Ok::<(), rs_html_query::Error>(())
    /// ```
    pub fn resolve<'a, T: Into<Input<'a>>>(&'a self, input: T) -> Result<NodeSet<'a>> {
        resolve_in(self, input.into())
    }
}

impl<'a> NodeSet<'a> {
    /// Resolve `input` against this set's document.
    pub fn resolve<T: Into<Input<'a>>>(&self, input: T) -> Result<NodeSet<'a>> {
        resolve_in(self.document(), input.into())
    }

    /// Resolve a target: strings are selectors over the whole document.
    pub fn target_resolve<T: IntoTarget<'a>>(&self, target: T) -> Result<NodeSet<'a>> {
        resolve_in(self.document(), target.into_target())
    }

    /// Resolve content: strings are markup parsed into detached nodes.
    pub fn content_resolve<T: IntoContent<'a>>(&self, content: T) -> Result<NodeSet<'a>> {
        resolve_in(self.document(), content.into_content())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = r#"<div class="c"><p class="a">x</p><p>y</p></div>"#;

    #[test]
    fn classify_strings() {
        assert!(matches!(Input::from("p.a"), Input::Selector(_)));
        assert!(matches!(Input::from("<p>x</p>"), Input::Markup(_)));
        assert!(matches!(Input::from(String::from(" <br> ")), Input::Markup(_)));
    }

    #[test]
    fn target_strings_are_selectors() {
        let doc = HtmlDocument::parse(HTML);
        let set = doc.root_set();
        let found = set.target_resolve("p").expect("valid");
        assert_eq!(found.len(), 2);
        // markup-looking text is still read as a selector and fails to compile
        assert!(matches!(
            set.target_resolve("<p>"),
            Err(Error::SelectorError(_))
        ));
    }

    #[test]
    fn content_strings_are_markup() {
        let doc = HtmlDocument::parse(HTML);
        let set = doc.root_set();
        let content = set.content_resolve("p").expect("parses");
        assert_eq!(content.len(), 1);
        let node = content.get(0).expect("text node");
        assert!(node.is_text());
        assert!(node.parent().is_none());
    }

    #[test]
    fn sets_pass_through_unchanged() {
        let doc = HtmlDocument::parse(HTML);
        let ps = doc.find("p").expect("valid");
        let resolved = doc.resolve(&ps).expect("same document");
        assert_eq!(resolved, ps);
    }

    #[test]
    fn foreign_sets_and_nodes_are_rejected() {
        let doc = HtmlDocument::parse(HTML);
        let other = HtmlDocument::parse(HTML);
        let foreign = other.find("p").expect("valid");
        assert!(matches!(
            doc.root_set().target_resolve(&foreign),
            Err(Error::OwnershipError)
        ));
        let node = foreign.get(0).expect("p");
        assert!(matches!(
            doc.root_set().content_resolve(node),
            Err(Error::OwnershipError)
        ));
    }

    #[test]
    fn node_lists_are_deduplicated() {
        let doc = HtmlDocument::parse(HTML);
        let first = doc.find(".a").expect("valid").get(0).expect("p");
        let set = doc.resolve(vec![first, first]).expect("owned");
        assert_eq!(set.len(), 1);
    }
}
