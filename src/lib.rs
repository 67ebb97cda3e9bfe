//! # rs-html-query
//!
//! Fluent selection and mutation over parsed HTML.
//!
//! A [`HtmlDocument`] owns one parsed tree. Selections are [`NodeSet`]s bound
//! to that document: ordered, duplicate-free lists of nodes that can be
//! traversed, combined, read from and edited in place.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_html_query::HtmlDocument;
//!
//! let doc = HtmlDocument::parse(r#"<div class="c"><p class="a">x</p><p>y</p></div>"#);
//!
//! assert_eq!(doc.find("p")?.len(), 2);
//! doc.find(".a")?.add_class("b");
//! assert_eq!(doc.find(".a")?.outer_html().to_string(), r#"<p class="a b">x</p>"#);
//!
//! doc.find("p")?.wrap_all("<ul></ul>")?;
//! assert_eq!(doc.find("ul > p")?.len(), 2);
//! # Ok::<(), rs_html_query::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Selection**: CSS selectors, raw markup, nodes and sets all resolve to a [`NodeSet`]
//! - **Traversal**: parents, children, siblings, `*_until` walks, `find` and `filter`
//! - **Set algebra**: `add`, `intersect`, `not`, `is`
//! - **Mutation**: insertion, replacement, wrapping and removal with clone-on-fan-out
//! - **Content**: text, markup, attributes, data, classes, inline styles, form values

mod error;
mod options;

/// Set algebra over node sets of one document.
pub mod algebra;

/// Reading and writing text, markup, attributes, classes, styles and values.
pub mod content;

/// Parsed document handle.
pub mod document;

/// Element-only view over a node.
pub mod element;

/// Character encoding detection and transcoding.
pub mod encoding;

/// String helpers for classes, inline styles and markup detection.
pub mod helpers;

/// Structural edits.
pub mod mutation;

/// Ordered, duplicate-free node sets.
pub mod node_set;

/// Normalizing selectors, markup, nodes and sets into node sets.
pub mod resolver;

/// Selector compilation and caching.
pub mod selector;

/// Relative navigation.
pub mod traversal;

/// Low-level tree helpers.
pub mod tree;

/// Per-member callbacks with a chosen view.
pub mod view;

// Public API - re-exports
pub use document::HtmlDocument;
pub use element::ElementView;
pub use error::{Error, Result};
pub use node_set::NodeSet;
pub use options::Options;
pub use resolver::{Input, IntoContent, IntoTarget};
pub use selector::{Axis, SelectorCompiler};
pub use view::NodeView;
