//! Selector compilation and scoped queries.
//!
//! A [`SelectorCompiler`] turns selector text into a [`Query`]: a compiled
//! matcher paired with the structural [`Axis`] it runs along. Each
//! document handle owns one compiler, so compiled selectors are cached per
//! document and never shared globally.
//!
//! Queries only ever return element nodes, in document order, without
//! duplicates.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use dom_query::{Matcher, NodeId, NodeRef};

use crate::error::{Error, Result};

/// Selector matching any element.
pub const ANY_ELEMENT: &str = "*";

/// Structural scope a compiled query searches from its context node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Every node below the context node.
    Descendant,
    /// Direct children of the context node.
    Child,
    /// The context node itself.
    SelfNode,
    /// The direct parent of the context node.
    Parent,
    /// Every node above the context node.
    Ancestor,
    /// Siblings before the context node.
    PrecedingSibling,
    /// Siblings after the context node.
    FollowingSibling,
    /// Siblings on both sides of the context node.
    Sibling,
}

/// A compiled selector bound to an axis.
#[derive(Debug, Clone)]
pub struct Query {
    matcher: Rc<Matcher>,
    axis: Axis,
}

impl Query {
    /// The axis this query searches along.
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Whether `node` is an element matched by the selector, ignoring the axis.
    #[must_use]
    pub fn matches(&self, node: &NodeRef) -> bool {
        node.is_match(&self.matcher)
    }

    /// Run the query from `context`, returning matches in document order.
    #[must_use]
    pub fn run(&self, context: &NodeRef) -> Vec<NodeId> {
        let tree = context.tree;
        let id = context.id;
        let candidates: Vec<NodeId> = match self.axis {
            Axis::Descendant => tree.descendant_ids_of_it(&id).collect(),
            Axis::Child => tree.child_ids_of(&id),
            Axis::SelfNode => vec![id],
            Axis::Parent => context.parent().map(|p| p.id).into_iter().collect(),
            Axis::Ancestor => {
                let mut ids = tree.ancestor_ids_of(&id, None);
                ids.reverse();
                ids
            }
            Axis::PrecedingSibling => preceding_sibling_ids(context),
            Axis::FollowingSibling => following_sibling_ids(context),
            Axis::Sibling => {
                let mut ids = preceding_sibling_ids(context);
                ids.extend(following_sibling_ids(context));
                ids
            }
        };

        candidates
            .into_iter()
            .filter(|candidate| self.matches(&NodeRef::new(*candidate, tree)))
            .collect()
    }
}

/// Preceding siblings of `node`, in document order.
fn preceding_sibling_ids(node: &NodeRef) -> Vec<NodeId> {
    let mut ids = Vec::new();
    let mut current = node.prev_sibling();
    while let Some(sibling) = current {
        ids.push(sibling.id);
        current = sibling.prev_sibling();
    }
    ids.reverse();
    ids
}

/// Following siblings of `node`, in document order.
fn following_sibling_ids(node: &NodeRef) -> Vec<NodeId> {
    let mut ids = Vec::new();
    let mut current = node.next_sibling();
    while let Some(sibling) = current {
        ids.push(sibling.id);
        current = sibling.next_sibling();
    }
    ids
}

/// Rewrite selector extensions the matcher does not know natively.
///
/// `:selected` becomes `[selected]`. Quoted strings are copied untouched.
fn rewrite_extensions(selector: &str) -> String {
    const SELECTED: &str = ":selected";

    let mut out = String::with_capacity(selector.len());
    let mut quote: Option<char> = None;
    let mut rest = selector;

    while let Some(c) = rest.chars().next() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
        } else if c == '"' || c == '\'' {
            quote = Some(c);
        } else if rest.starts_with(SELECTED) {
            let boundary = rest[SELECTED.len()..]
                .chars()
                .next()
                .is_none_or(|next| !(next.is_alphanumeric() || next == '-' || next == '_'));
            if boundary {
                out.push_str("[selected]");
                rest = &rest[SELECTED.len()..];
                continue;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

/// Compiles selector text into queries, caching the compiled matchers.
#[derive(Debug)]
pub struct SelectorCompiler {
    cache: RefCell<HashMap<String, Rc<Matcher>>>,
    capacity: usize,
}

impl SelectorCompiler {
    /// Create a compiler caching at most `capacity` selectors.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: RefCell::new(HashMap::new()),
            capacity,
        }
    }

    /// Compile `selector` for use along `axis`.
    pub fn compile(&self, selector: &str, axis: Axis) -> Result<Query> {
        let matcher = self.matcher(selector)?;
        Ok(Query { matcher, axis })
    }

    /// Number of compiled selectors currently cached.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.borrow().len()
    }

    fn matcher(&self, selector: &str) -> Result<Rc<Matcher>> {
        if let Some(hit) = self.cache.borrow().get(selector) {
            return Ok(Rc::clone(hit));
        }

        let source = rewrite_extensions(selector);
        let matcher = Matcher::new(&source).map_err(|err| {
            tracing::warn!(selector, "selector failed to compile");
            Error::SelectorError(format!("{selector}: {err:?}"))
        })?;
        let matcher = Rc::new(matcher);
        tracing::debug!(selector, compiled = %source, "compiled selector");

        if self.capacity > 0 {
            let mut cache = self.cache.borrow_mut();
            if cache.len() >= self.capacity {
                cache.clear();
            }
            cache.insert(selector.to_string(), Rc::clone(&matcher));
        }
        Ok(matcher)
    }
}

impl Default for SelectorCompiler {
    fn default() -> Self {
        Self::new(crate::Options::default().selector_cache_size)
    }
}
