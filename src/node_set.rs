//! The node set value type.
//!
//! A [`NodeSet`] is an ordered, duplicate-free list of nodes bound to one
//! [`HtmlDocument`]. Operations never change a set in place; they return a
//! new one. The only exceptions are [`NodeSet::push`] and
//! [`NodeSet::remove_at`], used to accumulate a set one node at a time.
//!
//! Traversal, algebra, content and mutation operations are implemented
//! in their own modules as further `impl NodeSet` blocks.

use std::collections::HashSet;
use std::fmt;
use std::ptr;

use dom_query::{NodeId, NodeRef};

use crate::document::HtmlDocument;
use crate::error::{Error, Result};

/// An ordered, duplicate-free selection of nodes from one document.
#[derive(Clone)]
pub struct NodeSet<'a> {
    doc: &'a HtmlDocument,
    ids: Vec<NodeId>,
}

impl fmt::Debug for NodeSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeSet").field("ids", &self.ids).finish()
    }
}

impl PartialEq for NodeSet<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.same_document(other) && self.ids == other.ids
    }
}

impl Eq for NodeSet<'_> {}

/// Drop repeated ids, keeping first occurrences in order.
pub(crate) fn dedup_ids(ids: impl IntoIterator<Item = NodeId>) -> Vec<NodeId> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

impl<'a> NodeSet<'a> {
    /// Build a set from ids already known to belong to `doc`.
    pub(crate) fn from_trusted(doc: &'a HtmlDocument, ids: Vec<NodeId>) -> Self {
        Self {
            doc,
            ids: dedup_ids(ids),
        }
    }

    /// A new set over the same document.
    pub(crate) fn derive(&self, ids: impl IntoIterator<Item = NodeId>) -> Self {
        Self {
            doc: self.doc,
            ids: dedup_ids(ids),
        }
    }

    /// Build a set from nodes, checking each belongs to `doc`.
    ///
    /// Fails with [`Error::OwnershipError`] when a node lives in another
    /// document and with [`Error::TypeError`] when its id does not address
    /// a node of the arena.
    pub fn from_nodes<I>(doc: &'a HtmlDocument, nodes: I) -> Result<Self>
    where
        I: IntoIterator<Item = NodeRef<'a>>,
    {
        let ids = nodes
            .into_iter()
            .map(|node| validate(doc, &node))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_trusted(doc, ids))
    }

    /// Build a set from raw ids, checking each addresses a node of `doc`.
    pub fn from_ids<I>(doc: &'a HtmlDocument, ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let ids = ids
            .into_iter()
            .map(|id| validate(doc, &NodeRef::new(id, doc.tree())))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_trusted(doc, ids))
    }

    /// The document this set is bound to.
    #[inline]
    #[must_use]
    pub fn document(&self) -> &'a HtmlDocument {
        self.doc
    }

    /// Whether both sets are bound to the same document handle.
    #[inline]
    #[must_use]
    pub fn same_document(&self, other: &NodeSet<'_>) -> bool {
        ptr::eq(self.doc, other.doc)
    }

    /// Number of nodes in the set.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Alias of [`NodeSet::len`].
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.ids.len()
    }

    /// Whether the set has no members.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids of the nodes, in set order.
    #[inline]
    #[must_use]
    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    /// Whether the node with `id` is a member.
    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.ids.contains(id)
    }

    /// The node at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<NodeRef<'a>> {
        self.ids.get(index).map(|id| self.node(*id))
    }

    /// All nodes, in set order.
    #[must_use]
    pub fn nodes(&self) -> Vec<NodeRef<'a>> {
        self.iter().collect()
    }

    /// Iterate over the nodes in set order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = NodeRef<'a>> + '_ {
        self.ids.iter().map(|id| self.node(*id))
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> NodeRef<'a> {
        NodeRef::new(id, self.doc.tree())
    }

    /// The node at `index` as a set of one, or an empty set.
    #[must_use]
    pub fn eq(&self, index: usize) -> NodeSet<'a> {
        self.derive(self.ids.get(index).copied())
    }

    /// The first node as a set of one, or an empty set.
    #[must_use]
    pub fn first(&self) -> NodeSet<'a> {
        self.derive(self.ids.first().copied())
    }

    /// The last node as a set of one, or an empty set.
    #[must_use]
    pub fn last(&self) -> NodeSet<'a> {
        self.derive(self.ids.last().copied())
    }

    /// A contiguous run of the set.
    ///
    /// A negative `offset` counts back from the end. `length` of `None`
    /// takes everything up to the end.
    ///
    /// ```rust
    /// use rs_html_query::HtmlDocument;
    ///
    /// let doc = HtmlDocument::parse("<i>1</i><i>2</i><i>3</i><i>4</i>");
    /// let items = doc.find("i")?;
    /// assert_eq!(items.slice(1, Some(2)).text_all(), vec!["2", "3"]);
    /// assert_eq!(items.slice(-1, None).text_all(), vec!["4"]);
    /// # Ok::<(), rs_html_query::Error>(())
    /// ```
    #[must_use]
    pub fn slice(&self, offset: isize, length: Option<usize>) -> NodeSet<'a> {
        let len = self.ids.len();
        let start = if offset < 0 {
            len.saturating_sub(offset.unsigned_abs())
        } else {
            offset.unsigned_abs().min(len)
        };
        let end = length.map_or(len, |n| start.saturating_add(n).min(len));
        self.derive(self.ids[start..end].iter().copied())
    }

    /// Append `node` unless it is already a member.
    pub fn push(&mut self, node: NodeRef<'a>) -> Result<()> {
        let id = validate(self.doc, &node)?;
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
        Ok(())
    }

    /// Remove and return the node at `index`.
    pub fn remove_at(&mut self, index: usize) -> Option<NodeRef<'a>> {
        if index < self.ids.len() {
            let id = self.ids.remove(index);
            Some(self.node(id))
        } else {
            None
        }
    }
}

impl<'s, 'a> IntoIterator for &'s NodeSet<'a> {
    type Item = NodeRef<'a>;
    type IntoIter = Box<dyn DoubleEndedIterator<Item = NodeRef<'a>> + 's>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Check that `node` addresses a node of `doc`'s arena.
pub(crate) fn validate(doc: &HtmlDocument, node: &NodeRef) -> Result<NodeId> {
    if !doc.owns(node) {
        tracing::warn!(node = ?node.id, "node belongs to another document");
        return Err(Error::OwnershipError);
    }
    if doc.tree().get(&node.id).is_none() {
        tracing::warn!(node = ?node.id, "id outside the document arena");
        return Err(Error::TypeError(format!("{:?}", node.id)));
    }
    Ok(node.id)
}
