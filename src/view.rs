//! Per-node callbacks and the view each callback receives.
//!
//! A callback declares which view it wants through its parameter type:
//!
//! - [`NodeRef`]: the raw tree node, for every member.
//! - [`NodeSet`]: a queryable set of one, for every member.
//! - [`ElementView`]: attribute, class and style accessors, for element
//!   members only. Other members are skipped without error.
//!
//! The choice is made once per call at compile time. `each_node`,
//! `each_element` and `each_queryable` spell the choice out for closures
//! whose parameter type is not annotated.
//!
//! ```rust
//! use dom_query::NodeRef;
//! use rs_html_query::{ElementView, HtmlDocument};
//!
//! let doc = HtmlDocument::parse("<div><p>a</p>text<p>b</p></div>");
//! let children = doc.find("div")?.children(None)?;
//!
//! let names = children.map(|el: ElementView, _| el.tag_name().to_string());
//! assert_eq!(names, vec!["p", "p"]);
//!
//! let mut texts = Vec::new();
//! children.each(|node: NodeRef, i| texts.push(format!("{i}:{}", node.text())));
//! assert_eq!(texts, vec!["0:a", "1:b"]);
//! # Ok::<(), rs_html_query::Error>(())
//! ```

use dom_query::{NodeId, NodeRef};

use crate::element::ElementView;
use crate::node_set::NodeSet;

/// A view a per-node callback can receive.
pub trait NodeView<'a>: Sized {
    /// Build the view of `node`, a member of `set`. `None` skips the node.
    fn view(set: &NodeSet<'a>, node: NodeRef<'a>) -> Option<Self>;
}

impl<'a> NodeView<'a> for NodeRef<'a> {
    fn view(_set: &NodeSet<'a>, node: NodeRef<'a>) -> Option<Self> {
        Some(node)
    }
}

impl<'a> NodeView<'a> for NodeSet<'a> {
    fn view(set: &NodeSet<'a>, node: NodeRef<'a>) -> Option<Self> {
        Some(set.derive([node.id]))
    }
}

impl<'a> NodeView<'a> for ElementView<'a> {
    fn view(_set: &NodeSet<'a>, node: NodeRef<'a>) -> Option<Self> {
        ElementView::new(node)
    }
}

impl<'a> NodeSet<'a> {
    /// Views of the members, paired with their index in the set.
    ///
    /// Membership is snapshotted first, so callbacks may edit the tree.
    fn views<V: NodeView<'a>>(&self, reverse: bool) -> Vec<(V, usize)> {
        let snapshot: Vec<(usize, NodeId)> = self.ids().iter().copied().enumerate().collect();
        let ordered: Box<dyn Iterator<Item = (usize, NodeId)>> = if reverse {
            Box::new(snapshot.into_iter().rev())
        } else {
            Box::new(snapshot.into_iter())
        };
        ordered
            .filter_map(|(index, id)| V::view(self, self.node(id)).map(|view| (view, index)))
            .collect()
    }

    /// Call `f` with each member's view and its index.
    pub fn each<V, F>(&self, mut f: F) -> &Self
    where
        V: NodeView<'a>,
        F: FnMut(V, usize),
    {
        for (view, index) in self.views(false) {
            f(view, index);
        }
        self
    }

    /// Like [`NodeSet::each`], last member first. Indices still count from the front.
    pub fn each_rev<V, F>(&self, mut f: F) -> &Self
    where
        V: NodeView<'a>,
        F: FnMut(V, usize),
    {
        for (view, index) in self.views(true) {
            f(view, index);
        }
        self
    }

    /// [`NodeSet::each`] with raw tree nodes.
    pub fn each_node<F: FnMut(NodeRef<'a>, usize)>(&self, f: F) -> &Self {
        self.each(f)
    }

    /// [`NodeSet::each`] with element views, skipping non-elements.
    pub fn each_element<F: FnMut(ElementView<'a>, usize)>(&self, f: F) -> &Self {
        self.each(f)
    }

    /// [`NodeSet::each`] with queryable sets of one.
    pub fn each_queryable<F: FnMut(NodeSet<'a>, usize)>(&self, f: F) -> &Self {
        self.each(f)
    }

    /// Collect `f`'s result for each member's view.
    pub fn map<V, R, F>(&self, mut f: F) -> Vec<R>
    where
        V: NodeView<'a>,
        F: FnMut(V, usize) -> R,
    {
        self.views(false)
            .into_iter()
            .map(|(view, index)| f(view, index))
            .collect()
    }

    /// Whether `f` returns true for any member, stopping at the first that does.
    pub fn any<V, F>(&self, mut f: F) -> bool
    where
        V: NodeView<'a>,
        F: FnMut(V, usize) -> bool,
    {
        self.iter()
            .enumerate()
            .any(|(index, node)| V::view(self, node).is_some_and(|view| f(view, index)))
    }

    /// `f` applied to the first member, or `None` when there is none or it is skipped.
    pub fn map_first<V, R, F>(&self, f: F) -> Option<R>
    where
        V: NodeView<'a>,
        F: FnOnce(V) -> R,
    {
        let node = self.get(0)?;
        V::view(self, node).map(f)
    }

    /// Members for which `predicate` returns true.
    ///
    /// Members the view skips are dropped.
    pub fn filter_with<V, F>(&self, mut predicate: F) -> NodeSet<'a>
    where
        V: NodeView<'a>,
        F: FnMut(V, usize) -> bool,
    {
        let kept: Vec<NodeId> = self
            .ids()
            .iter()
            .copied()
            .enumerate()
            .filter(|(index, id)| {
                V::view(self, self.node(*id)).is_some_and(|view| predicate(view, *index))
            })
            .map(|(_, id)| id)
            .collect();
        self.derive(kept)
    }

    /// Element views of the members, skipping non-elements.
    pub(crate) fn elements(&self) -> impl Iterator<Item = ElementView<'a>> + '_ {
        self.iter().filter_map(ElementView::new)
    }
}
