//! Structural edits.
//!
//! When one piece of content is inserted at several targets, every target
//! but the last receives a deep clone and the last receives the original
//! nodes, since a node can only sit at one place in the tree. Edits that
//! need a parent skip targets that have none, and edits that add children
//! skip text and comment targets; "last" means the last target the edit
//! actually applies to. Moving a node under itself is a
//! [`Error::HierarchyError`], raised before anything is changed.

use dom_query::{NodeId, NodeRef};

use crate::error::{Error, Result};
use crate::node_set::NodeSet;
use crate::resolver::{IntoContent, IntoTarget};
use crate::tree::{
    accepts_children, append_all, child_ids, deep_clone, has_parent, innermost_element,
    insert_all_after, insert_all_before, is_inclusive_ancestor, prepend_all, unwrap_in_place,
};

/// Where content goes relative to a target.
#[derive(Debug, Clone, Copy)]
enum Placement {
    Before,
    After,
    Append,
    Prepend,
}

impl<'a> NodeSet<'a> {
    /// The content to place at target `index`: clones for all but the last target.
    fn fan_out(&self, content: &NodeSet<'a>, index: usize) -> Vec<NodeId> {
        if index + 1 == self.len() {
            content.ids().to_vec()
        } else {
            let tree = self.document().tree();
            content.iter().map(|node| deep_clone(&node, tree)).collect()
        }
    }

    /// Members for which `keep` holds, in order.
    pub(crate) fn members_where(&self, keep: impl Fn(&NodeRef<'a>) -> bool) -> NodeSet<'a> {
        self.derive(self.iter().filter(|node| keep(node)).map(|node| node.id))
    }

    /// Fail when a node of `content` is `target` or one of its ancestors.
    ///
    /// Only the last target receives the original content, so only it can
    /// end up inside content it already sits in.
    fn ensure_outside(content: &NodeSet<'a>, target: Option<NodeRef<'a>>) -> Result<()> {
        let Some(target) = target else {
            return Ok(());
        };
        match content.iter().find(|node| is_inclusive_ancestor(node, &target)) {
            Some(node) => {
                tracing::warn!(node = ?node.id, target = ?target.id, "edit would nest a node inside itself");
                Err(Error::HierarchyError(
                    node.node_name().map(|name| name.to_string()).unwrap_or_default(),
                ))
            }
            None => Ok(()),
        }
    }

    fn place<T: IntoContent<'a>>(&self, content: T, placement: Placement) -> Result<&Self> {
        let content = self.content_resolve(content)?;
        if content.is_empty() {
            return Ok(self);
        }
        let targets = match placement {
            Placement::Before | Placement::After => self.members_where(has_parent),
            Placement::Append | Placement::Prepend => self.members_where(accepts_children),
        };
        Self::ensure_outside(&content, targets.last_node())?;
        for (index, target) in targets.iter().enumerate() {
            let nodes = targets.fan_out(&content, index);
            tracing::trace!(?placement, index, nodes = nodes.len(), "placing content");
            match placement {
                Placement::Before => insert_all_before(&target, &nodes),
                Placement::After => insert_all_after(&target, &nodes),
                Placement::Append => append_all(&target, &nodes),
                Placement::Prepend => prepend_all(&target, &nodes),
            }
        }
        Ok(self)
    }

    fn last_node(&self) -> Option<NodeRef<'a>> {
        self.len().checked_sub(1).and_then(|index| self.get(index))
    }

    /// Insert `content` immediately before every member.
    ///
    /// ```rust
    /// use rs_html_query::HtmlDocument;
    ///
    /// let doc = HtmlDocument::parse(r#"<div class="c"><p class="a">x</p><p>y</p></div>"#);
    /// doc.find("p")?.first().before("<span>z</span>")?;
    /// assert_eq!(
    ///     doc.find("div")?.html().to_string(),
    ///     r#"<span>z</span><p class="a">x</p><p>y</p>"#
    /// );
    /// # Ok::<(), rs_html_query::Error>(())
    /// ```
    pub fn before<T: IntoContent<'a>>(&self, content: T) -> Result<&Self> {
        self.place(content, Placement::Before)
    }

    /// Insert `content` immediately after every member.
    pub fn after<T: IntoContent<'a>>(&self, content: T) -> Result<&Self> {
        self.place(content, Placement::After)
    }

    /// Insert `content` as the last children of every member.
    ///
    /// Text and comment members cannot hold children and are skipped.
    pub fn append<T: IntoContent<'a>>(&self, content: T) -> Result<&Self> {
        self.place(content, Placement::Append)
    }

    /// Insert `content` as the first children of every member.
    pub fn prepend<T: IntoContent<'a>>(&self, content: T) -> Result<&Self> {
        self.place(content, Placement::Prepend)
    }

    /// Insert this set before every node of `target`, returning the resolved target.
    pub fn insert_before<T: IntoTarget<'a>>(&self, target: T) -> Result<NodeSet<'a>> {
        let target = self.target_resolve(target)?;
        target.before(self)?;
        Ok(target)
    }

    /// Insert this set after every node of `target`, returning the resolved target.
    pub fn insert_after<T: IntoTarget<'a>>(&self, target: T) -> Result<NodeSet<'a>> {
        let target = self.target_resolve(target)?;
        target.after(self)?;
        Ok(target)
    }

    /// Append this set to every node of `target`, returning the resolved target.
    pub fn append_to<T: IntoTarget<'a>>(&self, target: T) -> Result<NodeSet<'a>> {
        let target = self.target_resolve(target)?;
        target.append(self)?;
        Ok(target)
    }

    /// Prepend this set to every node of `target`, returning the resolved target.
    pub fn prepend_to<T: IntoTarget<'a>>(&self, target: T) -> Result<NodeSet<'a>> {
        let target = self.target_resolve(target)?;
        target.prepend(self)?;
        Ok(target)
    }

    /// Put `content` where each member is, then detach the member.
    ///
    /// The returned set still holds the detached members.
    pub fn replace_with<T: IntoContent<'a>>(&self, content: T) -> Result<&Self> {
        let content = self.content_resolve(content)?;
        let targets = self.members_where(has_parent);
        Self::ensure_outside(&content, targets.last_node())?;
        for (index, target) in targets.iter().enumerate() {
            let nodes = targets.fan_out(&content, index);
            if let [single] = nodes.as_slice() {
                target.replace_with(single);
            } else {
                insert_all_after(&target, &nodes);
                target.remove_from_parent();
            }
        }
        Ok(self)
    }

    /// Replace every node of `target` with this set, returning the resolved target.
    pub fn replace_all<T: IntoTarget<'a>>(&self, target: T) -> Result<NodeSet<'a>> {
        let target = self.target_resolve(target)?;
        target.replace_with(self)?;
        Ok(target)
    }

    /// Wrap every member in a copy of the first node of `content`.
    ///
    /// Each member is nested inside the wrapper's last element in
    /// document order, or the wrapper itself when it has no element
    /// below it. A wrapper with no element at all is a
    /// [`Error::StructureError`]; a wrapper that contains the member is a
    /// [`Error::HierarchyError`].
    pub fn wrap<T: IntoContent<'a>>(&self, content: T) -> Result<&Self> {
        let content = self.content_resolve(content)?;
        let Some(template) = content.get(0) else {
            return Ok(self);
        };
        let template = self.derive([template.id]);
        Self::ensure_outside(&template, self.last_node())?;
        for (index, target) in self.iter().enumerate() {
            let (wrapper, deepest) = self.wrapper_for(&template, index)?;
            if has_parent(&target) {
                target.insert_before(&wrapper.id);
            }
            deepest.append_child(&target.id);
        }
        Ok(self)
    }

    /// Wrap the children of every member in a copy of the first node of `content`.
    ///
    /// Members that cannot hold children are skipped.
    pub fn wrap_inner<T: IntoContent<'a>>(&self, content: T) -> Result<&Self> {
        let content = self.content_resolve(content)?;
        let Some(template) = content.get(0) else {
            return Ok(self);
        };
        let template = self.derive([template.id]);
        let targets = self.members_where(accepts_children);
        Self::ensure_outside(&template, targets.last_node())?;
        for (index, target) in targets.iter().enumerate() {
            let (wrapper, deepest) = targets.wrapper_for(&template, index)?;
            wrapper.remove_from_parent();
            append_all(&deepest, &child_ids(&target));
            target.append_child(&wrapper.id);
        }
        Ok(self)
    }

    /// Wrap all members in one shared wrapper.
    ///
    /// The first member is wrapped in place; the others are moved, in
    /// order, into the same wrapper after it.
    ///
    /// ```rust
    /// use rs_html_query::HtmlDocument;
    ///
    /// let doc = HtmlDocument::parse("<div><p>1</p><p>2</p></div>");
    /// doc.find("p")?.wrap_all("<ul></ul>")?;
    /// assert_eq!(doc.find("div")?.html().to_string(), "<ul><p>1</p><p>2</p></ul>");
    /// # Ok::<(), rs_html_query::Error>(())
    /// ```
    pub fn wrap_all<T: IntoContent<'a>>(&self, content: T) -> Result<&Self> {
        let content = self.content_resolve(content)?;
        let Some(template) = content.get(0) else {
            return Ok(self);
        };
        let Some(first) = self.get(0) else {
            return Ok(self);
        };
        Self::ensure_outside(&self.slice(1, None), Some(first))?;
        self.first().wrap(self.derive([template.id]))?;
        if let Some(shared) = first.parent() {
            for target in self.iter().skip(1) {
                shared.append_child(&target.id);
            }
        }
        Ok(self)
    }

    /// Remove the parent of every member, optionally only parents matching
    /// `selector`, keeping the parents' children in place.
    ///
    /// Returns the removed parents.
    pub fn unwrap(&self, selector: Option<&str>) -> Result<NodeSet<'a>> {
        let parents = self.parent(selector)?;
        parents.unwrap_self();
        Ok(parents)
    }

    /// Replace every member with its own children.
    pub fn unwrap_self(&self) -> &Self {
        for node in self.iter() {
            unwrap_in_place(&node);
        }
        self
    }

    /// Detach every member, or only members matching `selector`.
    pub fn remove(&self, selector: Option<&str>) -> Result<&Self> {
        let doomed = match selector {
            Some(selector) => self.filter(selector)?,
            None => self.clone(),
        };
        for node in doomed.iter().filter(has_parent) {
            node.remove_from_parent();
        }
        Ok(self)
    }

    /// The wrapper for target `index` and the element targets nest into.
    fn wrapper_for(
        &self,
        template: &NodeSet<'a>,
        index: usize,
    ) -> Result<(NodeRef<'a>, NodeRef<'a>)> {
        let wrapper_id = self.fan_out(template, index)[0];
        let wrapper = NodeRef::new(wrapper_id, self.document().tree());
        let deepest = innermost_element(&wrapper).ok_or_else(|| {
            tracing::warn!("wrap template contains no element");
            Error::StructureError(wrapper.html().to_string())
        })?;
        Ok((wrapper, deepest))
    }
}
