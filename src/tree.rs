//! Primitive tree helpers.
//!
//! Relation stepping, deep cloning and the small node-level edits the
//! mutation engine is built from. Everything here works on raw
//! [`NodeRef`]s and knows nothing about node sets.

use dom_query::{NodeData, NodeId, NodeRef, Tree};

/// A single structural step from one node to a neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// The parent node.
    Parent,
    /// The previous sibling.
    PrevSibling,
    /// The next sibling.
    NextSibling,
}

impl Relation {
    fn step<'a>(self, node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
        match self {
            Self::Parent => node.parent(),
            Self::PrevSibling => node.prev_sibling(),
            Self::NextSibling => node.next_sibling(),
        }
    }
}

/// Follow `relation` from `node` to the nearest element.
///
/// Non-element nodes are stepped over. The walk ends at the document
/// node, which is never returned.
#[must_use]
pub fn relation_element<'a>(node: &NodeRef<'a>, relation: Relation) -> Option<NodeRef<'a>> {
    let mut current = relation.step(node);
    while let Some(candidate) = current {
        if candidate.is_document() {
            return None;
        }
        if candidate.is_element() {
            return Some(candidate);
        }
        current = relation.step(&candidate);
    }
    None
}

/// Deep-copy `source` and its subtree into `dest`, returning the detached copy.
///
/// `source` may live in `dest` itself or in another tree. Template
/// contents are copied along with their element.
pub fn deep_clone(source: &NodeRef, dest: &Tree) -> NodeId {
    let data = source.query_or(NodeData::Fragment, |node| node.data.clone());
    let template = match &data {
        NodeData::Element(el) => el.template_contents,
        _ => None,
    };
    let copy = dest.create_node(data);

    if let Some(template) = template {
        let contents = deep_clone(&NodeRef::new(template, source.tree), dest);
        dest.update_node(&copy, |node| {
            if let NodeData::Element(el) = &mut node.data {
                el.template_contents = Some(contents);
            }
        });
    }

    for child in source.children() {
        let child_copy = deep_clone(&child, dest);
        dest.append_child_of(&copy, &child_copy);
    }
    copy
}

/// The element a wrapper nests its target into.
///
/// This is the last element below `wrapper` in document order, or
/// `wrapper` itself when it is an element without element descendants.
/// `None` means the wrapper contains no element at all.
#[must_use]
pub fn innermost_element<'a>(wrapper: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let last = wrapper
        .tree
        .descendant_ids_of_it(&wrapper.id)
        .filter(|id| wrapper.tree.get_unchecked(id).is_element())
        .last();
    match last {
        Some(id) => Some(NodeRef::new(id, wrapper.tree)),
        None if wrapper.is_element() => Some(*wrapper),
        None => None,
    }
}

/// Whether `node` is `ancestor` itself or lies somewhere below it.
#[must_use]
pub fn is_inclusive_ancestor(ancestor: &NodeRef, node: &NodeRef) -> bool {
    ancestor.id == node.id
        || node
            .tree
            .ancestor_ids_of(&node.id, None)
            .contains(&ancestor.id)
}

/// Whether `node` can hold children: elements, documents and fragments.
#[must_use]
pub fn accepts_children(node: &NodeRef) -> bool {
    node.is_element() || node.is_document() || node.is_fragment()
}

/// Ids of the children of `node`, taken before any structural edit.
#[must_use]
pub fn child_ids(node: &NodeRef) -> Vec<NodeId> {
    node.tree.child_ids_of(&node.id)
}

/// Whether `node` is currently attached to a parent.
#[must_use]
pub fn has_parent(node: &NodeRef) -> bool {
    node.parent().is_some()
}

/// Insert each of `ids`, in order, immediately before `anchor`.
pub fn insert_all_before(anchor: &NodeRef, ids: &[NodeId]) {
    for id in ids {
        anchor.insert_before(id);
    }
}

/// Insert each of `ids`, in order, immediately after `anchor`.
pub fn insert_all_after(anchor: &NodeRef, ids: &[NodeId]) {
    for id in ids.iter().rev() {
        anchor.insert_after(id);
    }
}

/// Append each of `ids`, in order, as the last children of `parent`.
pub fn append_all(parent: &NodeRef, ids: &[NodeId]) {
    for id in ids {
        parent.append_child(id);
    }
}

/// Prepend each of `ids` so they become the first children of `parent` in order.
pub fn prepend_all(parent: &NodeRef, ids: &[NodeId]) {
    for id in ids.iter().rev() {
        parent.prepend_child(id);
    }
}

/// Move the children of `node` in front of it, then detach `node`.
///
/// Nothing happens when `node` has no parent.
pub fn unwrap_in_place(node: &NodeRef) {
    if !has_parent(node) {
        return;
    }
    insert_all_before(node, &child_ids(node));
    node.remove_from_parent();
}
