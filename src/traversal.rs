//! Directional traversal.
//!
//! Each relation runs once per member of the current set. Results are
//! unioned in member order, then match order, with duplicates dropped.
//! Relations only ever yield elements.

use dom_query::NodeId;

use crate::error::Result;
use crate::helpers::id_selector;
use crate::node_set::NodeSet;
use crate::resolver::{resolve_in, Input, IntoTarget};
use crate::selector::{Axis, ANY_ELEMENT};
use crate::tree::{relation_element, Relation};

impl<'a> NodeSet<'a> {
    /// Descendants of every member, filtered by `selector`.
    ///
    /// A selector string is matched below each member, and a bare `#id`
    /// selector yields at most the first match in document order. Any
    /// other target keeps only the descendants that are part of it.
    ///
    /// ```rust
    /// use rs_html_query::HtmlDocument;
    ///
    /// let doc = HtmlDocument::parse(r#"<div class="c"><p class="a">x</p><p>y</p></div>"#);
    /// let div = doc.find("div.c")?;
    /// assert_eq!(div.find("p")?.len(), 2);
    /// assert_eq!(div.find(".a")?.len(), 1);
    /// # Ok::<(), rs_html_query::Error>(())
    /// ```
    pub fn find<T: IntoTarget<'a>>(&self, selector: T) -> Result<NodeSet<'a>> {
        match selector.into_target() {
            Input::Selector(selector) => {
                let found = self.relation(Some(&selector), Axis::Descendant)?;
                if id_selector(&selector).is_some() {
                    Ok(found.first())
                } else {
                    Ok(found)
                }
            }
            other => {
                let targets = resolve_in(self.document(), other)?;
                let descendants = self.relation(None, Axis::Descendant)?;
                Ok(descendants.derive(
                    descendants
                        .ids()
                        .iter()
                        .copied()
                        .filter(|id| targets.contains(id)),
                ))
            }
        }
    }

    /// Reduce the set.
    ///
    /// A selector string keeps members that match it. Any other target
    /// keeps members that are also part of the target.
    pub fn filter<T: IntoTarget<'a>>(&self, selector: T) -> Result<NodeSet<'a>> {
        match selector.into_target() {
            Input::Selector(selector) => self.relation(Some(&selector), Axis::SelfNode),
            other => self.intersect(other),
        }
    }

    /// The parent element of each member.
    pub fn parent(&self, selector: Option<&str>) -> Result<NodeSet<'a>> {
        self.relation(selector, Axis::Parent)
    }

    /// Every ancestor element of each member, outermost first per member.
    pub fn parents(&self, selector: Option<&str>) -> Result<NodeSet<'a>> {
        self.relation(selector, Axis::Ancestor)
    }

    /// Ancestors of each member, nearest first, stopping before any node in `until`.
    pub fn parents_until<T: IntoTarget<'a>>(
        &self,
        until: T,
        selector: Option<&str>,
    ) -> Result<NodeSet<'a>> {
        self.walk_until(Relation::Parent, until, selector)
    }

    /// Element children of each member.
    pub fn children(&self, selector: Option<&str>) -> Result<NodeSet<'a>> {
        self.relation(selector, Axis::Child)
    }

    /// Element siblings on both sides of each member.
    pub fn siblings(&self, selector: Option<&str>) -> Result<NodeSet<'a>> {
        self.relation(selector, Axis::Sibling)
    }

    /// The nearest preceding element sibling of each member that matches `selector`.
    pub fn prev(&self, selector: Option<&str>) -> Result<NodeSet<'a>> {
        self.nearest_sibling(selector, Axis::PrecedingSibling)
    }

    /// Every preceding element sibling of each member.
    pub fn prev_all(&self, selector: Option<&str>) -> Result<NodeSet<'a>> {
        self.relation(selector, Axis::PrecedingSibling)
    }

    /// Preceding siblings of each member, nearest first, stopping before any node in `until`.
    pub fn prev_until<T: IntoTarget<'a>>(
        &self,
        until: T,
        selector: Option<&str>,
    ) -> Result<NodeSet<'a>> {
        self.walk_until(Relation::PrevSibling, until, selector)
    }

    /// The nearest following element sibling of each member that matches `selector`.
    pub fn next(&self, selector: Option<&str>) -> Result<NodeSet<'a>> {
        self.nearest_sibling(selector, Axis::FollowingSibling)
    }

    /// Every following element sibling of each member.
    pub fn next_all(&self, selector: Option<&str>) -> Result<NodeSet<'a>> {
        self.relation(selector, Axis::FollowingSibling)
    }

    /// Following siblings of each member, nearest first, stopping before any node in `until`.
    pub fn next_until<T: IntoTarget<'a>>(
        &self,
        until: T,
        selector: Option<&str>,
    ) -> Result<NodeSet<'a>> {
        self.walk_until(Relation::NextSibling, until, selector)
    }

    /// Run one compiled query from every member and union the results.
    pub(crate) fn relation(&self, selector: Option<&str>, axis: Axis) -> Result<NodeSet<'a>> {
        let query = self
            .document()
            .compiler()
            .compile(selector.unwrap_or(ANY_ELEMENT), axis)?;
        Ok(self.derive(self.iter().flat_map(|node| query.run(&node))))
    }

    fn nearest_sibling(&self, selector: Option<&str>, axis: Axis) -> Result<NodeSet<'a>> {
        let query = self
            .document()
            .compiler()
            .compile(selector.unwrap_or(ANY_ELEMENT), axis)?;
        Ok(self.derive(self.iter().filter_map(|node| {
            let matches = query.run(&node);
            match axis {
                Axis::PrecedingSibling => matches.last().copied(),
                _ => matches.first().copied(),
            }
        })))
    }

    /// Step along `relation` from every member until a node of `until` is reached.
    ///
    /// The boundary is resolved against the whole document, not scoped to
    /// each member's neighbourhood.
    fn walk_until<T: IntoTarget<'a>>(
        &self,
        relation: Relation,
        until: T,
        selector: Option<&str>,
    ) -> Result<NodeSet<'a>> {
        let boundary = self.target_resolve(until)?;
        let mut walked: Vec<NodeId> = Vec::new();
        for node in self.iter() {
            let mut current = relation_element(&node, relation);
            while let Some(step) = current {
                if boundary.contains(&step.id) {
                    break;
                }
                walked.push(step.id);
                current = relation_element(&step, relation);
            }
        }
        let walked = self.derive(walked);
        tracing::trace!(?relation, nodes = walked.len(), "walked relation");
        match selector {
            Some(selector) => walked.filter(selector),
            None => Ok(walked),
        }
    }
}

impl<'a, T: IntoTarget<'a>> IntoTarget<'a> for Option<T> {
    /// `None` resolves to an empty set, leaving an until-walk unbounded.
    fn into_target(self) -> Input<'a> {
        match self {
            Some(target) => target.into_target(),
            None => Input::Nodes(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::HtmlDocument;

    const HTML: &str = r#"
        <div id="wrap">
            <ul id="list">
                <li id="l1" class="x">1</li>
                <li id="l2">2</li>
                text
                <li id="l3" class="x">3</li>
                <li id="l4">4</li>
            </ul>
        </div>"#;

    fn ids(set: &crate::NodeSet) -> Vec<String> {
        set.iter()
            .map(|n| n.attr("id").map(|v| v.to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn parent_and_children() {
        let doc = HtmlDocument::parse(HTML);
        let items = doc.find("li").expect("valid");
        assert_eq!(ids(&items.parent(None).expect("valid")), vec!["list"]);
        assert!(items.parent(Some("div")).expect("valid").is_empty());
        let list = doc.find("#list").expect("valid");
        assert_eq!(
            ids(&list.children(Some(".x")).expect("valid")),
            vec!["l1", "l3"]
        );
    }

    #[test]
    fn parents_in_document_order() {
        let doc = HtmlDocument::parse(HTML);
        let item = doc.find("#l2").expect("valid");
        let parents = item.parents(None).expect("valid");
        let names: Vec<String> = parents
            .iter()
            .map(|n| n.node_name().map(|v| v.to_string()).unwrap_or_default())
            .collect();
        assert_eq!(names, vec!["html", "body", "div", "ul"]);
    }

    #[test]
    fn prev_and_next_pick_nearest_match() {
        let doc = HtmlDocument::parse(HTML);
        let l4 = doc.find("#l4").expect("valid");
        assert_eq!(ids(&l4.prev(None).expect("valid")), vec!["l3"]);
        assert_eq!(ids(&l4.prev(Some("#l2")).expect("valid")), vec!["l2"]);
        let l1 = doc.find("#l1").expect("valid");
        assert_eq!(ids(&l1.next(Some(".x")).expect("valid")), vec!["l3"]);
        assert!(l4.next(None).expect("valid").is_empty());
    }

    #[test]
    fn prev_all_next_all_siblings() {
        let doc = HtmlDocument::parse(HTML);
        let l3 = doc.find("#l3").expect("valid");
        assert_eq!(ids(&l3.prev_all(None).expect("valid")), vec!["l1", "l2"]);
        assert_eq!(ids(&l3.next_all(None).expect("valid")), vec!["l4"]);
        assert_eq!(
            ids(&l3.siblings(None).expect("valid")),
            vec!["l1", "l2", "l4"]
        );
    }

    #[test]
    fn until_walks_stop_before_boundary() {
        let doc = HtmlDocument::parse(HTML);
        let l1 = doc.find("#l1").expect("valid");
        assert_eq!(ids(&l1.next_until("#l4", None).expect("valid")), vec!["l2", "l3"]);
        assert_eq!(
            ids(&l1.next_until("#l4", Some(".x")).expect("valid")),
            vec!["l3"]
        );
        let l4 = doc.find("#l4").expect("valid");
        assert_eq!(ids(&l4.prev_until("#l1", None).expect("valid")), vec!["l3", "l2"]);
        assert_eq!(
            ids(&l4.parents_until("body", None).expect("valid")),
            vec!["list", "wrap"]
        );
    }

    #[test]
    fn unbounded_until_walks_to_the_end() {
        let doc = HtmlDocument::parse(HTML);
        let l2 = doc.find("#l2").expect("valid");
        assert_eq!(
            ids(&l2.next_until(None::<&str>, None).expect("valid")),
            vec!["l3", "l4"]
        );
        let names: Vec<String> = l2
            .parents_until(None::<&str>, None)
            .expect("valid")
            .iter()
            .map(|n| n.node_name().map(|v| v.to_string()).unwrap_or_default())
            .collect();
        assert_eq!(names, vec!["ul", "div", "body", "html"]);
    }

    #[test]
    fn find_with_set_intersects_descendants() {
        let doc = HtmlDocument::parse(HTML);
        let xs = doc.find(".x").expect("valid");
        let list = doc.find("#list").expect("valid");
        assert_eq!(ids(&list.find(&xs).expect("owned")), vec!["l1", "l3"]);
        let l1 = doc.find("#l1").expect("valid");
        assert!(l1.find(&xs).expect("owned").is_empty());
    }

    #[test]
    fn filter_by_selector_and_set() {
        let doc = HtmlDocument::parse(HTML);
        let items = doc.find("li").expect("valid");
        assert_eq!(ids(&items.filter(".x").expect("valid")), vec!["l1", "l3"]);
        let l3 = doc.find("#l3").expect("valid");
        assert_eq!(ids(&items.filter(&l3).expect("owned")), vec!["l3"]);
    }

    #[test]
    fn union_follows_member_order() {
        let doc = HtmlDocument::parse(HTML);
        let pair = doc.find("#l4").expect("valid").add("#l2").expect("valid");
        assert_eq!(
            ids(&pair.next(None).expect("valid")),
            vec!["l3"]
        );
        assert_eq!(
            ids(&pair.prev_all(None).expect("valid")),
            vec!["l1", "l2", "l3"]
        );
    }
}
