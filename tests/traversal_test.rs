#![allow(clippy::expect_used)] // expect() is appropriate in tests for clear panic messages

mod common;

use common::PAGE;
use rs_html_query::HtmlDocument;

fn ids(set: &rs_html_query::NodeSet<'_>) -> Vec<String> {
    set.iter()
        .map(|node| node.attr("id").map(|v| v.to_string()).unwrap_or_default())
        .collect()
}

#[test]
fn parent_and_parents() {
    let doc = HtmlDocument::parse(PAGE);
    let items = doc.find("li").expect("valid");
    let parent = items.parent(None).expect("valid");
    assert_eq!(parent.len(), 1);
    assert!(parent.has_class("menu"));

    let ancestors = items.first().parents(None).expect("valid");
    let names: Vec<String> = ancestors
        .iter()
        .filter_map(|n| n.node_name().map(|s| s.to_string()))
        .collect();
    assert_eq!(names, ["html", "body", "div", "ul"]);

    let divs = items.parents(Some("div")).expect("valid");
    assert_eq!(ids(&divs), ["main"]);
}

#[test]
fn sibling_relations() {
    let doc = HtmlDocument::parse(PAGE);
    let two = doc.find("#two").expect("valid");
    assert_eq!(ids(&two.prev(None).expect("valid")), ["one"]);
    assert_eq!(ids(&two.next(None).expect("valid")), ["three"]);
    assert_eq!(ids(&two.next_all(None).expect("valid")), ["three", "four"]);
    assert_eq!(ids(&two.prev_all(None).expect("valid")), ["one"]);
    assert_eq!(
        ids(&two.siblings(None).expect("valid")),
        ["one", "three", "four"]
    );
    assert_eq!(ids(&two.siblings(Some(".item")).expect("valid")), ["one", "three"]);
    assert!(doc.find("#four").expect("valid").next(None).expect("valid").is_empty());
}

#[test]
fn until_walks_stop_before_the_boundary() {
    let doc = HtmlDocument::parse(PAGE);
    let one = doc.find("#one").expect("valid");
    assert_eq!(
        ids(&one.next_until("#four", None).expect("valid")),
        ["two", "three"]
    );
    assert_eq!(
        ids(&one.next_until("#four", Some(".active")).expect("valid")),
        ["two"]
    );
    let four = doc.find("#four").expect("valid");
    assert_eq!(ids(&four.prev_until(".active", None).expect("valid")), ["three"]);

    let up = one.parents_until("#main", None).expect("valid");
    assert_eq!(up.len(), 1);
    assert!(up.has_class("menu"));
}

#[test]
fn until_without_boundary_walks_to_the_end() {
    let doc = HtmlDocument::parse(PAGE);
    let one = doc.find("#one").expect("valid");
    let rest = one.next_until(None::<&str>, None).expect("valid");
    assert_eq!(ids(&rest), ["two", "three", "four"]);
}

#[test]
fn children_skip_text_nodes() {
    let doc = HtmlDocument::parse(PAGE);
    let menu = doc.find("ul").expect("valid");
    assert_eq!(menu.children(None).expect("valid").len(), 4);
    assert_eq!(menu.children(Some(".item")).expect("valid").len(), 3);
}

#[test]
fn find_scopes_to_descendants() {
    let doc = HtmlDocument::parse(PAGE);
    let form = doc.find("form").expect("valid");
    assert_eq!(form.find("li").expect("valid").len(), 0);
    assert_eq!(form.find("[name]").expect("valid").len(), 3);

    let items = doc.find("li").expect("valid");
    let menu = doc.find("ul").expect("valid");
    assert_eq!(menu.find(&items).expect("valid").len(), 4);
    assert!(items.find(&menu).expect("valid").is_empty());
}

#[test]
fn filter_composes_as_conjunction() {
    let doc = HtmlDocument::parse(PAGE);
    let items = doc.find("li").expect("valid");
    let chained = items
        .filter(".item")
        .expect("valid")
        .filter(".active")
        .expect("valid");
    let combined = items.filter(".item.active").expect("valid");
    assert_eq!(chained, combined);
    assert_eq!(ids(&chained), ["two"]);
}

#[test]
fn filter_with_predicate_sees_index() {
    let doc = HtmlDocument::parse(PAGE);
    let items = doc.find("li").expect("valid");
    let odd = items.filter_with(|node: dom_query::NodeRef, i| i % 2 == 1 && node.is_element());
    assert_eq!(ids(&odd), ["two", "four"]);
}
