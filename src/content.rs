//! Content accessors on node sets.
//!
//! Getters read the first member; setters write every member. Attribute,
//! class, style and value accessors only touch element members and pass
//! over text or comment nodes silently.

use serde::Serialize;
use serde_json::Value;
use tendril::StrTendril;

use crate::element::ElementView;
use crate::error::Result;
use crate::node_set::NodeSet;
use crate::tree::accepts_children;

const DATA_PREFIX: &str = "data-";

impl<'a> NodeSet<'a> {
    /// Text content of the first member, or an empty string.
    #[must_use]
    pub fn text(&self) -> StrTendril {
        self.get(0).map(|node| node.text()).unwrap_or_default()
    }

    /// Text content of every member.
    #[must_use]
    pub fn text_all(&self) -> Vec<String> {
        self.iter().map(|node| node.text().to_string()).collect()
    }

    /// Replace the content of every member with `text`.
    ///
    /// The text is stored as a text node and escaped on serialization.
    pub fn set_text(&self, text: &str) -> &Self {
        for node in self.iter() {
            node.set_text(text);
        }
        self
    }

    /// Inner markup of the first member, or an empty string.
    #[must_use]
    pub fn html(&self) -> StrTendril {
        self.get(0).map(|node| node.inner_html()).unwrap_or_default()
    }

    /// Replace the children of every member with nodes parsed from `html`.
    ///
    /// Text and comment members are left untouched.
    pub fn set_html(&self, html: &str) -> Result<&Self> {
        let containers = self.members_where(accepts_children);
        containers.empty();
        if !html.is_empty() {
            containers.append(html)?;
        }
        Ok(self)
    }

    /// Markup of the first member including the member itself.
    #[must_use]
    pub fn outer_html(&self) -> StrTendril {
        self.get(0).map(|node| node.html()).unwrap_or_default()
    }

    /// Remove all children of every member. Text members become empty.
    pub fn empty(&self) -> &Self {
        for node in self.iter() {
            if node.is_text() {
                node.set_text("");
            } else {
                node.remove_children();
            }
        }
        self
    }

    /// Attribute `name` of the first member, if it is an element that has it.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<StrTendril> {
        self.map_first(|el: ElementView| el.attr(name)).flatten()
    }

    /// Set attribute `name` on every element member.
    pub fn set_attr(&self, name: &str, value: &str) -> &Self {
        self.elements().for_each(|el| el.set_attr(name, value));
        self
    }

    /// Set several attributes on every element member.
    pub fn set_attrs(&self, attrs: &[(&str, &str)]) -> &Self {
        for (name, value) in attrs {
            self.set_attr(name, value);
        }
        self
    }

    /// Remove attribute `name` from every element member.
    pub fn remove_attr(&self, name: &str) -> &Self {
        self.elements().for_each(|el| el.remove_attr(name));
        self
    }

    /// Remove every attribute not named in `except` from every element member.
    pub fn remove_all_attrs(&self, except: &[&str]) -> &Self {
        self.elements().for_each(|el| el.remove_all_attrs(except));
        self
    }

    /// Whether any element member has attribute `name`.
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.any(|el: ElementView, _| el.has_attr(name))
    }

    /// Alias of [`NodeSet::attr`].
    #[must_use]
    pub fn prop(&self, name: &str) -> Option<StrTendril> {
        self.attr(name)
    }

    /// Alias of [`NodeSet::set_attr`].
    pub fn set_prop(&self, name: &str, value: &str) -> &Self {
        self.set_attr(name, value)
    }

    /// Alias of [`NodeSet::remove_attr`].
    pub fn remove_prop(&self, name: &str) -> &Self {
        self.remove_attr(name)
    }

    /// The `data-{name}` attribute of the first member.
    ///
    /// Values that parse as JSON are returned decoded, anything else as a
    /// JSON string.
    ///
    /// ```rust
    /// use rs_html_query::HtmlDocument;
    /// use serde_json::json;
    ///
    /// let doc = HtmlDocument::parse(r#"<div data-size="3" data-name="box"></div>"#);
    /// let div = doc.find("div")?;
    /// assert_eq!(div.data("size"), Some(json!(3)));
    /// assert_eq!(div.data("name"), Some(json!("box")));
    /// # Ok::<(), rs_html_query::Error>(())
    /// ```
    #[must_use]
    pub fn data(&self, name: &str) -> Option<Value> {
        let raw = self.attr(&data_attr(name))?;
        Some(serde_json::from_str(&raw).unwrap_or_else(|_| Value::String(raw.to_string())))
    }

    /// Set `data-{name}` on every element member.
    ///
    /// Strings are stored verbatim, other values as JSON.
    pub fn set_data<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<&Self> {
        let encoded = match serde_json::to_value(value).map_err(json_error)? {
            Value::String(text) => text,
            other => other.to_string(),
        };
        Ok(self.set_attr(&data_attr(name), &encoded))
    }

    /// Whether any element member has `data-{name}`.
    #[must_use]
    pub fn has_data(&self, name: &str) -> bool {
        self.has_attr(&data_attr(name))
    }

    /// Remove `data-{name}` from every element member.
    pub fn remove_data(&self, name: &str) -> &Self {
        self.remove_attr(&data_attr(name))
    }

    /// Form value of the first member.
    #[must_use]
    pub fn val(&self) -> Option<String> {
        self.map_first(|el: ElementView| el.val()).flatten()
    }

    /// Set the form value of every `input`, `textarea` and `select` member.
    pub fn set_val(&self, value: &str) -> &Self {
        self.elements().for_each(|el| el.set_val(value));
        self
    }

    /// Add whitespace-separated classes to every element member.
    pub fn add_class(&self, classes: &str) -> &Self {
        self.elements().for_each(|el| el.add_class(classes));
        self
    }

    /// Whether any element member has `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.any(|el: ElementView, _| el.has_class(class))
    }

    /// Remove classes from every element member; `None` removes the attribute.
    pub fn remove_class(&self, classes: Option<&str>) -> &Self {
        self.elements().for_each(|el| el.remove_class(classes));
        self
    }

    /// Toggle classes on every element member, or force them with `state`.
    pub fn toggle_class(&self, classes: &str, state: Option<bool>) -> &Self {
        self.elements().for_each(|el| el.toggle_class(classes, state));
        self
    }

    /// Inline style property `name` of the first member.
    #[must_use]
    pub fn css(&self, name: &str) -> Option<String> {
        self.map_first(|el: ElementView| el.css(name)).flatten()
    }

    /// Set inline style property `name` on every element member. An empty
    /// value removes the property.
    pub fn set_css(&self, name: &str, value: &str) -> &Self {
        self.elements().for_each(|el| el.set_css(name, value));
        self
    }

    /// Set several inline style properties on every element member.
    pub fn set_css_map(&self, css: &[(&str, &str)]) -> &Self {
        for (name, value) in css {
            self.set_css(name, value);
        }
        self
    }

    /// Remove inline style property `name` from every element member.
    pub fn remove_css(&self, name: &str) -> &Self {
        self.elements().for_each(|el| el.remove_css(name));
        self
    }
}

fn data_attr(name: &str) -> String {
    format!("{DATA_PREFIX}{name}")
}

fn json_error(err: serde_json::Error) -> crate::Error {
    crate::Error::TypeError(format!("data value is not serializable: {err}"))
}

#[cfg(test)]
mod tests {
    use crate::HtmlDocument;
    use serde_json::json;

    const HTML: &str = r#"<div class="c"><p class="a" title="t">x</p><p>y</p></div>"#;

    #[test]
    fn getters_read_first_member() {
        let doc = HtmlDocument::parse(HTML);
        let ps = doc.find("p").expect("valid");
        assert_eq!(ps.text().to_string(), "x");
        assert_eq!(ps.attr("title").as_deref(), Some("t"));
        assert_eq!(ps.attr("missing"), None);
        assert_eq!(ps.outer_html().to_string(), r#"<p class="a" title="t">x</p>"#);
        assert_eq!(ps.text_all(), vec!["x", "y"]);
    }

    #[test]
    fn empty_set_getters() {
        let doc = HtmlDocument::parse(HTML);
        let none = doc.find("table").expect("valid");
        assert_eq!(none.text().to_string(), "");
        assert_eq!(none.html().to_string(), "");
        assert_eq!(none.attr("id"), None);
        assert_eq!(none.val(), None);
        assert!(!none.has_class("a"));
    }

    #[test]
    fn setters_write_every_member() {
        let doc = HtmlDocument::parse(HTML);
        let ps = doc.find("p").expect("valid");
        ps.set_attr("data-k", "v").add_class("z");
        assert_eq!(
            doc.find("div").expect("valid").html().to_string(),
            r#"<p class="a z" title="t" data-k="v">x</p><p data-k="v" class="z">y</p>"#
        );
    }

    #[test]
    fn add_class_scenario() {
        let doc = HtmlDocument::parse(HTML);
        let a = doc.find(".a").expect("valid");
        a.add_class("b");
        assert_eq!(a.outer_html().to_string(), r#"<p class="a b" title="t">x</p>"#);
    }

    #[test]
    fn class_edits_are_idempotent() {
        let doc = HtmlDocument::parse(HTML);
        let ps = doc.find("p").expect("valid");
        ps.add_class("q").add_class("q");
        let once = doc.outer_html();
        ps.add_class("q");
        assert_eq!(doc.outer_html(), once);
        ps.remove_class(Some("q"));
        let removed = doc.outer_html();
        ps.remove_class(Some("q"));
        assert_eq!(doc.outer_html(), removed);
        assert!(ps.has_class("a"));
        assert!(!ps.has_class("q"));
    }

    #[test]
    fn text_is_escaped_on_output() {
        let doc = HtmlDocument::parse(HTML);
        let a = doc.find(".a").expect("valid");
        a.set_text("<b>1 & 2</b>");
        assert_eq!(a.html().to_string(), "&lt;b&gt;1 &amp; 2&lt;/b&gt;");
        assert_eq!(a.text().to_string(), "<b>1 & 2</b>");
    }

    #[test]
    fn set_html_parses_markup_for_every_member() {
        let doc = HtmlDocument::parse(HTML);
        let ps = doc.find("p").expect("valid");
        ps.set_html("<i>n</i>").expect("content");
        assert_eq!(doc.find("p i").expect("valid").len(), 2);
        ps.set_html("").expect("content");
        assert_eq!(doc.find("p").expect("valid").html().to_string(), "");
    }

    #[test]
    fn remove_all_attrs_keeps_exceptions() {
        let doc = HtmlDocument::parse(HTML);
        let a = doc.find(".a").expect("valid");
        a.remove_all_attrs(&["title"]);
        assert_eq!(a.outer_html().to_string(), r#"<p title="t">x</p>"#);
        assert!(a.has_attr("title"));
        assert!(a.prop("class").is_none());
        a.set_prop("id", "n").remove_prop("title");
        assert_eq!(a.outer_html().to_string(), r#"<p id="n">x</p>"#);
    }

    #[test]
    fn data_round_trips_through_json() {
        let doc = HtmlDocument::parse(HTML);
        let div = doc.find("div").expect("valid");
        div.set_data("cfg", &json!({"a": [1, 2]})).expect("serializable");
        div.set_data("label", "plain").expect("serializable");
        div.set_data("n", &5).expect("serializable");
        assert_eq!(div.data("cfg"), Some(json!({"a": [1, 2]})));
        assert_eq!(div.data("label"), Some(json!("plain")));
        assert_eq!(div.data("n"), Some(json!(5)));
        assert_eq!(div.attr("data-label").as_deref(), Some("plain"));
        assert!(div.has_data("cfg"));
        div.remove_data("cfg");
        assert!(!div.has_data("cfg"));
        assert_eq!(div.data("cfg"), None);
    }

    #[test]
    fn css_accessors() {
        let doc = HtmlDocument::parse(HTML);
        let ps = doc.find("p").expect("valid");
        ps.set_css_map(&[("color", "red"), ("Width", "1px")]);
        assert_eq!(ps.css("width").as_deref(), Some("1px"));
        ps.remove_css("WIDTH");
        assert_eq!(ps.attr("style").as_deref(), Some("color: red;"));
        ps.set_css("color", "");
        assert!(!ps.has_attr("style"));
    }

    #[test]
    fn select_val_scenario() {
        let doc = HtmlDocument::parse(
            r#"<select><option value="1" selected>a</option><option value="2">b</option><option value="3" selected>c</option></select>"#,
        );
        let select = doc.find("select").expect("valid");
        select.set_val("2");
        assert_eq!(select.val().as_deref(), Some("2"));
        let selected = doc.find("option:selected").expect("valid");
        assert_eq!(selected.len(), 1);
        assert_eq!(selected.attr("value").as_deref(), Some("2"));
        assert_eq!(selected.attr("selected").as_deref(), Some("selected"));
    }

    #[test]
    fn element_accessors_skip_text_members() {
        let doc = HtmlDocument::parse(HTML);
        let p = doc.find(".a").expect("valid");
        let text = p.get(0).and_then(|n| n.first_child()).expect("text");
        let mixed = doc.resolve(vec![text, p.get(0).expect("p")]).expect("owned");
        assert!(mixed.get(0).expect("text").is_text());
        assert_eq!(mixed.attr("class"), None);
        assert!(mixed.has_class("a"));
        mixed.set_attr("id", "only-p");
        assert_eq!(p.attr("id").as_deref(), Some("only-p"));
    }

    #[test]
    fn empty_clears_children_and_text() {
        let doc = HtmlDocument::parse(HTML);
        let div = doc.find("div").expect("valid");
        let text = doc.find(".a").expect("valid").get(0).and_then(|n| n.first_child()).expect("text");
        doc.resolve(text).expect("owned").empty();
        assert_eq!(doc.find(".a").expect("valid").html().to_string(), "");
        div.empty();
        assert_eq!(div.html().to_string(), "");
    }
}
