//! Element capability view.
//!
//! [`ElementView`] exposes attribute, class, style and form-value
//! accessors for a single element. It can only be built from an element
//! node, so its methods never have to guard against text or comments.

use dom_query::NodeRef;
use tendril::StrTendril;

use crate::helpers::{case_insensitive_search, implode_css, split_class, split_css};

/// An element node with attribute, class, style and value accessors.
#[derive(Debug, Clone, Copy)]
pub struct ElementView<'a> {
    node: NodeRef<'a>,
}

impl<'a> ElementView<'a> {
    /// View `node` as an element, or `None` when it is not one.
    #[must_use]
    pub fn new(node: NodeRef<'a>) -> Option<Self> {
        node.is_element().then_some(Self { node })
    }

    /// The underlying node.
    #[inline]
    #[must_use]
    pub fn node(&self) -> NodeRef<'a> {
        self.node
    }

    /// Lowercase tag name.
    #[must_use]
    pub fn tag_name(&self) -> StrTendril {
        self.node.node_name().unwrap_or_default()
    }

    /// Value of attribute `name`.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<StrTendril> {
        self.node.attr(name)
    }

    /// Set attribute `name` to `value`.
    pub fn set_attr(&self, name: &str, value: &str) {
        self.node.set_attr(name, value);
    }

    /// Remove attribute `name` if present.
    pub fn remove_attr(&self, name: &str) {
        self.node.remove_attr(name);
    }

    /// Whether attribute `name` is present.
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.node.has_attr(name)
    }

    /// Remove every attribute whose name is not listed in `except`.
    pub fn remove_all_attrs(&self, except: &[&str]) {
        if except.is_empty() {
            self.node.remove_all_attrs();
        } else {
            self.node.retain_attrs(except);
        }
    }

    /// Attribute names in source order.
    #[must_use]
    pub fn attr_names(&self) -> Vec<String> {
        self.node
            .attrs()
            .iter()
            .map(|attr| attr.name.local.to_string())
            .collect()
    }

    /// Whether the `class` attribute lists `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|value| split_class(&value).contains(&class))
    }

    /// Add each whitespace-separated class not already present.
    pub fn add_class(&self, classes: &str) {
        let Some(current) = self.attr("class") else {
            self.set_attr("class", classes);
            return;
        };
        let mut names: Vec<&str> = split_class(&current);
        let before = names.len();
        for class in split_class(classes) {
            if !names.contains(&class) {
                names.push(class);
            }
        }
        if names.len() != before {
            self.set_attr("class", &names.join(" "));
        }
    }

    /// Remove the listed classes, or the whole attribute when `classes` is `None`.
    ///
    /// The attribute is dropped once no class is left.
    pub fn remove_class(&self, classes: Option<&str>) {
        let Some(current) = self.attr("class") else {
            return;
        };
        let Some(classes) = classes else {
            self.remove_attr("class");
            return;
        };
        let removed = split_class(classes);
        let kept: Vec<&str> = split_class(&current)
            .into_iter()
            .filter(|class| !removed.contains(class))
            .collect();
        if kept.is_empty() {
            self.remove_attr("class");
        } else {
            self.set_attr("class", &kept.join(" "));
        }
    }

    /// Flip each listed class, or force it on or off with `state`.
    pub fn toggle_class(&self, classes: &str, state: Option<bool>) {
        match state {
            Some(true) => return self.add_class(classes),
            Some(false) => return self.remove_class(Some(classes)),
            None => {}
        }
        let Some(current) = self.attr("class") else {
            self.set_attr("class", classes);
            return;
        };
        let toggled = split_class(classes);
        let existing = split_class(&current);
        let mut result: Vec<&str> = existing
            .iter()
            .copied()
            .filter(|class| !toggled.contains(class))
            .collect();
        result.extend(toggled.iter().copied().filter(|class| !existing.contains(class)));
        if result.is_empty() {
            self.remove_attr("class");
        } else {
            self.set_attr("class", &result.join(" "));
        }
    }

    /// Value of one inline style property, matched exactly first, then ignoring case.
    #[must_use]
    pub fn css(&self, name: &str) -> Option<String> {
        let css = split_css(&self.attr("style")?);
        css.iter()
            .find(|(key, _)| key == name)
            .or_else(|| css.iter().find(|(key, _)| key.eq_ignore_ascii_case(name)))
            .map(|(_, value)| value.clone())
    }

    /// Set one inline style property. An empty value removes it.
    ///
    /// Differently cased spellings of the same property are replaced.
    pub fn set_css(&self, name: &str, value: &str) {
        if value.is_empty() {
            self.remove_css(name);
            return;
        }
        let style = self.attr("style").unwrap_or_default();
        if style.is_empty() {
            self.set_attr("style", &format!("{name}: {value};"));
            return;
        }
        let mut css = split_css(&style);
        if !css.iter().any(|(key, _)| key == name) {
            let stale: Vec<String> = case_insensitive_search(name, css.iter().map(|(k, _)| k.as_str()))
                .into_iter()
                .map(str::to_string)
                .collect();
            css.retain(|(key, _)| !stale.contains(key));
        }
        match css.iter_mut().find(|(key, _)| key == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => css.push((name.to_string(), value.to_string())),
        }
        self.set_attr("style", &implode_css(&css));
    }

    /// Remove one inline style property, in any casing.
    pub fn remove_css(&self, name: &str) {
        let Some(style) = self.attr("style") else {
            return;
        };
        let mut css = split_css(&style);
        let before = css.len();
        if css.iter().any(|(key, _)| key == name) {
            css.retain(|(key, _)| key != name);
        } else {
            css.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
        }
        if css.len() == before {
            return;
        }
        if css.is_empty() {
            self.remove_attr("style");
        } else {
            self.set_attr("style", &implode_css(&css));
        }
    }

    /// Form value of an `input`, `textarea` or `select`.
    ///
    /// A `select` reports its selected option, or its first option when
    /// none is selected. An option without a `value` attribute reports its
    /// text. Other elements have no value.
    #[must_use]
    pub fn val(&self) -> Option<String> {
        match &*self.tag_name() {
            "input" => Some(self.attr("value").map(|v| v.to_string()).unwrap_or_default()),
            "textarea" => Some(self.node.text().to_string()),
            "select" => {
                let options = self.child_options();
                options
                    .iter()
                    .find(|option| option.has_attr("selected"))
                    .or_else(|| options.first())
                    .map(|option| option.attr("value").unwrap_or_else(|| option.text()).to_string())
            }
            _ => None,
        }
    }

    /// Set the form value of an `input`, `textarea` or `select`.
    ///
    /// For a `select`, every selected option is cleared and the first
    /// option whose `value` equals `value` becomes selected.
    pub fn set_val(&self, value: &str) {
        match &*self.tag_name() {
            "input" => self.set_attr("value", value),
            "textarea" => self.node.set_text(value),
            "select" => {
                let options = self.child_options();
                for option in &options {
                    option.remove_attr("selected");
                }
                if let Some(option) = options
                    .iter()
                    .find(|option| option.attr("value").as_deref() == Some(value))
                {
                    option.set_attr("selected", "selected");
                }
            }
            _ => {}
        }
    }

    fn child_options(&self) -> Vec<NodeRef<'a>> {
        self.node
            .element_children()
            .into_iter()
            .filter(|child| child.node_name().as_deref() == Some("option"))
            .collect()
    }
}
