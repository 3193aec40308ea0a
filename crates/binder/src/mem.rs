// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory element tree
//!
//! A [`DomNode`] that needs no browser. Inner markup is kept verbatim and not
//! parsed, so elements created through it can't be queried.

use std::cell::{Cell, RefCell};
use std::fmt::{self, Debug, Write};
use std::rc::{Rc, Weak};

use crate::dom::{DomNode, Selector};

#[derive(Clone)]
pub struct MemNode(Rc<Inner>);

struct Inner {
    tag: String,
    namespace: Option<String>,
    parent: RefCell<Weak<Inner>>,
    attrs: RefCell<Vec<(String, String)>>,
    styles: RefCell<Vec<(String, String)>>,
    children: RefCell<Vec<Child>>,
    value: RefCell<String>,
    focused: Cell<bool>,
    scroll_top: Cell<i32>,
    scrolled_into_view: Cell<bool>,
}

#[derive(Clone)]
enum Child {
    Element(MemNode),
    Text(String),
    Markup(String),
}

impl MemNode {
    pub fn new(tag: &str) -> Self {
        MemNode::build(tag, None)
    }

    fn build(tag: &str, namespace: Option<&str>) -> Self {
        MemNode(Rc::new(Inner {
            tag: tag.to_ascii_lowercase(),
            namespace: namespace.map(Into::into),
            parent: RefCell::new(Weak::new()),
            attrs: RefCell::default(),
            styles: RefCell::default(),
            children: RefCell::default(),
            value: RefCell::default(),
            focused: Cell::new(false),
            scroll_top: Cell::new(0),
            scrolled_into_view: Cell::new(false),
        }))
    }

    pub fn namespace(&self) -> Option<String> {
        self.0.namespace.clone()
    }

    pub fn parent(&self) -> Option<MemNode> {
        self.0.parent.borrow().upgrade().map(MemNode)
    }

    /// Element children, text and markup excluded.
    pub fn children(&self) -> Vec<MemNode> {
        self.0
            .children
            .borrow()
            .iter()
            .filter_map(|child| match child {
                Child::Element(el) => Some(el.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn is_focused(&self) -> bool {
        self.0.focused.get()
    }

    pub fn scroll_top(&self) -> i32 {
        self.0.scroll_top.get()
    }

    pub fn was_scrolled_into_view(&self) -> bool {
        self.0.scrolled_into_view.get()
    }

    /// Outer markup of this element.
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        self.write_outer(&mut out);
        out
    }

    fn write_outer(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.0.tag);
        for (name, value) in self.0.attrs.borrow().iter() {
            let _ = write!(out, " {name}=\"{}\"", escape(value, true));
        }
        let styles = self.0.styles.borrow();
        if !styles.is_empty() && self.attr("style").is_none() {
            out.push_str(" style=\"");
            for (name, value) in styles.iter() {
                let _ = write!(out, "{name}: {value}; ");
            }
            out.pop();
            out.push('"');
        }
        out.push('>');
        self.write_inner(out);
        let _ = write!(out, "</{}>", self.0.tag);
    }

    fn write_inner(&self, out: &mut String) {
        for child in self.0.children.borrow().iter() {
            match child {
                Child::Element(el) => el.write_outer(out),
                Child::Text(text) => out.push_str(&escape(text, false)),
                Child::Markup(markup) => out.push_str(markup),
            }
        }
    }

    fn write_text(&self, out: &mut String) {
        for child in self.0.children.borrow().iter() {
            match child {
                Child::Element(el) => el.write_text(out),
                Child::Text(text) | Child::Markup(text) => out.push_str(text),
            }
        }
    }

    fn is_match(&self, selector: &Selector) -> bool {
        let attrs = self.0.attrs.borrow();

        selector.matches(&self.0.tag, |name| {
            attrs.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
        })
    }

    fn collect(&self, selector: &Selector, found: &mut Vec<MemNode>) {
        for child in self.children() {
            if child.is_match(selector) {
                found.push(child.clone());
            }
            child.collect(selector, found);
        }
    }

    fn replace_children(&self, child: Option<Child>) {
        let old = std::mem::replace(&mut *self.0.children.borrow_mut(), child.into_iter().collect());

        for child in old {
            if let Child::Element(el) = child {
                *el.0.parent.borrow_mut() = Weak::new();
            }
        }
    }

    fn with_class_list<F>(&self, f: F)
    where
        F: FnOnce(&mut Vec<String>),
    {
        let mut classes: Vec<String> = self
            .attr("class")
            .map(|c| c.split_ascii_whitespace().map(Into::into).collect())
            .unwrap_or_default();

        f(&mut classes);

        self.set_attr("class", &classes.join(" "));
    }
}

fn escape(text: &str, attr: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attr => out.push_str("&quot;"),
            ch => out.push(ch),
        }
    }
    out
}

impl PartialEq for MemNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for MemNode {}

impl Debug for MemNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MemNode(<{}", self.0.tag)?;
        for (name, value) in self.0.attrs.borrow().iter() {
            write!(f, " {name}=\"{value}\"")?;
        }
        f.write_str(">)")
    }
}

impl DomNode for MemNode {
    fn query_all(&self, selector: &Selector) -> Vec<Self> {
        let mut found = Vec::new();
        self.collect(selector, &mut found);
        found
    }

    fn closest(&self, selector: &Selector) -> Option<Self> {
        let mut current = Some(self.clone());

        while let Some(node) = current {
            if node.is_match(selector) {
                return Some(node);
            }
            current = node.parent();
        }

        None
    }

    fn tag(&self) -> String {
        self.0.tag.clone()
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.0
            .attrs
            .borrow()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    fn set_attr(&self, name: &str, value: &str) {
        let mut attrs = self.0.attrs.borrow_mut();

        match attrs.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.into(),
            None => attrs.push((name.into(), value.into())),
        }
    }

    fn set_attr_ns(&self, _: &str, name: &str, value: &str) {
        self.set_attr(name, value);
    }

    fn remove_attr(&self, name: &str) {
        self.0.attrs.borrow_mut().retain(|(n, _)| n != name);
    }

    fn text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    fn set_text(&self, text: &str) {
        self.replace_children(Some(Child::Text(text.into())));
    }

    fn html(&self) -> String {
        let mut out = String::new();
        self.write_inner(&mut out);
        out
    }

    fn set_html(&self, html: &str) {
        let markup = (!html.is_empty()).then(|| Child::Markup(html.into()));
        self.replace_children(markup);
    }

    fn input_value(&self) -> String {
        self.0.value.borrow().clone()
    }

    fn set_input_value(&self, value: &str) {
        *self.0.value.borrow_mut() = value.into();
    }

    fn style_prop(&self, name: &str) -> String {
        self.0
            .styles
            .borrow()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
            .unwrap_or_default()
    }

    fn set_style_prop(&self, name: &str, value: &str) {
        let mut styles = self.0.styles.borrow_mut();

        styles.retain(|(n, _)| n != name);
        if !value.is_empty() {
            styles.push((name.into(), value.into()));
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map_or(false, |c| c.split_ascii_whitespace().any(|t| t == class))
    }

    fn toggle_class(&self, class: &str, on: bool) {
        if self.has_class(class) != on {
            self.with_class_list(|classes| {
                if on {
                    classes.push(class.into());
                } else {
                    classes.retain(|c| c != class);
                }
            });
        }
    }

    fn create(&self, tag: &str) -> Self {
        MemNode::new(tag)
    }

    fn create_ns(&self, namespace: &str, tag: &str) -> Self {
        MemNode::build(tag, Some(namespace))
    }

    fn append(&self, child: &Self) {
        child.detach();
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(Child::Element(child.clone()));
    }

    fn detach(&self) {
        if let Some(parent) = self.parent() {
            parent
                .0
                .children
                .borrow_mut()
                .retain(|child| !matches!(child, Child::Element(el) if el == self));
        }
        *self.0.parent.borrow_mut() = Weak::new();
    }

    fn focus(&self) {
        self.0.focused.set(true);
    }

    fn set_scroll_top(&self, top: i32) {
        self.0.scroll_top.set(top);
    }

    fn scroll_into_view(&self) {
        self.0.scrolled_into_view.set(true);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn serializes_tree() {
        let root = MemNode::new("div");
        let link = root.create("a");
        link.set_attr("href", "/a?x=1&y=\"2\"");
        link.set_text("<Home>");
        root.append(&link);
        root.set_style_prop("display", "none");

        assert_eq!(
            root.outer_html(),
            r#"<div style="display: none;"><a href="/a?x=1&amp;y=&quot;2&quot;">&lt;Home&gt;</a></div>"#
        );
        assert_eq!(root.text(), "<Home>");
    }

    #[test]
    fn append_moves_between_parents() {
        let a = MemNode::new("div");
        let b = MemNode::new("div");
        let child = a.create("span");

        a.append(&child);
        b.append(&child);

        assert!(a.children().is_empty());
        assert_eq!(b.children(), [child.clone()]);
        assert_eq!(child.parent(), Some(b));
    }

    #[test]
    fn markup_is_opaque() {
        let root = MemNode::new("div");
        let old = root.create("p");
        root.append(&old);

        root.set_html("<p class=\"x\">hi</p>");

        assert_eq!(root.html(), "<p class=\"x\">hi</p>");
        assert!(root.query_all(&Selector::Class("x")).is_empty());
        assert_eq!(old.parent(), None);

        root.set_html("");
        assert_eq!(root.html(), "");
    }

    #[test]
    fn closest_includes_self() {
        let outer = MemNode::new("div");
        let inner = outer.create("span");
        outer.set_attr("data-hover-parent", "true");
        outer.append(&inner);

        assert_eq!(inner.closest(&Selector::Attr("data-hover-parent")), Some(outer.clone()));
        assert_eq!(outer.closest(&Selector::Attr("data-hover-parent")), Some(outer.clone()));
        assert_eq!(inner.closest(&Selector::Attr("data-missing")), None);
    }

    #[test]
    fn class_list() {
        let el = MemNode::new("li");

        el.toggle_class("open", false);
        assert_eq!(el.attr("class"), None);

        el.toggle_class("open", true);
        el.toggle_class("open", true);
        el.toggle_class("active", true);
        assert_eq!(el.attr("class").as_deref(), Some("open active"));

        el.toggle_class("open", false);
        assert_eq!(el.attr("class").as_deref(), Some("active"));
    }
}
