// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! [`DomNode`] for live browser elements

use log::warn;
use wasm_bindgen::{JsCast, UnwrapThrowExt};
use web_sys::{
    CssStyleDeclaration, Element, HtmlElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, Node, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
    SvgElement,
};

use crate::dom::{DomNode, Selector};

// Calls below are spelled out as `Element::method(self, ..)` so they can't
// resolve back into the trait methods of the same name.
impl DomNode for Element {
    fn query_all(&self, selector: &Selector) -> Vec<Self> {
        let css = selector.to_string();

        let list = match Element::query_selector_all(self, &css) {
            Ok(list) => list,
            Err(err) => {
                warn!("invalid selector {css}: {err:?}");
                return Vec::new();
            }
        };

        (0..list.length())
            .filter_map(|idx| list.get(idx))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn closest(&self, selector: &Selector) -> Option<Self> {
        Element::closest(self, &selector.to_string()).ok().flatten()
    }

    fn tag(&self) -> String {
        Element::tag_name(self).to_ascii_lowercase()
    }

    fn attr(&self, name: &str) -> Option<String> {
        Element::get_attribute(self, name)
    }

    fn set_attr(&self, name: &str, value: &str) {
        Element::set_attribute(self, name, value).unwrap_throw();
    }

    fn set_attr_ns(&self, namespace: &str, name: &str, value: &str) {
        Element::set_attribute_ns(self, Some(namespace), name, value).unwrap_throw();
    }

    fn remove_attr(&self, name: &str) {
        Element::remove_attribute(self, name).unwrap_throw();
    }

    fn text(&self) -> String {
        Node::text_content(self).unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        Node::set_text_content(self, Some(text));
    }

    fn html(&self) -> String {
        Element::inner_html(self)
    }

    fn set_html(&self, html: &str) {
        Element::set_inner_html(self, html);
    }

    fn input_value(&self) -> String {
        if let Some(input) = self.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = self.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else if let Some(select) = self.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            String::new()
        }
    }

    fn set_input_value(&self, value: &str) {
        if let Some(input) = self.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = self.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        } else if let Some(select) = self.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        }
    }

    fn style_prop(&self, name: &str) -> String {
        inline_style(self)
            .and_then(|style| style.get_property_value(name).ok())
            .unwrap_or_default()
    }

    fn set_style_prop(&self, name: &str, value: &str) {
        if let Some(style) = inline_style(self) {
            style.set_property(name, value).unwrap_throw();
        }
    }

    fn has_class(&self, class: &str) -> bool {
        Element::class_list(self).contains(class)
    }

    fn toggle_class(&self, class: &str, on: bool) {
        Element::class_list(self)
            .toggle_with_force(class, on)
            .unwrap_throw();
    }

    fn create(&self, tag: &str) -> Self {
        Node::owner_document(self)
            .expect_throw("element without a document")
            .create_element(tag)
            .unwrap_throw()
    }

    fn create_ns(&self, namespace: &str, tag: &str) -> Self {
        Node::owner_document(self)
            .expect_throw("element without a document")
            .create_element_ns(Some(namespace), tag)
            .unwrap_throw()
    }

    fn append(&self, child: &Self) {
        Node::append_child(self, child).unwrap_throw();
    }

    fn detach(&self) {
        Element::remove(self);
    }

    fn focus(&self) {
        if let Some(el) = self.dyn_ref::<HtmlElement>() {
            let _ = el.focus();
        }
    }

    fn set_scroll_top(&self, top: i32) {
        Element::set_scroll_top(self, top);
    }

    fn scroll_into_view(&self) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        options.set_inline(ScrollLogicalPosition::Nearest);

        Element::scroll_into_view_with_scroll_into_view_options(self, &options);
    }
}

/// Inline style of html and svg elements alike. Elements of any other
/// namespace have none.
fn inline_style(el: &Element) -> Option<CssStyleDeclaration> {
    if let Some(el) = el.dyn_ref::<HtmlElement>() {
        Some(el.style())
    } else {
        el.dyn_ref::<SvgElement>().map(SvgElement::style)
    }
}
