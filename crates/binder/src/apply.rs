// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde_json::Value;

use crate::dom::DomNode;
use crate::{camel_to_kebab, BindError, BindExpr, BindKind, ValueExt};

/// Project `value`, the value an update supplied for `key`, onto a single
/// element bound through `kind`.
pub fn apply<N: DomNode>(node: &N, kind: BindKind, key: &str, value: &Value) -> Result<(), BindError> {
    let raw = node.attr(kind.attribute()).unwrap_or_default();
    let expr = BindExpr::parse(&raw);
    let bound = expr.resolve(value)?;

    match kind {
        BindKind::Bind => set_value(node, expr.prop(), bound),
        BindKind::Html => node.set_html(&bound.to_text()),
        BindKind::If => node.set_style_prop("display", if bound.is_truthy() { "" } else { "none" }),
        BindKind::Not => node.set_style_prop("display", if bound.is_truthy() { "none" } else { "" }),
        BindKind::Show => node.set_style_prop("visibility", if bound.is_truthy() { "" } else { "hidden" }),
        BindKind::Hide => node.set_style_prop("visibility", if bound.is_truthy() { "hidden" } else { "" }),
        BindKind::Class => node.toggle_class(&camel_to_kebab(key), bound.is_truthy()),
    }

    Ok(())
}

fn set_value<N: DomNode>(node: &N, prop: Option<&str>, value: &Value) {
    match prop {
        Some(prop) if value.is_truthy() => node.set_attr(prop, &value.to_display()),
        Some(prop) => node.remove_attr(prop),
        None if node.is_input() => node.set_input_value(&value.to_text()),
        None => node.set_text(&value.to_text()),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::MemNode;
    use serde_json::json;

    fn bound(tag: &str, kind: BindKind, expr: &str) -> MemNode {
        let el = MemNode::new(tag);
        el.set_attr(kind.attribute(), expr);
        el
    }

    #[test]
    fn attribute_set_and_removed() {
        let el = bound("a", BindKind::Bind, "href:portalUrl");

        apply(&el, BindKind::Bind, "portalUrl", &json!("https://help")).unwrap();
        assert_eq!(el.attr("href").as_deref(), Some("https://help"));

        for falsy in [json!(""), json!(0), json!(null), json!(false)] {
            apply(&el, BindKind::Bind, "portalUrl", &json!("x")).unwrap();
            apply(&el, BindKind::Bind, "portalUrl", &falsy).unwrap();
            assert_eq!(el.attr("href"), None);
        }

        apply(&el, BindKind::Bind, "portalUrl", &json!(42)).unwrap();
        assert_eq!(el.attr("href").as_deref(), Some("42"));
    }

    #[test]
    fn text_content_replaces_children() {
        let el = bound("p", BindKind::Bind, "title");
        let old = el.create("b");
        el.append(&old);

        apply(&el, BindKind::Bind, "title", &json!("Help")).unwrap();
        assert_eq!(el.html(), "Help");

        el.append(&old);
        apply(&el, BindKind::Bind, "title", &json!("Help")).unwrap();
        assert_eq!(el.html(), "Help");

        apply(&el, BindKind::Bind, "title", &json!(null)).unwrap();
        assert_eq!(el.text(), "");
    }

    #[test]
    fn input_value() {
        let el = bound("input", BindKind::Bind, "searchText");

        apply(&el, BindKind::Bind, "searchText", &json!("query")).unwrap();

        assert_eq!(el.input_value(), "query");
        assert_eq!(el.text(), "");
    }

    #[test]
    fn inner_markup() {
        let el = bound("div", BindKind::Html, "body");

        apply(&el, BindKind::Html, "body", &json!("<em>hi</em>")).unwrap();

        assert_eq!(el.html(), "<em>hi</em>");
    }

    #[test]
    fn conditionals_are_inverse_pairs() {
        let pairs = [
            (BindKind::If, BindKind::Not, "display", "none"),
            (BindKind::Show, BindKind::Hide, "visibility", "hidden"),
        ];

        for (on, off, style, hidden) in pairs {
            let a = bound("div", on, "flag");
            let b = bound("div", off, "flag");

            for (value, truthy) in [(json!(true), true), (json!(0), false), (json!("x"), true), (json!(null), false)] {
                apply(&a, on, "flag", &value).unwrap();
                apply(&b, off, "flag", &value).unwrap();

                let (expect_a, expect_b) = if truthy { ("", hidden) } else { (hidden, "") };

                assert_eq!(a.style_prop(style), expect_a);
                assert_eq!(b.style_prop(style), expect_b);
            }
        }
    }

    #[test]
    fn conditionals_style_svg_elements() {
        let root = MemNode::new("div");
        let svg = root.create_ns("http://www.w3.org/2000/svg", "svg");
        svg.set_attr("data-show", "isSearching");

        apply(&svg, BindKind::Show, "isSearching", &json!(false)).unwrap();
        assert_eq!(svg.style_prop("visibility"), "hidden");

        apply(&svg, BindKind::Show, "isSearching", &json!(true)).unwrap();
        assert_eq!(svg.style_prop("visibility"), "");
    }

    #[test]
    fn class_toggle_uses_kebab_key() {
        let el = bound("li", BindKind::Class, "isActive fooBarBaz");

        apply(&el, BindKind::Class, "isActive", &json!(true)).unwrap();
        apply(&el, BindKind::Class, "fooBarBaz", &json!(1)).unwrap();
        assert!(el.has_class("is-active"));
        assert!(el.has_class("foo-bar-baz"));

        apply(&el, BindKind::Class, "isActive", &json!(false)).unwrap();
        assert!(!el.has_class("is-active"));
        assert!(el.has_class("foo-bar-baz"));
    }

    #[test]
    fn nested_resolution() {
        let el = bound("a", BindKind::Bind, "href:article.href");

        apply(&el, BindKind::Bind, "article.href", &json!({ "href": "x" })).unwrap();
        assert_eq!(el.attr("href").as_deref(), Some("x"));

        let err = apply(&el, BindKind::Bind, "article.href", &json!({ "other": "y" }));
        assert!(matches!(err, Err(BindError::MissingPath { .. })));
        assert_eq!(el.attr("href").as_deref(), Some("x"));
    }
}
