// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `u-icon` element: a sprite from the svg sheet with an optional hover
//! sprite stacked on top

use binder::{BindError, Bound, DomNode, Selector};
use serde_json::json;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

const HOVER_PARENT: &str = "data-hover-parent";

pub struct Icon<N> {
    bound: Bound<N>,
    svg: Option<N>,
    sprites_url: String,
}

impl<N: DomNode> Icon<N> {
    /// Attributes the host reports changes of.
    pub const OBSERVED: [&'static str; 3] = ["sprite", "hover-sprite", "classes"];

    /// Wrap `host` without touching it. A custom element constructor may not
    /// add children, so the svg is built on the first attribute change or on
    /// [`connected`](Icon::connected), whichever comes first.
    pub fn new(host: N, sprites_url: &str) -> Self {
        Icon {
            bound: Bound::new(host),
            svg: None,
            sprites_url: sprites_url.into(),
        }
    }

    /// The host was inserted into a document.
    pub fn connected(&mut self) {
        self.svg();
    }

    fn svg(&mut self) -> N {
        if let Some(svg) = &self.svg {
            return svg.clone();
        }

        let host = self.bound.root();
        let svg = host.create_ns(SVG_NS, "svg");

        svg.set_attr("data-bind", "class:classes");
        svg.append(&host.create_ns(SVG_NS, "use"));
        host.append(&svg);

        self.svg = Some(svg.clone());
        svg
    }

    fn href(&self, sprite: &str) -> String {
        format!("{}#{sprite}", self.sprites_url)
    }

    fn uses(&self) -> Vec<N> {
        match &self.svg {
            Some(svg) => svg.query_all(&Selector::Tag("use")),
            None => Vec::new(),
        }
    }

    pub fn attribute_changed(&mut self, name: &str, old: Option<&str>, new: Option<&str>) -> Result<(), BindError> {
        let svg = self.svg();

        match (name, old, new) {
            ("classes", _, new) => self.bound.set_state(json!({ "classes": new }))?,
            ("sprite", _, new) => {
                if let Some(first) = self.uses().first() {
                    first.set_attr_ns(XLINK_NS, "xlink:href", &self.href(new.unwrap_or_default()));
                }
            }
            ("hover-sprite", Some(_), Some(new)) => {
                if let Some(hover) = self.uses().get(1) {
                    hover.set_attr_ns(XLINK_NS, "xlink:href", &self.href(new));
                }
            }
            ("hover-sprite", Some(_), None) => {
                self.bound.root().remove_attr(HOVER_PARENT);

                if let Some(hover) = self.uses().get(1) {
                    hover.detach();
                }
            }
            ("hover-sprite", None, Some(new)) => {
                let hover = svg.create_ns(SVG_NS, "use");

                hover.set_attr_ns(XLINK_NS, "xlink:href", &self.href(new));
                svg.append(&hover);

                let host = self.bound.root();
                if host.closest(&Selector::Attr(HOVER_PARENT)).is_none() {
                    host.set_attr(HOVER_PARENT, "true");
                }
            }
            _ => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use binder::MemNode;

    const SPRITES: &str = "http://localhost:8000/assets/images/icons.svg";

    fn icon(attrs: &[(&str, &str)]) -> (MemNode, Icon<MemNode>) {
        let host = MemNode::new("u-icon");
        let mut icon = Icon::new(host.clone(), SPRITES);

        for (name, value) in attrs {
            host.set_attr(name, value);
            icon.attribute_changed(name, None, Some(*value)).unwrap();
        }

        (host, icon)
    }

    #[test]
    fn builds_svg() {
        let (host, _) = icon(&[("sprite", "foo"), ("classes", "icon")]);

        assert_eq!(
            host.html(),
            r#"<svg data-bind="class:classes" class="icon"><use xlink:href="http://localhost:8000/assets/images/icons.svg#foo"></use></svg>"#
        );
    }

    #[test]
    fn hover_sprite_adds_second_use() {
        let (host, _) = icon(&[("sprite", "foo"), ("hover-sprite", "bar"), ("classes", "icon")]);

        assert_eq!(
            host.html(),
            r#"<svg data-bind="class:classes" class="icon"><use xlink:href="http://localhost:8000/assets/images/icons.svg#foo"></use><use xlink:href="http://localhost:8000/assets/images/icons.svg#bar"></use></svg>"#
        );
        assert_eq!(host.attr(HOVER_PARENT).as_deref(), Some("true"));
    }

    #[test]
    fn hover_parent_is_marked_once() {
        let parent = MemNode::new("a");
        parent.set_attr(HOVER_PARENT, "true");

        let host = MemNode::new("u-icon");
        parent.append(&host);

        let mut icon = Icon::new(host.clone(), SPRITES);
        icon.attribute_changed("hover-sprite", None, Some("bar")).unwrap();

        assert_eq!(host.attr(HOVER_PARENT), None);
    }

    #[test]
    fn hover_sprite_changes_and_removal() {
        let (host, mut icon) = icon(&[("sprite", "foo"), ("hover-sprite", "bar")]);

        icon.attribute_changed("hover-sprite", Some("bar"), Some("baz")).unwrap();
        assert_eq!(
            icon.uses()[1].attr("xlink:href").as_deref(),
            Some("http://localhost:8000/assets/images/icons.svg#baz")
        );

        icon.attribute_changed("hover-sprite", Some("baz"), None).unwrap();
        assert_eq!(icon.uses().len(), 1);
        assert_eq!(host.attr(HOVER_PARENT), None);
    }

    #[test]
    fn clearing_classes_removes_the_attribute() {
        let (_, mut icon) = icon(&[("classes", "icon icon--sm")]);

        let svg = icon.svg();
        assert_eq!(svg.attr("class").as_deref(), Some("icon icon--sm"));

        icon.attribute_changed("classes", Some("icon icon--sm"), None).unwrap();
        assert_eq!(svg.attr("class"), None);
    }

    #[test]
    fn construction_leaves_the_host_empty() {
        let host = MemNode::new("u-icon");
        let mut icon = Icon::new(host.clone(), SPRITES);

        assert!(host.children().is_empty());

        icon.connected();
        icon.connected();

        assert_eq!(
            host.html(),
            r#"<svg data-bind="class:classes"><use></use></svg>"#
        );
    }

    #[test]
    fn attributes_set_after_creation_build_the_svg() {
        let parent = MemNode::new("a");
        let host = parent.create("u-icon");
        let mut icon = Icon::new(host.clone(), SPRITES);

        parent.append(&host);
        host.set_attr("sprite", "close");
        icon.attribute_changed("sprite", None, Some("close")).unwrap();

        assert_eq!(host.children().len(), 1);
        assert_eq!(
            icon.uses()[0].attr("xlink:href").as_deref(),
            Some("http://localhost:8000/assets/images/icons.svg#close")
        );
    }
}
