// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The element operations bindings and the components built on them need

use std::fmt::{self, Display, Write};

/// A handle to a DOM element.
///
/// Handles are cheap to clone and compare by identity. Implemented for
/// [`web_sys::Element`] and for the in-memory [`MemNode`](crate::MemNode).
pub trait DomNode: Clone + 'static {
    /// Descendants matching `selector`, in document order. The element itself
    /// is never part of the result.
    fn query_all(&self, selector: &Selector) -> Vec<Self>;

    fn query(&self, selector: &Selector) -> Option<Self> {
        self.query_all(selector).into_iter().next()
    }

    /// The element itself or its nearest ancestor matching `selector`.
    fn closest(&self, selector: &Selector) -> Option<Self>;

    /// Lower-cased tag name.
    fn tag(&self) -> String;

    /// Form controls carry a `value` property instead of text.
    fn is_input(&self) -> bool {
        matches!(self.tag().as_str(), "input" | "textarea" | "select")
    }

    fn attr(&self, name: &str) -> Option<String>;

    fn set_attr(&self, name: &str, value: &str);

    fn set_attr_ns(&self, namespace: &str, name: &str, value: &str);

    fn remove_attr(&self, name: &str);

    fn text(&self) -> String;

    /// Replace all children with a single text node.
    fn set_text(&self, text: &str);

    fn html(&self) -> String;

    fn set_html(&self, html: &str);

    fn input_value(&self) -> String;

    fn set_input_value(&self, value: &str);

    /// Inline style property, empty when unset. Html and svg elements both
    /// carry inline styles.
    fn style_prop(&self, name: &str) -> String;

    /// Setting an empty value removes the property.
    fn set_style_prop(&self, name: &str, value: &str);

    fn has_class(&self, class: &str) -> bool;

    fn toggle_class(&self, class: &str, on: bool);

    /// Create a detached element owned by the same document.
    fn create(&self, tag: &str) -> Self;

    fn create_ns(&self, namespace: &str, tag: &str) -> Self;

    /// Append `child`, moving it if it already has a parent.
    fn append(&self, child: &Self);

    /// Remove the element from its parent.
    fn detach(&self);

    fn focus(&self);

    fn set_scroll_top(&self, top: i32);

    fn scroll_into_view(&self);
}

/// The handful of selectors bindings and components query by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    /// `[attr]`
    Attr(&'a str),
    /// `[attr$="value"]`
    AttrEndsWith(&'a str, &'a str),
    /// `[attr~="value"]`
    AttrToken(&'a str, &'a str),
    /// `.class`
    Class(&'a str),
    /// `#id`
    Id(&'a str),
    /// `tag`
    Tag(&'a str),
}

impl Selector<'_> {
    /// Test an element given its tag name and attribute lookup.
    pub fn matches<'v, F>(&self, tag: &str, attr: F) -> bool
    where
        F: Fn(&str) -> Option<&'v str>,
    {
        match *self {
            Selector::Attr(name) => attr(name).is_some(),
            // An empty value never matches, same as CSS
            Selector::AttrEndsWith(name, value) => {
                !value.is_empty() && attr(name).map_or(false, |v| v.ends_with(value))
            }
            Selector::AttrToken(name, value) => {
                attr(name).map_or(false, |v| v.split_ascii_whitespace().any(|t| t == value))
            }
            Selector::Class(class) => {
                attr("class").map_or(false, |v| v.split_ascii_whitespace().any(|t| t == class))
            }
            Selector::Id(id) => attr("id") == Some(id),
            Selector::Tag(name) => tag.eq_ignore_ascii_case(name),
        }
    }
}

impl Display for Selector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Selector::Attr(name) => write!(f, "[{name}]"),
            Selector::AttrEndsWith(name, value) => {
                write!(f, "[{name}$=")?;
                quoted(f, value)?;
                f.write_char(']')
            }
            Selector::AttrToken(name, value) => {
                write!(f, "[{name}~=")?;
                quoted(f, value)?;
                f.write_char(']')
            }
            Selector::Class(class) => write!(f, ".{class}"),
            Selector::Id(id) => {
                f.write_str("[id=")?;
                quoted(f, id)?;
                f.write_char(']')
            }
            Selector::Tag(tag) => f.write_str(tag),
        }
    }
}

fn quoted(f: &mut fmt::Formatter, value: &str) -> fmt::Result {
    f.write_char('"')?;
    for ch in value.chars() {
        if matches!(ch, '"' | '\\') {
            f.write_char('\\')?;
        }
        f.write_char(ch)?;
    }
    f.write_char('"')
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn css_rendering() {
        assert_eq!(Selector::AttrEndsWith("data-bind", "article.href").to_string(), r#"[data-bind$="article.href"]"#);
        assert_eq!(Selector::AttrToken("data-class", "isOpen").to_string(), r#"[data-class~="isOpen"]"#);
        assert_eq!(Selector::Class("js-home").to_string(), ".js-home");
        assert_eq!(Selector::Id("intro").to_string(), r#"[id="intro"]"#);
        assert_eq!(Selector::AttrEndsWith("data-if", r#"a"b"#).to_string(), r#"[data-if$="a\"b"]"#);
    }

    #[test]
    fn matching() {
        let attrs = |name: &str| match name {
            "data-bind" => Some("href:article.href"),
            "class" => Some("link  see-all"),
            "id" => Some("top"),
            _ => None,
        };

        assert!(Selector::AttrEndsWith("data-bind", "article.href").matches("a", attrs));
        assert!(!Selector::AttrEndsWith("data-bind", "").matches("a", attrs));
        assert!(!Selector::AttrEndsWith("data-if", "href").matches("a", attrs));
        assert!(Selector::Class("see-all").matches("a", attrs));
        assert!(!Selector::Class("see").matches("a", attrs));
        assert!(Selector::Id("top").matches("a", attrs));
        assert!(Selector::Tag("A").matches("a", attrs));
        assert!(Selector::Attr("id").matches("a", attrs));
        assert!(!Selector::Attr("data-if").matches("a", attrs));
    }
}
