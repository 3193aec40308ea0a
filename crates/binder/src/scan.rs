// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::dom::{DomNode, Selector};

/// The declarative attributes markup can use to bind to a state key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindKind {
    /// `data-bind`: attribute, input value or text content
    Bind,
    /// `data-html`: inner markup, unsanitized
    Html,
    /// `data-if`: `display: none` when falsy
    If,
    /// `data-not`: `display: none` when truthy
    Not,
    /// `data-show`: `visibility: hidden` when falsy
    Show,
    /// `data-hide`: `visibility: hidden` when truthy
    Hide,
    /// `data-class`: kebab-cased key as a class, on when truthy
    Class,
}

impl BindKind {
    /// Every kind, in the order a key is dispatched to them.
    pub const ALL: [BindKind; 7] = [
        BindKind::Bind,
        BindKind::Html,
        BindKind::If,
        BindKind::Not,
        BindKind::Show,
        BindKind::Hide,
        BindKind::Class,
    ];

    pub const fn attribute(self) -> &'static str {
        match self {
            BindKind::Bind => "data-bind",
            BindKind::Html => "data-html",
            BindKind::If => "data-if",
            BindKind::Not => "data-not",
            BindKind::Show => "data-show",
            BindKind::Hide => "data-hide",
            BindKind::Class => "data-class",
        }
    }

    /// `data-class` holds a list of keys and matches by token, every other kind
    /// matches when its expression ends with the key.
    pub fn selector(self, key: &str) -> Selector<'_> {
        match self {
            BindKind::Class => Selector::AttrToken(self.attribute(), key),
            _ => Selector::AttrEndsWith(self.attribute(), key),
        }
    }
}

/// Elements under `root` bound to `key` through `kind`, in document order.
///
/// Always a fresh query: whatever is in the subtree right now is what matches.
pub fn scan<N: DomNode>(root: &N, kind: BindKind, key: &str) -> Vec<N> {
    root.query_all(&kind.selector(key))
}
