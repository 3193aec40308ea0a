// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stylesheets the drawer waits for before showing any markup

use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use gloo_events::EventListener;
use wasm_bindgen::UnwrapThrowExt;
use web_sys::{Document, Node};

pub const FONTS: &str =
    "//fonts.googleapis.com/css2?family=Lato:ital,wght@0,400;0,700;0,900;1,400;1,700&display=swap";

pub const MATERIAL_ICONS: &str = "//fonts.googleapis.com/icon?family=Material+Icons";

/// Where a stylesheet link goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Page-wide, in the document `<head>`
    Head,
    /// Scoped to the component's shadow root
    Shadow,
}

/// Load a stylesheet and resolve once it's in.
pub trait StylesheetLoader {
    fn load(&self, href: &str, placement: Placement) -> LocalBoxFuture<'static, ()>;
}

/// Loads stylesheets with `<link rel="stylesheet">` elements, resolving on
/// their `load` event.
pub struct LinkLoader {
    document: Document,
    shadow: Node,
}

impl LinkLoader {
    pub fn new(document: Document, shadow: Node) -> Self {
        LinkLoader { document, shadow }
    }
}

impl StylesheetLoader for LinkLoader {
    fn load(&self, href: &str, placement: Placement) -> LocalBoxFuture<'static, ()> {
        let link = self.document.create_element("link").unwrap_throw();

        link.set_attribute("rel", "stylesheet").unwrap_throw();
        link.set_attribute("href", href).unwrap_throw();

        let (tx, rx) = oneshot::channel();
        let listener = EventListener::once(&link, "load", move |_| {
            let _ = tx.send(());
        });

        let parent: Node = match placement {
            Placement::Head => self.document.head().expect_throw("document without a head").into(),
            Placement::Shadow => self.shadow.clone(),
        };
        parent.append_child(&link).unwrap_throw();

        async move {
            // Keep the listener attached until the sheet is in
            let _listener = listener;
            let _ = rx.await;
        }
        .boxed_local()
    }
}
