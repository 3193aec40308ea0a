// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Help Drawer
//!
//! An embeddable help drawer for any web page, built on [`binder`]. The drawer
//! shows an article for the page it's opened from, searches the help corpus and
//! follows links between articles with a back button.
//!
//! On the page it's a `<heretto-help>` custom element. Configure it once, then
//! open it with a `toggle` event:
//!
//! ```js
//! import init, { configure } from './help_drawer.js';
//!
//! await init();
//!
//! configure({
//!     apiUrl: 'https://api.example.com',
//!     apiOrgId: 'org',
//!     apiDeployId: 'deploy',
//!     apiToken: 'token',
//!     portalUrl: 'https://help.example.com',
//! });
//!
//! // Elements are defined only once the drawer is configured
//! await import('./elements.js');
//!
//! document.querySelector('heretto-help')
//!     .dispatchEvent(new CustomEvent('toggle', { detail: { resourceId: 'billing' } }));
//! ```
//!
//! Everything but the [`element`] glue is generic over [`DomNode`](binder::DomNode)
//! and [`ContentProvider`], so the drawer runs natively against
//! [`MemNode`](binder::MemNode) trees in tests.

pub mod api;
pub mod config;
pub mod content;
pub mod drawer;
pub mod element;
pub mod events;
pub mod icon;
pub mod markup;
pub mod stylesheet;

pub use api::{Article, ContentError, ContentProvider, HerettoApi, SearchHit, SearchResults};
pub use config::{HelpConfig, OtherUrl};
pub use drawer::{HelpDrawer, ToggleDetail, OPEN_CLASS};
pub use icon::Icon;

fn init_panic_hook() {
    use std::cell::Cell;

    thread_local! {
        static INIT: Cell<bool> = Cell::new(false);
    }
    if !INIT.with(|init| init.get()) {
        // Only enable console hook on debug builds
        #[cfg(debug_assertions)]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        wasm_logger::init(wasm_logger::Config::default());

        INIT.with(|init| init.set(true));
    }
}
