// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Binder
//!
//! _Plain attributes, live DOM._
//!
//! **Binder** projects a small key-value state bag onto whatever elements currently
//! live in a DOM subtree. Markup declares what it wants with `data-*` attributes:
//!
//! ```html
//! <a data-bind="href:article.href">Open</a>
//! <input data-bind="searchText">
//! <section data-if="showSearch">...</section>
//! <span data-show="isSearching"></span>
//! <li data-class="isActive"></li>
//! ```
//!
//! Every call to [`Bound::set_state`] merges the update into the state and then,
//! for each key path the update touches, scans the subtree for matching elements
//! and mutates them on the spot. There is no virtual DOM and no subscription
//! graph: the scan is repeated on every update, so markup inserted later binds
//! the next time its key changes.
//!
//! ```
//! use binder::{Bound, DomNode, MemNode};
//! use serde_json::json;
//!
//! let root = MemNode::new("div");
//! let link = root.create("a");
//! link.set_attr("data-bind", "href:article.href");
//! root.append(&link);
//!
//! let mut bound = Bound::new(root);
//!
//! bound.set_state(json!({ "article": { "href": "/intro" } })).unwrap();
//!
//! assert_eq!(link.attr("href").as_deref(), Some("/intro"));
//! ```

use log::{debug, warn};
use serde_json::{Map, Value};

mod apply;
mod dispatch;
mod dom;
mod error;
mod expr;
mod mem;
mod scan;
mod state;
mod util;
mod value;
mod web;

pub use dom::{DomNode, Selector};
pub use error::BindError;
pub use mem::MemNode;

use expr::BindExpr;
use scan::BindKind;
use state::{bind_keys, StateStore};
use util::camel_to_kebab;
use value::ValueExt;

/// A DOM subtree paired with the state bag projected onto it.
///
/// This is the only way state gets into the DOM: [`set_state`](Bound::set_state)
/// merges and dispatches, everything else is a read.
pub struct Bound<N> {
    root: N,
    store: StateStore,
}

impl<N: DomNode> Bound<N> {
    /// Create a binding over `root` with empty state. The root may still be empty,
    /// updates issued before markup exists are kept in the state.
    pub fn new(root: N) -> Self {
        Bound {
            root,
            store: StateStore::default(),
        }
    }

    pub fn root(&self) -> &N {
        &self.root
    }

    pub fn state(&self) -> &Map<String, Value> {
        self.store.as_map()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.store.get(key)
    }

    /// Merge `partial` into the state and update every element bound to a key
    /// path it touches.
    ///
    /// Keys are handled one at a time in mapping order, each one dispatched
    /// before the next is merged. The first binding whose declared path can't be
    /// resolved on the supplied value aborts the rest of the update.
    pub fn set_state(&mut self, partial: Value) -> Result<(), BindError> {
        let partial = match partial {
            Value::Object(partial) => partial,
            other => {
                warn!("ignoring non-object state update: {other}");
                return Ok(());
            }
        };

        for (key, value) in partial {
            self.store.merge(&key, &value);

            let keys = bind_keys(&key, &value);

            debug!("set_state {key} -> {keys:?}");

            for path in keys {
                dispatch::notify(&self.root, &path, &value)?;
            }
        }

        Ok(())
    }

    /// Overwrite top-level keys without merging nested objects and without
    /// touching the DOM.
    pub fn assign(&mut self, partial: &Value) {
        if let Value::Object(partial) = partial {
            self.store.assign(partial);
        }
    }

    pub fn select(&self, selector: &Selector) -> Option<N> {
        self.root.query(selector)
    }

    pub fn select_all(&self, selector: &Selector) -> Vec<N> {
        self.root.query_all(selector)
    }
}
