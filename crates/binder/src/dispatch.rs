// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use log::trace;
use serde_json::Value;

use crate::apply::apply;
use crate::dom::DomNode;
use crate::scan::scan;
use crate::{BindError, BindKind};

/// Update every element under `root` bound to `key`.
///
/// Kinds are visited in [`BindKind::ALL`] order and elements in document
/// order. Nothing is batched, each element is mutated as soon as it is found.
pub fn notify<N: DomNode>(root: &N, key: &str, value: &Value) -> Result<(), BindError> {
    for kind in BindKind::ALL {
        let nodes = scan(root, kind, key);

        if !nodes.is_empty() {
            trace!("notify {key}: {} x {}", nodes.len(), kind.attribute());
        }

        for node in nodes {
            apply(&node, kind, key, value)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::MemNode;
    use serde_json::json;

    #[test]
    fn one_key_many_kinds() {
        let root = MemNode::new("div");
        let text = root.create("span");
        let cond = root.create("section");
        let class = root.create("li");

        text.set_attr("data-bind", "totalResults");
        cond.set_attr("data-if", "totalResults");
        class.set_attr("data-class", "totalResults");

        for el in [&text, &cond, &class] {
            root.append(el);
        }

        notify(&root, "totalResults", &json!(3)).unwrap();

        assert_eq!(text.text(), "3");
        assert_eq!(cond.style_prop("display"), "");
        assert!(class.has_class("total-results"));

        notify(&root, "totalResults", &json!(0)).unwrap();

        assert_eq!(text.text(), "0");
        assert_eq!(cond.style_prop("display"), "none");
        assert!(!class.has_class("total-results"));
    }

    #[test]
    fn unrelated_keys_leave_elements_alone() {
        let root = MemNode::new("div");
        let el = root.create("span");
        el.set_attr("data-bind", "title");
        root.append(&el);

        notify(&root, "subtitle", &json!("x")).unwrap();

        assert_eq!(el.text(), "");
    }
}
