// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Turn a camel-cased state key into a kebab-cased class name.
///
/// A `.` directly in front of an upper-case letter is swallowed by the dash,
/// anything else is kept as is.
///
/// ```ignore
/// assert_eq!(binder::camel_to_kebab("fooBarBaz"), "foo-bar-baz");
/// assert_eq!(binder::camel_to_kebab("isActive"), "is-active");
/// ```
pub fn camel_to_kebab(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);

    for (idx, ch) in input.char_indices() {
        if ch.is_ascii_uppercase() && idx > 0 {
            if out.ends_with('.') {
                out.pop();
            }
            out.push('-');
        }
        out.push(ch.to_ascii_lowercase());
    }

    out
}
