// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde_json::Value;

use crate::BindError;

/// A parsed `[prop:]key[.sub1.sub2...]` binding expression.
///
/// Nothing here is validated. A stray colon or an empty segment parses into
/// whatever the split produces and fails later, at lookup time, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindExpr<'a> {
    raw: &'a str,
    prop: Option<&'a str>,
    path: &'a str,
}

impl<'a> BindExpr<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let (prop, path) = match raw.split_once(':') {
            Some((prop, path)) => (Some(prop), path),
            None => (None, raw),
        };

        BindExpr { raw, prop, path }
    }

    /// Attribute named in front of the colon, if any.
    pub fn prop(&self) -> Option<&'a str> {
        self.prop
    }

    /// Segments after the first one, the lookup path into the update's value.
    pub fn lookup(&self) -> impl Iterator<Item = &'a str> {
        self.path.split('.').skip(1)
    }

    /// Walk `value` down the [`lookup`](BindExpr::lookup) path.
    pub fn resolve<'v>(&self, value: &'v Value) -> Result<&'v Value, BindError> {
        self.lookup().try_fold(value, |current, segment| match current {
            Value::Object(map) => map.get(segment).ok_or_else(|| BindError::MissingPath {
                expr: self.raw.into(),
                segment: segment.into(),
            }),
            _ => Err(BindError::NotAnObject {
                expr: self.raw.into(),
                segment: segment.into(),
            }),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_key() {
        let expr = BindExpr::parse("searchText");

        assert_eq!(expr.prop(), None);
        assert_eq!(expr.path, "searchText");
        assert_eq!(expr.lookup().count(), 0);

        let value = json!("query");
        assert_eq!(expr.resolve(&value), Ok(&value));
    }

    #[test]
    fn prefixed_nested_key() {
        let expr = BindExpr::parse("href:article.href");

        assert_eq!(expr.prop(), Some("href"));
        assert_eq!(expr.path, "article.href");
        assert_eq!(expr.lookup().collect::<Vec<_>>(), ["href"]);

        let value = json!({ "href": "x", "title": "t" });
        assert_eq!(expr.resolve(&value), Ok(&json!("x")));
    }

    #[test]
    fn deep_lookup() {
        let expr = BindExpr::parse("user.address.city");
        let value = json!({ "address": { "city": "Paris" } });

        assert_eq!(expr.resolve(&value), Ok(&json!("Paris")));
    }

    #[test]
    fn missing_field_is_an_error() {
        let expr = BindExpr::parse("href:article.href");

        assert_eq!(
            expr.resolve(&json!({ "other": "y" })),
            Err(BindError::MissingPath {
                expr: "href:article.href".into(),
                segment: "href".into(),
            })
        );
        assert_eq!(
            expr.resolve(&json!(null)),
            Err(BindError::NotAnObject {
                expr: "href:article.href".into(),
                segment: "href".into(),
            })
        );
    }

    #[test]
    fn malformed_expressions_are_permissive() {
        let expr = BindExpr::parse("a:b:c");
        assert_eq!(expr.prop(), Some("a"));
        assert_eq!(expr.path, "b:c");

        let expr = BindExpr::parse(":key");
        assert_eq!(expr.prop(), Some(""));
        assert_eq!(expr.path, "key");

        let expr = BindExpr::parse("article..href");
        assert!(expr.resolve(&json!({ "href": 1 })).is_err());
    }
}
