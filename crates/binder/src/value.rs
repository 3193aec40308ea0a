// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! How state values read when they land in the DOM

use serde_json::{Number, Value};

/// Reading a [`Value`] the way markup sees it.
pub trait ValueExt {
    /// `null`, `false`, `0` and `""` are falsy, everything else is truthy.
    fn is_truthy(&self) -> bool;

    /// String form used for attributes: `null` reads `"null"`, numbers drop a
    /// trailing `.0`, arrays are comma-joined and objects collapse to
    /// `"[object Object]"`.
    fn to_display(&self) -> String;

    /// String form used for text, inner markup and input values. Same as
    /// [`to_display`](ValueExt::to_display) except `null` is empty.
    fn to_text(&self) -> String;
}

impl ValueExt for Value {
    fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    fn to_display(&self) -> String {
        let mut out = String::new();
        write_display(self, &mut out);
        out
    }

    fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            other => other.to_display(),
        }
    }
}

fn write_display(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => write_number(n, out),
        Value::String(s) => out.push_str(s),
        Value::Array(items) => {
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                if !item.is_null() {
                    write_display(item, out);
                }
            }
        }
        Value::Object(_) => out.push_str("[object Object]"),
    }
}

fn write_number(n: &Number, out: &mut String) {
    let mut buf = itoa::Buffer::new();

    if let Some(int) = n.as_i64() {
        out.push_str(buf.format(int));
    } else if let Some(int) = n.as_u64() {
        out.push_str(buf.format(int));
    } else if let Some(float) = n.as_f64() {
        if float.fract() == 0.0 && float.abs() < 1e15 {
            out.push_str(buf.format(float as i64));
        } else {
            out.push_str(&float.to_string());
        }
    }
}
