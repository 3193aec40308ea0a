// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde_json::{Map, Value};

/// The per-component state bag.
///
/// Writes go through [`merge`](StateStore::merge): two objects meeting at the
/// same key are merged one level deep, anything else replaces what was there.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateStore {
    state: Map<String, Value>,
}

impl StateStore {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.state.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.state
    }

    pub fn merge(&mut self, key: &str, value: &Value) {
        match (self.state.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(update)) => {
                for (field, value) in update {
                    existing.insert(field.clone(), value.clone());
                }
            }
            _ => {
                self.state.insert(key.into(), value.clone());
            }
        }
    }

    /// Shallow overwrite of every key in `partial`.
    pub fn assign(&mut self, partial: &Map<String, Value>) {
        for (key, value) in partial {
            self.state.insert(key.clone(), value.clone());
        }
    }
}

/// Dotted key paths an update of `key` to `value` has to notify.
///
/// Scalars notify `key` itself. Objects notify one path per leaf field,
/// nested objects extending the path with their own field names. An empty
/// object notifies nothing.
pub fn bind_keys(key: &str, value: &Value) -> Vec<String> {
    let mut keys = Vec::new();

    match value {
        Value::Object(_) => collect_leaves(key, value, &mut keys),
        _ => keys.push(key.into()),
    }

    keys
}

fn collect_leaves(prefix: &str, value: &Value, keys: &mut Vec<String>) {
    if let Value::Object(map) = value {
        for (field, value) in map {
            let path = format!("{prefix}.{field}");

            match value {
                Value::Object(_) => collect_leaves(&path, value, keys),
                _ => keys.push(path),
            }
        }
    }
}
