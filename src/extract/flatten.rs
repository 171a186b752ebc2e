use super::numeric_value;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Collect every numeric direct child of `object` as `prefix + key -> value`.
///
/// Deliberately not recursive: callers select the exact subtree to flatten,
/// and nested objects, arrays, and non-numeric scalars are skipped.
#[must_use]
pub fn flatten_object(object: &Map<String, Value>, prefix: &str) -> BTreeMap<String, f64> {
    object
        .iter()
        .filter_map(|(key, value)| numeric_value(value).map(|number| (format!("{prefix}{key}"), number)))
        .collect()
}
