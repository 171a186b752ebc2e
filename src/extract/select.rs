use super::{METRIC_SEPARATOR, flatten_object};
use crate::Result;
use crate::error::MonitorError;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Scan `array` for the first object whose `field` scalar equals `target`
/// and flatten that object's numeric fields.
///
/// No matching element is not an error: the metric group is simply absent
/// for this poll and an empty mapping is returned.
///
/// # Errors
///
/// Returns [`MonitorError::Extract`] if any scanned element is not a JSON
/// object.
pub fn select_by_field(array: &[Value], field: &str, target: &str) -> Result<BTreeMap<String, f64>> {
    for element in array {
        let object = require_object(element, field)?;

        if object.get(field).and_then(scalar_string).is_some_and(|value| value == target) {
            return Ok(flatten_object(object, ""));
        }
    }

    Ok(BTreeMap::new())
}

/// Flatten every object in `array`, naming each element's metrics after the
/// value of its `field` scalar.
///
/// Elements without a scalar `field` are skipped. Elements sharing a field
/// value merge; for colliding metric names the later element wins.
///
/// # Errors
///
/// Returns [`MonitorError::Extract`] if any element is not a JSON object.
pub fn select_all_by_field(array: &[Value], field: &str) -> Result<BTreeMap<String, f64>> {
    let mut metrics = BTreeMap::new();

    for element in array {
        let object = require_object(element, field)?;

        let Some(name) = object.get(field).and_then(scalar_string) else {
            continue;
        };

        metrics.extend(flatten_object(object, &format!("{name}{METRIC_SEPARATOR}")));
    }

    Ok(metrics)
}

fn require_object<'a>(element: &'a Value, field: &str) -> Result<&'a Map<String, Value>> {
    element
        .as_object()
        .ok_or_else(|| MonitorError::Extract(format!("array element addressed by '{field}' is not an object")))
}

/// The textual form of a scalar, for comparing and naming by field value.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
