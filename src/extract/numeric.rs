use serde_json::Value;

/// Interpret a JSON scalar as a metric value.
///
/// AMPS reports most counters as plain numbers but some as numeric strings,
/// so both are accepted. Only finite values qualify; booleans, non-numeric
/// strings, nulls, objects, and arrays are not metric leaves and yield
/// `None`.
#[must_use]
pub fn numeric_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.parse::<f64>().ok()?,
        _ => return None,
    };

    number.is_finite().then_some(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_numbers() {
        assert_eq!(numeric_value(&json!(42)), Some(42.0));
        assert_eq!(numeric_value(&json!(-3)), Some(-3.0));
        assert_eq!(numeric_value(&json!(12.75)), Some(12.75));
        assert_eq!(numeric_value(&json!(0)), Some(0.0));
    }

    #[test]
    fn numeric_strings() {
        assert_eq!(numeric_value(&json!("42")), Some(42.0));
        assert_eq!(numeric_value(&json!("-3.2")), Some(-3.2));
        assert_eq!(numeric_value(&json!("+1.5")), Some(1.5));
        assert_eq!(numeric_value(&json!("2.5e3")), Some(2500.0));
    }

    #[test]
    fn non_numeric_strings_rejected() {
        assert_eq!(numeric_value(&json!("eth0")), None);
        assert_eq!(numeric_value(&json!("")), None);
        assert_eq!(numeric_value(&json!(" 42")), None);
        assert_eq!(numeric_value(&json!("0x1A")), None);
    }

    #[test]
    fn non_finite_rejected() {
        assert_eq!(numeric_value(&json!("NaN")), None);
        assert_eq!(numeric_value(&json!("inf")), None);
        assert_eq!(numeric_value(&json!("-infinity")), None);
    }

    #[test]
    fn booleans_rejected() {
        assert_eq!(numeric_value(&json!(true)), None);
        assert_eq!(numeric_value(&json!(false)), None);
    }

    #[test]
    fn non_scalars_rejected() {
        assert_eq!(numeric_value(&json!(null)), None);
        assert_eq!(numeric_value(&json!({"a": 1})), None);
        assert_eq!(numeric_value(&json!([1, 2])), None);
    }
}
