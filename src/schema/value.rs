//! Runtime value helpers
//!
//! Runtime values are plain JSON values: strings, numbers, string arrays,
//! or null for "not entered". Emptiness and coercion semantics live here
//! so the validator and the derivation engine agree on them.

use serde_json::{Number, Value};
use std::collections::HashMap;

/// Mapping from field id to current runtime value.
pub type FormValueMap = HashMap<String, Value>;

/// Empty means: missing/null, a blank or all-whitespace string, or an
/// empty array. Booleans and numbers are never empty.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Numeric coercion: numbers pass through, strings parse as floats.
/// Everything else fails.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// String coercion. Arrays join on commas; null becomes empty.
pub fn coerce_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .map(coerce_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => String::new(),
    }
}

/// Wraps a computed number as a JSON value. Integral results surface as
/// integers so serialized value maps stay free of trailing `.0`.
/// Non-finite input degrades to the empty string.
pub fn number_value(n: f64) -> Value {
    if !n.is_finite() {
        return Value::String(String::new());
    }
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        Value::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or_else(|| Value::String(String::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_emptiness() {
        assert!(is_empty_value(&Value::Null));
        assert!(is_empty_value(&json!("")));
        assert!(is_empty_value(&json!("   ")));
        assert!(is_empty_value(&json!([])));
        assert!(!is_empty_value(&json!("x")));
        assert!(!is_empty_value(&json!(0)));
        assert!(!is_empty_value(&json!(false)));
        assert!(!is_empty_value(&json!(["a"])));
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(&json!(3)), Some(3.0));
        assert_eq!(coerce_number(&json!("4.5")), Some(4.5));
        assert_eq!(coerce_number(&json!(" -2 ")), Some(-2.0));
        assert_eq!(coerce_number(&json!("abc")), None);
        assert_eq!(coerce_number(&json!(true)), None);
        assert_eq!(coerce_number(&json!(["1"])), None);
    }

    #[test]
    fn test_coerce_string() {
        assert_eq!(coerce_string(&json!("hi")), "hi");
        assert_eq!(coerce_string(&json!(7)), "7");
        assert_eq!(coerce_string(&json!(4.5)), "4.5");
        assert_eq!(coerce_string(&Value::Null), "");
        assert_eq!(coerce_string(&json!(["a", "b"])), "a,b");
    }

    #[test]
    fn test_number_value_normalizes_integrals() {
        assert_eq!(number_value(13.0), json!(13));
        assert_eq!(number_value(4.5), json!(4.5));
        assert_eq!(number_value(f64::NAN), json!(""));
        assert_eq!(number_value(f64::INFINITY), json!(""));
    }
}
