//! # Value Helpers
//!
//! Small functions over `serde_json::Value` shared by the kind model and the
//! checkers: rendering for error messages, the length used by the emptiness
//! check, and a short type name for conversion failures.

use serde_json::Value;

/// Render a value for inclusion in an error message.
///
/// Strings are rendered without quotes; everything else as compact JSON.
pub fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Length of a value for the purpose of emptiness checks.
///
/// Strings count characters, arrays and objects count entries, and null is
/// always empty. Numbers and booleans have no length.
pub fn value_len(value: &Value) -> Option<usize> {
    match value {
        Value::Null => Some(0),
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => Some(map.len()),
        Value::Bool(_) | Value::Number(_) => None,
    }
}

/// JSON type name of a value.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn render_strings_unquoted() {
        assert_eq!(render(&json!("abc")), "abc");
        assert_eq!(render(&json!(3)), "3");
        assert_eq!(render(&json!(["a", 1])), r#"["a",1]"#);
    }

    #[test]
    fn value_len_by_type() {
        assert_eq!(value_len(&json!("")), Some(0));
        assert_eq!(value_len(&json!("héllo")), Some(5));
        assert_eq!(value_len(&json!([1, 2])), Some(2));
        assert_eq!(value_len(&json!({})), Some(0));
        assert_eq!(value_len(&Value::Null), Some(0));
        assert_eq!(value_len(&json!(0)), None);
        assert_eq!(value_len(&json!(false)), None);
    }

    #[test]
    fn type_names() {
        assert_eq!(type_name(&json!(null)), "null");
        assert_eq!(type_name(&json!(1.5)), "number");
        assert_eq!(type_name(&json!({"a": 1})), "object");
    }
}
