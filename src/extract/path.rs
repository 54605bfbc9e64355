//! Optional-path access into semi-structured JSON.
//!
//! Every lookup goes through a JSON pointer (`/Warnings/0/Title`). A missing
//! key, an out-of-range index, or a type mismatch anywhere along the path
//! yields the default instead of an error.

use serde_json::Value;

/// Value at `pointer`, or `None` on any traversal failure.
pub fn lookup<'v>(value: &'v Value, pointer: &str) -> Option<&'v Value> {
    value.pointer(pointer)
}

/// Rendered text at `pointer`, or an empty string.
pub fn text_at(value: &Value, pointer: &str) -> String {
    lookup(value, pointer).map(render).unwrap_or_default()
}

/// Renders a scalar the way it appears in the CSV.
///
/// Strings as-is, numbers in JSON text form, booleans as `True`/`False`, null
/// as empty. Arrays and objects fall back to compact JSON.
pub fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Whether a value counts as present: non-null, non-zero, non-empty.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_at_nested_path() {
        let flight = json!({
            "Warnings": [{"SDLMessages": [{"Params": {"DepartAirportCode": "ORD"}}]}]
        });
        assert_eq!(
            text_at(&flight, "/Warnings/0/SDLMessages/0/Params/DepartAirportCode"),
            "ORD"
        );
    }

    #[test]
    fn test_text_at_defaults_on_missing_key() {
        let flight = json!({"Origin": "Chicago"});
        assert_eq!(text_at(&flight, "/EquipmentDisclosures/EquipmentType"), "");
    }

    #[test]
    fn test_text_at_defaults_on_index_out_of_range() {
        let flight = json!({"Warnings": [{"SDLMessages": [{}]}]});
        assert_eq!(
            text_at(&flight, "/Warnings/0/SDLMessages/1/Params/ArriveAirportCode"),
            ""
        );
    }

    #[test]
    fn test_text_at_defaults_on_type_mismatch() {
        let flight = json!({"Warnings": "none"});
        assert_eq!(text_at(&flight, "/Warnings/0/Title"), "");
    }

    #[test]
    fn test_render_scalars() {
        assert_eq!(render(&json!(80000.0)), "80000.0");
        assert_eq!(render(&json!(645)), "645");
        assert_eq!(render(&json!("USD")), "USD");
        assert_eq!(render(&json!(true)), "True");
        assert_eq!(render(&Value::Null), "");
    }

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&Value::Null)));
        assert!(!is_truthy(Some(&json!([]))));
        assert!(!is_truthy(Some(&json!(""))));
        assert!(!is_truthy(Some(&json!(0))));
        assert!(is_truthy(Some(&json!([{"Airport": "FRA"}]))));
        assert!(is_truthy(Some(&json!({"a": 1}))));
    }
}
