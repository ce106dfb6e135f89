//! Bracket-notation encoding of request parameters.
//!
//! The API accepts parameters as flat key/value pairs, both in query strings
//! and in `application/x-www-form-urlencoded` bodies. Nested values are
//! addressed with brackets:
//!
//! ```text
//! phases[0][plans][0][plan]=plan_gold
//! metadata[order_id]=6735
//! expand[0]=customer
//! created[gte]=1572953600
//! ```
//!
//! Absent and `null` values are omitted, so an `Option::None` parameter never
//! reaches the wire. An empty string is kept as `key=`, which is how the API
//! spells "clear this field" (see [`Emptyable`](crate::Emptyable)). An empty
//! array is sent the same way, so setting a list to `[]` clears it; list
//! parameters that should stay off the wire when empty skip serialization.

use serde::Serialize;
use serde_json::Value;

/// Errors raised while encoding parameters.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// The parameters could not be converted to JSON.
    #[error("failed to serialize parameters: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The parameters did not serialize to a key/value object.
    #[error("parameters must serialize to an object, got {0}")]
    NotAnObject(&'static str),
}

/// Encodes a parameter value into ordered key/value pairs.
///
/// # Errors
///
/// Returns [`FormError`] if `params` cannot be serialized or is not a
/// struct/map at the top level.
pub fn encode<T: Serialize + ?Sized>(params: &T) -> Result<Vec<(String, String)>, FormError> {
    let map = match serde_json::to_value(params)? {
        Value::Object(map) => map,
        other => return Err(FormError::NotAnObject(kind_name(&other))),
    };
    let mut pairs = Vec::new();
    for (key, value) in map {
        flatten(key, value, &mut pairs);
    }
    Ok(pairs)
}

/// Appends `expand[n]` entries after any the parameters already carry.
pub fn append_expand(pairs: &mut Vec<(String, String)>, expand: &[String]) {
    let existing = pairs.iter().filter(|(k, _)| k.starts_with("expand[")).count();
    for (i, field) in expand.iter().enumerate() {
        pairs.push((format!("expand[{}]", existing + i), field.clone()));
    }
}

fn flatten(prefix: String, value: Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(b) => out.push((prefix, b.to_string())),
        Value::Number(n) => out.push((prefix, n.to_string())),
        Value::String(s) => out.push((prefix, s)),
        Value::Array(items) if items.is_empty() => out.push((prefix, String::new())),
        Value::Array(items) => {
            for (i, item) in items.into_iter().enumerate() {
                flatten(format!("{prefix}[{i}]"), item, out);
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                flatten(format!("{prefix}[{key}]"), item, out);
            }
        }
    }
}

const fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_owned(), v.to_owned())
    }

    #[test]
    fn test_nested_objects_and_arrays() {
        let pairs = encode(&json!({
            "phases": [
                { "plans": [{ "plan": "plan_gold", "quantity": 2 }], "iterations": 3 }
            ],
            "metadata": { "order_id": "6735" }
        }))
        .unwrap();
        assert!(pairs.contains(&pair("phases[0][plans][0][plan]", "plan_gold")));
        assert!(pairs.contains(&pair("phases[0][plans][0][quantity]", "2")));
        assert!(pairs.contains(&pair("phases[0][iterations]", "3")));
        assert!(pairs.contains(&pair("metadata[order_id]", "6735")));
        assert_eq!(pairs.len(), 4);
    }

    #[test]
    fn test_null_is_omitted_and_empty_string_kept() {
        let mut pairs = encode(&json!({
            "customer": null,
            "default_tax_rates": "",
            "confirm": true
        }))
        .unwrap();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![pair("confirm", "true"), pair("default_tax_rates", "")]
        );
    }

    #[test]
    fn test_empty_array_clears() {
        let pairs = encode(&json!({
            "payment_method_types": [],
            "phases": [{ "default_tax_rates": [] }]
        }))
        .unwrap();
        assert_eq!(
            pairs,
            vec![
                pair("payment_method_types", ""),
                pair("phases[0][default_tax_rates]", "")
            ]
        );
    }

    #[test]
    fn test_top_level_must_be_object() {
        let err = encode(&json!(["a"])).unwrap_err();
        assert!(matches!(err, FormError::NotAnObject("an array")));
    }

    #[test]
    fn test_append_expand_continues_numbering() {
        let mut pairs = encode(&json!({ "expand": ["customer"] })).unwrap();
        append_expand(&mut pairs, &["payment_method".to_owned()]);
        assert_eq!(
            pairs,
            vec![
                pair("expand[0]", "customer"),
                pair("expand[1]", "payment_method")
            ]
        );
    }
}
