//! Metadata descriptor lookup and field coercion.
//!
//! Documents come in two shapes. An object carries its descriptor under
//! `_meta`; an array carries it as the first element whose `id` is `_meta`.
//! Anything else has no descriptor.

use serde_json::{Map, Value};

/// Key (object form) and id (array form) of the descriptor.
pub const META_KEY: &str = "_meta";

/// Descriptor of a document, or an empty map when there is none.
pub fn extract_meta(document: &Value) -> Map<String, Value> {
    let found = match document {
        Value::Object(object) => object.get(META_KEY).and_then(Value::as_object),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_object)
            .find(|item| item.get("id").and_then(Value::as_str) == Some(META_KEY)),
        _ => None,
    };
    found.cloned().unwrap_or_default()
}

/// String form of a metadata value; `None` when it should count as absent.
///
/// Strings are kept unless empty, numbers and booleans use their JSON
/// text, arrays of scalars are joined with `", "`. Null, objects and empty
/// arrays are absent.
pub fn coerce(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(coerce)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null | Value::Object(_) => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// First key of `keys` with a present value.
pub fn first_present(meta: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| meta.get(*key).and_then(coerce))
}
