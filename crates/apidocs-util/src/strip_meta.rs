use serde_json::{Map, Value};

use crate::is_empty::is_vacuous;

/// Recursively drop bookkeeping and vacuous content from a JSON value.
///
/// - object fields whose name starts with `meta_prefix` are dropped
/// - `null` and `""` are dropped
/// - arrays and objects that are empty after cleaning are dropped
///
/// Returns `None` when `value` itself cleans down to nothing.
///
/// # Examples
///
/// ```
/// use apidocs_util::strip_meta;
/// use serde_json::json;
///
/// let raw = json!({
///     "type": "object",
///     "__collapsed": true,
///     "properties": {},
///     "required": [],
///     "description": ""
/// });
/// assert_eq!(strip_meta(&raw, "__"), Some(json!({"type": "object"})));
/// assert_eq!(strip_meta(&json!({"a": [null, ""]}), "__"), None);
/// ```
pub fn strip_meta(value: &Value, meta_prefix: &str) -> Option<Value> {
    match value {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, child) in map {
                if !meta_prefix.is_empty() && key.starts_with(meta_prefix) {
                    continue;
                }
                if let Some(cleaned) = strip_meta(child, meta_prefix) {
                    out.insert(key.clone(), cleaned);
                }
            }
            (!out.is_empty()).then_some(Value::Object(out))
        }
        Value::Array(arr) => {
            let out: Vec<Value> = arr
                .iter()
                .filter_map(|child| strip_meta(child, meta_prefix))
                .collect();
            (!out.is_empty()).then_some(Value::Array(out))
        }
        other if is_vacuous(other) => None,
        other => Some(other.clone()),
    }
}

/// Like [`strip_meta`] but keeps an empty object in place of nothing.
pub fn strip_meta_or_empty(value: &Value, meta_prefix: &str) -> Value {
    strip_meta(value, meta_prefix).unwrap_or_else(|| Value::Object(Map::new()))
}
