use serde_json::Value;

/// Check if a value carries no information for an exported document.
///
/// `null`, `""`, `[]` and `{}` are vacuous. `false` and `0` are not: they
/// are meaningful answers.
///
/// # Examples
///
/// ```
/// use apidocs_util::is_empty::is_vacuous;
/// use serde_json::json;
///
/// assert!(is_vacuous(&json!(null)));
/// assert!(is_vacuous(&json!("")));
/// assert!(is_vacuous(&json!([])));
/// assert!(is_vacuous(&json!({})));
/// assert!(!is_vacuous(&json!(false)));
/// assert!(!is_vacuous(&json!(0)));
/// ```
pub fn is_vacuous(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(arr) => arr.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
