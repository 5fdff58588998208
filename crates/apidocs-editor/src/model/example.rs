//! Example values.
//!
//! Example trees are plain [`serde_json::Value`]s. Nothing ties their shape
//! to the sibling schema: each array slot is typed independently.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Number, Value};

use crate::error::EditError;

/// Variant of an example value slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExampleKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl ExampleKind {
    pub const ALL: [ExampleKind; 6] = [
        ExampleKind::Object,
        ExampleKind::Array,
        ExampleKind::String,
        ExampleKind::Number,
        ExampleKind::Boolean,
        ExampleKind::Null,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExampleKind::Object => "object",
            ExampleKind::Array => "array",
            ExampleKind::String => "string",
            ExampleKind::Number => "number",
            ExampleKind::Boolean => "boolean",
            ExampleKind::Null => "null",
        }
    }

    /// Infer the variant of an existing value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => ExampleKind::Object,
            Value::Array(_) => ExampleKind::Array,
            Value::String(_) => ExampleKind::String,
            Value::Number(_) => ExampleKind::Number,
            Value::Bool(_) => ExampleKind::Boolean,
            Value::Null => ExampleKind::Null,
        }
    }

    /// Fresh default value for this variant.
    pub fn default_value(self) -> Value {
        match self {
            ExampleKind::Object => Value::Object(Map::new()),
            ExampleKind::Array => Value::Array(Vec::new()),
            ExampleKind::String => Value::String(String::new()),
            ExampleKind::Number => Value::from(0),
            ExampleKind::Boolean => Value::Bool(true),
            ExampleKind::Null => Value::Null,
        }
    }
}

impl fmt::Display for ExampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExampleKind {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExampleKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| EditError::UnknownType(s.to_string()))
    }
}

/// Parse numeric text into a JSON number.
///
/// Integral values become integers, so `"42"` and `"42.0"` both give `42`.
/// Non-finite results (`inf`, `NaN`) are rejected.
pub fn parse_number(raw: &str) -> Option<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(Value::from(n));
    }
    let f: f64 = trimmed.parse().ok()?;
    if !f.is_finite() {
        return None;
    }
    if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        return Some(Value::from(f as i64));
    }
    Number::from_f64(f).map(Value::Number)
}

/// Coerce raw text typed into a primitive slot whose current variant is `kind`.
///
/// Booleans are `true` only for the exact text `"true"`. Object and array
/// slots receive the text as a string.
///
/// # Errors
///
/// [`EditError::InvalidNumber`] for non-numeric text in a number slot.
/// Callers that follow the editor's recovery rule store `0` in that case.
pub fn cast_primitive(raw: &str, kind: ExampleKind) -> Result<Value, EditError> {
    match kind {
        ExampleKind::Number => {
            parse_number(raw).ok_or_else(|| EditError::InvalidNumber(raw.to_string()))
        }
        ExampleKind::Boolean => Ok(Value::Bool(raw == "true")),
        ExampleKind::Null => Ok(Value::Null),
        ExampleKind::String | ExampleKind::Object | ExampleKind::Array => {
            Ok(Value::String(raw.to_string()))
        }
    }
}
