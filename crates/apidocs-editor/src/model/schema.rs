//! JSON-Schema-like type nodes.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::EditError;
use crate::model::example::parse_number;

// ── Types ─────────────────────────────────────────────────────────────────

/// Declared type of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaType {
    Object,
    Array,
    String,
    Integer,
    Number,
    Boolean,
}

impl SchemaType {
    pub const ALL: [SchemaType; 6] = [
        SchemaType::Object,
        SchemaType::Array,
        SchemaType::String,
        SchemaType::Integer,
        SchemaType::Number,
        SchemaType::Boolean,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SchemaType::Object => "object",
            SchemaType::Array => "array",
            SchemaType::String => "string",
            SchemaType::Integer => "integer",
            SchemaType::Number => "number",
            SchemaType::Boolean => "boolean",
        }
    }

    /// The scalar counterpart, or `None` for object and array.
    pub fn scalar(self) -> Option<ScalarType> {
        match self {
            SchemaType::String => Some(ScalarType::String),
            SchemaType::Integer => Some(ScalarType::Integer),
            SchemaType::Number => Some(ScalarType::Number),
            SchemaType::Boolean => Some(ScalarType::Boolean),
            SchemaType::Object | SchemaType::Array => None,
        }
    }

    pub fn is_scalar(self) -> bool {
        self.scalar().is_some()
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaType {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchemaType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| EditError::UnknownType(s.to_string()))
    }
}

/// The four scalar schema types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    String,
    Integer,
    Number,
    Boolean,
}

impl From<ScalarType> for SchemaType {
    fn from(ty: ScalarType) -> Self {
        match ty {
            ScalarType::String => SchemaType::String,
            ScalarType::Integer => SchemaType::Integer,
            ScalarType::Number => SchemaType::Number,
            ScalarType::Boolean => SchemaType::Boolean,
        }
    }
}

impl ScalarType {
    /// Coerce raw text to a value of this type.
    ///
    /// Empty input means "unset" and yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// [`EditError::InvalidNumber`] when an integer or number type gets
    /// non-numeric text (or a fractional value for integers).
    pub fn coerce(self, raw: &str) -> Result<Option<Value>, EditError> {
        if raw.is_empty() {
            return Ok(None);
        }
        match self {
            ScalarType::String => Ok(Some(Value::String(raw.to_string()))),
            ScalarType::Boolean => Ok(Some(Value::Bool(raw.trim() == "true"))),
            ScalarType::Number => parse_number(raw)
                .map(Some)
                .ok_or_else(|| EditError::InvalidNumber(raw.to_string())),
            ScalarType::Integer => match parse_number(raw) {
                Some(n) if n.is_i64() || n.is_u64() => Ok(Some(n)),
                _ => Err(EditError::InvalidNumber(raw.to_string())),
            },
        }
    }
}

// ── Nodes ─────────────────────────────────────────────────────────────────

/// Fields of an object schema node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    pub properties: IndexMap<String, SchemaNode>,
    /// Always a subset of the `properties` keys, without duplicates.
    pub required: Vec<String>,
}

impl ObjectSchema {
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

/// Fields of an array schema node. One items schema is shared by all elements.
#[derive(Debug, Clone, PartialEq)]
pub struct ArraySchema {
    pub items: Box<SchemaNode>,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    pub unique_items: bool,
}

impl Default for ArraySchema {
    fn default() -> Self {
        Self {
            items: Box::new(SchemaNode::string()),
            min_items: None,
            max_items: None,
            unique_items: false,
        }
    }
}

/// Fields of a scalar schema node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScalarSchema {
    pub description: String,
    pub default: Option<Value>,
    pub format: String,
    pub pattern: String,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub enum_values: Vec<Value>,
}

impl ScalarSchema {
    /// Re-read `default` and `enum` as `ty` from their text form. Values that
    /// no longer parse are dropped.
    fn recoerce(&mut self, ty: ScalarType) {
        self.default = self.default.take().and_then(|v| recoerce_value(ty, &v));
        let mut values = Vec::new();
        for value in std::mem::take(&mut self.enum_values) {
            match recoerce_value(ty, &value) {
                Some(v) if !values.contains(&v) => values.push(v),
                _ => {}
            }
        }
        self.enum_values = values;
    }
}

fn recoerce_value(ty: ScalarType, value: &Value) -> Option<Value> {
    let raw = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    ty.coerce(&raw).ok().flatten()
}

/// Type-specific content of a schema node.
///
/// Exactly one shape exists per node, so object, array and scalar fields can
/// never be populated at the same time.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    Object(ObjectSchema),
    Array(ArraySchema),
    Scalar(ScalarType, ScalarSchema),
}

impl SchemaKind {
    /// Fresh content for `ty`: empty properties, string items, or no metadata.
    pub fn default_for(ty: SchemaType) -> Self {
        match ty {
            SchemaType::Object => SchemaKind::Object(ObjectSchema::default()),
            SchemaType::Array => SchemaKind::Array(ArraySchema::default()),
            SchemaType::String => SchemaKind::Scalar(ScalarType::String, ScalarSchema::default()),
            SchemaType::Integer => SchemaKind::Scalar(ScalarType::Integer, ScalarSchema::default()),
            SchemaType::Number => SchemaKind::Scalar(ScalarType::Number, ScalarSchema::default()),
            SchemaType::Boolean => SchemaKind::Scalar(ScalarType::Boolean, ScalarSchema::default()),
        }
    }
}

/// A recursive schema tree node.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    pub kind: SchemaKind,
    /// UI-only; never serialized.
    pub collapsed: bool,
}

impl Default for SchemaNode {
    fn default() -> Self {
        Self::string()
    }
}

impl SchemaNode {
    pub fn new(ty: SchemaType) -> Self {
        Self {
            kind: SchemaKind::default_for(ty),
            collapsed: false,
        }
    }

    pub fn string() -> Self {
        Self::new(SchemaType::String)
    }

    pub fn object() -> Self {
        Self::new(SchemaType::Object)
    }

    pub fn schema_type(&self) -> SchemaType {
        match &self.kind {
            SchemaKind::Object(_) => SchemaType::Object,
            SchemaKind::Array(_) => SchemaType::Array,
            SchemaKind::Scalar(ty, _) => (*ty).into(),
        }
    }

    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match &self.kind {
            SchemaKind::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut ObjectSchema> {
        match &mut self.kind {
            SchemaKind::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut ArraySchema> {
        match &mut self.kind {
            SchemaKind::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Switch the node to `ty`.
    ///
    /// Fields foreign to the new type are dropped and the type's defaults
    /// installed. Scalar-to-scalar switches keep the scalar metadata, with
    /// `default` and `enum` re-coerced to the new type; switching to the
    /// current type changes nothing. Object content lost to
    /// a switch is not recoverable by switching back.
    pub fn set_type(&mut self, ty: SchemaType) {
        if self.schema_type() == ty {
            return;
        }
        if let (SchemaKind::Scalar(current, meta), Some(scalar)) = (&mut self.kind, ty.scalar()) {
            *current = scalar;
            meta.recoerce(scalar);
            return;
        }
        self.kind = SchemaKind::default_for(ty);
    }

    /// Full internal shape as JSON, without UI-only flags.
    ///
    /// Empty containers are kept: an object node always carries
    /// `properties` and `required`.
    pub fn to_value(&self) -> Value {
        let mut out = Map::new();
        out.insert("type".into(), Value::String(self.schema_type().as_str().into()));
        match &self.kind {
            SchemaKind::Object(obj) => {
                let properties: Map<String, Value> = obj
                    .properties
                    .iter()
                    .map(|(name, child)| (name.clone(), child.to_value()))
                    .collect();
                out.insert("properties".into(), Value::Object(properties));
                out.insert(
                    "required".into(),
                    Value::Array(obj.required.iter().cloned().map(Value::String).collect()),
                );
            }
            SchemaKind::Array(arr) => {
                out.insert("items".into(), arr.items.to_value());
                if let Some(n) = arr.min_items {
                    out.insert("minItems".into(), n.into());
                }
                if let Some(n) = arr.max_items {
                    out.insert("maxItems".into(), n.into());
                }
                if arr.unique_items {
                    out.insert("uniqueItems".into(), Value::Bool(true));
                }
            }
            SchemaKind::Scalar(_, meta) => {
                if !meta.description.is_empty() {
                    out.insert("description".into(), meta.description.clone().into());
                }
                if let Some(default) = &meta.default {
                    out.insert("default".into(), default.clone());
                }
                if !meta.format.is_empty() {
                    out.insert("format".into(), meta.format.clone().into());
                }
                if !meta.pattern.is_empty() {
                    out.insert("pattern".into(), meta.pattern.clone().into());
                }
                if let Some(n) = meta.min_length {
                    out.insert("minLength".into(), n.into());
                }
                if let Some(n) = meta.max_length {
                    out.insert("maxLength".into(), n.into());
                }
                if !meta.enum_values.is_empty() {
                    out.insert("enum".into(), Value::Array(meta.enum_values.clone()));
                }
            }
        }
        Value::Object(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_type_parse() {
        assert_eq!("integer".parse::<SchemaType>().unwrap(), SchemaType::Integer);
        assert!(matches!(
            "file".parse::<SchemaType>(),
            Err(EditError::UnknownType(_))
        ));
    }

    #[test]
    fn test_defaults_per_type() {
        assert_eq!(
            SchemaNode::object().to_value(),
            json!({"type": "object", "properties": {}, "required": []})
        );
        assert_eq!(
            SchemaNode::new(SchemaType::Array).to_value(),
            json!({"type": "array", "items": {"type": "string"}})
        );
        assert_eq!(SchemaNode::new(SchemaType::Boolean).to_value(), json!({"type": "boolean"}));
    }

    #[test]
    fn test_set_type_scalar_keeps_metadata() {
        let mut node = SchemaNode::string();
        if let SchemaKind::Scalar(_, meta) = &mut node.kind {
            meta.description = "count".into();
        }
        node.set_type(SchemaType::Integer);
        assert_eq!(node.to_value(), json!({"type": "integer", "description": "count"}));
    }

    #[test]
    fn test_set_type_scalar_recoerces_default_and_enum() {
        let mut node = SchemaNode::string();
        if let SchemaKind::Scalar(_, meta) = &mut node.kind {
            meta.default = Some(json!("abc"));
            meta.enum_values = vec![json!("x"), json!("y")];
        }
        node.set_type(SchemaType::Integer);
        assert_eq!(node.to_value(), json!({"type": "integer"}));

        let mut node = SchemaNode::string();
        if let SchemaKind::Scalar(_, meta) = &mut node.kind {
            meta.default = Some(json!("5"));
            meta.enum_values = vec![json!("5"), json!("5.0"), json!("7"), json!("no")];
        }
        node.set_type(SchemaType::Integer);
        assert_eq!(
            node.to_value(),
            json!({"type": "integer", "default": 5, "enum": [5, 7]})
        );

        node.set_type(SchemaType::String);
        assert_eq!(
            node.to_value(),
            json!({"type": "string", "default": "5", "enum": ["5", "7"]})
        );
    }

    #[test]
    fn test_set_type_same_container_is_noop() {
        let mut node = SchemaNode::object();
        node.as_object_mut()
            .unwrap()
            .properties
            .insert("a".into(), SchemaNode::string());
        node.set_type(SchemaType::Object);
        assert_eq!(node.as_object().unwrap().properties.len(), 1);
    }

    #[test]
    fn test_set_type_keeps_collapsed_flag() {
        let mut node = SchemaNode::object();
        node.collapsed = true;
        node.set_type(SchemaType::Array);
        assert!(node.collapsed);
    }

    #[test]
    fn test_scalar_coerce() {
        assert_eq!(ScalarType::Integer.coerce("42").unwrap(), Some(json!(42)));
        assert!(ScalarType::Integer.coerce("4.5").is_err());
        assert_eq!(ScalarType::Number.coerce("4.5").unwrap(), Some(json!(4.5)));
        assert!(ScalarType::Number.coerce("abc").is_err());
        assert_eq!(ScalarType::Boolean.coerce("true").unwrap(), Some(json!(true)));
        assert_eq!(ScalarType::Boolean.coerce("yes").unwrap(), Some(json!(false)));
        assert_eq!(ScalarType::String.coerce("x").unwrap(), Some(json!("x")));
        assert_eq!(ScalarType::String.coerce("").unwrap(), None);
    }
}
