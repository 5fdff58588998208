//! Schema tree edits.

use regex::Regex;
use serde_json::Value;

use apidocs_util::{split_list, unique_name};

use crate::error::{EditError, NameKind, Outcome};
use crate::model::{ArraySchema, ObjectSchema, SchemaKind, SchemaNode, SchemaType};
use crate::ops::{check_rename, rename_entry};

/// A single metadata field edit, carrying the raw input text.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaField {
    Description(String),
    /// Coerced to the node's scalar type; empty clears.
    Default(String),
    Format(String),
    /// Must compile as a regular expression; empty clears.
    Pattern(String),
    MinLength(String),
    MaxLength(String),
    MinItems(String),
    MaxItems(String),
    UniqueItems(bool),
    /// Comma-separated, each entry coerced to the node's scalar type.
    Enum(String),
}

impl SchemaField {
    pub fn name(&self) -> &'static str {
        match self {
            SchemaField::Description(_) => "description",
            SchemaField::Default(_) => "default",
            SchemaField::Format(_) => "format",
            SchemaField::Pattern(_) => "pattern",
            SchemaField::MinLength(_) => "minLength",
            SchemaField::MaxLength(_) => "maxLength",
            SchemaField::MinItems(_) => "minItems",
            SchemaField::MaxItems(_) => "maxItems",
            SchemaField::UniqueItems(_) => "uniqueItems",
            SchemaField::Enum(_) => "enum",
        }
    }
}

/// Switch `node` to `ty`, pruning foreign fields and installing defaults.
///
/// Destructive: properties of an object switched to a scalar are gone for
/// good.
pub fn prepare_schema_for_type(node: &mut SchemaNode, ty: SchemaType) {
    node.set_type(ty);
}

/// Add a default string property under the first free placeholder name.
pub fn add_property(obj: &mut ObjectSchema, prefix: &str) -> String {
    let name = unique_name(prefix, |n| obj.properties.contains_key(n));
    obj.properties.insert(name.clone(), SchemaNode::string());
    name
}

/// Rename a property in place, carrying its `required` entry along.
///
/// # Errors
///
/// [`EditError::DuplicateName`] if a sibling already has the new name,
/// [`EditError::EmptyName`] for a blank name. The object is left untouched.
pub fn rename_property(obj: &mut ObjectSchema, from: &str, to: &str) -> Result<Outcome, EditError> {
    if !obj.properties.contains_key(from) {
        return Ok(Outcome::Stale);
    }
    let Some(to) = check_rename(NameKind::Property, from, to, |n| {
        obj.properties.contains_key(n)
    })?
    else {
        return Ok(Outcome::Applied);
    };
    rename_entry(&mut obj.properties, from, to);
    for name in obj.required.iter_mut().filter(|r| r.as_str() == from) {
        *name = to.to_string();
    }
    Ok(Outcome::Applied)
}

/// Remove a property and its `required` entry.
pub fn remove_property(obj: &mut ObjectSchema, name: &str) -> Outcome {
    if obj.properties.shift_remove(name).is_none() {
        return Outcome::Stale;
    }
    obj.required.retain(|r| r != name);
    Outcome::Applied
}

/// Add `name` to `required`, or take it out if it is already there.
pub fn toggle_required(obj: &mut ObjectSchema, name: &str) -> Outcome {
    if !obj.properties.contains_key(name) {
        return Outcome::Stale;
    }
    if obj.is_required(name) {
        obj.required.retain(|r| r != name);
    } else {
        obj.required.push(name.to_string());
    }
    Outcome::Applied
}

/// Replace the items schema of an array node with a default string node.
pub fn reset_array_items(node: &mut SchemaNode) -> Outcome {
    match node.as_array_mut() {
        Some(arr) => {
            arr.items = ArraySchema::default().items;
            Outcome::Applied
        }
        None => Outcome::Stale,
    }
}

fn parse_count(raw: &str) -> Result<Option<u64>, EditError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u64>()
        .map(Some)
        .map_err(|_| EditError::InvalidNumber(raw.to_string()))
}

/// Apply a metadata edit.
///
/// # Errors
///
/// [`EditError::FieldNotApplicable`] when the field does not belong to the
/// node's type; [`EditError::InvalidNumber`] or
/// [`EditError::InvalidPattern`] when the input does not parse. The node is
/// unchanged on error.
pub fn set_schema_field(node: &mut SchemaNode, field: SchemaField) -> Result<(), EditError> {
    let not_applicable = EditError::FieldNotApplicable {
        field: field.name(),
        schema_type: node.schema_type().as_str(),
    };
    match (&mut node.kind, field) {
        (SchemaKind::Scalar(_, meta), SchemaField::Description(text)) => meta.description = text,
        (SchemaKind::Scalar(_, meta), SchemaField::Format(text)) => meta.format = text,
        (SchemaKind::Scalar(ty, meta), SchemaField::Default(raw)) => {
            meta.default = ty.coerce(&raw)?;
        }
        (SchemaKind::Scalar(_, meta), SchemaField::Pattern(raw)) => {
            if !raw.is_empty() {
                Regex::new(&raw).map_err(|err| EditError::InvalidPattern {
                    pattern: raw.clone(),
                    reason: err.to_string(),
                })?;
            }
            meta.pattern = raw;
        }
        (SchemaKind::Scalar(_, meta), SchemaField::MinLength(raw)) => {
            meta.min_length = parse_count(&raw)?;
        }
        (SchemaKind::Scalar(_, meta), SchemaField::MaxLength(raw)) => {
            meta.max_length = parse_count(&raw)?;
        }
        (SchemaKind::Scalar(ty, meta), SchemaField::Enum(raw)) => {
            let mut values: Vec<Value> = Vec::new();
            for entry in split_list(&raw) {
                if let Some(value) = ty.coerce(&entry)? {
                    if !values.contains(&value) {
                        values.push(value);
                    }
                }
            }
            meta.enum_values = values;
        }
        (SchemaKind::Array(arr), SchemaField::MinItems(raw)) => {
            arr.min_items = parse_count(&raw)?;
        }
        (SchemaKind::Array(arr), SchemaField::MaxItems(raw)) => {
            arr.max_items = parse_count(&raw)?;
        }
        (SchemaKind::Array(arr), SchemaField::UniqueItems(unique)) => arr.unique_items = unique,
        _ => return Err(not_applicable),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object_with(names: &[&str]) -> ObjectSchema {
        let mut obj = ObjectSchema::default();
        for name in names {
            obj.properties.insert(name.to_string(), SchemaNode::string());
        }
        obj
    }

    #[test]
    fn test_add_property_placeholders() {
        let mut obj = object_with(&["property1", "property3"]);
        assert_eq!(add_property(&mut obj, "property"), "property2");
        assert_eq!(add_property(&mut obj, "property"), "property4");
    }

    #[test]
    fn test_rename_property_conflict() {
        let mut obj = object_with(&["x", "y"]);
        obj.required.push("x".into());
        let before = obj.clone();
        assert!(matches!(
            rename_property(&mut obj, "x", "y"),
            Err(EditError::DuplicateName { .. })
        ));
        assert_eq!(obj, before);
    }

    #[test]
    fn test_rename_property_moves_required() {
        let mut obj = object_with(&["a", "b"]);
        obj.required.push("a".into());
        assert_eq!(rename_property(&mut obj, "a", "c").unwrap(), Outcome::Applied);
        assert_eq!(obj.properties.keys().collect::<Vec<_>>(), ["c", "b"]);
        assert_eq!(obj.required, vec!["c"]);
        assert_eq!(rename_property(&mut obj, "a", "d").unwrap(), Outcome::Stale);
    }

    #[test]
    fn test_remove_property_drops_required() {
        let mut obj = object_with(&["p", "q"]);
        assert_eq!(toggle_required(&mut obj, "p"), Outcome::Applied);
        assert_eq!(obj.required, vec!["p"]);
        assert_eq!(remove_property(&mut obj, "p"), Outcome::Applied);
        assert!(obj.required.is_empty());
        assert_eq!(remove_property(&mut obj, "p"), Outcome::Stale);
    }

    #[test]
    fn test_toggle_required_twice() {
        let mut obj = object_with(&["p"]);
        toggle_required(&mut obj, "p");
        toggle_required(&mut obj, "p");
        assert!(obj.required.is_empty());
        assert_eq!(toggle_required(&mut obj, "missing"), Outcome::Stale);
    }

    #[test]
    fn test_type_change_is_destructive() {
        let mut node = SchemaNode::object();
        let obj = node.as_object_mut().unwrap();
        add_property(obj, "property");
        prepare_schema_for_type(&mut node, SchemaType::String);
        prepare_schema_for_type(&mut node, SchemaType::Object);
        assert_eq!(
            node.to_value(),
            json!({"type": "object", "properties": {}, "required": []})
        );
    }

    #[test]
    fn test_set_schema_field_scalar() {
        let mut node = SchemaNode::new(SchemaType::Integer);
        set_schema_field(&mut node, SchemaField::Default("5".into())).unwrap();
        set_schema_field(&mut node, SchemaField::Enum("1, 2, 2, 3".into())).unwrap();
        set_schema_field(&mut node, SchemaField::MinLength("2".into())).unwrap();
        assert_eq!(
            node.to_value(),
            json!({"type": "integer", "default": 5, "minLength": 2, "enum": [1, 2, 3]})
        );
        set_schema_field(&mut node, SchemaField::MinLength("".into())).unwrap();
        assert_eq!(node.to_value()["minLength"], Value::Null);
    }

    #[test]
    fn test_set_schema_field_rejects_bad_input() {
        let mut node = SchemaNode::new(SchemaType::Number);
        let before = node.clone();
        assert!(matches!(
            set_schema_field(&mut node, SchemaField::Default("abc".into())),
            Err(EditError::InvalidNumber(_))
        ));
        assert!(matches!(
            set_schema_field(&mut node, SchemaField::Pattern("(".into())),
            Err(EditError::InvalidPattern { .. })
        ));
        assert!(matches!(
            set_schema_field(&mut node, SchemaField::MaxLength("-1".into())),
            Err(EditError::InvalidNumber(_))
        ));
        assert_eq!(node, before);
    }

    #[test]
    fn test_set_schema_field_not_applicable() {
        let mut node = SchemaNode::object();
        assert_eq!(
            set_schema_field(&mut node, SchemaField::Format("date".into())),
            Err(EditError::FieldNotApplicable {
                field: "format",
                schema_type: "object"
            })
        );
        let mut node = SchemaNode::string();
        assert!(set_schema_field(&mut node, SchemaField::UniqueItems(true)).is_err());
    }

    #[test]
    fn test_array_fields_and_reset() {
        let mut node = SchemaNode::new(SchemaType::Array);
        node.as_array_mut().unwrap().items.set_type(SchemaType::Object);
        set_schema_field(&mut node, SchemaField::MaxItems("3".into())).unwrap();
        set_schema_field(&mut node, SchemaField::UniqueItems(true)).unwrap();
        assert_eq!(reset_array_items(&mut node), Outcome::Applied);
        assert_eq!(
            node.to_value(),
            json!({
                "type": "array",
                "items": {"type": "string"},
                "maxItems": 3,
                "uniqueItems": true
            })
        );
        assert_eq!(reset_array_items(&mut SchemaNode::string()), Outcome::Stale);
    }
}
