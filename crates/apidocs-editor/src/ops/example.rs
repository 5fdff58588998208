//! Example value edits.
//!
//! Every function takes the example root plus a decoded path. Value writes
//! walk in create mode, so a rendered path always has a slot to edit; key
//! and item edits need their container to exist already.

use serde_json::Value;

use apidocs_path::split_last;
use apidocs_util::unique_name;

use crate::error::{EditError, NameKind, Outcome};
use crate::model::{cast_primitive, ExampleKind};
use crate::ops::{check_rename, rename_field};
use crate::resolve::{locate_example_mut, locate_example_or_create};

/// Replace the value at `path` with a fresh default of `kind`.
pub fn set_example_type(root: &mut Value, path: &[String], kind: ExampleKind) -> Outcome {
    match locate_example_or_create(root, path) {
        Some(slot) => {
            *slot = kind.default_value();
            Outcome::Applied
        }
        None => Outcome::Stale,
    }
}

/// Store raw text in the slot at `path`, coerced by the slot's current
/// variant.
///
/// # Errors
///
/// [`EditError::InvalidNumber`] when a number slot gets non-numeric text.
/// Unlike the other edits this one still writes: the slot is set to `0`
/// before the error is returned.
pub fn set_example_value(
    root: &mut Value,
    path: &[String],
    raw: &str,
) -> Result<Outcome, EditError> {
    let Some(slot) = locate_example_or_create(root, path) else {
        return Ok(Outcome::Stale);
    };
    match cast_primitive(raw, ExampleKind::of(slot)) {
        Ok(value) => {
            *slot = value;
            Ok(Outcome::Applied)
        }
        Err(err) => {
            *slot = Value::from(0);
            Err(err)
        }
    }
}

/// Add a placeholder key holding `""` to the object at `path`.
pub fn add_example_key(root: &mut Value, path: &[String], prefix: &str) -> Outcome {
    let Some(map) = locate_example_mut(root, path).and_then(Value::as_object_mut) else {
        return Outcome::Stale;
    };
    let name = unique_name(prefix, |n| map.contains_key(n));
    map.insert(name, Value::String(String::new()));
    Outcome::Applied
}

/// Rename the key addressed by `path` (its last step) within its parent
/// object, keeping its position.
pub fn rename_example_key(
    root: &mut Value,
    path: &[String],
    to: &str,
) -> Result<Outcome, EditError> {
    let Ok((parent, from)) = split_last(path) else {
        return Ok(Outcome::Stale);
    };
    let Some(map) = locate_example_mut(root, parent).and_then(Value::as_object_mut) else {
        return Ok(Outcome::Stale);
    };
    if !map.contains_key(from) {
        return Ok(Outcome::Stale);
    }
    match check_rename(NameKind::ExampleKey, from, to, |n| map.contains_key(n))? {
        Some(to) => Ok(rename_field(map, from, to)),
        None => Ok(Outcome::Applied),
    }
}

/// Remove the key addressed by `path` from its parent object.
pub fn remove_example_key(root: &mut Value, path: &[String]) -> Outcome {
    let Ok((parent, key)) = split_last(path) else {
        return Outcome::Stale;
    };
    let Some(map) = locate_example_mut(root, parent).and_then(Value::as_object_mut) else {
        return Outcome::Stale;
    };
    if !map.contains_key(key) {
        return Outcome::Stale;
    }
    map.retain(|k, _| k != key);
    Outcome::Applied
}

/// Append `""` to the array at `path`.
pub fn add_example_item(root: &mut Value, path: &[String]) -> Outcome {
    match locate_example_mut(root, path).and_then(Value::as_array_mut) {
        Some(items) => {
            items.push(Value::String(String::new()));
            Outcome::Applied
        }
        None => Outcome::Stale,
    }
}

/// Remove the element at `index` from the array at `path`.
pub fn remove_example_item(root: &mut Value, path: &[String], index: usize) -> Outcome {
    match locate_example_mut(root, path).and_then(Value::as_array_mut) {
        Some(items) if index < items.len() => {
            items.remove(index);
            Outcome::Applied
        }
        _ => Outcome::Stale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn p(steps: &[&str]) -> Vec<String> {
        steps.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_set_type_discards_previous() {
        let mut root = json!({"a": {"deep": [1, 2]}});
        set_example_type(&mut root, &p(&["a"]), ExampleKind::Boolean);
        assert_eq!(root, json!({"a": true}));
        set_example_type(&mut root, &[], ExampleKind::Array);
        assert_eq!(root, json!([]));
    }

    #[test]
    fn test_set_value_uses_slot_variant() {
        let mut root = json!({"n": 0, "s": "", "b": false, "z": null});
        set_example_value(&mut root, &p(&["n"]), "42").unwrap();
        set_example_value(&mut root, &p(&["s"]), "42").unwrap();
        set_example_value(&mut root, &p(&["b"]), "true").unwrap();
        set_example_value(&mut root, &p(&["z"]), "anything").unwrap();
        assert_eq!(root, json!({"n": 42, "s": "42", "b": true, "z": null}));
    }

    #[test]
    fn test_set_value_bad_number_stores_zero() {
        let mut root = json!({"n": 7});
        assert!(matches!(
            set_example_value(&mut root, &p(&["n"]), "seven"),
            Err(EditError::InvalidNumber(_))
        ));
        assert_eq!(root, json!({"n": 0}));
    }

    #[test]
    fn test_keys() {
        let mut root = json!({"property1": 1});
        assert_eq!(add_example_key(&mut root, &[], "property"), Outcome::Applied);
        assert_eq!(root, json!({"property1": 1, "property2": ""}));

        assert!(rename_example_key(&mut root, &p(&["property2"]), "property1").is_err());
        rename_example_key(&mut root, &p(&["property1"]), "id").unwrap();
        assert_eq!(
            serde_json::to_string(&root).unwrap(),
            r#"{"id":1,"property2":""}"#
        );

        assert_eq!(remove_example_key(&mut root, &p(&["id"])), Outcome::Applied);
        assert_eq!(remove_example_key(&mut root, &p(&["id"])), Outcome::Stale);
        assert_eq!(remove_example_key(&mut root, &[]), Outcome::Stale);
        assert_eq!(root, json!({"property2": ""}));
    }

    #[test]
    fn test_items_are_independently_typed() {
        let mut root = json!([]);
        add_example_item(&mut root, &[]);
        add_example_item(&mut root, &[]);
        set_example_type(&mut root, &p(&["1"]), ExampleKind::Object);
        assert_eq!(root, json!(["", {}]));
        assert_eq!(remove_example_item(&mut root, &[], 0), Outcome::Applied);
        assert_eq!(remove_example_item(&mut root, &[], 5), Outcome::Stale);
        assert_eq!(root, json!([{}]));
        assert_eq!(add_example_item(&mut json!("x"), &[]), Outcome::Stale);
    }

    #[test]
    fn test_missing_container_is_untouched() {
        let mut root = json!({});
        assert_eq!(remove_example_key(&mut root, &p(&["ghost", "x"])), Outcome::Stale);
        assert_eq!(
            rename_example_key(&mut root, &p(&["ghost", "x"]), "y"),
            Ok(Outcome::Stale)
        );
        assert_eq!(add_example_key(&mut root, &p(&["ghost"]), "property"), Outcome::Stale);
        assert_eq!(add_example_item(&mut root, &p(&["list"])), Outcome::Stale);
        assert_eq!(remove_example_item(&mut root, &p(&["list"]), 0), Outcome::Stale);
        assert_eq!(root, json!({}));
    }
}
