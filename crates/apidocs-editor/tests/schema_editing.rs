mod common;

use apidocs_editor::{
    ContextKey, EditError, NameKind, Outcome, ParamField, SchemaField, SchemaKind, SchemaNode,
    SchemaType,
};
use apidocs_path::{child, encode_path, items_path, property_path, PROPERTIES, ROOT};
use common::session;
use serde_json::json;

fn request_schema(s: &apidocs_editor::EditorSession<common::RecordingHost>) -> &SchemaNode {
    &s.document().endpoints[0].request_body.schema
}

#[test]
fn type_change_discards_object_content() {
    let mut s = session();
    let id = s.add_endpoint();
    let key = ContextKey::request_schema(id);
    s.add_property(&key, "root").unwrap();
    s.add_property(&key, "root").unwrap();
    assert_eq!(request_schema(&s).as_object().unwrap().properties.len(), 2);

    s.set_schema_type(&key, "root", SchemaType::String).unwrap();
    assert!(matches!(request_schema(&s).kind, SchemaKind::Scalar(_, _)));

    s.set_schema_type(&key, "root", SchemaType::Object).unwrap();
    let obj = request_schema(&s).as_object().unwrap();
    assert!(obj.properties.is_empty());
    assert!(obj.required.is_empty());
}

#[test]
fn scalar_switch_keeps_metadata() {
    let mut s = session();
    let id = s.add_endpoint();
    let key = ContextKey::request_schema(id);
    s.add_property(&key, "root").unwrap();
    let path = "root.properties.property1";
    s.set_schema_field(&key, path, SchemaField::Description("note".into()))
        .unwrap();
    s.set_schema_type(&key, path, SchemaType::Integer).unwrap();

    s.set_request_body_enabled(id, true).unwrap();
    let doc = s.serialize();
    assert_eq!(
        doc["endpoints"][0]["requestBody"]["content"]["application/json"]["schema"],
        json!({
            "type": "object",
            "properties": {"property1": {"type": "integer", "description": "note"}}
        })
    );
}

#[test]
fn scalar_switch_recoerces_default_and_enum() {
    let mut s = session();
    let id = s.add_endpoint();
    let key = ContextKey::request_schema(id);
    let path = encode_path(&property_path(&[], "level"));
    s.set_schema_type(&key, &path, SchemaType::String).unwrap();
    s.set_schema_field(&key, &path, SchemaField::Default("abc".into()))
        .unwrap();
    s.set_schema_field(&key, &path, SchemaField::Enum("x, y".into()))
        .unwrap();
    s.set_schema_type(&key, &path, SchemaType::Integer).unwrap();
    let level = |s: &apidocs_editor::EditorSession<common::RecordingHost>| {
        request_schema(s).as_object().unwrap().properties["level"].to_value()
    };
    assert_eq!(level(&s), json!({"type": "integer"}));

    s.set_schema_type(&key, &path, SchemaType::String).unwrap();
    s.set_schema_field(&key, &path, SchemaField::Default("5".into()))
        .unwrap();
    s.set_schema_field(&key, &path, SchemaField::Enum("5, 7, high".into()))
        .unwrap();
    s.set_schema_type(&key, &path, SchemaType::Integer).unwrap();
    assert_eq!(
        level(&s),
        json!({"type": "integer", "default": 5, "enum": [5, 7]})
    );
}

#[test]
fn rename_conflict_leaves_schema_unchanged() {
    let mut s = session();
    let id = s.add_endpoint();
    let key = ContextKey::request_schema(id);
    s.add_property(&key, "root").unwrap();
    s.add_property(&key, "root").unwrap();
    let before = request_schema(&s).clone();
    let renders = s.host().renders;

    let err = s
        .rename_property(&key, "root.properties.property2", "property1")
        .unwrap_err();
    assert_eq!(
        err,
        EditError::DuplicateName {
            kind: NameKind::Property,
            name: "property1".into()
        }
    );
    assert_eq!(request_schema(&s), &before);
    assert_eq!(s.host().renders, renders);
    assert_eq!(s.host().errors(), ["property \"property1\" already exists"]);
}

#[test]
fn rename_keeps_position() {
    let mut s = session();
    let id = s.add_endpoint();
    let key = ContextKey::request_schema(id);
    for _ in 0..3 {
        s.add_property(&key, "root").unwrap();
    }
    s.rename_property(&key, "root.properties.property2", "name")
        .unwrap();
    let names: Vec<&String> = request_schema(&s)
        .as_object()
        .unwrap()
        .properties
        .keys()
        .collect();
    assert_eq!(names, ["property1", "name", "property3"]);
}

#[test]
fn required_follows_rename_and_remove() {
    let mut s = session();
    let id = s.add_endpoint();
    let key = ContextKey::request_schema(id);
    s.add_property(&key, "root").unwrap();
    s.add_property(&key, "root").unwrap();

    s.toggle_required(&key, "root.properties.property1").unwrap();
    assert_eq!(request_schema(&s).as_object().unwrap().required, ["property1"]);

    s.rename_property(&key, "root.properties.property1", "id").unwrap();
    assert_eq!(request_schema(&s).as_object().unwrap().required, ["id"]);

    s.toggle_required(&key, "root.properties.property2").unwrap();
    s.remove_property(&key, "root.properties.id").unwrap();
    let obj = request_schema(&s).as_object().unwrap();
    assert_eq!(obj.required, ["property2"]);
    assert!(obj.required.iter().all(|r| obj.properties.contains_key(r)));

    s.toggle_required(&key, "root.properties.property2").unwrap();
    assert!(request_schema(&s).as_object().unwrap().required.is_empty());
}

#[test]
fn nested_paths_are_created_on_edit() {
    let mut s = session();
    let id = s.add_endpoint();
    let key = ContextKey::request_schema(id);
    s.set_schema_type(&key, "root.properties.tags", SchemaType::Array)
        .unwrap();
    s.set_schema_type(&key, "root.properties.tags.items", SchemaType::Object)
        .unwrap();
    s.add_property(&key, "root.properties.tags.items").unwrap();

    s.set_request_body_enabled(id, true).unwrap();
    let doc = s.serialize();
    let schema = &doc["endpoints"][0]["requestBody"]["content"]["application/json"]["schema"];
    assert_eq!(
        schema["properties"]["tags"],
        json!({
            "type": "array",
            "items": {"type": "object", "properties": {"property1": {"type": "string"}}}
        })
    );
}

#[test]
fn invalid_field_input_is_rejected() {
    let mut s = session();
    let id = s.add_endpoint();
    let key = ContextKey::request_schema(id);
    s.add_property(&key, "root").unwrap();
    let path = "root.properties.property1";

    assert!(matches!(
        s.set_schema_field(&key, path, SchemaField::Pattern("([a-z".into())),
        Err(EditError::InvalidPattern { .. })
    ));
    assert!(matches!(
        s.set_schema_field(&key, path, SchemaField::MinLength("two".into())),
        Err(EditError::InvalidNumber(_))
    ));
    assert!(matches!(
        s.set_schema_field(&key, path, SchemaField::MinItems("1".into())),
        Err(EditError::FieldNotApplicable { field: "minItems", .. })
    ));
    assert_eq!(s.host().errors().len(), 3);
}

#[test]
fn enum_is_coerced_to_node_type() {
    let mut s = session();
    let id = s.add_endpoint();
    let key = ContextKey::request_schema(id);
    let path = "root.properties.level";
    s.set_schema_type(&key, path, SchemaType::Integer).unwrap();
    s.set_schema_field(&key, path, SchemaField::Enum("1, 2,2, 3".into()))
        .unwrap();
    let obj = request_schema(&s).as_object().unwrap();
    assert_eq!(obj.properties["level"].to_value()["enum"], json!([1, 2, 3]));
}

#[test]
fn collapse_flag_never_exported() {
    let mut s = session();
    let id = s.add_endpoint();
    let key = ContextKey::request_schema(id);
    s.toggle_collapsed(&key, "root").unwrap();
    assert!(request_schema(&s).collapsed);
    s.set_request_body_enabled(id, true).unwrap();
    let text = s.serialize().to_string();
    assert!(!text.contains("collapsed"));
}

#[test]
fn param_schema_and_example() {
    let mut s = session();
    let id = s.add_endpoint();
    let param = s.add_param(id).unwrap();
    s.update_param(id, param, ParamField::Name("limit".into()))
        .unwrap();
    s.update_param(id, param, ParamField::SchemaType(SchemaType::Integer))
        .unwrap();
    s.update_param(id, param, ParamField::Example("25".into()))
        .unwrap();
    assert!(matches!(
        s.update_param(id, param, ParamField::Example("lots".into())),
        Err(EditError::InvalidNumber(_))
    ));

    let key = ContextKey::param(id, param);
    s.set_schema_field(&key, "root", SchemaField::Default("10".into()))
        .unwrap();
    assert_eq!(
        s.serialize()["endpoints"][0]["params"][0],
        json!({
            "in": "query",
            "name": "limit",
            "required": false,
            "schema": {"type": "integer", "default": 10},
            "example": 25
        })
    );
}

#[test]
fn stale_context_is_a_quiet_no_op() {
    let mut s = session();
    let id = s.add_endpoint();
    let key = ContextKey::request_schema(id);
    s.remove_endpoint(id).unwrap();
    let renders = s.host().renders;

    assert_eq!(s.add_property(&key, "root"), Ok(Outcome::Stale));
    assert_eq!(
        s.rename_property(&key, "root.properties.gone", "x"),
        Ok(Outcome::Stale)
    );
    assert_eq!(s.host().renders, renders);
    assert!(s.host().errors().is_empty());
}

#[test]
fn encoded_context_keys_resolve() {
    let mut s = session();
    let id = s.add_endpoint();
    s.add_response(id, "200").unwrap();
    let key: ContextKey = ContextKey::response_schema(id, "200", "application/json")
        .to_string()
        .parse()
        .unwrap();
    s.add_property(&key, "root").unwrap();
    s.rename_property(&key, "root.properties.property1", "a.b|c")
        .unwrap();
    let path = child(&child(ROOT, PROPERTIES), "a.b|c");
    s.set_schema_type(&key, &path, SchemaType::Boolean).unwrap();

    let doc = s.serialize();
    let schema = &doc["endpoints"][0]["responses"]["200"]["content"]["application/json"]["schema"];
    assert_eq!(schema["properties"]["a.b|c"], json!({"type": "boolean"}));
}

#[test]
fn missing_schema_paths_leave_model_and_preview_alone() {
    let mut s = session();
    let id = s.add_endpoint();
    s.set_request_body_enabled(id, true).unwrap();
    let key = ContextKey::request_schema(id);
    s.add_property(&key, "root").unwrap();
    let before = request_schema(&s).clone();
    let renders = s.host().renders;

    let ghost = property_path(&[], "ghost");
    let nested = encode_path(&property_path(&ghost, "x"));
    assert_eq!(s.remove_property(&key, &nested), Ok(Outcome::Stale));
    assert_eq!(s.rename_property(&key, &nested, "y"), Ok(Outcome::Stale));
    assert_eq!(s.toggle_required(&key, &nested), Ok(Outcome::Stale));
    assert_eq!(
        s.set_schema_type(&key, &nested, SchemaType::Integer),
        Ok(Outcome::Stale)
    );
    assert_eq!(s.add_property(&key, &encode_path(&ghost)), Ok(Outcome::Stale));
    assert_eq!(
        s.reset_array_items(&key, &encode_path(&items_path(&ghost))),
        Ok(Outcome::Stale)
    );
    assert!(matches!(
        s.set_schema_field(&key, &encode_path(&ghost), SchemaField::MinItems("1".into())),
        Err(EditError::FieldNotApplicable { .. })
    ));

    assert_eq!(request_schema(&s), &before);
    assert_eq!(s.host().renders, renders);
    assert_eq!(s.serialize(), *s.preview());
}
