//! OpenAPI rendering of a document.
//!
//! Endpoints are grouped by path, keyed by lower-case method, and carry the
//! same pruned content as the export document with `params` renamed to
//! `parameters`. An endpoint without responses gets a placeholder
//! `{"description": "OK"}` under the configured default code.

use serde_json::{Map, Value};

use crate::model::Document;
use crate::options::EditorOptions;
use crate::serialize::serialize_endpoint;

pub fn to_openapi(doc: &Document, options: &EditorOptions) -> Value {
    let mut info = Map::new();
    info.insert("title".into(), doc.title.clone().into());
    info.insert("version".into(), doc.version.clone().into());

    let mut paths: Map<String, Value> = Map::new();
    for endpoint in &doc.endpoints {
        let Value::Object(serialized) = serialize_endpoint(endpoint, options) else {
            continue;
        };
        let mut operation = Map::new();
        let mut responses = Map::new();
        for (key, value) in serialized {
            match key.as_str() {
                "method" | "path" => {}
                "params" => {
                    operation.insert("parameters".into(), value);
                }
                "responses" => {
                    if let Value::Object(map) = value {
                        responses = map;
                    }
                }
                _ => {
                    operation.insert(key, value);
                }
            }
        }
        if responses.is_empty() {
            let mut ok = Map::new();
            ok.insert("description".into(), "OK".into());
            responses.insert(options.default_response_code.clone(), Value::Object(ok));
        }
        operation.insert("responses".into(), Value::Object(responses));

        let item = paths
            .entry(endpoint.path.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(item) = item {
            item.insert(
                endpoint.method.as_str().to_ascii_lowercase(),
                Value::Object(operation),
            );
        }
    }

    let mut root = Map::new();
    root.insert("openapi".into(), options.openapi_version.clone().into());
    root.insert("info".into(), Value::Object(info));
    root.insert("paths".into(), Value::Object(paths));
    Value::Object(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Endpoint, HttpMethod, Param, Response};
    use serde_json::json;

    #[test]
    fn test_groups_by_path() {
        let mut get = Endpoint::new(1);
        get.path = "/orders".into();
        let mut post = Endpoint::new(2);
        post.path = "/orders".into();
        post.method = HttpMethod::Post;
        post.summary = "Create".into();
        post.responses
            .insert("201".into(), Response::with_content_type("application/json"));
        let doc = Document {
            title: "Shop".into(),
            version: "1.0".into(),
            endpoints: vec![get, post],
        };
        assert_eq!(
            to_openapi(&doc, &EditorOptions::default()),
            json!({
                "openapi": "3.0.3",
                "info": {"title": "Shop", "version": "1.0"},
                "paths": {"/orders": {
                    "get": {"responses": {"200": {"description": "OK"}}},
                    "post": {
                        "summary": "Create",
                        "responses": {"201": {
                            "description": "",
                            "content": {"application/json": {"schema": {"type": "object"}}}
                        }}
                    }
                }}
            })
        );
    }

    #[test]
    fn test_params_become_parameters() {
        let mut ep = Endpoint::new(1);
        let mut param = Param::new(1);
        param.name = "q".into();
        ep.params.push(param);
        let doc = Document {
            endpoints: vec![ep],
            ..Document::default()
        };
        let out = to_openapi(&doc, &EditorOptions::default());
        let op = &out["paths"][""]["get"];
        assert!(op.get("params").is_none());
        assert_eq!(op["parameters"][0]["name"], json!("q"));
        let keys: Vec<&String> = op.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["parameters", "responses"]);
    }
}
