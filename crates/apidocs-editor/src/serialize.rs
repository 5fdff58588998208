//! Model to export document.
//!
//! Output is minimal: optional fields appear only when they carry content,
//! UI-only state never appears, and vacuous values (`""`, `null`, empty
//! containers) are pruned by [`strip_meta`]. Serialization is pure and
//! key order follows the model, so equal models give byte-identical JSON.

use serde_json::{Map, Value};

use apidocs_util::{strip_meta, strip_meta_or_empty};

use crate::model::{Document, Endpoint, MediaContent, Param, RequestBody, Response};
use crate::options::EditorOptions;

fn insert_stripped(out: &mut Map<String, Value>, key: &str, value: &Value, prefix: &str) {
    if let Some(cleaned) = strip_meta(value, prefix) {
        out.insert(key.to_string(), cleaned);
    }
}

pub fn serialize_document(doc: &Document, options: &EditorOptions) -> Value {
    let mut out = Map::new();
    out.insert("title".into(), doc.title.clone().into());
    out.insert("version".into(), doc.version.clone().into());
    let endpoints = doc
        .endpoints
        .iter()
        .map(|ep| serialize_endpoint(ep, options))
        .collect();
    out.insert("endpoints".into(), Value::Array(endpoints));
    Value::Object(out)
}

/// `method`, `path` and `responses` are always present.
pub fn serialize_endpoint(endpoint: &Endpoint, options: &EditorOptions) -> Value {
    let mut out = Map::new();
    out.insert("method".into(), endpoint.method.as_str().into());
    out.insert("path".into(), endpoint.path.clone().into());
    if !endpoint.summary.is_empty() {
        out.insert("summary".into(), endpoint.summary.clone().into());
    }
    if !endpoint.tags.is_empty() {
        let tags = endpoint.tags.iter().cloned().map(Value::String).collect();
        out.insert("tags".into(), Value::Array(tags));
    }
    if !endpoint.params.is_empty() {
        let params = endpoint
            .params
            .iter()
            .map(|p| serialize_param(p, options))
            .collect();
        out.insert("params".into(), Value::Array(params));
    }
    if endpoint.request_body.enabled {
        out.insert(
            "requestBody".into(),
            serialize_request_body(&endpoint.request_body, options),
        );
    }
    let responses: Map<String, Value> = endpoint
        .responses
        .iter()
        .map(|(code, response)| (code.clone(), serialize_response(response, options)))
        .collect();
    out.insert("responses".into(), Value::Object(responses));
    Value::Object(out)
}

pub fn serialize_param(param: &Param, options: &EditorOptions) -> Value {
    let prefix = options.meta_prefix.as_str();
    let mut out = Map::new();
    out.insert("in".into(), param.location.as_str().into());
    out.insert("name".into(), param.name.clone().into());
    out.insert("required".into(), param.required.into());
    if !param.description.is_empty() {
        out.insert("description".into(), param.description.clone().into());
    }
    out.insert(
        "schema".into(),
        strip_meta_or_empty(&param.schema.to_value(), prefix),
    );
    if let Some(example) = &param.example {
        insert_stripped(&mut out, "example", example, prefix);
    }
    Value::Object(out)
}

/// Only called for enabled bodies. `required` appears only when true.
pub fn serialize_request_body(body: &RequestBody, options: &EditorOptions) -> Value {
    let prefix = options.meta_prefix.as_str();
    let mut out = Map::new();
    if !body.description.is_empty() {
        out.insert("description".into(), body.description.clone().into());
    }
    if body.required {
        out.insert("required".into(), Value::Bool(true));
    }
    let mut media = Map::new();
    media.insert(
        "schema".into(),
        strip_meta_or_empty(&body.schema.to_value(), prefix),
    );
    if let Some(example) = &body.example {
        insert_stripped(&mut media, "example", example, prefix);
    }
    let mut content = Map::new();
    content.insert(body.content_type.clone(), Value::Object(media));
    out.insert("content".into(), Value::Object(content));
    Value::Object(out)
}

fn media_to_value(media: &MediaContent) -> Value {
    let examples: Map<String, Value> = media
        .examples
        .iter()
        .map(|(name, example)| {
            let mut entry = Map::new();
            entry.insert("summary".into(), example.summary.clone().into());
            entry.insert("value".into(), example.value.clone());
            (name.clone(), Value::Object(entry))
        })
        .collect();
    let mut out = Map::new();
    out.insert("schema".into(), media.schema.to_value());
    out.insert("examples".into(), Value::Object(examples));
    Value::Object(out)
}

/// `description` is always present, even when empty.
pub fn serialize_response(response: &Response, options: &EditorOptions) -> Value {
    let prefix = options.meta_prefix.as_str();
    let mut out = Map::new();
    out.insert("description".into(), response.description.clone().into());
    let content: Map<String, Value> = response
        .content
        .iter()
        .map(|(ct, media)| (ct.clone(), media_to_value(media)))
        .collect();
    insert_stripped(&mut out, "content", &Value::Object(content), prefix);
    if let Some(headers) = &response.headers {
        insert_stripped(&mut out, "headers", headers, prefix);
    }
    if let Some(links) = &response.links {
        insert_stripped(&mut out, "links", links, prefix);
    }
    Value::Object(out)
}
