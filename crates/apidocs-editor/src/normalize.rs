//! Loose input to normalized model.
//!
//! Accepts whatever the hosting page hands over (a partial document, a bare
//! endpoint array, legacy `in: body` parameters) and produces a [`Document`]
//! with every field populated. Normalization never fails: anything it has to
//! repair or drop is recorded as a [`NormalizeWarning`] and logged.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use apidocs_util::split_list;

use crate::model::{
    ArraySchema, Document, Endpoint, EndpointId, HttpMethod, MediaContent, NamedExample,
    ObjectSchema, Param, ParamId, ParamLocation, RequestBody, Response, ScalarSchema, SchemaKind,
    SchemaNode, SchemaType,
};
use crate::options::EditorOptions;

/// Parameter locations that denote a request body in older documents.
const LEGACY_BODY_LOCATIONS: [&str; 2] = ["body", "requestBody"];

/// A repair made while normalizing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NormalizeWarning {
    #[error("malformed bootstrap payload, starting empty: {0}")]
    MalformedBootstrap(String),
    #[error("endpoint {endpoint:?} has {dropped} extra body parameter(s); only the first was kept")]
    ExtraBodyParams { endpoint: String, dropped: usize },
    #[error("unknown HTTP method {0:?}, using GET")]
    UnknownMethod(String),
    #[error("unknown parameter location {0:?}, using query")]
    UnknownLocation(String),
    #[error("unknown schema type {0:?}")]
    UnknownSchemaType(String),
}

/// Result of normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub document: Document,
    pub warnings: Vec<NormalizeWarning>,
}

/// Parse and normalize a bootstrap payload.
///
/// `None`, blank or unparseable text yields an empty document; only the
/// unparseable case records a warning.
pub fn parse_bootstrap(raw: Option<&str>, options: &EditorOptions) -> Normalized {
    let text = raw.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Normalizer::new(options).finish(Document::default());
    }
    match serde_json::from_str::<Value>(text) {
        Ok(value) => normalize_document(&value, options),
        Err(err) => {
            let mut normalizer = Normalizer::new(options);
            normalizer.warn(NormalizeWarning::MalformedBootstrap(err.to_string()));
            normalizer.finish(Document::default())
        }
    }
}

/// Normalize a document object or a bare array of endpoints.
pub fn normalize_document(raw: &Value, options: &EditorOptions) -> Normalized {
    let mut normalizer = Normalizer::new(options);
    let document = normalizer.normalize_document(raw);
    normalizer.finish(document)
}

// ── Field helpers ─────────────────────────────────────────────────────────

fn text(raw: Option<&Value>) -> String {
    match raw {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// `true` for a JSON `true` or the string `"true"`.
fn flag(raw: Option<&Value>) -> bool {
    match raw {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        _ => false,
    }
}

fn object(raw: Option<&Value>) -> Option<&Map<String, Value>> {
    raw.and_then(Value::as_object)
}

fn present(raw: Option<&Value>) -> Option<Value> {
    raw.filter(|v| !v.is_null()).cloned()
}

/// First value of an `examples` map, unwrapping `{value: ..}` entries.
fn first_example(raw: Option<&Value>) -> Option<Value> {
    let (_, first) = object(raw)?.iter().next()?;
    match first.get("value") {
        Some(value) => present(Some(value)),
        None => present(Some(first)),
    }
}

/// `key` from the explicit body, else from the legacy parameter.
fn pick_field<'v>(
    explicit: Option<&'v Value>,
    legacy: Option<&'v Value>,
    key: &str,
) -> Option<&'v Value> {
    let field = |body: Option<&'v Value>| {
        body.and_then(|b| b.get(key))
            .filter(|v| !v.is_null())
    };
    field(explicit).or_else(|| field(legacy))
}

fn is_legacy_body(raw: &Value) -> bool {
    raw.get("in")
        .and_then(Value::as_str)
        .is_some_and(|loc| LEGACY_BODY_LOCATIONS.contains(&loc))
}

// ── Normalizer ────────────────────────────────────────────────────────────

pub struct Normalizer<'a> {
    options: &'a EditorOptions,
    warnings: Vec<NormalizeWarning>,
    next_endpoint_id: EndpointId,
}

impl<'a> Normalizer<'a> {
    pub fn new(options: &'a EditorOptions) -> Self {
        Self {
            options,
            warnings: Vec::new(),
            next_endpoint_id: 1,
        }
    }

    pub fn finish(self, document: Document) -> Normalized {
        Normalized {
            document,
            warnings: self.warnings,
        }
    }

    fn warn(&mut self, warning: NormalizeWarning) {
        warn!(%warning, "normalize");
        self.warnings.push(warning);
    }

    pub fn normalize_document(&mut self, raw: &Value) -> Document {
        let (header, endpoints) = match raw {
            Value::Object(map) => (Some(map), map.get("endpoints")),
            Value::Array(_) => (None, Some(raw)),
            Value::Null => (None, None),
            other => {
                self.warn(NormalizeWarning::MalformedBootstrap(format!(
                    "expected an object or array, got {other}"
                )));
                (None, None)
            }
        };
        let endpoints = endpoints
            .and_then(Value::as_array)
            .map(|list| list.iter().map(|ep| self.normalize_endpoint(ep)).collect())
            .unwrap_or_default();
        Document {
            title: text(header.and_then(|h| h.get("title"))),
            version: text(header.and_then(|h| h.get("version"))),
            endpoints,
        }
    }

    /// Normalize one endpoint, assigning it the next session id.
    ///
    /// The first legacy body parameter seeds the request body; any further
    /// ones are dropped with a warning.
    pub fn normalize_endpoint(&mut self, raw: &Value) -> Endpoint {
        let id = self.next_endpoint_id;
        self.next_endpoint_id += 1;

        let method = match raw.get("method").and_then(Value::as_str) {
            None => HttpMethod::Get,
            Some(m) if m.trim().is_empty() => HttpMethod::Get,
            Some(m) => m.parse().unwrap_or_else(|_| {
                self.warn(NormalizeWarning::UnknownMethod(m.to_string()));
                HttpMethod::Get
            }),
        };
        let path = text(raw.get("path"));

        let tags = match raw.get("tags") {
            Some(Value::Array(list)) => list
                .iter()
                .map(|t| text(Some(t)).trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            Some(Value::String(s)) => split_list(s),
            _ => Vec::new(),
        };

        let mut legacy_body: Option<&Value> = None;
        let mut dropped = 0;
        let mut params = Vec::new();
        let mut next_param: ParamId = 1;
        for raw_param in raw.get("params").and_then(Value::as_array).into_iter().flatten() {
            if is_legacy_body(raw_param) {
                if legacy_body.is_none() {
                    legacy_body = Some(raw_param);
                } else {
                    dropped += 1;
                }
                continue;
            }
            params.push(self.normalize_param(raw_param, next_param));
            next_param += 1;
        }
        if dropped > 0 {
            self.warn(NormalizeWarning::ExtraBodyParams {
                endpoint: path.clone(),
                dropped,
            });
        }

        let explicit_body = raw.get("requestBody").filter(|b| b.is_object());
        let request_body = self.normalize_request_body(explicit_body, legacy_body);
        let responses = self.normalize_responses(raw.get("responses"));

        Endpoint {
            id,
            method,
            path,
            summary: text(raw.get("summary")),
            tags,
            params,
            request_body,
            responses,
        }
    }

    /// Normalize a parameter. Legacy body locations become `query`.
    pub fn normalize_param(&mut self, raw: &Value, id: ParamId) -> Param {
        let raw_location = raw.get("in").and_then(Value::as_str).unwrap_or_default();
        let legacy = LEGACY_BODY_LOCATIONS.contains(&raw_location);
        let location = match raw_location {
            "" => ParamLocation::Query,
            _ if legacy => ParamLocation::Query,
            loc => loc.parse().unwrap_or_else(|_| {
                self.warn(NormalizeWarning::UnknownLocation(loc.to_string()));
                ParamLocation::Query
            }),
        };
        let fallback = if legacy {
            SchemaType::Object
        } else {
            SchemaType::String
        };
        let mut param = Param {
            id,
            location,
            name: text(raw.get("name")),
            required: false,
            description: text(raw.get("description")),
            schema: self.normalize_schema_node(raw.get("schema"), fallback),
            example: present(raw.get("example")),
        };
        param.set_required(flag(raw.get("required")));
        param
    }

    /// Merge an explicit `requestBody` with a legacy body parameter.
    ///
    /// Explicit fields win. With neither present the body is disabled.
    pub fn normalize_request_body(
        &mut self,
        explicit: Option<&Value>,
        legacy: Option<&Value>,
    ) -> RequestBody {
        if explicit.is_none() && legacy.is_none() {
            return RequestBody::with_content_type(&self.options.default_content_type);
        }
        let pick = |key: &str| pick_field(explicit, legacy, key);

        let content = object(explicit.and_then(|b| b.get("content")));
        let content_type = pick("contentType")
            .and_then(Value::as_str)
            .filter(|ct| !ct.is_empty())
            .map(str::to_string)
            .or_else(|| content.and_then(|c| c.keys().next().cloned()))
            .unwrap_or_else(|| self.options.default_content_type.clone());
        let media = content.and_then(|c| c.get(&content_type));

        let raw_schema = media.and_then(|m| m.get("schema")).or_else(|| pick("schema"));
        let example = present(media.and_then(|m| m.get("example")))
            .or_else(|| first_example(media.and_then(|m| m.get("examples"))))
            .or_else(|| present(pick("example")));
        let enabled = match explicit.and_then(|b| b.get("enabled")) {
            Some(v) => flag(Some(v)),
            None => true,
        };
        let required = flag(pick("required"));
        let description = text(pick("description"));

        RequestBody {
            enabled,
            required,
            description,
            content_type,
            schema: self.normalize_schema_node(raw_schema, SchemaType::Object),
            example,
        }
    }

    /// Normalize a schema tree.
    ///
    /// A missing or unknown `type` is inferred from `properties` or `items`,
    /// else `fallback` is used. `required` keeps only names of existing
    /// properties, each once.
    pub fn normalize_schema_node(
        &mut self,
        raw: Option<&Value>,
        fallback: SchemaType,
    ) -> SchemaNode {
        let Some(map) = object(raw) else {
            return SchemaNode::new(fallback);
        };
        let inferred = if map.contains_key("properties") {
            SchemaType::Object
        } else if map.contains_key("items") {
            SchemaType::Array
        } else {
            fallback
        };
        let ty = match map.get("type").and_then(Value::as_str) {
            None => inferred,
            Some(t) => t.parse().unwrap_or_else(|_| {
                self.warn(NormalizeWarning::UnknownSchemaType(t.to_string()));
                inferred
            }),
        };
        let collapsed = flag(map.get(&self.options.collapsed_key()));

        let kind = match ty {
            SchemaType::Object => {
                let mut properties = IndexMap::new();
                for (name, child) in object(map.get("properties")).into_iter().flatten() {
                    let node = self.normalize_schema_node(Some(child), SchemaType::String);
                    properties.insert(name.clone(), node);
                }
                let mut seen = HashSet::new();
                let required = map
                    .get("required")
                    .and_then(Value::as_array)
                    .into_iter()
                    .flatten()
                    .filter_map(Value::as_str)
                    .filter(|name| properties.contains_key(*name) && seen.insert(*name))
                    .map(str::to_string)
                    .collect();
                SchemaKind::Object(ObjectSchema {
                    properties,
                    required,
                })
            }
            SchemaType::Array => SchemaKind::Array(ArraySchema {
                items: Box::new(self.normalize_schema_node(map.get("items"), SchemaType::String)),
                min_items: map.get("minItems").and_then(Value::as_u64),
                max_items: map.get("maxItems").and_then(Value::as_u64),
                unique_items: flag(map.get("uniqueItems")),
            }),
            scalar => {
                let meta = ScalarSchema {
                    description: text(map.get("description")),
                    default: present(map.get("default")),
                    format: text(map.get("format")),
                    pattern: text(map.get("pattern")),
                    min_length: map.get("minLength").and_then(Value::as_u64),
                    max_length: map.get("maxLength").and_then(Value::as_u64),
                    enum_values: map
                        .get("enum")
                        .and_then(Value::as_array)
                        .cloned()
                        .unwrap_or_default(),
                };
                match scalar.scalar() {
                    Some(st) => SchemaKind::Scalar(st, meta),
                    None => SchemaKind::default_for(scalar),
                }
            }
        };
        SchemaNode { kind, collapsed }
    }

    pub fn normalize_responses(&mut self, raw: Option<&Value>) -> IndexMap<String, Response> {
        object(raw)
            .into_iter()
            .flatten()
            .map(|(code, response)| (code.clone(), self.normalize_response(response)))
            .collect()
    }

    pub fn normalize_response(&mut self, raw: &Value) -> Response {
        let content = object(raw.get("content"))
            .into_iter()
            .flatten()
            .map(|(ct, media)| (ct.clone(), self.normalize_response_content(media)))
            .collect();
        Response {
            description: text(raw.get("description")),
            content,
            headers: present(raw.get("headers")),
            links: present(raw.get("links")),
        }
    }

    /// A singular `example` becomes an example named `default` when the
    /// entry has no `examples` of its own.
    pub fn normalize_response_content(&mut self, raw: &Value) -> MediaContent {
        let schema = self.normalize_schema_node(raw.get("schema"), SchemaType::Object);
        let mut examples = normalize_examples(raw.get("examples"));
        if examples.is_empty() {
            if let Some(value) = present(raw.get("example")) {
                examples.insert(
                    "default".to_string(),
                    NamedExample {
                        summary: String::new(),
                        value,
                    },
                );
            }
        }
        MediaContent { schema, examples }
    }
}

/// Every example gets a `value`, defaulting to `{}`.
pub fn normalize_examples(raw: Option<&Value>) -> IndexMap<String, NamedExample> {
    object(raw)
        .into_iter()
        .flatten()
        .map(|(name, example)| {
            let value =
                present(example.get("value")).unwrap_or_else(|| Value::Object(Map::new()));
            let normalized = NamedExample {
                summary: text(example.get("summary")),
                value,
            };
            (name.clone(), normalized)
        })
        .collect()
}
