//! The editing session.
//!
//! One [`EditorSession`] per loaded document. It owns the [`Document`],
//! exposes every edit as a method, and after each applied edit re-serializes
//! the preview and asks the host to re-render.
//!
//! Every edit returns `Result<Outcome, EditError>`. Errors are reported to
//! the host's [`notify`](EditorHost::notify) before they are returned, so a
//! caller that only cares about the UI may ignore them.

use std::fmt;

use serde_json::Value;
use tracing::{debug, error, info};

use apidocs_path::decode;

use crate::context::ContextKey;
use crate::error::{EditError, Outcome};
use crate::host::{
    DocumentStore, DownloadLink, EditorHost, LogHost, NoticeLevel, SaveReceipt, SaveRequest,
};
use crate::model::{
    Document, Endpoint, EndpointId, ExampleKind, ObjectSchema, Param, ParamId, SchemaNode,
    SchemaType,
};
use crate::normalize::{normalize_document, parse_bootstrap, Normalized};
use crate::openapi::to_openapi;
use crate::ops;
use crate::ops::endpoint::{EndpointField, ParamField, RequestBodyField};
use crate::ops::schema::SchemaField;
use crate::options::EditorOptions;
use crate::resolve::{
    example_root, example_root_mut, locate_example, locate_schema, locate_schema_mut,
    locate_schema_or_create, named_example_mut, schema_root, schema_root_mut, split_property,
};
use crate::serialize::serialize_document;

/// How a schema edit walks its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Walk {
    /// Fill in a missing last node. It is dropped again unless the edit
    /// applies.
    Create,
    Existing,
}

pub struct EditorSession<H: EditorHost = LogHost> {
    document: Document,
    options: EditorOptions,
    host: H,
    next_endpoint_id: EndpointId,
    next_param_id: ParamId,
    project_idx: Option<u64>,
    docs_idx: Option<u64>,
    preview: Value,
}

impl Default for EditorSession<LogHost> {
    fn default() -> Self {
        Self::new(LogHost)
    }
}

impl<H: EditorHost> EditorSession<H> {
    /// Session over an empty document with default options.
    pub fn new(host: H) -> Self {
        Self::with_options(host, EditorOptions::default())
    }

    pub fn with_options(host: H, options: EditorOptions) -> Self {
        Self::from_document(host, options, Document::default())
    }

    /// Session over an already normalized document.
    pub fn from_document(host: H, options: EditorOptions, document: Document) -> Self {
        let next_endpoint_id = document.next_endpoint_id();
        let next_param_id = document
            .endpoints
            .iter()
            .map(Endpoint::next_param_id)
            .max()
            .unwrap_or(1);
        let preview = serialize_document(&document, &options);
        Self {
            document,
            options,
            host,
            next_endpoint_id,
            next_param_id,
            project_idx: None,
            docs_idx: None,
            preview,
        }
    }

    /// Session over a bootstrap payload. Absent or malformed input gives an
    /// empty document; normalizer warnings are passed to the host.
    pub fn from_bootstrap(host: H, options: EditorOptions, raw: Option<&str>) -> Self {
        let normalized = parse_bootstrap(raw, &options);
        Self::from_normalized(host, options, normalized)
    }

    /// Like [`from_bootstrap`](Self::from_bootstrap) for already parsed JSON.
    pub fn from_value(host: H, options: EditorOptions, raw: &Value) -> Self {
        let normalized = normalize_document(raw, &options);
        Self::from_normalized(host, options, normalized)
    }

    fn from_normalized(host: H, options: EditorOptions, normalized: Normalized) -> Self {
        let Normalized { document, warnings } = normalized;
        let mut session = Self::from_document(host, options, document);
        for warning in &warnings {
            session.host.notify(NoticeLevel::Warning, &warning.to_string());
        }
        session
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Export document as of the last applied edit.
    pub fn preview(&self) -> &Value {
        &self.preview
    }

    pub fn identifiers(&self) -> (Option<u64>, Option<u64>) {
        (self.project_idx, self.docs_idx)
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    // ── Plumbing ──────────────────────────────────────────────────────────

    fn refresh(&mut self) {
        self.preview = serialize_document(&self.document, &self.options);
        self.host.render(&self.document);
        self.host.show_preview(&self.preview);
    }

    fn finish(
        &mut self,
        op: &'static str,
        target: impl fmt::Display,
        result: Result<Outcome, EditError>,
    ) -> Result<Outcome, EditError> {
        match &result {
            Ok(Outcome::Applied) => {
                debug!(op, %target, "applied");
                self.refresh();
            }
            Ok(Outcome::Stale) => debug!(op, %target, "target no longer exists"),
            Ok(Outcome::Cancelled) => debug!(op, %target, "cancelled"),
            Err(err) => {
                debug!(op, %target, %err, "rejected");
                self.host.notify(NoticeLevel::Error, &err.to_string());
            }
        }
        result
    }

    fn report<T>(&mut self, result: Result<T, EditError>) -> Result<T, EditError> {
        if let Err(err) = &result {
            self.host.notify(NoticeLevel::Error, &err.to_string());
        }
        result
    }

    fn confirm(&mut self, message: &str) -> bool {
        !self.options.confirm_destructive || self.host.confirm(message)
    }

    fn with_endpoint<F>(&mut self, id: EndpointId, f: F) -> Result<Outcome, EditError>
    where
        F: FnOnce(&mut Endpoint, &EditorOptions) -> Result<Outcome, EditError>,
    {
        match self.document.endpoint_mut(id) {
            Some(ep) => f(ep, &self.options),
            None => Ok(Outcome::Stale),
        }
    }

    fn edit_schema<F>(
        &mut self,
        key: &ContextKey,
        path: &str,
        walk: Walk,
        f: F,
    ) -> Result<Outcome, EditError>
    where
        F: FnOnce(&mut SchemaNode, &EditorOptions) -> Result<Outcome, EditError>,
    {
        if key.is_example() {
            return Err(EditError::InvalidContextKey(key.encode()));
        }
        let steps = decode(path)?;
        let snapshot = match (walk, schema_root(&self.document, key)) {
            (Walk::Create, Some(root)) if locate_schema(root, &steps).is_none() => {
                Some(root.clone())
            }
            _ => None,
        };
        let Some(root) = schema_root_mut(&mut self.document, key) else {
            return Ok(Outcome::Stale);
        };
        let node = match walk {
            Walk::Create => locate_schema_or_create(root, &steps),
            Walk::Existing => locate_schema_mut(root, &steps),
        };
        let result = match node {
            Some(node) => f(node, &self.options),
            None => Ok(Outcome::Stale),
        };
        if let Some(before) = snapshot {
            if result != Ok(Outcome::Applied) {
                if let Some(root) = schema_root_mut(&mut self.document, key) {
                    *root = before;
                }
            }
        }
        result
    }

    /// Resolve the object owning the property at `path` and pass it with the
    /// property name.
    fn edit_property<F>(
        &mut self,
        key: &ContextKey,
        path: &str,
        f: F,
    ) -> Result<Outcome, EditError>
    where
        F: FnOnce(&mut ObjectSchema, &str) -> Result<Outcome, EditError>,
    {
        if key.is_example() {
            return Err(EditError::InvalidContextKey(key.encode()));
        }
        let steps = decode(path)?;
        let Some((parent, name)) = split_property(&steps) else {
            return Ok(Outcome::Stale);
        };
        let Some(root) = schema_root_mut(&mut self.document, key) else {
            return Ok(Outcome::Stale);
        };
        match locate_schema_mut(root, parent).and_then(SchemaNode::as_object_mut) {
            Some(obj) => f(obj, name),
            None => Ok(Outcome::Stale),
        }
    }

    /// The tree is put back as it was unless the edit writes: an applied
    /// edit, or a number slot reset after bad input.
    fn edit_example<F>(
        &mut self,
        key: &ContextKey,
        path: &str,
        f: F,
    ) -> Result<Outcome, EditError>
    where
        F: FnOnce(&mut Value, &[String], &EditorOptions) -> Result<Outcome, EditError>,
    {
        if !key.is_example() {
            return Err(EditError::InvalidContextKey(key.encode()));
        }
        let steps = decode(path)?;
        let snapshot = match example_root(&self.document, key) {
            Some(root) if locate_example(root, &steps).is_some() => None,
            root => Some(root.cloned()),
        };
        let result = match example_root_mut(&mut self.document, key) {
            Some(root) => f(root, &steps, &self.options),
            None => Ok(Outcome::Stale),
        };
        let wrote = matches!(result, Ok(Outcome::Applied) | Err(EditError::InvalidNumber(_)));
        if let (Some(before), false) = (snapshot, wrote) {
            self.restore_example(key, before);
        }
        result
    }

    fn restore_example(&mut self, key: &ContextKey, before: Option<Value>) {
        match (key, before) {
            (ContextKey::RequestExample { endpoint }, before) => {
                if let Some(ep) = self.document.endpoint_mut(*endpoint) {
                    ep.request_body.example = before;
                }
            }
            (_, Some(before)) => {
                if let Some(root) = example_root_mut(&mut self.document, key) {
                    *root = before;
                }
            }
            (_, None) => {}
        }
    }

    // ── Document header ───────────────────────────────────────────────────

    pub fn set_title(&mut self, title: &str) -> Result<Outcome, EditError> {
        self.document.title = title.to_string();
        self.finish("set_title", "document", Ok(Outcome::Applied))
    }

    pub fn set_version(&mut self, version: &str) -> Result<Outcome, EditError> {
        self.document.version = version.to_string();
        self.finish("set_version", "document", Ok(Outcome::Applied))
    }

    /// Project and document identifiers sent along with saves.
    pub fn set_identifiers(&mut self, project_idx: Option<u64>, docs_idx: Option<u64>) {
        self.project_idx = project_idx;
        self.docs_idx = docs_idx;
    }

    // ── Endpoints ─────────────────────────────────────────────────────────

    /// Append a blank `GET` endpoint and return its id.
    pub fn add_endpoint(&mut self) -> EndpointId {
        let id = self.next_endpoint_id;
        self.next_endpoint_id += 1;
        let mut endpoint = Endpoint::new(id);
        endpoint.request_body.content_type = self.options.default_content_type.clone();
        self.document.endpoints.push(endpoint);
        debug!(op = "add_endpoint", target = %format_args!("endpoint {id}"), "applied");
        self.refresh();
        id
    }

    pub fn remove_endpoint(&mut self, id: EndpointId) -> Result<Outcome, EditError> {
        let Some(ep) = self.document.endpoint(id) else {
            let result = Ok(Outcome::Stale);
            return self.finish("remove_endpoint", format_args!("endpoint {id}"), result);
        };
        let prompt = format!("Remove endpoint {} {}?", ep.method, ep.path);
        let result = if self.confirm(&prompt) {
            self.document.endpoints.retain(|e| e.id != id);
            Ok(Outcome::Applied)
        } else {
            Ok(Outcome::Cancelled)
        };
        self.finish("remove_endpoint", format_args!("endpoint {id}"), result)
    }

    pub fn update_endpoint(
        &mut self,
        id: EndpointId,
        field: EndpointField,
    ) -> Result<Outcome, EditError> {
        let result = self.with_endpoint(id, |ep, _| {
            ops::endpoint::update_endpoint(ep, field);
            Ok(Outcome::Applied)
        });
        self.finish("update_endpoint", format_args!("endpoint {id}"), result)
    }

    // ── Parameters ────────────────────────────────────────────────────────

    /// Append a blank query parameter. `None` if the endpoint is gone.
    pub fn add_param(&mut self, endpoint: EndpointId) -> Option<ParamId> {
        let param = self.next_param_id;
        let ep = self.document.endpoint_mut(endpoint)?;
        ep.params.push(Param::new(param));
        self.next_param_id += 1;
        debug!(
            op = "add_param",
            target = %format_args!("endpoint {endpoint} param {param}"),
            "applied"
        );
        self.refresh();
        Some(param)
    }

    /// Removing a parameter that is already gone is a no-op.
    pub fn remove_param(
        &mut self,
        endpoint: EndpointId,
        param: ParamId,
    ) -> Result<Outcome, EditError> {
        let target = format!("endpoint {endpoint} param {param}");
        let existing = self.document.endpoint(endpoint).and_then(|ep| ep.param(param));
        let Some(existing) = existing else {
            return self.finish("remove_param", target, Ok(Outcome::Stale));
        };
        let prompt = format!("Remove parameter {:?}?", existing.name);
        let result = if !self.confirm(&prompt) {
            Ok(Outcome::Cancelled)
        } else {
            self.with_endpoint(endpoint, |ep, _| {
                ep.params.retain(|p| p.id != param);
                Ok(Outcome::Applied)
            })
        };
        self.finish("remove_param", target, result)
    }

    pub fn update_param(
        &mut self,
        endpoint: EndpointId,
        param: ParamId,
        field: ParamField,
    ) -> Result<Outcome, EditError> {
        let result = self.with_endpoint(endpoint, |ep, _| match ep.param_mut(param) {
            Some(p) => ops::endpoint::update_param(p, field).map(|()| Outcome::Applied),
            None => Ok(Outcome::Stale),
        });
        self.finish(
            "update_param",
            format_args!("endpoint {endpoint} param {param}"),
            result,
        )
    }

    // ── Request body ──────────────────────────────────────────────────────

    pub fn set_request_body_enabled(
        &mut self,
        endpoint: EndpointId,
        enabled: bool,
    ) -> Result<Outcome, EditError> {
        let result = self.with_endpoint(endpoint, |ep, _| {
            ep.request_body.enabled = enabled;
            Ok(Outcome::Applied)
        });
        self.finish(
            "set_request_body_enabled",
            format_args!("endpoint {endpoint}"),
            result,
        )
    }

    pub fn update_request_body(
        &mut self,
        endpoint: EndpointId,
        field: RequestBodyField,
    ) -> Result<Outcome, EditError> {
        let result = self.with_endpoint(endpoint, |ep, _| {
            ops::endpoint::update_request_body(&mut ep.request_body, field)
                .map(|()| Outcome::Applied)
        });
        self.finish("update_request_body", format_args!("endpoint {endpoint}"), result)
    }

    // ── Responses ─────────────────────────────────────────────────────────

    /// Add a response with one entry of the default content type.
    pub fn add_response(&mut self, endpoint: EndpointId, code: &str) -> Result<Outcome, EditError> {
        let result = self.with_endpoint(endpoint, |ep, options| {
            ops::response::add_response(ep, code, &options.default_content_type)
                .map(|()| Outcome::Applied)
        });
        self.finish(
            "add_response",
            format_args!("endpoint {endpoint} response {code}"),
            result,
        )
    }

    pub fn remove_response(
        &mut self,
        endpoint: EndpointId,
        code: &str,
    ) -> Result<Outcome, EditError> {
        let target = format!("endpoint {endpoint} response {code}");
        let exists = self
            .document
            .endpoint(endpoint)
            .is_some_and(|ep| ep.responses.contains_key(code));
        let result = if !exists {
            Ok(Outcome::Stale)
        } else if !self.confirm(&format!("Remove response {code}?")) {
            Ok(Outcome::Cancelled)
        } else {
            self.with_endpoint(endpoint, |ep, _| Ok(ops::response::remove_response(ep, code)))
        };
        self.finish("remove_response", target, result)
    }

    pub fn update_response_description(
        &mut self,
        endpoint: EndpointId,
        code: &str,
        description: &str,
    ) -> Result<Outcome, EditError> {
        let result = self.with_endpoint(endpoint, |ep, _| match ep.responses.get_mut(code) {
            Some(r) => {
                r.description = description.to_string();
                Ok(Outcome::Applied)
            }
            None => Ok(Outcome::Stale),
        });
        self.finish(
            "update_response_description",
            format_args!("endpoint {endpoint} response {code}"),
            result,
        )
    }

    pub fn rename_response_code(
        &mut self,
        endpoint: EndpointId,
        from: &str,
        to: &str,
    ) -> Result<Outcome, EditError> {
        let result = self.with_endpoint(endpoint, |ep, _| {
            ops::response::rename_response_code(ep, from, to)
        });
        self.finish(
            "rename_response_code",
            format_args!("endpoint {endpoint} response {from}"),
            result,
        )
    }

    pub fn add_content_type(
        &mut self,
        endpoint: EndpointId,
        code: &str,
        content_type: &str,
    ) -> Result<Outcome, EditError> {
        let result = self.with_endpoint(endpoint, |ep, _| match ep.responses.get_mut(code) {
            Some(r) => {
                ops::response::add_content_type(r, content_type).map(|()| Outcome::Applied)
            }
            None => Ok(Outcome::Stale),
        });
        self.finish(
            "add_content_type",
            format_args!("endpoint {endpoint} response {code}"),
            result,
        )
    }

    pub fn rename_content_type(
        &mut self,
        endpoint: EndpointId,
        code: &str,
        from: &str,
        to: &str,
    ) -> Result<Outcome, EditError> {
        let result = self.with_endpoint(endpoint, |ep, _| match ep.responses.get_mut(code) {
            Some(r) => ops::response::rename_content_type(r, from, to),
            None => Ok(Outcome::Stale),
        });
        self.finish(
            "rename_content_type",
            format_args!("endpoint {endpoint} response {code} {from}"),
            result,
        )
    }

    /// Refused for the last content type of a response.
    pub fn remove_content_type(
        &mut self,
        endpoint: EndpointId,
        code: &str,
        content_type: &str,
    ) -> Result<Outcome, EditError> {
        let result = self.with_endpoint(endpoint, |ep, _| match ep.responses.get_mut(code) {
            Some(r) => ops::response::remove_content_type(r, content_type),
            None => Ok(Outcome::Stale),
        });
        self.finish(
            "remove_content_type",
            format_args!("endpoint {endpoint} response {code} {content_type}"),
            result,
        )
    }

    // ── Response examples ─────────────────────────────────────────────────

    pub fn add_response_example(
        &mut self,
        endpoint: EndpointId,
        code: &str,
        content_type: &str,
        name: &str,
    ) -> Result<Outcome, EditError> {
        let result = self.with_endpoint(endpoint, |ep, _| {
            match ep
                .responses
                .get_mut(code)
                .and_then(|r| r.content.get_mut(content_type))
            {
                Some(media) => ops::response::add_example(media, name).map(|()| Outcome::Applied),
                None => Ok(Outcome::Stale),
            }
        });
        self.finish(
            "add_response_example",
            format_args!("endpoint {endpoint} response {code} {content_type}"),
            result,
        )
    }

    pub fn rename_response_example(
        &mut self,
        key: &ContextKey,
        to: &str,
    ) -> Result<Outcome, EditError> {
        let result = match key {
            ContextKey::ResponseExample {
                endpoint,
                code,
                content_type,
                example,
            } => self.with_endpoint(*endpoint, |ep, _| {
                match ep
                    .responses
                    .get_mut(code)
                    .and_then(|r| r.content.get_mut(content_type))
                {
                    Some(media) => ops::response::rename_example(media, example, to),
                    None => Ok(Outcome::Stale),
                }
            }),
            _ => Err(EditError::InvalidContextKey(key.encode())),
        };
        self.finish("rename_response_example", key, result)
    }

    pub fn remove_response_example(&mut self, key: &ContextKey) -> Result<Outcome, EditError> {
        let ContextKey::ResponseExample {
            endpoint,
            code,
            content_type,
            example,
        } = key
        else {
            let result = Err(EditError::InvalidContextKey(key.encode()));
            return self.finish("remove_response_example", key, result);
        };
        let exists = self
            .document
            .endpoint(*endpoint)
            .and_then(|ep| ep.responses.get(code))
            .and_then(|r| r.content.get(content_type))
            .is_some_and(|media| media.examples.contains_key(example));
        let result = if !exists {
            Ok(Outcome::Stale)
        } else if !self.confirm(&format!("Remove example {example:?}?")) {
            Ok(Outcome::Cancelled)
        } else {
            self.with_endpoint(*endpoint, |ep, _| {
                match ep
                    .responses
                    .get_mut(code)
                    .and_then(|r| r.content.get_mut(content_type))
                {
                    Some(media) => Ok(ops::response::remove_example(media, example)),
                    None => Ok(Outcome::Stale),
                }
            })
        };
        self.finish("remove_response_example", key, result)
    }

    pub fn update_example_summary(
        &mut self,
        key: &ContextKey,
        summary: &str,
    ) -> Result<Outcome, EditError> {
        let result = if matches!(key, ContextKey::ResponseExample { .. }) {
            match named_example_mut(&mut self.document, key) {
                Some(example) => {
                    ops::response::update_example_summary(example, summary);
                    Ok(Outcome::Applied)
                }
                None => Ok(Outcome::Stale),
            }
        } else {
            Err(EditError::InvalidContextKey(key.encode()))
        };
        self.finish("update_example_summary", key, result)
    }

    // ── Schema trees ──────────────────────────────────────────────────────

    /// Change the type of the node at `path`, discarding foreign fields.
    pub fn set_schema_type(
        &mut self,
        key: &ContextKey,
        path: &str,
        ty: SchemaType,
    ) -> Result<Outcome, EditError> {
        let result = self.edit_schema(key, path, Walk::Create, |node, _| {
            ops::schema::prepare_schema_for_type(node, ty);
            Ok(Outcome::Applied)
        });
        self.finish("set_schema_type", format_args!("{key} {path}"), result)
    }

    /// Add a placeholder property to the object node at `path`.
    pub fn add_property(&mut self, key: &ContextKey, path: &str) -> Result<Outcome, EditError> {
        let result = self.edit_schema(key, path, Walk::Existing, |node, options| {
            match node.as_object_mut() {
                Some(obj) => {
                    ops::schema::add_property(obj, &options.property_prefix);
                    Ok(Outcome::Applied)
                }
                None => Ok(Outcome::Stale),
            }
        });
        self.finish("add_property", format_args!("{key} {path}"), result)
    }

    /// Rename the property at `path` (ending in `properties.<name>`).
    pub fn rename_property(
        &mut self,
        key: &ContextKey,
        path: &str,
        to: &str,
    ) -> Result<Outcome, EditError> {
        let result = self.edit_property(key, path, |obj, name| {
            ops::schema::rename_property(obj, name, to)
        });
        self.finish("rename_property", format_args!("{key} {path}"), result)
    }

    pub fn remove_property(&mut self, key: &ContextKey, path: &str) -> Result<Outcome, EditError> {
        let result = self.edit_property(key, path, |obj, name| {
            Ok(ops::schema::remove_property(obj, name))
        });
        self.finish("remove_property", format_args!("{key} {path}"), result)
    }

    pub fn toggle_required(&mut self, key: &ContextKey, path: &str) -> Result<Outcome, EditError> {
        let result = self.edit_property(key, path, |obj, name| {
            Ok(ops::schema::toggle_required(obj, name))
        });
        self.finish("toggle_required", format_args!("{key} {path}"), result)
    }

    pub fn set_schema_field(
        &mut self,
        key: &ContextKey,
        path: &str,
        field: SchemaField,
    ) -> Result<Outcome, EditError> {
        let result = self.edit_schema(key, path, Walk::Create, |node, _| {
            ops::schema::set_schema_field(node, field).map(|()| Outcome::Applied)
        });
        self.finish("set_schema_field", format_args!("{key} {path}"), result)
    }

    pub fn toggle_collapsed(&mut self, key: &ContextKey, path: &str) -> Result<Outcome, EditError> {
        let result = self.edit_schema(key, path, Walk::Create, |node, _| {
            node.collapsed = !node.collapsed;
            Ok(Outcome::Applied)
        });
        self.finish("toggle_collapsed", format_args!("{key} {path}"), result)
    }

    pub fn reset_array_items(
        &mut self,
        key: &ContextKey,
        path: &str,
    ) -> Result<Outcome, EditError> {
        let result = self.edit_schema(key, path, Walk::Existing, |node, _| {
            Ok(ops::schema::reset_array_items(node))
        });
        self.finish("reset_array_items", format_args!("{key} {path}"), result)
    }

    // ── Example trees ─────────────────────────────────────────────────────

    pub fn set_example_type(
        &mut self,
        key: &ContextKey,
        path: &str,
        kind: ExampleKind,
    ) -> Result<Outcome, EditError> {
        let result = self.edit_example(key, path, |root, steps, _| {
            Ok(ops::example::set_example_type(root, steps, kind))
        });
        self.finish("set_example_type", format_args!("{key} {path}"), result)
    }

    /// Store raw text in the slot at `path`, coerced by the slot's variant.
    ///
    /// Non-numeric text for a number slot stores `0`, refreshes the preview
    /// and returns [`EditError::InvalidNumber`].
    pub fn set_example_value(
        &mut self,
        key: &ContextKey,
        path: &str,
        raw: &str,
    ) -> Result<Outcome, EditError> {
        let result = self.edit_example(key, path, |root, steps, _| {
            ops::example::set_example_value(root, steps, raw)
        });
        if let Err(EditError::InvalidNumber(_)) = &result {
            self.refresh();
        }
        self.finish("set_example_value", format_args!("{key} {path}"), result)
    }

    pub fn add_example_key(&mut self, key: &ContextKey, path: &str) -> Result<Outcome, EditError> {
        let result = self.edit_example(key, path, |root, steps, options| {
            Ok(ops::example::add_example_key(root, steps, &options.property_prefix))
        });
        self.finish("add_example_key", format_args!("{key} {path}"), result)
    }

    pub fn rename_example_key(
        &mut self,
        key: &ContextKey,
        path: &str,
        to: &str,
    ) -> Result<Outcome, EditError> {
        let result = self.edit_example(key, path, |root, steps, _| {
            ops::example::rename_example_key(root, steps, to)
        });
        self.finish("rename_example_key", format_args!("{key} {path}"), result)
    }

    pub fn remove_example_key(
        &mut self,
        key: &ContextKey,
        path: &str,
    ) -> Result<Outcome, EditError> {
        let result = self.edit_example(key, path, |root, steps, _| {
            Ok(ops::example::remove_example_key(root, steps))
        });
        self.finish("remove_example_key", format_args!("{key} {path}"), result)
    }

    pub fn add_example_item(&mut self, key: &ContextKey, path: &str) -> Result<Outcome, EditError> {
        let result = self.edit_example(key, path, |root, steps, _| {
            Ok(ops::example::add_example_item(root, steps))
        });
        self.finish("add_example_item", format_args!("{key} {path}"), result)
    }

    pub fn remove_example_item(
        &mut self,
        key: &ContextKey,
        path: &str,
        index: usize,
    ) -> Result<Outcome, EditError> {
        let result = self.edit_example(key, path, |root, steps, _| {
            Ok(ops::example::remove_example_item(root, steps, index))
        });
        self.finish("remove_example_item", format_args!("{key} {path}[{index}]"), result)
    }

    // ── Save and export ───────────────────────────────────────────────────

    /// Export document of the current model.
    pub fn serialize(&self) -> Value {
        serialize_document(&self.document, &self.options)
    }

    pub fn openapi(&self) -> Value {
        to_openapi(&self.document, &self.options)
    }

    /// Check the document can be saved: non-blank title and version, at
    /// least one endpoint.
    pub fn validate(&self) -> Result<(), EditError> {
        if self.document.title.trim().is_empty() {
            return Err(EditError::MissingTitle);
        }
        if self.document.version.trim().is_empty() {
            return Err(EditError::MissingVersion);
        }
        if self.document.endpoints.is_empty() {
            return Err(EditError::NoEndpoints);
        }
        Ok(())
    }

    /// Validated payload for a [`DocumentStore`].
    pub fn save_request(&self) -> Result<SaveRequest, EditError> {
        self.validate()?;
        let document = match self.serialize() {
            Value::Object(map) => map,
            _ => Default::default(),
        };
        Ok(SaveRequest {
            project_idx: self.project_idx,
            docs_idx: self.docs_idx,
            document,
        })
    }

    /// Validate and persist. The model is never changed, whatever the
    /// outcome.
    pub fn save<S: DocumentStore>(&mut self, store: &mut S) -> Result<SaveReceipt, EditError> {
        let request = self.save_request();
        let request = self.report(request)?;
        match store.save(&request) {
            Ok(receipt) => {
                info!(project = ?request.project_idx, docs = ?request.docs_idx, "document saved");
                self.host.notify(NoticeLevel::Success, &receipt.message);
                Ok(receipt)
            }
            Err(err) => {
                error!(%err, "save failed");
                self.report(Err(err.into()))
            }
        }
    }

    /// Validate and request a downloadable rendering.
    pub fn export<S: DocumentStore>(&mut self, store: &mut S) -> Result<DownloadLink, EditError> {
        let request = self.save_request();
        let request = self.report(request)?;
        match store.render(&request) {
            Ok(link) => {
                info!(url = %link.url, filename = %link.filename, "document exported");
                Ok(link)
            }
            Err(err) => {
                error!(%err, "export failed");
                self.report(Err(err.into()))
            }
        }
    }
}
