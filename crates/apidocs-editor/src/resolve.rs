//! Context and path resolution.
//!
//! A [`ContextKey`] selects a tree root inside a [`Document`]; a decoded path
//! then walks that tree. The `_or_create` walks fill in a missing last node
//! and are meant for edits that write a value; they either reach the end of
//! the path or change nothing. The plain walks and their `_mut` variants
//! never add nodes and return `None` on a miss.
//!
//! A `None` from any function here means the context or path no longer
//! resolves, for example because the endpoint was removed earlier in the
//! session.

use apidocs_path::{parse_index, StepKind, PROPERTIES};
use serde_json::{Map, Value};

use crate::context::ContextKey;
use crate::model::{Document, Endpoint, MediaContent, NamedExample, SchemaKind, SchemaNode};

/// Longest example array a path walk will grow to.
pub const MAX_EXAMPLE_ARRAY_LEN: usize = 10_000;

// ── Context roots ─────────────────────────────────────────────────────────

fn media<'a>(endpoint: &'a Endpoint, code: &str, content_type: &str) -> Option<&'a MediaContent> {
    endpoint.responses.get(code)?.content.get(content_type)
}

fn media_mut<'a>(
    endpoint: &'a mut Endpoint,
    code: &str,
    content_type: &str,
) -> Option<&'a mut MediaContent> {
    endpoint.responses.get_mut(code)?.content.get_mut(content_type)
}

/// The response example a key points at, if it still exists.
pub fn named_example<'a>(doc: &'a Document, key: &ContextKey) -> Option<&'a NamedExample> {
    match key {
        ContextKey::ResponseExample {
            endpoint,
            code,
            content_type,
            example,
        } => media(doc.endpoint(*endpoint)?, code, content_type)?
            .examples
            .get(example),
        _ => None,
    }
}

pub fn named_example_mut<'a>(
    doc: &'a mut Document,
    key: &ContextKey,
) -> Option<&'a mut NamedExample> {
    match key {
        ContextKey::ResponseExample {
            endpoint,
            code,
            content_type,
            example,
        } => media_mut(doc.endpoint_mut(*endpoint)?, code, content_type)?
            .examples
            .get_mut(example),
        _ => None,
    }
}

/// Schema tree root for a schema context key.
pub fn schema_root<'a>(doc: &'a Document, key: &ContextKey) -> Option<&'a SchemaNode> {
    let endpoint = doc.endpoint(key.endpoint_id())?;
    match key {
        ContextKey::ParamSchema { param, .. } => endpoint.param(*param).map(|p| &p.schema),
        ContextKey::RequestSchema { .. } => Some(&endpoint.request_body.schema),
        ContextKey::ResponseSchema {
            code, content_type, ..
        } => media(endpoint, code, content_type).map(|m| &m.schema),
        ContextKey::RequestExample { .. } | ContextKey::ResponseExample { .. } => None,
    }
}

pub fn schema_root_mut<'a>(doc: &'a mut Document, key: &ContextKey) -> Option<&'a mut SchemaNode> {
    let endpoint = doc.endpoint_mut(key.endpoint_id())?;
    match key {
        ContextKey::ParamSchema { param, .. } => endpoint.param_mut(*param).map(|p| &mut p.schema),
        ContextKey::RequestSchema { .. } => Some(&mut endpoint.request_body.schema),
        ContextKey::ResponseSchema {
            code, content_type, ..
        } => media_mut(endpoint, code, content_type).map(|m| &mut m.schema),
        ContextKey::RequestExample { .. } | ContextKey::ResponseExample { .. } => None,
    }
}

/// Example tree root for an example context key.
///
/// An unset request-body example resolves to `None`.
pub fn example_root<'a>(doc: &'a Document, key: &ContextKey) -> Option<&'a Value> {
    match key {
        ContextKey::RequestExample { endpoint } => {
            doc.endpoint(*endpoint)?.request_body.example.as_ref()
        }
        ContextKey::ResponseExample { .. } => named_example(doc, key).map(|e| &e.value),
        _ => None,
    }
}

/// Like [`example_root`], but an unset request-body example is initialized
/// to `{}` first.
pub fn example_root_mut<'a>(doc: &'a mut Document, key: &ContextKey) -> Option<&'a mut Value> {
    match key {
        ContextKey::RequestExample { endpoint } => Some(
            doc.endpoint_mut(*endpoint)?
                .request_body
                .example
                .get_or_insert_with(|| Value::Object(Map::new())),
        ),
        ContextKey::ResponseExample { .. } => named_example_mut(doc, key).map(|e| &mut e.value),
        _ => None,
    }
}

// ── Schema paths ──────────────────────────────────────────────────────────

/// Whether [`locate_schema_or_create`] reaches the end of `path`.
///
/// A created node is a string node, so only the last property of a path may
/// be missing.
fn schema_reachable(root: &SchemaNode, path: &[String]) -> bool {
    let mut node = root;
    let mut steps = path.iter();
    while let Some(step) = steps.next() {
        node = match (&node.kind, StepKind::of(step)) {
            (SchemaKind::Object(obj), StepKind::Properties) => {
                let Some(name) = steps.next() else {
                    return false;
                };
                match obj.properties.get(name) {
                    Some(child) => child,
                    None => return steps.as_slice().is_empty(),
                }
            }
            (SchemaKind::Array(arr), StepKind::Items) => arr.items.as_ref(),
            _ => return false,
        };
    }
    true
}

/// Walk a schema path, creating a default string node for a missing last
/// property.
///
/// Object nodes accept `properties` followed by a name, array nodes accept
/// `items`. Any other step, or a step against a scalar node, is a miss. A
/// miss leaves the tree untouched.
pub fn locate_schema_or_create<'a>(
    root: &'a mut SchemaNode,
    path: &[String],
) -> Option<&'a mut SchemaNode> {
    if !schema_reachable(root, path) {
        return None;
    }
    let mut node = root;
    let mut steps = path.iter();
    while let Some(step) = steps.next() {
        node = match (&mut node.kind, StepKind::of(step)) {
            (SchemaKind::Object(obj), StepKind::Properties) => {
                let name = steps.next()?;
                obj.properties
                    .entry(name.clone())
                    .or_insert_with(SchemaNode::string)
            }
            (SchemaKind::Array(arr), StepKind::Items) => arr.items.as_mut(),
            _ => return None,
        };
    }
    Some(node)
}

/// Read-only counterpart of [`locate_schema_or_create`].
pub fn locate_schema<'a>(root: &'a SchemaNode, path: &[String]) -> Option<&'a SchemaNode> {
    let mut node = root;
    let mut steps = path.iter();
    while let Some(step) = steps.next() {
        node = match (&node.kind, StepKind::of(step)) {
            (SchemaKind::Object(obj), StepKind::Properties) => {
                obj.properties.get(steps.next()?)?
            }
            (SchemaKind::Array(arr), StepKind::Items) => arr.items.as_ref(),
            _ => return None,
        };
    }
    Some(node)
}

/// Like [`locate_schema`], but hands out the node mutably. Never creates.
pub fn locate_schema_mut<'a>(
    root: &'a mut SchemaNode,
    path: &[String],
) -> Option<&'a mut SchemaNode> {
    let mut node = root;
    let mut steps = path.iter();
    while let Some(step) = steps.next() {
        node = match (&mut node.kind, StepKind::of(step)) {
            (SchemaKind::Object(obj), StepKind::Properties) => {
                obj.properties.get_mut(steps.next()?)?
            }
            (SchemaKind::Array(arr), StepKind::Items) => arr.items.as_mut(),
            _ => return None,
        };
    }
    Some(node)
}

/// Split a property path `[.., "properties", name]` into the owning object
/// path and the property name.
pub fn split_property(path: &[String]) -> Option<(&[String], &str)> {
    match path {
        [parent @ .., marker, name] if marker == PROPERTIES => Some((parent, name.as_str())),
        _ => None,
    }
}

// ── Example paths ─────────────────────────────────────────────────────────

/// Whether [`locate_example_or_create`] reaches the end of `path`.
fn example_reachable(root: &Value, path: &[String]) -> bool {
    let mut value = root;
    for (i, step) in path.iter().enumerate() {
        let last = i + 1 == path.len();
        value = match value {
            Value::Object(map) => match map.get(step) {
                Some(child) => child,
                None => return last,
            },
            Value::Array(arr) => match parse_index(step) {
                Some(idx) if idx < arr.len() => &arr[idx],
                Some(idx) => return last && idx < MAX_EXAMPLE_ARRAY_LEN,
                None => return false,
            },
            _ => return false,
        };
    }
    true
}

/// Walk an example path, filling a missing last slot with `""`.
///
/// A missing object key is inserted; an array index past the end extends
/// the array up to that index. Indices at or beyond
/// [`MAX_EXAMPLE_ARRAY_LEN`], non-numeric steps against arrays, any step
/// against a scalar and any step below a missing slot are misses. A miss
/// leaves the value untouched.
pub fn locate_example_or_create<'a>(
    root: &'a mut Value,
    path: &[String],
) -> Option<&'a mut Value> {
    if !example_reachable(root, path) {
        return None;
    }
    let mut value = root;
    for step in path {
        value = match value {
            Value::Object(map) => map
                .entry(step.clone())
                .or_insert_with(|| Value::String(String::new())),
            Value::Array(arr) => {
                let idx = parse_index(step)?;
                if idx >= arr.len() {
                    arr.resize(idx + 1, Value::String(String::new()));
                }
                &mut arr[idx]
            }
            _ => return None,
        };
    }
    Some(value)
}

/// Read-only counterpart of [`locate_example_or_create`].
pub fn locate_example<'a>(root: &'a Value, path: &[String]) -> Option<&'a Value> {
    let mut value = root;
    for step in path {
        value = match value {
            Value::Object(map) => map.get(step)?,
            Value::Array(arr) => arr.get(parse_index(step)?)?,
            _ => return None,
        };
    }
    Some(value)
}

/// Like [`locate_example`], but hands out the slot mutably. Never creates.
pub fn locate_example_mut<'a>(root: &'a mut Value, path: &[String]) -> Option<&'a mut Value> {
    let mut value = root;
    for step in path {
        value = match value {
            Value::Object(map) => map.get_mut(step)?,
            Value::Array(arr) => arr.get_mut(parse_index(step)?)?,
            _ => return None,
        };
    }
    Some(value)
}
