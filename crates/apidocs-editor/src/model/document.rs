//! The in-memory API document.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::EditError;
use crate::model::schema::SchemaNode;
use crate::options::DEFAULT_CONTENT_TYPE;

pub type EndpointId = u64;
pub type ParamId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = EditError;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| EditError::UnknownMethod(s.to_string()))
    }
}

/// Where a parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParamLocation {
    #[default]
    Query,
    Path,
    Header,
    Cookie,
}

impl ParamLocation {
    pub const ALL: [ParamLocation; 4] = [
        ParamLocation::Query,
        ParamLocation::Path,
        ParamLocation::Header,
        ParamLocation::Cookie,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ParamLocation::Query => "query",
            ParamLocation::Path => "path",
            ParamLocation::Header => "header",
            ParamLocation::Cookie => "cookie",
        }
    }
}

impl fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamLocation {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamLocation::ALL
            .into_iter()
            .find(|loc| loc.as_str() == s)
            .ok_or_else(|| EditError::UnknownLocation(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub id: ParamId,
    pub location: ParamLocation,
    pub name: String,
    /// Always `true` for path parameters.
    pub required: bool,
    pub description: String,
    pub schema: SchemaNode,
    pub example: Option<Value>,
}

impl Param {
    pub fn new(id: ParamId) -> Self {
        Self {
            id,
            location: ParamLocation::Query,
            name: String::new(),
            required: false,
            description: String::new(),
            schema: SchemaNode::string(),
            example: None,
        }
    }

    /// Move the parameter, forcing `required` for path parameters.
    pub fn set_location(&mut self, location: ParamLocation) {
        self.location = location;
        if location == ParamLocation::Path {
            self.required = true;
        }
    }

    /// Set `required`, ignoring `false` for path parameters.
    pub fn set_required(&mut self, required: bool) {
        self.required = required || self.location == ParamLocation::Path;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestBody {
    /// Disabled bodies are kept in memory but not exported.
    pub enabled: bool,
    pub required: bool,
    pub description: String,
    pub content_type: String,
    pub schema: SchemaNode,
    pub example: Option<Value>,
}

impl Default for RequestBody {
    fn default() -> Self {
        Self::with_content_type(DEFAULT_CONTENT_TYPE)
    }
}

impl RequestBody {
    pub fn with_content_type(content_type: &str) -> Self {
        Self {
            enabled: false,
            required: false,
            description: String::new(),
            content_type: content_type.to_string(),
            schema: SchemaNode::object(),
            example: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedExample {
    pub summary: String,
    pub value: Value,
}

impl Default for NamedExample {
    fn default() -> Self {
        Self {
            summary: String::new(),
            value: Value::Object(Default::default()),
        }
    }
}

/// One content-type entry of a response.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaContent {
    pub schema: SchemaNode,
    pub examples: IndexMap<String, NamedExample>,
}

impl Default for MediaContent {
    fn default() -> Self {
        Self {
            schema: SchemaNode::object(),
            examples: IndexMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    pub description: String,
    pub content: IndexMap<String, MediaContent>,
    /// Passed through untouched.
    pub headers: Option<Value>,
    /// Passed through untouched.
    pub links: Option<Value>,
}

impl Response {
    /// A response with a single empty content entry.
    pub fn with_content_type(content_type: &str) -> Self {
        let mut content = IndexMap::new();
        content.insert(content_type.to_string(), MediaContent::default());
        Self {
            content,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub id: EndpointId,
    pub method: HttpMethod,
    pub path: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub params: Vec<Param>,
    pub request_body: RequestBody,
    pub responses: IndexMap<String, Response>,
}

impl Endpoint {
    pub fn new(id: EndpointId) -> Self {
        Self {
            id,
            method: HttpMethod::Get,
            path: String::new(),
            summary: String::new(),
            tags: Vec::new(),
            params: Vec::new(),
            request_body: RequestBody::default(),
            responses: IndexMap::new(),
        }
    }

    pub fn param(&self, id: ParamId) -> Option<&Param> {
        self.params.iter().find(|p| p.id == id)
    }

    pub fn param_mut(&mut self, id: ParamId) -> Option<&mut Param> {
        self.params.iter_mut().find(|p| p.id == id)
    }

    /// Smallest id not used by any parameter of this endpoint.
    pub fn next_param_id(&self) -> ParamId {
        self.params.iter().map(|p| p.id + 1).max().unwrap_or(1)
    }
}

/// Root of the model. Exclusively owns every endpoint and tree below it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub title: String,
    pub version: String,
    pub endpoints: Vec<Endpoint>,
}

impl Document {
    pub fn endpoint(&self, id: EndpointId) -> Option<&Endpoint> {
        self.endpoints.iter().find(|e| e.id == id)
    }

    pub fn endpoint_mut(&mut self, id: EndpointId) -> Option<&mut Endpoint> {
        self.endpoints.iter_mut().find(|e| e.id == id)
    }

    /// Largest endpoint id plus one, or `1` for an empty document.
    pub fn next_endpoint_id(&self) -> EndpointId {
        self.endpoints.iter().map(|e| e.id + 1).max().unwrap_or(1)
    }
}
