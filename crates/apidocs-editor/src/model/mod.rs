//! Document, schema and example data model.

pub mod document;
pub mod example;
pub mod schema;

pub use document::{
    Document, Endpoint, EndpointId, HttpMethod, MediaContent, NamedExample, Param, ParamId,
    ParamLocation, RequestBody, Response,
};
pub use example::{cast_primitive, parse_number, ExampleKind};
pub use schema::{
    ArraySchema, ObjectSchema, ScalarSchema, ScalarType, SchemaKind, SchemaNode, SchemaType,
};
