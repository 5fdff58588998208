//! apidocs-editor - editing engine for API documentation.
//!
//! An [`EditorSession`] owns one [`Document`]: endpoints with their
//! parameters, request body and responses, each carrying a JSON schema tree
//! and example values. Edits address a tree through a [`ContextKey`] and an
//! encoded node path (see [`apidocs_path`]), report back through an
//! [`EditorHost`], and keep the export document available for preview,
//! saving and OpenAPI rendering.
//!
//! # Example
//!
//! ```
//! use apidocs_editor::{ContextKey, EditorSession, EndpointField, ExampleKind, HttpMethod};
//! use serde_json::json;
//!
//! let mut session: EditorSession = EditorSession::default();
//! let id = session.add_endpoint();
//! session
//!     .update_endpoint(id, EndpointField::Method(HttpMethod::Post))
//!     .unwrap();
//! session.add_response(id, "201").unwrap();
//! session
//!     .add_response_example(id, "201", "application/json", "ok")
//!     .unwrap();
//!
//! let key = ContextKey::response_example(id, "201", "application/json", "ok");
//! session.add_example_key(&key, "root").unwrap();
//! session.rename_example_key(&key, "root.property1", "id").unwrap();
//! session.set_example_type(&key, "root.id", ExampleKind::Number).unwrap();
//! session.set_example_value(&key, "root.id", "42").unwrap();
//!
//! let doc = session.serialize();
//! let content = &doc["endpoints"][0]["responses"]["201"]["content"]["application/json"];
//! assert_eq!(content["examples"]["ok"]["value"], json!({"id": 42}));
//! ```

pub mod cli;
pub mod context;
pub mod error;
pub mod host;
pub mod model;
pub mod normalize;
pub mod openapi;
pub mod ops;
pub mod options;
pub mod resolve;
pub mod serialize;
pub mod session;

// Re-exports for convenience
pub use context::ContextKey;
pub use error::{EditError, NameKind, Outcome, PersistError};
pub use host::{
    DocumentStore, DownloadLink, EditorHost, LogHost, NoticeLevel, SaveReceipt, SaveRequest,
};
pub use model::{
    ArraySchema, Document, Endpoint, EndpointId, ExampleKind, HttpMethod, MediaContent,
    NamedExample, ObjectSchema, Param, ParamId, ParamLocation, RequestBody, Response,
    ScalarSchema, ScalarType, SchemaKind, SchemaNode, SchemaType,
};
pub use normalize::{normalize_document, parse_bootstrap, NormalizeWarning, Normalized};
pub use openapi::to_openapi;
pub use ops::endpoint::{EndpointField, ParamField, RequestBodyField};
pub use ops::schema::SchemaField;
pub use options::EditorOptions;
pub use serialize::serialize_document;
pub use session::EditorSession;
