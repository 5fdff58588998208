//! Error types for editing, saving and exporting.

use std::fmt;

use apidocs_path::PathError;
use thiserror::Error;

/// Which sibling mapping a naming conflict happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Property,
    ExampleKey,
    ContentType,
    Example,
    ResponseCode,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NameKind::Property => "property",
            NameKind::ExampleKey => "example key",
            NameKind::ContentType => "content type",
            NameKind::Example => "example",
            NameKind::ResponseCode => "response code",
        })
    }
}

/// How a non-failing edit ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// The context or path no longer resolves. Nothing changed.
    Stale,
    /// The host declined the confirmation prompt. Nothing changed.
    Cancelled,
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        self == Outcome::Applied
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("{kind} {name:?} already exists")]
    DuplicateName { kind: NameKind, name: String },
    #[error("{0} name must not be empty")]
    EmptyName(NameKind),
    #[error("not a number: {0:?}")]
    InvalidNumber(String),
    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("unknown type: {0:?}")]
    UnknownType(String),
    #[error("unknown HTTP method: {0:?}")]
    UnknownMethod(String),
    #[error("unknown parameter location: {0:?}")]
    UnknownLocation(String),
    #[error("{field} does not apply to {schema_type} schemas")]
    FieldNotApplicable {
        field: &'static str,
        schema_type: &'static str,
    },
    #[error("a response needs at least one content type")]
    LastContentType,
    #[error("invalid context key: {0:?}")]
    InvalidContextKey(String),
    #[error(transparent)]
    InvalidPath(#[from] PathError),
    #[error("title is required")]
    MissingTitle,
    #[error("version is required")]
    MissingVersion,
    #[error("at least one endpoint is required")]
    NoEndpoints,
    #[error("persistence failed: {0}")]
    Persist(#[from] PersistError),
}

/// Failure reported by a [`DocumentStore`](crate::host::DocumentStore).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersistError {
    #[error("rejected by server: {0}")]
    Rejected(String),
    #[error("transport error: {0}")]
    Transport(String),
}
