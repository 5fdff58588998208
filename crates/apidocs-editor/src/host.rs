//! Capabilities the editor consumes from its embedding.
//!
//! [`EditorHost`] is the UI side: notifications, confirmation prompts and
//! re-rendering. [`DocumentStore`] is the persistence side. Both are plain
//! synchronous traits; a host backed by an asynchronous transport blocks or
//! schedules on its own side.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, info, warn};

use crate::error::PersistError;
use crate::model::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Error,
    Warning,
    Success,
}

pub trait EditorHost {
    /// Show a message to the user. Logs by default.
    fn notify(&mut self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Error => error!("{message}"),
            NoticeLevel::Warning => warn!("{message}"),
            NoticeLevel::Success => info!("{message}"),
        }
    }

    /// Ask before a destructive edit. `false` aborts it.
    fn confirm(&mut self, _message: &str) -> bool {
        true
    }

    /// Called after every applied edit.
    fn render(&mut self, _document: &Document) {}

    /// Called after every applied edit with the fresh export document.
    fn show_preview(&mut self, _preview: &Value) {}
}

/// Host that only logs. Confirms everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogHost;

impl EditorHost for LogHost {}

/// Payload handed to a [`DocumentStore`]: the export document plus the
/// optional project and document identifiers, flattened into one object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_idx: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_idx: Option<u64>,
    #[serde(flatten)]
    pub document: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveReceipt {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadLink {
    pub url: String,
    pub filename: String,
}

pub trait DocumentStore {
    fn save(&mut self, request: &SaveRequest) -> Result<SaveReceipt, PersistError>;

    /// Produce a downloadable rendering of the document.
    fn render(&mut self, request: &SaveRequest) -> Result<DownloadLink, PersistError>;
}
