#![allow(dead_code)]

use apidocs_editor::{
    DocumentStore, DownloadLink, EditorHost, EditorOptions, EditorSession, NoticeLevel,
    PersistError, SaveReceipt, SaveRequest,
};
use serde_json::Value;

/// Host that records everything the session tells it.
#[derive(Debug)]
pub struct RecordingHost {
    pub notices: Vec<(NoticeLevel, String)>,
    pub prompts: Vec<String>,
    pub answer: bool,
    pub renders: usize,
    pub last_preview: Option<Value>,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self {
            notices: Vec::new(),
            prompts: Vec::new(),
            answer: true,
            renders: 0,
            last_preview: None,
        }
    }
}

impl RecordingHost {
    pub fn declining() -> Self {
        Self {
            answer: false,
            ..Self::default()
        }
    }

    pub fn errors(&self) -> Vec<&str> {
        self.at(NoticeLevel::Error)
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.at(NoticeLevel::Warning)
    }

    pub fn at(&self, level: NoticeLevel) -> Vec<&str> {
        self.notices
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.as_str())
            .collect()
    }
}

impl EditorHost for RecordingHost {
    fn notify(&mut self, level: NoticeLevel, message: &str) {
        self.notices.push((level, message.to_string()));
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.prompts.push(message.to_string());
        self.answer
    }

    fn render(&mut self, _document: &apidocs_editor::Document) {
        self.renders += 1;
    }

    fn show_preview(&mut self, preview: &Value) {
        self.last_preview = Some(preview.clone());
    }
}

/// Store that records every payload and answers with a fixed result.
#[derive(Debug, Default)]
pub struct MockStore {
    pub saved: Vec<Value>,
    pub fail_with: Option<PersistError>,
}

impl MockStore {
    pub fn failing(err: PersistError) -> Self {
        Self {
            saved: Vec::new(),
            fail_with: Some(err),
        }
    }

    fn record(&mut self, request: &SaveRequest) -> Result<(), PersistError> {
        self.saved
            .push(serde_json::to_value(request).expect("request serializes"));
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl DocumentStore for MockStore {
    fn save(&mut self, request: &SaveRequest) -> Result<SaveReceipt, PersistError> {
        self.record(request)?;
        Ok(SaveReceipt {
            message: "Saved".into(),
        })
    }

    fn render(&mut self, request: &SaveRequest) -> Result<DownloadLink, PersistError> {
        self.record(request)?;
        Ok(DownloadLink {
            url: "/files/api.html".into(),
            filename: "api.html".into(),
        })
    }
}

pub fn session() -> EditorSession<RecordingHost> {
    EditorSession::new(RecordingHost::default())
}

pub fn session_with(host: RecordingHost) -> EditorSession<RecordingHost> {
    EditorSession::with_options(host, EditorOptions::default())
}
