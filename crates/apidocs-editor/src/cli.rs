//! Core logic of the `apidocs-export` binary.
//!
//! Reads a document (any shape the normalizer accepts), normalizes it and
//! renders either the export document or its OpenAPI form.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

use crate::normalize::normalize_document;
use crate::openapi::to_openapi;
use crate::options::EditorOptions;
use crate::serialize::serialize_document;

pub const USAGE: &str = "usage: apidocs-export [spec|openapi] [--config FILE] < document.json";

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("unknown format: {0}")]
    UnknownFormat(String),
    #[error("{0}")]
    Usage(String),
}

// ── Arguments ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// The cleaned export document.
    #[default]
    Spec,
    OpenApi,
}

impl FromStr for ExportFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spec" | "json" => Ok(ExportFormat::Spec),
            "openapi" | "oas" => Ok(ExportFormat::OpenApi),
            other => Err(CliError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportArgs {
    pub format: ExportFormat,
    pub config: Option<PathBuf>,
}

/// Parse arguments, without the program name.
pub fn parse_args<I>(args: I) -> Result<ExportArgs, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = ExportArgs::default();
    let mut format_seen = false;
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args
                    .next()
                    .ok_or_else(|| CliError::Usage("--config needs a file".into()))?;
                parsed.config = Some(PathBuf::from(path));
            }
            flag if flag.starts_with('-') => {
                return Err(CliError::Usage(format!("unknown option {flag}")));
            }
            format if !format_seen => {
                parsed.format = format.parse()?;
                format_seen = true;
            }
            extra => return Err(CliError::Usage(format!("unexpected argument {extra}"))),
        }
    }
    Ok(parsed)
}

// ── Export ────────────────────────────────────────────────────────────────

/// Default options, or options from a TOML file.
pub fn load_options(path: Option<&Path>) -> Result<EditorOptions, CliError> {
    match path {
        Some(path) => Ok(toml::from_str(&fs::read_to_string(path)?)?),
        None => Ok(EditorOptions::default()),
    }
}

/// Normalize `input` and render it as pretty-printed JSON.
///
/// Unlike the editor bootstrap, input that is not JSON at all is an error.
pub fn export(
    input: &str,
    format: ExportFormat,
    options: &EditorOptions,
) -> Result<String, CliError> {
    let raw: Value = serde_json::from_str(input)?;
    let document = normalize_document(&raw, options).document;
    let out = match format {
        ExportFormat::Spec => serialize_document(&document, options),
        ExportFormat::OpenApi => to_openapi(&document, options),
    };
    Ok(serde_json::to_string_pretty(&out)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_args(args(&[])).unwrap(), ExportArgs::default());
        let parsed = parse_args(args(&["openapi", "--config", "editor.toml"])).unwrap();
        assert_eq!(parsed.format, ExportFormat::OpenApi);
        assert_eq!(parsed.config, Some(PathBuf::from("editor.toml")));
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(matches!(parse_args(args(&["yaml"])), Err(CliError::UnknownFormat(_))));
        assert!(matches!(parse_args(args(&["--config"])), Err(CliError::Usage(_))));
        assert!(matches!(parse_args(args(&["spec", "openapi"])), Err(CliError::Usage(_))));
        assert!(matches!(parse_args(args(&["--verbose"])), Err(CliError::Usage(_))));
    }

    #[test]
    fn test_export_spec() {
        let out = export(
            r#"{"title": "T", "version": "1",
                "endpoints": [{"method": "get", "path": "/a", "tags": ""}]}"#,
            ExportFormat::Spec,
            &EditorOptions::default(),
        )
        .unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "T",
                "version": "1",
                "endpoints": [{"method": "GET", "path": "/a", "responses": {}}]
            })
        );
    }

    #[test]
    fn test_export_rejects_non_json() {
        assert!(matches!(
            export("not json", ExportFormat::OpenApi, &EditorOptions::default()),
            Err(CliError::Json(_))
        ));
    }

    #[test]
    fn test_load_options_default() {
        assert_eq!(load_options(None).unwrap(), EditorOptions::default());
    }
}
