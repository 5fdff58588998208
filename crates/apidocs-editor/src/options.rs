//! Editor configuration.

use serde::{Deserialize, Serialize};

/// Content type used when nothing else is known.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Prefix marking UI-only bookkeeping fields.
pub const DEFAULT_META_PREFIX: &str = "__";

/// Options for an editing session.
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```
/// use apidocs_editor::EditorOptions;
///
/// let options: EditorOptions = toml::from_str("property_prefix = \"field\"").unwrap();
/// assert_eq!(options.property_prefix, "field");
/// assert_eq!(options.default_content_type, "application/json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    /// Content type for new request bodies and responses.
    pub default_content_type: String,
    /// Fields whose name starts with this prefix are dropped on export.
    pub meta_prefix: String,
    /// Placeholder prefix for new object properties and example keys.
    pub property_prefix: String,
    /// Response code inserted by the OpenAPI export when an endpoint has none.
    pub default_response_code: String,
    /// Ask the host before removing endpoints, params, responses and examples.
    pub confirm_destructive: bool,
    /// `openapi` field written by the OpenAPI export.
    pub openapi_version: String,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            default_content_type: DEFAULT_CONTENT_TYPE.to_string(),
            meta_prefix: DEFAULT_META_PREFIX.to_string(),
            property_prefix: "property".to_string(),
            default_response_code: "200".to_string(),
            confirm_destructive: true,
            openapi_version: "3.0.3".to_string(),
        }
    }
}

impl EditorOptions {
    /// Field name carrying the collapse flag in loosely shaped input.
    pub fn collapsed_key(&self) -> String {
        format!("{}collapsed", self.meta_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapsed_key() {
        assert_eq!(EditorOptions::default().collapsed_key(), "__collapsed");
    }

    #[test]
    fn test_partial_toml() {
        let options: EditorOptions =
            toml::from_str("confirm_destructive = false\nopenapi_version = \"3.1.0\"").unwrap();
        assert!(!options.confirm_destructive);
        assert_eq!(options.openapi_version, "3.1.0");
        assert_eq!(options.meta_prefix, "__");
    }
}
