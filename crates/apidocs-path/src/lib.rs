//! Node paths for schema and example trees.
//!
//! A path addresses one node inside a tree relative to the tree root. Its
//! encoded form is a single string that can travel through attribute values
//! and command strings: the root marker `root` followed by `.`-joined,
//! percent-escaped steps.
//!
//! # Example
//!
//! ```
//! use apidocs_path::{decode, encode, ROOT};
//!
//! let path = vec!["properties".to_string(), "a.b".to_string()];
//! let encoded = encode(ROOT, &path);
//! assert_eq!(encoded, "root.properties.a%2Eb");
//! assert_eq!(decode(&encoded).unwrap(), path);
//!
//! assert!(decode("root").unwrap().is_empty());
//! ```

use thiserror::Error;

pub mod types;
pub use types::{Path, PathStep, StepKind};

pub mod util;
pub use util::{escape_step, parse_index, unescape_step, STEP_ESCAPE};

pub mod validate;
pub use validate::{validate_encoded, validate_path, MAX_ENCODED_LENGTH, MAX_PATH_LENGTH};

/// Root marker every encoded path starts with.
pub const ROOT: &str = "root";

/// Step that descends from an object schema node into its property map.
pub const PROPERTIES: &str = "properties";

/// Step that descends from an array schema node into its items schema.
pub const ITEMS: &str = "items";

/// Step delimiter of the encoded form.
pub const DELIMITER: char = '.';

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("path must start with the root marker: {0:?}")]
    MissingRoot(String),
    #[error("invalid percent-encoding in path step: {0:?}")]
    InvalidEncoding(String),
    #[error("path too long")]
    TooLong,
    #[error("path too deep: {0} steps")]
    TooDeep(usize),
    #[error("root has no parent")]
    NoParent,
}

/// Encode `steps` relative to `root`.
///
/// The root itself (no steps) encodes as just the root marker. An empty step
/// still produces a delimiter, so `[""]` encodes as `"root."`.
pub fn encode(root: &str, steps: &[String]) -> String {
    let mut out = String::with_capacity(root.len() + steps.len() * 8);
    out.push_str(root);
    for step in steps {
        out.push(DELIMITER);
        out.push_str(&escape_step(step));
    }
    out
}

/// Encode `steps` relative to [`ROOT`].
pub fn encode_path(steps: &[String]) -> String {
    encode(ROOT, steps)
}

/// Decode a path encoded against [`ROOT`].
///
/// # Errors
///
/// See [`decode_with_root`].
pub fn decode(encoded: &str) -> Result<Path, PathError> {
    decode_with_root(ROOT, encoded)
}

/// Decode a path encoded against `root`.
///
/// # Errors
///
/// - [`PathError::MissingRoot`] when `encoded` does not start with `root`
/// - [`PathError::InvalidEncoding`] when a step is not valid escaped UTF-8
/// - [`PathError::TooLong`] / [`PathError::TooDeep`] past the validation limits
pub fn decode_with_root(root: &str, encoded: &str) -> Result<Path, PathError> {
    validate_encoded(root, encoded)?;
    let rest = &encoded[root.len()..];
    if rest.is_empty() {
        return Ok(Vec::new());
    }
    let path = rest[1..]
        .split(DELIMITER)
        .map(unescape_step)
        .collect::<Result<Path, _>>()?;
    validate_path(&path)?;
    Ok(path)
}

/// Append one escaped step to an already encoded path.
///
/// # Example
///
/// ```
/// use apidocs_path::child;
///
/// assert_eq!(child("root.properties", "x|y"), "root.properties.x%7Cy");
/// ```
pub fn child(encoded: &str, step: &str) -> String {
    let escaped = escape_step(step);
    let mut out = String::with_capacity(encoded.len() + escaped.len() + 1);
    out.push_str(encoded);
    out.push(DELIMITER);
    out.push_str(&escaped);
    out
}

/// Path of the property `name` of the object node at `path`.
pub fn property_path(path: &[String], name: &str) -> Path {
    let mut out = path.to_vec();
    out.push(PROPERTIES.to_string());
    out.push(name.to_string());
    out
}

/// Path of the items schema of the array node at `path`.
pub fn items_path(path: &[String]) -> Path {
    let mut out = path.to_vec();
    out.push(ITEMS.to_string());
    out
}

/// Split a path into its parent path and last step.
///
/// # Errors
///
/// Returns [`PathError::NoParent`] for the root path.
///
/// # Example
///
/// ```
/// use apidocs_path::split_last;
///
/// let path = vec!["a".to_string(), "0".to_string()];
/// let (parent, last) = split_last(&path).unwrap();
/// assert_eq!(parent, ["a".to_string()]);
/// assert_eq!(last, "0");
/// assert!(split_last(&[]).is_err());
/// ```
pub fn split_last(path: &[String]) -> Result<(&[String], &str), PathError> {
    match path.split_last() {
        Some((last, parent)) => Ok((parent, last.as_str())),
        None => Err(PathError::NoParent),
    }
}
