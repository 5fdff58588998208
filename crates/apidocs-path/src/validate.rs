//! Validation functions for node paths.

use crate::PathError;

/// Maximum allowed encoded path length, in bytes.
pub const MAX_ENCODED_LENGTH: usize = 8192;

/// Maximum allowed path depth.
pub const MAX_PATH_LENGTH: usize = 256;

/// Validate an encoded path before decoding it.
///
/// # Errors
///
/// Returns an error if:
/// - The string does not start with `root` followed by end-of-input or `.`
/// - The string exceeds [`MAX_ENCODED_LENGTH`]
///
/// # Example
///
/// ```
/// use apidocs_path::validate_encoded;
///
/// validate_encoded("root", "root").unwrap();
/// validate_encoded("root", "root.properties.id").unwrap();
/// validate_encoded("root", "rooted.id").unwrap_err();
/// validate_encoded("root", "properties.id").unwrap_err();
/// ```
pub fn validate_encoded(root: &str, encoded: &str) -> Result<(), PathError> {
    if encoded.len() > MAX_ENCODED_LENGTH {
        return Err(PathError::TooLong);
    }
    match encoded.strip_prefix(root) {
        Some(rest) if rest.is_empty() || rest.starts_with(crate::DELIMITER) => Ok(()),
        _ => Err(PathError::MissingRoot(encoded.to_string())),
    }
}

/// Validate a decoded path.
///
/// # Errors
///
/// Returns [`PathError::TooDeep`] if the path exceeds [`MAX_PATH_LENGTH`] steps.
pub fn validate_path(path: &[String]) -> Result<(), PathError> {
    if path.len() > MAX_PATH_LENGTH {
        return Err(PathError::TooDeep(path.len()));
    }
    Ok(())
}
