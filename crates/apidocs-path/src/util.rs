use std::borrow::Cow;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::PathError;

/// Characters escaped inside a single path step.
///
/// Everything outside `[A-Za-z0-9-_~!*'()]` is escaped. That covers the step
/// delimiter `.`, the context-key separator `|`, `%` itself and every
/// non-ASCII byte.
pub const STEP_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-escape a path step.
///
/// # Example
///
/// ```
/// use apidocs_path::escape_step;
///
/// assert_eq!(escape_step("a.b"), "a%2Eb");
/// assert_eq!(escape_step("user_id"), "user_id");
/// ```
pub fn escape_step(step: &str) -> Cow<'_, str> {
    utf8_percent_encode(step, STEP_ESCAPE).into()
}

/// Reverse [`escape_step`].
///
/// # Errors
///
/// Returns [`PathError::InvalidEncoding`] when the decoded bytes are not
/// valid UTF-8.
pub fn unescape_step(step: &str) -> Result<String, PathError> {
    if !step.contains('%') {
        return Ok(step.to_string());
    }
    percent_decode_str(step)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| PathError::InvalidEncoding(step.to_string()))
}

/// Parse a canonical decimal array index (no sign, no leading zeros).
pub fn parse_index(step: &str) -> Option<usize> {
    if step.is_empty() {
        return None;
    }
    let bytes = step.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return None;
    }
    if !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    step.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_step_delimiters() {
        assert_eq!(escape_step("a.b"), "a%2Eb");
        assert_eq!(escape_step("x|y"), "x%7Cy");
        assert_eq!(escape_step("100%"), "100%25");
        assert_eq!(escape_step("plain_name-1"), "plain_name-1");
    }

    #[test]
    fn test_escape_step_non_ascii() {
        assert_eq!(escape_step("한"), "%ED%95%9C");
        assert_eq!(unescape_step("%ED%95%9C").unwrap(), "한");
    }

    #[test]
    fn test_unescape_step_invalid_utf8() {
        assert!(matches!(
            unescape_step("%FF"),
            Err(PathError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index("0"), Some(0));
        assert_eq!(parse_index("42"), Some(42));
        assert_eq!(parse_index("01"), None);
        assert_eq!(parse_index("-1"), None);
        assert_eq!(parse_index("1.5"), None);
        assert_eq!(parse_index(""), None);
    }
}
