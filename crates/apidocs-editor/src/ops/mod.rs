//! Tree and document edits.
//!
//! Functions here work on nodes the caller has already resolved. They
//! return [`Outcome::Stale`] when the part they were asked to touch is
//! missing and an [`EditError`] when the edit would break a document rule;
//! in both cases nothing was changed, with the exception documented on
//! [`example::set_example_value`].

pub mod endpoint;
pub mod example;
pub mod response;
pub mod schema;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::{EditError, NameKind, Outcome};

/// Check that `to` can replace `from` among sibling names.
///
/// Returns the trimmed new name, or `None` when it equals `from`.
pub(crate) fn check_rename<'n>(
    kind: NameKind,
    from: &str,
    to: &'n str,
    taken: impl Fn(&str) -> bool,
) -> Result<Option<&'n str>, EditError> {
    let to = to.trim();
    if to.is_empty() {
        return Err(EditError::EmptyName(kind));
    }
    if to == from {
        return Ok(None);
    }
    if taken(to) {
        return Err(EditError::DuplicateName {
            kind,
            name: to.to_string(),
        });
    }
    Ok(Some(to))
}

/// Check that `name` can be added among sibling names.
pub(crate) fn check_new<'n>(
    kind: NameKind,
    name: &'n str,
    taken: impl Fn(&str) -> bool,
) -> Result<&'n str, EditError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(EditError::EmptyName(kind));
    }
    if taken(name) {
        return Err(EditError::DuplicateName {
            kind,
            name: name.to_string(),
        });
    }
    Ok(name)
}

// ── Order-preserving renames ──────────────────────────────────────────────

/// Rename `from` to `to` in place, keeping its position.
pub fn rename_entry<V>(map: &mut IndexMap<String, V>, from: &str, to: &str) -> Outcome {
    if !map.contains_key(from) {
        return Outcome::Stale;
    }
    *map = std::mem::take(map)
        .into_iter()
        .map(|(k, v)| if k == from { (to.to_string(), v) } else { (k, v) })
        .collect();
    Outcome::Applied
}

/// [`rename_entry`] for JSON objects.
pub fn rename_field(map: &mut Map<String, Value>, from: &str, to: &str) -> Outcome {
    if !map.contains_key(from) {
        return Outcome::Stale;
    }
    *map = std::mem::take(map)
        .into_iter()
        .map(|(k, v)| if k == from { (to.to_string(), v) } else { (k, v) })
        .collect();
    Outcome::Applied
}
