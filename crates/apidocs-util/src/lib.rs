//! apidocs-util - JSON pruning and naming helpers for the API docs editor.

pub mod is_empty;
pub mod strings;
pub mod strip_meta;
pub mod unique_name;

// Re-exports for convenience
pub use is_empty::is_vacuous;
pub use strings::split_list;
pub use strip_meta::{strip_meta, strip_meta_or_empty};
pub use unique_name::unique_name;
