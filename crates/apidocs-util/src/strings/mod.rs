//! String utilities.

mod split_list;

pub use split_list::split_list;
