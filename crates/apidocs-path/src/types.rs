//! Type definitions for node paths.

/// A step in a node path.
///
/// Either a property name, one of the structural markers
/// ([`PROPERTIES`](crate::PROPERTIES), [`ITEMS`](crate::ITEMS)) or an array
/// index written in decimal.
pub type PathStep = String;

/// A decoded node path, relative to a tree root.
pub type Path = Vec<PathStep>;

/// Classification of a single path step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind<'a> {
    /// The `properties` marker of an object schema node.
    Properties,
    /// The `items` marker of an array schema node.
    Items,
    /// A non-negative array index.
    Index(usize),
    /// Any other step: a property name or an object key.
    Key(&'a str),
}

impl<'a> StepKind<'a> {
    /// Classify `step` in isolation.
    ///
    /// Walkers that are about to consume a property name must not call this:
    /// a property literally named `items` or `0` is still a name.
    pub fn of(step: &'a str) -> Self {
        match step {
            crate::PROPERTIES => StepKind::Properties,
            crate::ITEMS => StepKind::Items,
            _ => match crate::util::parse_index(step) {
                Some(idx) => StepKind::Index(idx),
                None => StepKind::Key(step),
            },
        }
    }
}
