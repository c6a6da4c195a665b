//! Typed filesystem change events.

/// One debounced filesystem change, keyed by root-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileEvent {
    /// An indexable file appeared.
    Added(String),
    /// An indexable file's content changed.
    Modified(String),
    /// A file disappeared. Carried for any path, not just indexable
    /// ones, since a previously indexed file may have been removed.
    Removed(String),
    /// A root-level ignore rule file changed; the whole tree must be
    /// rescanned under the reloaded rules.
    IgnoreRulesChanged,
}

impl FileEvent {
    /// The path this event refers to, if it is path-scoped.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Added(path) | Self::Modified(path) | Self::Removed(path) => Some(path),
            Self::IgnoreRulesChanged => None,
        }
    }
}
