//! Opaque entity references.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of an entity in a loaded snapshot.
///
/// Stable for the lifetime of the snapshot. Carries no meaning beyond
/// identity; display text always comes from the entity's tag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ref(String);

impl Ref {
    /// Creates a reference from an externally supplied identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a numbered reference within a kind namespace, e.g. `room:3`.
    pub(crate) fn numbered(kind: &str, n: usize) -> Self {
        Self(format!("{kind}:{n}"))
    }

    /// The raw identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for Ref {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Ref {
    fn from(id: String) -> Self {
        Self(id)
    }
}
