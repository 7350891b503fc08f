//! Error types for registry loading and tile queries.
//!
//! Load-time problems (`DuplicateTag`, `DuplicateReference`, `InvalidMember`)
//! are collected as reports and never abort a load. `NotARoom` means the
//! snapshot itself is inconsistent; it aborts the query that hit it.

use thiserror::Error;

use crate::models::Ref;

/// Result type for timetable operations.
pub type Result<T> = std::result::Result<T, TimetableError>;

/// Errors raised while building or querying a snapshot.
#[derive(Error, Debug)]
pub enum TimetableError {
    /// A room-like tag is already registered.
    #[error("Room tag defined twice: {tag}")]
    DuplicateTag {
        /// The colliding tag.
        tag: String,
    },

    /// A room group or choice group names a member that is not a room.
    #[error("Invalid room in {owner}: {member}")]
    InvalidMember {
        /// Tag (or description) of the group.
        owner: String,
        /// The offending member reference.
        member: Ref,
    },

    /// A reference expected to be room-like resolves to something else.
    #[error("Bug: not a room: {reference} ({found})")]
    NotARoom {
        /// The offending reference.
        reference: Ref,
        /// What the reference resolved to instead.
        found: String,
    },

    /// Two entities were loaded under the same reference.
    #[error("Element defined twice: {reference}")]
    DuplicateReference {
        /// The repeated reference.
        reference: Ref,
    },

    /// A reference does not resolve to an entity of the expected kind.
    #[error("Unknown {kind}: {reference}")]
    UnknownReference {
        /// Expected entity kind.
        kind: &'static str,
        /// The unresolved reference.
        reference: Ref,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TimetableError {
    /// Whether this error indicates a corrupted snapshot rather than bad
    /// source data.
    pub fn is_bug(&self) -> bool {
        matches!(self, Self::NotARoom { .. })
    }
}
