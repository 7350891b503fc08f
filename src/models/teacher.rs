//! Teachers and subjects.

use serde::{Deserialize, Serialize};

use super::Ref;

/// A teacher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique reference.
    pub id: Ref,
    /// Short display label (used as the page title).
    pub tag: String,
    /// Full name.
    pub name: String,
}

/// A subject taught in courses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique reference.
    pub id: Ref,
    /// Short display label.
    pub tag: String,
    /// Full name.
    pub name: String,
}

impl Teacher {
    /// Creates a teacher.
    pub fn new(id: impl Into<Ref>, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
            name: String::new(),
        }
    }

    /// Sets the full name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Subject {
    /// Creates a subject.
    pub fn new(id: impl Into<Ref>, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
            name: String::new(),
        }
    }

    /// Sets the full name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
