//! Print tiles and teacher pages.
//!
//! Tiles are the render-only projection of a lesson as seen by one
//! teacher. Field names serialize in the form expected by the print
//! layout (`Day`, `Hour`, `Subject`, ...).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One lesson occurrence as seen by one teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tile {
    /// Day index.
    pub day: i32,
    /// First hour index.
    pub hour: i32,
    /// Length in hours.
    pub duration: i32,
    /// Subject tag.
    pub subject: String,
    /// Group display labels.
    pub groups: Vec<String>,
    /// Tags of the other teachers on the lesson.
    pub teachers: Vec<String>,
    /// Tags of the rooms in use.
    pub rooms: Vec<String>,
    /// Display background.
    pub background: String,
    /// Display footnote.
    pub footnote: String,
}

/// A printable page for one teacher.
///
/// `extra` holds caller-supplied page fields, flattened into the page
/// on output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherPage {
    /// Teacher tag.
    #[serde(rename = "Short")]
    pub short: String,
    /// Tiles, possibly empty.
    #[serde(rename = "Activities")]
    pub activities: Vec<Tile>,
    /// Additional page fields.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl TeacherPage {
    /// Creates a page with no extra fields.
    pub fn new(short: impl Into<String>, activities: Vec<Tile>) -> Self {
        Self {
            short: short.into(),
            activities,
            extra: BTreeMap::new(),
        }
    }

    /// Adds (or replaces) extra page fields.
    pub fn extend_page<I>(&mut self, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        self.extra.extend(fields);
    }
}
