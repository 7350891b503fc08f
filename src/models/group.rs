//! Classes, divisions and student groups.
//!
//! A class is split into one or more divisions, each of which partitions
//! the class into groups (e.g. `G1`/`G2`, `A`/`B`). A group may appear in
//! several divisions and is never assumed to have a single owner.
//! Every class also has a whole-class group that stands for all pupils.

use serde::{Deserialize, Serialize};

use super::Ref;

/// A student group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Unique reference.
    pub id: Ref,
    /// Short label within its class (empty for a whole-class group).
    pub tag: String,
}

/// A partition of a class into groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Division {
    /// Division name (informational).
    pub name: String,
    /// Groups making up the division.
    pub groups: Vec<Ref>,
}

/// A class (year/form).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    /// Unique reference.
    pub id: Ref,
    /// Short display label, e.g. `10A`.
    pub tag: String,
    /// Full name.
    pub name: String,
    /// The group standing for the whole class.
    pub class_group: Ref,
    /// Divisions of the class.
    pub divisions: Vec<Division>,
}

impl Division {
    /// Creates a division.
    pub fn new(name: impl Into<String>, groups: Vec<Ref>) -> Self {
        Self {
            name: name.into(),
            groups,
        }
    }
}

impl Group {
    /// Creates a group.
    pub fn new(id: impl Into<Ref>, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
        }
    }
}

impl Class {
    /// Creates a class with its whole-class group and no divisions.
    pub fn new(id: impl Into<Ref>, tag: impl Into<String>, class_group: impl Into<Ref>) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
            name: String::new(),
            class_group: class_group.into(),
            divisions: Vec::new(),
        }
    }

    /// Sets the full name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a division.
    pub fn with_division(mut self, division: Division) -> Self {
        self.divisions.push(division);
        self
    }

    /// Whether `group` is the whole-class group or part of a division.
    pub fn contains_group(&self, group: &Ref) -> bool {
        self.class_group == *group || self.divisions.iter().any(|d| d.groups.contains(group))
    }
}
