//! Print-tile projection.
//!
//! Turns the placed lessons of a [`Snapshot`] into per-teacher [`Tile`]s
//! and printable [`TeacherPage`]s.
//!
//! # Usage
//!
//! ```
//! use timetable_print::config::PrintConfig;
//! use timetable_print::models::{Course, Lesson, Ref, Subject, Teacher};
//! use timetable_print::snapshot::Snapshot;
//! use timetable_print::tiles::TileGenerator;
//!
//! let mut builder = Snapshot::builder();
//! let r1 = builder.registry_mut().register_room("R1", "Room 1", vec![]).unwrap();
//! builder
//!     .add_teacher(Teacher::new("t1", "AB"))
//!     .add_teacher(Teacher::new("t2", "CD"))
//!     .add_subject(Subject::new("ma", "Ma"))
//!     .add_course(
//!         Course::new("c1", "ma")
//!             .with_teacher("t1")
//!             .with_teacher("t2")
//!             .with_room(r1.clone())
//!             .with_lesson(Lesson::new(0, 2, 1).with_rooms(vec![r1])),
//!     );
//! let (snapshot, reports) = builder.build();
//! assert!(reports.is_empty());
//!
//! let config = PrintConfig::default();
//! let tiles = TileGenerator::new(&snapshot, &config)
//!     .tiles_for_teacher(&Ref::from("t1"))
//!     .unwrap();
//! assert_eq!(tiles.len(), 1);
//! assert_eq!(tiles[0].teachers, vec!["CD"]);
//! assert_eq!(tiles[0].rooms, vec!["R1"]);
//! ```
//!
//! [`Snapshot`]: crate::snapshot::Snapshot
//! [`Tile`]: crate::models::Tile
//! [`TeacherPage`]: crate::models::TeacherPage

mod generator;
mod labels;

pub use generator::{TileGenerator, TileMap};
pub use labels::{display_tag, sort_list, split_groups};

use crate::config::PrintConfig;
use crate::error::Result;
use crate::models::{Ref, TeacherPage, Tile};
use crate::snapshot::Snapshot;

/// Tiles for one teacher with the default configuration.
pub fn tiles_for_teacher(snapshot: &Snapshot, teacher: &Ref) -> Result<Vec<Tile>> {
    let config = PrintConfig::default();
    TileGenerator::new(snapshot, &config).tiles_for_teacher(teacher)
}

/// Tiles for all teachers with the default configuration.
pub fn tiles_for_all_teachers(snapshot: &Snapshot) -> Result<TileMap> {
    let config = PrintConfig::default();
    TileGenerator::new(snapshot, &config).tiles_for_all_teachers()
}

/// Serializes pages as a JSON array for the print layout.
pub fn pages_to_json(pages: &[TeacherPage]) -> Result<String> {
    Ok(serde_json::to_string(pages)?)
}
