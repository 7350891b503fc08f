//! School timetable resource registry and print-tile projection.
//!
//! Resolves a loaded timetable (courses, teachers, groups and rooms,
//! including room-choice groups and composite super/sub courses) into
//! per-teacher printable tiles: one rectangle per placed lesson, carrying
//! subject, groups, co-teachers and rooms.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Ref`, `Room`, `RoomGroup`,
//!   `RoomChoiceGroup`, `Course`, `SuperCourse`, `SubCourse`, `Lesson`, `Tile`
//! - **`registry`**: Room tag allocation and choice-group de-duplication
//! - **`snapshot`**: The read-only loaded data set and its builder
//! - **`resolve`**: Concrete rooms of a placed lesson
//! - **`aggregate`**: Per-teacher resources of composite courses
//! - **`tiles`**: Tile and teacher-page generation
//! - **`validation`**: Cross-reference checks (unknown refs, unreachable rooms)
//!
//! # Data Flow
//!
//! Loader → `SnapshotBuilder` (+ `Registry`) → `Snapshot` → `TileGenerator`
//! → `TeacherPage`s for the print layout.
//!
//! Loading is the only phase that mutates. Queries take `&Snapshot` and
//! can run concurrently.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod resolve;
pub mod snapshot;
pub mod tiles;
pub mod validation;

pub use error::{Result, TimetableError};
