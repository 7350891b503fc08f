//! Timetable domain models.
//!
//! Plain data types for a loaded timetable snapshot: room-like resources,
//! teachers, classes and groups, courses with their lessons, and the
//! render-only tiles projected from them.
//!
//! # Entity Kinds
//!
//! | Kind | Owned by | Identity |
//! |------|----------|----------|
//! | Room, RoomGroup, RoomChoiceGroup | `Registry` | `Ref` + unique tag |
//! | Teacher, Subject, Class, Group | `Snapshot` | `Ref` + display tag |
//! | Course, SuperCourse, SubCourse | `Snapshot` | `Ref` |
//! | Tile, TeacherPage | caller | none (ephemeral) |

mod course;
mod group;
mod reference;
mod room;
mod teacher;
mod tile;

pub use course::{Course, CourseEntry, Lesson, SubCourse, SuperCourse};
pub use group::{Class, Division, Group};
pub use reference::Ref;
pub use room::{Room, RoomChoiceGroup, RoomGroup, RoomKind, TimeSlot};
pub use teacher::{Subject, Teacher};
pub use tile::{TeacherPage, Tile};
