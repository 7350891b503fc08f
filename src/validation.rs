//! Structural validation of a loaded snapshot.
//!
//! Checks the cross-references that tile generation relies on. Detects:
//! - Duplicate teacher tags
//! - Course and sub-course references to unknown teachers, groups or
//!   subjects
//! - Super-courses without sub-courses, or with unknown ones
//! - Course room references that are not room-like
//! - Lesson rooms that are not plain rooms, or not reachable from the
//!   course's room references

use std::collections::HashSet;

use crate::models::{CourseEntry, Lesson, Ref, RoomKind};
use crate::snapshot::Snapshot;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two teachers share the same tag.
    DuplicateTag,
    /// A course references a teacher that doesn't exist.
    InvalidTeacherReference,
    /// A course references a group that doesn't exist.
    InvalidGroupReference,
    /// A course references a subject that doesn't exist.
    InvalidSubjectReference,
    /// A super-course references a sub-course that doesn't exist.
    InvalidSubCourseReference,
    /// A super-course has no sub-courses.
    EmptySuperCourse,
    /// A course room reference is not room-like.
    NotARoom,
    /// A lesson uses something other than a plain room.
    InvalidLessonRoom,
    /// A lesson uses a room its course cannot reach.
    UnreachableRoom,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a snapshot.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_snapshot(snapshot: &Snapshot) -> ValidationResult {
    let mut errors = Vec::new();

    let mut teacher_tags = HashSet::new();
    for t in snapshot.teachers() {
        if !teacher_tags.insert(t.tag.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateTag,
                format!("Duplicate teacher tag: {}", t.tag),
            ));
        }
    }

    for entry in snapshot.courses() {
        let id = entry.id();
        if snapshot.subject(entry.subject()).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSubjectReference,
                format!("Course '{id}' references unknown subject '{}'", entry.subject()),
            ));
        }

        // Room references the course's lessons may draw on.
        let mut room_refs: Vec<&Ref> = Vec::new();
        match entry {
            CourseEntry::Plain(c) => {
                check_people(snapshot, id, &c.teachers, &c.groups, &mut errors);
                room_refs.extend(c.room.iter());
            }
            CourseEntry::Super(sc) => {
                if sc.sub_courses.is_empty() {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::EmptySuperCourse,
                        format!("SuperCourse '{id}' has no sub-courses"),
                    ));
                }
                for sref in &sc.sub_courses {
                    match snapshot.sub_course(sref) {
                        Some(sub) => {
                            check_people(
                                snapshot,
                                &sub.id,
                                &sub.teachers,
                                &sub.groups,
                                &mut errors,
                            );
                            if let Some(subject) = &sub.subject {
                                if snapshot.subject(subject).is_none() {
                                    errors.push(ValidationError::new(
                                        ValidationErrorKind::InvalidSubjectReference,
                                        format!(
                                            "SubCourse '{}' references unknown subject '{subject}'",
                                            sub.id
                                        ),
                                    ));
                                }
                            }
                            room_refs.extend(sub.room.iter());
                        }
                        None => errors.push(ValidationError::new(
                            ValidationErrorKind::InvalidSubCourseReference,
                            format!("SuperCourse '{id}' references unknown sub-course '{sref}'"),
                        )),
                    }
                }
            }
        }

        let mut reachable: HashSet<&Ref> = HashSet::new();
        for rref in room_refs {
            match snapshot.registry().get(rref) {
                Some(kind) => reachable.extend(kind.member_rooms()),
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::NotARoom,
                    format!("Course '{id}' has room reference '{rref}' which is not a room"),
                )),
            }
        }

        for lesson in entry.lessons() {
            check_lesson_rooms(snapshot, id, lesson, &reachable, &mut errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_people(
    snapshot: &Snapshot,
    owner: &Ref,
    teachers: &[Ref],
    groups: &[Ref],
    errors: &mut Vec<ValidationError>,
) {
    for t in teachers {
        if snapshot.teacher(t).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTeacherReference,
                format!("Course '{owner}' references unknown teacher '{t}'"),
            ));
        }
    }
    for g in groups {
        if snapshot.group(g).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidGroupReference,
                format!("Course '{owner}' references unknown group '{g}'"),
            ));
        }
    }
}

fn check_lesson_rooms(
    snapshot: &Snapshot,
    owner: &Ref,
    lesson: &Lesson,
    reachable: &HashSet<&Ref>,
    errors: &mut Vec<ValidationError>,
) {
    for rref in &lesson.rooms {
        if !matches!(snapshot.registry().get(rref), Some(RoomKind::Room(_))) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidLessonRoom,
                format!("Lesson of '{owner}' uses '{rref}' which is not a room"),
            ));
        } else if !reachable.contains(rref) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnreachableRoom,
                format!("Lesson of '{owner}' uses room '{rref}' outside its room choice"),
            ));
        }
    }
}
