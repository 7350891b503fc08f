//! Courses and lessons.
//!
//! A plain [`Course`] carries its own teachers, groups and room, and its
//! lessons. A composite course splits these roles: the [`SuperCourse`]
//! holds the subject and the placed lessons, while its [`SubCourse`]s hold
//! the teachers, groups and rooms. A sub-course may be shared by several
//! super-courses.

use serde::{Deserialize, Serialize};

use super::Ref;

/// One lesson occurrence of a course.
///
/// `day < 0` marks an unplaced lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    /// Day index, or negative if unplaced.
    pub day: i32,
    /// First hour (period) index.
    pub hour: i32,
    /// Length in hours.
    pub duration: i32,
    /// Rooms actually used, chosen from the course's room reference(s).
    pub rooms: Vec<Ref>,
    /// Display background (e.g. a colour), passed through.
    pub background: String,
    /// Display footnote, passed through.
    pub footnote: String,
}

impl Lesson {
    /// Creates a placed lesson with no rooms.
    pub fn new(day: i32, hour: i32, duration: i32) -> Self {
        Self {
            day,
            hour,
            duration,
            rooms: Vec::new(),
            background: String::new(),
            footnote: String::new(),
        }
    }

    /// Creates an unplaced lesson of the given length.
    pub fn unplaced(duration: i32) -> Self {
        Self::new(-1, -1, duration)
    }

    /// Sets the rooms in use.
    pub fn with_rooms(mut self, rooms: Vec<Ref>) -> Self {
        self.rooms = rooms;
        self
    }

    /// Sets the background.
    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }

    /// Sets the footnote.
    pub fn with_footnote(mut self, footnote: impl Into<String>) -> Self {
        self.footnote = footnote.into();
        self
    }

    /// Whether the lesson has a day/hour placement.
    #[inline]
    pub fn is_placed(&self) -> bool {
        self.day >= 0
    }
}

/// A plain course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique reference.
    pub id: Ref,
    /// Subject taught.
    pub subject: Ref,
    /// Participating groups.
    pub groups: Vec<Ref>,
    /// Teachers, in declaration order.
    pub teachers: Vec<Ref>,
    /// Room reference (room, room group or choice group), if any.
    pub room: Option<Ref>,
    /// Lesson occurrences.
    pub lessons: Vec<Lesson>,
}

impl Course {
    /// Creates a course with no resources or lessons.
    pub fn new(id: impl Into<Ref>, subject: impl Into<Ref>) -> Self {
        Self {
            id: id.into(),
            subject: subject.into(),
            groups: Vec::new(),
            teachers: Vec::new(),
            room: None,
            lessons: Vec::new(),
        }
    }

    /// Adds a teacher.
    pub fn with_teacher(mut self, teacher: impl Into<Ref>) -> Self {
        self.teachers.push(teacher.into());
        self
    }

    /// Adds a group.
    pub fn with_group(mut self, group: impl Into<Ref>) -> Self {
        self.groups.push(group.into());
        self
    }

    /// Sets the room reference.
    pub fn with_room(mut self, room: impl Into<Ref>) -> Self {
        self.room = Some(room.into());
        self
    }

    /// Adds a lesson.
    pub fn with_lesson(mut self, lesson: Lesson) -> Self {
        self.lessons.push(lesson);
        self
    }
}

/// The lesson-carrying half of a composite course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuperCourse {
    /// Unique reference.
    pub id: Ref,
    /// Subject shown on tiles.
    pub subject: Ref,
    /// Sub-courses supplying teachers, groups and rooms.
    pub sub_courses: Vec<Ref>,
    /// Lesson occurrences.
    pub lessons: Vec<Lesson>,
}

impl SuperCourse {
    /// Creates a super-course with no sub-courses or lessons.
    pub fn new(id: impl Into<Ref>, subject: impl Into<Ref>) -> Self {
        Self {
            id: id.into(),
            subject: subject.into(),
            sub_courses: Vec::new(),
            lessons: Vec::new(),
        }
    }

    /// Adds a sub-course reference.
    pub fn with_sub_course(mut self, sub: impl Into<Ref>) -> Self {
        self.sub_courses.push(sub.into());
        self
    }

    /// Adds a lesson.
    pub fn with_lesson(mut self, lesson: Lesson) -> Self {
        self.lessons.push(lesson);
        self
    }
}

/// The resource-carrying half of a composite course. Places no lessons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubCourse {
    /// Unique reference.
    pub id: Ref,
    /// Subject (informational; tiles use the super-course subject).
    pub subject: Option<Ref>,
    /// Participating groups.
    pub groups: Vec<Ref>,
    /// Teachers.
    pub teachers: Vec<Ref>,
    /// Room reference, if any.
    pub room: Option<Ref>,
}

impl SubCourse {
    /// Creates an empty sub-course.
    pub fn new(id: impl Into<Ref>) -> Self {
        Self {
            id: id.into(),
            subject: None,
            groups: Vec::new(),
            teachers: Vec::new(),
            room: None,
        }
    }

    /// Sets the subject.
    pub fn with_subject(mut self, subject: impl Into<Ref>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Adds a teacher.
    pub fn with_teacher(mut self, teacher: impl Into<Ref>) -> Self {
        self.teachers.push(teacher.into());
        self
    }

    /// Adds a group.
    pub fn with_group(mut self, group: impl Into<Ref>) -> Self {
        self.groups.push(group.into());
        self
    }

    /// Sets the room reference.
    pub fn with_room(mut self, room: impl Into<Ref>) -> Self {
        self.room = Some(room.into());
        self
    }
}

/// A lesson-carrying course in snapshot order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CourseEntry {
    /// A plain course.
    Plain(Course),
    /// A composite course.
    Super(SuperCourse),
}

impl CourseEntry {
    /// Reference of the course.
    pub fn id(&self) -> &Ref {
        match self {
            Self::Plain(c) => &c.id,
            Self::Super(s) => &s.id,
        }
    }

    /// Subject reference.
    pub fn subject(&self) -> &Ref {
        match self {
            Self::Plain(c) => &c.subject,
            Self::Super(s) => &s.subject,
        }
    }

    /// Lesson occurrences.
    pub fn lessons(&self) -> &[Lesson] {
        match self {
            Self::Plain(c) => &c.lessons,
            Self::Super(s) => &s.lessons,
        }
    }

    /// Placed lessons only.
    pub fn placed_lessons(&self) -> impl Iterator<Item = &Lesson> {
        self.lessons().iter().filter(|l| l.is_placed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_builder() {
        let c = Course::new("c1", "ma")
            .with_teacher("t1")
            .with_teacher("t2")
            .with_group("g1")
            .with_room("r1")
            .with_lesson(Lesson::new(0, 1, 2).with_footnote("*"));

        assert_eq!(c.teachers, vec![Ref::from("t1"), Ref::from("t2")]);
        assert_eq!(c.room, Some(Ref::from("r1")));
        assert_eq!(c.lessons[0].duration, 2);
        assert_eq!(c.lessons[0].footnote, "*");
    }

    #[test]
    fn test_placed_lessons_skip_unplaced() {
        let entry = CourseEntry::Super(
            SuperCourse::new("s1", "re")
                .with_lesson(Lesson::new(2, 0, 1))
                .with_lesson(Lesson::unplaced(1))
                .with_lesson(Lesson::new(0, 3, 1)),
        );
        let days: Vec<i32> = entry.placed_lessons().map(|l| l.day).collect();
        assert_eq!(days, vec![2, 0]);
        assert_eq!(entry.lessons().len(), 3);
    }
}
