//! Loaded timetable snapshot.
//!
//! A [`SnapshotBuilder`] collects entities during the load phase; calling
//! [`SnapshotBuilder::build`] completes the room registry and freezes
//! everything into a read-only [`Snapshot`]. Queries borrow the snapshot
//! immutably, so it can be shared between threads without locking.

use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};

use crate::error::{Result, TimetableError};
use crate::models::{
    Class, Course, CourseEntry, Group, Ref, RoomKind, SubCourse, Subject, SuperCourse, Teacher,
};
use crate::registry::Registry;

/// Extra fields attached to a teacher's printed page.
pub type PageFields = BTreeMap<String, serde_json::Value>;

/// Immutable, fully loaded timetable data.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    registry: Registry,
    teachers: Vec<Teacher>,
    teacher_index: HashMap<Ref, usize>,
    subjects: HashMap<Ref, Subject>,
    classes: Vec<Class>,
    groups: HashMap<Ref, Group>,
    courses: Vec<CourseEntry>,
    course_index: HashMap<Ref, usize>,
    sub_courses: Vec<SubCourse>,
    sub_course_index: HashMap<Ref, usize>,
    page_fields: HashMap<Ref, PageFields>,
}

impl Snapshot {
    /// Starts a load.
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::default()
    }

    /// The room registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Teachers in load order.
    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    /// Looks up a teacher.
    pub fn teacher(&self, id: &Ref) -> Option<&Teacher> {
        self.teacher_index.get(id).map(|&i| &self.teachers[i])
    }

    /// Looks up a subject.
    pub fn subject(&self, id: &Ref) -> Option<&Subject> {
        self.subjects.get(id)
    }

    /// Classes in load order.
    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    /// Looks up a group.
    pub fn group(&self, id: &Ref) -> Option<&Group> {
        self.groups.get(id)
    }

    /// All lesson-carrying courses in load order.
    pub fn courses(&self) -> &[CourseEntry] {
        &self.courses
    }

    /// Looks up a lesson-carrying course.
    pub fn course(&self, id: &Ref) -> Option<&CourseEntry> {
        self.course_index.get(id).map(|&i| &self.courses[i])
    }

    /// Plain courses in load order.
    pub fn plain_courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter().filter_map(|c| match c {
            CourseEntry::Plain(c) => Some(c),
            CourseEntry::Super(_) => None,
        })
    }

    /// Super-courses in load order.
    pub fn super_courses(&self) -> impl Iterator<Item = &SuperCourse> {
        self.courses.iter().filter_map(|c| match c {
            CourseEntry::Super(s) => Some(s),
            CourseEntry::Plain(_) => None,
        })
    }

    /// Sub-courses in load order.
    pub fn sub_courses(&self) -> &[SubCourse] {
        &self.sub_courses
    }

    /// Looks up a sub-course.
    pub fn sub_course(&self, id: &Ref) -> Option<&SubCourse> {
        self.sub_course_index.get(id).map(|&i| &self.sub_courses[i])
    }

    /// Extra page fields for a teacher.
    pub fn page_fields(&self, teacher: &Ref) -> Option<&PageFields> {
        self.page_fields.get(teacher)
    }

    /// Resolves a reference that must be room-like.
    ///
    /// # Errors
    /// `NotARoom` if the reference names anything else (or nothing). This
    /// means the snapshot is inconsistent.
    pub fn room_kind(&self, id: &Ref) -> Result<&RoomKind> {
        self.registry.get(id).ok_or_else(|| TimetableError::NotARoom {
            reference: id.clone(),
            found: self.kind_of(id).unwrap_or("nothing").to_string(),
        })
    }

    /// Display tag of any tagged entity (room-like, teacher, subject,
    /// class, group).
    pub fn tag_of(&self, id: &Ref) -> Option<&str> {
        if let Some(tag) = self.registry.tag_of(id) {
            return Some(tag);
        }
        if let Some(t) = self.teacher(id) {
            return Some(&t.tag);
        }
        if let Some(s) = self.subjects.get(id) {
            return Some(&s.tag);
        }
        if let Some(g) = self.groups.get(id) {
            return Some(&g.tag);
        }
        self.classes.iter().find(|c| c.id == *id).map(|c| c.tag.as_str())
    }

    /// Kind name of the entity behind a reference.
    pub fn kind_of(&self, id: &Ref) -> Option<&'static str> {
        if let Some(k) = self.registry.get(id) {
            Some(k.kind_name())
        } else if self.teacher_index.contains_key(id) {
            Some("Teacher")
        } else if self.subjects.contains_key(id) {
            Some("Subject")
        } else if self.groups.contains_key(id) {
            Some("Group")
        } else if self.classes.iter().any(|c| c.id == *id) {
            Some("Class")
        } else if let Some(c) = self.course(id) {
            Some(match c {
                CourseEntry::Plain(_) => "Course",
                CourseEntry::Super(_) => "SuperCourse",
            })
        } else if self.sub_course_index.contains_key(id) {
            Some("SubCourse")
        } else {
            None
        }
    }

    /// Classes whose whole-class group or divisions contain `group`, in
    /// load order. A group may be shared by several classes.
    pub fn classes_of_group<'s>(&'s self, group: &'s Ref) -> impl Iterator<Item = &'s Class> {
        self.classes.iter().filter(move |c| c.contains_group(group))
    }
}

/// Load-phase collector for a [`Snapshot`].
///
/// Rooms and room groups go straight into the registry via
/// [`registry_mut`](Self::registry_mut). Every other entity is added with
/// its own `add_*` method; a reference seen twice is reported and the
/// later entity dropped.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    snapshot: Snapshot,
    reports: Vec<TimetableError>,
}

impl SnapshotBuilder {
    /// Mutable access to the room registry while loading.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.snapshot.registry
    }

    /// Records a load report produced outside the builder (e.g. a
    /// rejected room tag).
    pub fn report(&mut self, error: TimetableError) {
        self.reports.push(error);
    }

    /// Adds a teacher.
    pub fn add_teacher(&mut self, teacher: Teacher) -> &mut Self {
        if self.claim(&teacher.id) {
            let s = &mut self.snapshot;
            s.teacher_index.insert(teacher.id.clone(), s.teachers.len());
            s.teachers.push(teacher);
        }
        self
    }

    /// Adds a subject.
    pub fn add_subject(&mut self, subject: Subject) -> &mut Self {
        if self.claim(&subject.id) {
            self.snapshot.subjects.insert(subject.id.clone(), subject);
        }
        self
    }

    /// Adds a group.
    pub fn add_group(&mut self, group: Group) -> &mut Self {
        if self.claim(&group.id) {
            self.snapshot.groups.insert(group.id.clone(), group);
        }
        self
    }

    /// Adds a class. Its groups must be added separately.
    pub fn add_class(&mut self, class: Class) -> &mut Self {
        if self.claim(&class.id) {
            self.snapshot.classes.push(class);
        }
        self
    }

    /// Adds a plain course.
    pub fn add_course(&mut self, course: Course) -> &mut Self {
        self.add_entry(CourseEntry::Plain(course))
    }

    /// Adds a super-course.
    pub fn add_super_course(&mut self, course: SuperCourse) -> &mut Self {
        self.add_entry(CourseEntry::Super(course))
    }

    /// Adds a sub-course.
    pub fn add_sub_course(&mut self, sub: SubCourse) -> &mut Self {
        if self.claim(&sub.id) {
            let s = &mut self.snapshot;
            s.sub_course_index.insert(sub.id.clone(), s.sub_courses.len());
            s.sub_courses.push(sub);
        }
        self
    }

    /// Attaches extra fields to a teacher's printed page.
    pub fn add_page_fields(&mut self, teacher: impl Into<Ref>, fields: PageFields) -> &mut Self {
        self.snapshot
            .page_fields
            .entry(teacher.into())
            .or_default()
            .extend(fields);
        self
    }

    /// Completes the registry and freezes the snapshot.
    ///
    /// Returns the snapshot together with all load reports collected so
    /// far. Reports never prevent the snapshot from being built.
    pub fn build(mut self) -> (Snapshot, Vec<TimetableError>) {
        let group_reports = self.snapshot.registry.finalize_room_groups();
        self.reports.extend(group_reports);
        debug!(
            "Snapshot loaded: {} room entities, {} teachers, {} courses, {} reports",
            self.snapshot.registry.len(),
            self.snapshot.teachers.len(),
            self.snapshot.courses.len(),
            self.reports.len()
        );
        (self.snapshot, self.reports)
    }

    fn add_entry(&mut self, entry: CourseEntry) -> &mut Self {
        if self.claim(entry.id()) {
            let s = &mut self.snapshot;
            s.course_index.insert(entry.id().clone(), s.courses.len());
            s.courses.push(entry);
        }
        self
    }

    /// Returns `false` (and reports) if `id` is already taken. Otherwise
    /// reserves it so the registry never allocates it for a room.
    fn claim(&mut self, id: &Ref) -> bool {
        if self.snapshot.kind_of(id).is_some() {
            warn!("Element defined twice: {id}");
            self.reports.push(TimetableError::DuplicateReference {
                reference: id.clone(),
            });
            return false;
        }
        self.snapshot.registry.reserve(id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Division;

    #[test]
    fn test_build_collects_group_reports() {
        let mut b = Snapshot::builder();
        let r1 = b.registry_mut().register_room("R1", "", vec![]).unwrap();
        b.registry_mut()
            .register_room_group("", "", vec![r1, Ref::from("bad")])
            .unwrap();
        let (snap, reports) = b.build();
        assert_eq!(reports.len(), 1);
        assert_eq!(snap.registry().len(), 2);
    }

    #[test]
    fn test_duplicate_reference_reported() {
        let mut b = Snapshot::builder();
        b.add_teacher(Teacher::new("t1", "AB"))
            .add_subject(Subject::new("t1", "Ma"));
        let (snap, reports) = b.build();
        assert!(matches!(
            reports[0],
            TimetableError::DuplicateReference { .. }
        ));
        assert!(snap.subject(&Ref::from("t1")).is_none());
        assert_eq!(snap.kind_of(&Ref::from("t1")), Some("Teacher"));
    }

    #[test]
    fn test_room_kind_not_a_room() {
        let mut b = Snapshot::builder();
        b.add_teacher(Teacher::new("t1", "AB"));
        let (snap, _) = b.build();
        let err = snap.room_kind(&Ref::from("t1")).unwrap_err();
        match err {
            TimetableError::NotARoom { found, .. } => assert_eq!(found, "Teacher"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(snap.room_kind(&Ref::from("zz")).is_err());
    }

    #[test]
    fn test_tag_lookup_and_classes_of_group() {
        let mut b = Snapshot::builder();
        b.add_group(Group::new("g10a", ""))
            .add_group(Group::new("gA", "A"))
            .add_class(
                Class::new("c10a", "10A", "g10a")
                    .with_division(Division::new("ab", vec!["gA".into()])),
            );
        let (snap, _) = b.build();
        assert_eq!(snap.tag_of(&Ref::from("gA")), Some("A"));
        assert_eq!(snap.tag_of(&Ref::from("c10a")), Some("10A"));
        let group = Ref::from("gA");
        let owners: Vec<&str> = snap
            .classes_of_group(&group)
            .map(|c| c.tag.as_str())
            .collect();
        assert_eq!(owners, vec!["10A"]);
    }

    #[test]
    fn test_shared_group_has_every_class() {
        let mut b = Snapshot::builder();
        b.add_class(
            Class::new("c10a", "10A", "g10a")
                .with_division(Division::new("x", vec!["a1".into(), "s".into()])),
        )
        .add_class(
            Class::new("c10b", "10B", "g10b")
                .with_division(Division::new("x", vec!["b1".into(), "s".into()])),
        );
        let (snap, _) = b.build();
        let group = Ref::from("s");
        let owners: Vec<&str> = snap
            .classes_of_group(&group)
            .map(|c| c.tag.as_str())
            .collect();
        assert_eq!(owners, vec!["10A", "10B"]);
    }

    #[test]
    fn test_room_refs_never_reuse_loaded_ids() {
        let mut b = Snapshot::builder();
        b.add_teacher(Teacher::new("room:1", "AB"));
        let r1 = b.registry_mut().register_room("R1", "", vec![]).unwrap();
        let (snap, reports) = b.build();
        assert!(reports.is_empty());
        assert_ne!(r1.as_str(), "room:1");
        assert_eq!(snap.tag_of(&Ref::from("room:1")), Some("AB"));
        assert_eq!(snap.kind_of(&Ref::from("room:1")), Some("Teacher"));
        assert_eq!(snap.tag_of(&r1), Some("R1"));
    }

    #[test]
    fn test_course_listing() {
        let mut b = Snapshot::builder();
        b.add_course(Course::new("c1", "ma"))
            .add_super_course(SuperCourse::new("s1", "re").with_sub_course("sub1"))
            .add_sub_course(SubCourse::new("sub1").with_teacher("t1"));
        let (snap, reports) = b.build();
        assert!(reports.is_empty());
        assert_eq!(snap.courses().len(), 2);
        assert_eq!(snap.plain_courses().count(), 1);
        assert_eq!(snap.super_courses().next().unwrap().id, Ref::from("s1"));
        assert_eq!(snap.sub_courses().len(), 1);
        assert_eq!(snap.kind_of(&Ref::from("s1")), Some("SuperCourse"));
    }
}
