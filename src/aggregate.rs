//! Per-teacher resource aggregation for composite courses.
//!
//! A super-course places the lessons but owns no teachers, groups or
//! rooms; those come from its sub-courses. A teacher may sit in several
//! sub-courses of the same super-course and must see one merged view:
//! every group and candidate room of those sub-courses, plus every other
//! teacher sharing any of them.

use log::warn;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::Result;
use crate::models::{Lesson, Ref, SuperCourse};
use crate::resolve::resolve_used_rooms;
use crate::snapshot::Snapshot;

/// Resources one teacher sees on a composite course.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeacherResources {
    /// Other teachers sharing at least one sub-course.
    pub co_teachers: BTreeSet<Ref>,
    /// Groups of the teacher's sub-courses.
    pub groups: BTreeSet<Ref>,
    /// Room references of the teacher's sub-courses, still unresolved.
    pub candidate_rooms: BTreeSet<Ref>,
}

impl TeacherResources {
    /// Rooms of `lesson` that are reachable from the candidate rooms.
    ///
    /// # Errors
    /// `NotARoom` if a candidate is not room-like.
    pub fn used_rooms(&self, snapshot: &Snapshot, lesson: &Lesson) -> Result<Vec<Ref>> {
        let mut used = Vec::new();
        for candidate in &self.candidate_rooms {
            for room in resolve_used_rooms(snapshot, candidate, &lesson.rooms)? {
                if !used.contains(&room) {
                    used.push(room);
                }
            }
        }
        Ok(used)
    }
}

/// Merged resources keyed by teacher.
pub type ResourceMap = BTreeMap<Ref, TeacherResources>;

/// Builds the per-teacher view of a super-course.
///
/// Unknown sub-course references are reported and skipped.
pub fn aggregate_super_course(snapshot: &Snapshot, course: &SuperCourse) -> ResourceMap {
    let mut map = ResourceMap::new();
    for sub_ref in &course.sub_courses {
        let Some(sub) = snapshot.sub_course(sub_ref) else {
            warn!("Unknown SubCourse {sub_ref} in SuperCourse {}", course.id);
            continue;
        };
        for teacher in &sub.teachers {
            let entry = map.entry(teacher.clone()).or_default();
            entry.co_teachers.extend(
                sub.teachers
                    .iter()
                    .filter(|other| *other != teacher)
                    .cloned(),
            );
            entry.groups.extend(sub.groups.iter().cloned());
            if let Some(room) = &sub.room {
                entry.candidate_rooms.insert(room.clone());
            }
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubCourse;

    fn composite() -> (Snapshot, SuperCourse, Ref, Ref) {
        let mut b = Snapshot::builder();
        let reg = b.registry_mut();
        let r1 = reg.register_room("R1", "", vec![]).unwrap();
        let r2 = reg.register_room("R2", "", vec![]).unwrap();
        let sc = SuperCourse::new("sc", "re")
            .with_sub_course("sub1")
            .with_sub_course("sub2")
            .with_sub_course("sub3");
        b.add_sub_course(
            SubCourse::new("sub1")
                .with_teacher("T")
                .with_group("G1")
                .with_room(r1.clone()),
        )
        .add_sub_course(
            SubCourse::new("sub2")
                .with_teacher("T")
                .with_teacher("U")
                .with_group("G2")
                .with_room(r2.clone()),
        )
        .add_sub_course(SubCourse::new("sub3").with_teacher("V").with_group("G1"))
        .add_super_course(sc.clone());
        let (snap, _) = b.build();
        (snap, sc, r1, r2)
    }

    #[test]
    fn test_shared_teacher_merged() {
        let (snap, sc, r1, r2) = composite();
        let map = aggregate_super_course(&snap, &sc);
        assert_eq!(map.len(), 3);

        let t = &map[&Ref::from("T")];
        let groups: Vec<&str> = t.groups.iter().map(Ref::as_str).collect();
        assert_eq!(groups, vec!["G1", "G2"]);
        assert_eq!(t.co_teachers, BTreeSet::from([Ref::from("U")]));
        assert_eq!(t.candidate_rooms, BTreeSet::from([r1, r2]));
    }

    #[test]
    fn test_co_teachers_only_from_shared_sub_courses() {
        let (snap, sc, _, _) = composite();
        let map = aggregate_super_course(&snap, &sc);
        assert_eq!(map[&Ref::from("U")].co_teachers, BTreeSet::from([Ref::from("T")]));
        assert!(map[&Ref::from("V")].co_teachers.is_empty());
        assert!(map[&Ref::from("V")].candidate_rooms.is_empty());
    }

    #[test]
    fn test_used_rooms_filtered_by_lesson() {
        let (snap, sc, _, r2) = composite();
        let map = aggregate_super_course(&snap, &sc);
        let lesson = Lesson::new(0, 0, 1).with_rooms(vec![r2.clone()]);
        let used = map[&Ref::from("T")].used_rooms(&snap, &lesson).unwrap();
        assert_eq!(used, vec![r2]);
        let used = map[&Ref::from("V")].used_rooms(&snap, &lesson).unwrap();
        assert!(used.is_empty());
    }

    #[test]
    fn test_unknown_sub_course_skipped() {
        let (snap, sc, _, _) = composite();
        let sc = sc.with_sub_course("missing");
        let map = aggregate_super_course(&snap, &sc);
        assert_eq!(map.len(), 3);
    }
}
