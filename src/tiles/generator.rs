//! Teacher tile generation.
//!
//! # Algorithm
//!
//! For every course in load order, for every placed lesson:
//! 1. Plain course: each teacher gets a tile showing the course groups,
//!    the lesson rooms and the other teachers of the course.
//! 2. Super-course: the sub-course resources are merged per teacher; each
//!    teacher gets one tile showing the merged groups and co-teachers, and
//!    the lesson rooms reachable from their sub-courses' room references.
//! 3. Every list is converted to sorted display labels.
//!
//! Finally each teacher's tiles are ordered by (day, hour) with a stable
//! sort, unless disabled in the configuration.
//!
//! # Complexity
//! O(L * T) tiles where L = placed lessons and T = teachers per course.

use log::debug;
use std::collections::BTreeMap;

use crate::aggregate::aggregate_super_course;
use crate::config::PrintConfig;
use crate::error::{Result, TimetableError};
use crate::models::{Course, CourseEntry, Lesson, Ref, SuperCourse, TeacherPage, Tile};
use crate::snapshot::Snapshot;

use super::labels::{display_tag, sort_list, split_groups};

/// Tiles keyed by teacher.
pub type TileMap = BTreeMap<Ref, Vec<Tile>>;

/// Projects a snapshot onto per-teacher tiles and pages.
///
/// Holds only shared borrows; any number of generators may run over the
/// same snapshot at once.
#[derive(Debug, Clone, Copy)]
pub struct TileGenerator<'a> {
    snapshot: &'a Snapshot,
    config: &'a PrintConfig,
}

impl<'a> TileGenerator<'a> {
    /// Creates a generator.
    pub fn new(snapshot: &'a Snapshot, config: &'a PrintConfig) -> Self {
        Self { snapshot, config }
    }

    /// Tiles for every teacher that has at least one placed lesson.
    ///
    /// # Errors
    /// `NotARoom` if a course room reference is not room-like.
    pub fn tiles_for_all_teachers(&self) -> Result<TileMap> {
        self.collect(None)
    }

    /// Tiles for one teacher. Empty (not an error) if the teacher has no
    /// placed lessons or is unknown.
    ///
    /// # Errors
    /// `NotARoom` if a course room reference is not room-like.
    pub fn tiles_for_teacher(&self, teacher: &Ref) -> Result<Vec<Tile>> {
        let mut map = self.collect(Some(teacher))?;
        Ok(map.remove(teacher).unwrap_or_default())
    }

    /// Pages for all teachers, in snapshot order.
    ///
    /// Teachers without tiles are left out unless
    /// `include_empty_pages` is set.
    pub fn teacher_pages(&self) -> Result<Vec<TeacherPage>> {
        let mut tiles = self.collect(None)?;
        let mut pages = Vec::new();
        for teacher in self.snapshot.teachers() {
            let activities = match tiles.remove(&teacher.id) {
                Some(t) => t,
                None if self.config.include_empty_pages => Vec::new(),
                None => continue,
            };
            pages.push(self.page(&teacher.id, &teacher.tag, activities));
        }
        Ok(pages)
    }

    /// The page for one teacher. Always present, with an empty activity
    /// list if the teacher has no tiles.
    ///
    /// # Errors
    /// `UnknownReference` if `teacher` is not a teacher; `NotARoom` as
    /// for [`tiles_for_teacher`](Self::tiles_for_teacher).
    pub fn teacher_page(&self, teacher: &Ref) -> Result<TeacherPage> {
        let t = self
            .snapshot
            .teacher(teacher)
            .ok_or_else(|| TimetableError::UnknownReference {
                kind: "Teacher",
                reference: teacher.clone(),
            })?;
        let activities = self.tiles_for_teacher(teacher)?;
        Ok(self.page(&t.id, &t.tag, activities))
    }

    fn page(&self, id: &Ref, tag: &str, activities: Vec<Tile>) -> TeacherPage {
        let mut page = TeacherPage::new(tag, activities);
        if let Some(fields) = self.snapshot.page_fields(id) {
            page.extend_page(fields.clone());
        }
        page
    }

    /// Walks all courses, keeping only `only`'s tiles if given.
    fn collect(&self, only: Option<&Ref>) -> Result<TileMap> {
        let mut map = TileMap::new();
        for entry in self.snapshot.courses() {
            let lessons: Vec<&Lesson> = entry.placed_lessons().collect();
            match entry {
                CourseEntry::Plain(course) => self.plain_course(course, &lessons, only, &mut map),
                CourseEntry::Super(course) => self.super_course(course, &lessons, only, &mut map)?,
            }
        }
        if self.config.sort_tiles {
            for tiles in map.values_mut() {
                tiles.sort_by_key(|t| (t.day, t.hour));
            }
        }
        debug!(
            "Generated {} tiles for {} teachers",
            map.values().map(Vec::len).sum::<usize>(),
            map.len()
        );
        Ok(map)
    }

    fn plain_course(
        &self,
        course: &Course,
        lessons: &[&Lesson],
        only: Option<&Ref>,
        map: &mut TileMap,
    ) {
        let subject = display_tag(self.snapshot, &course.subject);
        let groups = split_groups(self.snapshot, &course.groups, &self.config.group_separator);

        for &lesson in lessons {
            let rooms = sort_list(self.snapshot, &lesson.rooms);
            for teacher in &course.teachers {
                if only.is_some_and(|t| t != teacher) {
                    continue;
                }
                let others = sort_list(
                    self.snapshot,
                    course.teachers.iter().filter(|t| *t != teacher),
                );
                let tile = make_tile(lesson, &subject, groups.clone(), others, rooms.clone());
                map.entry(teacher.clone()).or_default().push(tile);
            }
        }
    }

    fn super_course(
        &self,
        course: &SuperCourse,
        lessons: &[&Lesson],
        only: Option<&Ref>,
        map: &mut TileMap,
    ) -> Result<()> {
        let subject = display_tag(self.snapshot, &course.subject);
        let resources = aggregate_super_course(self.snapshot, course);

        for (teacher, res) in &resources {
            if only.is_some_and(|t| t != teacher) {
                continue;
            }
            let groups = split_groups(self.snapshot, &res.groups, &self.config.group_separator);
            let others = sort_list(self.snapshot, &res.co_teachers);
            for &lesson in lessons {
                let used = res.used_rooms(self.snapshot, lesson)?;
                let rooms = sort_list(self.snapshot, &used);
                let tile = make_tile(lesson, &subject, groups.clone(), others.clone(), rooms);
                map.entry(teacher.clone()).or_default().push(tile);
            }
        }
        Ok(())
    }
}

fn make_tile(
    lesson: &Lesson,
    subject: &str,
    groups: Vec<String>,
    teachers: Vec<String>,
    rooms: Vec<String>,
) -> Tile {
    Tile {
        day: lesson.day,
        hour: lesson.hour,
        duration: lesson.duration,
        subject: subject.to_string(),
        groups,
        teachers,
        rooms,
        background: lesson.background.clone(),
        footnote: lesson.footnote.clone(),
    }
}
