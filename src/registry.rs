//! Identity registry for room-like resources.
//!
//! Rooms, room groups and room-choice groups share a single tag namespace.
//! The registry allocates references, enforces tag uniqueness across all
//! three kinds, synthesizes tags for untagged room groups (`{n}`) and for
//! choice groups (`[n]`), and de-duplicates choice groups by their
//! canonical name.
//!
//! # Lifecycle
//!
//! All mutation happens while loading. Once the registry has been moved
//! into a [`Snapshot`](crate::snapshot::Snapshot) it is only read.
//!
//! # Canonical Names
//!
//! A choice group's canonical name is the tags of its rooms joined by `,`
//! in the order supplied. `[r1, r2]` and `[r2, r1]` therefore produce two
//! distinct choice groups; callers that want them merged must pass a
//! consistent order.

use log::{debug, warn};
use std::collections::{HashMap, HashSet};

use crate::error::{Result, TimetableError};
use crate::models::{Ref, Room, RoomChoiceGroup, RoomGroup, RoomKind, TimeSlot};

/// Registry of room-like entities, keyed by reference and by tag.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entities: HashMap<Ref, RoomKind>,
    /// Registration order, for deterministic iteration.
    order: Vec<Ref>,
    tags: HashMap<String, Ref>,
    /// Choice-group canonical name → reference.
    choice_names: HashMap<String, Ref>,
    /// Refs held by non-room entities; never handed out.
    reserved: HashSet<Ref>,
    allocated: usize,
    group_tag_counter: usize,
    choice_tag_counter: usize,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a room.
    ///
    /// # Errors
    /// `DuplicateTag` if the tag is already used by any room-like entity.
    /// The room is not registered in that case.
    pub fn register_room(
        &mut self,
        tag: impl Into<String>,
        name: impl Into<String>,
        not_available: Vec<TimeSlot>,
    ) -> Result<Ref> {
        let tag = tag.into();
        self.claim_tag(&tag)?;
        let id = self.allocate("room");
        self.tags.insert(tag.clone(), id.clone());
        self.insert(RoomKind::Room(Room {
            id: id.clone(),
            tag,
            name: name.into(),
            not_available,
        }));
        Ok(id)
    }

    /// Registers a room group. The tag may be empty; it is then
    /// synthesized by [`finalize_room_groups`](Self::finalize_room_groups).
    ///
    /// # Errors
    /// `DuplicateTag` if a non-empty tag is already in use.
    pub fn register_room_group(
        &mut self,
        tag: impl Into<String>,
        name: impl Into<String>,
        rooms: Vec<Ref>,
    ) -> Result<Ref> {
        let tag = tag.into();
        if !tag.is_empty() {
            self.claim_tag(&tag)?;
        }
        let id = self.allocate("roomgroup");
        if !tag.is_empty() {
            self.tags.insert(tag.clone(), id.clone());
        }
        self.insert(RoomKind::Group(RoomGroup {
            id: id.clone(),
            tag,
            name: name.into(),
            rooms,
        }));
        Ok(id)
    }

    /// Completes the room groups once all rooms are registered.
    ///
    /// - Members that are not registered rooms are dropped and reported.
    /// - Untagged groups get the next free `{n}` tag. A supplied name is
    ///   prefixed with the member tag list (`"R1,R2:: name"`).
    /// - Groups without a name are named by their member tag list.
    ///
    /// Returns the reports; the groups themselves are always kept.
    pub fn finalize_room_groups(&mut self) -> Vec<TimetableError> {
        let mut reports = Vec::new();
        let group_ids: Vec<Ref> = self
            .order
            .iter()
            .filter(|id| matches!(self.entities.get(*id), Some(RoomKind::Group(_))))
            .cloned()
            .collect();

        for gid in group_ids {
            let Some(RoomKind::Group(group)) = self.entities.get(&gid) else {
                continue;
            };
            let owner = if group.tag.is_empty() {
                gid.to_string()
            } else {
                group.tag.clone()
            };
            let (rooms, tags, errors) = self.resolve_rooms(&group.rooms, &owner);
            reports.extend(errors);

            let needs_tag = group.tag.is_empty();
            let new_tag = if needs_tag {
                Some(self.next_free_tag('{', '}', TagSequence::Group))
            } else {
                None
            };

            let taglist = tags.join(",");
            let Some(RoomKind::Group(group)) = self.entities.get_mut(&gid) else {
                continue;
            };
            if let Some(tag) = new_tag {
                debug!("Room group {gid} gets tag {tag}");
                group.tag = tag.clone();
                self.tags.insert(tag, gid.clone());
                group.name = if group.name.is_empty() {
                    taglist
                } else {
                    format!("{taglist}:: {}", group.name)
                };
            } else if group.name.is_empty() {
                group.name = taglist;
            }
            group.rooms = rooms;
        }
        reports
    }

    /// Returns the choice group for `rooms`, creating it if needed.
    ///
    /// References that are not registered rooms are skipped and reported;
    /// the group is built from the rooms that did resolve. A group whose
    /// canonical name (resolved tags joined by `,`) already exists is
    /// reused.
    pub fn get_or_create_choice_group(&mut self, rooms: &[Ref]) -> (Ref, Vec<TimetableError>) {
        let (reflist, tags, errors) = self.resolve_rooms(rooms, "new RoomChoiceGroup");
        let name = tags.join(",");
        if let Some(id) = self.choice_names.get(&name) {
            return (id.clone(), errors);
        }

        let tag = self.next_free_tag('[', ']', TagSequence::Choice);
        let id = self.allocate("choice");
        debug!("New room choice group {tag} = {name}");
        self.tags.insert(tag.clone(), id.clone());
        self.choice_names.insert(name.clone(), id.clone());
        self.insert(RoomKind::Choice(RoomChoiceGroup {
            id: id.clone(),
            tag,
            name,
            rooms: reflist,
        }));
        (id, errors)
    }

    /// Looks up a room-like entity.
    pub fn get(&self, id: &Ref) -> Option<&RoomKind> {
        self.entities.get(id)
    }

    /// Looks up a plain room.
    pub fn room(&self, id: &Ref) -> Option<&Room> {
        match self.entities.get(id) {
            Some(RoomKind::Room(r)) => Some(r),
            _ => None,
        }
    }

    /// Reference registered under `tag`.
    pub fn by_tag(&self, tag: &str) -> Option<&Ref> {
        self.tags.get(tag)
    }

    /// Tag of a room-like entity.
    pub fn tag_of(&self, id: &Ref) -> Option<&str> {
        self.entities.get(id).map(RoomKind::tag)
    }

    /// All entities in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RoomKind> {
        self.order.iter().filter_map(|id| self.entities.get(id))
    }

    /// Number of registered entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn claim_tag(&self, tag: &str) -> Result<()> {
        if self.tags.contains_key(tag) {
            warn!("Room tag defined twice: {tag}");
            return Err(TimetableError::DuplicateTag {
                tag: tag.to_string(),
            });
        }
        Ok(())
    }

    /// Marks `id` as taken by an entity outside the registry.
    pub(crate) fn reserve(&mut self, id: &Ref) {
        self.reserved.insert(id.clone());
    }

    fn allocate(&mut self, kind: &str) -> Ref {
        loop {
            self.allocated += 1;
            let id = Ref::numbered(kind, self.allocated);
            if !self.reserved.contains(&id) && !self.entities.contains_key(&id) {
                return id;
            }
        }
    }

    fn insert(&mut self, entity: RoomKind) {
        let id = entity.id().clone();
        self.order.push(id.clone());
        self.entities.insert(id, entity);
    }

    /// Splits `rooms` into registered rooms (with their tags) and reports
    /// for the rest.
    fn resolve_rooms(
        &self,
        rooms: &[Ref],
        owner: &str,
    ) -> (Vec<Ref>, Vec<String>, Vec<TimetableError>) {
        let mut reflist = Vec::with_capacity(rooms.len());
        let mut taglist = Vec::with_capacity(rooms.len());
        let mut errors = Vec::new();
        for rref in rooms {
            match self.room(rref) {
                Some(room) => {
                    reflist.push(rref.clone());
                    taglist.push(room.tag.clone());
                }
                None => {
                    warn!("Invalid room in {owner}: {rref}");
                    errors.push(TimetableError::InvalidMember {
                        owner: owner.to_string(),
                        member: rref.clone(),
                    });
                }
            }
        }
        (reflist, taglist, errors)
    }

    fn next_free_tag(&mut self, open: char, close: char, seq: TagSequence) -> String {
        let counter = match seq {
            TagSequence::Group => &mut self.group_tag_counter,
            TagSequence::Choice => &mut self.choice_tag_counter,
        };
        loop {
            *counter += 1;
            let tag = format!("{open}{counter}{close}");
            if !self.tags.contains_key(&tag) {
                return tag;
            }
        }
    }
}

#[derive(Clone, Copy)]
enum TagSequence {
    Group,
    Choice,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn two_rooms() -> (Registry, Ref, Ref) {
        let mut reg = Registry::new();
        let r1 = reg.register_room("R1", "Room 1", vec![]).unwrap();
        let r2 = reg.register_room("R2", "Room 2", vec![]).unwrap();
        (reg, r1, r2)
    }

    #[test]
    fn test_duplicate_room_tag_rejected() {
        let (mut reg, _, _) = two_rooms();
        let err = reg.register_room("R1", "Again", vec![]).unwrap_err();
        assert!(matches!(err, TimetableError::DuplicateTag { ref tag } if tag == "R1"));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_group_tag_collides_with_room_tag() {
        let (mut reg, r1, _) = two_rooms();
        assert!(reg.register_room_group("R2", "", vec![r1]).is_err());
    }

    #[test]
    fn test_room_not_available_kept() {
        let mut reg = Registry::new();
        let r = reg
            .register_room("Gym", "Gymnasium", vec![TimeSlot::new(4, 6)])
            .unwrap();
        assert_eq!(reg.room(&r).unwrap().not_available, vec![TimeSlot::new(4, 6)]);
    }

    #[test]
    fn test_finalize_synthesizes_tag_and_name() {
        let (mut reg, r1, r2) = two_rooms();
        let g = reg
            .register_room_group("", "", vec![r1.clone(), r2.clone()])
            .unwrap();
        let named = reg.register_room_group("", "Labs", vec![r2.clone()]).unwrap();
        let reports = reg.finalize_room_groups();
        assert!(reports.is_empty());

        let RoomKind::Group(group) = reg.get(&g).unwrap() else {
            panic!("expected a room group");
        };
        assert_eq!(group.tag, "{1}");
        assert_eq!(group.name, "R1,R2");

        let RoomKind::Group(group) = reg.get(&named).unwrap() else {
            panic!("expected a room group");
        };
        assert_eq!(group.tag, "{2}");
        assert_eq!(group.name, "R2:: Labs");
        assert_eq!(reg.by_tag("{2}"), Some(&named));
    }

    #[test]
    fn test_finalize_skips_taken_tag() {
        let (mut reg, r1, _) = two_rooms();
        reg.register_room_group("{1}", "Taken", vec![r1.clone()])
            .unwrap();
        let g = reg.register_room_group("", "", vec![r1]).unwrap();
        reg.finalize_room_groups();
        assert_eq!(reg.tag_of(&g), Some("{2}"));
    }

    #[test]
    fn test_finalize_tagged_group_gets_name() {
        let (mut reg, r1, r2) = two_rooms();
        let g = reg.register_room_group("BOTH", "", vec![r2, r1]).unwrap();
        reg.finalize_room_groups();
        assert_eq!(reg.get(&g).unwrap().name(), "R2,R1");
        assert_eq!(reg.tag_of(&g), Some("BOTH"));
    }

    #[test]
    fn test_finalize_drops_invalid_members() {
        let (mut reg, r1, _) = two_rooms();
        let g = reg
            .register_room_group("G", "", vec![r1.clone(), Ref::from("nowhere")])
            .unwrap();
        let nested = reg.register_room_group("H", "", vec![g.clone()]).unwrap();
        let reports = reg.finalize_room_groups();

        assert_eq!(reports.len(), 2);
        assert!(reports
            .iter()
            .all(|e| matches!(e, TimetableError::InvalidMember { .. })));
        assert_eq!(reg.get(&g).unwrap().member_rooms(), &[r1]);
        assert!(reg.get(&nested).unwrap().member_rooms().is_empty());
    }

    #[test]
    fn test_choice_group_created_and_reused() {
        let (mut reg, r1, r2) = two_rooms();
        let (c1, errs) = reg.get_or_create_choice_group(&[r1.clone(), r2.clone()]);
        assert!(errs.is_empty());
        let choice = reg.get(&c1).unwrap();
        assert_eq!(choice.tag(), "[1]");
        assert_eq!(choice.name(), "R1,R2");

        let before = reg.len();
        let (c2, _) = reg.get_or_create_choice_group(&[r1, r2]);
        assert_eq!(c1, c2);
        assert_eq!(reg.len(), before);
    }

    #[test]
    fn test_choice_group_order_sensitive() {
        let (mut reg, r1, r2) = two_rooms();
        let (a, _) = reg.get_or_create_choice_group(&[r1.clone(), r2.clone()]);
        let (b, _) = reg.get_or_create_choice_group(&[r2, r1]);
        assert_ne!(a, b);
        assert_eq!(reg.tag_of(&b), Some("[2]"));
    }

    #[test]
    fn test_choice_group_partial_resolution() {
        let (mut reg, r1, _) = two_rooms();
        let (c, errs) = reg.get_or_create_choice_group(&[Ref::from("ghost"), r1.clone()]);
        assert_eq!(errs.len(), 1);
        assert!(errs[0].to_string().contains("ghost"));
        assert_eq!(reg.get(&c).unwrap().member_rooms(), &[r1.clone()]);

        // Same resolved tag sequence → same group.
        let (again, errs) = reg.get_or_create_choice_group(&[r1]);
        assert_eq!(again, c);
        assert!(errs.is_empty());
    }

    #[test]
    fn test_choice_tag_skips_existing() {
        let (mut reg, r1, _) = two_rooms();
        reg.register_room("[1]", "Odd name", vec![]).unwrap();
        let (c, _) = reg.get_or_create_choice_group(&[r1]);
        assert_eq!(reg.tag_of(&c), Some("[2]"));
    }

    #[test]
    fn test_allocation_skips_reserved_refs() {
        let mut reg = Registry::new();
        reg.reserve(&Ref::from("room:1"));
        let r = reg.register_room("R1", "", vec![]).unwrap();
        assert_eq!(r.as_str(), "room:2");
        assert!(reg.get(&Ref::from("room:1")).is_none());
    }

    #[test]
    fn test_tags_globally_unique() {
        let (mut reg, r1, r2) = two_rooms();
        reg.register_room_group("", "", vec![r1.clone()]).unwrap();
        reg.register_room_group("{2}", "", vec![r2.clone()]).unwrap();
        reg.register_room_group("", "", vec![r2.clone()]).unwrap();
        reg.finalize_room_groups();
        reg.get_or_create_choice_group(&[r1.clone()]);
        reg.get_or_create_choice_group(&[r2.clone(), r1.clone()]);
        reg.get_or_create_choice_group(&[r1, r2]);

        let mut seen = HashSet::new();
        for entity in reg.iter() {
            assert!(seen.insert(entity.tag().to_string()), "duplicate {}", entity.tag());
        }
        assert_eq!(seen.len(), reg.len());
    }
}
