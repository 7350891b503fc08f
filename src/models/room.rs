//! Room-like resources.
//!
//! Three kinds share one tag namespace:
//! - **Room**: a single physical room.
//! - **RoomGroup**: a fixed set of rooms that are all used together.
//! - **RoomChoiceGroup**: candidate rooms, one of which is chosen when a
//!   lesson is placed.
//!
//! [`RoomKind`] is the closed union over the three, used wherever a
//! reference may point at any of them.

use serde::{Deserialize, Serialize};

use super::Ref;

/// A blocked time slot (day and hour indices, 0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Day index.
    pub day: i32,
    /// Hour (period) index.
    pub hour: i32,
}

impl TimeSlot {
    /// Creates a time slot.
    pub fn new(day: i32, hour: i32) -> Self {
        Self { day, hour }
    }
}

/// A physical room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique reference.
    pub id: Ref,
    /// Short unique label.
    pub tag: String,
    /// Full name.
    pub name: String,
    /// Slots in which the room cannot be used.
    pub not_available: Vec<TimeSlot>,
}

/// A fixed group of rooms used together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomGroup {
    /// Unique reference.
    pub id: Ref,
    /// Short unique label. Empty until the registry synthesizes one.
    pub tag: String,
    /// Display name. Derived from the member tags if not supplied.
    pub name: String,
    /// Member rooms, in declaration order.
    pub rooms: Vec<Ref>,
}

/// A set of candidate rooms, one of which is chosen per placed lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomChoiceGroup {
    /// Unique reference.
    pub id: Ref,
    /// Short unique label (`[n]` when synthesized).
    pub tag: String,
    /// Canonical name: member tags joined by `,`.
    pub name: String,
    /// Candidate rooms, in the order supplied at creation.
    pub rooms: Vec<Ref>,
}

/// Any room-like entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RoomKind {
    /// A single room.
    Room(Room),
    /// A fixed room group.
    Group(RoomGroup),
    /// A room-choice group.
    Choice(RoomChoiceGroup),
}

impl RoomKind {
    /// Reference of the underlying entity.
    pub fn id(&self) -> &Ref {
        match self {
            Self::Room(r) => &r.id,
            Self::Group(g) => &g.id,
            Self::Choice(c) => &c.id,
        }
    }

    /// Tag of the underlying entity.
    pub fn tag(&self) -> &str {
        match self {
            Self::Room(r) => &r.tag,
            Self::Group(g) => &g.tag,
            Self::Choice(c) => &c.tag,
        }
    }

    /// Display name of the underlying entity.
    pub fn name(&self) -> &str {
        match self {
            Self::Room(r) => &r.name,
            Self::Group(g) => &g.name,
            Self::Choice(c) => &c.name,
        }
    }

    /// The rooms this entity stands for: itself for a plain room, the
    /// member list otherwise.
    pub fn member_rooms(&self) -> &[Ref] {
        match self {
            Self::Room(r) => std::slice::from_ref(&r.id),
            Self::Group(g) => &g.rooms,
            Self::Choice(c) => &c.rooms,
        }
    }

    /// Short kind name for reports.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Room(_) => "Room",
            Self::Group(_) => "RoomGroup",
            Self::Choice(_) => "RoomChoiceGroup",
        }
    }

    /// Whether this is a plain room.
    pub fn is_room(&self) -> bool {
        matches!(self, Self::Room(_))
    }
}
