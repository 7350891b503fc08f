//! Room resolution for placed lessons.
//!
//! A course names its rooms indirectly (a room, a room group or a choice
//! group); a placed lesson records the concrete rooms in use. Resolution
//! intersects the two.

use log::error;

use crate::error::Result;
use crate::models::Ref;
use crate::snapshot::Snapshot;

/// Returns the rooms reachable from `candidate` that appear in `actual`.
///
/// The result keeps the candidate's member order and holds each room at
/// most once. It is always a subset of both the candidate's member rooms
/// and `actual`.
///
/// # Errors
/// `NotARoom` if `candidate` is not room-like. The snapshot is
/// inconsistent and the current query should be abandoned.
pub fn resolve_used_rooms(
    snapshot: &Snapshot,
    candidate: &Ref,
    actual: &[Ref],
) -> Result<Vec<Ref>> {
    let kind = snapshot.room_kind(candidate).inspect_err(|e| error!("{e}"))?;
    let mut used: Vec<Ref> = Vec::new();
    for room in kind.member_rooms() {
        if actual.contains(room) && !used.contains(room) {
            used.push(room.clone());
        }
    }
    Ok(used)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimetableError;
    use crate::models::Teacher;

    struct Fixture {
        snap: Snapshot,
        r1: Ref,
        r2: Ref,
        r3: Ref,
        group: Ref,
        choice: Ref,
    }

    fn fixture() -> Fixture {
        let mut b = Snapshot::builder();
        let reg = b.registry_mut();
        let r1 = reg.register_room("R1", "", vec![]).unwrap();
        let r2 = reg.register_room("R2", "", vec![]).unwrap();
        let r3 = reg.register_room("R3", "", vec![]).unwrap();
        let group = reg
            .register_room_group("LAB", "", vec![r1.clone(), r2.clone()])
            .unwrap();
        let (choice, _) = reg.get_or_create_choice_group(&[r2.clone(), r3.clone()]);
        b.add_teacher(Teacher::new("t1", "AB"));
        let (snap, _) = b.build();
        Fixture {
            snap,
            r1,
            r2,
            r3,
            group,
            choice,
        }
    }

    #[test]
    fn test_plain_room() {
        let f = fixture();
        let used = resolve_used_rooms(&f.snap, &f.r1, &[f.r2.clone(), f.r1.clone()]).unwrap();
        assert_eq!(used, vec![f.r1.clone()]);
        let used = resolve_used_rooms(&f.snap, &f.r1, &[f.r2.clone()]).unwrap();
        assert!(used.is_empty());
    }

    #[test]
    fn test_group_non_exclusive() {
        let f = fixture();
        let actual = [f.r3.clone(), f.r2.clone(), f.r1.clone()];
        let used = resolve_used_rooms(&f.snap, &f.group, &actual).unwrap();
        assert_eq!(used, vec![f.r1.clone(), f.r2.clone()]);
    }

    #[test]
    fn test_choice_group() {
        let f = fixture();
        let used = resolve_used_rooms(&f.snap, &f.choice, &[f.r3.clone()]).unwrap();
        assert_eq!(used, vec![f.r3.clone()]);
    }

    #[test]
    fn test_result_within_both_sets() {
        let f = fixture();
        let actual = [f.r1.clone(), f.r3.clone(), f.r3.clone()];
        for candidate in [&f.r1, &f.r2, &f.r3, &f.group, &f.choice] {
            let used = resolve_used_rooms(&f.snap, candidate, &actual).unwrap();
            let members = f.snap.room_kind(candidate).unwrap().member_rooms();
            for r in &used {
                assert!(actual.contains(r));
                assert!(members.contains(r));
            }
            let mut dedup = used.clone();
            dedup.dedup();
            assert_eq!(dedup, used);
        }
    }

    #[test]
    fn test_not_a_room() {
        let f = fixture();
        let err = resolve_used_rooms(&f.snap, &Ref::from("t1"), &[f.r1.clone()]).unwrap_err();
        assert!(matches!(err, TimetableError::NotARoom { .. }));
        assert!(err.is_bug());
    }
}
