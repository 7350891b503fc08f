//! Display labels for references.
//!
//! Every list that ends up on a tile goes through one of these helpers so
//! that the output never depends on map or load order.

use log::warn;
use std::collections::{BTreeMap, BTreeSet};

use crate::models::{Class, Ref};
use crate::snapshot::Snapshot;

/// Display tag of `id`, or its raw reference text if it has none.
pub fn display_tag(snapshot: &Snapshot, id: &Ref) -> String {
    match snapshot.tag_of(id) {
        Some(tag) => tag.to_string(),
        None => {
            warn!("No tag for reference {id}");
            id.to_string()
        }
    }
}

/// Maps references to their tags and sorts the result.
pub fn sort_list<'a, I>(snapshot: &Snapshot, refs: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Ref>,
{
    let mut tags: Vec<String> = refs.into_iter().map(|r| display_tag(snapshot, r)).collect();
    tags.sort();
    tags
}

/// Converts group references into the shortest label list.
///
/// Each group counts towards every class that contains it. A class whose
/// whole-class group is present, or one of whose divisions is completely
/// present, is shown as the class tag alone and absorbs all of its
/// groups. Any remaining group is shown as `class<separator>group`, using
/// the first class (in load order) that contains it. Groups outside any
/// class show their own tag; unknown references are reported and skipped.
///
/// The result is sorted and free of duplicates, so it does not depend on
/// the order of `groups`.
pub fn split_groups<'a, I>(snapshot: &Snapshot, groups: I, separator: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a Ref>,
{
    let mut per_class: BTreeMap<&Ref, (&Class, BTreeSet<&Ref>)> = BTreeMap::new();
    let mut owners: BTreeMap<&Ref, Vec<&Class>> = BTreeMap::new();
    let mut labels: BTreeSet<String> = BTreeSet::new();

    for gref in groups {
        let classes: Vec<&Class> = snapshot.classes_of_group(gref).collect();
        if !classes.is_empty() {
            for &class in &classes {
                per_class
                    .entry(&class.id)
                    .or_insert_with(|| (class, BTreeSet::new()))
                    .1
                    .insert(gref);
            }
            owners.insert(gref, classes);
        } else if let Some(group) = snapshot.group(gref) {
            labels.insert(group.tag.clone());
        } else {
            warn!("Unknown group {gref}");
        }
    }

    let mut collapsed: BTreeSet<&Ref> = BTreeSet::new();
    for (id, (class, present)) in &per_class {
        if class_covered(class, present) {
            collapsed.insert(*id);
            labels.insert(class.tag.clone());
        }
    }

    for (gref, classes) in &owners {
        if classes.iter().any(|c| collapsed.contains(&c.id)) {
            continue;
        }
        let class = classes[0];
        let tag = display_tag(snapshot, gref);
        labels.insert(format!("{}{separator}{tag}", class.tag));
    }
    labels.into_iter().collect()
}

fn class_covered(class: &Class, present: &BTreeSet<&Ref>) -> bool {
    present.contains(&class.class_group)
        || class
            .divisions
            .iter()
            .any(|d| !d.groups.is_empty() && d.groups.iter().all(|g| present.contains(g)))
}
