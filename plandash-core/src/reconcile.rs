//! Merging imported assignments into the existing collection.
//!
//! Duplicates are detected with a conservative signature, not a field-by-field
//! diff. Two different assignments that happen to share a signature are merged,
//! and copies of one assignment whose due times differ by a minute or more are
//! both kept.

use std::collections::HashSet;

use log::debug;

use crate::assignment::{Assignment, AssignmentSource};

/// The fields that decide whether two assignments are the same item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupSignature {
    title: String,
    course: String,
    due_minute: String,
    source: AssignmentSource,
}

impl DedupSignature {
    pub fn of(assignment: &Assignment) -> Self {
        DedupSignature {
            title: assignment.title.trim().to_lowercase(),
            course: assignment
                .course
                .as_deref()
                .map(|c| c.trim().to_lowercase())
                .unwrap_or_default(),
            due_minute: assignment
                .due_date
                .map(|due| due.format("%Y-%m-%dT%H:%M").to_string())
                .unwrap_or_default(),
            source: assignment.source,
        }
    }
}

/// Append the incoming assignments that aren't already represented.
///
/// Existing records keep their order and contents. Incoming records are
/// checked against the existing ones and against the incoming records accepted
/// before them, so only the first of several duplicates in a batch survives.
pub fn reconcile(existing: &[Assignment], incoming: Vec<Assignment>) -> Vec<Assignment> {
    let mut seen: HashSet<DedupSignature> = existing.iter().map(DedupSignature::of).collect();
    let mut merged = existing.to_vec();

    for assignment in incoming {
        if seen.insert(DedupSignature::of(&assignment)) {
            merged.push(assignment);
        } else {
            debug!("Skipping duplicate assignment '{}'", assignment.title);
        }
    }

    merged
}
