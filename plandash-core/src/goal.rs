//! Goals with progress tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::upsert::Keyed;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    pub status: GoalStatus,
    /// Percentage in 0..=100
    pub progress: u8,
    /// Insertion order is kept; duplicates are allowed.
    pub tags: Vec<String>,
}

impl Goal {
    pub fn is_complete(&self) -> bool {
        self.status == GoalStatus::Complete
    }

    /// Flip completion. Completing also sets progress to 100; reopening
    /// moves the goal back to in-progress and keeps its progress.
    pub fn toggled_complete(&self) -> Goal {
        let mut goal = self.clone();
        if goal.is_complete() {
            goal.status = GoalStatus::InProgress;
        } else {
            goal.status = GoalStatus::Complete;
            goal.progress = 100;
        }
        goal
    }
}

impl Keyed for Goal {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalStatus {
    NotStarted,
    InProgress,
    Complete,
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalStatus::NotStarted => write!(f, "not-started"),
            GoalStatus::InProgress => write!(f, "in-progress"),
            GoalStatus::Complete => write!(f, "complete"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(status: GoalStatus, progress: u8) -> Goal {
        Goal {
            id: "g1".to_string(),
            title: "Read 12 books".to_string(),
            description: None,
            deadline: None,
            status,
            progress,
            tags: vec![],
        }
    }

    #[test]
    fn completing_sets_full_progress() {
        let toggled = goal(GoalStatus::InProgress, 40).toggled_complete();
        assert_eq!(toggled.status, GoalStatus::Complete);
        assert_eq!(toggled.progress, 100);
    }

    #[test]
    fn reopening_keeps_progress() {
        let toggled = goal(GoalStatus::Complete, 100).toggled_complete();
        assert_eq!(toggled.status, GoalStatus::InProgress);
        assert_eq!(toggled.progress, 100);
    }

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&GoalStatus::NotStarted).unwrap();
        assert_eq!(json, "\"not-started\"");
    }
}
