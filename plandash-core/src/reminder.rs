//! Reminders, optionally linked to an assignment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assignment::Assignment;
use crate::dashboard_state::DashboardState;
use crate::upsert::Keyed;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Weak reference to an [`Assignment`] id. Not cleaned up when the
    /// assignment is deleted, so it may dangle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub completed: bool,
}

impl Reminder {
    /// Resolve `related_id` against the current assignments.
    /// Returns `None` when there is no link or the link dangles.
    pub fn related_assignment<'a>(&self, state: &'a DashboardState) -> Option<&'a Assignment> {
        let id = self.related_id.as_deref()?;
        state.assignments.iter().find(|a| a.id == id)
    }
}

impl Keyed for Reminder {
    fn id(&self) -> &str {
        &self.id
    }
}
