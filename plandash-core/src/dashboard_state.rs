//! The aggregate persisted by the dashboard store.

use serde::{Deserialize, Serialize};

use crate::assignment::Assignment;
use crate::goal::Goal;
use crate::reminder::Reminder;
use crate::schedule_item::ScheduleItem;

/// All four record collections, each kept in insertion order.
///
/// Every field is required when deserializing; a document missing one of
/// them does not have the expected shape and is rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    pub schedule: Vec<ScheduleItem>,
    pub goals: Vec<Goal>,
    pub assignments: Vec<Assignment>,
    pub reminders: Vec<Reminder>,
}

impl DashboardState {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.schedule.is_empty()
            && self.goals.is_empty()
            && self.assignments.is_empty()
            && self.reminders.is_empty()
    }

    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
