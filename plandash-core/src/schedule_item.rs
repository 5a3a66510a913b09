//! Time blocks on the daily schedule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::upsert::Keyed;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Keyed for ScheduleItem {
    fn id(&self) -> &str {
        &self.id
    }
}
