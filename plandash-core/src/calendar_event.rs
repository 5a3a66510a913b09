//! Events extracted from a calendar feed.

use chrono::{DateTime, Utc};

/// A single event read from a calendar feed, before it becomes an
/// [`crate::assignment::Assignment`]. Carries no identifier and is never
/// stored directly.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub title: String,
    pub course: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub link: Option<String>,
}
