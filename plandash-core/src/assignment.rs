//! Assignments: manually entered or imported from a calendar feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calendar_event::CalendarEvent;
use crate::upsert::Keyed;

/// An assignment with an optional due date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: AssignmentStatus,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    // Records saved without a source were entered by hand
    #[serde(default)]
    pub source: AssignmentSource,
}

impl Assignment {
    /// Build an assignment from a parsed feed event.
    ///
    /// Feed-derived records always start as `planned` with `medium` priority
    /// and are stamped with [`AssignmentSource::ImportedFeed`].
    pub fn from_feed_event(event: CalendarEvent, id: String) -> Self {
        Assignment {
            id,
            title: event.title,
            course: event.course,
            due_date: event.due_date,
            description: event.description,
            status: AssignmentStatus::Planned,
            priority: Priority::Medium,
            link: event.link,
            source: AssignmentSource::ImportedFeed,
        }
    }
}

impl Keyed for Assignment {
    fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.course {
            Some(course) => write!(f, "{} ({})", self.title, course),
            None => write!(f, "{}", self.title),
        }
    }
}

/// Workflow status of an assignment.
///
/// Advancing cycles through the states and wraps from `Graded` back to
/// `Planned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssignmentStatus {
    Planned,
    Started,
    Submitted,
    Graded,
}

impl AssignmentStatus {
    pub const ORDER: [AssignmentStatus; 4] = [
        AssignmentStatus::Planned,
        AssignmentStatus::Started,
        AssignmentStatus::Submitted,
        AssignmentStatus::Graded,
    ];

    /// The successor status, wrapping around after the last one.
    pub fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|s| *s == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Planned => "planned",
            AssignmentStatus::Started => "started",
            AssignmentStatus::Submitted => "submitted",
            AssignmentStatus::Graded => "graded",
        }
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// Where an assignment came from. Set when the record is created, never
/// inferred from its other fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssignmentSource {
    #[default]
    Manual,
    // Older dashboards stored feed imports as "canvas"
    #[serde(alias = "canvas")]
    ImportedFeed,
}

impl AssignmentSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentSource::Manual => "manual",
            AssignmentSource::ImportedFeed => "imported-feed",
        }
    }
}

impl fmt::Display for AssignmentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_advance_wraps_around() {
        assert_eq!(AssignmentStatus::Planned.next(), AssignmentStatus::Started);
        assert_eq!(AssignmentStatus::Started.next(), AssignmentStatus::Submitted);
        assert_eq!(AssignmentStatus::Submitted.next(), AssignmentStatus::Graded);
        assert_eq!(AssignmentStatus::Graded.next(), AssignmentStatus::Planned);
    }

    #[test]
    fn legacy_canvas_source_reads_as_imported_feed() {
        let source: AssignmentSource = serde_json::from_str("\"canvas\"").unwrap();
        assert_eq!(source, AssignmentSource::ImportedFeed);
        assert_eq!(
            serde_json::to_string(&source).unwrap(),
            "\"imported-feed\""
        );
    }

    #[test]
    fn from_feed_event_stamps_imported_source() {
        let event = CalendarEvent {
            title: "Lab 3".to_string(),
            course: Some("CHEM110".to_string()),
            due_date: None,
            description: None,
            link: None,
        };

        let assignment = Assignment::from_feed_event(event, "a1".to_string());

        assert_eq!(assignment.source, AssignmentSource::ImportedFeed);
        assert_eq!(assignment.status, AssignmentStatus::Planned);
        assert_eq!(assignment.priority, Priority::Medium);
        assert_eq!(assignment.course.as_deref(), Some("CHEM110"));
    }
}
