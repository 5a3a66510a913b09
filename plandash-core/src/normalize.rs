//! Turning user-entered field sets into canonical records.
//!
//! Each record kind has an input struct holding the raw form values. Inputs
//! are not validated here: required fields are the caller's concern and
//! normalization always succeeds.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use uuid::Uuid;

use crate::assignment::{Assignment, AssignmentSource, AssignmentStatus, Priority};
use crate::calendar_event::CalendarEvent;
use crate::goal::{Goal, GoalStatus};
use crate::reminder::Reminder;
use crate::schedule_item::ScheduleItem;

/// Which record a normalized value belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// A record that doesn't exist yet; gets a fresh id.
    New,
    /// The id of the record being edited.
    Existing(String),
}

impl Identity {
    pub fn into_id(self) -> String {
        match self {
            Identity::New => new_id(),
            Identity::Existing(id) => id,
        }
    }
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone)]
pub struct AssignmentInput {
    pub title: String,
    pub course: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub status: AssignmentStatus,
    pub priority: Priority,
    pub link: Option<String>,
}

impl Default for AssignmentInput {
    fn default() -> Self {
        AssignmentInput {
            title: String::new(),
            course: None,
            due_date: None,
            description: None,
            status: AssignmentStatus::Planned,
            priority: Priority::Medium,
            link: None,
        }
    }
}

impl AssignmentInput {
    /// Pre-fill the form values from an existing assignment.
    pub fn from_assignment(assignment: &Assignment) -> Self {
        AssignmentInput {
            title: assignment.title.clone(),
            course: assignment.course.clone(),
            due_date: assignment.due_date,
            description: assignment.description.clone(),
            status: assignment.status,
            priority: assignment.priority,
            link: assignment.link.clone(),
        }
    }

    /// `source` comes from the caller: `Manual` for new records, the edited
    /// record's own source otherwise.
    pub fn normalize(self, identity: Identity, source: AssignmentSource) -> Assignment {
        Assignment {
            id: identity.into_id(),
            title: self.title.trim().to_string(),
            course: trim_to_none(self.course),
            due_date: self.due_date,
            description: trim_to_none(self.description),
            status: self.status,
            priority: self.priority,
            link: trim_to_none(self.link),
            source,
        }
    }
}

/// Normalize a feed event into a new imported assignment.
pub fn normalize_feed_event(event: CalendarEvent) -> Assignment {
    let event = CalendarEvent {
        title: event.title.trim().to_string(),
        course: trim_to_none(event.course),
        due_date: event.due_date,
        description: trim_to_none(event.description),
        link: trim_to_none(event.link),
    };
    Assignment::from_feed_event(event, new_id())
}

#[derive(Debug, Clone)]
pub struct GoalInput {
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub status: GoalStatus,
    pub progress: u8,
    /// Comma-separated, e.g. `"health, running"`
    pub tags: Option<String>,
}

impl Default for GoalInput {
    fn default() -> Self {
        GoalInput {
            title: String::new(),
            description: None,
            deadline: None,
            status: GoalStatus::NotStarted,
            progress: 0,
            tags: None,
        }
    }
}

impl GoalInput {
    pub fn from_goal(goal: &Goal) -> Self {
        GoalInput {
            title: goal.title.clone(),
            description: goal.description.clone(),
            deadline: goal.deadline,
            status: goal.status,
            progress: goal.progress,
            tags: Some(goal.tags.join(", ")),
        }
    }

    pub fn normalize(self, identity: Identity) -> Goal {
        Goal {
            id: identity.into_id(),
            title: self.title.trim().to_string(),
            description: trim_to_none(self.description),
            deadline: self.deadline,
            status: self.status,
            progress: self.progress.min(100),
            tags: split_tags(self.tags.as_deref()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReminderInput {
    pub title: String,
    pub due_date: Option<DateTime<Utc>>,
    pub related_id: Option<String>,
    pub notes: Option<String>,
}

impl ReminderInput {
    pub fn from_reminder(reminder: &Reminder) -> Self {
        ReminderInput {
            title: reminder.title.clone(),
            due_date: reminder.due_date,
            related_id: reminder.related_id.clone(),
            notes: reminder.notes.clone(),
        }
    }

    /// `completed` is carried over from the edited reminder, `false` for new ones.
    pub fn normalize(self, identity: Identity, completed: bool) -> Reminder {
        Reminder {
            id: identity.into_id(),
            title: self.title.trim().to_string(),
            due_date: self.due_date,
            related_id: trim_to_none(self.related_id),
            notes: trim_to_none(self.notes),
            completed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScheduleInput {
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl ScheduleInput {
    /// Pre-fill the form values from an existing block, as wall-clock
    /// values in `tz`.
    pub fn from_schedule_item<Tz: TimeZone>(item: &ScheduleItem, tz: &Tz) -> Self {
        let start = item.start.with_timezone(tz);
        let end = item.end.with_timezone(tz);
        ScheduleInput {
            title: item.title.clone(),
            date: start.date_naive(),
            start_time: start.time(),
            end_time: if item.end == item.start { None } else { Some(end.time()) },
            location: item.location.clone(),
            notes: item.notes.clone(),
        }
    }

    /// Date and times are wall-clock values in `tz`. Without an end time the
    /// block ends when it starts.
    pub fn normalize<Tz: TimeZone>(self, identity: Identity, tz: &Tz) -> ScheduleItem {
        let start = combine_date_time(self.date, self.start_time, tz);
        let end = self
            .end_time
            .map(|end| combine_date_time(self.date, end, tz))
            .unwrap_or(start);

        ScheduleItem {
            id: identity.into_id(),
            title: self.title.trim().to_string(),
            start,
            end,
            location: trim_to_none(self.location),
            notes: trim_to_none(self.notes),
        }
    }
}

/// Combine a local date and time into an instant. Times that don't exist in
/// `tz` (DST gaps) are read as UTC.
pub fn combine_date_time<Tz: TimeZone>(date: NaiveDate, time: NaiveTime, tz: &Tz) -> DateTime<Utc> {
    let naive = date.and_time(time);
    match tz.from_local_datetime(&naive).earliest() {
        Some(local) => local.with_timezone(&Utc),
        None => naive.and_utc(),
    }
}

/// Trim a text field; empty or whitespace-only values become `None`.
pub fn trim_to_none(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Split a comma-separated tag string into trimmed, non-empty tags, keeping
/// order and duplicates.
pub fn split_tags(tags: Option<&str>) -> Vec<String> {
    tags.map(|tags| {
        tags.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::Chicago;

    #[test]
    fn blank_optional_fields_become_none() {
        let input = AssignmentInput {
            title: "  Essay Draft ".to_string(),
            course: Some("   ".to_string()),
            description: Some("".to_string()),
            link: Some(" https://example.com ".to_string()),
            ..Default::default()
        };

        let assignment = input.normalize(Identity::New, AssignmentSource::Manual);

        assert_eq!(assignment.title, "Essay Draft");
        assert_eq!(assignment.course, None);
        assert_eq!(assignment.description, None);
        assert_eq!(assignment.link.as_deref(), Some("https://example.com"));
        assert_eq!(assignment.source, AssignmentSource::Manual);
        assert!(!assignment.id.is_empty());
    }

    #[test]
    fn existing_identity_keeps_id() {
        let goal = GoalInput {
            title: "Run".to_string(),
            ..Default::default()
        }
        .normalize(Identity::Existing("goal-7".to_string()));

        assert_eq!(goal.id, "goal-7");
    }

    #[test]
    fn new_identities_are_unique() {
        assert_ne!(Identity::New.into_id(), Identity::New.into_id());
    }

    #[test]
    fn edited_assignment_keeps_its_source() {
        let imported = normalize_feed_event(CalendarEvent {
            title: "Quiz".to_string(),
            course: None,
            due_date: None,
            description: None,
            link: None,
        });

        let edited = AssignmentInput {
            priority: Priority::High,
            ..AssignmentInput::from_assignment(&imported)
        }
        .normalize(Identity::Existing(imported.id.clone()), imported.source);

        assert_eq!(edited.id, imported.id);
        assert_eq!(edited.source, AssignmentSource::ImportedFeed);
        assert_eq!(edited.priority, Priority::High);
    }

    #[test]
    fn feed_events_are_trimmed_and_stamped() {
        let assignment = normalize_feed_event(CalendarEvent {
            title: " Lab 2 ".to_string(),
            course: Some(" ".to_string()),
            due_date: None,
            description: Some(" notes ".to_string()),
            link: None,
        });

        assert_eq!(assignment.title, "Lab 2");
        assert_eq!(assignment.course, None);
        assert_eq!(assignment.description.as_deref(), Some("notes"));
        assert_eq!(assignment.source, AssignmentSource::ImportedFeed);
    }

    #[test]
    fn tags_are_split_trimmed_and_ordered() {
        assert_eq!(
            split_tags(Some(" health, running,, , health ")),
            vec!["health", "running", "health"]
        );
        assert!(split_tags(None).is_empty());
        assert!(split_tags(Some("  ")).is_empty());
    }

    #[test]
    fn goal_progress_is_clamped() {
        let goal = GoalInput {
            title: "Ship it".to_string(),
            progress: 250,
            tags: Some("work".to_string()),
            ..Default::default()
        }
        .normalize(Identity::New);

        assert_eq!(goal.progress, 100);
        assert_eq!(goal.tags, vec!["work"]);
    }

    #[test]
    fn schedule_end_defaults_to_start() {
        let item = ScheduleInput {
            title: "Study block".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: None,
            location: Some("".to_string()),
            notes: None,
        }
        .normalize(Identity::New, &Utc);

        assert_eq!(item.start, Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());
        assert_eq!(item.end, item.start);
        assert_eq!(item.location, None);
    }

    #[test]
    fn schedule_times_are_local_to_the_zone() {
        let item = ScheduleInput {
            title: "Office hours".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            start_time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            end_time: Some(NaiveTime::from_hms_opt(15, 30, 0).unwrap()),
            location: Some(" Room 204 ".to_string()),
            notes: None,
        }
        .normalize(Identity::New, &Chicago);

        // CST is UTC-6 in January
        assert_eq!(item.start, Utc.with_ymd_and_hms(2024, 1, 15, 20, 0, 0).unwrap());
        assert_eq!(item.end, Utc.with_ymd_and_hms(2024, 1, 15, 21, 30, 0).unwrap());
        assert_eq!(item.location.as_deref(), Some("Room 204"));
    }

    #[test]
    fn dst_gap_falls_back_to_utc() {
        // 02:30 doesn't exist in Chicago on 2024-03-10
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let time = NaiveTime::from_hms_opt(2, 30, 0).unwrap();

        let instant = combine_date_time(date, time, &Chicago);

        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 3, 10, 2, 30, 0).unwrap());
    }

    #[test]
    fn schedule_input_prefill_roundtrips() {
        let item = ScheduleInput {
            title: "Gym".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            start_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            end_time: Some(NaiveTime::from_hms_opt(8, 0, 0).unwrap()),
            location: None,
            notes: Some("legs".to_string()),
        }
        .normalize(Identity::New, &Chicago);

        let again = ScheduleInput::from_schedule_item(&item, &Chicago)
            .normalize(Identity::Existing(item.id.clone()), &Chicago);

        assert_eq!(again, item);
    }

    #[test]
    fn reminder_related_id_is_trimmed() {
        let reminder = ReminderInput {
            title: "Print".to_string(),
            related_id: Some("  ".to_string()),
            notes: Some(" bring stapler ".to_string()),
            ..Default::default()
        }
        .normalize(Identity::New, false);

        assert_eq!(reminder.related_id, None);
        assert_eq!(reminder.notes.as_deref(), Some("bring stapler"));
        assert!(!reminder.completed);
    }
}
