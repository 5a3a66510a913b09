//! Pure dashboard updaters.
//!
//! Every user action is a function from the current [`DashboardState`] to a
//! new one, meant to be passed to [`crate::store::DashboardStore::mutate`].

use crate::assignment::Assignment;
use crate::calendar_event::CalendarEvent;
use crate::dashboard_state::DashboardState;
use crate::goal::Goal;
use crate::normalize::normalize_feed_event;
use crate::reconcile::reconcile;
use crate::reminder::Reminder;
use crate::schedule_item::ScheduleItem;
use crate::upsert::{remove_by_id, update_by_id, upsert};

/// Turn feed events into assignments and merge them in without duplicates.
pub fn import_events(state: &DashboardState, events: Vec<CalendarEvent>) -> DashboardState {
    if events.is_empty() {
        return state.clone();
    }

    let incoming: Vec<Assignment> = events.into_iter().map(normalize_feed_event).collect();

    DashboardState {
        assignments: reconcile(&state.assignments, incoming),
        ..state.clone()
    }
}

pub fn upsert_assignment(state: &DashboardState, assignment: Assignment) -> DashboardState {
    DashboardState {
        assignments: upsert(state.assignments.clone(), assignment),
        ..state.clone()
    }
}

pub fn upsert_goal(state: &DashboardState, goal: Goal) -> DashboardState {
    DashboardState {
        goals: upsert(state.goals.clone(), goal),
        ..state.clone()
    }
}

pub fn upsert_reminder(state: &DashboardState, reminder: Reminder) -> DashboardState {
    DashboardState {
        reminders: upsert(state.reminders.clone(), reminder),
        ..state.clone()
    }
}

pub fn upsert_schedule_item(state: &DashboardState, item: ScheduleItem) -> DashboardState {
    DashboardState {
        schedule: upsert(state.schedule.clone(), item),
        ..state.clone()
    }
}

/// Reminders pointing at the deleted assignment are left alone.
pub fn delete_assignment(state: &DashboardState, id: &str) -> DashboardState {
    DashboardState {
        assignments: remove_by_id(state.assignments.clone(), id),
        ..state.clone()
    }
}

pub fn delete_goal(state: &DashboardState, id: &str) -> DashboardState {
    DashboardState {
        goals: remove_by_id(state.goals.clone(), id),
        ..state.clone()
    }
}

pub fn delete_reminder(state: &DashboardState, id: &str) -> DashboardState {
    DashboardState {
        reminders: remove_by_id(state.reminders.clone(), id),
        ..state.clone()
    }
}

pub fn delete_schedule_item(state: &DashboardState, id: &str) -> DashboardState {
    DashboardState {
        schedule: remove_by_id(state.schedule.clone(), id),
        ..state.clone()
    }
}

pub fn advance_assignment_status(state: &DashboardState, id: &str) -> DashboardState {
    DashboardState {
        assignments: update_by_id(state.assignments.clone(), id, |mut assignment| {
            assignment.status = assignment.status.next();
            assignment
        }),
        ..state.clone()
    }
}

pub fn toggle_goal_complete(state: &DashboardState, id: &str) -> DashboardState {
    DashboardState {
        goals: update_by_id(state.goals.clone(), id, |goal| goal.toggled_complete()),
        ..state.clone()
    }
}

pub fn toggle_reminder(state: &DashboardState, id: &str) -> DashboardState {
    DashboardState {
        reminders: update_by_id(state.reminders.clone(), id, |mut reminder| {
            reminder.completed = !reminder.completed;
            reminder
        }),
        ..state.clone()
    }
}
