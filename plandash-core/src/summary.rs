//! Overview counters shown at the top of the dashboard.

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};

use crate::dashboard_state::DashboardState;

/// Goals at or above this progress (and not complete) count as on track.
const ON_TRACK_PROGRESS: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverviewSummary {
    /// Schedule blocks starting in the window
    pub focus_blocks: usize,
    /// Assignments due in the window
    pub deadlines: usize,
    pub goals_on_track: usize,
    /// Reminders due in the window
    pub reminders_due: usize,
}

impl OverviewSummary {
    /// Count items falling in `[from, to]` (both ends inclusive).
    pub fn compute(state: &DashboardState, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        let in_window = |t: &DateTime<Utc>| *t >= from && *t <= to;

        OverviewSummary {
            focus_blocks: state.schedule.iter().filter(|s| in_window(&s.start)).count(),
            deadlines: state
                .assignments
                .iter()
                .filter(|a| a.due_date.as_ref().is_some_and(in_window))
                .count(),
            goals_on_track: state
                .goals
                .iter()
                .filter(|g| g.progress >= ON_TRACK_PROGRESS && !g.is_complete())
                .count(),
            reminders_due: state
                .reminders
                .iter()
                .filter(|r| r.due_date.as_ref().is_some_and(in_window))
                .count(),
        }
    }

    /// Counters for the calendar day containing `now` in `tz`.
    pub fn for_day<Tz: TimeZone>(state: &DashboardState, now: DateTime<Utc>, tz: &Tz) -> Self {
        let (from, to) = day_bounds(now, tz);
        Self::compute(state, from, to)
    }
}

/// First and last instant of the local day containing `now`.
pub fn day_bounds<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let date = now.with_timezone(tz).date_naive();
    let start = crate::normalize::combine_date_time(date, NaiveTime::MIN, tz);
    let next = date
        .succ_opt()
        .map(|next| crate::normalize::combine_date_time(next, NaiveTime::MIN, tz))
        .unwrap_or(start + Duration::days(1));
    (start, next - Duration::milliseconds(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::AssignmentSource;
    use crate::goal::GoalStatus;
    use crate::normalize::{AssignmentInput, GoalInput, Identity, ReminderInput, ScheduleInput};
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    fn sample_state() -> DashboardState {
        let mut state = DashboardState::empty();

        state.schedule.push(
            ScheduleInput {
                title: "Deep work".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                end_time: None,
                location: None,
                notes: None,
            }
            .normalize(Identity::New, &Utc),
        );

        for (title, due) in [("Today", Some(at(1, 23))), ("Tomorrow", Some(at(2, 9))), ("Someday", None)] {
            state.assignments.push(
                AssignmentInput {
                    title: title.to_string(),
                    due_date: due,
                    ..Default::default()
                }
                .normalize(Identity::New, AssignmentSource::Manual),
            );
        }

        for (progress, status) in [
            (80, GoalStatus::InProgress),
            (50, GoalStatus::NotStarted),
            (100, GoalStatus::Complete),
            (10, GoalStatus::InProgress),
        ] {
            state.goals.push(
                GoalInput {
                    title: "Goal".to_string(),
                    progress,
                    status,
                    ..Default::default()
                }
                .normalize(Identity::New),
            );
        }

        state.reminders.push(
            ReminderInput {
                title: "Stand-up".to_string(),
                due_date: Some(at(1, 0)),
                ..Default::default()
            }
            .normalize(Identity::New, false),
        );

        state
    }

    #[test]
    fn counts_items_for_the_day() {
        let summary = OverviewSummary::for_day(&sample_state(), at(1, 12), &Utc);

        assert_eq!(
            summary,
            OverviewSummary {
                focus_blocks: 1,
                deadlines: 1,
                goals_on_track: 2,
                reminders_due: 1,
            }
        );
    }

    #[test]
    fn empty_dashboard_counts_nothing() {
        let summary = OverviewSummary::for_day(&DashboardState::empty(), at(1, 12), &Utc);
        assert_eq!(summary, OverviewSummary::default());
    }

    #[test]
    fn day_bounds_cover_the_whole_day() {
        let (from, to) = day_bounds(at(5, 15), &Utc);
        assert_eq!(from, at(5, 0));
        assert_eq!(to, at(6, 0) - Duration::milliseconds(1));
    }
}
