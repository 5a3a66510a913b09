use anyhow::{Result, anyhow};
use chrono_tz::Tz;
use owo_colors::OwoColorize;
use plandash_core::actions;
use plandash_core::normalize::{AssignmentInput, GoalInput, Identity, ReminderInput, ScheduleInput};
use plandash_core::upsert::Keyed;

use crate::EditCommand;
use crate::commands::{Store, resolve_id};

pub fn run(store: &mut Store, record: EditCommand, tz: &Tz) -> Result<()> {
    let state = store.state();

    let (kind, title) = match record {
        EditCommand::Assignment { id, args } => {
            let id = resolve_id(&state.assignments, &id, "assignment")?;
            let existing = find(&state.assignments, &id)?;
            // The source of a record never changes after creation
            let source = existing.source;
            let assignment = args
                .apply(AssignmentInput::from_assignment(existing), tz)?
                .normalize(Identity::Existing(id), source);
            let title = assignment.title.clone();
            store.mutate(|state| actions::upsert_assignment(state, assignment));
            ("assignment", title)
        }
        EditCommand::Goal { id, args } => {
            let id = resolve_id(&state.goals, &id, "goal")?;
            let existing = find(&state.goals, &id)?;
            let goal = args
                .apply(GoalInput::from_goal(existing), tz)?
                .normalize(Identity::Existing(id));
            let title = goal.title.clone();
            store.mutate(|state| actions::upsert_goal(state, goal));
            ("goal", title)
        }
        EditCommand::Reminder { id, mut args } => {
            let id = resolve_id(&state.reminders, &id, "reminder")?;
            if let Some(related) = args.related.take() {
                args.related = if related.trim().is_empty() {
                    Some(related)
                } else {
                    Some(resolve_id(&state.assignments, &related, "assignment")?)
                };
            }
            let existing = find(&state.reminders, &id)?;
            let completed = existing.completed;
            let reminder = args
                .apply(ReminderInput::from_reminder(existing), tz)?
                .normalize(Identity::Existing(id), completed);
            let title = reminder.title.clone();
            store.mutate(|state| actions::upsert_reminder(state, reminder));
            ("reminder", title)
        }
        EditCommand::Schedule { id, args } => {
            let id = resolve_id(&state.schedule, &id, "schedule block")?;
            let existing = find(&state.schedule, &id)?;
            let item = args
                .apply(ScheduleInput::from_schedule_item(existing, tz))?
                .normalize(Identity::Existing(id), tz);
            let title = item.title.clone();
            store.mutate(|state| actions::upsert_schedule_item(state, item));
            ("schedule block", title)
        }
    };

    println!("{}", format!("  Updated {kind}: {title}").green());

    Ok(())
}

fn find<'a, T: Keyed>(records: &'a [T], id: &str) -> Result<&'a T> {
    records
        .iter()
        .find(|r| r.id() == id)
        .ok_or_else(|| anyhow!("No record with id '{}'", id))
}
