use anyhow::Result;
use chrono_tz::Tz;
use owo_colors::OwoColorize;
use plandash_core::actions;
use plandash_core::assignment::AssignmentSource;
use plandash_core::normalize::{AssignmentInput, GoalInput, Identity, ReminderInput};

use crate::AddCommand;
use crate::commands::{Store, resolve_id};
use crate::render::short_id;

pub fn run(store: &mut Store, record: AddCommand, tz: &Tz) -> Result<()> {
    let (kind, title, id) = match record {
        AddCommand::Assignment(args) => {
            let assignment = args
                .apply(AssignmentInput::default(), tz)?
                .normalize(Identity::New, AssignmentSource::Manual);
            let summary = (assignment.title.clone(), assignment.id.clone());
            store.mutate(|state| actions::upsert_assignment(state, assignment));
            ("assignment", summary.0, summary.1)
        }
        AddCommand::Goal(args) => {
            let goal = args.apply(GoalInput::default(), tz)?.normalize(Identity::New);
            let summary = (goal.title.clone(), goal.id.clone());
            store.mutate(|state| actions::upsert_goal(state, goal));
            ("goal", summary.0, summary.1)
        }
        AddCommand::Reminder(mut args) => {
            if let Some(related) = args.related.take().filter(|r| !r.trim().is_empty()) {
                args.related = Some(resolve_id(&store.state().assignments, &related, "assignment")?);
            }
            let reminder = args
                .apply(ReminderInput::default(), tz)?
                .normalize(Identity::New, false);
            let summary = (reminder.title.clone(), reminder.id.clone());
            store.mutate(|state| actions::upsert_reminder(state, reminder));
            ("reminder", summary.0, summary.1)
        }
        AddCommand::Schedule(args) => {
            let item = args.into_input()?.normalize(Identity::New, tz);
            let summary = (item.title.clone(), item.id.clone());
            store.mutate(|state| actions::upsert_schedule_item(state, item));
            ("schedule block", summary.0, summary.1)
        }
    };

    println!(
        "{} {}",
        format!("  Added {kind}: {title}").green(),
        short_id(&id).dimmed()
    );

    Ok(())
}
