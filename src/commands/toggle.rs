use anyhow::Result;
use owo_colors::OwoColorize;
use plandash_core::actions;

use crate::ToggleKind;
use crate::commands::{Store, resolve_id};

pub fn run(store: &mut Store, kind: ToggleKind, id: &str) -> Result<()> {
    match kind {
        ToggleKind::Goal => {
            let id = resolve_id(&store.state().goals, id, "goal")?;
            let state = store.mutate(|state| actions::toggle_goal_complete(state, &id));

            if let Some(goal) = state.goals.iter().find(|g| g.id == id) {
                if goal.is_complete() {
                    println!("{}", format!("  Completed goal: {}", goal.title).green());
                } else {
                    println!("  Reopened goal: {} ({}%)", goal.title, goal.progress);
                }
            }
        }
        ToggleKind::Reminder => {
            let id = resolve_id(&store.state().reminders, id, "reminder")?;
            let state = store.mutate(|state| actions::toggle_reminder(state, &id));

            if let Some(reminder) = state.reminders.iter().find(|r| r.id == id) {
                if reminder.completed {
                    println!("{}", format!("  Done: {}", reminder.title).green());
                } else {
                    println!("  Not done: {}", reminder.title);
                }
            }
        }
    }

    Ok(())
}
