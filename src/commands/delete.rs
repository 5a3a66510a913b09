use anyhow::Result;
use owo_colors::OwoColorize;
use plandash_core::actions;

use crate::RecordKind;
use crate::commands::{Store, resolve_id};

pub fn run(store: &mut Store, kind: RecordKind, id: &str) -> Result<()> {
    let state = store.state();

    let (label, id) = match kind {
        RecordKind::Assignment => ("assignment", resolve_id(&state.assignments, id, "assignment")?),
        RecordKind::Goal => ("goal", resolve_id(&state.goals, id, "goal")?),
        RecordKind::Reminder => ("reminder", resolve_id(&state.reminders, id, "reminder")?),
        RecordKind::Schedule => (
            "schedule block",
            resolve_id(&state.schedule, id, "schedule block")?,
        ),
    };

    store.mutate(|state| match kind {
        RecordKind::Assignment => actions::delete_assignment(state, &id),
        RecordKind::Goal => actions::delete_goal(state, &id),
        RecordKind::Reminder => actions::delete_reminder(state, &id),
        RecordKind::Schedule => actions::delete_schedule_item(state, &id),
    });

    println!("{}", format!("  Deleted {label} {id}").red());

    Ok(())
}
