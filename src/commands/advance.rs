use anyhow::Result;
use owo_colors::OwoColorize;
use plandash_core::actions;

use crate::commands::{Store, resolve_id};

pub fn run(store: &mut Store, id: &str) -> Result<()> {
    let id = resolve_id(&store.state().assignments, id, "assignment")?;

    let state = store.mutate(|state| actions::advance_assignment_status(state, &id));

    if let Some(assignment) = state.assignments.iter().find(|a| a.id == id) {
        println!(
            "  {} {} {}",
            assignment,
            "→".dimmed(),
            assignment.status.to_string().bold()
        );
    }

    Ok(())
}
