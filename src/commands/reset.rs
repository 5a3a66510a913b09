use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use plandash_core::store::{DashboardStore, Slot};

pub fn run<S: Slot>(store: &mut DashboardStore<S>, yes: bool) -> Result<()> {
    // An empty dashboard may still sit on an unreadable slot; clear it without asking
    if !yes && !store.state().is_empty() {
        let confirmed = Confirm::new()
            .with_prompt("  Delete every schedule block, goal, assignment and reminder?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "  Nothing changed".dimmed());
            return Ok(());
        }
    }

    store.reset();
    println!("{}", "  Dashboard cleared".red());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use plandash_core::DashboardState;
    use plandash_core::store::MemorySlot;

    #[test]
    fn reset_overwrites_an_unreadable_slot() {
        let slot = MemorySlot::with_contents("{ not a dashboard");
        let mut store = DashboardStore::load(slot.clone());
        assert!(store.state().is_empty());

        run(&mut store, false).unwrap();

        let saved = DashboardState::from_json(&slot.contents().unwrap()).unwrap();
        assert!(saved.is_empty());
    }
}
