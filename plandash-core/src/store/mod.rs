//! The on-device dashboard store.
//!
//! [`DashboardStore`] owns the canonical [`DashboardState`]. Callers read a
//! snapshot through [`DashboardStore::state`] and change it only by handing
//! [`DashboardStore::mutate`] a pure updater. Every change is written back to
//! the slot right away.
//!
//! Storage problems never reach the caller: an unreadable or malformed slot
//! loads as an empty dashboard, and a failed write leaves the in-memory state
//! authoritative for the rest of the session. Both are logged.

mod slot;

pub use slot::{FileSlot, MemorySlot, Slot};

use log::{info, warn};

use crate::dashboard_state::DashboardState;
use crate::error::{PlanDashError, PlanDashResult};

pub struct DashboardStore<S: Slot> {
    slot: S,
    state: DashboardState,
}

impl<S: Slot> DashboardStore<S> {
    /// Load the dashboard from `slot`, falling back to an empty one.
    pub fn load(slot: S) -> Self {
        let state = match read_state(&slot) {
            Ok(Some(state)) => {
                info!(
                    "Loaded dashboard: {} schedule items, {} goals, {} assignments, {} reminders",
                    state.schedule.len(),
                    state.goals.len(),
                    state.assignments.len(),
                    state.reminders.len()
                );
                state
            }
            Ok(None) => {
                info!("No saved dashboard, starting empty");
                DashboardState::empty()
            }
            Err(e) => {
                warn!("{e}; starting with an empty dashboard");
                DashboardState::empty()
            }
        };

        DashboardStore { slot, state }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Replace the state with `updater(current)` and write it back.
    ///
    /// The new state is visible as soon as this returns, even if the write
    /// failed.
    pub fn mutate<F>(&mut self, updater: F) -> &DashboardState
    where
        F: FnOnce(&DashboardState) -> DashboardState,
    {
        self.state = updater(&self.state);
        self.persist();
        &self.state
    }

    /// Clear the dashboard, in memory and in the slot.
    pub fn reset(&mut self) {
        self.state = DashboardState::empty();
        self.persist();
        info!("Dashboard reset");
    }

    fn persist(&self) {
        if let Err(e) = write_state(&self.slot, &self.state) {
            warn!("{e}; keeping changes in memory only");
        }
    }
}

fn read_state<S: Slot>(slot: &S) -> PlanDashResult<Option<DashboardState>> {
    let Some(content) = slot.read()? else {
        return Ok(None);
    };

    DashboardState::from_json(&content)
        .map(Some)
        .map_err(|e| PlanDashError::StorageRead(format!("saved dashboard has an unexpected shape: {e}")))
}

fn write_state<S: Slot>(slot: &S, state: &DashboardState) -> PlanDashResult<()> {
    let content = state
        .to_json()
        .map_err(|e| PlanDashError::StorageWrite(e.to_string()))?;
    slot.write(&content)
}
