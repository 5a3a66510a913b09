//! Core of the plandash planner.
//!
//! - `feed`: parse calendar feeds (.ics) into [`CalendarEvent`]s
//! - `normalize`: turn form input and feed events into canonical records
//! - `reconcile`: merge imported assignments without duplicates
//! - `upsert`: insert-or-replace on id-keyed collections
//! - `store`: the on-device [`DashboardState`] with load / mutate / reset
//! - `actions`: pure updaters for everything a user can do

pub mod actions;
pub mod assignment;
pub mod calendar_event;
pub mod config;
pub mod dashboard_state;
pub mod error;
pub mod feed;
pub mod goal;
pub mod normalize;
pub mod reconcile;
pub mod reminder;
pub mod schedule_item;
pub mod store;
pub mod summary;
pub mod upsert;

pub use calendar_event::CalendarEvent;
pub use dashboard_state::DashboardState;
pub use error::{PlanDashError, PlanDashResult};
