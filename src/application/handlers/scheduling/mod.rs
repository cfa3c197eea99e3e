//! Scheduling query handlers.

mod check_conflicts;
mod find_available_slots;

pub use check_conflicts::{CheckConflictsHandler, CheckConflictsQuery};
pub use find_available_slots::{FindAvailableSlotsHandler, FindAvailableSlotsQuery};
