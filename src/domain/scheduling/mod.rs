//! Scheduling Module - Pure services over the lesson calendar.
//!
//! # Components
//!
//! - `TimeInterval` - Half-open `[start, end)` span used by every comparison
//! - `ConflictChecker` - Finds active sessions that clash with a candidate
//! - `AvailabilityFinder` - Open windows in a teacher's business day
//! - `SchedulingPolicy` - Business hours, slot length, out-of-hours handling
//!
//! Everything here works on a snapshot slice of sessions passed in by the
//! caller. No ports are involved.

mod availability;
mod conflict_checker;
mod interval;
mod policy;

pub use availability::AvailabilityFinder;
pub use conflict_checker::{
    Conflict, ConflictChecker, ConflictDimension, ConflictResult, ConflictScope,
    SessionCandidate,
};
pub use interval::TimeInterval;
pub use policy::{BusinessHours, OutOfHoursPolicy, SchedulingPolicy};
