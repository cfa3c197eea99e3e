//! Session domain module.
//!
//! Lesson session lifecycle: scheduling, rescheduling, cancellation and
//! attendance.
//!
//! # Events
//!
//! - `SessionScheduled` - Published when a lesson is put on the calendar
//! - `SessionRescheduled` - Published when a lesson moves or changes length
//! - `SessionCancelled` - Published when a lesson is called off
//! - `AttendanceMarked` - Published when attendance is recorded or corrected

mod aggregate;
mod errors;
mod events;

pub use aggregate::{
    AttendanceOutcome, CancellationParty, Session, SessionDraft, MAX_DURATION_MINUTES,
};
pub use errors::SessionError;
pub use events::{AttendanceMarked, SessionCancelled, SessionRescheduled, SessionScheduled};
