//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod reporting;
pub mod scheduling;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use reporting::{AttendanceReportHandler, AttendanceReportQuery};
pub use scheduling::{
    CheckConflictsHandler, CheckConflictsQuery, FindAvailableSlotsHandler,
    FindAvailableSlotsQuery,
};
pub use session::{
    CancelSessionCommand, CancelSessionHandler, CancelSessionResult, MarkAttendanceCommand,
    MarkAttendanceHandler, MarkAttendanceResult, RescheduleSessionCommand,
    RescheduleSessionHandler, RescheduleSessionResult, ScheduleSessionCommand,
    ScheduleSessionHandler, ScheduleSessionResult,
};
