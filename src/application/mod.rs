//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers change the calendar; query handlers read a snapshot.

pub mod handlers;

pub use handlers::{
    // Session commands
    CancelSessionCommand, CancelSessionHandler, CancelSessionResult,
    MarkAttendanceCommand, MarkAttendanceHandler, MarkAttendanceResult,
    RescheduleSessionCommand, RescheduleSessionHandler, RescheduleSessionResult,
    ScheduleSessionCommand, ScheduleSessionHandler, ScheduleSessionResult,
    // Queries
    AttendanceReportHandler, AttendanceReportQuery,
    CheckConflictsHandler, CheckConflictsQuery,
    FindAvailableSlotsHandler, FindAvailableSlotsQuery,
};
