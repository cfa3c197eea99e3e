//! Session command handlers.

mod cancel_session;
mod mark_attendance;
mod reschedule_session;
mod schedule_session;

pub use cancel_session::{CancelSessionCommand, CancelSessionHandler, CancelSessionResult};
pub use mark_attendance::{MarkAttendanceCommand, MarkAttendanceHandler, MarkAttendanceResult};
pub use reschedule_session::{
    RescheduleSessionCommand, RescheduleSessionHandler, RescheduleSessionResult,
};
pub use schedule_session::{ScheduleSessionCommand, ScheduleSessionHandler, ScheduleSessionResult};
