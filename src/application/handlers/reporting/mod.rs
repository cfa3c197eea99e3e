//! Reporting query handlers.

mod attendance_report;

pub use attendance_report::{AttendanceReportHandler, AttendanceReportQuery};
