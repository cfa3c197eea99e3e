//! Reporting module - read-only summaries over session snapshots.

mod attendance_report;

pub use attendance_report::{AttendanceReport, Bucket, BucketCounts, DateRange};
