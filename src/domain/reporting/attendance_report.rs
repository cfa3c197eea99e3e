//! Attendance report - session outcomes grouped by calendar bucket.

use chrono::{Datelike, Days, Duration, FixedOffset, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::domain::foundation::{SessionStatus, ValidationError};
use crate::domain::session::Session;

/// Inclusive range of local calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::invalid_format(
                "date_range",
                format!("end {} is before start {}", end, start),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Bucket width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Day,
    /// Monday through Sunday.
    Week,
    Month,
}

impl Bucket {
    /// First day of the bucket holding `date`.
    pub fn start_of(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Bucket::Day => date,
            Bucket::Week => {
                date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
            }
            Bucket::Month => date.with_day(1).unwrap_or(date),
        }
    }

    fn next(&self, bucket_start: NaiveDate) -> Option<NaiveDate> {
        match self {
            Bucket::Day => bucket_start.checked_add_days(Days::new(1)),
            Bucket::Week => bucket_start.checked_add_days(Days::new(7)),
            Bucket::Month => bucket_start.checked_add_months(Months::new(1)),
        }
    }
}

impl FromStr for Bucket {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Bucket::Day),
            "week" => Ok(Bucket::Week),
            "month" => Ok(Bucket::Month),
            _ => Err(ValidationError::invalid_enum_value("bucket", s)),
        }
    }
}

/// Outcome counts for one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCounts {
    pub bucket_start: NaiveDate,
    pub scheduled: u32,
    pub present: u32,
    pub absent: u32,
    pub no_show: u32,
    /// Any of the three cancellation statuses.
    pub cancelled: u32,
    /// Minutes of lessons marked present.
    pub minutes_taught: u64,
}

impl BucketCounts {
    fn empty(bucket_start: NaiveDate) -> Self {
        Self {
            bucket_start,
            scheduled: 0,
            present: 0,
            absent: 0,
            no_show: 0,
            cancelled: 0,
            minutes_taught: 0,
        }
    }

    fn record(&mut self, session: &Session) {
        match session.status() {
            SessionStatus::Scheduled => self.scheduled += 1,
            SessionStatus::Present => {
                self.present += 1;
                self.minutes_taught += u64::from(session.duration_minutes());
            }
            SessionStatus::Absent => self.absent += 1,
            SessionStatus::NoShow => self.no_show += 1,
            SessionStatus::CancelledByStudent
            | SessionStatus::CancelledByTeacher
            | SessionStatus::CancelledBySchool => self.cancelled += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.scheduled + self.present + self.absent + self.no_show + self.cancelled
    }

    /// Share of settled lessons the student attended, or `None` before any
    /// attendance is recorded.
    pub fn attendance_rate(&self) -> Option<f64> {
        let settled = self.present + self.absent + self.no_show;
        (settled > 0).then(|| f64::from(self.present) / f64::from(settled))
    }
}

/// Sessions grouped into consecutive buckets covering a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceReport {
    pub range: DateRange,
    pub bucket: Bucket,
    /// Ascending by `bucket_start`; includes empty buckets.
    pub rows: Vec<BucketCounts>,
}

impl AttendanceReport {
    /// Groups `sessions` whose local start date falls in `range`.
    ///
    /// Local dates are taken at `offset`. The first bucket may start before
    /// `range.start()` when the range begins mid-week or mid-month.
    pub fn build(
        sessions: &[Session],
        range: DateRange,
        bucket: Bucket,
        offset: FixedOffset,
    ) -> Self {
        let mut rows = BTreeMap::new();
        let mut cursor = Some(bucket.start_of(range.start()));
        while let Some(start) = cursor.filter(|d| *d <= range.end()) {
            rows.insert(start, BucketCounts::empty(start));
            cursor = bucket.next(start);
        }

        for session in sessions {
            let date = session.date_time().local_date(offset);
            if !range.contains(date) {
                continue;
            }
            let key = bucket.start_of(date);
            rows.entry(key)
                .or_insert_with(|| BucketCounts::empty(key))
                .record(session);
        }

        Self {
            range,
            bucket,
            rows: rows.into_values().collect(),
        }
    }

    /// Sum over every bucket. `bucket_start` is the range start.
    pub fn totals(&self) -> BucketCounts {
        self.rows
            .iter()
            .fold(BucketCounts::empty(self.range.start()), |mut acc, row| {
                acc.scheduled += row.scheduled;
                acc.present += row.present;
                acc.absent += row.absent;
                acc.no_show += row.no_show;
                acc.cancelled += row.cancelled;
                acc.minutes_taught += row.minutes_taught;
                acc
            })
    }
}
