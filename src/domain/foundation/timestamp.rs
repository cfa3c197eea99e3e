//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Creates a timestamp from a wall-clock date and time at a fixed UTC offset.
    pub fn from_local(date: NaiveDate, time: NaiveTime, offset: FixedOffset) -> Self {
        Self::from_naive_local(date.and_time(time), offset)
    }

    /// Interprets a naive wall-clock value at a fixed UTC offset.
    pub fn from_naive_local(local: NaiveDateTime, offset: FixedOffset) -> Self {
        // Fixed offsets have no gaps or folds, so the mapping is always single.
        Self(Utc.from_utc_datetime(&(local - offset)))
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Creates a new timestamp by adding the specified number of minutes.
    pub fn plus_minutes(&self, minutes: i64) -> Self {
        Self(self.0 + Duration::minutes(minutes))
    }

    /// Creates a new timestamp by adding the specified number of days.
    ///
    /// Negative values subtract days.
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Returns the calendar date this instant falls on at the given offset.
    pub fn local_date(&self, offset: FixedOffset) -> NaiveDate {
        self.0.with_timezone(&offset).date_naive()
    }

    /// Returns the wall-clock value of this instant at the given offset.
    pub fn local_datetime(&self, offset: FixedOffset) -> NaiveDateTime {
        self.0.with_timezone(&offset).naive_local()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn ts(rfc3339: &str) -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339(rfc3339)
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn timestamp_ordering_works() {
        let ts1 = ts("2024-01-15T10:00:00Z");
        let ts2 = ts("2024-01-15T10:00:01Z");

        assert!(ts1 < ts2);
        assert!(ts1.is_before(&ts2));
        assert!(ts2.is_after(&ts1));
    }

    #[test]
    fn plus_minutes_adds_correctly() {
        let start = ts("2024-01-15T10:30:00Z");
        assert_eq!(start.plus_minutes(45), ts("2024-01-15T11:15:00Z"));
        assert_eq!(start.plus_minutes(-30), ts("2024-01-15T10:00:00Z"));
    }

    #[test]
    fn duration_since_is_signed() {
        let a = ts("2024-01-15T10:00:00Z");
        let b = ts("2024-01-15T11:00:00Z");
        assert_eq!(b.duration_since(&a).num_minutes(), 60);
        assert_eq!(a.duration_since(&b).num_minutes(), -60);
    }

    #[test]
    fn from_local_applies_offset() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let time = NaiveTime::from_hms_opt(9, 0, 0).unwrap();

        let ts = Timestamp::from_local(date, time, offset);
        assert_eq!(ts.as_datetime().hour(), 7);
        assert_eq!(ts.local_date(offset), date);
        assert_eq!(ts.local_datetime(offset).time(), time);
    }

    #[test]
    fn local_date_crosses_midnight_with_offset() {
        let late_utc = ts("2024-01-15T23:30:00Z");
        let plus_one = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(late_utc.local_date(plus_one).day(), 16);
        assert_eq!(late_utc.local_date(FixedOffset::east_opt(0).unwrap()).day(), 15);
    }

    #[test]
    fn timestamp_serializes_to_json() {
        let json = serde_json::to_string(&ts("2024-01-15T10:30:00Z")).unwrap();
        assert!(json.contains("2024-01-15"));
    }

    #[test]
    fn timestamp_deserializes_from_json() {
        let parsed: Timestamp = serde_json::from_str("\"2024-01-15T10:30:00Z\"").unwrap();
        assert_eq!(parsed.as_datetime().year(), 2024);
    }
}
