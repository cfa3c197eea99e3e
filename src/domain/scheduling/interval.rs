//! Half-open time interval `[start, end)`.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Timestamp, ValidationError};

/// A span of time that includes `start` and excludes `end`.
///
/// Two lessons that touch (one ends at 10:00, the next starts at 10:00) do
/// not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    start: Timestamp,
    end: Timestamp,
}

impl TimeInterval {
    /// Creates an interval, rejecting `end < start`.
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, ValidationError> {
        if end.is_before(&start) {
            return Err(ValidationError::invalid_format(
                "interval",
                "end must not be before start",
            ));
        }
        Ok(Self { start, end })
    }

    /// Interval of `minutes` starting at `start`.
    pub fn starting_at(start: Timestamp, minutes: u32) -> Self {
        Self {
            start,
            end: start.plus_minutes(i64::from(minutes)),
        }
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end.duration_since(&self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Half-open overlap test: `a.start < b.end && a.end > b.start`.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && self.end > other.start
    }

    pub fn contains(&self, instant: Timestamp) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Returns the part of `self` inside `bounds`, or `None` if they share no time.
    pub fn clamp_to(&self, bounds: &TimeInterval) -> Option<TimeInterval> {
        let start = self.start.max(bounds.start);
        let end = self.end.min(bounds.end);
        if start < end {
            Some(TimeInterval { start, end })
        } else {
            None
        }
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {})",
            self.start.as_datetime().to_rfc3339(),
            self.end.as_datetime().to_rfc3339()
        )
    }
}
