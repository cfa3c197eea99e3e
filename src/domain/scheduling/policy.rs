//! Scheduling policy: business hours, slot length, out-of-hours handling.

use chrono::{Duration, FixedOffset, NaiveDate, NaiveTime, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::{Timestamp, ValidationError};

use super::TimeInterval;

/// Daily opening window, in local wall-clock time at a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessHours {
    open: NaiveTime,
    close: NaiveTime,
    utc_offset: FixedOffset,
}

impl BusinessHours {
    /// # Errors
    ///
    /// - `InvalidFormat` unless `open < close`
    pub fn new(
        open: NaiveTime,
        close: NaiveTime,
        utc_offset: FixedOffset,
    ) -> Result<Self, ValidationError> {
        if open >= close {
            return Err(ValidationError::invalid_format(
                "business_hours",
                format!("opening time {} must be before closing time {}", open, close),
            ));
        }
        Ok(Self {
            open,
            close,
            utc_offset,
        })
    }

    pub fn open(&self) -> NaiveTime {
        self.open
    }

    pub fn close(&self) -> NaiveTime {
        self.close
    }

    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset
    }

    /// Length of the business day in minutes.
    pub fn length_minutes(&self) -> i64 {
        (self.close - self.open).num_minutes()
    }

    /// Opening window on `day`.
    pub fn window(&self, day: NaiveDate) -> TimeInterval {
        TimeInterval::starting_at(
            Timestamp::from_local(day, self.open, self.utc_offset),
            self.length_minutes().max(0) as u32,
        )
    }

    /// Local calendar day `[midnight, next midnight)`.
    pub fn day_bounds(&self, day: NaiveDate) -> TimeInterval {
        // Fixed offsets have no DST shifts, so every local day is 24 hours.
        TimeInterval::starting_at(
            Timestamp::from_local(day, NaiveTime::MIN, self.utc_offset),
            24 * 60,
        )
    }
}

impl Default for BusinessHours {
    /// 09:00–18:00 UTC.
    fn default() -> Self {
        Self {
            open: NaiveTime::MIN + Duration::hours(9),
            close: NaiveTime::MIN + Duration::hours(18),
            utc_offset: Utc.fix(),
        }
    }
}

/// How the availability walk treats lessons that spill outside business hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfHoursPolicy {
    /// Clip every lesson to the opening window first; the cursor only moves forward.
    #[default]
    Clamp,
    /// Set the cursor to each lesson's raw end, as the legacy console did.
    ///
    /// A lesson ending before opening pulls the cursor before opening, and
    /// overlapping lessons can move it backwards.
    AsRecorded,
}

impl FromStr for OutOfHoursPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clamp" => Ok(OutOfHoursPolicy::Clamp),
            "as_recorded" => Ok(OutOfHoursPolicy::AsRecorded),
            _ => Err(ValidationError::invalid_enum_value("out_of_hours", s)),
        }
    }
}

/// Inputs that shape the availability search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulingPolicy {
    pub business_hours: BusinessHours,
    /// Shortest gap worth offering, in minutes.
    pub slot_minutes: u32,
    pub out_of_hours: OutOfHoursPolicy,
}

impl SchedulingPolicy {
    pub const DEFAULT_SLOT_MINUTES: u32 = 60;

    pub fn new(
        business_hours: BusinessHours,
        slot_minutes: u32,
        out_of_hours: OutOfHoursPolicy,
    ) -> Result<Self, ValidationError> {
        let day = business_hours.length_minutes();
        if slot_minutes == 0 || i64::from(slot_minutes) > day {
            return Err(ValidationError::out_of_range(
                "slot_minutes",
                1,
                day,
                i64::from(slot_minutes),
            ));
        }
        Ok(Self {
            business_hours,
            slot_minutes,
            out_of_hours,
        })
    }

    pub fn with_slot_minutes(self, slot_minutes: u32) -> Result<Self, ValidationError> {
        Self::new(self.business_hours, slot_minutes, self.out_of_hours)
    }
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self {
            business_hours: BusinessHours::default(),
            slot_minutes: Self::DEFAULT_SLOT_MINUTES,
            out_of_hours: OutOfHoursPolicy::default(),
        }
    }
}
