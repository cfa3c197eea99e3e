//! Scheduling configuration

use chrono::{FixedOffset, NaiveTime};
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::scheduling::{BusinessHours, OutOfHoursPolicy, SchedulingPolicy};

/// No real-world zone is further than 14 hours from UTC.
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Business hours and slot settings for availability search
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulingConfig {
    /// Opening time, local wall clock, "HH:MM"
    #[serde(default = "default_business_open")]
    pub business_open: String,

    /// Closing time, local wall clock, "HH:MM"
    #[serde(default = "default_business_close")]
    pub business_close: String,

    /// Shortest gap offered as a slot, in minutes
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u32,

    /// School's offset from UTC, in minutes (e.g. 330 for +05:30)
    #[serde(default)]
    pub utc_offset_minutes: i32,

    /// How lessons outside business hours affect the availability walk
    #[serde(default)]
    pub out_of_hours: OutOfHoursPolicy,
}

impl SchedulingConfig {
    pub fn utc_offset(&self) -> Result<FixedOffset, ValidationError> {
        if self.utc_offset_minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(ValidationError::InvalidUtcOffset(self.utc_offset_minutes));
        }
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .ok_or(ValidationError::InvalidUtcOffset(self.utc_offset_minutes))
    }

    /// Build the domain policy.
    pub fn to_policy(&self) -> Result<SchedulingPolicy, ValidationError> {
        let open = parse_time("business_open", &self.business_open)?;
        let close = parse_time("business_close", &self.business_close)?;
        let hours = BusinessHours::new(open, close, self.utc_offset()?)
            .map_err(|_| ValidationError::BusinessHoursInverted)?;

        SchedulingPolicy::new(hours, self.slot_minutes, self.out_of_hours).map_err(|_| {
            ValidationError::InvalidSlotLength {
                slot: self.slot_minutes,
                max: hours.length_minutes(),
            }
        })
    }

    /// Validate scheduling configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.to_policy().map(|_| ())
    }
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            business_open: default_business_open(),
            business_close: default_business_close(),
            slot_minutes: default_slot_minutes(),
            utc_offset_minutes: 0,
            out_of_hours: OutOfHoursPolicy::default(),
        }
    }
}

fn parse_time(field: &'static str, value: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| {
        ValidationError::InvalidBusinessTime {
            field,
            value: value.to_string(),
        }
    })
}

fn default_business_open() -> String {
    "09:00".to_string()
}

fn default_business_close() -> String {
    "18:00".to_string()
}

fn default_slot_minutes() -> u32 {
    SchedulingPolicy::DEFAULT_SLOT_MINUTES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_domain_policy() {
        let policy = SchedulingConfig::default().to_policy().unwrap();
        assert_eq!(policy, SchedulingPolicy::default());
    }

    #[test]
    fn offset_is_applied() {
        let config = SchedulingConfig {
            utc_offset_minutes: 330,
            ..Default::default()
        };
        let policy = config.to_policy().unwrap();
        assert_eq!(policy.business_hours.utc_offset().local_minus_utc(), 330 * 60);
    }

    #[test]
    fn rejects_malformed_time() {
        let config = SchedulingConfig {
            business_open: "9am".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidBusinessTime {
                field: "business_open",
                value: "9am".to_string()
            })
        );
    }

    #[test]
    fn rejects_inverted_hours() {
        let config = SchedulingConfig {
            business_open: "18:00".to_string(),
            business_close: "09:00".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::BusinessHoursInverted));
    }

    #[test]
    fn rejects_slot_longer_than_day() {
        let config = SchedulingConfig {
            business_open: "09:00".to_string(),
            business_close: "10:00".to_string(),
            slot_minutes: 90,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidSlotLength { slot: 90, max: 60 })
        );
    }

    #[test]
    fn rejects_offset_out_of_range() {
        let config = SchedulingConfig {
            utc_offset_minutes: -900,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidUtcOffset(-900)));
    }
}
