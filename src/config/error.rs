//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Tracing initialization failed: {0}")]
    TracingInit(String),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid time for {field}: '{value}' (expected HH:MM)")]
    InvalidBusinessTime { field: &'static str, value: String },

    #[error("Business hours must open before they close")]
    BusinessHoursInverted,

    #[error("Slot length {slot} must be between 1 and {max} minutes")]
    InvalidSlotLength { slot: u32, max: i64 },

    #[error("UTC offset {0} minutes is outside -840..=840")]
    InvalidUtcOffset(i32),

    #[error("Invalid log filter directive: {0}")]
    InvalidLogFilter(String),
}
