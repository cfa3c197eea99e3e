//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `LESSON_SCHEDULER` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use lesson_scheduler::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! config.logging.init_tracing().expect("Failed to install tracing");
//!
//! let policy = config.scheduling.to_policy().expect("Invalid scheduling policy");
//! ```

mod error;
mod logging;
mod scheduling;

pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use scheduling::SchedulingConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// configuration (09:00-18:00 UTC, 60-minute slots).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Business hours, slot length, out-of-hours handling
    #[serde(default)]
    pub scheduling: SchedulingConfig,

    /// Tracing filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `LESSON_SCHEDULER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `LESSON_SCHEDULER__SCHEDULING__SLOT_MINUTES=30` -> `scheduling.slot_minutes = 30`
    /// - `LESSON_SCHEDULER__LOGGING__JSON=true` -> `logging.json = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("LESSON_SCHEDULER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.scheduling.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
