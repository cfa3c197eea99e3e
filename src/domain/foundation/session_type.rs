//! Lesson formats offered by the school.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Lesson format. Determines the standard duration and how many students attend.
///
/// | Type  | Minutes | Students |
/// |-------|---------|----------|
/// | Focus | 45      | 1        |
/// | Solo  | 60      | 1        |
/// | Duo   | 60      | 2        |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    Focus,
    Solo,
    Duo,
}

impl SessionType {
    /// Standard lesson length in minutes.
    pub fn default_duration_minutes(&self) -> u32 {
        match self {
            SessionType::Focus => 45,
            SessionType::Solo | SessionType::Duo => 60,
        }
    }

    /// Number of students a session of this type seats.
    pub fn student_count(&self) -> usize {
        match self {
            SessionType::Focus | SessionType::Solo => 1,
            SessionType::Duo => 2,
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionType::Focus => "Focus",
            SessionType::Solo => "Solo",
            SessionType::Duo => "Duo",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for SessionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "focus" => Ok(SessionType::Focus),
            "solo" => Ok(SessionType::Solo),
            "duo" => Ok(SessionType::Duo),
            _ => Err(ValidationError::invalid_enum_value("session_type", s)),
        }
    }
}
