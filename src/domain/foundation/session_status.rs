//! SessionStatus enum for tracking the lifecycle of a lesson session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{StateMachine, ValidationError};

/// Lifecycle status of a lesson session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Scheduled,
    Present,
    Absent,
    CancelledByStudent,
    CancelledByTeacher,
    CancelledBySchool,
    NoShow,
}

impl SessionStatus {
    pub const ALL: [SessionStatus; 7] = [
        SessionStatus::Scheduled,
        SessionStatus::Present,
        SessionStatus::Absent,
        SessionStatus::CancelledByStudent,
        SessionStatus::CancelledByTeacher,
        SessionStatus::CancelledBySchool,
        SessionStatus::NoShow,
    ];

    /// Returns true for any of the three cancellation statuses.
    ///
    /// Cancelled sessions are inert: they never block a time slot.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            SessionStatus::CancelledByStudent
                | SessionStatus::CancelledByTeacher
                | SessionStatus::CancelledBySchool
        )
    }

    /// Returns true if the session still occupies its time slot.
    pub fn is_active(&self) -> bool {
        !self.is_cancelled()
    }

    /// Returns true once attendance has been recorded.
    pub fn is_attendance_outcome(&self) -> bool {
        matches!(
            self,
            SessionStatus::Present | SessionStatus::Absent | SessionStatus::NoShow
        )
    }

    /// Stable wire name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::Present => "present",
            SessionStatus::Absent => "absent",
            SessionStatus::CancelledByStudent => "cancelled_by_student",
            SessionStatus::CancelledByTeacher => "cancelled_by_teacher",
            SessionStatus::CancelledBySchool => "cancelled_by_school",
            SessionStatus::NoShow => "no_show",
        }
    }
}

impl StateMachine for SessionStatus {
    /// Valid transitions:
    /// - Scheduled -> any other status
    /// - Present / Absent / NoShow -> each other (attendance corrections)
    /// - cancellations are terminal
    fn can_transition_to(&self, target: &Self) -> bool {
        if self == target {
            return false;
        }
        match self {
            SessionStatus::Scheduled => true,
            s if s.is_attendance_outcome() => target.is_attendance_outcome(),
            _ => false,
        }
    }

    fn valid_transitions(&self) -> Vec<Self> {
        SessionStatus::ALL
            .into_iter()
            .filter(|target| self.can_transition_to(target))
            .collect()
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Scheduled => "Scheduled",
            SessionStatus::Present => "Present",
            SessionStatus::Absent => "Absent",
            SessionStatus::CancelledByStudent => "Cancelled by Student",
            SessionStatus::CancelledByTeacher => "Cancelled by Teacher",
            SessionStatus::CancelledBySchool => "Cancelled by School",
            SessionStatus::NoShow => "No Show",
        };
        write!(f, "{}", s)
    }
}

/// Accepts both the wire name (`cancelled_by_teacher`) and the label shown
/// in the console (`Cancelled by Teacher`).
impl FromStr for SessionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        SessionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ValidationError::invalid_enum_value("status", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_scheduled() {
        assert_eq!(SessionStatus::default(), SessionStatus::Scheduled);
    }

    #[test]
    fn only_three_statuses_count_as_cancelled() {
        let cancelled: Vec<_> = SessionStatus::ALL
            .into_iter()
            .filter(SessionStatus::is_cancelled)
            .collect();
        assert_eq!(
            cancelled,
            vec![
                SessionStatus::CancelledByStudent,
                SessionStatus::CancelledByTeacher,
                SessionStatus::CancelledBySchool,
            ]
        );
    }

    #[test]
    fn no_show_still_occupies_the_slot() {
        assert!(SessionStatus::NoShow.is_active());
        assert!(SessionStatus::Absent.is_active());
    }

    #[test]
    fn scheduled_can_reach_every_other_status() {
        assert_eq!(SessionStatus::Scheduled.valid_transitions().len(), 6);
    }

    #[test]
    fn attendance_outcomes_can_be_corrected() {
        assert!(SessionStatus::Absent.can_transition_to(&SessionStatus::Present));
        assert!(SessionStatus::Present.can_transition_to(&SessionStatus::NoShow));
        assert!(!SessionStatus::Present.can_transition_to(&SessionStatus::Scheduled));
        assert!(!SessionStatus::Present.can_transition_to(&SessionStatus::CancelledBySchool));
    }

    #[test]
    fn parses_console_labels() {
        assert_eq!(
            "Cancelled by Teacher".parse::<SessionStatus>().unwrap(),
            SessionStatus::CancelledByTeacher
        );
        assert_eq!("No Show".parse::<SessionStatus>().unwrap(), SessionStatus::NoShow);
        assert_eq!("present".parse::<SessionStatus>().unwrap(), SessionStatus::Present);
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for status in SessionStatus::ALL {
            assert_eq!(status.to_string().parse::<SessionStatus>().unwrap(), status);
        }
    }

    #[test]
    fn rejects_unknown_value_with_typed_error() {
        let err = "Postponed".parse::<SessionStatus>().unwrap_err();
        assert_eq!(err, ValidationError::invalid_enum_value("status", "Postponed"));
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&SessionStatus::CancelledByStudent).unwrap(),
            "\"cancelled_by_student\""
        );
        let status: SessionStatus = serde_json::from_str("\"no_show\"").unwrap();
        assert_eq!(status, SessionStatus::NoShow);
    }
}
