//! State machine trait for status enums.
//!
//! Gives lifecycle statuses (lesson sessions today) one interface for
//! checking and performing transitions.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors define valid state transitions and get validated
/// transition methods for free.
///
/// # Example
///
/// ```ignore
/// let status = SessionStatus::Scheduled;
/// let attended = status.transition_to(SessionStatus::Present)?;
/// assert!(attended.transition_to(SessionStatus::Scheduled).is_err());
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionStatus;

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        let result = SessionStatus::Scheduled.transition_to(SessionStatus::Present);
        assert_eq!(result, Ok(SessionStatus::Present));
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        let result = SessionStatus::CancelledBySchool.transition_to(SessionStatus::Present);
        assert!(matches!(
            result,
            Err(ValidationError::InvalidFormat { ref field, .. }) if field == "state_transition"
        ));
    }

    #[test]
    fn cancellations_are_terminal() {
        assert!(SessionStatus::CancelledByStudent.is_terminal());
        assert!(SessionStatus::CancelledByTeacher.is_terminal());
        assert!(SessionStatus::CancelledBySchool.is_terminal());
        assert!(!SessionStatus::Scheduled.is_terminal());
        assert!(!SessionStatus::Absent.is_terminal());
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for status in SessionStatus::ALL {
            for target in SessionStatus::ALL {
                assert_eq!(
                    status.can_transition_to(&target),
                    status.valid_transitions().contains(&target),
                    "mismatch for {:?} -> {:?}",
                    status,
                    target
                );
            }
        }
    }
}
