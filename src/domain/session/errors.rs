//! Session-specific error types.

use crate::domain::foundation::{AuthError, DomainError, ErrorCode, PackId, SessionId};
use crate::domain::pack::PackError;
use crate::domain::scheduling::Conflict;

/// Session-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Session was not found.
    NotFound(SessionId),
    /// Caller may not change the calendar.
    Forbidden(AuthError),
    /// Invalid state for operation.
    InvalidState(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Overlaps an active session.
    Conflict(Box<Conflict>),
    /// Referenced pack does not exist.
    PackNotFound(PackId),
    /// The pack cannot cover this lesson.
    Pack(PackError),
    /// Infrastructure error.
    Infrastructure(String),
}

impl SessionError {
    pub fn not_found(id: SessionId) -> Self {
        SessionError::NotFound(id)
    }
    pub fn invalid_state(message: impl Into<String>) -> Self {
        SessionError::InvalidState(message.into())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SessionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn conflict(conflict: Conflict) -> Self {
        SessionError::Conflict(Box::new(conflict))
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        SessionError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::Forbidden(AuthError::NotSignedIn) => ErrorCode::Unauthorized,
            SessionError::Forbidden(_) => ErrorCode::Forbidden,
            SessionError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            SessionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SessionError::Conflict(_) => ErrorCode::ScheduleConflict,
            SessionError::PackNotFound(_) => ErrorCode::PackNotFound,
            SessionError::Pack(err) => err.code(),
            SessionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            SessionError::NotFound(id) => format!("Session not found: {}", id),
            SessionError::Forbidden(err) => err.to_string(),
            SessionError::InvalidState(msg) => format!("Invalid state: {}", msg),
            SessionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SessionError::Conflict(conflict) => format!("Schedule conflict: {}", conflict.reason),
            SessionError::PackNotFound(id) => format!("Pack not found: {}", id),
            SessionError::Pack(err) => err.to_string(),
            SessionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidStateTransition => SessionError::InvalidState(err.message),
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat
            | ErrorCode::InvalidEnumValue => SessionError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => SessionError::Infrastructure(err.to_string()),
        }
    }
}

impl From<AuthError> for SessionError {
    fn from(err: AuthError) -> Self {
        SessionError::Forbidden(err)
    }
}

impl From<PackError> for SessionError {
    fn from(err: PackError) -> Self {
        SessionError::Pack(err)
    }
}

impl From<SessionError> for DomainError {
    fn from(err: SessionError) -> Self {
        let code = err.code();
        match err {
            SessionError::NotFound(id) => {
                DomainError::new(code, format!("Session not found: {}", id))
                    .with_detail("session_id", id.to_string())
            }
            SessionError::Conflict(conflict) => DomainError::new(code, conflict.reason.clone())
                .with_detail("session_id", conflict.session.id().to_string())
                .with_detail("dimension", conflict.dimension.to_string()),
            other => DomainError::new(code, other.message()),
        }
    }
}
