//! Lesson pack aggregate.
//!
//! A pack is a prepaid bundle of lessons for one student, bound to a session
//! type and a location. Each scheduled lesson drawn from the pack consumes a
//! credit; cancelling the lesson returns it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{
    DomainError, ErrorCode, Location, PackId, SessionType, StudentId, Timestamp, ValidationError,
};
use crate::domain::session::SessionDraft;

/// Why a pack cannot cover a lesson, or cannot change its credit count.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    #[error("Pack {pack_id} does not belong to any student in this session")]
    StudentNotInPack { pack_id: PackId, student_id: StudentId },

    #[error("Pack {pack_id} is for {expected} sessions, not {actual}")]
    SessionTypeMismatch {
        pack_id: PackId,
        expected: SessionType,
        actual: SessionType,
    },

    #[error("Pack {pack_id} is for {expected} sessions, not {actual}")]
    LocationMismatch {
        pack_id: PackId,
        expected: Location,
        actual: Location,
    },

    #[error("Pack {pack_id} has used all {total} sessions")]
    Exhausted { pack_id: PackId, total: u32 },

    #[error("Pack {pack_id} expired at {expires_at}")]
    Expired { pack_id: PackId, expires_at: Timestamp },

    #[error("Pack {pack_id} has no used sessions to release")]
    NothingToRelease { pack_id: PackId },
}

impl PackError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PackError::Exhausted { .. } => ErrorCode::PackExhausted,
            PackError::NothingToRelease { .. } => ErrorCode::InvalidStateTransition,
            _ => ErrorCode::PackIncompatible,
        }
    }
}

impl From<PackError> for DomainError {
    fn from(err: PackError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

/// Prepaid bundle of lessons.
///
/// # Invariants
///
/// - `total_sessions > 0`
/// - `sessions_used <= total_sessions`
/// - `subject` is not blank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pack {
    id: PackId,
    student_id: StudentId,
    subject: String,
    session_type: SessionType,
    location: Location,
    total_sessions: u32,
    sessions_used: u32,
    purchased_at: Timestamp,
    expires_at: Option<Timestamp>,
}

impl Pack {
    /// Create a fresh, unused pack.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if `subject` is blank
    /// - `OutOfRange` if `total_sessions` is 0
    /// - `InvalidFormat` if `expires_at` is not after `purchased_at`
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: PackId,
        student_id: StudentId,
        subject: impl Into<String>,
        session_type: SessionType,
        location: Location,
        total_sessions: u32,
        purchased_at: Timestamp,
        expires_at: Option<Timestamp>,
    ) -> Result<Self, ValidationError> {
        let subject = subject.into();
        if subject.trim().is_empty() {
            return Err(ValidationError::empty_field("subject"));
        }
        if total_sessions == 0 {
            return Err(ValidationError::out_of_range(
                "total_sessions",
                1,
                i64::from(u32::MAX),
                0,
            ));
        }
        if let Some(expiry) = expires_at {
            if !expiry.is_after(&purchased_at) {
                return Err(ValidationError::invalid_format(
                    "expires_at",
                    "must be after the purchase time",
                ));
            }
        }

        Ok(Self {
            id,
            student_id,
            subject,
            session_type,
            location,
            total_sessions,
            sessions_used: 0,
            purchased_at,
            expires_at,
        })
    }

    /// Rebuild from storage.
    ///
    /// `sessions_used` is capped at `total_sessions`.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: PackId,
        student_id: StudentId,
        subject: String,
        session_type: SessionType,
        location: Location,
        total_sessions: u32,
        sessions_used: u32,
        purchased_at: Timestamp,
        expires_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            student_id,
            subject,
            session_type,
            location,
            total_sessions,
            sessions_used: sessions_used.min(total_sessions),
            purchased_at,
            expires_at,
        }
    }

    pub fn id(&self) -> &PackId {
        &self.id
    }

    pub fn student_id(&self) -> &StudentId {
        &self.student_id
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn session_type(&self) -> SessionType {
        self.session_type
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn total_sessions(&self) -> u32 {
        self.total_sessions
    }

    pub fn sessions_used(&self) -> u32 {
        self.sessions_used
    }

    pub fn sessions_remaining(&self) -> u32 {
        self.total_sessions - self.sessions_used
    }

    pub fn purchased_at(&self) -> &Timestamp {
        &self.purchased_at
    }

    pub fn expires_at(&self) -> Option<&Timestamp> {
        self.expires_at.as_ref()
    }

    pub fn is_expired_at(&self, instant: &Timestamp) -> bool {
        self.expires_at.is_some_and(|expiry| !instant.is_before(&expiry))
    }

    /// Checks that this pack can pay for `draft`.
    ///
    /// Rules are tested in a fixed order and the first failure wins:
    /// student, session type, location, remaining credit, expiry.
    pub fn ensure_compatible(&self, draft: &SessionDraft) -> Result<(), PackError> {
        self.ensure_matches(draft)?;
        if self.sessions_remaining() == 0 {
            return Err(PackError::Exhausted {
                pack_id: self.id,
                total: self.total_sessions,
            });
        }
        self.ensure_covers_date(&draft.date_time)
    }

    /// Same rules as [`ensure_compatible`](Self::ensure_compatible) minus the
    /// credit check, for a lesson that already holds one of this pack's credits.
    pub fn ensure_still_covers(&self, draft: &SessionDraft) -> Result<(), PackError> {
        self.ensure_matches(draft)?;
        self.ensure_covers_date(&draft.date_time)
    }

    /// Fails if the pack has expired by `start`.
    pub fn ensure_covers_date(&self, start: &Timestamp) -> Result<(), PackError> {
        match self.expires_at {
            Some(expires_at) if self.is_expired_at(start) => Err(PackError::Expired {
                pack_id: self.id,
                expires_at,
            }),
            _ => Ok(()),
        }
    }

    fn ensure_matches(&self, draft: &SessionDraft) -> Result<(), PackError> {
        if !draft.student_ids.contains(&self.student_id) {
            return Err(PackError::StudentNotInPack {
                pack_id: self.id,
                student_id: self.student_id,
            });
        }
        if draft.session_type != self.session_type {
            return Err(PackError::SessionTypeMismatch {
                pack_id: self.id,
                expected: self.session_type,
                actual: draft.session_type,
            });
        }
        if draft.location != self.location {
            return Err(PackError::LocationMismatch {
                pack_id: self.id,
                expected: self.location,
                actual: draft.location,
            });
        }
        Ok(())
    }

    /// Use one credit. Returns the credits left.
    pub fn consume(&mut self) -> Result<u32, PackError> {
        if self.sessions_remaining() == 0 {
            return Err(PackError::Exhausted {
                pack_id: self.id,
                total: self.total_sessions,
            });
        }
        self.sessions_used += 1;
        Ok(self.sessions_remaining())
    }

    /// Return one credit after a cancellation. Returns the credits left.
    pub fn release(&mut self) -> Result<u32, PackError> {
        if self.sessions_used == 0 {
            return Err(PackError::NothingToRelease { pack_id: self.id });
        }
        self.sessions_used -= 1;
        Ok(self.sessions_remaining())
    }
}
