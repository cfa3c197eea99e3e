//! Lesson session aggregate.
//!
//! A session is one scheduled lesson: a teacher, one or two students, a
//! start instant and a length. Its time slot is the half-open interval
//! `[date_time, date_time + duration)`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::{
    DomainError, ErrorCode, Location, PackId, SessionId, SessionStatus, SessionType,
    StateMachine, StudentId, TeacherId, Timestamp,
};
use crate::domain::scheduling::TimeInterval;

/// Longest lesson the console accepts, in minutes.
pub const MAX_DURATION_MINUTES: u32 = 480;

/// Who called off a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancellationParty {
    Student,
    Teacher,
    School,
}

impl CancellationParty {
    pub fn status(&self) -> SessionStatus {
        match self {
            CancellationParty::Student => SessionStatus::CancelledByStudent,
            CancellationParty::Teacher => SessionStatus::CancelledByTeacher,
            CancellationParty::School => SessionStatus::CancelledBySchool,
        }
    }
}

/// Attendance recorded after a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceOutcome {
    Present,
    Absent,
    NoShow,
}

impl AttendanceOutcome {
    pub fn status(&self) -> SessionStatus {
        match self {
            AttendanceOutcome::Present => SessionStatus::Present,
            AttendanceOutcome::Absent => SessionStatus::Absent,
            AttendanceOutcome::NoShow => SessionStatus::NoShow,
        }
    }
}

/// Everything needed to put a new lesson on the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDraft {
    pub teacher_id: TeacherId,
    pub student_ids: Vec<StudentId>,
    pub session_type: SessionType,
    pub date_time: Timestamp,
    pub duration_minutes: u32,
    pub location: Location,
    pub pack_id: Option<PackId>,
}

impl SessionDraft {
    /// Draft using the standard duration for `session_type`.
    pub fn standard(
        teacher_id: TeacherId,
        student_ids: Vec<StudentId>,
        session_type: SessionType,
        date_time: Timestamp,
        location: Location,
    ) -> Self {
        Self {
            teacher_id,
            student_ids,
            session_type,
            date_time,
            duration_minutes: session_type.default_duration_minutes(),
            location,
            pack_id: None,
        }
    }

    pub fn with_pack(mut self, pack_id: PackId) -> Self {
        self.pack_id = Some(pack_id);
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    pub fn interval(&self) -> TimeInterval {
        TimeInterval::starting_at(self.date_time, self.duration_minutes)
    }

    /// Checks duration bounds and that the roster fits the session type.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_duration(self.duration_minutes)?;

        let expected = self.session_type.student_count();
        if self.student_ids.len() != expected {
            return Err(DomainError::validation(
                "student_ids",
                format!(
                    "{} sessions need exactly {} student(s), got {}",
                    self.session_type,
                    expected,
                    self.student_ids.len()
                ),
            ));
        }

        let unique: HashSet<_> = self.student_ids.iter().collect();
        if unique.len() != self.student_ids.len() {
            return Err(DomainError::validation(
                "student_ids",
                "A student cannot be booked twice into the same session",
            ));
        }
        Ok(())
    }
}

/// Lesson session aggregate.
///
/// # Invariants
///
/// - `duration_minutes` is 1..=480
/// - `student_ids` holds exactly `session_type.student_count()` distinct students
/// - only `Scheduled` sessions can be moved
/// - cancellation statuses are final
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    teacher_id: TeacherId,
    student_ids: Vec<StudentId>,
    session_type: SessionType,
    date_time: Timestamp,
    duration_minutes: u32,
    location: Location,
    status: SessionStatus,
    pack_id: Option<PackId>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Session {
    /// Create a new scheduled session.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the draft breaks a roster or duration rule
    pub fn new(id: SessionId, draft: SessionDraft) -> Result<Self, DomainError> {
        draft.validate()?;

        let now = Timestamp::now();
        Ok(Self::reconstitute(id, draft, SessionStatus::Scheduled, now, now))
    }

    /// Schedule a new session under a fresh id.
    pub fn schedule(draft: SessionDraft) -> Result<Self, DomainError> {
        Self::new(SessionId::new(), draft)
    }

    /// Reconstitute a session from persistence (no validation).
    pub fn reconstitute(
        id: SessionId,
        draft: SessionDraft,
        status: SessionStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            teacher_id: draft.teacher_id,
            student_ids: draft.student_ids,
            session_type: draft.session_type,
            date_time: draft.date_time,
            duration_minutes: draft.duration_minutes,
            location: draft.location,
            status,
            pack_id: draft.pack_id,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn teacher_id(&self) -> &TeacherId {
        &self.teacher_id
    }

    pub fn student_ids(&self) -> &[StudentId] {
        &self.student_ids
    }

    pub fn session_type(&self) -> SessionType {
        self.session_type
    }

    /// Start instant.
    pub fn date_time(&self) -> Timestamp {
        self.date_time
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn pack_id(&self) -> Option<&PackId> {
        self.pack_id.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// The occupied slot `[date_time, date_time + duration)`.
    pub fn interval(&self) -> TimeInterval {
        TimeInterval::starting_at(self.date_time, self.duration_minutes)
    }

    pub fn end_time(&self) -> Timestamp {
        self.interval().end()
    }

    pub fn is_cancelled(&self) -> bool {
        self.status.is_cancelled()
    }

    pub fn has_student(&self, student_id: &StudentId) -> bool {
        self.student_ids.contains(student_id)
    }

    /// Returns true if any student attends both sessions.
    pub fn shares_student_with(&self, others: &[StudentId]) -> bool {
        others.iter().any(|s| self.has_student(s))
    }

    /// Rebuilds the draft this session was created from.
    pub fn to_draft(&self) -> SessionDraft {
        SessionDraft {
            teacher_id: self.teacher_id,
            student_ids: self.student_ids.clone(),
            session_type: self.session_type,
            date_time: self.date_time,
            duration_minutes: self.duration_minutes,
            location: self.location,
            pack_id: self.pack_id,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Move the session to a new start, optionally changing its length.
    ///
    /// Returns the previous interval.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless the session is still `Scheduled`
    /// - `ValidationFailed` if the new duration is out of range
    pub fn reschedule(
        &mut self,
        new_start: Timestamp,
        new_duration_minutes: Option<u32>,
    ) -> Result<TimeInterval, DomainError> {
        if self.status != SessionStatus::Scheduled {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot reschedule a session that is {}", self.status),
            ));
        }
        let duration = new_duration_minutes.unwrap_or(self.duration_minutes);
        validate_duration(duration)?;

        let previous = self.interval();
        self.date_time = new_start;
        self.duration_minutes = duration;
        self.updated_at = Timestamp::now();
        Ok(previous)
    }

    /// Cancel the session. Returns the status it had before.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the session is already cancelled
    pub fn cancel(&mut self, by: CancellationParty) -> Result<SessionStatus, DomainError> {
        self.transition(by.status())
    }

    /// Record attendance, or correct an earlier record. Returns the previous status.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the session was cancelled or already has this outcome
    pub fn mark_attendance(
        &mut self,
        outcome: AttendanceOutcome,
    ) -> Result<SessionStatus, DomainError> {
        self.transition(outcome.status())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn transition(&mut self, target: SessionStatus) -> Result<SessionStatus, DomainError> {
        let next = self.status.transition_to(target).map_err(|_| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot change session from {} to {}", self.status, target),
            )
        })?;
        let previous = std::mem::replace(&mut self.status, next);
        self.updated_at = Timestamp::now();
        Ok(previous)
    }
}

fn validate_duration(minutes: u32) -> Result<(), DomainError> {
    if minutes == 0 || minutes > MAX_DURATION_MINUTES {
        return Err(DomainError::validation(
            "duration_minutes",
            format!(
                "Duration must be between 1 and {} minutes, got {}",
                MAX_DURATION_MINUTES, minutes
            ),
        ));
    }
    Ok(())
}
