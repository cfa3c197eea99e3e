//! Lesson session domain events.
//!
//! - `SessionScheduled` - New lesson put on the calendar
//! - `SessionRescheduled` - Lesson moved or resized
//! - `SessionCancelled` - Lesson called off
//! - `AttendanceMarked` - Attendance recorded or corrected

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    domain_event, EventId, Location, PackId, SessionId, SessionStatus, SessionType, StudentId,
    TeacherId, Timestamp,
};

// ════════════════════════════════════════════════════════════════════════════
// SessionScheduled
// ════════════════════════════════════════════════════════════════════════════

/// Published when a new lesson session is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionScheduled {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub teacher_id: TeacherId,
    pub student_ids: Vec<StudentId>,
    pub session_type: SessionType,
    pub location: Location,
    pub pack_id: Option<PackId>,

    /// Lesson start.
    pub date_time: Timestamp,
    pub duration_minutes: u32,

    /// When the booking was made.
    pub scheduled_at: Timestamp,
}

domain_event!(
    SessionScheduled,
    event_type = "lesson_session.scheduled.v1",
    aggregate_id = session_id,
    aggregate_type = "LessonSession",
    occurred_at = scheduled_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// SessionRescheduled
// ════════════════════════════════════════════════════════════════════════════

/// Published when a lesson moves to a new time or length.
///
/// Carries both slots for the audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRescheduled {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub teacher_id: TeacherId,
    pub old_date_time: Timestamp,
    pub old_duration_minutes: u32,
    pub new_date_time: Timestamp,
    pub new_duration_minutes: u32,
    pub rescheduled_at: Timestamp,
}

domain_event!(
    SessionRescheduled,
    event_type = "lesson_session.rescheduled.v1",
    aggregate_id = session_id,
    aggregate_type = "LessonSession",
    occurred_at = rescheduled_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// SessionCancelled
// ════════════════════════════════════════════════════════════════════════════

/// Published when a lesson is cancelled by the student, teacher or school.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCancelled {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub teacher_id: TeacherId,
    pub pack_id: Option<PackId>,
    pub previous_status: SessionStatus,
    pub status: SessionStatus,
    pub cancelled_at: Timestamp,
}

domain_event!(
    SessionCancelled,
    event_type = "lesson_session.cancelled.v1",
    aggregate_id = session_id,
    aggregate_type = "LessonSession",
    occurred_at = cancelled_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// AttendanceMarked
// ════════════════════════════════════════════════════════════════════════════

/// Published when attendance is recorded or corrected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceMarked {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub previous_status: SessionStatus,
    pub status: SessionStatus,
    pub marked_at: Timestamp,
}

domain_event!(
    AttendanceMarked,
    event_type = "lesson_session.attendance_marked.v1",
    aggregate_id = session_id,
    aggregate_type = "LessonSession",
    occurred_at = marked_at,
    event_id = event_id
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainEvent, SerializableDomainEvent};

    #[test]
    fn scheduled_event_routes_by_session() {
        let session_id = SessionId::new();
        let event = SessionScheduled {
            event_id: EventId::new(),
            session_id,
            teacher_id: TeacherId::new(),
            student_ids: vec![StudentId::new()],
            session_type: SessionType::Solo,
            location: Location::Online,
            pack_id: None,
            date_time: Timestamp::now(),
            duration_minutes: 60,
            scheduled_at: Timestamp::now(),
        };

        assert_eq!(event.event_type(), "lesson_session.scheduled.v1");
        assert_eq!(event.aggregate_id(), session_id.to_string());
        assert_eq!(event.aggregate_type(), "LessonSession");
    }

    #[test]
    fn cancelled_event_payload_uses_snake_case_status() {
        let event = SessionCancelled {
            event_id: EventId::new(),
            session_id: SessionId::new(),
            teacher_id: TeacherId::new(),
            pack_id: None,
            previous_status: SessionStatus::Scheduled,
            status: SessionStatus::CancelledByTeacher,
            cancelled_at: Timestamp::now(),
        };

        let envelope = event.to_envelope().unwrap();
        assert_eq!(envelope.payload["status"], "cancelled_by_teacher");
        assert_eq!(envelope.schema_version, 1);
    }
}
