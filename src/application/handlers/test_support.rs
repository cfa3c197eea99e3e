//! Shared fixtures for handler tests.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::sync::Mutex;

use crate::domain::foundation::{
    DomainError, ErrorCode, EventEnvelope, Location, SessionId, SessionType, StudentId,
    TeacherId, Timestamp,
};
use crate::domain::session::{Session, SessionDraft};
use crate::ports::{EventPublisher, SessionRepository};

/// 2024-05-06 (a Monday) at `hour:minute` UTC.
pub(crate) fn at(hour: u32, minute: u32) -> Timestamp {
    Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 5, 6, hour, minute, 0).unwrap())
}

pub(crate) fn solo_draft(teacher: TeacherId, student: StudentId, start: Timestamp) -> SessionDraft {
    SessionDraft::standard(
        teacher,
        vec![student],
        SessionType::Solo,
        start,
        Location::Offline,
    )
}

pub(crate) fn solo(teacher: TeacherId, student: StudentId, start: Timestamp) -> Session {
    Session::schedule(solo_draft(teacher, student, start)).unwrap()
}

pub(crate) struct MockEventPublisher {
    published_events: Mutex<Vec<EventEnvelope>>,
    fail_publish: bool,
}

impl MockEventPublisher {
    pub(crate) fn new() -> Self {
        Self {
            published_events: Mutex::new(Vec::new()),
            fail_publish: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            published_events: Mutex::new(Vec::new()),
            fail_publish: true,
        }
    }

    pub(crate) fn published_events(&self) -> Vec<EventEnvelope> {
        self.published_events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        if self.fail_publish {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                "Simulated publish failure",
            ));
        }
        self.published_events.lock().unwrap().push(event);
        Ok(())
    }
}

/// Repository whose every call fails, for error-path tests.
pub(crate) struct FailingSessionRepository;

impl FailingSessionRepository {
    fn error() -> DomainError {
        DomainError::new(ErrorCode::DatabaseError, "Simulated database failure")
    }
}

#[async_trait]
impl SessionRepository for FailingSessionRepository {
    async fn save(&self, _session: &Session) -> Result<(), DomainError> {
        Err(Self::error())
    }

    async fn update(&self, _session: &Session) -> Result<(), DomainError> {
        Err(Self::error())
    }

    async fn find_by_id(&self, _id: &SessionId) -> Result<Option<Session>, DomainError> {
        Err(Self::error())
    }

    async fn snapshot(&self) -> Result<Vec<Session>, DomainError> {
        Err(Self::error())
    }

    async fn find_by_teacher(&self, _teacher_id: &TeacherId) -> Result<Vec<Session>, DomainError> {
        Err(Self::error())
    }
}
