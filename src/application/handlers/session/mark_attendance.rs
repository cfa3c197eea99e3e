//! MarkAttendanceHandler - Command handler for recording lesson attendance.

use std::sync::Arc;
use tracing::info;

use crate::domain::foundation::{CommandMetadata, EventId, SerializableDomainEvent, SessionId};
use crate::domain::session::{AttendanceMarked, AttendanceOutcome, Session, SessionError};
use crate::ports::{EventPublisher, SessionRepository};

/// Command to record (or correct) attendance.
#[derive(Debug, Clone)]
pub struct MarkAttendanceCommand {
    pub session_id: SessionId,
    pub outcome: AttendanceOutcome,
}

#[derive(Debug, Clone)]
pub struct MarkAttendanceResult {
    pub session: Session,
    pub event: AttendanceMarked,
}

/// Handler for marking attendance.
pub struct MarkAttendanceHandler {
    repository: Arc<dyn SessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl MarkAttendanceHandler {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: MarkAttendanceCommand,
        metadata: CommandMetadata,
    ) -> Result<MarkAttendanceResult, SessionError> {
        metadata.ensure_can_schedule()?;

        let mut session = self
            .repository
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(SessionError::NotFound(cmd.session_id))?;

        let previous_status = session.mark_attendance(cmd.outcome)?;
        self.repository.update(&session).await?;

        let event = AttendanceMarked {
            event_id: EventId::new(),
            session_id: *session.id(),
            previous_status,
            status: session.status(),
            marked_at: *session.updated_at(),
        };

        let envelope = event
            .to_envelope()?
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());

        self.event_publisher.publish(envelope).await?;

        info!(
            session_id = %session.id(),
            previous = %previous_status,
            status = %session.status(),
            "Attendance marked"
        );

        Ok(MarkAttendanceResult { session, event })
    }
}
