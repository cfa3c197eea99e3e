//! RescheduleSessionHandler - Command handler for moving a lesson.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::foundation::{
    CommandMetadata, EventId, SerializableDomainEvent, SessionId, Timestamp,
};
use crate::domain::scheduling::{ConflictChecker, ConflictResult, ConflictScope, SessionCandidate};
use crate::domain::session::{Session, SessionError, SessionRescheduled};
use crate::ports::{EventPublisher, PackRepository, SessionRepository};

/// Command to move a lesson to a new start, optionally with a new length.
#[derive(Debug, Clone)]
pub struct RescheduleSessionCommand {
    pub session_id: SessionId,
    pub new_start: Timestamp,
    pub new_duration_minutes: Option<u32>,
}

/// Result of a successful reschedule.
#[derive(Debug, Clone)]
pub struct RescheduleSessionResult {
    pub session: Session,
    pub event: SessionRescheduled,
}

/// Handler for rescheduling sessions.
///
/// The session is compared against the calendar without itself, so moving a
/// lesson within its own slot is never a conflict. A lesson drawn from a pack
/// must still start before the pack expires; its credit is already held, so
/// the remaining count is not checked again. Same check-then-write caveat as
/// [`ScheduleSessionHandler`](super::ScheduleSessionHandler).
pub struct RescheduleSessionHandler {
    repository: Arc<dyn SessionRepository>,
    packs: Arc<dyn PackRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl RescheduleSessionHandler {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        packs: Arc<dyn PackRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            packs,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: RescheduleSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<RescheduleSessionResult, SessionError> {
        metadata.ensure_can_schedule()?;

        let mut session = self
            .repository
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(SessionError::NotFound(cmd.session_id))?;

        let previous = session.reschedule(cmd.new_start, cmd.new_duration_minutes)?;

        if let Some(pack_id) = session.pack_id() {
            let pack = self
                .packs
                .find_by_id(pack_id)
                .await?
                .ok_or(SessionError::PackNotFound(*pack_id))?;
            if let Err(err) = pack.ensure_still_covers(&session.to_draft()) {
                warn!(
                    session_id = %session.id(),
                    pack_id = %pack_id,
                    error = %err,
                    "Rejected reschedule: pack no longer covers the lesson"
                );
                return Err(err.into());
            }
        }

        let snapshot = self.repository.snapshot().await?;
        let candidate = SessionCandidate::from_session(&session);
        if let ConflictResult::Conflict(conflict) =
            ConflictChecker::check(&candidate, &snapshot, ConflictScope::All)
        {
            warn!(
                session_id = %session.id(),
                conflicting_session_id = %conflict.session.id(),
                dimension = %conflict.dimension,
                "Rejected reschedule: schedule conflict"
            );
            return Err(SessionError::conflict(conflict));
        }

        self.repository.update(&session).await?;

        let event = SessionRescheduled {
            event_id: EventId::new(),
            session_id: *session.id(),
            teacher_id: *session.teacher_id(),
            old_date_time: previous.start(),
            old_duration_minutes: previous.duration().num_minutes() as u32,
            new_date_time: session.date_time(),
            new_duration_minutes: session.duration_minutes(),
            rescheduled_at: *session.updated_at(),
        };

        let envelope = event
            .to_envelope()?
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());

        self.event_publisher.publish(envelope).await?;

        info!(
            session_id = %session.id(),
            from = %previous,
            to = %session.interval(),
            "Lesson rescheduled"
        );

        Ok(RescheduleSessionResult { session, event })
    }
}
