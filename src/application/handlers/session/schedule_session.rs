//! ScheduleSessionHandler - Command handler for booking new lessons.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::foundation::{CommandMetadata, EventId, SerializableDomainEvent};
use crate::domain::pack::Pack;
use crate::domain::scheduling::{ConflictChecker, ConflictResult, ConflictScope, SessionCandidate};
use crate::domain::session::{Session, SessionDraft, SessionError, SessionScheduled};
use crate::ports::{EventPublisher, PackRepository, SessionRepository};

/// Command to schedule a new lesson.
#[derive(Debug, Clone)]
pub struct ScheduleSessionCommand {
    pub draft: SessionDraft,
}

/// Result of successful scheduling.
#[derive(Debug, Clone)]
pub struct ScheduleSessionResult {
    pub session: Session,
    pub event: SessionScheduled,
    /// Credits left on the pack, when the lesson was drawn from one.
    pub pack_sessions_remaining: Option<u32>,
}

/// Handler for scheduling sessions.
///
/// The conflict check and the write are separate steps. Two concurrent
/// requests can both pass the check and both be saved unless the backing
/// store enforces an overlap constraint of its own.
///
/// The pack credit is taken before the session is saved. If the save fails
/// the credit is handed back; if that also fails, the pack stays one credit
/// short and a warning is logged.
pub struct ScheduleSessionHandler {
    sessions: Arc<dyn SessionRepository>,
    packs: Arc<dyn PackRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ScheduleSessionHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        packs: Arc<dyn PackRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            sessions,
            packs,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: ScheduleSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<ScheduleSessionResult, SessionError> {
        // 1. Only admins and teachers book lessons
        metadata.ensure_can_schedule()?;

        // 2. Build the aggregate (roster and duration rules)
        let session = Session::schedule(cmd.draft)?;

        // 3. Check the pack, if the lesson draws on one
        let mut pack = match session.pack_id() {
            Some(pack_id) => {
                let pack = self
                    .packs
                    .find_by_id(pack_id)
                    .await?
                    .ok_or(SessionError::PackNotFound(*pack_id))?;
                pack.ensure_compatible(&session.to_draft())?;
                Some(pack)
            }
            None => None,
        };

        // 4. Conflict check against a fresh snapshot
        let snapshot = self.sessions.snapshot().await?;
        let candidate = SessionCandidate::from_session(&session);
        if let ConflictResult::Conflict(conflict) =
            ConflictChecker::check(&candidate, &snapshot, ConflictScope::All)
        {
            warn!(
                teacher_id = %session.teacher_id(),
                conflicting_session_id = %conflict.session.id(),
                dimension = %conflict.dimension,
                "Rejected lesson booking: schedule conflict"
            );
            return Err(SessionError::conflict(conflict));
        }

        // 5. Take the pack credit, then persist the session
        let pack_sessions_remaining = match pack.as_mut() {
            Some(pack) => {
                let remaining = pack.consume()?;
                self.packs.update(pack).await?;
                Some(remaining)
            }
            None => None,
        };

        if let Err(err) = self.sessions.save(&session).await {
            if let Some(pack) = pack.as_mut() {
                self.return_credit(pack).await;
            }
            return Err(err.into());
        }

        // 6. Create and publish event
        let event = SessionScheduled {
            event_id: EventId::new(),
            session_id: *session.id(),
            teacher_id: *session.teacher_id(),
            student_ids: session.student_ids().to_vec(),
            session_type: session.session_type(),
            location: session.location(),
            pack_id: session.pack_id().copied(),
            date_time: session.date_time(),
            duration_minutes: session.duration_minutes(),
            scheduled_at: *session.created_at(),
        };

        let envelope = event
            .to_envelope()?
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());

        self.event_publisher.publish(envelope).await?;

        info!(
            session_id = %session.id(),
            teacher_id = %session.teacher_id(),
            slot = %session.interval(),
            "Lesson scheduled"
        );

        Ok(ScheduleSessionResult {
            session,
            event,
            pack_sessions_remaining,
        })
    }

    async fn return_credit(&self, pack: &mut Pack) {
        let restored = match pack.release() {
            Ok(_) => self.packs.update(pack).await.map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        if let Err(error) = restored {
            warn!(
                pack_id = %pack.id(),
                error = %error,
                "Session save failed and the pack credit could not be returned"
            );
        }
    }
}
