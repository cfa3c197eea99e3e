//! CancelSessionHandler - Command handler for calling off a lesson.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::foundation::{CommandMetadata, EventId, SerializableDomainEvent, SessionId};
use crate::domain::session::{CancellationParty, Session, SessionCancelled, SessionError};
use crate::ports::{EventPublisher, PackRepository, SessionRepository};

/// Command to cancel a lesson.
#[derive(Debug, Clone)]
pub struct CancelSessionCommand {
    pub session_id: SessionId,
    pub cancelled_by: CancellationParty,
}

/// Result of a successful cancellation.
#[derive(Debug, Clone)]
pub struct CancelSessionResult {
    pub session: Session,
    pub event: SessionCancelled,
    /// Credits left on the pack after the lesson's credit was returned.
    pub pack_sessions_remaining: Option<u32>,
}

/// Handler for cancelling sessions.
///
/// A lesson drawn from a pack gives its credit back. If the pack has since
/// been removed the cancellation still goes through and a warning is logged.
pub struct CancelSessionHandler {
    sessions: Arc<dyn SessionRepository>,
    packs: Arc<dyn PackRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CancelSessionHandler {
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
        cmd: CancelSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<CancelSessionResult, SessionError> {
        metadata.ensure_can_schedule()?;

        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(SessionError::NotFound(cmd.session_id))?;

        let previous_status = session.cancel(cmd.cancelled_by)?;
        self.sessions.update(&session).await?;

        let pack_sessions_remaining = match session.pack_id() {
            Some(pack_id) => match self.packs.find_by_id(pack_id).await? {
                Some(mut pack) => {
                    let remaining = pack.release()?;
                    self.packs.update(&pack).await?;
                    Some(remaining)
                }
                None => {
                    warn!(
                        session_id = %session.id(),
                        pack_id = %pack_id,
                        "Cancelled lesson references a missing pack; no credit returned"
                    );
                    None
                }
            },
            None => None,
        };

        let event = SessionCancelled {
            event_id: EventId::new(),
            session_id: *session.id(),
            teacher_id: *session.teacher_id(),
            pack_id: session.pack_id().copied(),
            previous_status,
            status: session.status(),
            cancelled_at: *session.updated_at(),
        };

        let envelope = event
            .to_envelope()?
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());

        self.event_publisher.publish(envelope).await?;

        info!(
            session_id = %session.id(),
            status = %session.status(),
            "Lesson cancelled"
        );

        Ok(CancelSessionResult {
            session,
            event,
            pack_sessions_remaining,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryPackRepository, InMemorySessionRepository};
    use crate::application::handlers::test_support::{at, solo, solo_draft, MockEventPublisher};
    use crate::domain::foundation::{
        ErrorCode, Location, PackId, SessionStatus, SessionType, StudentId, TeacherId,
    };
    use crate::domain::pack::Pack;

    fn handler(
        sessions: Vec<Session>,
        packs: Vec<Pack>,
    ) -> (
        CancelSessionHandler,
        Arc<InMemorySessionRepository>,
        Arc<InMemoryPackRepository>,
        Arc<MockEventPublisher>,
    ) {
        let session_repo = Arc::new(InMemorySessionRepository::with_sessions(sessions));
        let pack_repo = Arc::new(InMemoryPackRepository::with_packs(packs));
        let publisher = Arc::new(MockEventPublisher::new());
        (
            CancelSessionHandler::new(session_repo.clone(), pack_repo.clone(), publisher.clone()),
            session_repo,
            pack_repo,
            publisher,
        )
    }

    fn cancel(session: &Session, by: CancellationParty) -> CancelSessionCommand {
        CancelSessionCommand {
            session_id: *session.id(),
            cancelled_by: by,
        }
    }

    #[tokio::test]
    async fn cancels_and_publishes() {
        let lesson = solo(TeacherId::new(), StudentId::new(), at(10, 0));
        let (handler, repo, _, publisher) = handler(vec![lesson.clone()], vec![]);

        let result = handler
            .handle(
                cancel(&lesson, CancellationParty::School),
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        assert_eq!(result.session.status(), SessionStatus::CancelledBySchool);
        assert_eq!(result.event.previous_status, SessionStatus::Scheduled);
        let stored = repo.find_by_id(lesson.id()).await.unwrap().unwrap();
        assert!(stored.is_cancelled());
        let events = publisher.published_events();
        assert_eq!(events[0].event_type, "lesson_session.cancelled.v1");
        assert_eq!(events[0].payload["status"], "cancelled_by_school");
    }

    #[tokio::test]
    async fn returns_pack_credit() {
        let student = StudentId::new();
        let mut pack = Pack::new(
            PackId::new(),
            student,
            "Drums",
            SessionType::Solo,
            Location::Offline,
            4,
            at(0, 0).add_days(-7),
            None,
        )
        .unwrap();
        pack.consume().unwrap();
        let pack_id = *pack.id();
        let lesson =
            Session::schedule(solo_draft(TeacherId::new(), student, at(10, 0)).with_pack(pack_id))
                .unwrap();
        let (handler, _, packs, _) = handler(vec![lesson.clone()], vec![pack]);

        let result = handler
            .handle(
                cancel(&lesson, CancellationParty::Student),
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        assert_eq!(result.pack_sessions_remaining, Some(4));
        let stored = packs.find_by_id(&pack_id).await.unwrap().unwrap();
        assert_eq!(stored.sessions_used(), 0);
    }

    #[tokio::test]
    async fn missing_pack_does_not_block_cancellation() {
        let lesson = Session::schedule(
            solo_draft(TeacherId::new(), StudentId::new(), at(10, 0)).with_pack(PackId::new()),
        )
        .unwrap();
        let (handler, _, _, _) = handler(vec![lesson.clone()], vec![]);

        let result = handler
            .handle(
                cancel(&lesson, CancellationParty::Teacher),
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        assert_eq!(result.pack_sessions_remaining, None);
    }

    #[tokio::test]
    async fn second_cancellation_is_rejected() {
        let mut lesson = solo(TeacherId::new(), StudentId::new(), at(10, 0));
        lesson.cancel(CancellationParty::Teacher).unwrap();
        let (handler, _, _, publisher) = handler(vec![lesson.clone()], vec![]);

        let err = handler
            .handle(
                cancel(&lesson, CancellationParty::Student),
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
        assert!(publisher.published_events().is_empty());
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let (handler, _, _, _) = handler(vec![], vec![]);
        let cmd = CancelSessionCommand {
            session_id: SessionId::new(),
            cancelled_by: CancellationParty::School,
        };

        let err = handler
            .handle(cmd, CommandMetadata::test_fixture())
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::NotFound(_)));
    }
}
