//! In-Memory Session Repository
//!
//! Keeps lesson sessions in a map. Useful for tests, demos and local use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, TeacherId};
use crate::domain::session::Session;
use crate::ports::SessionRepository;

/// In-memory storage for lesson sessions.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-loaded with `sessions`.
    pub fn with_sessions(sessions: impl IntoIterator<Item = Session>) -> Self {
        let map = sessions.into_iter().map(|s| (*s.id(), s)).collect();
        Self {
            sessions: Arc::new(RwLock::new(map)),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(session.id()) {
            return Err(DomainError::validation(
                "id",
                format!("Session {} already exists", session.id()),
            ));
        }
        sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn update(&self, session: &Session) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(session.id()) {
            Some(stored) => {
                *stored = session.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", session.id()),
            )),
        }
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn snapshot(&self) -> Result<Vec<Session>, DomainError> {
        let mut all: Vec<Session> = self.sessions.read().await.values().cloned().collect();
        all.sort_by_key(|s| (s.date_time(), *s.id()));
        Ok(all)
    }

    async fn find_by_teacher(&self, teacher_id: &TeacherId) -> Result<Vec<Session>, DomainError> {
        let mut taught: Vec<Session> = self
            .sessions
            .read()
            .await
            .values()
            .filter(|s| s.teacher_id() == teacher_id)
            .cloned()
            .collect();
        taught.sort_by_key(|s| (s.date_time(), *s.id()));
        Ok(taught)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Location, SessionType, StudentId, Timestamp};
    use crate::domain::session::SessionDraft;

    fn lesson(teacher: TeacherId, start: Timestamp) -> Session {
        Session::schedule(SessionDraft::standard(
            teacher,
            vec![StudentId::new()],
            SessionType::Focus,
            start,
            Location::Online,
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn save_then_find() {
        let repo = InMemorySessionRepository::new();
        let session = lesson(TeacherId::new(), Timestamp::now());

        repo.save(&session).await.unwrap();

        assert_eq!(repo.find_by_id(session.id()).await.unwrap(), Some(session));
    }

    #[tokio::test]
    async fn duplicate_save_is_rejected() {
        let repo = InMemorySessionRepository::new();
        let session = lesson(TeacherId::new(), Timestamp::now());
        repo.save(&session).await.unwrap();

        let err = repo.save(&session).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn update_missing_session_fails() {
        let repo = InMemorySessionRepository::new();
        let session = lesson(TeacherId::new(), Timestamp::now());

        let err = repo.update(&session).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionNotFound);
    }

    #[tokio::test]
    async fn find_by_teacher_filters_and_sorts() {
        let teacher = TeacherId::new();
        let now = Timestamp::now();
        let later = lesson(teacher, now.plus_minutes(120));
        let earlier = lesson(teacher, now);
        let repo = InMemorySessionRepository::with_sessions([
            later.clone(),
            lesson(TeacherId::new(), now),
            earlier.clone(),
        ]);

        let taught = repo.find_by_teacher(&teacher).await.unwrap();
        assert_eq!(taught, vec![earlier, later]);
        assert_eq!(repo.snapshot().await.unwrap().len(), 3);
    }
}
