//! CheckConflictsHandler - Query handler for live conflict feedback.
//!
//! Forms call this while a lesson is being filled in. An incomplete candidate
//! simply yields no conflicts.

use std::sync::Arc;
use tracing::debug;

use crate::domain::scheduling::{Conflict, ConflictChecker, ConflictScope, SessionCandidate};
use crate::domain::session::SessionError;
use crate::ports::SessionRepository;

#[derive(Debug, Clone, Default)]
pub struct CheckConflictsQuery {
    pub candidate: SessionCandidate,
    pub scope: ConflictScope,
}

pub struct CheckConflictsHandler {
    repository: Arc<dyn SessionRepository>,
}

impl CheckConflictsHandler {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// Every clashing session, in snapshot order.
    pub async fn handle(&self, query: CheckConflictsQuery) -> Result<Vec<Conflict>, SessionError> {
        if query.candidate.interval().is_none() {
            return Ok(Vec::new());
        }

        let snapshot = self.repository.snapshot().await?;
        let conflicts = ConflictChecker::check_all(&query.candidate, &snapshot, query.scope);

        debug!(
            scope = ?query.scope,
            conflict_count = conflicts.len(),
            "Checked candidate for conflicts"
        );

        Ok(conflicts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemorySessionRepository;
    use crate::application::handlers::test_support::{at, solo, FailingSessionRepository};
    use crate::domain::foundation::{StudentId, TeacherId};
    use crate::domain::scheduling::ConflictDimension;

    #[tokio::test]
    async fn lists_every_clash() {
        let teacher = TeacherId::new();
        let student = StudentId::new();
        let repo = Arc::new(InMemorySessionRepository::with_sessions([
            solo(teacher, StudentId::new(), at(10, 0)),
            solo(TeacherId::new(), student, at(10, 30)),
        ]));
        let handler = CheckConflictsHandler::new(repo);
        let candidate = SessionCandidate::new()
            .with_teacher(teacher)
            .with_students(vec![student])
            .at(at(10, 15), 60);

        let conflicts = handler
            .handle(CheckConflictsQuery {
                candidate,
                scope: ConflictScope::All,
            })
            .await
            .unwrap();

        let mut dimensions: Vec<_> = conflicts.iter().map(|c| c.dimension).collect();
        dimensions.sort_by_key(|d| d.to_string());
        assert_eq!(
            dimensions,
            vec![ConflictDimension::Student, ConflictDimension::Teacher]
        );
    }

    #[tokio::test]
    async fn incomplete_candidate_skips_the_lookup() {
        // The failing repository proves no snapshot is fetched.
        let handler = CheckConflictsHandler::new(Arc::new(FailingSessionRepository));
        let candidate = SessionCandidate::new().with_teacher(TeacherId::new());

        let conflicts = handler
            .handle(CheckConflictsQuery {
                candidate,
                scope: ConflictScope::Teacher,
            })
            .await
            .unwrap();

        assert!(conflicts.is_empty());
    }
}
