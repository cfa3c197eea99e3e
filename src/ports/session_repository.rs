//! Session repository port.
//!
//! Defines the contract for persisting and retrieving Session aggregates.
//!
//! # Design
//!
//! - **Snapshot reads**: Conflict and availability checks run over a
//!   point-in-time copy of the calendar
//! - **No overlap guarantee**: `save` and `update` do not re-check
//!   conflicts. A store that needs race-free booking must enforce an overlap
//!   constraint itself.

use crate::domain::foundation::{DomainError, SessionId, TeacherId};
use crate::domain::session::Session;
use async_trait::async_trait;

/// Repository port for Session aggregate persistence.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Save a new session.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if a session with the same id exists
    /// - `DatabaseError` on persistence failure
    async fn save(&self, session: &Session) -> Result<(), DomainError>;

    /// Update an existing session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, session: &Session) -> Result<(), DomainError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError>;

    /// Every stored session, cancelled ones included.
    async fn snapshot(&self) -> Result<Vec<Session>, DomainError>;

    /// Sessions taught by one teacher, ordered by start time.
    async fn find_by_teacher(&self, teacher_id: &TeacherId) -> Result<Vec<Session>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn session_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn SessionRepository) {}
    }
}
