//! Command infrastructure for application handlers.
//!
//! Every command handler takes a single `CommandMetadata` carrying who is
//! acting and how to correlate the events they cause.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AuthError, AuthenticatedUser, Role, UserId};

/// Metadata context for command handlers.
///
/// # Example
///
/// ```ignore
/// let metadata = CommandMetadata::from_user(&auth_state.require_user()?)
///     .with_correlation_id(request_id);
/// handler.handle(cmd, metadata).await?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The user executing this command.
    pub user_id: UserId,

    /// Role the user acts under.
    pub role: Role,

    /// Links related operations across a single user request.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
}

impl CommandMetadata {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self {
            user_id,
            role,
            correlation_id: None,
        }
    }

    /// Builds metadata for the signed-in user.
    pub fn from_user(user: &AuthenticatedUser) -> Self {
        Self::new(user.id.clone(), user.role)
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Fails unless the acting role may change the schedule.
    pub fn ensure_can_schedule(&self) -> Result<(), AuthError> {
        if self.role.can_schedule() {
            Ok(())
        } else {
            Err(AuthError::InsufficientPermissions(self.role))
        }
    }
}

#[cfg(test)]
impl CommandMetadata {
    /// Creates an admin fixture. Only available in test builds.
    pub fn test_fixture() -> Self {
        Self::new(UserId::new("test-admin").unwrap(), Role::Admin)
            .with_correlation_id("test-correlation-id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_with_user_and_role() {
        let user_id = UserId::new("user-123").unwrap();
        let metadata = CommandMetadata::new(user_id.clone(), Role::Teacher);

        assert_eq!(metadata.user_id, user_id);
        assert_eq!(metadata.role, Role::Teacher);
    }

    #[test]
    fn serializes_only_actor_and_correlation() {
        let metadata = CommandMetadata::test_fixture();
        let json = serde_json::to_value(&metadata).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["correlation_id", "role", "user_id"]);
    }

    #[test]
    fn correlation_id_generates_if_missing() {
        let metadata = CommandMetadata::new(UserId::new("user").unwrap(), Role::Admin);
        assert!(!metadata.correlation_id().is_empty());
    }

    #[test]
    fn correlation_id_is_stable_when_set() {
        let metadata = CommandMetadata::test_fixture();
        assert_eq!(metadata.correlation_id(), "test-correlation-id");
    }

    #[test]
    fn students_cannot_schedule() {
        let metadata = CommandMetadata::new(UserId::new("s").unwrap(), Role::Student);
        assert_eq!(
            metadata.ensure_can_schedule(),
            Err(AuthError::InsufficientPermissions(Role::Student))
        );
    }

    #[test]
    fn from_user_copies_role() {
        let user = AuthenticatedUser::new(
            UserId::new("t-1").unwrap(),
            "t@example.com",
            None,
            Role::Teacher,
        );
        let metadata = CommandMetadata::from_user(&user);
        assert!(metadata.ensure_can_schedule().is_ok());
    }
}
