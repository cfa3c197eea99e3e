//! Authentication state for the console.
//!
//! The signed-in user is held by an [`AuthState`] value that callers create
//! and pass to whatever needs it. Components that react to sign-in or
//! sign-out register a listener with [`AuthState::subscribe`] and drop it
//! with [`AuthState::unsubscribe`].
//!
//! These types have no provider dependencies. The hosted auth provider's
//! client populates them after it validates a login.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use thiserror::Error;

use super::{UserId, ValidationError};

/// Dashboard role of a console user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    /// Admins and teachers may create or move sessions.
    pub fn can_schedule(&self) -> bool {
        matches!(self, Role::Admin | Role::Teacher)
    }

    /// Only admins see school-wide reports.
    pub fn can_view_reports(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            _ => Err(ValidationError::invalid_enum_value("role", s)),
        }
    }
}

/// Signed-in console user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the auth provider.
    pub id: UserId,

    /// User's email address.
    pub email: String,

    /// Display name if the profile has one.
    pub display_name: Option<String>,

    /// Role the dashboards are gated on.
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        display_name: Option<String>,
        role: Role,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            display_name,
            role,
        }
    }

    /// Returns the user's display name, or email as fallback.
    pub fn display_name_or_email(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }

    pub fn can_schedule(&self) -> bool {
        self.role.can_schedule()
    }
}

/// Authorization failures raised by handlers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("No user is signed in")]
    NotSignedIn,

    #[error("Role '{0}' is not permitted to perform this action")]
    InsufficientPermissions(Role),
}

/// Transition delivered to auth listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthChange {
    SignedIn(AuthenticatedUser),
    SignedOut,
}

/// Handle returned by [`AuthState::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&AuthChange) + Send + Sync>;

/// Holder of the current signed-in user plus its change listeners.
#[derive(Default)]
pub struct AuthState {
    current: RwLock<Option<AuthenticatedUser>>,
    listeners: Mutex<BTreeMap<SubscriptionId, Listener>>,
    next_id: AtomicU64,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the signed-in user, if any.
    pub fn current(&self) -> Option<AuthenticatedUser> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the signed-in user or `NotSignedIn`.
    pub fn require_user(&self) -> Result<AuthenticatedUser, AuthError> {
        self.current().ok_or(AuthError::NotSignedIn)
    }

    /// Replaces the signed-in user and notifies listeners.
    pub fn sign_in(&self, user: AuthenticatedUser) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(user.clone());
        self.notify(&AuthChange::SignedIn(user));
    }

    /// Clears the signed-in user. Listeners are only notified if someone was signed in.
    pub fn sign_out(&self) {
        let previous = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if previous.is_some() {
            self.notify(&AuthChange::SignedOut);
        }
    }

    /// Registers a listener for sign-in and sign-out transitions.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&AuthChange) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(listener));
        id
    }

    /// Removes a listener. Returns false if the id was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn notify(&self, change: &AuthChange) {
        // Snapshot first so a listener may unsubscribe itself without deadlocking.
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        for listener in listeners {
            listener(change);
        }
    }
}

impl fmt::Debug for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthState")
            .field("current", &self.current())
            .field("listeners", &self.listener_count())
            .finish()
    }
}
