//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the lesson scheduling domain.

mod auth;
mod command;
mod errors;
mod events;
mod ids;
mod location;
mod session_status;
mod session_type;
mod state_machine;
mod timestamp;

pub use auth::{AuthChange, AuthError, AuthState, AuthenticatedUser, Role, SubscriptionId};
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{PackId, SessionId, StudentId, TeacherId, UserId};
pub use location::Location;
pub use session_status::SessionStatus;
pub use session_type::SessionType;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
