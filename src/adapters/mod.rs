//! Adapters - Implementations of port interfaces.
//!
//! - `events` - Event bus implementations
//! - `memory` - In-memory repositories for tests and local runs

pub mod events;
pub mod memory;

pub use events::InMemoryEventBus;
pub use memory::{InMemoryPackRepository, InMemorySessionRepository};
