//! In-memory persistence adapters.

mod pack_repository;
mod session_repository;

pub use pack_repository::InMemoryPackRepository;
pub use session_repository::InMemorySessionRepository;
