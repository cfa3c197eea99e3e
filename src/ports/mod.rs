//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `SessionRepository` - Lesson sessions, including snapshot reads
//! - `PackRepository` - Prepaid lesson packs
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Port for publishing domain events

mod event_publisher;
mod pack_repository;
mod session_repository;

pub use event_publisher::EventPublisher;
pub use pack_repository::PackRepository;
pub use session_repository::SessionRepository;
