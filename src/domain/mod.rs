//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors, auth)
//! - `session` - Lesson session lifecycle and events
//! - `scheduling` - Conflict detection and availability over session snapshots
//! - `pack` - Prepaid lesson packs and fee plans
//! - `reporting` - Attendance summaries by calendar bucket

pub mod foundation;
pub mod pack;
pub mod reporting;
pub mod scheduling;
pub mod session;
