//! Lesson Scheduler - scheduling core for a music-lesson business console
//!
//! This crate holds the lesson calendar's domain model and the decisions the
//! admin, teacher and student dashboards make before writing to the backend:
//! conflict detection, availability search, pack compatibility, fee-plan
//! reconciliation and attendance reporting.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
