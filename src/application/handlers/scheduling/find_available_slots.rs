//! FindAvailableSlotsHandler - Query handler for a teacher's open windows.

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::debug;

use crate::domain::foundation::TeacherId;
use crate::domain::scheduling::{AvailabilityFinder, TimeInterval};
use crate::domain::session::SessionError;
use crate::ports::SessionRepository;

/// Query for one teacher's free windows on a local calendar day.
#[derive(Debug, Clone)]
pub struct FindAvailableSlotsQuery {
    pub teacher_id: TeacherId,
    pub day: NaiveDate,
}

/// Handler for availability lookups.
pub struct FindAvailableSlotsHandler {
    repository: Arc<dyn SessionRepository>,
    finder: AvailabilityFinder,
}

impl FindAvailableSlotsHandler {
    pub fn new(repository: Arc<dyn SessionRepository>, finder: AvailabilityFinder) -> Self {
        Self { repository, finder }
    }

    pub async fn handle(
        &self,
        query: FindAvailableSlotsQuery,
    ) -> Result<Vec<TimeInterval>, SessionError> {
        let taught = self.repository.find_by_teacher(&query.teacher_id).await?;
        let slots = self
            .finder
            .find_available_slots(&query.teacher_id, query.day, &taught);

        debug!(
            teacher_id = %query.teacher_id,
            day = %query.day,
            slot_count = slots.len(),
            "Computed available slots"
        );

        Ok(slots)
    }
}
