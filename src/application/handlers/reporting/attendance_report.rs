//! AttendanceReportHandler - Query handler for bucketed attendance summaries.

use chrono::FixedOffset;
use std::sync::Arc;
use tracing::debug;

use crate::domain::foundation::{AuthError, CommandMetadata, StudentId, TeacherId};
use crate::domain::reporting::{AttendanceReport, Bucket, DateRange};
use crate::domain::session::{Session, SessionError};
use crate::ports::SessionRepository;

/// Query for an attendance report, optionally narrowed to one teacher or student.
#[derive(Debug, Clone)]
pub struct AttendanceReportQuery {
    pub range: DateRange,
    pub bucket: Bucket,
    pub teacher_id: Option<TeacherId>,
    pub student_id: Option<StudentId>,
}

impl AttendanceReportQuery {
    fn matches(&self, session: &Session) -> bool {
        self.teacher_id.map_or(true, |t| *session.teacher_id() == t)
            && self.student_id.map_or(true, |s| session.has_student(&s))
    }
}

/// Handler for attendance reports. Local dates use the school's UTC offset.
pub struct AttendanceReportHandler {
    repository: Arc<dyn SessionRepository>,
    utc_offset: FixedOffset,
}

impl AttendanceReportHandler {
    pub fn new(repository: Arc<dyn SessionRepository>, utc_offset: FixedOffset) -> Self {
        Self {
            repository,
            utc_offset,
        }
    }

    pub async fn handle(
        &self,
        query: AttendanceReportQuery,
        metadata: CommandMetadata,
    ) -> Result<AttendanceReport, SessionError> {
        if !metadata.role.can_view_reports() {
            return Err(AuthError::InsufficientPermissions(metadata.role).into());
        }

        let sessions: Vec<Session> = self
            .repository
            .snapshot()
            .await?
            .into_iter()
            .filter(|s| query.matches(s))
            .collect();

        let report = AttendanceReport::build(&sessions, query.range, query.bucket, self.utc_offset);

        debug!(
            bucket = ?query.bucket,
            rows = report.rows.len(),
            sessions = sessions.len(),
            "Built attendance report"
        );

        Ok(report)
    }
}
