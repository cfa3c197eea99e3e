//! Conflict Checker - overlap detection between a candidate lesson and the calendar.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{SessionId, StudentId, TeacherId, Timestamp, ValidationError};
use crate::domain::session::{Session, SessionDraft};

use super::TimeInterval;

/// Which shared resource a check cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictScope {
    Teacher,
    Student,
    /// Accepted for completeness. Sessions carry no room identifier, so this
    /// dimension never reports a conflict.
    Room,
    #[default]
    All,
}

impl ConflictScope {
    fn includes(&self, dimension: ConflictDimension) -> bool {
        match self {
            ConflictScope::All => true,
            ConflictScope::Teacher => dimension == ConflictDimension::Teacher,
            ConflictScope::Student => dimension == ConflictDimension::Student,
            ConflictScope::Room => dimension == ConflictDimension::Room,
        }
    }
}

impl FromStr for ConflictScope {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "teacher" => Ok(ConflictScope::Teacher),
            "student" => Ok(ConflictScope::Student),
            "room" => Ok(ConflictScope::Room),
            "all" => Ok(ConflictScope::All),
            _ => Err(ValidationError::invalid_enum_value("scope", s)),
        }
    }
}

/// The resource two overlapping sessions both need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictDimension {
    Teacher,
    Student,
    Room,
}

impl fmt::Display for ConflictDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConflictDimension::Teacher => "teacher",
            ConflictDimension::Student => "student",
            ConflictDimension::Room => "room",
        };
        write!(f, "{}", s)
    }
}

/// A session being created or edited, possibly still incomplete.
///
/// Forms fill this in field by field; the checker only decides once both the
/// start and the duration are known.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCandidate {
    /// Set when editing an existing session so it is not compared with itself.
    pub id: Option<SessionId>,
    pub teacher_id: Option<TeacherId>,
    pub student_ids: Vec<StudentId>,
    pub date_time: Option<Timestamp>,
    pub duration_minutes: Option<u32>,
}

impl SessionCandidate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Candidate for a session that does not exist yet.
    pub fn from_draft(draft: &SessionDraft) -> Self {
        Self {
            id: None,
            teacher_id: Some(draft.teacher_id),
            student_ids: draft.student_ids.clone(),
            date_time: Some(draft.date_time),
            duration_minutes: Some(draft.duration_minutes),
        }
    }

    /// Candidate for an existing session, carrying its id for self-exclusion.
    pub fn from_session(session: &Session) -> Self {
        Self {
            id: Some(*session.id()),
            teacher_id: Some(*session.teacher_id()),
            student_ids: session.student_ids().to_vec(),
            date_time: Some(session.date_time()),
            duration_minutes: Some(session.duration_minutes()),
        }
    }

    pub fn with_id(mut self, id: SessionId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_teacher(mut self, teacher_id: TeacherId) -> Self {
        self.teacher_id = Some(teacher_id);
        self
    }

    pub fn with_students(mut self, student_ids: Vec<StudentId>) -> Self {
        self.student_ids = student_ids;
        self
    }

    pub fn at(mut self, date_time: Timestamp, duration_minutes: u32) -> Self {
        self.date_time = Some(date_time);
        self.duration_minutes = Some(duration_minutes);
        self
    }

    /// The candidate's slot, or `None` while start or duration is missing.
    ///
    /// A zero duration also yields `None`.
    pub fn interval(&self) -> Option<TimeInterval> {
        match (self.date_time, self.duration_minutes) {
            (Some(start), Some(minutes)) if minutes > 0 => {
                Some(TimeInterval::starting_at(start, minutes))
            }
            _ => None,
        }
    }
}

/// An active session that clashes with the candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub session: Session,
    pub dimension: ConflictDimension,
    pub reason: String,
}

/// Outcome of a conflict check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictResult {
    NoConflict,
    Conflict(Conflict),
}

impl ConflictResult {
    pub fn is_conflict(&self) -> bool {
        matches!(self, ConflictResult::Conflict(_))
    }

    pub fn conflict(&self) -> Option<&Conflict> {
        match self {
            ConflictResult::Conflict(c) => Some(c),
            ConflictResult::NoConflict => None,
        }
    }

    pub fn into_conflict(self) -> Option<Conflict> {
        match self {
            ConflictResult::Conflict(c) => Some(c),
            ConflictResult::NoConflict => None,
        }
    }
}

/// Overlap detection over a snapshot of sessions.
pub struct ConflictChecker;

impl ConflictChecker {
    /// Finds the first active session that overlaps the candidate and shares
    /// a resource within `scope`.
    ///
    /// # Algorithm
    /// 1. Candidate slot `[start, start + duration)`
    /// 2. Skip the session with the candidate's own id
    /// 3. Skip cancelled sessions
    /// 4. Keep sessions whose slot overlaps (half-open)
    /// 5. Test teacher, then shared students, then room
    /// 6. Stop at the first hit
    ///
    /// # Edge Cases
    /// - Missing start or duration: `NoConflict` (not decidable yet)
    /// - Overlaps only with cancelled sessions: `NoConflict`
    /// - `ConflictScope::Room`: always `NoConflict`
    pub fn check(
        candidate: &SessionCandidate,
        existing: &[Session],
        scope: ConflictScope,
    ) -> ConflictResult {
        Self::conflicts(candidate, existing, scope)
            .next()
            .map_or(ConflictResult::NoConflict, ConflictResult::Conflict)
    }

    /// Like [`check`](Self::check) but returns every conflicting session, in
    /// snapshot order.
    pub fn check_all(
        candidate: &SessionCandidate,
        existing: &[Session],
        scope: ConflictScope,
    ) -> Vec<Conflict> {
        Self::conflicts(candidate, existing, scope).collect()
    }

    fn conflicts<'a>(
        candidate: &'a SessionCandidate,
        existing: &'a [Session],
        scope: ConflictScope,
    ) -> impl Iterator<Item = Conflict> + 'a {
        candidate.interval().into_iter().flat_map(move |slot| {
            existing
                .iter()
                .filter(move |other| candidate.id.as_ref() != Some(other.id()))
                .filter(|other| !other.is_cancelled())
                .filter(move |other| slot.overlaps(&other.interval()))
                .filter_map(move |other| {
                    Self::shared_resource(candidate, other, scope).map(|dimension| Conflict {
                        reason: Self::describe(candidate, other, dimension),
                        session: other.clone(),
                        dimension,
                    })
                })
        })
    }

    fn shared_resource(
        candidate: &SessionCandidate,
        other: &Session,
        scope: ConflictScope,
    ) -> Option<ConflictDimension> {
        if scope.includes(ConflictDimension::Teacher)
            && candidate.teacher_id.as_ref() == Some(other.teacher_id())
        {
            return Some(ConflictDimension::Teacher);
        }
        if scope.includes(ConflictDimension::Student)
            && other.shares_student_with(&candidate.student_ids)
        {
            return Some(ConflictDimension::Student);
        }
        // Room: sessions carry no room identifier, nothing to compare.
        None
    }

    fn describe(
        candidate: &SessionCandidate,
        other: &Session,
        dimension: ConflictDimension,
    ) -> String {
        let slot = other.interval();
        match dimension {
            ConflictDimension::Teacher => format!(
                "Teacher {} is already teaching session {} during {}",
                other.teacher_id(),
                other.id(),
                slot
            ),
            ConflictDimension::Student => {
                let shared = candidate
                    .student_ids
                    .iter()
                    .find(|s| other.has_student(s))
                    .map(|s| s.to_string())
                    .unwrap_or_default();
                format!(
                    "Student {} is already booked into session {} during {}",
                    shared,
                    other.id(),
                    slot
                )
            }
            ConflictDimension::Room => {
                format!("Room is already in use by session {} during {}", other.id(), slot)
            }
        }
    }
}
