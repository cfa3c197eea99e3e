//! End-to-end flows over the in-memory adapters.

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use lesson_scheduler::adapters::{InMemoryEventBus, InMemoryPackRepository, InMemorySessionRepository};
use lesson_scheduler::application::{
    AttendanceReportHandler, AttendanceReportQuery, CancelSessionCommand, CancelSessionHandler,
    FindAvailableSlotsHandler, FindAvailableSlotsQuery, MarkAttendanceCommand,
    MarkAttendanceHandler, RescheduleSessionCommand, RescheduleSessionHandler,
    ScheduleSessionCommand, ScheduleSessionHandler,
};
use lesson_scheduler::config::SchedulingConfig;
use lesson_scheduler::domain::foundation::{
    AuthState, AuthenticatedUser, CommandMetadata, ErrorCode, Location, PackId, Role,
    SessionType, StudentId, TeacherId, Timestamp, UserId,
};
use lesson_scheduler::domain::pack::Pack;
use lesson_scheduler::domain::reporting::{Bucket, DateRange};
use lesson_scheduler::domain::scheduling::{AvailabilityFinder, TimeInterval};
use lesson_scheduler::domain::session::{
    AttendanceOutcome, CancellationParty, SessionDraft, SessionError,
};
use lesson_scheduler::ports::PackRepository;

fn at(hour: u32, minute: u32) -> Timestamp {
    Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 5, 6, hour, minute, 0).unwrap())
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
}

struct Console {
    bus: Arc<InMemoryEventBus>,
    packs: Arc<InMemoryPackRepository>,
    schedule: ScheduleSessionHandler,
    reschedule: RescheduleSessionHandler,
    cancel: CancelSessionHandler,
    mark: MarkAttendanceHandler,
    slots: FindAvailableSlotsHandler,
    report: AttendanceReportHandler,
}

fn console() -> Console {
    let sessions = Arc::new(InMemorySessionRepository::new());
    let packs = Arc::new(InMemoryPackRepository::new());
    let bus = Arc::new(InMemoryEventBus::new());
    let policy = SchedulingConfig::default().to_policy().unwrap();

    Console {
        schedule: ScheduleSessionHandler::new(sessions.clone(), packs.clone(), bus.clone()),
        reschedule: RescheduleSessionHandler::new(sessions.clone(), packs.clone(), bus.clone()),
        cancel: CancelSessionHandler::new(sessions.clone(), packs.clone(), bus.clone()),
        mark: MarkAttendanceHandler::new(sessions.clone(), bus.clone()),
        slots: FindAvailableSlotsHandler::new(sessions.clone(), AvailabilityFinder::new(policy)),
        report: AttendanceReportHandler::new(sessions, policy.business_hours.utc_offset()),
        packs,
        bus,
    }
}

fn admin() -> CommandMetadata {
    let auth = AuthState::new();
    auth.sign_in(AuthenticatedUser::new(
        UserId::new("admin-1").unwrap(),
        "office@school.example",
        None,
        Role::Admin,
    ));
    CommandMetadata::from_user(&auth.require_user().unwrap())
}

#[tokio::test]
async fn booking_a_day_narrows_availability() {
    let console = console();
    let teacher = TeacherId::new();

    for hour in [10, 14] {
        let draft = SessionDraft::standard(
            teacher,
            vec![StudentId::new()],
            SessionType::Solo,
            at(hour, 0),
            Location::Offline,
        );
        console
            .schedule
            .handle(ScheduleSessionCommand { draft }, admin())
            .await
            .unwrap();
    }

    let slots = console
        .slots
        .handle(FindAvailableSlotsQuery {
            teacher_id: teacher,
            day: monday(),
        })
        .await
        .unwrap();

    assert_eq!(
        slots,
        vec![
            TimeInterval::new(at(9, 0), at(10, 0)).unwrap(),
            TimeInterval::new(at(11, 0), at(14, 0)).unwrap(),
            TimeInterval::new(at(15, 0), at(18, 0)).unwrap(),
        ]
    );
    assert_eq!(console.bus.events_of_type("lesson_session.scheduled.v1").len(), 2);
}

#[tokio::test]
async fn duo_student_cannot_be_double_booked() {
    let console = console();
    let shared = StudentId::new();
    let duo = SessionDraft::standard(
        TeacherId::new(),
        vec![StudentId::new(), shared],
        SessionType::Duo,
        at(16, 0),
        Location::Online,
    );
    console
        .schedule
        .handle(ScheduleSessionCommand { draft: duo }, admin())
        .await
        .unwrap();

    let focus = SessionDraft::standard(
        TeacherId::new(),
        vec![shared],
        SessionType::Focus,
        at(16, 30),
        Location::Online,
    );
    let err = console
        .schedule
        .handle(ScheduleSessionCommand { draft: focus }, admin())
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::ScheduleConflict);
    assert!(err.to_string().contains(&shared.to_string()));
}

#[tokio::test]
async fn pack_lifecycle_through_schedule_and_cancel() {
    let console = console();
    let student = StudentId::new();
    let pack = Pack::new(
        PackId::new(),
        student,
        "Piano",
        SessionType::Focus,
        Location::Offline,
        1,
        at(0, 0),
        None,
    )
    .unwrap();
    let pack_id = *pack.id();
    console.packs.save(&pack).await.unwrap();

    let draft = |hour| {
        SessionDraft::standard(
            TeacherId::new(),
            vec![student],
            SessionType::Focus,
            at(hour, 0),
            Location::Offline,
        )
        .with_pack(pack_id)
    };

    let first = console
        .schedule
        .handle(ScheduleSessionCommand { draft: draft(9) }, admin())
        .await
        .unwrap();
    assert_eq!(first.pack_sessions_remaining, Some(0));

    let exhausted = console
        .schedule
        .handle(ScheduleSessionCommand { draft: draft(12) }, admin())
        .await
        .unwrap_err();
    assert_eq!(exhausted.code(), ErrorCode::PackExhausted);

    console
        .cancel
        .handle(
            CancelSessionCommand {
                session_id: *first.session.id(),
                cancelled_by: CancellationParty::Student,
            },
            admin(),
        )
        .await
        .unwrap();

    let rebooked = console
        .schedule
        .handle(ScheduleSessionCommand { draft: draft(12) }, admin())
        .await
        .unwrap();
    assert_eq!(rebooked.pack_sessions_remaining, Some(0));
}

#[tokio::test]
async fn reschedule_then_attend_shows_in_report() {
    let console = console();
    let teacher = TeacherId::new();
    let draft = SessionDraft::standard(
        teacher,
        vec![StudentId::new()],
        SessionType::Solo,
        at(9, 0),
        Location::Online,
    );
    let booked = console
        .schedule
        .handle(ScheduleSessionCommand { draft }, admin())
        .await
        .unwrap();
    let session_id = *booked.session.id();

    console
        .reschedule
        .handle(
            RescheduleSessionCommand {
                session_id,
                new_start: at(9, 30),
                new_duration_minutes: Some(45),
            },
            admin(),
        )
        .await
        .unwrap();
    console
        .mark
        .handle(
            MarkAttendanceCommand {
                session_id,
                outcome: AttendanceOutcome::Present,
            },
            admin(),
        )
        .await
        .unwrap();

    let week = DateRange::new(monday(), monday() + chrono::Duration::days(6)).unwrap();
    let report = console
        .report
        .handle(
            AttendanceReportQuery {
                range: week,
                bucket: Bucket::Week,
                teacher_id: Some(teacher),
                student_id: None,
            },
            admin(),
        )
        .await
        .unwrap();

    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].present, 1);
    assert_eq!(report.rows[0].minutes_taught, 45);

    let types: Vec<_> = console
        .bus
        .events_for_aggregate(&session_id.to_string())
        .into_iter()
        .map(|e| e.event_type)
        .collect();
    assert_eq!(
        types,
        vec![
            "lesson_session.scheduled.v1",
            "lesson_session.rescheduled.v1",
            "lesson_session.attendance_marked.v1",
        ]
    );
}

#[tokio::test]
async fn signed_out_student_role_is_refused() {
    let console = console();
    let auth = AuthState::new();
    assert!(auth.require_user().is_err());

    auth.sign_in(AuthenticatedUser::new(
        UserId::new("student-7").unwrap(),
        "student@school.example",
        Some("Sam".to_string()),
        Role::Student,
    ));
    let metadata = CommandMetadata::from_user(&auth.require_user().unwrap());
    let draft = SessionDraft::standard(
        TeacherId::new(),
        vec![StudentId::new()],
        SessionType::Solo,
        at(9, 0),
        Location::Online,
    );

    let err = console
        .schedule
        .handle(ScheduleSessionCommand { draft }, metadata)
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Forbidden(_)));
}
