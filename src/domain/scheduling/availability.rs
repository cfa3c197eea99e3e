//! Availability Finder - open windows in a teacher's day.

use chrono::{Duration, NaiveDate};

use crate::domain::foundation::{TeacherId, Timestamp};
use crate::domain::session::Session;

use super::{OutOfHoursPolicy, SchedulingPolicy, TimeInterval};

/// Computes the free windows in a teacher's business day.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvailabilityFinder {
    policy: SchedulingPolicy,
}

impl AvailabilityFinder {
    pub fn new(policy: SchedulingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &SchedulingPolicy {
        &self.policy
    }

    /// Returns the open windows for `teacher_id` on local calendar `day`.
    ///
    /// # Algorithm
    /// 1. Keep the teacher's non-cancelled sessions starting that day
    /// 2. Sort by start
    /// 3. Walk a cursor from opening time, emitting each gap before a session
    ///    that is at least `slot_minutes` long
    /// 4. Emit the trailing gap up to closing time under the same rule
    ///
    /// Each window is a whole gap, not chopped into slot-sized pieces.
    ///
    /// # Edge Cases
    /// - No sessions: one window covering the business day
    /// - Fully booked: empty Vec
    /// - Sessions outside business hours: see [`OutOfHoursPolicy`]
    pub fn find_available_slots(
        &self,
        teacher_id: &TeacherId,
        day: NaiveDate,
        existing: &[Session],
    ) -> Vec<TimeInterval> {
        let hours = &self.policy.business_hours;
        let window = hours.window(day);
        let min_gap = Duration::minutes(i64::from(self.policy.slot_minutes));

        let mut booked = Self::busy_intervals(teacher_id, hours.day_bounds(day), existing);
        booked.sort_by_key(TimeInterval::start);

        let mut slots = Vec::new();
        let mut cursor = window.start();

        for busy in booked {
            match self.policy.out_of_hours {
                OutOfHoursPolicy::Clamp => {
                    let Some(busy) = busy.clamp_to(&window) else {
                        continue;
                    };
                    Self::push_gap(&mut slots, cursor, busy.start(), min_gap);
                    cursor = cursor.max(busy.end());
                }
                OutOfHoursPolicy::AsRecorded => {
                    Self::push_gap(&mut slots, cursor, busy.start(), min_gap);
                    cursor = busy.end();
                }
            }
        }
        Self::push_gap(&mut slots, cursor, window.end(), min_gap);

        slots
    }

    /// Start times, `step_minutes` apart, at which a lesson of `lesson_minutes`
    /// fits inside one of `slots`.
    pub fn lesson_starts(
        slots: &[TimeInterval],
        lesson_minutes: u32,
        step_minutes: u32,
    ) -> Vec<Timestamp> {
        if lesson_minutes == 0 || step_minutes == 0 {
            return Vec::new();
        }
        let mut starts = Vec::new();
        for slot in slots {
            let mut start = slot.start();
            while !start.plus_minutes(i64::from(lesson_minutes)).is_after(&slot.end()) {
                starts.push(start);
                start = start.plus_minutes(i64::from(step_minutes));
            }
        }
        starts
    }

    fn busy_intervals(
        teacher_id: &TeacherId,
        day: TimeInterval,
        existing: &[Session],
    ) -> Vec<TimeInterval> {
        existing
            .iter()
            .filter(|s| s.teacher_id() == teacher_id)
            .filter(|s| !s.is_cancelled())
            .filter(|s| day.contains(s.date_time()))
            .map(Session::interval)
            .collect()
    }

    fn push_gap(slots: &mut Vec<TimeInterval>, from: Timestamp, to: Timestamp, min: Duration) {
        if let Ok(gap) = TimeInterval::new(from, to) {
            if !gap.is_empty() && gap.duration() >= min {
                slots.push(gap);
            }
        }
    }
}
