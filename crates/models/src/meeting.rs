use crate::days::DaySet;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// When a section meets: which weekdays, and the daily time interval.
///
/// The interval is half-open; a slot ending at 11:00 does not collide with
/// one starting at 11:00.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeetingSlot {
    pub days: DaySet,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Error returned for a slot whose end does not come after its start
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("meeting start time {start} is not before end time {end}")]
pub struct InvalidMeetingTime {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl MeetingSlot {
    pub fn new(days: DaySet, start: NaiveTime, end: NaiveTime) -> Result<Self, InvalidMeetingTime> {
        if start < end {
            Ok(Self { days, start, end })
        } else {
            Err(InvalidMeetingTime { start, end })
        }
    }

    /// Two slots conflict when they share a meeting day and their time
    /// intervals overlap
    pub fn conflicts_with(&self, other: &MeetingSlot) -> bool {
        self.days.intersects(other.days) && self.start < other.end && other.start < self.end
    }
}

/// Whether a candidate slot collides with any of a student's active
/// sections
pub fn has_conflict(candidate: &MeetingSlot, active: &[MeetingSlot]) -> bool {
    active.iter().any(|slot| candidate.conflicts_with(slot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn slot(days: &str, start: (u32, u32), end: (u32, u32)) -> MeetingSlot {
        MeetingSlot::new(
            DaySet::from_str(days).unwrap(),
            NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_overlapping_times_on_shared_day_conflict() {
        let a = slot("MW", (10, 0), (11, 0));
        let b = slot("MW", (10, 30), (11, 30));

        assert!(a.conflicts_with(&b));
        assert!(b.conflicts_with(&a));
    }

    #[test]
    fn test_same_times_on_different_days_do_not_conflict() {
        let a = slot("M", (10, 0), (11, 0));
        let b = slot("T", (10, 0), (11, 0));

        assert!(!a.conflicts_with(&b));
    }

    #[test]
    fn test_back_to_back_slots_do_not_conflict() {
        let a = slot("MWF", (10, 0), (11, 0));
        let b = slot("MWF", (11, 0), (12, 0));

        assert!(!a.conflicts_with(&b));
        assert!(!b.conflicts_with(&a));
    }

    #[test]
    fn test_containment_conflicts() {
        let outer = slot("TR", (9, 0), (12, 0));
        let inner = slot("R", (10, 0), (10, 30));

        assert!(outer.conflicts_with(&inner));
    }

    #[test]
    fn test_has_conflict_over_active_sections() {
        let candidate = slot("MW", (10, 0), (11, 0));
        let active = vec![slot("TR", (10, 0), (11, 0)), slot("F", (9, 0), (17, 0))];

        assert!(!has_conflict(&candidate, &active));

        let active = vec![slot("TR", (10, 0), (11, 0)), slot("W", (10, 45), (12, 0))];
        assert!(has_conflict(&candidate, &active));

        assert!(!has_conflict(&candidate, &[]));
    }

    #[test]
    fn test_invalid_time_interval_rejected() {
        let start = NaiveTime::from_hms_opt(11, 0, 0).unwrap();
        let end = NaiveTime::from_hms_opt(10, 0, 0).unwrap();

        assert!(MeetingSlot::new(DaySet::MONDAY, start, end).is_err());
        assert!(MeetingSlot::new(DaySet::MONDAY, start, start).is_err());
    }
}
