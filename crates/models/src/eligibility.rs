use crate::{
    level::AcademicLevel,
    meeting::{MeetingSlot, has_conflict},
};
use serde::Serialize;
use std::{collections::HashSet, hash::Hash};

/// An expected, user-facing reason a registration is refused.
///
/// Every variant is a recoverable outcome the presentation layer renders as
/// a message; none of them indicates a fault.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
pub enum EligibilityError {
    #[error("{course} courses are not open to {student} students")]
    LevelNotEligible {
        student: AcademicLevel,
        course: AcademicLevel,
    },

    #[error("course already completed; retaking a completed course is not permitted")]
    AlreadyCompleted,

    #[error("missing prerequisites: {}", missing.join(", "))]
    PrerequisiteNotMet { missing: Vec<String> },

    #[error("registering would bring this semester to {} credits, over the {max}-credit limit", current + candidate)]
    CreditLimitExceeded {
        current: i32,
        candidate: i32,
        max: i32,
    },

    #[error("meeting times conflict with an already enrolled section")]
    ScheduleConflict,
}

/// A student may take courses at their own level and below
pub fn check_level_eligibility(
    student: AcademicLevel,
    course: AcademicLevel,
) -> Result<(), EligibilityError> {
    if student.allows(course) {
        Ok(())
    } else {
        Err(EligibilityError::LevelNotEligible { student, course })
    }
}

/// Rejects re-registration for a course the student has already completed
pub fn check_not_already_completed<Id: Eq + Hash>(
    completed_courses: &HashSet<Id>,
    course: &Id,
) -> Result<(), EligibilityError> {
    if completed_courses.contains(course) {
        Err(EligibilityError::AlreadyCompleted)
    } else {
        Ok(())
    }
}

/// Every direct prerequisite edge must be satisfied by a completed course.
///
/// All unmet prerequisites are reported, not just the first.
pub fn check_prerequisites<Id: Eq + Hash>(
    required: &[(Id, String)],
    completed_courses: &HashSet<Id>,
) -> Result<(), EligibilityError> {
    let missing: Vec<String> = required
        .iter()
        .filter(|(id, _)| !completed_courses.contains(id))
        .map(|(_, code)| code.clone())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(EligibilityError::PrerequisiteNotMet { missing })
    }
}

/// The candidate course's credits plus the student's current enrolled
/// credits for the term must stay within the level's ceiling
pub fn check_credit_limit(
    level: AcademicLevel,
    current_semester_credits: i32,
    candidate_credits: i32,
) -> Result<(), EligibilityError> {
    let max = level.semester_credit_limit();

    if current_semester_credits + candidate_credits > max {
        Err(EligibilityError::CreditLimitExceeded {
            current: current_semester_credits,
            candidate: candidate_credits,
            max,
        })
    } else {
        Ok(())
    }
}

/// The candidate section must not collide with any actively enrolled
/// section
pub fn check_schedule_conflict(
    candidate: &MeetingSlot,
    active: &[MeetingSlot],
) -> Result<(), EligibilityError> {
    if has_conflict(candidate, active) {
        Err(EligibilityError::ScheduleConflict)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::days::DaySet;
    use chrono::NaiveTime;
    use std::str::FromStr;

    #[test]
    fn test_level_eligibility() {
        assert!(
            check_level_eligibility(AcademicLevel::Graduate, AcademicLevel::Undergraduate).is_ok()
        );
        assert_eq!(
            check_level_eligibility(AcademicLevel::Undergraduate, AcademicLevel::Graduate),
            Err(EligibilityError::LevelNotEligible {
                student: AcademicLevel::Undergraduate,
                course: AcademicLevel::Graduate,
            })
        );
    }

    #[test]
    fn test_already_completed() {
        let completed: HashSet<u32> = [1, 2, 3].into_iter().collect();

        assert!(check_not_already_completed(&completed, &4).is_ok());
        assert_eq!(
            check_not_already_completed(&completed, &2),
            Err(EligibilityError::AlreadyCompleted)
        );
    }

    #[test]
    fn test_prerequisites_all_missing_reported() {
        let required = vec![
            (10, "CS101".to_string()),
            (11, "CS102".to_string()),
            (12, "MATH200".to_string()),
        ];
        let completed: HashSet<u32> = [11].into_iter().collect();

        let err = check_prerequisites(&required, &completed).unwrap_err();
        assert_eq!(
            err,
            EligibilityError::PrerequisiteNotMet {
                missing: vec!["CS101".to_string(), "MATH200".to_string()],
            }
        );
    }

    #[test]
    fn test_prerequisites_satisfied() {
        let required = vec![(10, "CS101".to_string())];
        let completed: HashSet<u32> = [10, 11].into_iter().collect();

        assert!(check_prerequisites(&required, &completed).is_ok());
        assert!(check_prerequisites::<u32>(&[], &HashSet::new()).is_ok());
    }

    #[test]
    fn test_credit_limit_boundary() {
        // 16 enrolled credits: a 2-credit course exactly reaches the
        // undergraduate ceiling, a 3-credit course crosses it
        assert!(check_credit_limit(AcademicLevel::Undergraduate, 16, 2).is_ok());
        assert_eq!(
            check_credit_limit(AcademicLevel::Undergraduate, 16, 3),
            Err(EligibilityError::CreditLimitExceeded {
                current: 16,
                candidate: 3,
                max: 18,
            })
        );
    }

    #[test]
    fn test_credit_limit_per_level() {
        assert!(check_credit_limit(AcademicLevel::Graduate, 9, 3).is_ok());
        assert!(check_credit_limit(AcademicLevel::Graduate, 10, 3).is_err());
        assert!(check_credit_limit(AcademicLevel::Doctoral, 6, 3).is_ok());
        assert!(check_credit_limit(AcademicLevel::Doctoral, 7, 3).is_err());
    }

    #[test]
    fn test_schedule_conflict_check() {
        let candidate = MeetingSlot::new(
            DaySet::from_str("MW").unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        )
        .unwrap();
        let clashing = MeetingSlot::new(
            DaySet::from_str("MW").unwrap(),
            NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            NaiveTime::from_hms_opt(11, 30, 0).unwrap(),
        )
        .unwrap();

        assert!(check_schedule_conflict(&candidate, &[]).is_ok());
        assert_eq!(
            check_schedule_conflict(&candidate, &[clashing]),
            Err(EligibilityError::ScheduleConflict)
        );
    }
}
