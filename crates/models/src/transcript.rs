use crate::{grade::Grade, level::AcademicLevel};
use serde::Serialize;

/// Credit-weighted GPA over graded enrollments, rounded to two decimals.
///
/// W and I grades carry no points and are skipped entirely, including
/// their credits. Returns 0.0 when nothing is graded.
pub fn gpa(graded: &[(Grade, i32)]) -> f64 {
    let mut total_points = 0.0;
    let mut total_credits = 0;

    for &(grade, credits) in graded {
        if let Some(points) = grade.grade_points() {
            total_points += points * f64::from(credits);
            total_credits += credits;
        }
    }

    if total_credits == 0 {
        0.0
    } else {
        round2(total_points / f64::from(total_credits))
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Credit totals derived from a student's enrollment history
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CreditSummary {
    /// Credits of completed enrollments
    pub completed: i32,
    /// Credits of currently enrolled sections
    pub enrolled: i32,
    /// Everything the student has signed up for, cancelled or not
    pub attempted: i32,
}

/// Outcome of a level-upgrade eligibility inquiry. Pure read, never fails.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradeReport {
    pub eligible: bool,
    /// `None` when the student is already doctoral
    pub next_level: Option<AcademicLevel>,
    pub required_credits: i32,
    pub required_gpa: f64,
    pub completed_credits: i32,
    pub gpa: f64,
}

/// Evaluates promotion eligibility for a student at `level`.
///
/// `completed_credits` counts all completed credits;
/// `completed_graduate_credits` counts only graduate-level ones, which is
/// the total that gates the graduate-to-doctoral step.
pub fn upgrade_report(
    level: AcademicLevel,
    completed_credits: i32,
    completed_graduate_credits: i32,
    gpa: f64,
) -> UpgradeReport {
    match level.upgrade_requirements() {
        Some(req) => {
            let counted_credits = match level {
                AcademicLevel::Graduate => completed_graduate_credits,
                _ => completed_credits,
            };

            UpgradeReport {
                eligible: counted_credits >= req.required_credits && gpa >= req.required_gpa,
                next_level: Some(req.next_level),
                required_credits: req.required_credits,
                required_gpa: req.required_gpa,
                completed_credits: counted_credits,
                gpa,
            }
        }
        None => UpgradeReport {
            eligible: false,
            next_level: None,
            required_credits: 0,
            required_gpa: 0.0,
            completed_credits,
            gpa,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpa_credit_weighting() {
        // (A, 3cr) and (B, 4cr): (4.0*3 + 3.0*4) / 7 = 3.43
        let graded = vec![(Grade::A, 3), (Grade::B, 4)];
        assert_eq!(gpa(&graded), 3.43);
    }

    #[test]
    fn test_gpa_empty_transcript() {
        assert_eq!(gpa(&[]), 0.0);
    }

    #[test]
    fn test_gpa_excludes_w_and_i() {
        let graded = vec![(Grade::A, 3), (Grade::W, 4), (Grade::I, 3)];
        assert_eq!(gpa(&graded), 4.0);

        // Only non-graded rows: still 0.0, no division by zero
        let ungraded = vec![(Grade::W, 3)];
        assert_eq!(gpa(&ungraded), 0.0);
    }

    #[test]
    fn test_gpa_includes_failing_grades() {
        let graded = vec![(Grade::A, 3), (Grade::F, 3)];
        assert_eq!(gpa(&graded), 2.0);
    }

    #[test]
    fn test_undergraduate_upgrade_boundaries() {
        let report = upgrade_report(AcademicLevel::Undergraduate, 120, 0, 3.0);
        assert!(report.eligible);
        assert_eq!(report.next_level, Some(AcademicLevel::Graduate));

        assert!(!upgrade_report(AcademicLevel::Undergraduate, 119, 0, 4.0).eligible);
        assert!(!upgrade_report(AcademicLevel::Undergraduate, 120, 0, 2.99).eligible);
    }

    #[test]
    fn test_graduate_upgrade_counts_graduate_credits_only() {
        // Plenty of total credits but too few graduate-level ones
        let report = upgrade_report(AcademicLevel::Graduate, 150, 29, 3.9);
        assert!(!report.eligible);
        assert_eq!(report.completed_credits, 29);

        let report = upgrade_report(AcademicLevel::Graduate, 150, 30, 3.5);
        assert!(report.eligible);
        assert_eq!(report.next_level, Some(AcademicLevel::Doctoral));
    }

    #[test]
    fn test_doctoral_has_no_next_level() {
        let report = upgrade_report(AcademicLevel::Doctoral, 200, 60, 4.0);
        assert!(!report.eligible);
        assert_eq!(report.next_level, None);
    }
}
