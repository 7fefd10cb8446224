use sea_orm::{DeriveActiveEnum, EnumIter, sea_query::StringLen};
use serde::{Deserialize, Serialize};

/// Administrative standing of a student record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum StudentStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
    #[sea_orm(string_value = "graduated")]
    Graduated,
    #[sea_orm(string_value = "suspended")]
    Suspended,
    #[sea_orm(string_value = "on_leave")]
    OnLeave,
}

impl StudentStatus {
    /// Only active students may register or withdraw
    pub fn may_register(self) -> bool {
        self == Self::Active
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum ProfessorStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
    #[sea_orm(string_value = "retired")]
    Retired,
}

/// Lifecycle state of a single (student, section) enrollment.
///
/// Rows are created as `Enrolled`, cancelled to `Dropped`, and finished as
/// `Completed` with a grade. `Withdrawn` marks a W grade posted at
/// grade-recording time. Rows are never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    #[sea_orm(string_value = "enrolled")]
    Enrolled,
    #[sea_orm(string_value = "dropped")]
    Dropped,
    #[sea_orm(string_value = "withdrawn")]
    Withdrawn,
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl EnrollmentStatus {
    /// True while the enrollment occupies a seat in its section
    pub fn occupies_seat(self) -> bool {
        self == Self::Enrolled
    }

    /// True when the enrollment's credits count toward the student's
    /// total_credits cache
    pub fn counts_toward_credits(self) -> bool {
        matches!(self, Self::Enrolled | Self::Completed)
    }

    /// A cancelled row may be reactivated by a later registration
    pub fn is_reusable(self) -> bool {
        matches!(self, Self::Dropped | Self::Withdrawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_registration_gate() {
        assert!(StudentStatus::Active.may_register());
        assert!(!StudentStatus::Inactive.may_register());
        assert!(!StudentStatus::Graduated.may_register());
        assert!(!StudentStatus::Suspended.may_register());
        assert!(!StudentStatus::OnLeave.may_register());
    }

    #[test]
    fn test_enrollment_seat_occupancy() {
        assert!(EnrollmentStatus::Enrolled.occupies_seat());
        assert!(!EnrollmentStatus::Dropped.occupies_seat());
        assert!(!EnrollmentStatus::Withdrawn.occupies_seat());
        assert!(!EnrollmentStatus::Completed.occupies_seat());
    }

    #[test]
    fn test_credit_counting_statuses() {
        assert!(EnrollmentStatus::Enrolled.counts_toward_credits());
        assert!(EnrollmentStatus::Completed.counts_toward_credits());
        assert!(!EnrollmentStatus::Dropped.counts_toward_credits());
        assert!(!EnrollmentStatus::Withdrawn.counts_toward_credits());
    }

    #[test]
    fn test_reusable_statuses() {
        assert!(EnrollmentStatus::Dropped.is_reusable());
        assert!(EnrollmentStatus::Withdrawn.is_reusable());
        assert!(!EnrollmentStatus::Enrolled.is_reusable());
        assert!(!EnrollmentStatus::Completed.is_reusable());
    }
}
