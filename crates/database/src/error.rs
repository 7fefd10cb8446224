use models::eligibility::EligibilityError;
use sea_orm::DbErr;

/// Everything that can go wrong while mutating or reading enrollment state.
///
/// All variants except `Database` are expected, user-facing outcomes; the
/// transaction is rolled back either way.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("student not found")]
    StudentNotFound,

    #[error("student record does not permit registration")]
    NotActive,

    #[error("section not found")]
    SectionNotFound,

    #[error("course not found")]
    CourseNotFound,

    #[error("enrollment not found")]
    EnrollmentNotFound,

    #[error("already enrolled in this section")]
    AlreadyEnrolled,

    #[error("section is full")]
    SectionFull,

    #[error("enrollment state does not allow this transition")]
    InvalidStateTransition,

    #[error("a course cannot be its own prerequisite")]
    SelfPrerequisite,

    #[error("prerequisite edge already exists")]
    DuplicatePrerequisite,

    #[error(transparent)]
    Eligibility(#[from] EligibilityError),

    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl RegistrationError {
    /// Stable machine-readable discriminator for API error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StudentNotFound => "student_not_found",
            Self::NotActive => "not_active",
            Self::SectionNotFound => "section_not_found",
            Self::CourseNotFound => "course_not_found",
            Self::EnrollmentNotFound => "enrollment_not_found",
            Self::AlreadyEnrolled => "already_enrolled",
            Self::SectionFull => "section_full",
            Self::InvalidStateTransition => "invalid_state_transition",
            Self::SelfPrerequisite => "self_prerequisite",
            Self::DuplicatePrerequisite => "duplicate_prerequisite",
            Self::Eligibility(EligibilityError::LevelNotEligible { .. }) => "level_not_eligible",
            Self::Eligibility(EligibilityError::AlreadyCompleted) => "already_completed",
            Self::Eligibility(EligibilityError::PrerequisiteNotMet { .. }) => {
                "prerequisite_not_met"
            }
            Self::Eligibility(EligibilityError::CreditLimitExceeded { .. }) => {
                "credit_limit_exceeded"
            }
            Self::Eligibility(EligibilityError::ScheduleConflict) => "schedule_conflict",
            Self::Database(_) => "persistence_failure",
        }
    }
}
