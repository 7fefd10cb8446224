use chrono::NaiveDate;
use database::entities::enrollments;
use models::{grade::Grade, status::EnrollmentStatus};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub schedule_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollmentResponse {
    pub id: Uuid,
    pub student_id: Uuid,
    pub schedule_id: Uuid,
    pub enrollment_date: NaiveDate,
    #[schema(value_type = Option<String>)]
    pub grade: Option<Grade>,
    #[schema(value_type = String)]
    pub status: EnrollmentStatus,
}

impl From<enrollments::Model> for EnrollmentResponse {
    fn from(enrollment: enrollments::Model) -> Self {
        Self {
            id: enrollment.id,
            student_id: enrollment.student_id,
            schedule_id: enrollment.schedule_id,
            enrollment_date: enrollment.enrollment_date,
            grade: enrollment.grade,
            status: enrollment.status,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GradeRequest {
    /// Letter grade, e.g. "A-" or "W"
    pub grade: String,
}
