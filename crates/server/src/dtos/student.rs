use chrono::NaiveDate;
use models::{grade::Grade, level::AcademicLevel, semester::Semester, status::EnrollmentStatus};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct AcademicHistoryResponse {
    pub student_id: Uuid,
    pub gpa: f64,
    pub completed_credits: i32,
    pub enrolled_credits: i32,
    pub attempted_credits: i32,
    pub enrollments: Vec<HistoryEntryResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HistoryEntryResponse {
    pub enrollment_id: Uuid,
    pub course_code: String,
    pub course_name: String,
    pub credits: i32,
    #[schema(value_type = String)]
    pub semester: Semester,
    pub academic_year: i16,
    pub enrollment_date: NaiveDate,
    #[schema(value_type = Option<String>)]
    pub grade: Option<Grade>,
    #[schema(value_type = String)]
    pub status: EnrollmentStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UpgradeReportResponse {
    pub eligible: bool,
    #[schema(value_type = Option<String>)]
    pub next_level: Option<AcademicLevel>,
    pub required_credits: i32,
    pub required_gpa: f64,
    pub completed_credits: i32,
    pub gpa: f64,
}
