use crate::{
    dtos::{
        section::{SectionQueryParams, SectionResponse},
        student::{AcademicHistoryResponse, HistoryEntryResponse, UpgradeReportResponse},
    },
    error::{ApiError, ErrorBody},
};
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use database::services::{
    academic::{AcademicHistory, AcademicRecordService},
    catalog::{CatalogService, SectionFilters},
};
use sea_orm::{DatabaseConnection, prelude::Uuid};

/// Sections the student can still register for, honoring level and open
/// seats
#[utoipa::path(
    get,
    path = "/students/{student_id}/available-sections",
    params(
        ("student_id" = Uuid, Path, description = "Student ID"),
        SectionQueryParams
    ),
    responses(
        (status = 200, description = "Available sections", body = Vec<SectionResponse>),
        (status = 404, description = "Student not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Students"
)]
pub async fn available_sections(
    Extension(db): Extension<DatabaseConnection>,
    Path(student_id): Path<Uuid>,
    Query(params): Query<SectionQueryParams>,
) -> Result<Json<Vec<SectionResponse>>, ApiError> {
    let filters = SectionFilters {
        semester: params.semester,
        academic_year: params.academic_year,
        department: params.department,
        search: params.search,
    };

    let sections = CatalogService::list_available_sections(&db, student_id, &filters).await?;

    Ok(Json(sections.into_iter().map(Into::into).collect()))
}

/// Full academic history with GPA and credit totals
#[utoipa::path(
    get,
    path = "/students/{student_id}/academic-history",
    params(
        ("student_id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Academic history", body = AcademicHistoryResponse),
        (status = 404, description = "Student not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Students"
)]
pub async fn academic_history(
    Extension(db): Extension<DatabaseConnection>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<AcademicHistoryResponse>, ApiError> {
    let history = AcademicRecordService::academic_history(&db, student_id).await?;

    Ok(Json(convert_to_history_response(history)))
}

/// Whether the student qualifies for promotion to the next academic level
#[utoipa::path(
    get,
    path = "/students/{student_id}/level-upgrade",
    params(
        ("student_id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Upgrade eligibility report", body = UpgradeReportResponse),
        (status = 404, description = "Student not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Students"
)]
pub async fn level_upgrade(
    Extension(db): Extension<DatabaseConnection>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<UpgradeReportResponse>, ApiError> {
    let report = AcademicRecordService::check_level_upgrade(&db, student_id).await?;

    Ok(Json(UpgradeReportResponse {
        eligible: report.eligible,
        next_level: report.next_level,
        required_credits: report.required_credits,
        required_gpa: report.required_gpa,
        completed_credits: report.completed_credits,
        gpa: report.gpa,
    }))
}

/// Helper function to convert the service-level history into the API
/// response
fn convert_to_history_response(history: AcademicHistory) -> AcademicHistoryResponse {
    let enrollments = history
        .records
        .into_iter()
        .map(|row| HistoryEntryResponse {
            enrollment_id: row.enrollment.id,
            course_code: row.course.code,
            course_name: row.course.name,
            credits: row.course.credits,
            semester: row.schedule.semester,
            academic_year: row.schedule.academic_year,
            enrollment_date: row.enrollment.enrollment_date,
            grade: row.enrollment.grade,
            status: row.enrollment.status,
        })
        .collect();

    AcademicHistoryResponse {
        student_id: history.student.id,
        gpa: history.gpa,
        completed_credits: history.credits.completed,
        enrolled_credits: history.credits.enrolled,
        attempted_credits: history.credits.attempted,
        enrollments,
    }
}
