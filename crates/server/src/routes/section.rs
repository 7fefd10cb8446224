use crate::{
    dtos::{
        registration::{EnrollmentResponse, GradeRequest},
        section::RosterEntryResponse,
    },
    error::{ApiError, ErrorBody},
};
use axum::{Extension, Json, extract::Path};
use database::{
    entities::schedules,
    error::RegistrationError,
    services::{academic::AcademicRecordService, catalog::CatalogService},
};
use log::info;
use models::grade::Grade;
use sea_orm::{DatabaseConnection, EntityTrait, QuerySelect, prelude::Uuid};
use serde_json::json;
use std::collections::HashSet;

/// Actively enrolled students of a section
#[utoipa::path(
    get,
    path = "/sections/{schedule_id}/roster",
    params(
        ("schedule_id" = Uuid, Path, description = "Section ID")
    ),
    responses(
        (status = 200, description = "Section roster", body = Vec<RosterEntryResponse>),
        (status = 404, description = "Section not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Sections"
)]
pub async fn roster(
    Extension(db): Extension<DatabaseConnection>,
    Path(schedule_id): Path<Uuid>,
) -> Result<Json<Vec<RosterEntryResponse>>, ApiError> {
    let roster = CatalogService::section_roster(&db, schedule_id).await?;

    Ok(Json(roster.into_iter().map(Into::into).collect()))
}

/// Get the semesters and academic years sections are offered in, for
/// filtering
#[utoipa::path(
    get,
    path = "/sections/filters",
    responses(
        (status = 200, description = "Filter options retrieved successfully"),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Sections"
)]
pub async fn available_filters(
    Extension(db): Extension<DatabaseConnection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    // Get distinct terms with sections on the books
    let terms = schedules::Entity::find()
        .select_only()
        .column(schedules::Column::Semester)
        .column(schedules::Column::AcademicYear)
        .distinct()
        .into_tuple::<(String, i16)>()
        .all(&db)
        .await
        .map_err(RegistrationError::from)?;

    let mut semesters = HashSet::new();
    let mut years = HashSet::new();

    for (semester, year) in terms {
        semesters.insert(semester);
        years.insert(year);
    }

    let semesters_vec: Vec<_> = semesters.into_iter().collect();
    let mut years_vec: Vec<_> = years.into_iter().collect();

    years_vec.sort_by(|a, b| b.cmp(a)); // Sort years descending

    Ok(Json(json!({
        "semesters": semesters_vec,
        "years": years_vec,
    })))
}

/// Post a final grade on an active enrollment.
///
/// The enrollment completes with the grade; a W instead marks it
/// withdrawn. Either way the seat is freed.
#[utoipa::path(
    put,
    path = "/enrollments/{enrollment_id}/grade",
    params(
        ("enrollment_id" = Uuid, Path, description = "Enrollment ID")
    ),
    request_body = GradeRequest,
    responses(
        (status = 200, description = "Grade recorded", body = EnrollmentResponse),
        (status = 404, description = "Enrollment not found", body = ErrorBody),
        (status = 409, description = "Enrollment is not currently active", body = ErrorBody),
        (status = 422, description = "Unrecognized letter grade", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Sections"
)]
pub async fn record_grade(
    Extension(db): Extension<DatabaseConnection>,
    Path(enrollment_id): Path<Uuid>,
    Json(request): Json<GradeRequest>,
) -> Result<Json<EnrollmentResponse>, ApiError> {
    let grade: Grade = request
        .grade
        .parse()
        .map_err(|_| ApiError::InvalidGrade(request.grade.clone()))?;

    let enrollment = AcademicRecordService::record_grade(&db, enrollment_id, grade).await?;

    info!("grade {grade} recorded on enrollment {enrollment_id}");

    Ok(Json(enrollment.into()))
}
