use crate::{
    dtos::registration::{EnrollmentResponse, RegisterRequest},
    error::{ApiError, ErrorBody},
};
use axum::{Extension, Json, extract::Path, http::StatusCode};
use database::services::registration::RegistrationService;
use log::info;
use sea_orm::{DatabaseConnection, prelude::Uuid};

/// Register a student into a section
#[utoipa::path(
    post,
    path = "/students/{student_id}/registrations",
    params(
        ("student_id" = Uuid, Path, description = "Student ID")
    ),
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Enrollment created", body = EnrollmentResponse),
        (status = 404, description = "Student or section not found", body = ErrorBody),
        (status = 409, description = "Already enrolled, section full, or student not active", body = ErrorBody),
        (status = 422, description = "Eligibility check failed", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Registration"
)]
pub async fn register(
    Extension(db): Extension<DatabaseConnection>,
    Path(student_id): Path<Uuid>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<EnrollmentResponse>), ApiError> {
    let enrollment = RegistrationService::register(&db, student_id, request.schedule_id).await?;

    info!(
        "student {student_id} registered for section {}",
        request.schedule_id
    );

    Ok((StatusCode::CREATED, Json(enrollment.into())))
}

/// Withdraw a student from a section they are enrolled in
#[utoipa::path(
    delete,
    path = "/students/{student_id}/registrations/{enrollment_id}",
    params(
        ("student_id" = Uuid, Path, description = "Student ID"),
        ("enrollment_id" = Uuid, Path, description = "Enrollment ID")
    ),
    responses(
        (status = 204, description = "Enrollment cancelled"),
        (status = 404, description = "Enrollment not found for this student", body = ErrorBody),
        (status = 409, description = "Enrollment is not currently active", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Registration"
)]
pub async fn withdraw(
    Extension(db): Extension<DatabaseConnection>,
    Path((student_id, enrollment_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    RegistrationService::withdraw(&db, student_id, enrollment_id).await?;

    info!("student {student_id} withdrew enrollment {enrollment_id}");

    Ok(StatusCode::NO_CONTENT)
}
