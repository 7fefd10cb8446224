use crate::{
    dtos::course::{CoursePrerequisitesResponse, PrerequisiteRequest, PrerequisiteResponse},
    error::{ApiError, ErrorBody},
};
use axum::{Extension, Json, extract::Path, http::StatusCode};
use database::services::catalog::CatalogService;
use log::info;
use sea_orm::{DatabaseConnection, prelude::Uuid};

/// Add a prerequisite edge to a course
#[utoipa::path(
    post,
    path = "/courses/{course_id}/prerequisites",
    params(
        ("course_id" = Uuid, Path, description = "Course ID")
    ),
    request_body = PrerequisiteRequest,
    responses(
        (status = 201, description = "Prerequisite added", body = PrerequisiteResponse),
        (status = 404, description = "Course not found", body = ErrorBody),
        (status = 409, description = "Self-prerequisite or duplicate edge", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Courses"
)]
pub async fn add_prerequisite(
    Extension(db): Extension<DatabaseConnection>,
    Path(course_id): Path<Uuid>,
    Json(request): Json<PrerequisiteRequest>,
) -> Result<(StatusCode, Json<PrerequisiteResponse>), ApiError> {
    let edge =
        CatalogService::add_prerequisite(&db, course_id, request.prerequisite_course_id).await?;

    info!(
        "course {course_id} now requires {}",
        request.prerequisite_course_id
    );

    Ok((
        StatusCode::CREATED,
        Json(PrerequisiteResponse {
            id: edge.id,
            course_id: edge.course_id,
            prerequisite_course_id: edge.prerequisite_course_id,
        }),
    ))
}

/// The courses a course requires
#[utoipa::path(
    get,
    path = "/courses/{course_id}/prerequisites",
    params(
        ("course_id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Prerequisite courses", body = CoursePrerequisitesResponse),
        (status = 404, description = "Course not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Courses"
)]
pub async fn get_prerequisites(
    Extension(db): Extension<DatabaseConnection>,
    Path(course_id): Path<Uuid>,
) -> Result<Json<CoursePrerequisitesResponse>, ApiError> {
    let (course, required) = CatalogService::course_with_prerequisites(&db, course_id).await?;

    Ok(Json(CoursePrerequisitesResponse {
        course_id: course.id,
        code: course.code,
        name: course.name,
        prerequisites: required.into_iter().map(Into::into).collect(),
    }))
}
