use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::error::RegistrationError;
use log::error;
use serde::Serialize;
use utoipa::ToSchema;

/// JSON body returned for every failed operation
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Stable machine-readable failure kind, e.g. "section_full"
    pub kind: String,
    pub message: String,
}

/// Route-level error wrapper mapping core failures onto HTTP statuses
#[derive(Debug)]
pub enum ApiError {
    Registration(RegistrationError),
    InvalidGrade(String),
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        Self::Registration(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::InvalidGrade(grade) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    kind: "invalid_grade".to_string(),
                    message: format!("'{grade}' is not a recognized letter grade"),
                },
            ),
            Self::Registration(RegistrationError::Database(err)) => {
                // Unexpected store failure: log it, surface nothing specific
                error!("database failure: {err}");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        kind: "persistence_failure".to_string(),
                        message: "internal error".to_string(),
                    },
                )
            }
            Self::Registration(err) => {
                let status = match &err {
                    RegistrationError::StudentNotFound
                    | RegistrationError::SectionNotFound
                    | RegistrationError::CourseNotFound
                    | RegistrationError::EnrollmentNotFound => StatusCode::NOT_FOUND,
                    RegistrationError::NotActive
                    | RegistrationError::AlreadyEnrolled
                    | RegistrationError::SectionFull
                    | RegistrationError::InvalidStateTransition
                    | RegistrationError::SelfPrerequisite
                    | RegistrationError::DuplicatePrerequisite => StatusCode::CONFLICT,
                    RegistrationError::Eligibility(_) => StatusCode::UNPROCESSABLE_ENTITY,
                    RegistrationError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };

                (
                    status,
                    ErrorBody {
                        kind: err.kind().to_string(),
                        message: err.to_string(),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
