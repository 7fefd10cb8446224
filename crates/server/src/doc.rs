use crate::routes::{course, health, registration, section, student};
use utoipa::OpenApi;

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        registration::register,
        registration::withdraw,
        student::available_sections,
        student::academic_history,
        student::level_upgrade,
        section::available_filters,
        section::roster,
        section::record_grade,
        course::add_prerequisite,
        course::get_prerequisites
    ),
    tags(
        (name = "Registration", description = "Section registration and withdrawal"),
        (name = "Students", description = "Student records and eligibility reports"),
        (name = "Sections", description = "Rosters and grade recording"),
        (name = "Courses", description = "Catalog prerequisite management"),
        (name = "Health", description = "Service health"),
    ),
    info(
        title = "Registrar API",
        version = "1.0.0",
        description = "University course registration API",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
