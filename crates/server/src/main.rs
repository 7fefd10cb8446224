use axum::{
    Extension, Router,
    routing::{delete, get, post, put},
};
use database::db::create_connection;
use doc::ApiDoc;
use log::info;
use routes::{course, health, registration, section, student};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod doc;
mod dtos;
mod error;
mod routes;
mod utils;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let db = create_connection()
        .await
        .expect("Failed to connect to database");

    let app = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health::health))
        .route(
            "/students/{student_id}/registrations",
            post(registration::register),
        )
        .route(
            "/students/{student_id}/registrations/{enrollment_id}",
            delete(registration::withdraw),
        )
        .route(
            "/students/{student_id}/available-sections",
            get(student::available_sections),
        )
        .route(
            "/students/{student_id}/academic-history",
            get(student::academic_history),
        )
        .route(
            "/students/{student_id}/level-upgrade",
            get(student::level_upgrade),
        )
        .route("/sections/filters", get(section::available_filters))
        .route("/sections/{schedule_id}/roster", get(section::roster))
        .route("/enrollments/{enrollment_id}/grade", put(section::record_grade))
        .route(
            "/courses/{course_id}/prerequisites",
            post(course::add_prerequisite).get(course::get_prerequisites),
        )
        .layer(
            ServiceBuilder::new()
                .layer(CompressionLayer::new())
                .layer(Extension(db)),
        );

    let addr = dotenvy::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    info!("Running axum on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(utils::shutdown::shutdown_signal())
        .await
        .unwrap();
}
