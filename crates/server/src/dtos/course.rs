use database::entities::courses;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct PrerequisiteRequest {
    pub prerequisite_course_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PrerequisiteResponse {
    pub id: Uuid,
    pub course_id: Uuid,
    pub prerequisite_course_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseSummary {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub credits: i32,
}

impl From<courses::Model> for CourseSummary {
    fn from(course: courses::Model) -> Self {
        Self {
            id: course.id,
            code: course.code,
            name: course.name,
            credits: course.credits,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CoursePrerequisitesResponse {
    pub course_id: Uuid,
    pub code: String,
    pub name: String,
    pub prerequisites: Vec<CourseSummary>,
}
