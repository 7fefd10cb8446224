use chrono::{NaiveDate, NaiveTime};
use database::entities::{courses, enrollments, schedules, students};
use models::{days::DaySet, level::AcademicLevel, semester::Semester};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct SectionResponse {
    pub id: Uuid,
    pub course_id: Uuid,
    pub course_code: String,
    pub course_name: String,
    pub credits: i32,
    #[schema(value_type = String)]
    pub level: AcademicLevel,
    #[schema(value_type = String)]
    pub semester: Semester,
    pub academic_year: i16,
    #[schema(value_type = String, example = "MWF")]
    pub meeting_days: DaySet,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub room: String,
    pub current_enrollment: i32,
    pub max_capacity: i32,
}

impl From<(schedules::Model, courses::Model)> for SectionResponse {
    fn from((schedule, course): (schedules::Model, courses::Model)) -> Self {
        Self {
            id: schedule.id,
            course_id: course.id,
            course_code: course.code,
            course_name: course.name,
            credits: course.credits,
            level: course.level,
            semester: schedule.semester,
            academic_year: schedule.academic_year,
            meeting_days: schedule.meeting_days,
            start_time: schedule.start_time,
            end_time: schedule.end_time,
            room: schedule.room,
            current_enrollment: schedule.current_enrollment,
            max_capacity: course.max_capacity,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SectionQueryParams {
    #[param(value_type = Option<String>)]
    pub semester: Option<Semester>,
    pub academic_year: Option<i16>,
    pub department: Option<String>,
    /// Matches course code or name
    pub search: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RosterEntryResponse {
    pub enrollment_id: Uuid,
    pub student_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub enrollment_date: NaiveDate,
}

impl From<(enrollments::Model, students::Model)> for RosterEntryResponse {
    fn from((enrollment, student): (enrollments::Model, students::Model)) -> Self {
        Self {
            enrollment_id: enrollment.id,
            student_id: student.id,
            first_name: student.first_name,
            last_name: student.last_name,
            email: student.email,
            enrollment_date: enrollment.enrollment_date,
        }
    }
}
