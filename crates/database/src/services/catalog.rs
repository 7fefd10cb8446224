use crate::{
    entities::{courses, enrollments, prerequisites, schedules, students},
    error::RegistrationError,
};
use chrono::Utc;
use models::{level::AcademicLevel, semester::Semester, status::EnrollmentStatus};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
    prelude::Expr,
    sea_query::ExprTrait,
};
use serde::Deserialize;
use uuid::Uuid;

/// Optional narrowing of the available-sections listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SectionFilters {
    pub semester: Option<Semester>,
    pub academic_year: Option<i16>,
    pub department: Option<String>,
    pub search: Option<String>,
}

pub struct CatalogService;

impl CatalogService {
    /// Sections the student could plausibly register for: open seats,
    /// course level within reach, and not a section they already actively
    /// hold. The full admission checks still run at registration time.
    pub async fn list_available_sections<C: ConnectionTrait>(
        conn: &C,
        student_id: Uuid,
        filters: &SectionFilters,
    ) -> Result<Vec<(schedules::Model, courses::Model)>, RegistrationError> {
        let student = students::Entity::find_by_id(student_id)
            .one(conn)
            .await?
            .ok_or(RegistrationError::StudentNotFound)?;

        let active_schedule_ids: Vec<Uuid> = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student_id))
            .filter(enrollments::Column::Status.eq(EnrollmentStatus::Enrolled))
            .all(conn)
            .await?
            .iter()
            .map(|enrollment| enrollment.schedule_id)
            .collect();

        let allowed_levels: Vec<AcademicLevel> = [
            AcademicLevel::Undergraduate,
            AcademicLevel::Graduate,
            AcademicLevel::Doctoral,
        ]
        .into_iter()
        .filter(|&level| student.level.allows(level))
        .collect();

        let mut condition = Condition::all().add(courses::Column::Level.is_in(allowed_levels));

        if let Some(semester) = filters.semester {
            condition = condition.add(schedules::Column::Semester.eq(semester));
        }

        if let Some(year) = filters.academic_year {
            condition = condition.add(schedules::Column::AcademicYear.eq(year));
        }

        if let Some(department) = &filters.department
            && !department.is_empty()
        {
            condition = condition.add(courses::Column::Department.eq(department.clone()));
        }

        if let Some(search) = &filters.search
            && !search.is_empty()
        {
            condition = condition.add(
                Condition::any()
                    .add(courses::Column::Code.contains(search.as_str()))
                    .add(courses::Column::Name.contains(search.as_str())),
            );
        }

        if !active_schedule_ids.is_empty() {
            condition = condition.add(schedules::Column::Id.is_not_in(active_schedule_ids));
        }

        let rows = schedules::Entity::find()
            .find_also_related(courses::Entity)
            .filter(condition)
            .filter(
                // Full sections are not offered
                Expr::col((schedules::Entity, schedules::Column::CurrentEnrollment))
                    .lt(Expr::col((courses::Entity, courses::Column::MaxCapacity))),
            )
            .order_by_asc(courses::Column::Code)
            .all(conn)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(schedule, course)| course.map(|course| (schedule, course)))
            .collect())
    }

    /// Adds a prerequisite edge. A course can never require itself, and a
    /// pair is recorded at most once; both are checked before insert.
    pub async fn add_prerequisite(
        db: &DatabaseConnection,
        course_id: Uuid,
        prerequisite_course_id: Uuid,
    ) -> Result<prerequisites::Model, RegistrationError> {
        if course_id == prerequisite_course_id {
            return Err(RegistrationError::SelfPrerequisite);
        }

        let txn = db.begin().await?;

        match Self::insert_edge(&txn, course_id, prerequisite_course_id).await {
            Ok(edge) => {
                txn.commit().await?;
                Ok(edge)
            }
            Err(err) => {
                txn.rollback().await?;
                Err(err)
            }
        }
    }

    async fn insert_edge(
        txn: &DatabaseTransaction,
        course_id: Uuid,
        prerequisite_course_id: Uuid,
    ) -> Result<prerequisites::Model, RegistrationError> {
        for id in [course_id, prerequisite_course_id] {
            courses::Entity::find_by_id(id)
                .one(txn)
                .await?
                .ok_or(RegistrationError::CourseNotFound)?;
        }

        let existing = prerequisites::Entity::find()
            .filter(prerequisites::Column::CourseId.eq(course_id))
            .filter(prerequisites::Column::PrerequisiteCourseId.eq(prerequisite_course_id))
            .one(txn)
            .await?;

        if existing.is_some() {
            return Err(RegistrationError::DuplicatePrerequisite);
        }

        let edge = prerequisites::ActiveModel {
            id: Set(Uuid::new_v4()),
            course_id: Set(course_id),
            prerequisite_course_id: Set(prerequisite_course_id),
            created_at: Set(Utc::now().naive_utc()),
        }
        .insert(txn)
        .await?;

        Ok(edge)
    }

    /// A course together with the courses it requires
    pub async fn course_with_prerequisites<C: ConnectionTrait>(
        conn: &C,
        course_id: Uuid,
    ) -> Result<(courses::Model, Vec<courses::Model>), RegistrationError> {
        let course = courses::Entity::find_by_id(course_id)
            .one(conn)
            .await?
            .ok_or(RegistrationError::CourseNotFound)?;

        let edges = prerequisites::Entity::find()
            .filter(prerequisites::Column::CourseId.eq(course_id))
            .all(conn)
            .await?;

        let required = if edges.is_empty() {
            Vec::new()
        } else {
            let ids: Vec<Uuid> = edges.iter().map(|e| e.prerequisite_course_id).collect();

            courses::Entity::find()
                .filter(courses::Column::Id.is_in(ids))
                .order_by_asc(courses::Column::Code)
                .all(conn)
                .await?
        };

        Ok((course, required))
    }

    /// Actively enrolled students of a section, for the teaching roster
    pub async fn section_roster<C: ConnectionTrait>(
        conn: &C,
        schedule_id: Uuid,
    ) -> Result<Vec<(enrollments::Model, students::Model)>, RegistrationError> {
        schedules::Entity::find_by_id(schedule_id)
            .one(conn)
            .await?
            .ok_or(RegistrationError::SectionNotFound)?;

        let rows = enrollments::Entity::find()
            .filter(enrollments::Column::ScheduleId.eq(schedule_id))
            .filter(enrollments::Column::Status.eq(EnrollmentStatus::Enrolled))
            .find_also_related(students::Entity)
            .all(conn)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(enrollment, student)| student.map(|student| (enrollment, student)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_self_prerequisite_rejected_before_insert() {
        // Rejected before the transaction even starts; the mock would
        // panic on any unexpected query
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let course_id = Uuid::new_v4();

        let err = CatalogService::add_prerequisite(&db, course_id, course_id)
            .await
            .unwrap_err();

        assert!(matches!(err, RegistrationError::SelfPrerequisite));
    }

    #[tokio::test]
    async fn test_prerequisite_requires_existing_courses() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<courses::Model>::new()])
            .into_connection();

        let err = CatalogService::add_prerequisite(&db, Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, RegistrationError::CourseNotFound));
    }
}
