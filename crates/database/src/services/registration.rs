use crate::{
    entities::{courses, enrollments, prerequisites, schedules, students},
    error::RegistrationError,
    services::ledger::CreditLedger,
};
use chrono::Utc;
use models::{eligibility, meeting::MeetingSlot, status::EnrollmentStatus};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, TransactionTrait,
    prelude::Expr,
    sea_query::ExprTrait,
};
use std::collections::HashSet;
use uuid::Uuid;

/// The admission controller: creates and cancels enrollments.
///
/// Each operation is a single transaction; any failure rolls the whole
/// thing back, so a counter increment or credit-cache write without its
/// enrollment row is never observable.
pub struct RegistrationService;

impl RegistrationService {
    /// Registers a student into a section.
    ///
    /// Runs the full check sequence (duplicate, completed, level,
    /// prerequisites, credit limit, schedule conflict), then admits through
    /// the capacity gate and refreshes the credit cache, all atomically.
    pub async fn register(
        db: &DatabaseConnection,
        student_id: Uuid,
        schedule_id: Uuid,
    ) -> Result<enrollments::Model, RegistrationError> {
        let txn = db.begin().await?;

        match Self::admit(&txn, student_id, schedule_id).await {
            Ok(enrollment) => {
                txn.commit().await?;
                Ok(enrollment)
            }
            Err(err) => {
                txn.rollback().await?;
                Err(err)
            }
        }
    }

    /// Cancels an enrollment the student currently holds.
    ///
    /// The enrollment must be in status enrolled; cancelling it again
    /// fails with `InvalidStateTransition` and never touches the counter.
    pub async fn withdraw(
        db: &DatabaseConnection,
        student_id: Uuid,
        enrollment_id: Uuid,
    ) -> Result<(), RegistrationError> {
        let txn = db.begin().await?;

        match Self::cancel(&txn, student_id, enrollment_id).await {
            Ok(()) => {
                txn.commit().await?;
                Ok(())
            }
            Err(err) => {
                txn.rollback().await?;
                Err(err)
            }
        }
    }

    async fn admit(
        txn: &DatabaseTransaction,
        student_id: Uuid,
        schedule_id: Uuid,
    ) -> Result<enrollments::Model, RegistrationError> {
        let student = students::Entity::find_by_id(student_id)
            .one(txn)
            .await?
            .ok_or(RegistrationError::StudentNotFound)?;

        if !student.status.may_register() {
            return Err(RegistrationError::NotActive);
        }

        let schedule = schedules::Entity::find_by_id(schedule_id)
            .one(txn)
            .await?
            .ok_or(RegistrationError::SectionNotFound)?;

        let course = courses::Entity::find_by_id(schedule.course_id)
            .one(txn)
            .await?
            .ok_or(RegistrationError::CourseNotFound)?;

        let existing = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student_id))
            .filter(enrollments::Column::ScheduleId.eq(schedule_id))
            .one(txn)
            .await?;

        if let Some(existing) = &existing
            && existing.status.occupies_seat()
        {
            return Err(RegistrationError::AlreadyEnrolled);
        }

        let history = CreditLedger::enrollment_history(txn, student_id).await?;

        let completed_courses: HashSet<Uuid> = history
            .iter()
            .filter(|row| row.enrollment.status == EnrollmentStatus::Completed)
            .map(|row| row.course.id)
            .collect();

        eligibility::check_not_already_completed(&completed_courses, &course.id)?;
        eligibility::check_level_eligibility(student.level, course.level)?;

        let required = Self::required_prerequisites(txn, course.id).await?;
        eligibility::check_prerequisites(&required, &completed_courses)?;

        let semester_load =
            CreditLedger::semester_credit_load(&history, schedule.semester, schedule.academic_year);
        eligibility::check_credit_limit(student.level, semester_load, course.credits)?;

        let candidate = MeetingSlot {
            days: schedule.meeting_days,
            start: schedule.start_time,
            end: schedule.end_time,
        };
        let active: Vec<MeetingSlot> = history
            .iter()
            .filter(|row| row.enrollment.status.occupies_seat())
            .map(|row| MeetingSlot {
                days: row.schedule.meeting_days,
                start: row.schedule.start_time,
                end: row.schedule.end_time,
            })
            .collect();
        eligibility::check_schedule_conflict(&candidate, &active)?;

        // Capacity gate: one conditional increment, so two racing
        // admissions cannot both slip under the cap
        let admitted = schedules::Entity::update_many()
            .col_expr(
                schedules::Column::CurrentEnrollment,
                Expr::col(schedules::Column::CurrentEnrollment).add(1),
            )
            .col_expr(
                schedules::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(schedules::Column::Id.eq(schedule_id))
            .filter(schedules::Column::CurrentEnrollment.lt(course.max_capacity))
            .exec(txn)
            .await?;

        if admitted.rows_affected == 0 {
            return Err(RegistrationError::SectionFull);
        }

        let now = Utc::now().naive_utc();
        let today = Utc::now().date_naive();

        let enrollment = match existing {
            // Reactivate the cancelled row; the (student, section) unique
            // pair keeps it to one row per pair
            Some(cancelled) => {
                let mut active: enrollments::ActiveModel = cancelled.into();
                active.status = Set(EnrollmentStatus::Enrolled);
                active.enrollment_date = Set(today);
                active.grade = Set(None);
                active.updated_at = Set(now);
                active.update(txn).await?
            }
            None => {
                enrollments::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    student_id: Set(student_id),
                    schedule_id: Set(schedule_id),
                    enrollment_date: Set(today),
                    grade: Set(None),
                    status: Set(EnrollmentStatus::Enrolled),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(txn)
                .await?
            }
        };

        CreditLedger::refresh_total_credits(txn, student_id).await?;

        Ok(enrollment)
    }

    async fn cancel(
        txn: &DatabaseTransaction,
        student_id: Uuid,
        enrollment_id: Uuid,
    ) -> Result<(), RegistrationError> {
        let enrollment = enrollments::Entity::find_by_id(enrollment_id)
            .filter(enrollments::Column::StudentId.eq(student_id))
            .one(txn)
            .await?
            .ok_or(RegistrationError::EnrollmentNotFound)?;

        // Conditional flip: an already-cancelled row matches zero rows, so
        // a duplicate withdrawal can never free the same seat twice
        let cancelled = enrollments::Entity::update_many()
            .col_expr(
                enrollments::Column::Status,
                Expr::value(EnrollmentStatus::Dropped),
            )
            .col_expr(
                enrollments::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(enrollments::Column::Id.eq(enrollment_id))
            .filter(enrollments::Column::Status.eq(EnrollmentStatus::Enrolled))
            .exec(txn)
            .await?;

        if cancelled.rows_affected == 0 {
            return Err(RegistrationError::InvalidStateTransition);
        }

        CreditLedger::refresh_section_count(txn, enrollment.schedule_id).await?;
        CreditLedger::refresh_total_credits(txn, student_id).await?;

        Ok(())
    }

    /// Direct prerequisite edges of a course, with the codes used in the
    /// user-facing failure
    async fn required_prerequisites(
        txn: &DatabaseTransaction,
        course_id: Uuid,
    ) -> Result<Vec<(Uuid, String)>, RegistrationError> {
        let edges = prerequisites::Entity::find()
            .filter(prerequisites::Column::CourseId.eq(course_id))
            .all(txn)
            .await?;

        if edges.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = edges.iter().map(|e| e.prerequisite_course_id).collect();

        let required = courses::Entity::find()
            .filter(courses::Column::Id.is_in(ids))
            .all(txn)
            .await?
            .into_iter()
            .map(|course| (course.id, course.code))
            .collect();

        Ok(required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use models::{level::AcademicLevel, status::StudentStatus};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn student(status: StudentStatus) -> students::Model {
        students::Model {
            id: Uuid::new_v4(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@university.edu".to_string(),
            date_of_birth: None,
            major: Some("Mathematics".to_string()),
            level: AcademicLevel::Undergraduate,
            status,
            enrollment_date: NaiveDate::from_ymd_opt(2024, 8, 20).unwrap(),
            total_credits: 0,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    #[tokio::test]
    async fn test_register_unknown_student() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<students::Model>::new()])
            .into_connection();

        let err = RegistrationService::register(&db, Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, RegistrationError::StudentNotFound));
    }

    #[tokio::test]
    async fn test_register_inactive_student() {
        let suspended = student(StudentStatus::Suspended);
        let student_id = suspended.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![suspended]])
            .into_connection();

        let err = RegistrationService::register(&db, student_id, Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, RegistrationError::NotActive));
    }

    #[tokio::test]
    async fn test_withdraw_unknown_enrollment() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<enrollments::Model>::new()])
            .into_connection();

        let err = RegistrationService::withdraw(&db, Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, RegistrationError::EnrollmentNotFound));
    }

    #[tokio::test]
    async fn test_withdraw_already_dropped_enrollment() {
        let student_id = Uuid::new_v4();
        let row = enrollments::Model {
            id: Uuid::new_v4(),
            student_id,
            schedule_id: Uuid::new_v4(),
            enrollment_date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
            grade: None,
            status: EnrollmentStatus::Dropped,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        };
        let enrollment_id = row.id;

        // The conditional status flip matches no rows for a dropped
        // enrollment
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let err = RegistrationService::withdraw(&db, student_id, enrollment_id)
            .await
            .unwrap_err();

        assert!(matches!(err, RegistrationError::InvalidStateTransition));
    }
}
