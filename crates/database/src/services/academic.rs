use crate::{
    entities::{enrollments, students},
    error::RegistrationError,
    services::ledger::{CreditLedger, HistoryRow},
};
use chrono::Utc;
use models::{
    grade::Grade,
    level::AcademicLevel,
    status::EnrollmentStatus,
    transcript::{self, CreditSummary, UpgradeReport},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, TransactionTrait,
};
use uuid::Uuid;

/// A student's full record: every enrollment with its section and course,
/// plus the derived aggregates
#[derive(Debug)]
pub struct AcademicHistory {
    pub student: students::Model,
    pub records: Vec<HistoryRow>,
    pub gpa: f64,
    pub credits: CreditSummary,
}

pub struct AcademicRecordService;

impl AcademicRecordService {
    pub async fn academic_history<C: ConnectionTrait>(
        conn: &C,
        student_id: Uuid,
    ) -> Result<AcademicHistory, RegistrationError> {
        let student = students::Entity::find_by_id(student_id)
            .one(conn)
            .await?
            .ok_or(RegistrationError::StudentNotFound)?;

        let history = CreditLedger::enrollment_history(conn, student_id).await?;

        Ok(AcademicHistory {
            gpa: transcript::gpa(&Self::graded_courses(&history)),
            credits: Self::credit_summary(&history),
            student,
            records: history,
        })
    }

    /// Promotion eligibility report for the student's current level.
    /// Pure read; an ineligible student just gets `eligible: false`.
    pub async fn check_level_upgrade<C: ConnectionTrait>(
        conn: &C,
        student_id: Uuid,
    ) -> Result<UpgradeReport, RegistrationError> {
        let student = students::Entity::find_by_id(student_id)
            .one(conn)
            .await?
            .ok_or(RegistrationError::StudentNotFound)?;

        let history = CreditLedger::enrollment_history(conn, student_id).await?;
        let summary = Self::credit_summary(&history);

        let graduate_completed: i32 = history
            .iter()
            .filter(|row| row.enrollment.status == EnrollmentStatus::Completed)
            .filter(|row| row.course.level == AcademicLevel::Graduate)
            .map(|row| row.course.credits)
            .sum();

        Ok(transcript::upgrade_report(
            student.level,
            summary.completed,
            graduate_completed,
            transcript::gpa(&Self::graded_courses(&history)),
        ))
    }

    /// Posts a final grade on an enrolled section: the row completes with
    /// the grade, except W which leaves a withdrawal mark on the
    /// transcript. Frees the seat and refreshes the credit cache in the
    /// same transaction.
    pub async fn record_grade(
        db: &DatabaseConnection,
        enrollment_id: Uuid,
        grade: Grade,
    ) -> Result<enrollments::Model, RegistrationError> {
        let txn = db.begin().await?;

        match Self::post_grade(&txn, enrollment_id, grade).await {
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

    async fn post_grade(
        txn: &DatabaseTransaction,
        enrollment_id: Uuid,
        grade: Grade,
    ) -> Result<enrollments::Model, RegistrationError> {
        let enrollment = enrollments::Entity::find_by_id(enrollment_id)
            .one(txn)
            .await?
            .ok_or(RegistrationError::EnrollmentNotFound)?;

        if enrollment.status != EnrollmentStatus::Enrolled {
            return Err(RegistrationError::InvalidStateTransition);
        }

        let student_id = enrollment.student_id;
        let schedule_id = enrollment.schedule_id;

        let status = if grade == Grade::W {
            EnrollmentStatus::Withdrawn
        } else {
            EnrollmentStatus::Completed
        };

        let mut active: enrollments::ActiveModel = enrollment.into();
        active.grade = Set(Some(grade));
        active.status = Set(status);
        active.updated_at = Set(Utc::now().naive_utc());
        let updated = active.update(txn).await?;

        CreditLedger::refresh_section_count(txn, schedule_id).await?;
        CreditLedger::refresh_total_credits(txn, student_id).await?;

        Ok(updated)
    }

    fn graded_courses(history: &[HistoryRow]) -> Vec<(Grade, i32)> {
        history
            .iter()
            .filter_map(|row| row.enrollment.grade.map(|grade| (grade, row.course.credits)))
            .collect()
    }

    fn credit_summary(history: &[HistoryRow]) -> CreditSummary {
        let credits_where = |status: EnrollmentStatus| -> i32 {
            history
                .iter()
                .filter(|row| row.enrollment.status == status)
                .map(|row| row.course.credits)
                .sum()
        };

        CreditSummary {
            completed: credits_where(EnrollmentStatus::Completed),
            enrolled: credits_where(EnrollmentStatus::Enrolled),
            attempted: history.iter().map(|row| row.course.credits).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_record_grade_on_cancelled_enrollment() {
        let row = enrollments::Model {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            schedule_id: Uuid::new_v4(),
            enrollment_date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
            grade: None,
            status: EnrollmentStatus::Dropped,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        };
        let enrollment_id = row.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row]])
            .into_connection();

        let err = AcademicRecordService::record_grade(&db, enrollment_id, Grade::A)
            .await
            .unwrap_err();

        assert!(matches!(err, RegistrationError::InvalidStateTransition));
    }

    #[tokio::test]
    async fn test_history_of_unknown_student() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<students::Model>::new()])
            .into_connection();

        let err = AcademicRecordService::academic_history(&db, Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, RegistrationError::StudentNotFound));
    }
}
