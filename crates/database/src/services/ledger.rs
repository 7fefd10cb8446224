use crate::entities::{courses, enrollments, schedules, students};
use chrono::Utc;
use models::{semester::Semester, status::EnrollmentStatus};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, prelude::Expr,
};
use std::collections::HashMap;
use uuid::Uuid;

/// One enrollment with its section and course, as loaded for rule
/// evaluation and reporting
#[derive(Debug, Clone)]
pub struct HistoryRow {
    pub enrollment: enrollments::Model,
    pub schedule: schedules::Model,
    pub course: courses::Model,
}

/// Maintains the derived aggregates: the per-student total_credits cache
/// and the per-section seat counter. Both are rewritten from the enrollment
/// rows inside the transaction that changes them, never lazily.
pub struct CreditLedger;

impl CreditLedger {
    /// Loads every enrollment of a student together with its section and
    /// course
    pub async fn enrollment_history<C: ConnectionTrait>(
        conn: &C,
        student_id: Uuid,
    ) -> Result<Vec<HistoryRow>, DbErr> {
        let rows = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student_id))
            .find_also_related(schedules::Entity)
            .all(conn)
            .await?;

        let course_ids: Vec<Uuid> = rows
            .iter()
            .filter_map(|(_, schedule)| schedule.as_ref().map(|s| s.course_id))
            .collect();

        let courses_by_id: HashMap<Uuid, courses::Model> = courses::Entity::find()
            .filter(courses::Column::Id.is_in(course_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|course| (course.id, course))
            .collect();

        Ok(rows
            .into_iter()
            .filter_map(|(enrollment, schedule)| {
                let schedule = schedule?;
                let course = courses_by_id.get(&schedule.course_id)?.clone();

                Some(HistoryRow {
                    enrollment,
                    schedule,
                    course,
                })
            })
            .collect())
    }

    /// Credits the student actively holds in the given term
    pub fn semester_credit_load(
        history: &[HistoryRow],
        semester: Semester,
        academic_year: i16,
    ) -> i32 {
        history
            .iter()
            .filter(|row| row.enrollment.status.occupies_seat())
            .filter(|row| {
                row.schedule.semester == semester && row.schedule.academic_year == academic_year
            })
            .map(|row| row.course.credits)
            .sum()
    }

    /// Rewrites the student's total_credits cache from the enrollment rows.
    /// Invariant: total_credits == sum of credits over enrollments with
    /// status enrolled or completed.
    pub async fn refresh_total_credits<C: ConnectionTrait>(
        conn: &C,
        student_id: Uuid,
    ) -> Result<i32, DbErr> {
        let history = Self::enrollment_history(conn, student_id).await?;

        let total: i32 = history
            .iter()
            .filter(|row| row.enrollment.status.counts_toward_credits())
            .map(|row| row.course.credits)
            .sum();

        students::Entity::update_many()
            .col_expr(students::Column::TotalCredits, Expr::value(total))
            .col_expr(
                students::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(students::Column::Id.eq(student_id))
            .exec(conn)
            .await?;

        Ok(total)
    }

    /// Re-derives a section's seat counter from a count of its enrolled
    /// rows, so a missed or doubled event self-heals rather than drifting
    pub async fn refresh_section_count<C: ConnectionTrait>(
        conn: &C,
        schedule_id: Uuid,
    ) -> Result<u64, DbErr> {
        let enrolled = enrollments::Entity::find()
            .filter(enrollments::Column::ScheduleId.eq(schedule_id))
            .filter(enrollments::Column::Status.eq(EnrollmentStatus::Enrolled))
            .count(conn)
            .await?;

        schedules::Entity::update_many()
            .col_expr(
                schedules::Column::CurrentEnrollment,
                Expr::value(enrolled as i32),
            )
            .col_expr(
                schedules::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(schedules::Column::Id.eq(schedule_id))
            .exec(conn)
            .await?;

        Ok(enrolled)
    }
}
