use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on schedules for joins and term filtering
        manager
            .create_index(
                Index::create()
                    .name("idx_schedules_course_id")
                    .table(Schedules::Table)
                    .col(Schedules::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_schedules_semester_year")
                    .table(Schedules::Table)
                    .col(Schedules::Semester)
                    .col(Schedules::AcademicYear)
                    .to_owned(),
            )
            .await?;

        // Indexes on enrollments for the per-student history load and
        // the per-section seat count
        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_student_id")
                    .table(Enrollments::Table)
                    .col(Enrollments::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_schedule_id_status")
                    .table(Enrollments::Table)
                    .col(Enrollments::ScheduleId)
                    .col(Enrollments::Status)
                    .to_owned(),
            )
            .await?;

        // Index on prerequisites.course_id for the admission check
        manager
            .create_index(
                Index::create()
                    .name("idx_prerequisites_course_id")
                    .table(Prerequisites::Table)
                    .col(Prerequisites::CourseId)
                    .to_owned(),
            )
            .await?;

        // Indexes on teachings for roster lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_teachings_professor_id")
                    .table(Teachings::Table)
                    .col(Teachings::ProfessorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_teachings_schedule_id")
                    .table(Teachings::Table)
                    .col(Teachings::ScheduleId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_schedules_course_id",
            "idx_schedules_semester_year",
            "idx_enrollments_student_id",
            "idx_enrollments_schedule_id_status",
            "idx_prerequisites_course_id",
            "idx_teachings_professor_id",
            "idx_teachings_schedule_id",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(Iden)]
enum Schedules {
    Table,
    CourseId,
    Semester,
    AcademicYear,
}

#[derive(Iden)]
enum Enrollments {
    Table,
    StudentId,
    ScheduleId,
    Status,
}

#[derive(Iden)]
enum Prerequisites {
    Table,
    CourseId,
}

#[derive(Iden)]
enum Teachings {
    Table,
    ProfessorId,
    ScheduleId,
}
