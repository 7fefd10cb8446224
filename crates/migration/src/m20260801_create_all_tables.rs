use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create students table
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Students::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Students::FirstName).string().not_null())
                    .col(ColumnDef::new(Students::LastName).string().not_null())
                    .col(
                        ColumnDef::new(Students::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::DateOfBirth).date())
                    .col(ColumnDef::new(Students::Major).string())
                    .col(ColumnDef::new(Students::Level).string_len(16).not_null())
                    .col(ColumnDef::new(Students::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Students::EnrollmentDate).date().not_null())
                    .col(
                        ColumnDef::new(Students::TotalCredits)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Students::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Students::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Create professors table
        manager
            .create_table(
                Table::create()
                    .table(Professors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Professors::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Professors::FirstName).string().not_null())
                    .col(ColumnDef::new(Professors::LastName).string().not_null())
                    .col(
                        ColumnDef::new(Professors::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Professors::Department).string().not_null())
                    .col(ColumnDef::new(Professors::HireDate).date().not_null())
                    .col(ColumnDef::new(Professors::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Professors::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Professors::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Create courses table
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Courses::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Courses::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .col(ColumnDef::new(Courses::Description).text())
                    .col(
                        ColumnDef::new(Courses::Credits)
                            .integer()
                            .not_null()
                            .check(
                                Expr::col(Courses::Credits)
                                    .gte(1)
                                    .and(Expr::col(Courses::Credits).lte(6)),
                            ),
                    )
                    .col(ColumnDef::new(Courses::Department).string().not_null())
                    .col(ColumnDef::new(Courses::Level).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Courses::MaxCapacity)
                            .integer()
                            .not_null()
                            .check(
                                Expr::col(Courses::MaxCapacity)
                                    .gte(5)
                                    .and(Expr::col(Courses::MaxCapacity).lte(300)),
                            ),
                    )
                    .col(ColumnDef::new(Courses::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Create prerequisites edge table
        manager
            .create_table(
                Table::create()
                    .table(Prerequisites::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Prerequisites::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Prerequisites::CourseId).uuid().not_null())
                    .col(
                        ColumnDef::new(Prerequisites::PrerequisiteCourseId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Prerequisites::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-prerequisites-course_id")
                            .from(Prerequisites::Table, Prerequisites::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-prerequisites-prerequisite_course_id")
                            .from(Prerequisites::Table, Prerequisites::PrerequisiteCourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A course can never be its own prerequisite
        manager
            .get_connection()
            .execute_unprepared(
                "ALTER TABLE prerequisites
                 ADD CONSTRAINT chk_no_self_prerequisite
                 CHECK (course_id <> prerequisite_course_id)",
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_prerequisites_pair")
                    .table(Prerequisites::Table)
                    .col(Prerequisites::CourseId)
                    .col(Prerequisites::PrerequisiteCourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create schedules table
        manager
            .create_table(
                Table::create()
                    .table(Schedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Schedules::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Schedules::CourseId).uuid().not_null())
                    .col(ColumnDef::new(Schedules::Semester).string_len(8).not_null())
                    .col(
                        ColumnDef::new(Schedules::AcademicYear)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Schedules::MeetingDays)
                            .string_len(5)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Schedules::StartTime).time().not_null())
                    .col(ColumnDef::new(Schedules::EndTime).time().not_null())
                    .col(ColumnDef::new(Schedules::Room).string().not_null())
                    .col(
                        ColumnDef::new(Schedules::CurrentEnrollment)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Schedules::CurrentEnrollment).gte(0)),
                    )
                    .col(ColumnDef::new(Schedules::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Schedules::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-schedules-course_id")
                            .from(Schedules::Table, Schedules::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Meeting intervals are half-open and must be non-empty
        manager
            .get_connection()
            .execute_unprepared(
                "ALTER TABLE schedules
                 ADD CONSTRAINT chk_meeting_interval
                 CHECK (start_time < end_time)",
            )
            .await?;

        // Create teachings junction table
        manager
            .create_table(
                Table::create()
                    .table(Teachings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teachings::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Teachings::ProfessorId).uuid().not_null())
                    .col(ColumnDef::new(Teachings::ScheduleId).uuid().not_null())
                    .col(ColumnDef::new(Teachings::CreatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-teachings-professor_id")
                            .from(Teachings::Table, Teachings::ProfessorId)
                            .to(Professors::Table, Professors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-teachings-schedule_id")
                            .from(Teachings::Table, Teachings::ScheduleId)
                            .to(Schedules::Table, Schedules::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_teachings_pair")
                    .table(Teachings::Table)
                    .col(Teachings::ProfessorId)
                    .col(Teachings::ScheduleId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create enrollments table
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrollments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Enrollments::StudentId).uuid().not_null())
                    .col(ColumnDef::new(Enrollments::ScheduleId).uuid().not_null())
                    .col(
                        ColumnDef::new(Enrollments::EnrollmentDate)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Enrollments::Grade).string_len(2))
                    .col(
                        ColumnDef::new(Enrollments::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::UpdatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollments-student_id")
                            .from(Enrollments::Table, Enrollments::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollments-schedule_id")
                            .from(Enrollments::Table, Enrollments::ScheduleId)
                            .to(Schedules::Table, Schedules::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_enrollments_student_schedule")
                    .table(Enrollments::Table)
                    .col(Enrollments::StudentId)
                    .col(Enrollments::ScheduleId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teachings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Schedules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Prerequisites::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Professors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Students {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    DateOfBirth,
    Major,
    Level,
    Status,
    EnrollmentDate,
    TotalCredits,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Professors {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Department,
    HireDate,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
    Code,
    Name,
    Description,
    Credits,
    Department,
    Level,
    MaxCapacity,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Prerequisites {
    Table,
    Id,
    CourseId,
    PrerequisiteCourseId,
    CreatedAt,
}

#[derive(Iden)]
enum Schedules {
    Table,
    Id,
    CourseId,
    Semester,
    AcademicYear,
    MeetingDays,
    StartTime,
    EndTime,
    Room,
    CurrentEnrollment,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Teachings {
    Table,
    Id,
    ProfessorId,
    ScheduleId,
    CreatedAt,
}

#[derive(Iden)]
enum Enrollments {
    Table,
    Id,
    StudentId,
    ScheduleId,
    EnrollmentDate,
    Grade,
    Status,
    CreatedAt,
    UpdatedAt,
}
