use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Courses::CourseCode)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Courses::CourseName).string().not_null())
                    .col(ColumnDef::new(Courses::Department).string().not_null())
                    .col(ColumnDef::new(Courses::Credits).integer().not_null().default(3))
                    .col(ColumnDef::new(Courses::Description).text())
                    .col(ColumnDef::new(Courses::Prerequisites).text())
                    .col(ColumnDef::new(Courses::Schedule).string())
                    .col(ColumnDef::new(Courses::Semester).string())
                    .col(ColumnDef::new(Courses::Year).integer())
                    .col(ColumnDef::new(Courses::Capacity).integer().not_null().default(30))
                    .col(ColumnDef::new(Courses::Enrolled).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Courses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .check(
                        Expr::col(Courses::Enrolled)
                            .gte(0)
                            .and(Expr::col(Courses::Enrolled).lte(Expr::col(Courses::Capacity))),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Courses::Table)
                    .col(Courses::Department)
                    .name("idx_courses_department")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Courses::Table)
                    .col(Courses::Semester)
                    .col(Courses::Year)
                    .name("idx_courses_semester_year")
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Professors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Professors::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Professors::Name).string().not_null())
                    .col(ColumnDef::new(Professors::Department).string())
                    .col(ColumnDef::new(Professors::Email).string())
                    .col(ColumnDef::new(Professors::Office).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .table(Professors::Table)
                    .col(Professors::Name)
                    .col(Professors::Department)
                    .name("uq_professors_name_department")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Professors::Table)
                    .col(Professors::Name)
                    .name("idx_professors_name")
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CourseProfessors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseProfessors::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseProfessors::CourseId).integer().not_null())
                    .col(
                        ColumnDef::new(CourseProfessors::ProfessorId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseProfessors::Role)
                            .string()
                            .not_null()
                            .default("Instructor"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseProfessors::Table, CourseProfessors::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseProfessors::Table, CourseProfessors::ProfessorId)
                            .to(Professors::Table, Professors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .table(CourseProfessors::Table)
                    .col(CourseProfessors::CourseId)
                    .col(CourseProfessors::ProfessorId)
                    .name("uq_course_professors_course_professor")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(CourseProfessors::Table)
                    .col(CourseProfessors::CourseId)
                    .name("idx_course_professors_course_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(CourseProfessors::Table)
                    .col(CourseProfessors::ProfessorId)
                    .name("idx_course_professors_professor_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CourseProfessors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Professors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
    CourseCode,
    CourseName,
    Department,
    Credits,
    Description,
    Prerequisites,
    Schedule,
    Semester,
    Year,
    Capacity,
    Enrolled,
    CreatedAt,
}

#[derive(Iden)]
enum Professors {
    Table,
    Id,
    Name,
    Department,
    Email,
    Office,
}

#[derive(Iden)]
enum CourseProfessors {
    Table,
    Id,
    CourseId,
    ProfessorId,
    Role,
}
