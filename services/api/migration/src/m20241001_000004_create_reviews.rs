use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reviews::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reviews::UserId).integer().not_null())
                    .col(ColumnDef::new(Reviews::CourseId).integer().not_null())
                    .col(ColumnDef::new(Reviews::ProfessorId).integer())
                    .col(ColumnDef::new(Reviews::SemesterTaken).string())
                    .col(ColumnDef::new(Reviews::YearTaken).integer())
                    .col(
                        ColumnDef::new(Reviews::Rating)
                            .integer()
                            .not_null()
                            .check(Expr::col(Reviews::Rating).between(1, 5)),
                    )
                    .col(
                        ColumnDef::new(Reviews::Difficulty)
                            .integer()
                            .not_null()
                            .check(Expr::col(Reviews::Difficulty).between(1, 5)),
                    )
                    .col(ColumnDef::new(Reviews::Comment).text())
                    .col(
                        ColumnDef::new(Reviews::WouldRecommend)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Reviews::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reviews::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Reviews::Table, Reviews::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Reviews::Table, Reviews::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Reviews::Table, Reviews::ProfessorId)
                            .to(Professors::Table, Professors::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // NULLs are distinct in a plain unique index, so the natural key is
        // indexed over coalesced values.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS uq_reviews_user_course_professor_term \
                 ON reviews (user_id, course_id, COALESCE(professor_id, 0), \
                 COALESCE(semester_taken, ''), COALESCE(year_taken, 0))",
            )
            .await?;

        for (name, col) in [
            ("idx_reviews_course_id", Reviews::CourseId),
            ("idx_reviews_professor_id", Reviews::ProfessorId),
            ("idx_reviews_user_id", Reviews::UserId),
        ] {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .table(Reviews::Table)
                        .col(col)
                        .name(name)
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Reviews {
    Table,
    Id,
    UserId,
    CourseId,
    ProfessorId,
    SemesterTaken,
    YearTaken,
    Rating,
    Difficulty,
    Comment,
    WouldRecommend,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
}

#[derive(Iden)]
enum Professors {
    Table,
    Id,
}
