use sea_orm::entity::prelude::*;

/// Read-only `user_enrollments` view (course rosters).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_enrollments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub course_id: i32,
    pub email: String,
    pub name: String,
    pub course_code: String,
    pub course_name: String,
    pub department: String,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
    pub status: String,
    pub grade: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
