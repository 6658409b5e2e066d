use sea_orm::entity::prelude::*;

/// Read-only `course_details` view: a course plus its instructor list and review aggregates.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "course_details")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub course_code: String,
    pub course_name: String,
    pub department: String,
    pub credits: i32,
    pub description: Option<String>,
    pub prerequisites: Option<String>,
    pub schedule: Option<String>,
    pub semester: Option<String>,
    pub year: Option<i32>,
    pub capacity: i32,
    pub enrolled: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub seats_available: i32,
    /// Comma-joined professor names in role order; NULL when none are linked.
    pub instructors: Option<String>,
    pub instructor_count: i32,
    pub review_count: i32,
    pub avg_rating: Option<f64>,
    pub avg_difficulty: Option<f64>,
    pub recommend_rate: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
