use sea_orm::entity::prelude::*;

/// Read-only `alumni_directory` view: alumni users with their profile, if any.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "alumni_directory")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub graduation_year: Option<i32>,
    pub major: Option<String>,
    pub employer: Option<String>,
    pub title: Option<String>,
    pub industry: Option<String>,
    pub mentorship_available: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
