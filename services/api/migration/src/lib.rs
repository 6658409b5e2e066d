use sea_orm_migration::prelude::*;

mod m20241001_000001_create_users;
mod m20241001_000002_create_catalogue;
mod m20241001_000003_create_enrollments;
mod m20241001_000004_create_reviews;
mod m20241001_000005_create_views;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241001_000001_create_users::Migration),
            Box::new(m20241001_000002_create_catalogue::Migration),
            Box::new(m20241001_000003_create_enrollments::Migration),
            Box::new(m20241001_000004_create_reviews::Migration),
            Box::new(m20241001_000005_create_views::Migration),
        ]
    }
}
