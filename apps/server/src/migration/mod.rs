//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_projects;
mod m20250301_000002_create_report_files;
mod m20250301_000003_create_test_results;
mod m20250301_000004_create_reviews;
mod m20250301_000005_create_users;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_projects::Migration),
            Box::new(m20250301_000002_create_report_files::Migration),
            Box::new(m20250301_000003_create_test_results::Migration),
            Box::new(m20250301_000004_create_reviews::Migration),
            Box::new(m20250301_000005_create_users::Migration),
        ]
    }
}
